//! This file defines the functions that check
//! the pre-conditions on configuration values,
//! e.g., the number of boosting rounds.
use serde::de::DeserializeOwned;

use std::fmt;

use crate::{ClassifierError, Result};


/// The side of an interval a parameter fell out of.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    /// The value is smaller than the declared minimum.
    Min(f64),
    /// The value is larger than the declared maximum.
    Max(f64),
}


/// A single out-of-bounds configuration value.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// Name of the parameter, as it appears in the config struct.
    pub parameter: &'static str,
    /// The bound that was violated.
    pub bound: Bound,
    /// The offending value.
    pub value: f64,
}


impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.bound {
            Bound::Min(min) => write!(
                f, "`{}` must be at least {min}, got {}",
                self.parameter, self.value
            ),
            Bound::Max(max) => write!(
                f, "`{}` must be at most {max}, got {}",
                self.parameter, self.value
            ),
        }
    }
}


/// The list of violations carried by
/// [`ClassifierError::InvalidParameters`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Violations(pub Vec<Violation>);


impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for v in &self.0 {
            if !first { write!(f, "; ")?; }
            write!(f, "{v}")?;
            first = false;
        }
        Ok(())
    }
}


/// Configuration structs implement this trait.
/// Only [`Validate::violations`] is required.
pub trait Validate {
    /// Returns every out-of-bounds value of `self`.
    /// An empty vector means the configuration is usable.
    fn violations(&self) -> Vec<Violation>;


    /// Returns `Err(InvalidParameters)` if `self.violations()` is non-empty.
    fn validate(&self) -> Result<()> {
        let violations = self.violations();
        if violations.is_empty() {
            Ok(())
        } else {
            Err(ClassifierError::InvalidParameters(Violations(violations)))
        }
    }
}


/// Parse a JSON document into a config struct and validate it.
/// Missing fields take their default values.
pub fn config_from_json<C>(json: &str) -> Result<C>
    where C: DeserializeOwned + Validate,
{
    let config: C = serde_json::from_str(json)?;
    config.validate()?;
    Ok(config)
}


/// Push a violation if `value < min`.
#[inline(always)]
pub(crate) fn at_least(
    out: &mut Vec<Violation>,
    parameter: &'static str,
    value: f64,
    min: f64,
)
{
    // `!(value >= min)` also rejects NaN.
    if !(value >= min) {
        out.push(Violation { parameter, bound: Bound::Min(min), value });
    }
}


/// Push a violation if `value > max`.
#[inline(always)]
pub(crate) fn at_most(
    out: &mut Vec<Violation>,
    parameter: &'static str,
    value: f64,
    max: f64,
)
{
    if value > max {
        out.push(Violation { parameter, bound: Bound::Max(max), value });
    }
}


/// Check that the weight slice matches the examples.
#[inline(always)]
pub(crate) fn weights_match(n_examples: usize, weights: &[f64]) -> Result<()> {
    if n_examples != weights.len() {
        return Err(ClassifierError::WeightLengthMismatch {
            examples: n_examples,
            weights: weights.len(),
        });
    }
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;

    struct Knobs {
        rounds: usize,
        lambda: f64,
    }

    impl Validate for Knobs {
        fn violations(&self) -> Vec<Violation> {
            let mut out = Vec::new();
            at_least(&mut out, "rounds", self.rounds as f64, 1.0);
            at_least(&mut out, "lambda", self.lambda, 0.0);
            at_most(&mut out, "lambda", self.lambda, 1.0);
            out
        }
    }

    #[test]
    fn test_valid_knobs() {
        let knobs = Knobs { rounds: 3, lambda: 0.5 };
        assert!(knobs.validate().is_ok());
    }

    #[test]
    fn test_every_violation_is_reported() {
        let knobs = Knobs { rounds: 0, lambda: 2.0 };
        let violations = knobs.violations();
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].parameter, "rounds");
        assert_eq!(violations[1].bound, Bound::Max(1.0));
    }

    #[test]
    fn test_message_names_parameter_bound_and_value() {
        let knobs = Knobs { rounds: 0, lambda: 0.5 };
        let message = knobs.validate().unwrap_err().to_string();
        assert!(message.contains("rounds"), "{message}");
        assert!(message.contains("at least 1"), "{message}");
        assert!(message.contains("got 0"), "{message}");
    }

    #[test]
    fn test_nan_is_out_of_bounds() {
        let knobs = Knobs { rounds: 1, lambda: f64::NAN };
        assert_eq!(knobs.violations().len(), 1);
    }

    #[test]
    fn test_weight_length() {
        assert!(weights_match(3, &[0.1, 0.2, 0.7]).is_ok());
        assert!(matches!(
            weights_match(3, &[0.5, 0.5]),
            Err(ClassifierError::WeightLengthMismatch { examples: 3, weights: 2 })
        ));
    }
}
