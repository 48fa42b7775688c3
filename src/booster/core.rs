//! Provides `Booster` trait.
use std::ops::ControlFlow;

use crate::Result;


/// The trait [`Booster`] defines the standard framework of Boosting:
/// a repeated game between the booster and a weak learner.
///
/// In each round `t = 1, 2, ...`,
/// 1. the booster chooses a distribution over the training examples,
/// 2. the weak learner returns a hypothesis trained on that distribution,
/// 3. the booster weighs the hypothesis and updates the distribution.
///
/// # Required Methods
/// - [`Booster::name`]
/// - [`Booster::preprocess`]
/// - [`Booster::boost`]
/// - [`Booster::postprocess`]
///
/// # Provided Methods
/// - [`Booster::run`]
pub trait Booster {
    /// The combined hypothesis output by the boosting algorithm.
    type Output;


    /// Returns the name of the boosting algorithm.
    fn name(&self) -> &str;


    /// A main function that runs the boosting algorithm.
    fn run(mut self) -> Result<Self::Output>
        where Self: Sized,
    {
        self.preprocess()?;

        for iteration in 1.. {
            if let ControlFlow::Break(_) = self.boost(iteration)? {
                break;
            }
        }

        Ok(self.postprocess())
    }


    /// Pre-processing for `self`.
    /// As you can see in [`Booster::run`],
    /// this method is called before the boosting process.
    fn preprocess(&mut self) -> Result<()>;


    /// Boosting step per iteration.
    /// Returns `ControlFlow::Break(last_iteration)` once
    /// the algorithm is done, `ControlFlow::Continue(())` otherwise.
    fn boost(&mut self, iteration: usize) -> Result<ControlFlow<usize>>;


    /// Post-processing.
    fn postprocess(self) -> Self::Output;
}
