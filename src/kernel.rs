//! Scalar kernels over inner products, used by the voted perceptron.
use serde::{Serialize, Deserialize};

use crate::common::checker::{self, Validate, Violation};


/// A scalar transform of an inner product.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Kernel {
    /// `k(ip) = ip`.
    Basic,
    /// `k(ip) = (scale * ip + offset)^degree`.
    Polynomial {
        /// Multiplier on the inner product
        scale: f64,
        /// Constant added before exponentiation
        offset: f64,
        /// Exponent
        degree: u32,
    },
    /// `k(ip) = tanh(scale * ip + offset)`.
    Tanh {
        /// Multiplier on the inner product
        scale: f64,
        /// Constant added before the tangent
        offset: f64,
    },
}


impl Default for Kernel {
    fn default() -> Self {
        Self::Basic
    }
}


impl Kernel {
    /// Apply the kernel to the inner product `ip`.
    #[inline]
    pub fn apply(&self, ip: f64) -> f64 {
        match *self {
            Self::Basic => ip,
            Self::Polynomial { scale, offset, degree } => {
                let degree = i32::try_from(degree).unwrap_or(i32::MAX);
                (scale * ip + offset).powi(degree)
            },
            Self::Tanh { scale, offset } => (scale * ip + offset).tanh(),
        }
    }
}


impl Validate for Kernel {
    fn violations(&self) -> Vec<Violation> {
        let mut out = Vec::new();
        if let Self::Polynomial { degree, .. } = *self {
            checker::at_least(&mut out, "kernel.degree", degree as f64, 1.0);
            checker::at_most(
                &mut out, "kernel.degree", degree as f64, i32::MAX as f64
            );
        }
        out
    }
}
