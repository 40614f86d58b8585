use nalgebra::RealField as NalgebraRealField;
use thiserror::Error;

use super::domain::Domain;

/// Extension trait for `nalgebra::RealField` with constants used throughout
/// the crate.
pub trait RealField: NalgebraRealField {
    /// Square root of machine epsilon. A standard constant for epsilons in
    /// first-order finite-difference approximations.
    const EPSILON_SQRT: Self;
}

impl RealField for f32 {
    const EPSILON_SQRT: Self = 0.00034526698;
}

impl RealField for f64 {
    const EPSILON_SQRT: Self = 0.000000014901161193847656;
}

/// The base trait for [`Function`](super::function::Function) and
/// [`Gradient`](super::gradient::Gradient).
pub trait Problem {
    /// Type of the field, usually f32 or f64.
    type Field: RealField + Copy;

    /// Gets the domain (dimensionality and bound constraints) of the problem.
    fn domain(&self) -> Domain<Self::Field>;
}

/// Error while evaluating the cost or its derivatives.
///
/// Evaluations are backed by arbitrary user code (in the motivating
/// applications, PDE state and adjoint solves) which can fail in ways this
/// crate cannot recover from. Such errors are propagated to the caller as-is.
#[derive(Debug, Error)]
pub enum ProblemError {
    /// An invalid value (NaN, positive or negative infinity) of the cost or a
    /// gradient component occurred.
    #[error("invalid value encountered")]
    InvalidValue,
    /// A custom error specific to the problem.
    #[error("{0}")]
    Custom(Box<dyn std::error::Error>),
}
