use nalgebra::{storage::Storage, Dyn, IsContiguous, Vector};

use super::base::{Problem, ProblemError};

/// Definition of a cost function.
///
/// ## Defining a function
///
/// A function is any type that implements [`Function`] and [`Problem`] traits.
///
/// ```rust
/// use descent::nalgebra as na;
/// use descent::{Domain, Function, Problem, ProblemError};
/// use na::{Dyn, IsContiguous};
///
/// struct Rosenbrock {
///     a: f64,
///     b: f64,
/// }
///
/// impl Problem for Rosenbrock {
///     type Field = f64;
///
///     fn domain(&self) -> Domain<Self::Field> {
///         Domain::unconstrained(2)
///     }
/// }
///
/// impl Function for Rosenbrock {
///     fn apply<Sx>(&self, x: &na::Vector<Self::Field, Dyn, Sx>) -> Result<Self::Field, ProblemError>
///     where
///         Sx: na::storage::Storage<Self::Field, Dyn> + IsContiguous,
///     {
///         // Compute the cost value.
///         Ok((self.a - x[0]).powi(2) + self.b * (x[1] - x[0].powi(2)).powi(2))
///     }
/// }
/// ```
///
/// The evaluation is fallible because in the motivating applications it is
/// backed by expensive external computations (e.g., PDE solves) that can
/// diverge. Such failures are propagated through the algorithms to the caller.
pub trait Function: Problem {
    /// Calculates the cost value in given point.
    fn apply<Sx>(&self, x: &Vector<Self::Field, Dyn, Sx>) -> Result<Self::Field, ProblemError>
    where
        Sx: Storage<Self::Field, Dyn> + IsContiguous;
}
