use nalgebra::{
    storage::{Storage, StorageMut},
    Dyn, IsContiguous, Vector,
};

use super::gradient::Gradient;

/// Interface of a direction generator.
///
/// A direction generator takes the current iterate and gradient and produces
/// a search direction along which a line search is performed. Stateful
/// generators (nonlinear conjugate gradients, L-BFGS) accumulate history
/// across calls; they _can_ assume that subsequent calls to
/// [`next_direction`](Direction::next_direction) pass iterates produced by
/// accepted line-search steps along the previously returned directions.
///
/// The produced direction is expected to be a descent direction, i.e. to have
/// negative scalar product with the gradient. The driver verifies this and
/// substitutes the steepest descent direction (resetting the generator)
/// whenever the invariant is violated, so implementations do not need to
/// guard against it themselves.
///
/// ## Implementing a direction generator
///
/// ```rust
/// use descent::nalgebra as na;
/// use descent::{Direction, Gradient};
/// use na::{storage::{Storage, StorageMut}, Dyn, IsContiguous, Vector};
///
/// struct ScaledGradient;
///
/// impl<F: Gradient> Direction<F> for ScaledGradient {
///     const NAME: &'static str = "Scaled gradient";
///     type Error = std::convert::Infallible;
///
///     fn next_direction<Sx, Sg, Sp>(
///         &mut self,
///         f: &F,
///         x: &Vector<F::Field, Dyn, Sx>,
///         gx: &Vector<F::Field, Dyn, Sg>,
///         p: &mut Vector<F::Field, Dyn, Sp>,
///     ) -> Result<(), Self::Error>
///     where
///         Sx: Storage<F::Field, Dyn> + IsContiguous,
///         Sg: Storage<F::Field, Dyn> + IsContiguous,
///         Sp: StorageMut<F::Field, Dyn>,
///     {
///         let half = F::Field::from_subset(&0.5);
///         p.copy_from(gx);
///         p.neg_mut();
///         *p *= half;
///         Ok(())
///     }
///
///     fn reset(&mut self) {}
/// }
/// ```
pub trait Direction<F: Gradient> {
    /// Name of the direction generator.
    const NAME: &'static str;

    /// Error while computing the direction.
    type Error;

    /// Computes the search direction for the current iterate `x` with
    /// gradient `gx`, storing it in `p`.
    fn next_direction<Sx, Sg, Sp>(
        &mut self,
        f: &F,
        x: &Vector<F::Field, Dyn, Sx>,
        gx: &Vector<F::Field, Dyn, Sg>,
        p: &mut Vector<F::Field, Dyn, Sp>,
    ) -> Result<(), Self::Error>
    where
        Sx: Storage<F::Field, Dyn> + IsContiguous,
        Sg: Storage<F::Field, Dyn> + IsContiguous,
        Sp: StorageMut<F::Field, Dyn>;

    /// Drops all accumulated history so that the next call to
    /// [`next_direction`](Direction::next_direction) starts afresh.
    fn reset(&mut self);
}
