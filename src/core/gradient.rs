use nalgebra::{
    storage::{Storage, StorageMut},
    ComplexField, Dyn, IsContiguous, Vector,
};

use super::base::ProblemError;
use super::function::Function;

/// Definition of a cost function with a first-order oracle.
///
/// Implementations provide the gradient of the cost in a given point. In the
/// motivating applications the gradient is the Riesz representative of the
/// cost derivative, computed from state and adjoint solutions; consequently
/// the scalar product of the underlying space does not need to be Euclidean.
/// Implementations may override [`inner`](Gradient::inner) to supply the
/// problem-specific scalar product; all algorithms in this crate consistently
/// use it for directional derivatives, curvature quantities and norms.
pub trait Gradient: Function {
    /// Calculates the gradient of the cost in given point.
    fn grad<Sx, Sg>(
        &self,
        x: &Vector<Self::Field, Dyn, Sx>,
        gx: &mut Vector<Self::Field, Dyn, Sg>,
    ) -> Result<(), ProblemError>
    where
        Sx: Storage<Self::Field, Dyn> + IsContiguous,
        Sg: StorageMut<Self::Field, Dyn>;

    /// Scalar product of the space in which gradients live.
    ///
    /// Defaults to the Euclidean dot product. Override for problems whose
    /// gradient is defined with respect to a different (Riesz) scalar product.
    fn inner<Sa, Sb>(
        &self,
        a: &Vector<Self::Field, Dyn, Sa>,
        b: &Vector<Self::Field, Dyn, Sb>,
    ) -> Self::Field
    where
        Sa: Storage<Self::Field, Dyn>,
        Sb: Storage<Self::Field, Dyn>,
    {
        a.dot(b)
    }

    /// Norm induced by [`inner`](Gradient::inner).
    fn norm<Sa>(&self, a: &Vector<Self::Field, Dyn, Sa>) -> Self::Field
    where
        Sa: Storage<Self::Field, Dyn>,
    {
        self.inner(a, a).sqrt()
    }
}

/// Definition of a cost function with a second-order oracle.
///
/// Used by the truncated Newton algorithm, which only ever needs products of
/// the Hessian with a vector, never the Hessian itself.
pub trait SecondOrder: Gradient {
    /// Calculates the product of the Hessian of the cost in point `x` with
    /// vector `v`.
    fn hessvec<Sx, Sv, Sh>(
        &self,
        x: &Vector<Self::Field, Dyn, Sx>,
        v: &Vector<Self::Field, Dyn, Sv>,
        hv: &mut Vector<Self::Field, Dyn, Sh>,
    ) -> Result<(), ProblemError>
    where
        Sx: Storage<Self::Field, Dyn> + IsContiguous,
        Sv: Storage<Self::Field, Dyn> + IsContiguous,
        Sh: StorageMut<Self::Field, Dyn>;
}
