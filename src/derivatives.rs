//! Finite-difference approximation of gradients.
//!
//! The algorithms in this crate expect the gradient to be supplied by the
//! problem (in the motivating applications it comes from an adjoint
//! computation). For problems where no such oracle is available, or for
//! verifying that a hand-derived gradient is correct, this module provides a
//! forward-difference approximation.

use nalgebra::{
    storage::{Storage, StorageMut},
    ComplexField, Dyn, IsContiguous, RealField, Vector,
};
use num_traits::{One, Zero};

use crate::core::{Domain, Function, Gradient, Problem, ProblemError, RealField as _};

/// Adapter that equips any [`Function`] with a forward-difference
/// [`Gradient`].
///
/// Each gradient evaluation costs `dim` extra cost evaluations, so this is
/// only suitable for cheap functions or moderate dimensions.
///
/// ```rust
/// use descent::derivatives::WithNumericalGradient;
/// use descent::{DescentDriver, Status};
/// # use descent::nalgebra as na;
/// # use descent::{Domain, Function, Problem, ProblemError};
/// # use na::{Dyn, IsContiguous};
/// #
/// # struct MyCost;
/// #
/// # impl Problem for MyCost {
/// #     type Field = f64;
/// #
/// #     fn domain(&self) -> Domain<Self::Field> {
/// #         Domain::unconstrained(2)
/// #     }
/// # }
/// #
/// # impl Function for MyCost {
/// #     fn apply<Sx>(&self, x: &na::Vector<Self::Field, Dyn, Sx>) -> Result<Self::Field, ProblemError>
/// #     where
/// #         Sx: na::storage::Storage<Self::Field, Dyn> + IsContiguous,
/// #     {
/// #         Ok(0.5 * x.dot(x))
/// #     }
/// # }
///
/// let f = WithNumericalGradient(MyCost);
/// let mut driver = DescentDriver::builder(&f)
///     .with_initial(vec![1.0, 1.0])
///     .build();
///
/// let report = driver.run().unwrap();
/// assert_eq!(report.status, Status::Converged);
/// ```
pub struct WithNumericalGradient<F>(pub F);

impl<F: Problem> Problem for WithNumericalGradient<F> {
    type Field = F::Field;

    fn domain(&self) -> Domain<Self::Field> {
        self.0.domain()
    }
}

impl<F: Function> Function for WithNumericalGradient<F> {
    fn apply<Sx>(&self, x: &Vector<Self::Field, Dyn, Sx>) -> Result<Self::Field, ProblemError>
    where
        Sx: Storage<Self::Field, Dyn> + IsContiguous,
    {
        self.0.apply(x)
    }
}

impl<F: Function> Gradient for WithNumericalGradient<F> {
    fn grad<Sx, Sg>(
        &self,
        x: &Vector<Self::Field, Dyn, Sx>,
        gx: &mut Vector<Self::Field, Dyn, Sg>,
    ) -> Result<(), ProblemError>
    where
        Sx: Storage<Self::Field, Dyn> + IsContiguous,
        Sg: StorageMut<Self::Field, Dyn>,
    {
        let eps = F::Field::EPSILON_SQRT;
        let fx = self.0.apply(x)?;

        let mut xt = x.clone_owned();

        for i in 0..xt.nrows() {
            let xi = xt[i];

            // Scale the step with the magnitude of the variable to balance
            // truncation against cancellation. When the variable is near
            // zero, use the bare epsilon.
            let step = eps * xi.abs().max(F::Field::one()) * F::Field::one().copysign(xi);
            let step = if step == F::Field::zero() { eps } else { step };

            xt[i] = xi + step;
            let fxi = self.0.apply(&xt)?;
            xt[i] = xi;

            gx[i] = (fxi - fx) / step;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ExtendedRosenbrock, Sphere, TestProblem};

    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use nalgebra::{dvector, DVector};

    fn numerical_and_analytic<F>(f: F, x: &DVector<f64>) -> (DVector<f64>, DVector<f64>)
    where
        F: Gradient<Field = f64> + Copy,
    {
        let fd = WithNumericalGradient(f);

        let mut expected = x.clone_owned();
        let mut approximate = x.clone_owned();

        f.grad(x, &mut expected).unwrap();
        fd.grad(x, &mut approximate).unwrap();

        (expected, approximate)
    }

    #[test]
    fn sphere_gradient() {
        let f = Sphere::new(3);
        let (expected, approximate) = numerical_and_analytic(f, &dvector![3.0, -2.0, 0.0]);

        assert_abs_diff_eq!(expected, approximate, epsilon = 1e-6);
    }

    #[test]
    fn rosenbrock_gradient() {
        let f = ExtendedRosenbrock::new(4);

        // The gradient components reach ~1e5 in magnitude here, so the
        // truncation error of the forward difference is only small relative
        // to them.
        for x in f.initials() {
            let (expected, approximate) = numerical_and_analytic(f, &x);
            assert_relative_eq!(expected, approximate, max_relative = 1e-5);
        }
    }
}
