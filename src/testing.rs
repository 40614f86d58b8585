//! Testing functions and utilities useful for benchmarking, debugging and
//! smoke testing.
//!
//! [`Sphere`] and [`Quadratic`] are recommended for first tests;
//! [`ExtendedRosenbrock`] for convergence behavior on a genuinely nonlinear
//! cost.
//!
//! # References
//!
//! \[1\] [A Literature Survey of Benchmark Functions For Global Optimization
//! Problems](https://arxiv.org/abs/1308.4008)
//!
//! \[2\] [Numerical Methods for Unconstrained Optimization and Nonlinear
//! Equations](https://epubs.siam.org/doi/book/10.1137/1.9781611971200)

#![allow(unused)]

use std::error::Error as StdError;

use nalgebra::{
    storage::{Storage, StorageMut},
    DimName, Dyn, IsContiguous, OVector, Vector, U1,
};
use num_traits::Zero;
use thiserror::Error;

use crate::core::{Direction, Domain, Function, Gradient, Problem, ProblemError, SecondOrder};
use crate::driver::{DescentDriver, SolveError, Status, Stopping};

/// Extension of the [`Problem`] trait that provides additional information
/// that is useful for testing.
pub trait TestProblem: Problem {
    /// Standard initial iterates for the problem. Using the same initial
    /// iterates is essential for fair comparison of methods.
    fn initials(&self) -> Vec<OVector<Self::Field, Dyn>>;
}

/// Extension of the [`Gradient`] trait that provides additional information
/// that is useful for testing.
pub trait TestFunction: Gradient + TestProblem {
    /// A set of global minimizers (if known and finite).
    fn optima(&self) -> Vec<OVector<Self::Field, Dyn>> {
        Vec::new()
    }
}

/// Sphere function `f(x) = 1/2 ||x||^2` with gradient `x` and identity
/// Hessian. The simplest smooth test function; its minimizer is the origin.
#[derive(Debug, Clone, Copy)]
pub struct Sphere {
    n: usize,
}

impl Sphere {
    /// Initializes the function with given dimension.
    pub fn new(n: usize) -> Self {
        assert!(n > 0, "n must be greater than zero");
        Self { n }
    }
}

impl Problem for Sphere {
    type Field = f64;

    fn domain(&self) -> Domain<Self::Field> {
        Domain::unconstrained(self.n)
    }
}

impl Function for Sphere {
    fn apply<Sx>(&self, x: &Vector<Self::Field, Dyn, Sx>) -> Result<Self::Field, ProblemError>
    where
        Sx: Storage<Self::Field, Dyn> + IsContiguous,
    {
        Ok(0.5 * x.dot(x))
    }
}

impl Gradient for Sphere {
    fn grad<Sx, Sg>(
        &self,
        x: &Vector<Self::Field, Dyn, Sx>,
        gx: &mut Vector<Self::Field, Dyn, Sg>,
    ) -> Result<(), ProblemError>
    where
        Sx: Storage<Self::Field, Dyn> + IsContiguous,
        Sg: StorageMut<Self::Field, Dyn>,
    {
        gx.copy_from(x);
        Ok(())
    }
}

impl SecondOrder for Sphere {
    fn hessvec<Sx, Sv, Sh>(
        &self,
        _x: &Vector<Self::Field, Dyn, Sx>,
        v: &Vector<Self::Field, Dyn, Sv>,
        hv: &mut Vector<Self::Field, Dyn, Sh>,
    ) -> Result<(), ProblemError>
    where
        Sx: Storage<Self::Field, Dyn> + IsContiguous,
        Sv: Storage<Self::Field, Dyn> + IsContiguous,
        Sh: StorageMut<Self::Field, Dyn>,
    {
        hv.copy_from(v);
        Ok(())
    }
}

impl TestProblem for Sphere {
    fn initials(&self) -> Vec<OVector<Self::Field, Dyn>> {
        let dim = Dyn(self.n);

        vec![
            OVector::from_element_generic(dim, U1::name(), 10.0),
            OVector::from_iterator_generic(
                dim,
                U1::name(),
                (0..self.n).map(|i| if i % 2 == 0 { -2.5 } else { 4.0 }),
            ),
        ]
    }
}

impl TestFunction for Sphere {
    fn optima(&self) -> Vec<OVector<Self::Field, Dyn>> {
        vec![OVector::zeros_generic(Dyn(self.n), U1::name())]
    }
}

/// Diagonal quadratic `f(x) = 1/2 sum_i d_i x_i^2`.
///
/// The ratio of the largest to the smallest coefficient is the condition
/// number, making this the canonical cost for exercising algorithms on
/// ill-conditioned problems.
#[derive(Debug, Clone)]
pub struct Quadratic {
    diag: Vec<f64>,
}

impl Quadratic {
    /// Initializes the function with given positive diagonal coefficients.
    pub fn new(diag: Vec<f64>) -> Self {
        assert!(!diag.is_empty(), "empty diagonal");
        assert!(diag.iter().all(|d| *d > 0.0), "non-positive coefficient");
        Self { diag }
    }
}

impl Problem for Quadratic {
    type Field = f64;

    fn domain(&self) -> Domain<Self::Field> {
        Domain::unconstrained(self.diag.len())
    }
}

impl Function for Quadratic {
    fn apply<Sx>(&self, x: &Vector<Self::Field, Dyn, Sx>) -> Result<Self::Field, ProblemError>
    where
        Sx: Storage<Self::Field, Dyn> + IsContiguous,
    {
        Ok(0.5
            * self
                .diag
                .iter()
                .zip(x.iter())
                .map(|(d, xi)| d * xi * xi)
                .sum::<f64>())
    }
}

impl Gradient for Quadratic {
    fn grad<Sx, Sg>(
        &self,
        x: &Vector<Self::Field, Dyn, Sx>,
        gx: &mut Vector<Self::Field, Dyn, Sg>,
    ) -> Result<(), ProblemError>
    where
        Sx: Storage<Self::Field, Dyn> + IsContiguous,
        Sg: StorageMut<Self::Field, Dyn>,
    {
        gx.iter_mut()
            .zip(self.diag.iter().zip(x.iter()))
            .for_each(|(gi, (d, xi))| *gi = d * xi);
        Ok(())
    }
}

impl SecondOrder for Quadratic {
    fn hessvec<Sx, Sv, Sh>(
        &self,
        _x: &Vector<Self::Field, Dyn, Sx>,
        v: &Vector<Self::Field, Dyn, Sv>,
        hv: &mut Vector<Self::Field, Dyn, Sh>,
    ) -> Result<(), ProblemError>
    where
        Sx: Storage<Self::Field, Dyn> + IsContiguous,
        Sv: Storage<Self::Field, Dyn> + IsContiguous,
        Sh: StorageMut<Self::Field, Dyn>,
    {
        hv.iter_mut()
            .zip(self.diag.iter().zip(v.iter()))
            .for_each(|(hi, (d, vi))| *hi = d * vi);
        Ok(())
    }
}

impl TestProblem for Quadratic {
    fn initials(&self) -> Vec<OVector<Self::Field, Dyn>> {
        let dim = Dyn(self.diag.len());

        vec![
            OVector::from_element_generic(dim, U1::name(), 1.0),
            OVector::from_iterator_generic(
                dim,
                U1::name(),
                (0..self.diag.len()).map(|i| if i % 2 == 0 { -3.0 } else { 2.0 }),
            ),
        ]
    }
}

impl TestFunction for Quadratic {
    fn optima(&self) -> Vec<OVector<Self::Field, Dyn>> {
        vec![OVector::zeros_generic(Dyn(self.diag.len()), U1::name())]
    }
}

/// [Extended Rosenbrock
/// function](https://en.wikipedia.org/wiki/Rosenbrock_function) \[1,2\] (also
/// known as Rosenbrock's valley or banana function).
///
/// The global minimum is inside a long, narrow, parabolic shaped flat valley.
/// The challenge is to follow the valley.
#[derive(Debug, Clone, Copy)]
pub struct ExtendedRosenbrock {
    n: usize,
}

impl ExtendedRosenbrock {
    /// Initializes the function with given dimension.
    ///
    /// The dimension **must** be a multiple of 2.
    pub fn new(n: usize) -> Self {
        assert!(n > 0, "n must be greater than zero");
        assert!(n % 2 == 0, "n must be a multiple of 2");
        Self { n }
    }
}

impl Problem for ExtendedRosenbrock {
    type Field = f64;

    fn domain(&self) -> Domain<Self::Field> {
        Domain::unconstrained(self.n)
    }
}

impl Function for ExtendedRosenbrock {
    fn apply<Sx>(&self, x: &Vector<Self::Field, Dyn, Sx>) -> Result<Self::Field, ProblemError>
    where
        Sx: Storage<Self::Field, Dyn> + IsContiguous,
    {
        let mut fx = 0.0;

        for i in 0..self.n / 2 {
            let x1 = x[2 * i];
            let x2 = x[2 * i + 1];

            fx += 100.0 * (x2 - x1 * x1).powi(2) + (1.0 - x1).powi(2);
        }

        Ok(fx)
    }
}

impl Gradient for ExtendedRosenbrock {
    fn grad<Sx, Sg>(
        &self,
        x: &Vector<Self::Field, Dyn, Sx>,
        gx: &mut Vector<Self::Field, Dyn, Sg>,
    ) -> Result<(), ProblemError>
    where
        Sx: Storage<Self::Field, Dyn> + IsContiguous,
        Sg: StorageMut<Self::Field, Dyn>,
    {
        for i in 0..self.n / 2 {
            let x1 = x[2 * i];
            let x2 = x[2 * i + 1];

            gx[2 * i] = -400.0 * x1 * (x2 - x1 * x1) - 2.0 * (1.0 - x1);
            gx[2 * i + 1] = 200.0 * (x2 - x1 * x1);
        }

        Ok(())
    }
}

impl TestProblem for ExtendedRosenbrock {
    fn initials(&self) -> Vec<OVector<Self::Field, Dyn>> {
        let dim = Dyn(self.n);

        let init1 = (0..self.n).map(|i| if i % 2 == 0 { -1.2 } else { 1.0 });
        let init2 = (0..self.n).map(|i| if i % 2 == 0 { 6.39 } else { -0.221 });

        vec![
            OVector::from_iterator_generic(dim, U1::name(), init1),
            OVector::from_iterator_generic(dim, U1::name(), init2),
        ]
    }
}

impl TestFunction for ExtendedRosenbrock {
    fn optima(&self) -> Vec<OVector<Self::Field, Dyn>> {
        vec![OVector::from_element_generic(Dyn(self.n), U1::name(), 1.0)]
    }
}

/// Error returned from the [`minimize`] testing helper.
#[derive(Debug, Error)]
pub enum TestingError<E: StdError + 'static> {
    /// Error of the driver.
    #[error("{0}")]
    Inner(#[from] E),
    /// The driver did not converge within the iteration budget.
    #[error("driver did not converge")]
    Termination,
}

/// A simple helper that drives the given direction generator until the
/// gradient norm drops below `tol`; to be used in tests.
pub fn minimize<F: Gradient, D: Direction<F>>(
    f: &F,
    dom: &Domain<F::Field>,
    algo: D,
    x: OVector<F::Field, Dyn>,
    max_iters: usize,
    tol: F::Field,
) -> Result<OVector<F::Field, Dyn>, TestingError<SolveError<D::Error>>>
where
    SolveError<D::Error>: StdError,
{
    let mut stopping = Stopping::tolerances(F::Field::zero(), tol);
    stopping.set_max_iters(max_iters);

    let mut driver = DescentDriver::builder(f)
        .with_initial(x.iter().copied().collect())
        .with_algo(move |_, _| algo)
        .with_stopping(stopping)
        .build();

    let report = driver.run().map_err(TestingError::Inner)?;

    match report.status {
        Status::Converged => {
            let dim = Dyn(dom.dim());
            Ok(OVector::from_iterator_generic(
                dim,
                U1::name(),
                driver.x().iter().copied(),
            ))
        }
        _ => Err(TestingError::Termination),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_abs_diff_eq;

    #[test]
    fn rosenbrock_minimum() {
        let f = ExtendedRosenbrock::new(4);
        let x = f.optima().pop().unwrap();

        assert_abs_diff_eq!(f.apply(&x).unwrap(), 0.0);

        let mut gx = x.clone_owned();
        f.grad(&x, &mut gx).unwrap();
        assert_abs_diff_eq!(f.norm(&gx), 0.0);
    }
}
