//! Backtracking line search with the Armijo sufficient-decrease condition.
//!
//! Given an iterate, a descent direction and the directional derivative of
//! the cost along it, the line search finds a strictly positive step size
//! such that
//!
//! ```text
//! f(x + step * p) <= f(x) + c1 * step * <g, p>
//! ```
//!
//! holds, shrinking the trial step by a constant factor until it does. The
//! scalar product is the one supplied by the [`Gradient`] implementation.
//!
//! The accepted step size is remembered and, scaled by a growth factor, used
//! as the first trial of the next search, so that the step size adapts to the
//! problem over the course of the optimization.
//!
//! # References
//!
//! \[1\] [Numerical
//! Optimization](https://link.springer.com/book/10.1007/978-0-387-40065-5)

use getset::{CopyGetters, Setters};
use log::trace;
use nalgebra::{
    convert,
    storage::{Storage, StorageMut},
    DimName, Dyn, IsContiguous, OVector, Vector, U1,
};
use num_traits::{One, Zero};
use thiserror::Error;

use crate::core::{Domain, Gradient, Problem, ProblemError};

/// Options for [`Armijo`] line search.
#[derive(Debug, Clone, CopyGetters, Setters)]
#[getset(get_copy = "pub", set = "pub")]
pub struct ArmijoOptions<P: Problem> {
    /// Step size tried first by the very first search. Default: `1`.
    initial_step: P::Field,
    /// Sufficient-decrease coefficient `c1`. Default: `1e-4`.
    c1: P::Field,
    /// Factor by which the trial step is multiplied while backtracking. Must
    /// be in (0, 1). Default: `0.5`.
    shrink: P::Field,
    /// Factor by which the accepted step is multiplied to obtain the first
    /// trial of the next search. Default: `2`.
    grow: P::Field,
    /// Smallest admissible step size. When backtracking falls below this
    /// threshold, the search fails. Default: `1e-12`.
    step_min: P::Field,
}

impl<P: Problem> Default for ArmijoOptions<P> {
    fn default() -> Self {
        Self {
            initial_step: convert(1.0),
            c1: convert(1e-4),
            shrink: convert(0.5),
            grow: convert(2.0),
            step_min: convert(1e-12),
        }
    }
}

/// Error returned from [`Armijo`] line search.
#[derive(Debug, Error)]
pub enum LineSearchError {
    /// The given direction is not a descent direction.
    #[error("not a descent direction")]
    NotDescent,
    /// The step size shrank below the minimum threshold without satisfying
    /// the sufficient-decrease condition.
    #[error("no admissible step size found")]
    StepTooSmall,
    /// Error that occurred when evaluating the cost.
    #[error("{0}")]
    Problem(#[from] ProblemError),
}

/// Backtracking Armijo line search.
///
/// See [module](self) documentation for more details.
pub struct Armijo<P: Problem> {
    options: ArmijoOptions<P>,
    step: P::Field,
    x0: OVector<P::Field, Dyn>,
}

impl<P: Problem> Armijo<P> {
    /// Initializes the line search with default options.
    pub fn new(p: &P, dom: &Domain<P::Field>) -> Self {
        Self::with_options(p, dom, ArmijoOptions::default())
    }

    /// Initializes the line search with given options.
    pub fn with_options(_: &P, dom: &Domain<P::Field>, options: ArmijoOptions<P>) -> Self {
        let dim = Dyn(dom.dim());

        Self {
            step: options.initial_step,
            options,
            x0: OVector::zeros_generic(dim, U1::name()),
        }
    }

    /// Resets the internal state of the line search.
    pub fn reset(&mut self) {
        self.step = self.options.initial_step;
    }

    /// The step size that the next search will try first.
    pub fn step(&self) -> P::Field {
        self.step
    }
}

impl<F: Gradient> Armijo<F> {
    /// Performs the backtracking search from `x` along direction `p`.
    ///
    /// `fx` is the cost in `x` and `slope` is the directional derivative
    /// `<g, p>` computed with the problem's scalar product; the search fails
    /// with [`LineSearchError::NotDescent`] unless `slope < 0`.
    ///
    /// On success, `x` holds the accepted point (projected into the domain)
    /// and the accepted step size together with the new cost are returned.
    /// On failure, `x` is left unchanged.
    pub fn search<Sx, Sp>(
        &mut self,
        f: &F,
        dom: &Domain<F::Field>,
        x: &mut Vector<F::Field, Dyn, Sx>,
        p: &Vector<F::Field, Dyn, Sp>,
        fx: F::Field,
        slope: F::Field,
    ) -> Result<(F::Field, F::Field), LineSearchError>
    where
        Sx: StorageMut<F::Field, Dyn> + IsContiguous,
        Sp: Storage<F::Field, Dyn> + IsContiguous,
    {
        let ArmijoOptions {
            c1,
            shrink,
            grow,
            step_min,
            ..
        } = self.options;

        if slope >= F::Field::zero() {
            return Err(LineSearchError::NotDescent);
        }

        self.x0.copy_from(x);
        let mut step = self.step;

        loop {
            if step < step_min {
                // Give the iterate back untouched.
                x.copy_from(&self.x0);
                return Err(LineSearchError::StepTooSmall);
            }

            x.copy_from(&self.x0);
            x.axpy(step, p, F::Field::one());
            dom.project(x);

            match f.apply(x) {
                Ok(trial) if trial <= fx + c1 * step * slope => {
                    trace!("line search accepted step {:?}", step);

                    // The accepted step, grown, seeds the next search.
                    self.step = step * grow;
                    return Ok((step, trial));
                }
                Ok(_) => step *= shrink,
                Err(error) => {
                    x.copy_from(&self.x0);
                    return Err(error.into());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Function;
    use crate::testing::Sphere;

    use nalgebra::dvector;

    #[test]
    fn accepts_sufficient_decrease() {
        let f = Sphere::new(2);
        let dom = f.domain();
        let mut ls = Armijo::new(&f, &dom);

        let mut x = dvector![1.0, 1.0];
        let p = dvector![-1.0, -1.0];
        let fx = f.apply(&x).unwrap();
        let slope = f.inner(&dvector![1.0, 1.0], &p);

        let (step, trial) = ls.search(&f, &dom, &mut x, &p, fx, slope).unwrap();

        assert!(step > 0.0);
        assert!(trial <= fx + 1e-4 * step * slope);
        assert_eq!(x, dvector![1.0 - step, 1.0 - step]);
    }

    #[test]
    fn rejects_zero_slope() {
        let f = Sphere::new(2);
        let dom = f.domain();
        let mut ls = Armijo::new(&f, &dom);

        let mut x = dvector![1.0, 1.0];
        let p = dvector![1.0, -1.0];
        let fx = f.apply(&x).unwrap();

        assert!(matches!(
            ls.search(&f, &dom, &mut x, &p, fx, 0.0),
            Err(LineSearchError::NotDescent)
        ));
        assert_eq!(x, dvector![1.0, 1.0]);
    }

    #[test]
    fn fails_on_ascent_with_lying_slope() {
        let f = Sphere::new(1);
        let dom = f.domain();
        let mut ls = Armijo::new(&f, &dom);

        // The direction ascends, but the claimed slope is negative, so the
        // Armijo condition can never hold and backtracking must give up.
        let mut x = dvector![1.0];
        let p = dvector![1.0];
        let fx = f.apply(&x).unwrap();

        assert!(matches!(
            ls.search(&f, &dom, &mut x, &p, fx, -1.0),
            Err(LineSearchError::StepTooSmall)
        ));
        assert_eq!(x, dvector![1.0]);
    }

    #[test]
    fn step_grows_after_success() {
        let f = Sphere::new(1);
        let dom = f.domain();
        let mut ls = Armijo::new(&f, &dom);

        let mut x = dvector![1.0];
        let p = dvector![-1.0];
        let fx = f.apply(&x).unwrap();

        let (step, _) = ls.search(&f, &dom, &mut x, &p, fx, -1.0).unwrap();
        assert_eq!(ls.step(), 2.0 * step);
    }
}
