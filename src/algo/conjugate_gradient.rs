//! Nonlinear conjugate gradient directions.
//!
//! The direction is a combination of the negative gradient and the previous
//! direction, `p = -g + beta * p_prev`, where `beta` is computed by one of
//! several classical formulas. The method periodically restarts to plain
//! steepest descent, either after a fixed number of iterations or when
//! subsequent gradients lose orthogonality, which keeps the directions
//! meaningful on non-quadratic costs.
//!
//! # References
//!
//! \[1\] [Numerical
//! Optimization](https://link.springer.com/book/10.1007/978-0-387-40065-5)
//!
//! \[2\] [A survey of nonlinear conjugate gradient
//! methods](https://www.math.lsu.edu/~hozhang/papers/cgsurvey.pdf)

use std::convert::Infallible;

use getset::{CopyGetters, Setters};
use log::debug;
use nalgebra::{
    convert,
    storage::{Storage, StorageMut},
    ComplexField, DimName, Dyn, IsContiguous, OVector, Vector, U1,
};
use num_traits::{One, Zero};

use crate::core::{Direction, Domain, Gradient, Problem};

/// Formula used for the conjugacy coefficient `beta`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CgFormula {
    /// Fletcher-Reeves: `<g, g> / <g_prev, g_prev>`.
    FletcherReeves,
    /// Polak-Ribiere: `<g, g - g_prev> / <g_prev, g_prev>`.
    PolakRibiere,
    /// Hestenes-Stiefel: `<g, g - g_prev> / <p_prev, g - g_prev>`.
    HestenesStiefel,
    /// Dai-Yuan: `<g, g> / <p_prev, g - g_prev>`.
    DaiYuan,
}

/// Options for [`ConjugateGradient`].
#[derive(Debug, Clone, CopyGetters, Setters)]
#[getset(get_copy = "pub", set = "pub")]
pub struct CgOptions<P: Problem> {
    /// Formula for the conjugacy coefficient. Default:
    /// [`CgFormula::PolakRibiere`].
    formula: CgFormula,
    /// Restart to steepest descent every this many iterations. Zero disables
    /// periodic restarts. Default: `0`.
    restart_period: usize,
    /// Restart to steepest descent when
    /// `|<g, g_prev>| >= threshold * <g, g>`, i.e. when subsequent gradients
    /// are far from orthogonal. With inexact (backtracking) line searches the
    /// test can fire on almost every iteration, degrading the method to
    /// steepest descent, so it is opt-in. Zero disables the test. Default:
    /// `0` (disabled).
    restart_threshold: P::Field,
}

impl<P: Problem> Default for CgOptions<P> {
    fn default() -> Self {
        Self {
            formula: CgFormula::PolakRibiere,
            restart_period: 0,
            restart_threshold: convert(0.0),
        }
    }
}

/// Nonlinear conjugate gradient direction generator.
///
/// See [module](self) documentation for more details.
pub struct ConjugateGradient<P: Problem> {
    options: CgOptions<P>,
    g_prev: OVector<P::Field, Dyn>,
    p_prev: OVector<P::Field, Dyn>,
    has_history: bool,
    since_restart: usize,
}

impl<P: Problem> ConjugateGradient<P> {
    /// Initializes conjugate gradients with default options.
    pub fn new(p: &P, dom: &Domain<P::Field>) -> Self {
        Self::with_options(p, dom, CgOptions::default())
    }

    /// Initializes conjugate gradients with given options.
    pub fn with_options(_: &P, dom: &Domain<P::Field>, options: CgOptions<P>) -> Self {
        let dim = Dyn(dom.dim());

        Self {
            options,
            g_prev: OVector::zeros_generic(dim, U1::name()),
            p_prev: OVector::zeros_generic(dim, U1::name()),
            has_history: false,
            since_restart: 0,
        }
    }
}

impl<F: Gradient> Direction<F> for ConjugateGradient<F> {
    const NAME: &'static str = "Conjugate gradients";

    type Error = Infallible;

    fn next_direction<Sx, Sg, Sp>(
        &mut self,
        f: &F,
        _x: &Vector<F::Field, Dyn, Sx>,
        gx: &Vector<F::Field, Dyn, Sg>,
        p: &mut Vector<F::Field, Dyn, Sp>,
    ) -> Result<(), Self::Error>
    where
        Sx: Storage<F::Field, Dyn> + IsContiguous,
        Sg: Storage<F::Field, Dyn> + IsContiguous,
        Sp: StorageMut<F::Field, Dyn>,
    {
        let CgOptions {
            formula,
            restart_period,
            restart_threshold,
        } = self.options;

        let zero = F::Field::zero();

        let beta = if !self.has_history {
            zero
        } else if restart_period > 0 && self.since_restart >= restart_period {
            debug!("periodic restart after {} iterations", self.since_restart);
            zero
        } else {
            let gg = f.inner(gx, gx);

            if restart_threshold > zero && f.inner(gx, &self.g_prev).abs() >= restart_threshold * gg
            {
                debug!("gradients lost orthogonality, restarting");
                zero
            } else {
                // y = g - g_prev is needed by all but Fletcher-Reeves.
                let y = gx - &self.g_prev;

                let (num, denom) = match formula {
                    CgFormula::FletcherReeves => (gg, f.inner(&self.g_prev, &self.g_prev)),
                    CgFormula::PolakRibiere => (f.inner(gx, &y), f.inner(&self.g_prev, &self.g_prev)),
                    CgFormula::HestenesStiefel => (f.inner(gx, &y), f.inner(&self.p_prev, &y)),
                    CgFormula::DaiYuan => (gg, f.inner(&self.p_prev, &y)),
                };

                if denom != zero {
                    num / denom
                } else {
                    zero
                }
            }
        };

        if beta == zero {
            self.since_restart = 0;
            p.copy_from(gx);
            p.neg_mut();
        } else {
            // p = beta * p_prev - g
            p.copy_from(&self.p_prev);
            *p *= beta;
            p.axpy(-F::Field::one(), gx, F::Field::one());
        }

        self.g_prev.copy_from(gx);
        self.p_prev.copy_from(p);
        self.has_history = true;
        self.since_restart += 1;

        Ok(())
    }

    fn reset(&mut self) {
        self.has_history = false;
        self.since_restart = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{minimize, ExtendedRosenbrock, Quadratic, Sphere, TestProblem};

    fn options<P: Problem>(formula: CgFormula) -> CgOptions<P> {
        let mut options = CgOptions::default();
        options.set_formula(formula);
        options
    }

    #[test]
    fn sphere_all_formulas() {
        let f = Sphere::new(4);
        let dom = f.domain();

        for formula in [
            CgFormula::FletcherReeves,
            CgFormula::PolakRibiere,
            CgFormula::HestenesStiefel,
            CgFormula::DaiYuan,
        ] {
            for x in f.initials() {
                let cg = ConjugateGradient::with_options(&f, &dom, options(formula));
                let x = minimize(&f, &dom, cg, x, 100, 1e-6).unwrap();
                assert!(f.norm(&x) <= 1e-6);
            }
        }
    }

    #[test]
    fn ill_conditioned_quadratic() {
        let f = Quadratic::new(vec![1.0, 25.0, 100.0]);
        let dom = f.domain();

        for x in f.initials() {
            let cg = ConjugateGradient::new(&f, &dom);
            minimize(&f, &dom, cg, x, 200, 1e-6).unwrap();
        }
    }

    #[test]
    fn relative_restart_is_opt_in() {
        let f = Quadratic::new(vec![1.0, 25.0, 100.0]);
        let dom = f.domain();
        let x0 = f.initials().swap_remove(0);

        assert_eq!(CgOptions::<Quadratic>::default().restart_threshold(), 0.0);

        // With the orthogonality test enabled, the restarts push the method
        // toward steepest descent. It must still converge, just slower, so it
        // gets a larger budget than `ill_conditioned_quadratic`.
        let mut options = CgOptions::default();
        options.set_restart_threshold(0.25);

        let cg = ConjugateGradient::with_options(&f, &dom, options);
        minimize(&f, &dom, cg, x0, 600, 1e-6).unwrap();
    }

    #[test]
    fn rosenbrock() {
        let f = ExtendedRosenbrock::new(2);
        let dom = f.domain();

        for x in f.initials() {
            let cg = ConjugateGradient::new(&f, &dom);
            minimize(&f, &dom, cg, x, 1000, 1e-5).unwrap();
        }
    }
}
