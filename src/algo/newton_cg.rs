//! Truncated Newton direction.
//!
//! The Newton system `H p = -g` is solved approximately by the conjugate
//! gradient method, using only Hessian-vector products supplied by the
//! [`SecondOrder`] oracle. The inner iteration is truncated early when the
//! residual drops below a relative tolerance or when a direction of negative
//! curvature is encountered; in the latter case the accumulated iterate (or
//! the steepest descent direction, if none has been accumulated yet) is
//! returned, which is guaranteed to be a descent direction.
//!
//! # References
//!
//! \[1\] [Numerical
//! Optimization](https://link.springer.com/book/10.1007/978-0-387-40065-5)
//!
//! \[2\] [Truncated-Newton algorithms for large-scale unconstrained
//! optimization](https://link.springer.com/article/10.1007/BF02592055)

use getset::{CopyGetters, Setters};
use log::debug;
use nalgebra::{
    convert,
    storage::{Storage, StorageMut},
    ComplexField, DimName, Dyn, IsContiguous, OVector, Vector, U1,
};
use num_traits::{One, Zero};

use crate::core::{Direction, Domain, Problem, ProblemError, SecondOrder};

/// Options for [`NewtonCg`].
#[derive(Debug, Clone, CopyGetters, Setters)]
#[getset(get_copy = "pub", set = "pub")]
pub struct NewtonCgOptions<P: Problem> {
    /// Relative residual tolerance of the inner conjugate gradient solve.
    /// Default: `1e-2`.
    cg_tol: P::Field,
    /// Maximum number of inner conjugate gradient iterations. Default: `50`.
    max_inner: usize,
}

impl<P: Problem> Default for NewtonCgOptions<P> {
    fn default() -> Self {
        Self {
            cg_tol: convert(1e-2),
            max_inner: 50,
        }
    }
}

/// Truncated Newton direction generator.
///
/// Requires the problem to implement [`SecondOrder`]. See [module](self)
/// documentation for more details.
pub struct NewtonCg<P: Problem> {
    options: NewtonCgOptions<P>,
    r: OVector<P::Field, Dyn>,
    d: OVector<P::Field, Dyn>,
    hd: OVector<P::Field, Dyn>,
}

impl<P: Problem> NewtonCg<P> {
    /// Initializes truncated Newton with default options.
    pub fn new(p: &P, dom: &Domain<P::Field>) -> Self {
        Self::with_options(p, dom, NewtonCgOptions::default())
    }

    /// Initializes truncated Newton with given options.
    pub fn with_options(_: &P, dom: &Domain<P::Field>, options: NewtonCgOptions<P>) -> Self {
        let dim = Dyn(dom.dim());

        Self {
            options,
            r: OVector::zeros_generic(dim, U1::name()),
            d: OVector::zeros_generic(dim, U1::name()),
            hd: OVector::zeros_generic(dim, U1::name()),
        }
    }
}

impl<F: SecondOrder> Direction<F> for NewtonCg<F> {
    const NAME: &'static str = "Newton-CG";

    type Error = ProblemError;

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
        Sp: StorageMut<F::Field, Dyn>,
    {
        let NewtonCgOptions { cg_tol, max_inner } = self.options;

        let zero = F::Field::zero();
        let one = F::Field::one();

        let Self { r, d, hd, .. } = self;

        // Solve H p = -g for p, starting from p = 0 with residual r = -g.
        p.fill(zero);
        r.copy_from(gx);
        r.neg_mut();
        d.copy_from(r);

        let mut rr = f.inner(r, r);
        let tol = cg_tol * rr.sqrt();

        for inner in 0..max_inner {
            f.hessvec(x, d, hd)?;
            let dhd = f.inner(d, hd);

            if dhd <= zero {
                // Negative curvature. Fall back to the steepest descent
                // direction when it shows up immediately, otherwise keep what
                // has been accumulated so far.
                debug!("negative curvature after {} inner iterations", inner);

                if inner == 0 {
                    p.copy_from(gx);
                    p.neg_mut();
                }

                return Ok(());
            }

            let alpha = rr / dhd;
            p.axpy(alpha, d, one);
            r.axpy(-alpha, hd, one);

            let rr_next = f.inner(r, r);

            if rr_next.sqrt() <= tol {
                break;
            }

            // d = r + (rr_next / rr) * d
            let beta = rr_next / rr;
            *d *= beta;
            d.axpy(one, r, one);

            rr = rr_next;
        }

        Ok(())
    }

    fn reset(&mut self) {}
}
