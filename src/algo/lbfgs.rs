//! Limited-memory BFGS direction.
//!
//! L-BFGS approximates the inverse Hessian action from a bounded history of
//! curvature pairs `(s, y)`, where `s` is the difference of subsequent
//! iterates and `y` the difference of subsequent gradients. The direction is
//! computed by the classical two-loop recursion, optionally scaled by an
//! initial Hessian approximation derived from the most recent pair.
//!
//! The history is a bounded buffer: the oldest pair is evicted when the
//! configured memory depth is exceeded. When a pair with non-positive
//! curvature `<y, s>` is encountered, the whole history is purged, since the
//! inverse Hessian approximation is no longer positive definite.
//!
//! # References
//!
//! \[1\] [Numerical
//! Optimization](https://link.springer.com/book/10.1007/978-0-387-40065-5)
//!
//! \[2\] [Updating Quasi-Newton Matrices With Limited
//! Storage](https://www.jstor.org/stable/2006193)

use std::collections::VecDeque;
use std::convert::Infallible;

use getset::{CopyGetters, Setters};
use log::debug;
use nalgebra::{
    storage::{Storage, StorageMut},
    DimName, Dyn, IsContiguous, OVector, Scalar, Vector, U1,
};
use num_traits::{One, Zero};

use crate::core::{Direction, Domain, Gradient, Problem};

/// Options for [`Lbfgs`].
#[derive(Debug, Clone, CopyGetters, Setters)]
#[getset(get_copy = "pub", set = "pub")]
pub struct LbfgsOptions {
    /// Number of curvature pairs kept. Default: `5`.
    memory: usize,
    /// Scale the two-loop seed by `<s, y> / <y, y>` of the most recent pair.
    /// Default: `true`.
    scale_initial: bool,
}

impl Default for LbfgsOptions {
    fn default() -> Self {
        Self {
            memory: 5,
            scale_initial: true,
        }
    }
}

struct CurvaturePair<T: Scalar> {
    s: OVector<T, Dyn>,
    y: OVector<T, Dyn>,
    rho: T,
}

/// L-BFGS direction generator.
///
/// See [module](self) documentation for more details.
pub struct Lbfgs<P: Problem> {
    options: LbfgsOptions,
    // Newest pair first.
    history: VecDeque<CurvaturePair<P::Field>>,
    x_prev: OVector<P::Field, Dyn>,
    g_prev: OVector<P::Field, Dyn>,
    has_prev: bool,
    q: OVector<P::Field, Dyn>,
    alphas: Vec<P::Field>,
}

impl<P: Problem> Lbfgs<P> {
    /// Initializes L-BFGS with default options.
    pub fn new(p: &P, dom: &Domain<P::Field>) -> Self {
        Self::with_options(p, dom, LbfgsOptions::default())
    }

    /// Initializes L-BFGS with given options.
    pub fn with_options(_: &P, dom: &Domain<P::Field>, options: LbfgsOptions) -> Self {
        let dim = Dyn(dom.dim());

        Self {
            history: VecDeque::with_capacity(options.memory),
            options,
            x_prev: OVector::zeros_generic(dim, U1::name()),
            g_prev: OVector::zeros_generic(dim, U1::name()),
            has_prev: false,
            q: OVector::zeros_generic(dim, U1::name()),
            alphas: Vec::new(),
        }
    }

    fn update_history<F>(&mut self, f: &F, s: OVector<P::Field, Dyn>, y: OVector<P::Field, Dyn>)
    where
        F: Gradient<Field = P::Field>,
    {
        let sy = f.inner(&y, &s);

        if sy <= P::Field::zero() {
            // The approximation would lose positive definiteness.
            debug!("non-positive curvature, purging history");
            self.history.clear();
            return;
        }

        let rho = P::Field::one() / sy;
        self.history.push_front(CurvaturePair { s, y, rho });

        if self.history.len() > self.options.memory {
            self.history.pop_back();
        }
    }
}

impl<F: Gradient> Direction<F> for Lbfgs<F> {
    const NAME: &'static str = "L-BFGS";

    type Error = Infallible;

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
        if self.options.memory > 0 && self.has_prev {
            let s = x - &self.x_prev;
            let y = gx - &self.g_prev;
            self.update_history(f, s, y);
        }

        if self.history.is_empty() {
            p.copy_from(gx);
            p.neg_mut();
        } else {
            // Two-loop recursion over the history, newest pair first.
            let q = &mut self.q;
            q.copy_from(gx);

            self.alphas.clear();
            for pair in self.history.iter() {
                let alpha = pair.rho * f.inner(&pair.s, q);
                q.axpy(-alpha, &pair.y, F::Field::one());
                self.alphas.push(alpha);
            }

            if self.options.scale_initial {
                let newest = &self.history[0];
                let factor = f.inner(&newest.y, &newest.s) / f.inner(&newest.y, &newest.y);
                *q *= factor;
            }

            for (pair, alpha) in self.history.iter().rev().zip(self.alphas.iter().rev()) {
                let beta = pair.rho * f.inner(&pair.y, q);
                q.axpy(*alpha - beta, &pair.s, F::Field::one());
            }

            p.copy_from(q);
            p.neg_mut();
        }

        self.x_prev.copy_from(x);
        self.g_prev.copy_from(gx);
        self.has_prev = true;

        Ok(())
    }

    fn reset(&mut self) {
        self.history.clear();
        self.has_prev = false;
    }
}
