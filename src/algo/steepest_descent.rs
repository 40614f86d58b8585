//! Steepest descent direction.
//!
//! The direction is simply the negative gradient. No history is kept, so the
//! generator never produces a non-descent direction and also serves as the
//! fallback that the driver substitutes when a more sophisticated generator
//! fails to produce descent.

use std::convert::Infallible;
use std::marker::PhantomData;

use nalgebra::{
    storage::{Storage, StorageMut},
    Dyn, IsContiguous, Vector,
};

use crate::core::{Direction, Domain, Gradient, Problem};

/// Steepest descent direction generator.
///
/// See [module](self) documentation for more details.
pub struct SteepestDescent<P: Problem> {
    ty: PhantomData<P>,
}

impl<P: Problem> SteepestDescent<P> {
    /// Initializes steepest descent.
    pub fn new(_: &P, _: &Domain<P::Field>) -> Self {
        Self { ty: PhantomData }
    }
}

impl<F: Gradient> Direction<F> for SteepestDescent<F> {
    const NAME: &'static str = "Steepest descent";

    type Error = Infallible;

    fn next_direction<Sx, Sg, Sp>(
        &mut self,
        _f: &F,
        _x: &Vector<F::Field, Dyn, Sx>,
        gx: &Vector<F::Field, Dyn, Sg>,
        p: &mut Vector<F::Field, Dyn, Sp>,
    ) -> Result<(), Self::Error>
    where
        Sx: Storage<F::Field, Dyn> + IsContiguous,
        Sg: Storage<F::Field, Dyn> + IsContiguous,
        Sp: StorageMut<F::Field, Dyn>,
    {
        p.copy_from(gx);
        p.neg_mut();
        Ok(())
    }

    fn reset(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{minimize, Sphere, TestProblem};

    #[test]
    fn sphere() {
        let f = Sphere::new(2);
        let dom = f.domain();

        for x in f.initials() {
            let x = minimize(&f, &dom, SteepestDescent::new(&f, &dom), x, 100, 1e-6).unwrap();
            assert!(f.norm(&x) <= 1e-6);
        }
    }
}
