//! The direction generators.
//!
//! * [Steepest descent](steepest_descent) -- The simplest choice. Robust, but
//!   slow on ill-conditioned problems.
//! * [Nonlinear conjugate gradients](conjugate_gradient) -- Cheap per
//!   iteration with noticeably better convergence than steepest descent.
//! * [L-BFGS](lbfgs) -- Recommended default. Quasi-Newton convergence for the
//!   cost of a handful of stored vector pairs.
//! * [Truncated Newton](newton_cg) -- For problems that can afford
//!   Hessian-vector products.

pub mod conjugate_gradient;
pub mod lbfgs;
pub mod newton_cg;
pub mod steepest_descent;

pub use conjugate_gradient::{CgFormula, ConjugateGradient};
pub use lbfgs::Lbfgs;
pub use newton_cg::NewtonCg;
pub use steepest_descent::SteepestDescent;
