#![allow(clippy::many_single_char_names)]
#![allow(clippy::type_complexity)]
#![warn(missing_docs)]

//! # Descent
//!
//! A pure Rust framework and implementation of line-search descent methods
//! for smooth (bound-constrained) optimization.
//!
//! This library provides a collection of gradient-based minimization
//! algorithms written entirely in Rust. The gradient is supplied by the
//! problem itself (in the motivating applications it comes from an adjoint
//! computation, where one gradient costs roughly one extra cost evaluation
//! regardless of the dimension), and the inner product used for norms and
//! curvature can be overridden so that the methods behave correctly in
//! non-Euclidean (e.g. mesh-dependent) geometries. All algorithms implement
//! the same interface and are interchangeable in the driver that runs the
//! iterative process.
//!
//! ## Algorithms
//!
//! * [L-BFGS](algo::lbfgs) -- Recommended method to be used as a default;
//!   good convergence at the cost of storing a few pairs of vectors.
//! * [Nonlinear conjugate gradients](algo::conjugate_gradient) -- Lower
//!   memory footprint than L-BFGS with several classical update formulas to
//!   choose from.
//! * [Truncated Newton](algo::newton_cg) -- Fast local convergence for
//!   problems that can provide Hessian-vector products.
//! * [Steepest descent](algo::steepest_descent) -- Slow but robust; useful
//!   as a baseline and for debugging gradients.
//!
//! ## Problem
//!
//! The problem is the unconstrained or bound-constrained minimization of a
//! differentiable cost function
//!
//! ```text
//! min f(x) over x = { x1, ..., xn }
//!
//! subject to Li <= xi <= Ui for some bounds [L, U] for every i
//! ```
//!
//! The bounds can be negative/positive infinity, effectively making the
//! variable unconstrained.
//!
//! When it comes to code, the problem is any type that implements the
//! [`Problem`], [`Function`] and [`Gradient`] traits.
//!
//! ```rust
//! // Descent is based on `nalgebra` crate.
//! use descent::nalgebra as na;
//! use descent::{Domain, Function, Gradient, Problem, ProblemError};
//! use na::{Dyn, IsContiguous};
//!
//! // A problem is represented by a type.
//! struct Rosenbrock {
//!     a: f64,
//!     b: f64,
//! }
//!
//! impl Problem for Rosenbrock {
//!     // The numeric type. Usually f64 or f32.
//!     type Field = f64;
//!
//!     // Specification for the domain. At the very least, the dimension
//!     // must be known.
//!     fn domain(&self) -> Domain<Self::Field> {
//!         Domain::unconstrained(2)
//!     }
//! }
//!
//! impl Function for Rosenbrock {
//!     // Evaluate trial values of variables to the cost.
//!     fn apply<Sx>(&self, x: &na::Vector<Self::Field, Dyn, Sx>) -> Result<Self::Field, ProblemError>
//!     where
//!         Sx: na::storage::Storage<Self::Field, Dyn> + IsContiguous,
//!     {
//!         Ok((self.a - x[0]).powi(2) + self.b * (x[1] - x[0].powi(2)).powi(2))
//!     }
//! }
//!
//! impl Gradient for Rosenbrock {
//!     // Compute the gradient of the cost.
//!     fn grad<Sx, Sg>(
//!         &self,
//!         x: &na::Vector<Self::Field, Dyn, Sx>,
//!         gx: &mut na::Vector<Self::Field, Dyn, Sg>,
//!     ) -> Result<(), ProblemError>
//!     where
//!         Sx: na::storage::Storage<Self::Field, Dyn> + IsContiguous,
//!         Sg: na::storage::StorageMut<Self::Field, Dyn>,
//!     {
//!         gx[0] = -2.0 * (self.a - x[0]) - 4.0 * self.b * x[0] * (x[1] - x[0].powi(2));
//!         gx[1] = 2.0 * self.b * (x[1] - x[0].powi(2));
//!         Ok(())
//!     }
//! }
//! ```
//!
//! If an analytic gradient is not available, the
//! [`WithNumericalGradient`](derivatives::WithNumericalGradient) adapter
//! supplies a finite-difference approximation. For bound-constrained
//! variables, return a different domain:
//!
//! ```rust
//! # use descent::nalgebra as na;
//! # use descent::*;
//! #
//! # struct Rosenbrock {
//! #     a: f64,
//! #     b: f64,
//! # }
//! #
//! impl Problem for Rosenbrock {
//! #     type Field = f64;
//!     // ...
//!
//!     fn domain(&self) -> Domain<Self::Field> {
//!         [(-10.0, 10.0), (-10.0, 10.0)].into_iter().collect()
//!     }
//! }
//! ```
//!
//! ## Minimizing
//!
//! When you have your problem available, you can use the [`DescentDriver`] to
//! run the iteration process until a stopping criterion is reached.
//!
//! ```rust
//! use descent::{DescentDriver, Status, Stopping};
//! # use descent::nalgebra as na;
//! # use descent::{Domain, Function, Gradient, Problem, ProblemError};
//! # use na::{Dyn, IsContiguous};
//! #
//! # struct Rosenbrock {
//! #     a: f64,
//! #     b: f64,
//! # }
//! #
//! # impl Problem for Rosenbrock {
//! #     type Field = f64;
//! #
//! #     fn domain(&self) -> Domain<Self::Field> {
//! #         Domain::unconstrained(2)
//! #     }
//! # }
//! #
//! # impl Function for Rosenbrock {
//! #     fn apply<Sx>(&self, x: &na::Vector<Self::Field, Dyn, Sx>) -> Result<Self::Field, ProblemError>
//! #     where
//! #         Sx: na::storage::Storage<Self::Field, Dyn> + IsContiguous,
//! #     {
//! #         Ok((self.a - x[0]).powi(2) + self.b * (x[1] - x[0].powi(2)).powi(2))
//! #     }
//! # }
//! #
//! # impl Gradient for Rosenbrock {
//! #     fn grad<Sx, Sg>(
//! #         &self,
//! #         x: &na::Vector<Self::Field, Dyn, Sx>,
//! #         gx: &mut na::Vector<Self::Field, Dyn, Sg>,
//! #     ) -> Result<(), ProblemError>
//! #     where
//! #         Sx: na::storage::Storage<Self::Field, Dyn> + IsContiguous,
//! #         Sg: na::storage::StorageMut<Self::Field, Dyn>,
//! #     {
//! #         gx[0] = -2.0 * (self.a - x[0]) - 4.0 * self.b * x[0] * (x[1] - x[0].powi(2));
//! #         gx[1] = 2.0 * self.b * (x[1] - x[0].powi(2));
//! #         Ok(())
//! #     }
//! # }
//!
//! let f = Rosenbrock { a: 1.0, b: 100.0 };
//! let mut driver = DescentDriver::builder(&f)
//!     .with_initial(vec![-1.2, 1.0])
//!     .with_stopping(Stopping::tolerances(0.0, 1e-6))
//!     .build();
//!
//! let report = driver.run().expect("driver encountered an error");
//!
//! if report.status == Status::Converged {
//!     println!("minimum at {:?} after {} iterations", driver.x(), report.iterations);
//! } else {
//!     println!("stopped without convergence: {:?}", report.status);
//! }
//! ```
//!
//! ## License
//!
//! Licensed under MIT.

pub mod algo;
mod core;
pub mod derivatives;
pub mod driver;
pub mod line_search;

pub use core::*;
pub use driver::{
    DescentDriver, DriverBuilder, InvalidOptionsError, Record, Report, SolveError, Status,
    Stopping,
};
pub use line_search::{Armijo, ArmijoOptions, LineSearchError};

#[cfg(feature = "testing")]
pub mod testing;

#[cfg(not(feature = "testing"))]
pub(crate) mod testing;

pub use nalgebra;
