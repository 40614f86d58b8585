//! High-level API for running the optimization.
//!
//! This module contains the driver that encapsulates all internal state and
//! runs the iterative process: evaluating the cost and its gradient,
//! obtaining a search direction, performing the line search and checking the
//! stopping criteria.
//!
//! The simplest way of using the driver is to initialize it with the
//! defaults:
//!
//! ```rust
//! use descent::DescentDriver;
//! # use descent::{Domain, Problem};
//! #
//! # struct MyCost;
//! #
//! # impl MyCost {
//! #     fn new() -> Self {
//! #         Self
//! #     }
//! # }
//! #
//! # impl Problem for MyCost {
//! #     type Field = f64;
//! #
//! #     fn domain(&self) -> Domain<Self::Field> {
//! #         Domain::unconstrained(2)
//! #     }
//! # }
//!
//! let f = MyCost::new();
//!
//! let mut driver = DescentDriver::new(&f);
//! ```
//!
//! If you need to specify additional settings, use the builder:
//!
//! ```rust
//! use descent::{DescentDriver, Stopping};
//! # use descent::{Domain, Problem};
//! #
//! # struct MyCost;
//! #
//! # impl MyCost {
//! #     fn new() -> Self {
//! #         Self
//! #     }
//! # }
//! #
//! # impl Problem for MyCost {
//! #     type Field = f64;
//! #
//! #     fn domain(&self) -> Domain<Self::Field> {
//! #         Domain::unconstrained(2)
//! #     }
//! # }
//!
//! let f = MyCost::new();
//!
//! let mut driver = DescentDriver::builder(&f)
//!     .with_initial(vec![10.0, -10.0])
//!     .with_algo(descent::algo::ConjugateGradient::new)
//!     .with_stopping(Stopping::tolerances(1e-3, 1e-9))
//!     .build();
//! ```
//!
//! Once you have the driver, run it to completion:
//!
//! ```rust
//! # use descent::nalgebra as na;
//! # use descent::{DescentDriver, Domain, Function, Gradient, Problem, ProblemError, Status};
//! # use na::{Dyn, IsContiguous};
//! #
//! # struct MyCost;
//! #
//! # impl MyCost {
//! #     fn new() -> Self {
//! #         Self
//! #     }
//! # }
//! #
//! # impl Problem for MyCost {
//! #     type Field = f64;
//! #
//! #     fn domain(&self) -> Domain<Self::Field> {
//! #         Domain::unconstrained(2)
//! #     }
//! # }
//! #
//! # impl Function for MyCost {
//! #     fn apply<Sx>(&self, x: &na::Vector<Self::Field, Dyn, Sx>) -> Result<Self::Field, ProblemError>
//! #     where
//! #         Sx: na::storage::Storage<Self::Field, Dyn> + IsContiguous,
//! #     {
//! #         Ok(0.5 * x.dot(x))
//! #     }
//! # }
//! #
//! # impl Gradient for MyCost {
//! #     fn grad<Sx, Sg>(
//! #         &self,
//! #         x: &na::Vector<Self::Field, Dyn, Sx>,
//! #         gx: &mut na::Vector<Self::Field, Dyn, Sg>,
//! #     ) -> Result<(), ProblemError>
//! #     where
//! #         Sx: na::storage::Storage<Self::Field, Dyn> + IsContiguous,
//! #         Sg: na::storage::StorageMut<Self::Field, Dyn>,
//! #     {
//! #         gx.copy_from(x);
//! #         Ok(())
//! #     }
//! # }
//! #
//! # let f = MyCost::new();
//! # let mut driver = DescentDriver::builder(&f).with_initial(vec![1.0, 1.0]).build();
//! #
//! let report = driver.run().expect("driver encountered an error");
//!
//! assert_eq!(report.status, Status::Converged);
//! println!("minimum at {:?} after {} iterations", driver.x(), report.iterations);
//! ```

use getset::{CopyGetters, Setters};
use log::{debug, warn};
use nalgebra::{convert, DimName, Dyn, OVector, U1};
use num_traits::Zero;
use thiserror::Error;

use crate::algo::Lbfgs;
use crate::core::{Direction, Domain, Gradient, Problem, ProblemError, RealField};
use crate::line_search::{Armijo, ArmijoOptions, LineSearchError};

/// Stopping criteria of the driver.
///
/// The process stops successfully when the gradient norm drops below
/// `atol` or below `rtol` times the initial gradient norm, and
/// unsuccessfully when `max_iters` iterations did not suffice.
#[derive(Debug, Clone, CopyGetters, Setters)]
#[getset(get_copy = "pub", set = "pub")]
pub struct Stopping<T: RealField + Copy> {
    /// Relative gradient norm tolerance. Default: `1e-3`.
    rtol: T,
    /// Absolute gradient norm tolerance. Default: `0` (disabled).
    atol: T,
    /// Maximum number of iterations. Default: `100`.
    max_iters: usize,
    /// Return a report instead of an error when the line search fails.
    /// Default: `false`.
    soft_exit: bool,
}

impl<T: RealField + Copy> Default for Stopping<T> {
    fn default() -> Self {
        Self {
            rtol: convert(1e-3),
            atol: T::zero(),
            max_iters: 100,
            soft_exit: false,
        }
    }
}

impl<T: RealField + Copy> Stopping<T> {
    /// Creates stopping criteria with given relative and absolute tolerances.
    pub fn tolerances(rtol: T, atol: T) -> Self {
        Self {
            rtol,
            atol,
            ..Self::default()
        }
    }

    fn validate(&self) -> Result<(), InvalidOptionsError> {
        let zero = T::zero();

        if self.rtol < zero || self.atol < zero {
            return Err(InvalidOptionsError::NegativeTolerance);
        }

        if self.rtol == zero && self.atol == zero {
            return Err(InvalidOptionsError::NoTolerance);
        }

        if self.max_iters == 0 {
            return Err(InvalidOptionsError::NoIterations);
        }

        Ok(())
    }
}

/// Error returned for nonsensical [`Stopping`] settings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidOptionsError {
    /// A tolerance is negative.
    #[error("tolerances must not be negative")]
    NegativeTolerance,
    /// Both tolerances are zero.
    #[error("at least one tolerance must be positive")]
    NoTolerance,
    /// The iteration budget is zero.
    #[error("maximum number of iterations must be positive")]
    NoIterations,
}

/// Error returned from [`DescentDriver::run`].
#[derive(Debug, Error)]
pub enum SolveError<E> {
    /// The stopping settings are invalid.
    #[error("{0}")]
    InvalidOptions(#[from] InvalidOptionsError),
    /// Error that occurred when evaluating the cost or the gradient.
    #[error("{0}")]
    Problem(#[from] ProblemError),
    /// The line search could not find an admissible step. Returned only when
    /// soft exit is disabled.
    #[error("line search failed: {0}")]
    LineSearch(LineSearchError),
    /// Error of the direction generator used.
    #[error("direction generator failed: {0}")]
    Direction(E),
}

/// The reason the driver stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// A gradient norm tolerance was met.
    Converged,
    /// The iteration budget was exhausted.
    MaxIterations,
    /// The line search failed and soft exit is enabled; the driver holds the
    /// best iterate found.
    LineSearchFailure,
}

/// Summary of a finished run.
#[derive(Debug, Clone, Copy)]
pub struct Report<T> {
    /// The reason the driver stopped.
    pub status: Status,
    /// Number of performed iterations.
    pub iterations: usize,
    /// Cost in the final iterate.
    pub cost: T,
    /// Gradient norm in the final iterate.
    pub grad_norm: T,
}

/// Progress record emitted after every iteration.
#[derive(Debug, Clone, Copy)]
pub struct Record<T> {
    /// Iteration number, starting at zero for the initial evaluation.
    pub iteration: usize,
    /// Cost in the current iterate.
    pub cost: T,
    /// Gradient norm in the current iterate.
    pub grad_norm: T,
    /// Accepted step size (zero for the initial evaluation).
    pub step_size: T,
}

type Hook<'a> = Box<dyn FnMut() + 'a>;
type Inspect<'a, T> = Box<dyn FnMut(&Record<T>) + 'a>;

struct Builder<'a, F: Problem, A> {
    f: &'a F,
    dom: Domain<F::Field>,
    algo: A,
    ls_options: ArmijoOptions<F>,
    stopping: Stopping<F::Field>,
    x0: OVector<F::Field, Dyn>,
    pre_solve: Option<Hook<'a>>,
    post_gradient: Option<Hook<'a>>,
    inspect: Option<Inspect<'a, F::Field>>,
}

impl<'a, F: Problem> Builder<'a, F, Lbfgs<F>> {
    fn new(f: &'a F) -> Self {
        let dom = f.domain();
        let algo = Lbfgs::new(f, &dom);

        let dim = Dyn(dom.dim());
        let x0 = OVector::from_element_generic(dim, U1::name(), convert(0.0));

        Self {
            f,
            dom,
            algo,
            ls_options: ArmijoOptions::default(),
            stopping: Stopping::default(),
            x0,
            pre_solve: None,
            post_gradient: None,
            inspect: None,
        }
    }
}

/// Builder for the [`DescentDriver`].
pub struct DriverBuilder<'a, F: Problem, A>(Builder<'a, F, A>);

impl<'a, F: Problem, A> DriverBuilder<'a, F, A> {
    /// Sets the initial iterate from which the iterative process starts.
    pub fn with_initial(mut self, x0: Vec<F::Field>) -> Self {
        let dim = Dyn(self.0.dom.dim());
        self.0.x0 = OVector::from_vec_generic(dim, U1::name(), x0);
        self
    }

    /// Sets specific direction generator to be used.
    ///
    /// This builder method accepts a closure that takes the reference to the
    /// problem and its domain. For the generators in this crate, you can
    /// simply pass the `new` constructor directly (e.g., [`Lbfgs::new`]).
    pub fn with_algo<A2, FA>(self, factory: FA) -> DriverBuilder<'a, F, A2>
    where
        FA: FnOnce(&F, &Domain<F::Field>) -> A2,
    {
        let Builder {
            f,
            dom,
            ls_options,
            stopping,
            x0,
            pre_solve,
            post_gradient,
            inspect,
            ..
        } = self.0;

        let algo = factory(f, &dom);

        DriverBuilder(Builder {
            f,
            dom,
            algo,
            ls_options,
            stopping,
            x0,
            pre_solve,
            post_gradient,
            inspect,
        })
    }

    /// Sets the line search options.
    pub fn with_line_search(mut self, options: ArmijoOptions<F>) -> Self {
        self.0.ls_options = options;
        self
    }

    /// Sets the stopping criteria.
    pub fn with_stopping(mut self, stopping: Stopping<F::Field>) -> Self {
        self.0.stopping = stopping;
        self
    }

    /// Registers a hook invoked once per iteration, right before the cost
    /// evaluations of the line search (in the motivating applications, before
    /// the state equation is solved).
    pub fn with_pre_solve_hook<H: FnMut() + 'a>(mut self, hook: H) -> Self {
        self.0.pre_solve = Some(Box::new(hook));
        self
    }

    /// Registers a hook invoked once per iteration, right after the gradient
    /// has been computed.
    pub fn with_post_gradient_hook<H: FnMut() + 'a>(mut self, hook: H) -> Self {
        self.0.post_gradient = Some(Box::new(hook));
        self
    }

    /// Registers a callback that receives the progress [`Record`] after the
    /// initial evaluation and after every iteration.
    pub fn with_inspect<I: FnMut(&Record<F::Field>) + 'a>(mut self, inspect: I) -> Self {
        self.0.inspect = Some(Box::new(inspect));
        self
    }

    /// Builds the [`DescentDriver`].
    pub fn build(self) -> DescentDriver<'a, F, A> {
        let Builder {
            f,
            dom,
            algo,
            ls_options,
            stopping,
            mut x0,
            pre_solve,
            post_gradient,
            inspect,
        } = self.0;

        dom.project(&mut x0);

        let dim = Dyn(dom.dim());
        let gx = OVector::zeros_generic(dim, U1::name());
        let p = gx.clone_owned();
        let line_search = Armijo::with_options(f, &dom, ls_options);

        DescentDriver {
            f,
            dom,
            algo,
            line_search,
            stopping,
            x: x0,
            gx,
            p,
            pre_solve,
            post_gradient,
            inspect,
        }
    }
}

/// The driver for the descent process.
///
/// For default settings, use [`DescentDriver::new`]. For more flexibility,
/// use [`DescentDriver::builder`]. For the usage of the driver, see
/// [module](self) documentation.
pub struct DescentDriver<'a, F: Problem, A> {
    f: &'a F,
    dom: Domain<F::Field>,
    algo: A,
    line_search: Armijo<F>,
    stopping: Stopping<F::Field>,
    x: OVector<F::Field, Dyn>,
    gx: OVector<F::Field, Dyn>,
    p: OVector<F::Field, Dyn>,
    pre_solve: Option<Hook<'a>>,
    post_gradient: Option<Hook<'a>>,
    inspect: Option<Inspect<'a, F::Field>>,
}

impl<'a, F: Problem> DescentDriver<'a, F, Lbfgs<F>> {
    /// Returns the builder for specifying additional settings.
    pub fn builder(f: &'a F) -> DriverBuilder<'a, F, Lbfgs<F>> {
        DriverBuilder(Builder::new(f))
    }

    /// Initializes the driver with the default settings.
    pub fn new(f: &'a F) -> Self {
        DescentDriver::builder(f).build()
    }
}

impl<'a, F: Problem, A> DescentDriver<'a, F, A> {
    /// Returns reference to the current iterate.
    pub fn x(&self) -> &[F::Field] {
        self.x.as_slice()
    }
}

impl<'a, F: Gradient, A: Direction<F>> DescentDriver<'a, F, A> {
    /// Runs the process until a stopping criterion is reached or an error
    /// occurs.
    ///
    /// The final iterate can be retrieved with [`x`](DescentDriver::x) after
    /// the run; on soft exit it is the last accepted one.
    pub fn run(&mut self) -> Result<Report<F::Field>, SolveError<A::Error>> {
        self.stopping.validate()?;

        let Stopping {
            rtol,
            atol,
            max_iters,
            soft_exit,
            ..
        } = self.stopping;

        let zero = F::Field::zero();

        // Initial evaluation.
        if let Some(hook) = self.pre_solve.as_mut() {
            hook();
        }
        let mut fx = self.f.apply(&self.x)?;
        self.f.grad(&self.x, &mut self.gx)?;
        if let Some(hook) = self.post_gradient.as_mut() {
            hook();
        }

        let norm_initial = self.f.norm(&self.gx);
        let mut norm = norm_initial;

        self.emit(0, fx, norm, zero);

        let mut iteration = 0;

        loop {
            if norm <= atol || norm <= rtol * norm_initial {
                return Ok(Report {
                    status: Status::Converged,
                    iterations: iteration,
                    cost: fx,
                    grad_norm: norm,
                });
            }

            if iteration >= max_iters {
                return Ok(Report {
                    status: Status::MaxIterations,
                    iterations: iteration,
                    cost: fx,
                    grad_norm: norm,
                });
            }

            self.algo
                .next_direction(self.f, &self.x, &self.gx, &mut self.p)
                .map_err(SolveError::Direction)?;

            let mut slope = self.f.inner(&self.gx, &self.p);

            if slope >= zero {
                // The generator failed to produce descent. Substitute the
                // steepest descent direction and drop stale history.
                debug!("{} produced a non-descent direction", A::NAME);

                self.p.copy_from(&self.gx);
                self.p.neg_mut();
                slope = -self.f.inner(&self.gx, &self.gx);
                self.algo.reset();
            }

            if let Some(hook) = self.pre_solve.as_mut() {
                hook();
            }

            let step = match self.line_search.search(
                self.f,
                &self.dom,
                &mut self.x,
                &self.p,
                fx,
                slope,
            ) {
                Ok((step, trial)) => {
                    fx = trial;
                    step
                }
                Err(LineSearchError::Problem(error)) => return Err(error.into()),
                Err(error) => {
                    warn!("line search failed: {}", error);

                    if soft_exit {
                        return Ok(Report {
                            status: Status::LineSearchFailure,
                            iterations: iteration,
                            cost: fx,
                            grad_norm: norm,
                        });
                    } else {
                        return Err(SolveError::LineSearch(error));
                    }
                }
            };

            self.f.grad(&self.x, &mut self.gx)?;
            if let Some(hook) = self.post_gradient.as_mut() {
                hook();
            }

            norm = self.f.norm(&self.gx);
            iteration += 1;

            self.emit(iteration, fx, norm, step);
        }
    }

    /// Returns the name of the used direction generator.
    pub fn name(&self) -> &str {
        A::NAME
    }

    fn emit(&mut self, iteration: usize, cost: F::Field, grad_norm: F::Field, step_size: F::Field) {
        debug!(
            "iteration = {}\tcost = {:?}\t|| grad || = {:?}\tstep = {:?}",
            iteration, cost, grad_norm, step_size
        );

        if let Some(inspect) = self.inspect.as_mut() {
            let record = Record {
                iteration,
                cost,
                grad_norm,
                step_size,
            };
            inspect(&record);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::algo::{NewtonCg, SteepestDescent};
    use crate::core::{Function, ProblemError};
    use crate::testing::Sphere;

    use nalgebra::{storage::Storage, IsContiguous, Vector};

    struct WithDomain(pub Domain<f64>);

    impl Problem for WithDomain {
        type Field = f64;

        fn domain(&self) -> Domain<Self::Field> {
            self.0.clone()
        }
    }

    #[test]
    fn basic_use_case() {
        let f = Sphere::new(2);
        let mut driver = DescentDriver::builder(&f)
            .with_initial(vec![1.0, 1.0])
            .with_stopping(Stopping::tolerances(0.0, 1e-6))
            .build();

        let report = driver.run().unwrap();

        assert_eq!(report.status, Status::Converged);
        assert!(report.grad_norm <= 1e-6);
    }

    #[test]
    fn steepest_descent_monotone_cost() {
        let f = Sphere::new(2);

        let mut costs = Vec::new();
        let report;

        {
            let mut driver = DescentDriver::builder(&f)
                .with_initial(vec![1.0, 1.0])
                .with_algo(SteepestDescent::new)
                .with_stopping(Stopping::tolerances(0.0, 1e-6))
                .with_inspect(|record| costs.push(record.cost))
                .build();

            report = driver.run().unwrap();
        }

        assert_eq!(report.status, Status::Converged);
        assert!(report.grad_norm <= 1e-6);
        assert!(costs.windows(2).all(|w| w[1] < w[0]));
    }

    #[test]
    fn lbfgs_not_worse_than_steepest_descent() {
        // An ill-conditioned quadratic makes steepest descent zigzag while
        // the quasi-Newton approximation captures the curvature.
        let f = crate::testing::Quadratic::new(vec![1.0, 100.0]);

        let iters = |report: Report<f64>| report.iterations;

        let mut sd = DescentDriver::builder(&f)
            .with_initial(vec![1.0, 1.0])
            .with_algo(SteepestDescent::new)
            .with_stopping(Stopping::tolerances(0.0, 1e-6))
            .build();
        let sd_iters = iters(sd.run().unwrap());

        let mut lbfgs = DescentDriver::builder(&f)
            .with_initial(vec![1.0, 1.0])
            .with_stopping(Stopping::tolerances(0.0, 1e-6))
            .build();
        let lbfgs_iters = iters(lbfgs.run().unwrap());

        assert!(lbfgs_iters < sd_iters);
    }

    #[test]
    fn terminates_within_budget() {
        let f = Sphere::new(2);

        let mut stopping = Stopping::tolerances(0.0, 1e-30);
        stopping.set_max_iters(3);

        let mut driver = DescentDriver::builder(&f)
            .with_initial(vec![1000.0, -1000.0])
            .with_algo(SteepestDescent::new)
            .with_line_search({
                // Hamstring the line search so the tolerance is out of reach.
                let mut options = crate::line_search::ArmijoOptions::default();
                options.set_initial_step(1e-3).set_grow(1.0);
                options
            })
            .with_stopping(stopping)
            .build();

        let report = driver.run().unwrap();

        assert_eq!(report.status, Status::MaxIterations);
        assert_eq!(report.iterations, 3);
    }

    #[test]
    fn invalid_stopping_rejected() {
        let f = Sphere::new(2);

        let mut stopping = Stopping::tolerances(0.0, 0.0);
        let mut driver = DescentDriver::builder(&f)
            .with_stopping(stopping.clone())
            .build();
        assert!(matches!(
            driver.run(),
            Err(SolveError::InvalidOptions(InvalidOptionsError::NoTolerance))
        ));

        stopping.set_rtol(-1.0);
        let mut driver = DescentDriver::builder(&f).with_stopping(stopping).build();
        assert!(matches!(
            driver.run(),
            Err(SolveError::InvalidOptions(
                InvalidOptionsError::NegativeTolerance
            ))
        ));
    }

    #[test]
    fn hooks_run_once_per_iteration() {
        let f = Sphere::new(2);

        let pre = Cell::new(0);
        let post = Cell::new(0);
        let iterations;

        {
            let mut driver = DescentDriver::builder(&f)
                .with_initial(vec![1.0, 1.0])
                .with_algo(SteepestDescent::new)
                .with_stopping(Stopping::tolerances(0.0, 1e-6))
                .with_pre_solve_hook(|| pre.set(pre.get() + 1))
                .with_post_gradient_hook(|| post.set(post.get() + 1))
                .build();

            iterations = driver.run().unwrap().iterations;
        }

        // Once for the initial evaluation, once per iteration.
        assert_eq!(pre.get(), iterations + 1);
        assert_eq!(post.get(), iterations + 1);
    }

    struct Cliff;

    impl Problem for Cliff {
        type Field = f64;

        fn domain(&self) -> Domain<Self::Field> {
            Domain::unconstrained(1)
        }
    }

    impl Function for Cliff {
        fn apply<Sx>(&self, x: &Vector<Self::Field, nalgebra::Dyn, Sx>) -> Result<Self::Field, ProblemError>
        where
            Sx: Storage<Self::Field, nalgebra::Dyn> + IsContiguous,
        {
            // Discontinuous: any move from the origin increases the cost, but
            // the reported gradient claims descent is possible.
            if x[0] == 0.0 {
                Ok(0.0)
            } else {
                Ok(1.0)
            }
        }
    }

    impl Gradient for Cliff {
        fn grad<Sx, Sg>(
            &self,
            _x: &Vector<Self::Field, nalgebra::Dyn, Sx>,
            gx: &mut Vector<Self::Field, nalgebra::Dyn, Sg>,
        ) -> Result<(), ProblemError>
        where
            Sx: Storage<Self::Field, nalgebra::Dyn> + IsContiguous,
            Sg: nalgebra::storage::StorageMut<Self::Field, nalgebra::Dyn>,
        {
            gx[0] = 1.0;
            Ok(())
        }
    }

    #[test]
    fn line_search_failure_is_fatal_by_default() {
        let f = Cliff;
        let mut driver = DescentDriver::builder(&f)
            .with_algo(SteepestDescent::new)
            .with_stopping(Stopping::tolerances(0.0, 1e-6))
            .build();

        assert!(matches!(
            driver.run(),
            Err(SolveError::LineSearch(LineSearchError::StepTooSmall))
        ));
    }

    #[test]
    fn line_search_failure_soft_exit() {
        let f = Cliff;

        let mut stopping = Stopping::tolerances(0.0, 1e-6);
        stopping.set_soft_exit(true);

        let mut driver = DescentDriver::builder(&f)
            .with_algo(SteepestDescent::new)
            .with_stopping(stopping)
            .build();

        let report = driver.run().unwrap();

        assert_eq!(report.status, Status::LineSearchFailure);
        assert_eq!(driver.x(), &[0.0]);
    }

    struct Ascent;

    impl<F: Gradient> Direction<F> for Ascent {
        const NAME: &'static str = "Ascent";

        type Error = std::convert::Infallible;

        fn next_direction<Sx, Sg, Sp>(
            &mut self,
            _f: &F,
            _x: &nalgebra::Vector<F::Field, nalgebra::Dyn, Sx>,
            gx: &nalgebra::Vector<F::Field, nalgebra::Dyn, Sg>,
            p: &mut nalgebra::Vector<F::Field, nalgebra::Dyn, Sp>,
        ) -> Result<(), Self::Error>
        where
            Sx: Storage<F::Field, nalgebra::Dyn> + IsContiguous,
            Sg: Storage<F::Field, nalgebra::Dyn> + IsContiguous,
            Sp: nalgebra::storage::StorageMut<F::Field, nalgebra::Dyn>,
        {
            p.copy_from(gx);
            Ok(())
        }

        fn reset(&mut self) {}
    }

    #[test]
    fn non_descent_direction_substituted() {
        // A generator that always proposes the ascent direction. The driver
        // must substitute steepest descent (resetting the generator), so the
        // run degrades to plain gradient descent and still converges.
        let f = Sphere::new(2);
        let mut driver = DescentDriver::builder(&f)
            .with_initial(vec![1.0, 1.0])
            .with_algo(|_: &Sphere, _: &Domain<f64>| Ascent)
            .with_stopping(Stopping::tolerances(0.0, 1e-6))
            .build();

        let report = driver.run().unwrap();

        assert_eq!(report.status, Status::Converged);
    }

    #[test]
    fn newton_on_sphere() {
        let f = Sphere::new(3);
        let mut driver = DescentDriver::builder(&f)
            .with_initial(vec![1.0, -2.0, 3.0])
            .with_algo(NewtonCg::new)
            .with_stopping(Stopping::tolerances(0.0, 1e-9))
            .build();

        let report = driver.run().unwrap();

        assert_eq!(report.status, Status::Converged);
        assert!(report.iterations <= 2);
    }

    #[test]
    fn initial_projected_into_domain() {
        let f = WithDomain(Domain::rect(vec![0.0, 0.0], vec![1.0, 1.0]));
        let driver = DescentDriver::builder(&f)
            .with_initial(vec![10.0, -10.0])
            .build();

        assert_eq!(driver.x(), &[1.0, 0.0]);
    }
}
