mod base;
mod direction;
mod domain;
mod function;
mod gradient;

pub use base::*;
pub use direction::*;
pub use domain::*;
pub use function::*;
pub use gradient::*;
