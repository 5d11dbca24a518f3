mod clause;
mod inconsistent;
mod literal;

pub use clause::*;
pub use inconsistent::*;
pub use literal::*;
