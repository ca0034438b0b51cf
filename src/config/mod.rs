pub mod error;
pub mod loader;
pub mod validation;

pub use error::*;
pub use loader::*;
pub use validation::*;
