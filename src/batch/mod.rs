pub mod discovery;
pub mod error;
pub mod processor;

pub use discovery::*;
pub use error::*;
pub use processor::*;
