pub mod error;
pub mod validator;

pub use error::*;
pub use validator::*;
