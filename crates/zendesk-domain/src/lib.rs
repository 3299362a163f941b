pub mod action_value;
pub mod error;
pub mod locale;
pub mod types;


pub use error::DomainError;
pub use types::*;
