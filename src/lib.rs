pub mod analysis;
pub mod args;
pub mod commands;
mod error;
mod fs;
pub mod model;
pub mod report;
pub mod source;


pub use error::{error_type, Error, ErrorType, Result};
