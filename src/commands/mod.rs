//! Command handlers for the finmate CLI.
//!
//! This module contains implementations for all CLI subcommands.

mod analyze;
mod targets;

use serde::Serialize;
use std::fmt::Debug;
use tracing::debug;

pub use analyze::{analyze, manual};
pub use targets::targets;

/// The output type for a command. This allows the command to return the text that is printed to
/// stdout along with, optionally, the structured data it was rendered from.
#[derive(Debug, Clone, Serialize)]
pub struct Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// The rendered output of the command.
    message: String,

    /// Any structured data that needs to be output from the call.
    structure: Option<T>,
}

impl<T, S> From<S> for Out<T>
where
    T: Debug + Clone + Serialize,
    S: Into<String>,
{
    fn from(value: S) -> Self {
        Out::new_message(value)
    }
}

impl<T> Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// Create a new `Out` object that has `Some(structure)`.
    pub fn new<S>(message: S, structure: T) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: Some(structure),
        }
    }

    /// Create a new `Out` object that has `None` for `structure`.
    pub fn new_message<S>(message: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: None,
        }
    }

    /// Get the `message`.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the structured data stored in `structure`.
    pub fn structure(&self) -> Option<&T> {
        self.structure.as_ref()
    }

    /// Print the message to stdout and the structured data (if it exists) as JSON to `debug!`.
    pub fn print(&self) {
        println!("{}", self.message.trim_end());
        if let Some(structure) = self.structure() {
            if let Ok(json) = serde_json::to_string(structure) {
                debug!("Command output: {json}");
            }
        }
    }
}
