#![deny(missing_docs)]

//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace, plus the
//! `Problems` list used to report every failure found in one pass.

use derive_more::{Display, From};
use std::fmt;

/// The Global Error Enum.
///
/// We use `derive_more` for boilerplate.
/// Only `std::io::Error` and `Problems` convert implicitly; every other
/// variant is constructed explicitly so the category is always deliberate.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Invalid or duplicate schema name, or an invalid shape at registration.
    #[from(ignore)]
    #[display("Registration Error: {_0}")]
    Registration(String),

    /// An operation or schema names a component schema that was never registered.
    #[from(ignore)]
    #[display("Reference Error: {location} references undefined schema '{schema}'")]
    Reference {
        /// The unresolved component name.
        schema: String,
        /// Where the reference was found (e.g. `GET /movies/{id} responses.200`).
        location: String,
    },

    /// Path template / parameter mismatch, duplicate method+path, bad status code.
    #[from(ignore)]
    #[display("Structural Error: {_0}")]
    Structural(String),

    /// A document value could not be rendered in a target format.
    #[from(ignore)]
    #[display("Serialization Error: {_0}")]
    Serialization(String),

    /// Invalid configuration or document metadata.
    #[from(ignore)]
    #[display("Config Error: {_0}")]
    Config(String),

    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// Several problems found in a single pass.
    #[display("{_0}")]
    Aggregate(Problems),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

impl AppError {
    /// Flattens this error into its individual problems.
    ///
    /// An `Aggregate` yields its members (recursively); any other variant yields itself.
    pub fn problems(&self) -> Vec<&AppError> {
        match self {
            AppError::Aggregate(list) => list.iter().flat_map(AppError::problems).collect(),
            other => vec![other],
        }
    }
}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;

/// An ordered collection of problems found while registering or generating.
#[derive(Debug, Default)]
pub struct Problems(Vec<AppError>);

impl Problems {
    /// Creates an empty problem list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a problem.
    pub fn push(&mut self, problem: AppError) {
        self.0.push(problem);
    }

    /// Records every problem held by `error`, unwrapping an `Aggregate` so the
    /// list stays flat.
    pub fn absorb(&mut self, error: AppError) {
        match error {
            AppError::Aggregate(list) => self.0.extend(list.0),
            other => self.0.push(other),
        }
    }

    /// Returns true when nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of recorded problems.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over the recorded problems in discovery order.
    pub fn iter(&self) -> std::slice::Iter<'_, AppError> {
        self.0.iter()
    }

    /// `Ok(())` when empty, otherwise an `Aggregate` error holding every problem.
    pub fn into_result(self) -> AppResult<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(AppError::Aggregate(self))
        }
    }
}

impl Extend<AppError> for Problems {
    fn extend<T: IntoIterator<Item = AppError>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}

impl IntoIterator for Problems {
    type Item = AppError;
    type IntoIter = std::vec::IntoIter<AppError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for Problems {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let noun = if self.0.len() == 1 { "problem" } else { "problems" };
        write!(f, "{} {} found:", self.0.len(), noun)?;
        for problem in &self.0 {
            write!(f, "\n  - {}", problem)?;
        }
        Ok(())
    }
}
