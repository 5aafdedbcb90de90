#![deny(missing_docs)]

//! # Path Registry
//!
//! An append-only, ordered list of operation descriptors. Each registration is
//! checked eagerly; the list handed to the generator is exactly the accepted
//! registrations in call order.

use crate::error::{AppError, AppResult, Problems};
use crate::models::{HttpMethod, OperationDescriptor};
use crate::validation::check_operation;

/// Registry of operations in registration order.
#[derive(Debug, Clone, Default)]
pub struct PathRegistry {
    operations: Vec<OperationDescriptor>,
}

impl PathRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an operation.
    ///
    /// Rejects, with every problem found, an operation whose path does not start
    /// with `/`, whose placeholders and path parameters disagree, whose responses
    /// are malformed, or whose (method, path) pair is already registered.
    /// A rejected operation is not stored.
    pub fn register_path(&mut self, descriptor: OperationDescriptor) -> AppResult<()> {
        let mut problems = Problems::new();
        check_operation(&descriptor, &mut problems);

        if self.contains(descriptor.method, &descriptor.path) {
            problems.push(AppError::Structural(format!(
                "{}: operation is registered more than once",
                descriptor.label()
            )));
        }

        problems.into_result()?;
        tracing::debug!(operation = %descriptor.label(), "registered operation");
        self.operations.push(descriptor);
        Ok(())
    }

    /// Returns true if an operation for (method, path) is registered.
    pub fn contains(&self, method: HttpMethod, path: &str) -> bool {
        self.operations
            .iter()
            .any(|op| op.method == method && op.path == path)
    }

    /// Operations in registration order.
    pub fn operations(&self) -> &[OperationDescriptor] {
        &self.operations
    }

    /// Number of registered operations.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Returns true when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}
