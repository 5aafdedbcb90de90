#![deny(missing_docs)]

//! # Registries
//!
//! - **schemas**: named component schemas.
//! - **paths**: ordered operation descriptors.
//!
//! `ApiContract` bundles both into one explicit context object. Build it once,
//! hand it to the generator, and drop it; nothing is shared between runs.

pub mod paths;
pub mod schemas;

pub use paths::PathRegistry;
pub use schemas::{DuplicatePolicy, SchemaRegistry};

use crate::document::{Document, DocumentInfo};
use crate::error::{AppResult, Problems};
use crate::generator::generate;
use crate::models::OperationDescriptor;
use crate::schema::Schema;

/// Schema and path registrations for one generation run.
#[derive(Debug, Clone, Default)]
pub struct ApiContract {
    /// Component schemas.
    pub schemas: SchemaRegistry,
    /// Operations.
    pub paths: PathRegistry,
}

impl ApiContract {
    /// Creates an empty contract with the default schema policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty contract with an explicit schema re-registration policy.
    pub fn with_policy(policy: DuplicatePolicy) -> Self {
        Self {
            schemas: SchemaRegistry::with_policy(policy),
            paths: PathRegistry::new(),
        }
    }

    /// Registers a component schema. See [`SchemaRegistry::register`].
    pub fn register(&mut self, name: impl Into<String>, schema: Schema) -> AppResult<()> {
        self.schemas.register(name, schema)
    }

    /// Registers an operation. See [`PathRegistry::register_path`].
    pub fn register_path(&mut self, descriptor: OperationDescriptor) -> AppResult<()> {
        self.paths.register_path(descriptor)
    }

    /// Registers a batch of schemas, then a batch of operations.
    ///
    /// Every registration is attempted; the accepted ones are kept and all
    /// rejections are returned together as one `Aggregate` error.
    pub fn register_all<N, S, O>(&mut self, schemas: S, operations: O) -> AppResult<()>
    where
        N: Into<String>,
        S: IntoIterator<Item = (N, Schema)>,
        O: IntoIterator<Item = OperationDescriptor>,
    {
        let mut problems = Problems::new();
        for (name, schema) in schemas {
            if let Err(e) = self.register(name, schema) {
                problems.absorb(e);
            }
        }
        for descriptor in operations {
            if let Err(e) = self.register_path(descriptor) {
                problems.absorb(e);
            }
        }
        problems.into_result()
    }

    /// Generates the document for this contract.
    pub fn generate(&self, info: &DocumentInfo) -> AppResult<Document> {
        generate(&self.schemas, self.paths.operations(), info)
    }
}
