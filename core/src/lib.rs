#![deny(missing_docs)]

//! # API Contract Core
//!
//! Registers structural schemas and HTTP operations, generates an OpenAPI 3.1
//! document from them, and writes it as JSON and YAML.
//!
//! The pipeline is linear: register -> generate -> write.
//!
//! ```no_run
//! use apicontract_core::{
//!     publish, ApiContract, DocumentInfo, Field, GeneratorConfig, OperationDescriptor,
//!     ParameterDescriptor, ResponseDescriptor, Schema,
//! };
//!
//! # fn main() -> apicontract_core::AppResult<()> {
//! let mut contract = ApiContract::new();
//! contract.register(
//!     "Movie",
//!     Schema::object(vec![Field::required("name", Schema::string())]),
//! )?;
//! contract.register_path(
//!     OperationDescriptor::get("/movies/{id}")
//!         .with_parameter(ParameterDescriptor::path("id", Schema::string()))
//!         .with_response(
//!             200,
//!             ResponseDescriptor::new("Movie found").with_json(Schema::reference("Movie")),
//!         ),
//! )?;
//!
//! let config = GeneratorConfig::new(DocumentInfo::new("Movies API", "0.0.1"));
//! publish(&contract, &config)?;
//! # Ok(())
//! # }
//! ```

/// Shared error types.
pub mod error;

/// Structural schema model.
pub mod schema;

/// Operation, parameter and response descriptors.
pub mod models;

/// Invariant checks.
pub mod validation;

/// Schema and path registries.
pub mod registry;

/// OpenAPI document object graph.
pub mod document;

/// Document generation.
pub mod generator;

/// JSON/YAML rendering and atomic persistence.
pub mod writer;

/// Generator configuration.
pub mod config;

pub use config::{GeneratorConfig, OutputConfig};
pub use document::{Document, DocumentInfo, Server};
pub use error::{AppError, AppResult, Problems};
pub use generator::generate;
pub use models::{
    HttpMethod, OperationDescriptor, ParameterDescriptor, ParameterLocation,
    RequestBodyDescriptor, ResponseDescriptor,
};
pub use registry::{ApiContract, DuplicatePolicy, PathRegistry, SchemaRegistry};
pub use schema::{Field, Schema, SchemaKind};
pub use writer::{render_json, render_yaml, write_document, WriteReport};

/// Generates the document for `contract` and writes both artifacts.
///
/// Generation errors abort before anything is written. Write failures are
/// collected per format; the other format is still attempted.
pub fn publish(
    contract: &ApiContract,
    config: &GeneratorConfig,
) -> AppResult<Vec<std::path::PathBuf>> {
    let document = contract.generate(&config.info)?;
    write_document(
        &document,
        &config.output.json_path(),
        &config.output.yaml_path(),
    )
    .into_result()
}
