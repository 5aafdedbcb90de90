#![deny(missing_docs)]

//! # Document Generator
//!
//! Pure transform from registrations to an OpenAPI 3.1 [`Document`].
//!
//! The whole contract is validated first and every problem is collected:
//! unresolved schema references, placeholder/parameter mismatches, duplicate
//! method+path pairs, malformed responses and invalid metadata. Nothing is built
//! unless that list is empty. The output carries no timestamps or other
//! run-dependent data, so identical inputs give identical documents.

use crate::document::{
    Components, Document, DocumentInfo, Info, MediaType, Operation, Parameter, PathItem,
    RequestBody, Response, OPENAPI_VERSION,
};
use crate::error::{AppError, AppResult, Problems};
use crate::models::{OperationDescriptor, ParameterDescriptor};
use crate::registry::SchemaRegistry;
use crate::schema::Schema;
use crate::validation::{check_operation, check_server_url, check_unique_operations};
use indexmap::IndexMap;
use std::collections::BTreeMap;

/// Generates the document for the given schemas, operations and metadata.
///
/// # Arguments
///
/// * `schemas` - Registered component schemas.
/// * `operations` - Operations in registration order.
/// * `info` - Title, version, description and servers.
///
/// # Errors
///
/// An `Aggregate` error listing every problem found.
pub fn generate(
    schemas: &SchemaRegistry,
    operations: &[OperationDescriptor],
    info: &DocumentInfo,
) -> AppResult<Document> {
    let mut problems = Problems::new();
    check_info(info, &mut problems);
    check_component_references(schemas, &mut problems);
    for op in operations {
        check_operation(op, &mut problems);
        check_operation_references(schemas, op, &mut problems);
    }
    check_unique_operations(operations, &mut problems);

    if !problems.is_empty() {
        tracing::debug!(count = problems.len(), "document generation rejected");
        return Err(AppError::Aggregate(problems));
    }

    let components = Components {
        schemas: schemas
            .definitions()
            .iter()
            .map(|(name, schema)| (name.clone(), schema.to_json_schema()))
            .collect(),
    };

    let mut paths: IndexMap<String, PathItem> = IndexMap::new();
    for op in operations {
        paths
            .entry(op.path.clone())
            .or_default()
            .set(op.method, build_operation(op));
    }

    tracing::info!(
        paths = paths.len(),
        operations = operations.len(),
        schemas = components.schemas.len(),
        "generated OpenAPI document"
    );

    Ok(Document {
        openapi: OPENAPI_VERSION.to_string(),
        info: Info {
            title: info.title.clone(),
            version: info.version.clone(),
            description: info.description.clone(),
        },
        servers: info.servers.clone(),
        paths,
        components,
    })
}

fn check_info(info: &DocumentInfo, problems: &mut Problems) {
    if info.title.trim().is_empty() {
        problems.push(AppError::Config("Document title must not be empty".into()));
    }
    if info.version.trim().is_empty() {
        problems.push(AppError::Config("Document version must not be empty".into()));
    }
    for server in &info.servers {
        if let Err(e) = check_server_url(&server.url) {
            problems.push(e);
        }
    }
}

fn check_component_references(schemas: &SchemaRegistry, problems: &mut Problems) {
    for (name, schema) in schemas.definitions() {
        push_unresolved(
            schemas,
            schema,
            &format!("components.schemas.{}", name),
            problems,
        );
    }
}

fn check_operation_references(
    schemas: &SchemaRegistry,
    op: &OperationDescriptor,
    problems: &mut Problems,
) {
    let label = op.label();
    for (location, schema) in op.schemas() {
        push_unresolved(schemas, schema, &format!("{} {}", label, location), problems);
    }
}

fn push_unresolved(
    schemas: &SchemaRegistry,
    schema: &Schema,
    location: &str,
    problems: &mut Problems,
) {
    for name in schema.references() {
        if !schemas.contains(name) {
            problems.push(AppError::Reference {
                schema: name.to_string(),
                location: location.to_string(),
            });
        }
    }
}

fn build_operation(op: &OperationDescriptor) -> Operation {
    let request_body = op.request_body.as_ref().map(|body| RequestBody {
        description: body.description.clone(),
        content: media_map(&body.content),
        required: body.required,
    });

    let responses: BTreeMap<String, Response> = op
        .responses
        .iter()
        .map(|(status, resp)| {
            (
                status.to_string(),
                Response {
                    description: resp.description.clone(),
                    content: media_map(&resp.content),
                },
            )
        })
        .collect();

    Operation {
        summary: op.summary.clone(),
        description: op.description.clone(),
        parameters: op.parameters.iter().map(build_parameter).collect(),
        request_body,
        responses,
    }
}

fn build_parameter(param: &ParameterDescriptor) -> Parameter {
    Parameter {
        name: param.name.clone(),
        location: param.location,
        required: param.required,
        schema: param.schema.to_json_schema(),
        description: param.description.clone(),
    }
}

fn media_map(content: &IndexMap<String, Schema>) -> IndexMap<String, MediaType> {
    content
        .iter()
        .map(|(media_type, schema)| {
            (
                media_type.clone(),
                MediaType {
                    schema: schema.to_json_schema(),
                },
            )
        })
        .collect()
}
