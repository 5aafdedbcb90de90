#![deny(missing_docs)]

//! # OpenAPI Document
//!
//! The immutable object graph produced by the generator. Field order in these
//! structs is the emission order in JSON and YAML, which keeps the artifacts
//! diff-stable. Schemas are held in their rendered JSON Schema form.

use crate::models::{HttpMethod, ParameterLocation};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// OpenAPI version emitted in every document.
pub const OPENAPI_VERSION: &str = "3.1.0";

/// Metadata supplied by configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentInfo {
    /// API title.
    pub title: String,
    /// API version (not the OpenAPI version).
    pub version: String,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Servers hosting the API.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub servers: Vec<Server>,
}

impl DocumentInfo {
    /// Creates metadata with the required fields.
    pub fn new(title: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            version: version.into(),
            description: None,
            servers: Vec::new(),
        }
    }

    /// Sets an optional description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adds a server definition.
    pub fn with_server(mut self, server: Server) -> Self {
        self.servers.push(server);
        self
    }
}

/// The generated OpenAPI document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// OpenAPI version, always [`OPENAPI_VERSION`].
    pub openapi: String,
    /// Info object.
    pub info: Info,
    /// Server list.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub servers: Vec<Server>,
    /// Path template -> path item, in registration order.
    pub paths: IndexMap<String, PathItem>,
    /// Reusable components.
    pub components: Components,
}

impl Document {
    /// Looks up the operation for `method` on `path`.
    pub fn operation(&self, path: &str, method: HttpMethod) -> Option<&Operation> {
        self.paths.get(path).and_then(|item| item.operation(method))
    }
}

/// The OpenAPI Info object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Info {
    /// API title.
    pub title: String,
    /// API version.
    pub version: String,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A server entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Server {
    /// Server URL (absolute, or relative to the document location).
    pub url: String,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Server {
    /// Creates a server with the required URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            description: None,
        }
    }

    /// Sets the server description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Operations available on one path template.
///
/// Fields are declared in canonical method order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathItem {
    /// GET operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub get: Option<Operation>,
    /// POST operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post: Option<Operation>,
    /// PUT operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub put: Option<Operation>,
    /// PATCH operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patch: Option<Operation>,
    /// DELETE operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete: Option<Operation>,
    /// HEAD operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head: Option<Operation>,
    /// OPTIONS operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Operation>,
    /// TRACE operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace: Option<Operation>,
}

impl PathItem {
    fn slot(&self, method: HttpMethod) -> &Option<Operation> {
        match method {
            HttpMethod::Get => &self.get,
            HttpMethod::Post => &self.post,
            HttpMethod::Put => &self.put,
            HttpMethod::Patch => &self.patch,
            HttpMethod::Delete => &self.delete,
            HttpMethod::Head => &self.head,
            HttpMethod::Options => &self.options,
            HttpMethod::Trace => &self.trace,
        }
    }

    fn slot_mut(&mut self, method: HttpMethod) -> &mut Option<Operation> {
        match method {
            HttpMethod::Get => &mut self.get,
            HttpMethod::Post => &mut self.post,
            HttpMethod::Put => &mut self.put,
            HttpMethod::Patch => &mut self.patch,
            HttpMethod::Delete => &mut self.delete,
            HttpMethod::Head => &mut self.head,
            HttpMethod::Options => &mut self.options,
            HttpMethod::Trace => &mut self.trace,
        }
    }

    /// The operation for `method`, if any.
    pub fn operation(&self, method: HttpMethod) -> Option<&Operation> {
        self.slot(method).as_ref()
    }

    /// Stores `operation` under `method`, returning the previous one.
    pub(crate) fn set(&mut self, method: HttpMethod, operation: Operation) -> Option<Operation> {
        self.slot_mut(method).replace(operation)
    }

    /// Methods present on this path, in canonical order.
    pub fn methods(&self) -> Vec<HttpMethod> {
        [
            HttpMethod::Get,
            HttpMethod::Post,
            HttpMethod::Put,
            HttpMethod::Patch,
            HttpMethod::Delete,
            HttpMethod::Head,
            HttpMethod::Options,
            HttpMethod::Trace,
        ]
        .into_iter()
        .filter(|m| self.slot(*m).is_some())
        .collect()
    }
}

/// An operation object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    /// Short summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Longer description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Parameters in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
    /// Request body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBody>,
    /// Status code (as string) -> response, in ascending code order.
    pub responses: BTreeMap<String, Response>,
}

/// A parameter object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name.
    pub name: String,
    /// Parameter location.
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    /// Whether the parameter is required.
    pub required: bool,
    /// Value schema.
    pub schema: Value,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A request body object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestBody {
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Media type -> media object.
    pub content: IndexMap<String, MediaType>,
    /// Whether the body is required.
    pub required: bool,
}

/// A response object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// Response description.
    pub description: String,
    /// Media type -> media object; absent when the response has no body.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub content: IndexMap<String, MediaType>,
}

/// A media type object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaType {
    /// Body schema (usually a component reference).
    pub schema: Value,
}

/// The components object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Components {
    /// Component name -> JSON Schema, in registration order.
    #[serde(default)]
    pub schemas: IndexMap<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn op(summary: &str) -> Operation {
        Operation {
            summary: Some(summary.into()),
            description: None,
            parameters: Vec::new(),
            request_body: None,
            responses: BTreeMap::new(),
        }
    }

    #[test]
    fn test_path_item_serializes_methods_in_canonical_order() {
        let mut item = PathItem::default();
        item.set(HttpMethod::Delete, op("d"));
        item.set(HttpMethod::Get, op("g"));
        item.set(HttpMethod::Put, op("p"));

        let value = serde_json::to_value(&item).unwrap();
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["get", "put", "delete"]);
        assert_eq!(
            item.methods(),
            vec![HttpMethod::Get, HttpMethod::Put, HttpMethod::Delete]
        );
    }

    #[test]
    fn test_set_returns_previous_operation() {
        let mut item = PathItem::default();
        assert!(item.set(HttpMethod::Get, op("first")).is_none());
        let previous = item.set(HttpMethod::Get, op("second")).unwrap();
        assert_eq!(previous.summary.as_deref(), Some("first"));
    }

    #[test]
    fn test_bodyless_response_omits_content() {
        let resp = Response {
            description: "Unexpected error occurred".into(),
            content: IndexMap::new(),
        };
        assert_eq!(
            serde_json::to_value(&resp).unwrap(),
            json!({ "description": "Unexpected error occurred" })
        );
    }

    #[test]
    fn test_parameter_uses_in_keyword() {
        let param = Parameter {
            name: "id".into(),
            location: ParameterLocation::Path,
            required: true,
            schema: json!({ "type": "string" }),
            description: Some("Movie ID".into()),
        };
        assert_eq!(
            serde_json::to_value(&param).unwrap(),
            json!({
                "name": "id",
                "in": "path",
                "required": true,
                "schema": { "type": "string" },
                "description": "Movie ID"
            })
        );
    }

    #[test]
    fn test_document_info_deserializes_from_yaml() {
        let yaml = r#"
title: Movies API
version: 0.0.1
servers:
  - url: http://localhost:3001
    description: Local development server
"#;
        let info: DocumentInfo = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(info.title, "Movies API");
        assert_eq!(info.version, "0.0.1");
        assert_eq!(info.description, None);
        assert_eq!(
            info.servers,
            vec![Server::new("http://localhost:3001").with_description("Local development server")]
        );
    }
}
