#![deny(missing_docs)]

//! # Operation Models
//!
//! Descriptors supplied by the routing layer: HTTP method, path template,
//! parameters, request body and responses. Schemas inside descriptors are
//! usually references to registered components.

use crate::error::AppError;
use crate::schema::Schema;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default media type for request and response bodies.
pub const JSON_MEDIA_TYPE: &str = "application/json";

/// Standard HTTP verbs accepted as operation methods.
///
/// Variant order is the canonical emission order within a path item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HttpMethod {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// PATCH
    Patch,
    /// DELETE
    Delete,
    /// HEAD
    Head,
    /// OPTIONS
    Options,
    /// TRACE
    Trace,
}

impl HttpMethod {
    /// Lowercase key used in the OpenAPI path item.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Patch => "patch",
            HttpMethod::Delete => "delete",
            HttpMethod::Head => "head",
            HttpMethod::Options => "options",
            HttpMethod::Trace => "trace",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str().to_ascii_uppercase())
    }
}

impl FromStr for HttpMethod {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "get" => Ok(HttpMethod::Get),
            "post" => Ok(HttpMethod::Post),
            "put" => Ok(HttpMethod::Put),
            "patch" => Ok(HttpMethod::Patch),
            "delete" => Ok(HttpMethod::Delete),
            "head" => Ok(HttpMethod::Head),
            "options" => Ok(HttpMethod::Options),
            "trace" => Ok(HttpMethod::Trace),
            _ => Err(AppError::Registration(format!(
                "'{}' is not a standard HTTP method",
                s
            ))),
        }
    }
}

/// The source location of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    /// URL Path parameter (e.g. /movies/{id})
    Path,
    /// URL Query parameter (e.g. /movies?name=x)
    Query,
    /// Request header.
    Header,
    /// Cookie value.
    Cookie,
}

impl fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ParameterLocation::Path => "path",
            ParameterLocation::Query => "query",
            ParameterLocation::Header => "header",
            ParameterLocation::Cookie => "cookie",
        };
        write!(f, "{}", s)
    }
}

/// A declared operation parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterDescriptor {
    /// Parameter name (matches the placeholder for path parameters).
    pub name: String,
    /// Where the parameter is read from.
    pub location: ParameterLocation,
    /// Whether the parameter must be supplied.
    pub required: bool,
    /// Value shape.
    pub schema: Schema,
    /// Optional description.
    pub description: Option<String>,
}

impl ParameterDescriptor {
    /// A required path parameter.
    pub fn path(name: impl Into<String>, schema: Schema) -> Self {
        Self {
            name: name.into(),
            location: ParameterLocation::Path,
            required: true,
            schema,
            description: None,
        }
    }

    /// An optional query parameter.
    pub fn query(name: impl Into<String>, schema: Schema) -> Self {
        Self {
            name: name.into(),
            location: ParameterLocation::Query,
            required: false,
            schema,
            description: None,
        }
    }

    /// A parameter at an arbitrary location.
    pub fn new(
        name: impl Into<String>,
        location: ParameterLocation,
        required: bool,
        schema: Schema,
    ) -> Self {
        Self {
            name: name.into(),
            location,
            required,
            schema,
            description: None,
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Overrides the required flag.
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }
}

/// A single response of an operation.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseDescriptor {
    /// Human readable description (required by OpenAPI).
    pub description: String,
    /// Media type -> body shape. Empty when the response carries no body.
    pub content: IndexMap<String, Schema>,
}

impl ResponseDescriptor {
    /// A response without a body.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            content: IndexMap::new(),
        }
    }

    /// Adds an `application/json` body.
    pub fn with_json(self, schema: Schema) -> Self {
        self.with_content(JSON_MEDIA_TYPE, schema)
    }

    /// Adds a body for an arbitrary media type.
    pub fn with_content(mut self, media_type: impl Into<String>, schema: Schema) -> Self {
        self.content.insert(media_type.into(), schema);
        self
    }
}

/// The request body of an operation.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestBodyDescriptor {
    /// Optional description.
    pub description: Option<String>,
    /// Whether a body must be sent.
    pub required: bool,
    /// Media type -> body shape.
    pub content: IndexMap<String, Schema>,
}

impl RequestBodyDescriptor {
    /// A required `application/json` body.
    pub fn json(schema: Schema) -> Self {
        let mut content = IndexMap::new();
        content.insert(JSON_MEDIA_TYPE.to_string(), schema);
        Self {
            description: None,
            required: true,
            content,
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Overrides the required flag.
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }
}

/// One HTTP operation (method + path template) and its contract.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationDescriptor {
    /// HTTP method.
    pub method: HttpMethod,
    /// Path template, e.g. `/movies/{id}`.
    pub path: String,
    /// Short summary.
    pub summary: Option<String>,
    /// Longer description.
    pub description: Option<String>,
    /// Declared parameters in declaration order.
    pub parameters: Vec<ParameterDescriptor>,
    /// Optional request body.
    pub request_body: Option<RequestBodyDescriptor>,
    /// Status code -> response, in declaration order.
    ///
    /// Kept as a list so duplicate codes can be detected and reported.
    pub responses: Vec<(u16, ResponseDescriptor)>,
}

impl OperationDescriptor {
    /// Creates an operation with no parameters, body or responses.
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            summary: None,
            description: None,
            parameters: Vec::new(),
            request_body: None,
            responses: Vec::new(),
        }
    }

    /// Shorthand for a GET operation.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    /// Shorthand for a POST operation.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    /// Shorthand for a PUT operation.
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, path)
    }

    /// Shorthand for a PATCH operation.
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Patch, path)
    }

    /// Shorthand for a DELETE operation.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    /// Sets the summary.
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Appends a parameter.
    pub fn with_parameter(mut self, parameter: ParameterDescriptor) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Sets the request body.
    pub fn with_request_body(mut self, body: RequestBodyDescriptor) -> Self {
        self.request_body = Some(body);
        self
    }

    /// Appends a response for `status`.
    pub fn with_response(mut self, status: u16, response: ResponseDescriptor) -> Self {
        self.responses.push((status, response));
        self
    }

    /// Identifies the operation in messages, e.g. `GET /movies/{id}`.
    pub fn label(&self) -> String {
        format!("{} {}", self.method, self.path)
    }

    /// Every schema carried by this operation, paired with where it sits.
    pub fn schemas(&self) -> Vec<(String, &Schema)> {
        let mut out = Vec::new();
        for param in &self.parameters {
            out.push((format!("parameters.{}", param.name), &param.schema));
        }
        if let Some(body) = &self.request_body {
            for (media_type, schema) in &body.content {
                out.push((format!("requestBody.{}", media_type), schema));
            }
        }
        for (status, response) in &self.responses {
            for (media_type, schema) in &response.content {
                out.push((format!("responses.{}.{}", status, media_type), schema));
            }
        }
        out
    }
}
