#![deny(missing_docs)]

//! # Contract Validation
//!
//! Invariant checks shared by the registries (eager, per registration) and the
//! generator (whole-contract, aggregated). Every check appends to a `Problems`
//! list instead of returning on the first failure.

use crate::error::{AppError, Problems};
use crate::models::{HttpMethod, OperationDescriptor, ParameterLocation};
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;
use url::Url;

const COMPONENT_KEY_PATTERN: &str = r"^[a-zA-Z0-9._-]+$";

static PLACEHOLDER_RE: OnceLock<Regex> = OnceLock::new();
static COMPONENT_KEY_RE: OnceLock<Regex> = OnceLock::new();

fn placeholder_re() -> &'static Regex {
    PLACEHOLDER_RE.get_or_init(|| Regex::new(r"\{([^}]*)}").expect("Invalid regex"))
}

/// Extracts `{name}` placeholders from a path template, in order of appearance.
pub fn path_placeholders(path: &str) -> Vec<String> {
    placeholder_re()
        .captures_iter(path)
        .map(|cap| cap[1].to_string())
        .collect()
}

/// Returns true when a `{` or `}` is left over once every `{name}` is removed.
pub fn has_stray_braces(path: &str) -> bool {
    let residue = placeholder_re().replace_all(path, "");
    residue.contains('{') || residue.contains('}')
}

/// Checks a component schema name against the OpenAPI component key rule.
pub fn check_component_name(name: &str) -> Result<(), AppError> {
    let re = COMPONENT_KEY_RE
        .get_or_init(|| Regex::new(COMPONENT_KEY_PATTERN).expect("Invalid regex"));
    if re.is_match(name) {
        Ok(())
    } else {
        Err(AppError::Registration(format!(
            "Schema name '{}' must match {}",
            name, COMPONENT_KEY_PATTERN
        )))
    }
}

/// Checks the path template, parameters and responses of a single operation.
///
/// Does not check schema references (they need the schema registry) nor
/// uniqueness across operations.
pub fn check_operation(op: &OperationDescriptor, problems: &mut Problems) {
    let label = op.label();

    if !op.path.starts_with('/') {
        problems.push(AppError::Registration(format!(
            "{}: path must start with '/'",
            label
        )));
    }

    check_placeholders(op, &label, problems);
    check_parameters(op, &label, problems);
    check_responses(op, &label, problems);

    for (location, schema) in op.schemas() {
        for msg in schema.shape_problems(&format!("{} {}", label, location)) {
            problems.push(AppError::Structural(msg));
        }
    }
}

fn check_placeholders(op: &OperationDescriptor, label: &str, problems: &mut Problems) {
    if has_stray_braces(&op.path) {
        problems.push(AppError::Structural(format!(
            "{}: path has an unbalanced '{{' or '}}'",
            label
        )));
    }

    let placeholders = path_placeholders(&op.path);
    let mut unique: Vec<&str> = Vec::new();
    for name in &placeholders {
        if name.is_empty() {
            problems.push(AppError::Structural(format!(
                "{}: path contains an empty placeholder '{{}}'",
                label
            )));
        } else if unique.contains(&name.as_str()) {
            problems.push(AppError::Structural(format!(
                "{}: placeholder '{{{}}}' appears more than once",
                label, name
            )));
        } else {
            unique.push(name);
        }
    }

    let declared: Vec<&str> = op
        .parameters
        .iter()
        .filter(|p| p.location == ParameterLocation::Path)
        .map(|p| p.name.as_str())
        .collect();

    for name in &unique {
        if !declared.contains(name) {
            problems.push(AppError::Structural(format!(
                "{}: placeholder '{{{}}}' has no declared path parameter",
                label, name
            )));
        }
    }
    for name in &declared {
        if !unique.contains(name) {
            problems.push(AppError::Structural(format!(
                "{}: path parameter '{}' has no matching placeholder",
                label, name
            )));
        }
    }
}

fn check_parameters(op: &OperationDescriptor, label: &str, problems: &mut Problems) {
    let mut seen = HashSet::new();
    for param in &op.parameters {
        if param.name.is_empty() {
            problems.push(AppError::Structural(format!(
                "{}: {} parameter has an empty name",
                label, param.location
            )));
            continue;
        }
        if !seen.insert((param.name.as_str(), param.location)) {
            problems.push(AppError::Structural(format!(
                "{}: {} parameter '{}' is declared more than once",
                label, param.location, param.name
            )));
        }
        if param.location == ParameterLocation::Path && !param.required {
            problems.push(AppError::Structural(format!(
                "{}: path parameter '{}' must be required",
                label, param.name
            )));
        }
    }
}

fn check_responses(op: &OperationDescriptor, label: &str, problems: &mut Problems) {
    if op.responses.is_empty() {
        problems.push(AppError::Structural(format!(
            "{}: operation must define at least one response",
            label
        )));
    }

    let mut seen = HashSet::new();
    for (status, _) in &op.responses {
        if !(100..=599).contains(status) {
            problems.push(AppError::Structural(format!(
                "{}: '{}' is not a valid HTTP status code",
                label, status
            )));
        } else if !seen.insert(*status) {
            problems.push(AppError::Structural(format!(
                "{}: response {} is declared more than once",
                label, status
            )));
        }
    }
}

/// Reports every (method, path) pair declared by more than one operation.
pub fn check_unique_operations(operations: &[OperationDescriptor], problems: &mut Problems) {
    let mut counts: HashMap<(HttpMethod, &str), usize> = HashMap::new();
    for op in operations {
        let count = counts.entry((op.method, op.path.as_str())).or_insert(0);
        *count += 1;
        if *count == 2 {
            problems.push(AppError::Structural(format!(
                "{}: operation is registered more than once",
                op.label()
            )));
        }
    }
}

/// Checks a server URL: no query or fragment, absolute URL or `/`-relative reference.
pub fn check_server_url(url: &str) -> Result<(), AppError> {
    if url.contains('?') || url.contains('#') {
        return Err(AppError::Config(format!(
            "Server URL '{}' must not include a query or fragment",
            url
        )));
    }
    if url.starts_with('/') || Url::parse(url).is_ok() {
        return Ok(());
    }
    Err(AppError::Config(format!(
        "Server URL '{}' is neither an absolute URL nor a '/'-relative reference",
        url
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ParameterDescriptor, ResponseDescriptor};
    use crate::schema::Schema;

    fn ok() -> ResponseDescriptor {
        ResponseDescriptor::new("ok")
    }

    fn problems_for(op: &OperationDescriptor) -> Vec<String> {
        let mut problems = Problems::new();
        check_operation(op, &mut problems);
        problems.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn test_placeholders_extracted_in_order() {
        assert_eq!(
            path_placeholders("/movies/{id}/cast/{castId}"),
            vec!["id", "castId"]
        );
        assert!(path_placeholders("/movies").is_empty());
    }

    #[test]
    fn test_stray_braces_detected() {
        assert!(has_stray_braces("/movies/{id"));
        assert!(has_stray_braces("/movies/id}"));
        assert!(has_stray_braces("/movies/{{id}}"));
        assert!(!has_stray_braces("/movies/{id}/cast/{castId}"));
        assert!(!has_stray_braces("/movies"));
    }

    #[test]
    fn test_unbalanced_placeholder_is_structural() {
        let op = OperationDescriptor::get("/movies/{id")
            .with_parameter(ParameterDescriptor::path("id", Schema::string()))
            .with_response(200, ok());
        let problems = problems_for(&op);
        assert_eq!(problems.len(), 2);
        assert!(problems[0].starts_with("Structural Error"));
        assert!(problems[0].contains("unbalanced '{' or '}'"));
        assert!(problems[1].contains("path parameter 'id' has no matching placeholder"));
    }

    #[test]
    fn test_consistent_operation_has_no_problems() {
        let op = OperationDescriptor::get("/movies/{id}")
            .with_parameter(ParameterDescriptor::path("id", Schema::string()))
            .with_parameter(ParameterDescriptor::query("fields", Schema::string()))
            .with_response(200, ok());
        assert!(problems_for(&op).is_empty());
    }

    #[test]
    fn test_missing_path_parameter() {
        let op = OperationDescriptor::get("/movies/{id}").with_response(200, ok());
        let problems = problems_for(&op);
        assert_eq!(problems.len(), 1);
        assert!(problems[0].starts_with("Structural Error"));
        assert!(problems[0].contains("placeholder '{id}' has no declared path parameter"));
    }

    #[test]
    fn test_undeclared_placeholder_for_parameter() {
        let op = OperationDescriptor::get("/movies")
            .with_parameter(ParameterDescriptor::path("id", Schema::string()))
            .with_response(200, ok());
        let problems = problems_for(&op);
        assert_eq!(problems.len(), 1);
        assert!(problems[0].contains("path parameter 'id' has no matching placeholder"));
    }

    #[test]
    fn test_query_parameter_does_not_satisfy_placeholder() {
        let op = OperationDescriptor::get("/movies/{id}")
            .with_parameter(ParameterDescriptor::query("id", Schema::string()))
            .with_response(200, ok());
        let problems = problems_for(&op);
        assert_eq!(problems.len(), 1);
        assert!(problems[0].contains("no declared path parameter"));
    }

    #[test]
    fn test_all_problems_reported_together() {
        let op = OperationDescriptor::get("movies/{id}/{id}")
            .with_parameter(ParameterDescriptor::path("id", Schema::string()).with_required(false))
            .with_parameter(ParameterDescriptor::path("id", Schema::string()))
            .with_response(200, ok())
            .with_response(200, ok())
            .with_response(999, ok());
        let problems = problems_for(&op);

        assert!(problems.iter().any(|p| p.contains("must start with '/'")));
        assert!(problems.iter().any(|p| p.contains("appears more than once")));
        assert!(problems.iter().any(|p| p.contains("declared more than once")));
        assert!(problems.iter().any(|p| p.contains("must be required")));
        assert!(problems.iter().any(|p| p.contains("response 200 is declared more than once")));
        assert!(problems.iter().any(|p| p.contains("'999' is not a valid HTTP status code")));
    }

    #[test]
    fn test_operation_without_responses() {
        let op = OperationDescriptor::delete("/movies");
        let problems = problems_for(&op);
        assert_eq!(problems.len(), 1);
        assert!(problems[0].contains("at least one response"));
    }

    #[test]
    fn test_inline_shape_problems_are_structural() {
        let op = OperationDescriptor::get("/")
            .with_response(200, ok().with_json(Schema::any_of(vec![])));
        let problems = problems_for(&op);
        assert_eq!(problems.len(), 1);
        assert!(problems[0].starts_with("Structural Error: GET / responses.200.application/json"));
    }

    #[test]
    fn test_duplicate_operations_reported_once() {
        let ops = vec![
            OperationDescriptor::get("/movies").with_response(200, ok()),
            OperationDescriptor::get("/movies").with_response(200, ok()),
            OperationDescriptor::get("/movies").with_response(200, ok()),
            OperationDescriptor::post("/movies").with_response(200, ok()),
        ];
        let mut problems = Problems::new();
        check_unique_operations(&ops, &mut problems);
        assert_eq!(problems.len(), 1);
        assert!(problems.iter().next().unwrap().to_string().contains("GET /movies"));
    }

    #[test]
    fn test_component_names() {
        assert!(check_component_name("Movie").is_ok());
        assert!(check_component_name("movie.v2_response-x").is_ok());
        assert!(check_component_name("").is_err());
        assert!(check_component_name("Movie Response").is_err());
    }

    #[test]
    fn test_server_urls() {
        assert!(check_server_url("http://localhost:3001").is_ok());
        assert!(check_server_url("https://movies-api.example.com").is_ok());
        assert!(check_server_url("/api/v1").is_ok());
        assert!(check_server_url("https://example.com/?debug=1").is_err());
        assert!(check_server_url("not a url").is_err());
    }
}
