#![deny(missing_docs)]

//! # Schema Registry
//!
//! Named structural schemas, kept in registration order so the generated
//! `components.schemas` section is reproducible.

use crate::error::{AppError, AppResult, Problems};
use crate::schema::Schema;
use crate::validation::check_component_name;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// What happens when a schema name is registered twice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Last write wins; the earlier definition is replaced in place.
    #[default]
    Replace,
    /// The second registration fails with a registration error.
    Reject,
}

/// Registry of named component schemas.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    policy: DuplicatePolicy,
    definitions: IndexMap<String, Schema>,
}

impl SchemaRegistry {
    /// Creates an empty registry with the default (`Replace`) policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty registry with an explicit duplicate policy.
    pub fn with_policy(policy: DuplicatePolicy) -> Self {
        Self {
            policy,
            definitions: IndexMap::new(),
        }
    }

    /// The duplicate policy in effect.
    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    /// Stores `schema` under `name`.
    ///
    /// Rejects, with every problem found, a name that is not a valid component
    /// key, a malformed shape, and an existing name under `DuplicatePolicy::Reject`.
    /// Under `Replace` a re-registration keeps the original position.
    pub fn register(&mut self, name: impl Into<String>, schema: Schema) -> AppResult<()> {
        let name = name.into();
        let mut problems = Problems::new();

        if let Err(e) = check_component_name(&name) {
            problems.push(e);
        }
        for msg in schema.shape_problems(&name) {
            problems.push(AppError::Registration(msg));
        }
        if self.policy == DuplicatePolicy::Reject && self.definitions.contains_key(&name) {
            problems.push(AppError::Registration(format!(
                "Schema '{}' is already registered",
                name
            )));
        }
        problems.into_result()?;

        if self.definitions.contains_key(&name) {
            tracing::warn!(schema = %name, "replacing previously registered schema");
        } else {
            tracing::debug!(schema = %name, "registered schema");
        }

        self.definitions.insert(name, schema);
        Ok(())
    }

    /// Looks up a schema by name.
    pub fn get(&self, name: &str) -> Option<&Schema> {
        self.definitions.get(name)
    }

    /// Returns true if `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }

    /// All definitions in registration order.
    pub fn definitions(&self) -> &IndexMap<String, Schema> {
        &self.definitions
    }

    /// Number of registered schemas.
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Returns true when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Field;

    #[test]
    fn test_definitions_keep_registration_order() {
        let mut registry = SchemaRegistry::new();
        registry.register("Zeta", Schema::string()).unwrap();
        registry.register("Alpha", Schema::integer()).unwrap();
        registry.register("Movie", Schema::boolean()).unwrap();

        let names: Vec<&String> = registry.definitions().keys().collect();
        assert_eq!(names, vec!["Zeta", "Alpha", "Movie"]);
    }

    #[test]
    fn test_reregistration_replaces_in_place() {
        let mut registry = SchemaRegistry::new();
        registry.register("Movie", Schema::string()).unwrap();
        registry.register("NotFound", Schema::string()).unwrap();
        registry.register("Movie", Schema::integer()).unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("Movie"), Some(&Schema::integer()));
        assert_eq!(registry.definitions().get_index_of("Movie"), Some(0));
    }

    #[test]
    fn test_reject_policy_refuses_duplicates() {
        let mut registry = SchemaRegistry::with_policy(DuplicatePolicy::Reject);
        registry.register("Movie", Schema::string()).unwrap();
        let err = registry.register("Movie", Schema::integer()).unwrap_err();

        let problems = err.problems();
        assert_eq!(problems.len(), 1);
        assert!(matches!(problems[0], AppError::Registration(msg) if msg.contains("already registered")));
        assert_eq!(registry.get("Movie"), Some(&Schema::string()));
    }

    #[test]
    fn test_invalid_name_rejected() {
        let mut registry = SchemaRegistry::new();
        assert!(registry.register("Movie Response", Schema::string()).is_err());
        assert!(registry.register("", Schema::string()).is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_malformed_shape_rejected() {
        let mut registry = SchemaRegistry::new();
        let broken = Schema::object(vec![
            Field::required("id", Schema::string()),
            Field::required("id", Schema::string()),
        ]);
        let err = registry.register("Broken", broken).unwrap_err();
        assert!(err
            .problems()
            .iter()
            .any(|p| matches!(p, AppError::Registration(msg) if msg.contains("'id' more than once"))));
        assert!(!registry.contains("Broken"));
    }

    #[test]
    fn test_every_registration_problem_reported() {
        let mut registry = SchemaRegistry::with_policy(DuplicatePolicy::Reject);
        registry.register("Movie", Schema::string()).unwrap();

        let broken = Schema::object(vec![
            Field::required("a", Schema::string()),
            Field::optional("a", Schema::integer()),
        ]);
        let err = registry.register("Bad Name", broken.clone()).unwrap_err();
        let problems = err.problems();
        assert_eq!(problems.len(), 2);
        assert!(problems[0].to_string().contains("'Bad Name' must match"));
        assert!(problems[1].to_string().contains("field 'a' more than once"));

        let err = registry.register("Movie", broken).unwrap_err();
        assert_eq!(err.problems().len(), 2);
        assert_eq!(registry.get("Movie"), Some(&Schema::string()));
    }
}
