//! JSON Schema generation and validation for repository configuration documents.
//!
//! The schema is derived from the [`TypeDescriptor`]s of the declarative model
//! and then augmented with cross-field rules that the field descriptors alone
//! cannot express:
//!
//! - merge commit title/message values depend on the matching `allow_*` flag,
//! - a ruleset may not restrict both branch names and tag names,
//! - a `legacy` Pages site must name its source branch.
//!
//! The output is a JSON Schema draft 2020-12 document. The root type is
//! inlined; every nested type is emitted once under `$defs` and referenced
//! with `$ref`. Every object is closed with `additionalProperties: false`.
//! Keys are sorted, so building twice yields byte-identical output.
//!
//! # Examples
//!
//! ```rust
//! use config_manager::schema::build_repository_schema;
//! use serde_json::json;
//!
//! let schema = build_repository_schema().unwrap();
//! let validator = schema.compile().unwrap();
//!
//! let document = json!({"visibility": "public", "default_branch": "main"});
//! assert!(validator.validate(&document).is_valid());
//! ```

use crate::descriptor::{Describe, FieldDescriptor, FieldKind, SettingEnum, TypeDescriptor};
use crate::errors::SchemaBuildError;
use crate::settings::{
    MergeCommitMessage, MergeCommitTitle, PagesBuildType, Repository, SquashMergeCommitMessage,
    SquashMergeCommitTitle,
};
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use tracing::debug;

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;

/// Meta-schema URI of JSON Schema draft 2020-12.
pub const DRAFT_2020_12: &str = "https://json-schema.org/draft/2020-12/schema";

/// Default `$id` of the repository configuration schema.
pub const DEFAULT_SCHEMA_ID: &str =
    "https://raw.githubusercontent.com/G-Research/github-terraformer/refs/heads/main/.schemas/repository-config.schema.json";

/// Default title of the repository configuration schema.
pub const DEFAULT_SCHEMA_TITLE: &str = "Repository Configuration";

/// A cross-field constraint added to the generated schema.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaRule {
    /// When `when_field` equals `equals`, each listed field may only take one
    /// of the listed values.
    ConditionalEnum {
        type_name: String,
        when_field: String,
        equals: Value,
        then_enums: Vec<(String, Vec<String>)>,
    },

    /// When `when_field` is present and equals `equals`, the listed fields
    /// are required.
    ConditionalRequired {
        type_name: String,
        when_field: String,
        equals: Value,
        then_required: Vec<String>,
    },

    /// The listed fields may not all be present at once.
    MutuallyExclusive {
        type_name: String,
        fields: Vec<String>,
    },
}

impl SchemaRule {
    fn type_name(&self) -> &str {
        match self {
            SchemaRule::ConditionalEnum { type_name, .. }
            | SchemaRule::ConditionalRequired { type_name, .. }
            | SchemaRule::MutuallyExclusive { type_name, .. } => type_name,
        }
    }

    fn referenced_fields(&self) -> Vec<&str> {
        match self {
            SchemaRule::ConditionalEnum {
                when_field,
                then_enums,
                ..
            } => std::iter::once(when_field.as_str())
                .chain(then_enums.iter().map(|(f, _)| f.as_str()))
                .collect(),
            SchemaRule::ConditionalRequired {
                when_field,
                then_required,
                ..
            } => std::iter::once(when_field.as_str())
                .chain(then_required.iter().map(String::as_str))
                .collect(),
            SchemaRule::MutuallyExclusive { fields, .. } => {
                fields.iter().map(String::as_str).collect()
            }
        }
    }

    fn apply(&self, target: &mut Map<String, Value>) {
        match self {
            SchemaRule::ConditionalEnum {
                when_field,
                equals,
                then_enums,
                ..
            } => {
                let mut then_properties = Map::new();
                for (field, values) in then_enums {
                    then_properties.insert(field.clone(), json!({ "enum": values }));
                }
                push_all_of(
                    target,
                    json!({
                        "if": {
                            "properties": { when_field.as_str(): { "const": equals } },
                            "required": [when_field]
                        },
                        "then": { "properties": then_properties }
                    }),
                );
            }
            SchemaRule::ConditionalRequired {
                when_field,
                equals,
                then_required,
                ..
            } => {
                push_all_of(
                    target,
                    json!({
                        "if": {
                            "properties": { when_field.as_str(): { "const": equals } },
                            "required": [when_field]
                        },
                        "then": { "required": then_required }
                    }),
                );
            }
            SchemaRule::MutuallyExclusive { fields, .. } => {
                let not = json!({ "required": fields });
                if target.contains_key("not") {
                    push_all_of(target, json!({ "not": not }));
                } else {
                    target.insert("not".to_string(), not);
                }
            }
        }
    }
}

fn push_all_of(target: &mut Map<String, Value>, schema: Value) {
    match target
        .entry("allOf")
        .or_insert_with(|| Value::Array(Vec::new()))
    {
        Value::Array(items) => items.push(schema),
        other => *other = Value::Array(vec![schema]),
    }
}

/// The cross-field rules of the repository configuration schema.
pub fn default_rules() -> Vec<SchemaRule> {
    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    vec![
        SchemaRule::ConditionalEnum {
            type_name: "Repository".to_string(),
            when_field: "allow_squash_merge".to_string(),
            equals: Value::Bool(true),
            then_enums: vec![
                (
                    "squash_merge_commit_title".to_string(),
                    strings(SquashMergeCommitTitle::VALUES),
                ),
                (
                    "squash_merge_commit_message".to_string(),
                    strings(SquashMergeCommitMessage::VALUES),
                ),
            ],
        },
        SchemaRule::ConditionalEnum {
            type_name: "Repository".to_string(),
            when_field: "allow_merge_commit".to_string(),
            equals: Value::Bool(true),
            then_enums: vec![
                (
                    "merge_commit_title".to_string(),
                    strings(MergeCommitTitle::VALUES),
                ),
                (
                    "merge_commit_message".to_string(),
                    strings(MergeCommitMessage::VALUES),
                ),
            ],
        },
        SchemaRule::MutuallyExclusive {
            type_name: "Rule".to_string(),
            fields: strings(&["branch_name_pattern", "tag_name_pattern"]),
        },
        SchemaRule::ConditionalRequired {
            type_name: "Pages".to_string(),
            when_field: "build_type".to_string(),
            equals: Value::String(PagesBuildType::Legacy.as_str().to_string()),
            then_required: strings(&["branch"]),
        },
    ]
}

/// Builds a JSON Schema document from a root type descriptor.
#[derive(Debug, Clone)]
pub struct SchemaBuilder {
    id: String,
    title: String,
    rules: Vec<SchemaRule>,
}

impl Default for SchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaBuilder {
    /// Creates a builder with the default `$id` and title and no rules.
    pub fn new() -> Self {
        Self {
            id: DEFAULT_SCHEMA_ID.to_string(),
            title: DEFAULT_SCHEMA_TITLE.to_string(),
            rules: Vec::new(),
        }
    }

    /// Creates a builder carrying the repository configuration rules.
    pub fn with_default_rules() -> Self {
        Self {
            rules: default_rules(),
            ..Self::new()
        }
    }

    /// Sets the `$id` of the generated schema.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Sets the title of the generated schema.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Adds a cross-field rule.
    pub fn rule(mut self, rule: SchemaRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Builds the schema for `root` and every type reachable from it.
    ///
    /// # Errors
    ///
    /// * `SchemaBuildError::UnknownType` if a rule targets a type that is not
    ///   part of the schema
    /// * `SchemaBuildError::UnknownField` if a rule names a field the target
    ///   type does not declare
    pub fn build(&self, root: &TypeDescriptor) -> Result<SchemaDocument, SchemaBuildError> {
        let mut nested: BTreeMap<&'static str, TypeDescriptor> = BTreeMap::new();
        collect_nested_types(root, &mut nested);

        let mut root_schema = object_schema(root);
        let mut defs: BTreeMap<&'static str, Map<String, Value>> = nested
            .iter()
            .map(|(name, descriptor)| (*name, object_schema(descriptor)))
            .collect();

        for rule in &self.rules {
            let type_name = rule.type_name();
            let (descriptor, target) = if type_name == root.name {
                (root, &mut root_schema)
            } else {
                match (nested.get(type_name), defs.get_mut(type_name)) {
                    (Some(descriptor), Some(target)) => (descriptor, target),
                    _ => {
                        return Err(SchemaBuildError::UnknownType {
                            type_name: type_name.to_string(),
                        })
                    }
                }
            };

            for field in rule.referenced_fields() {
                if descriptor.field(field).is_none() {
                    return Err(SchemaBuildError::UnknownField {
                        type_name: type_name.to_string(),
                        field: field.to_string(),
                    });
                }
            }

            rule.apply(target);
        }

        let mut document = root_schema;
        document.insert("$schema".to_string(), json!(DRAFT_2020_12));
        document.insert("$id".to_string(), json!(self.id));
        document.insert("title".to_string(), json!(self.title));
        if !defs.is_empty() {
            let defs: Map<String, Value> = defs
                .into_iter()
                .map(|(name, schema)| (name.to_string(), Value::Object(schema)))
                .collect();
            document.insert("$defs".to_string(), Value::Object(defs));
        }

        debug!(
            root = root.name,
            definitions = nested.len(),
            rules = self.rules.len(),
            "Built configuration schema"
        );

        Ok(SchemaDocument {
            value: Value::Object(document),
        })
    }
}

/// Builds the repository configuration schema with the default `$id`, title
/// and rules.
pub fn build_repository_schema() -> Result<SchemaDocument, SchemaBuildError> {
    SchemaBuilder::with_default_rules().build(&Repository::describe())
}

fn collect_nested_types(
    descriptor: &TypeDescriptor,
    out: &mut BTreeMap<&'static str, TypeDescriptor>,
) {
    for field in &descriptor.fields {
        let describe = match field.kind {
            FieldKind::Object(describe) => describe,
            FieldKind::ObjectList { item, .. } => item,
            _ => continue,
        };

        let nested = describe();
        if nested.name == descriptor.name || out.contains_key(nested.name) {
            continue;
        }
        out.insert(nested.name, nested.clone());
        collect_nested_types(&nested, out);
    }
}

fn object_schema(descriptor: &TypeDescriptor) -> Map<String, Value> {
    let properties: Map<String, Value> = descriptor
        .fields
        .iter()
        .map(|field| (field.name.to_string(), field_schema(field)))
        .collect();

    let mut schema = Map::new();
    schema.insert("type".to_string(), json!("object"));
    schema.insert("properties".to_string(), Value::Object(properties));
    let required = descriptor.required_fields();
    if !required.is_empty() {
        schema.insert("required".to_string(), json!(required));
    }
    schema.insert("additionalProperties".to_string(), Value::Bool(false));
    if let Some(description) = descriptor.description {
        schema.insert("description".to_string(), json!(description));
    }
    schema
}

fn field_schema(field: &FieldDescriptor) -> Value {
    let mut schema = match &field.kind {
        FieldKind::String => json!({ "type": "string" }),
        FieldKind::Boolean => json!({ "type": "boolean" }),
        FieldKind::Integer { min, max } => {
            let mut schema = json!({ "type": "integer" });
            if let Some(min) = min {
                schema["minimum"] = json!(min);
            }
            if let Some(max) = max {
                schema["maximum"] = json!(max);
            }
            schema
        }
        FieldKind::Enum(values) => json!({ "type": "string", "enum": values }),
        FieldKind::StringList { min_items } => {
            with_min_items(json!({ "type": "array", "items": { "type": "string" } }), *min_items)
        }
        FieldKind::Object(describe) => json!({ "$ref": definition_ref(describe().name) }),
        FieldKind::ObjectList { item, min_items } => with_min_items(
            json!({ "type": "array", "items": { "$ref": definition_ref(item().name) } }),
            *min_items,
        ),
    };

    if let Some(description) = field.description {
        schema["description"] = json!(description);
    }
    schema
}

fn with_min_items(mut schema: Value, min_items: Option<u64>) -> Value {
    if let Some(min_items) = min_items {
        schema["minItems"] = json!(min_items);
    }
    schema
}

fn definition_ref(name: &str) -> String {
    format!("#/$defs/{}", name)
}

/// A generated JSON Schema document.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaDocument {
    value: Value,
}

impl SchemaDocument {
    /// Returns the schema as a JSON value.
    pub fn as_value(&self) -> &Value {
        &self.value
    }

    /// Renders the schema as indented JSON.
    pub fn to_pretty_json(&self) -> Result<String, SchemaBuildError> {
        serde_json::to_string_pretty(&self.value).map_err(|e| SchemaBuildError::Serialization {
            message: e.to_string(),
        })
    }

    /// Compiles the schema into a reusable validator.
    ///
    /// # Errors
    ///
    /// Returns `SchemaBuildError::Compilation` if the document is not a valid
    /// JSON Schema.
    pub fn compile(&self) -> Result<SchemaValidator, SchemaBuildError> {
        let validator =
            jsonschema::validator_for(&self.value).map_err(|e| SchemaBuildError::Compilation {
                message: e.to_string(),
            })?;
        Ok(SchemaValidator { validator })
    }

    /// Validates a single document against the schema.
    pub fn validate(&self, instance: &Value) -> Result<ValidationResult, SchemaBuildError> {
        Ok(self.compile()?.validate(instance))
    }
}

/// A compiled schema, ready to validate documents.
pub struct SchemaValidator {
    validator: jsonschema::Validator,
}

impl std::fmt::Debug for SchemaValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaValidator").finish_non_exhaustive()
    }
}

impl SchemaValidator {
    /// Validates a document and collects every violation.
    pub fn validate(&self, instance: &Value) -> ValidationResult {
        let mut result = ValidationResult::new();
        for error in self.validator.iter_errors(instance) {
            result.add_issue(ValidationIssue::new(
                error.instance_path().to_string(),
                error.to_string(),
            ));
        }
        result
    }

    /// Returns whether the document satisfies the schema.
    pub fn is_valid(&self, instance: &Value) -> bool {
        self.validator.is_valid(instance)
    }
}

/// A single schema violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// JSON pointer to the offending value in the document
    instance_path: String,
    /// Human-readable description of the violation
    message: String,
}

impl ValidationIssue {
    pub fn new(instance_path: String, message: String) -> Self {
        Self {
            instance_path,
            message,
        }
    }

    /// Returns the location of the offending value; empty for the document root.
    pub fn instance_path(&self) -> &str {
        &self.instance_path
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let location = if self.instance_path.is_empty() {
            "/"
        } else {
            self.instance_path.as_str()
        };
        write!(f, "{}: {}", location, self.message)
    }
}

/// Result of validating a document against the schema.
///
/// # Examples
///
/// ```rust
/// use config_manager::schema::{ValidationIssue, ValidationResult};
///
/// let mut result = ValidationResult::new();
/// assert!(result.is_valid());
///
/// result.add_issue(ValidationIssue::new(
///     "/pages".to_string(),
///     "\"branch\" is a required property".to_string(),
/// ));
/// assert_eq!(result.error_count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    issues: Vec<ValidationIssue>,
}

impl ValidationResult {
    /// Creates a new empty validation result.
    pub fn new() -> Self {
        Self { issues: Vec::new() }
    }

    pub fn add_issue(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    /// Returns true if no violations were found.
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.issues.len()
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }
}
