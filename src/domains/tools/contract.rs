//! Input contracts for tools.
//!
//! An [`InputContract`] is built from a tool's parameter struct: the struct
//! derives [`JsonSchema`], the rendered schema is advertised in `tools/list`
//! and the same schema, compiled by `jsonschema`, validates the raw argument
//! object of a call.
//!
//! Validation rules:
//! - unknown fields are ignored and dropped;
//! - a missing (or `null`) required field is a violation;
//! - a field of the wrong JSON type is a violation;
//! - a string outside an enumeration is a violation;
//! - an absent optional field takes its declared default, or stays absent.
//!
//! Every violation is reported, not only the first one.

use std::fmt;
use std::sync::Arc;

use jsonschema::error::{ValidationError, ValidationErrorKind};
use jsonschema::{Draft, JSONSchema};
use rmcp::handler::server::tool::schema_for_type;
use rmcp::model::JsonObject;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Label used when a violation is not tied to one field.
const ROOT_FIELD: &str = "arguments";

// ============================================================================
// Contract
// ============================================================================

/// The schema of a tool's arguments and its compiled validator.
pub struct InputContract {
    schema: Arc<JsonObject>,
    validator: JSONSchema,
}

impl fmt::Debug for InputContract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputContract")
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}

impl InputContract {
    /// Render the schema of `P` and compile it.
    ///
    /// The advertised schema keeps its draft 2020-12 `$schema`; validation
    /// runs it as draft 7, which resolves the same `$defs` references.
    pub fn of<P: JsonSchema>() -> Result<Self, String> {
        let schema = schema_for_type::<P>();

        let mut document = schema.clone();
        document.remove("$schema");
        let document = Value::Object(document);
        let validator = JSONSchema::options()
            .with_draft(Draft::Draft7)
            .compile(&document)
            .map_err(|e| e.to_string())?;

        Ok(Self {
            schema: Arc::new(schema),
            validator,
        })
    }

    pub fn schema(&self) -> &Arc<JsonObject> {
        &self.schema
    }

    /// Names listed as `required`, in schema order.
    pub fn required(&self) -> Vec<&str> {
        self.schema
            .get("required")
            .and_then(Value::as_array)
            .map(|names| names.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    /// Every declared property with its (dereferenced) schema.
    pub fn properties(&self) -> impl Iterator<Item = (&str, &JsonObject)> + '_ {
        self.schema
            .get("properties")
            .and_then(Value::as_object)
            .into_iter()
            .flatten()
            .filter_map(|(name, _)| Some((name.as_str(), self.property(name)?)))
    }

    /// The schema of `field`, following a `$ref` into `$defs`.
    pub fn property(&self, field: &str) -> Option<&JsonObject> {
        let prop = self.schema.get("properties")?.get(field)?.as_object()?;
        match prop.get("$ref").and_then(Value::as_str) {
            Some(reference) => {
                let name = reference.strip_prefix("#/$defs/")?;
                self.schema.get("$defs")?.get(name)?.as_object()
            }
            None => Some(prop),
        }
    }

    /// The default declared for `field`.
    pub fn default_for(&self, field: &str) -> Option<&Value> {
        self.schema.get("properties")?.get(field)?.get("default")
    }

    /// Check `arguments` against the schema.
    pub fn validate(&self, arguments: &JsonObject) -> Result<ValidatedArgs, ValidationErrors> {
        let present: JsonObject = arguments
            .iter()
            .filter(|(_, value)| !value.is_null())
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();

        let instance = Value::Object(present.clone());
        if let Err(errors) = self.validator.validate(&instance) {
            let mut violations: Vec<FieldViolation> = Vec::new();
            for error in errors {
                let violation = self.violation(&error);
                match violations.iter_mut().find(|v| v.field == violation.field) {
                    // A value failing both `type` and `enum` is reported as a type error.
                    Some(existing) => {
                        if matches!(violation.kind, ViolationKind::WrongType { .. })
                            && !matches!(existing.kind, ViolationKind::WrongType { .. })
                        {
                            *existing = violation;
                        }
                    }
                    None => violations.push(violation),
                }
            }
            return Err(ValidationErrors(violations));
        }

        let mut validated = JsonObject::new();
        let declared = self.schema.get("properties").and_then(Value::as_object);
        for (name, prop) in declared.into_iter().flatten() {
            if let Some(value) = present.get(name) {
                validated.insert(name.clone(), value.clone());
            } else if let Some(default) = prop.get("default") {
                validated.insert(name.clone(), default.clone());
            }
        }
        Ok(ValidatedArgs(validated))
    }

    fn violation(&self, error: &ValidationError<'_>) -> FieldViolation {
        let found = error.instance.as_ref();
        match &error.kind {
            ValidationErrorKind::Required { property } => FieldViolation {
                field: property.as_str().unwrap_or(ROOT_FIELD).to_string(),
                kind: ViolationKind::Missing,
            },
            ValidationErrorKind::Type { .. } | ValidationErrorKind::Minimum { .. } => {
                let field = field_of(error);
                FieldViolation {
                    kind: ViolationKind::WrongType {
                        expected: self.expected(&field),
                        found: json_type_name(found),
                    },
                    field,
                }
            }
            ValidationErrorKind::Enum { options } => FieldViolation {
                field: field_of(error),
                kind: ViolationKind::InvalidEnum {
                    allowed: options
                        .as_array()
                        .map(|values| values.iter().map(display_value).collect())
                        .unwrap_or_default(),
                    found: display_value(found),
                },
            },
            _ => FieldViolation {
                field: field_of(error),
                kind: ViolationKind::Invalid(error.to_string()),
            },
        }
    }

    /// Human name of the type `field` accepts.
    fn expected(&self, field: &str) -> String {
        let Some(prop) = self.property(field) else {
            return "value".to_string();
        };
        let kind = match prop.get("type") {
            Some(Value::String(kind)) => kind.as_str(),
            Some(Value::Array(kinds)) => kinds
                .iter()
                .filter_map(Value::as_str)
                .find(|kind| *kind != "null")
                .unwrap_or("value"),
            _ => "value",
        };
        let non_negative = prop
            .get("minimum")
            .and_then(Value::as_f64)
            .is_some_and(|min| min >= 0.0);

        if kind == "integer" && non_negative {
            "non-negative integer".to_string()
        } else {
            kind.to_string()
        }
    }
}

/// The top-level argument a validation error points into.
fn field_of(error: &ValidationError<'_>) -> String {
    let path = error.instance_path.to_string();
    path.trim_start_matches('/')
        .split('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .unwrap_or(ROOT_FIELD)
        .to_string()
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ============================================================================
// Validated arguments
// ============================================================================

/// Arguments that satisfied a contract, defaults filled in.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedArgs(JsonObject);

impl ValidatedArgs {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn as_map(&self) -> &JsonObject {
        &self.0
    }

    /// Decode into the operation's typed parameters.
    pub fn parse<P: DeserializeOwned>(self) -> serde_json::Result<P> {
        serde_json::from_value(Value::Object(self.0))
    }
}

// ============================================================================
// Violations
// ============================================================================

/// What is wrong with a field.
#[derive(Debug, Clone, PartialEq)]
pub enum ViolationKind {
    Missing,
    WrongType { expected: String, found: &'static str },
    InvalidEnum { allowed: Vec<String>, found: String },
    /// Any other schema rule, with the validator's message.
    Invalid(String),
}

/// A single field that failed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldViolation {
    pub field: String,
    pub kind: ViolationKind,
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ViolationKind::Missing => write!(f, "'{}' is required", self.field),
            ViolationKind::WrongType { expected, found } => {
                write!(f, "'{}' must be a {}, got {}", self.field, expected, found)
            }
            ViolationKind::InvalidEnum { allowed, found } => write!(
                f,
                "'{}' must be one of [{}], got \"{}\"",
                self.field,
                allowed.join(", "),
                found
            ),
            ViolationKind::Invalid(message) => write!(f, "'{}' is invalid: {}", self.field, message),
        }
    }
}

/// Every violation found in one set of arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationErrors(Vec<FieldViolation>);

impl ValidationErrors {
    pub fn violations(&self) -> &[FieldViolation] {
        &self.0
    }

    /// The violation reported for `field`, if any.
    pub fn for_field(&self, field: &str) -> Option<&FieldViolation> {
        self.0.iter().find(|v| v.field == field)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        f.write_str(&parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Clone, Copy, Deserialize, JsonSchema)]
    #[serde(rename_all = "lowercase")]
    enum Color {
        Red,
        Green,
    }

    fn default_limit() -> u64 {
        10
    }

    fn default_page() -> u64 {
        0
    }

    /// Arguments of a sample tool.
    #[derive(Debug, Deserialize, JsonSchema)]
    struct SampleParams {
        /// Name
        name: String,
        /// Color
        color: Color,
        /// Note
        note: Option<String>,
        /// Page size
        #[serde(default = "default_limit")]
        limit: u64,
        /// Page number
        #[serde(default = "default_page")]
        page: u64,
    }

    fn contract() -> InputContract {
        InputContract::of::<SampleParams>().unwrap()
    }

    fn args(value: Value) -> JsonObject {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_defaults_filled_and_optionals_left_absent() {
        let validated = contract()
            .validate(&args(json!({ "name": "a", "color": "red" })))
            .unwrap();

        assert_eq!(validated.get("limit"), Some(&json!(10)));
        assert_eq!(validated.get("page"), Some(&json!(0)));
        assert!(validated.get("note").is_none());
    }

    #[test]
    fn test_null_optional_treated_as_absent() {
        let validated = contract()
            .validate(&args(json!({ "name": "a", "color": "red", "note": null })))
            .unwrap();
        assert!(!validated.as_map().contains_key("note"));
    }

    #[test]
    fn test_null_required_reported_missing() {
        let errors = contract()
            .validate(&args(json!({ "name": null, "color": "red" })))
            .unwrap_err();
        assert_eq!(errors.for_field("name").unwrap().kind, ViolationKind::Missing);
    }

    #[test]
    fn test_unknown_fields_dropped() {
        let validated = contract()
            .validate(&args(json!({ "name": "a", "color": "green", "extra": true })))
            .unwrap();
        assert!(validated.get("extra").is_none());
    }

    #[test]
    fn test_all_violations_reported() {
        let errors = contract()
            .validate(&args(json!({ "color": "blue", "limit": "ten", "page": -1 })))
            .unwrap_err();

        assert_eq!(errors.violations().len(), 4);
        assert_eq!(errors.for_field("name").unwrap().kind, ViolationKind::Missing);
        assert!(matches!(
            errors.for_field("color").unwrap().kind,
            ViolationKind::InvalidEnum { ref found, .. } if found == "blue"
        ));
        assert_eq!(
            errors.for_field("limit").unwrap().kind,
            ViolationKind::WrongType {
                expected: "non-negative integer".to_string(),
                found: "string"
            }
        );
        assert_eq!(
            errors.for_field("page").unwrap().kind,
            ViolationKind::WrongType {
                expected: "non-negative integer".to_string(),
                found: "integer"
            }
        );

        let message = errors.to_string();
        assert!(message.contains("'name' is required"));
        assert!(message.contains("'color' must be one of [red, green], got \"blue\""));
    }

    #[test]
    fn test_enum_with_wrong_type_is_type_error() {
        let errors = contract()
            .validate(&args(json!({ "name": "a", "color": 3 })))
            .unwrap_err();
        assert_eq!(errors.violations().len(), 1);
        assert_eq!(
            errors.for_field("color").unwrap().kind,
            ViolationKind::WrongType {
                expected: "string".to_string(),
                found: "integer"
            }
        );
    }

    #[test]
    fn test_schema_rendering() {
        let contract = contract();
        let schema = contract.schema();

        assert_eq!(schema["type"], "object");
        let mut required = contract.required();
        required.sort_unstable();
        assert_eq!(required, vec!["color", "name"]);
        assert_eq!(contract.property("color").unwrap()["enum"], json!(["red", "green"]));
        assert_eq!(schema["properties"]["limit"]["type"], "integer");
        assert_eq!(schema["properties"]["name"]["description"], "Name");
        assert_eq!(contract.default_for("limit"), Some(&json!(10)));
        assert!(contract.default_for("note").is_none());
    }

    #[test]
    fn test_parse_into_typed_params() {
        let params: SampleParams = contract()
            .validate(&args(json!({ "name": "a", "color": "red" })))
            .unwrap()
            .parse()
            .unwrap();
        assert_eq!(params.name, "a");
        assert!(matches!(params.color, Color::Red));
        assert_eq!(params.note, None);
        assert_eq!(params.limit, 10);
    }
}
