//! Generic schema validation.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::contract::Contract;
use crate::finite::non_finite_paths;
use crate::schema::Schema;

/// One field that failed its schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Location inside the value: `riskLevel`, `location.latitude`,
    /// `[2].relatedPosts[0].id`. Empty for the value itself.
    pub path: String,
    pub expected: String,
    pub found: String,
}

impl core::fmt::Display for Violation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let path = if self.path.is_empty() { "(root)" } else { &self.path };
        write!(f, "{path}: expected {}, found {}", self.expected, self.found)
    }
}

/// Data failed schema validation at a module boundary.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("contract violation [{label}] ({contract}): {}", summarize(.violations))]
pub struct ContractViolation {
    label: &'static str,
    contract: Contract,
    violations: Vec<Violation>,
}

fn summarize(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ContractViolation {
    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn contract(&self) -> &Contract {
        &self.contract
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Whether any violation points exactly at `path`.
    pub fn cites(&self, path: &str) -> bool {
        self.violations.iter().any(|v| v.path == path)
    }
}

/// A reusable, stateless validator for one schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Validator {
    schema: Schema,
    label: &'static str,
}

impl Validator {
    pub fn new(schema: Schema, label: &'static str) -> Self {
        Self { schema, label }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Validate a typed value and hand it back unchanged.
    ///
    /// The value is inspected through its serde representation, so the field
    /// names checked are the serialized ones. NaN and infinite floats are
    /// rejected wherever they appear.
    pub fn validate<T: Serialize>(&self, value: T, contract: &Contract) -> Result<T, ContractViolation> {
        let non_finite = non_finite_paths(&value);
        if !non_finite.is_empty() {
            let violations = non_finite
                .into_iter()
                .map(|path| Violation {
                    path,
                    expected: "finite number".to_string(),
                    found: "non-finite number".to_string(),
                })
                .collect();
            return Err(self.violation(contract, violations));
        }

        let json = match serde_json::to_value(&value) {
            Ok(json) => json,
            Err(err) => {
                return Err(self.violation(
                    contract,
                    vec![Violation {
                        path: String::new(),
                        expected: self.schema.describe(),
                        found: format!("unserializable value ({err})"),
                    }],
                ));
            }
        };
        self.check(&json, contract)?;
        Ok(value)
    }

    /// Validate a raw JSON value in place.
    pub fn check(&self, value: &Value, contract: &Contract) -> Result<(), ContractViolation> {
        let mut violations = Vec::new();
        check_value(&self.schema, value, "", &mut violations);

        if violations.is_empty() {
            Ok(())
        } else {
            Err(self.violation(contract, violations))
        }
    }

    /// Validate an incoming JSON value, then deserialize it.
    pub fn decode<T: DeserializeOwned>(&self, value: Value, contract: &Contract) -> Result<T, ContractViolation> {
        self.check(&value, contract)?;
        serde_json::from_value(value).map_err(|err| {
            self.violation(
                contract,
                vec![Violation {
                    path: String::new(),
                    expected: self.schema.describe(),
                    found: format!("value not decodable ({err})"),
                }],
            )
        })
    }

    fn violation(&self, contract: &Contract, violations: Vec<Violation>) -> ContractViolation {
        tracing::debug!(
            label = self.label,
            action = contract.action,
            location = contract.location,
            direction = %contract.direction,
            from = contract.from,
            to = contract.to,
            violations = violations.len(),
            "contract validation failed"
        );
        ContractViolation {
            label: self.label,
            contract: contract.clone(),
            violations,
        }
    }
}

fn check_value(schema: &Schema, value: &Value, path: &str, out: &mut Vec<Violation>) {
    let mismatch = |out: &mut Vec<Violation>| {
        out.push(Violation {
            path: path.to_string(),
            expected: schema.describe(),
            found: describe_value(value),
        })
    };

    match schema {
        Schema::String => {
            if !value.is_string() {
                mismatch(out);
            }
        }
        Schema::Number => {
            if !value.is_number() {
                mismatch(out);
            }
        }
        Schema::Integer => {
            if !(value.is_i64() || value.is_u64()) {
                mismatch(out);
            }
        }
        Schema::Boolean => {
            if !value.is_boolean() {
                mismatch(out);
            }
        }
        Schema::Timestamp => match value.as_str() {
            Some(s) if chrono::DateTime::parse_from_rfc3339(s).is_ok() => {}
            _ => mismatch(out),
        },
        Schema::Enum(literals) => match value.as_str() {
            Some(s) if literals.iter().any(|l| *l == s) => {}
            _ => mismatch(out),
        },
        Schema::Object(fields) => {
            let Some(map) = value.as_object() else {
                mismatch(out);
                return;
            };
            for field in fields {
                let field_path = join_field(path, field.name);
                match map.get(field.name) {
                    None | Some(Value::Null) if !field.required => {}
                    None => out.push(Violation {
                        path: field_path,
                        expected: field.schema.describe(),
                        found: "missing".to_string(),
                    }),
                    Some(inner) => check_value(&field.schema, inner, &field_path, out),
                }
            }
        }
        Schema::Array(item) => {
            let Some(items) = value.as_array() else {
                mismatch(out);
                return;
            };
            for (idx, inner) in items.iter().enumerate() {
                check_value(item, inner, &format!("{path}[{idx}]"), out);
            }
        }
    }
}

fn join_field(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}.{name}")
    }
}

fn describe_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("boolean {b}"),
        Value::Number(n) => format!("number {n}"),
        Value::String(s) => {
            let preview: String = s.chars().take(40).collect();
            if preview.len() < s.len() {
                format!("string \"{preview}...\"")
            } else {
                format!("string \"{preview}\"")
            }
        }
        Value::Array(items) => format!("array of {} element(s)", items.len()),
        Value::Object(_) => "object".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde::Deserialize;
    use serde_json::json;

    fn post_schema() -> Schema {
        Schema::object()
            .required("id", Schema::String)
            .required("platform", Schema::String)
            .required("username", Schema::String)
            .required("content", Schema::String)
            .required("timestamp", Schema::String)
            .optional("location", Schema::String)
            .optional("latitude", Schema::Number)
            .optional("longitude", Schema::Number)
            .required("riskLevel", Schema::enumeration(["high", "medium", "low"]))
    }

    fn contract() -> Contract {
        Contract::outgoing("fetchRecentSocialData", "social/api", "social", "client")
    }

    fn valid_post() -> Value {
        json!({
            "id": "1",
            "platform": "twitter",
            "username": "@a",
            "content": "x",
            "timestamp": "2023-11-10T14:30:00Z",
            "riskLevel": "high",
        })
    }

    #[test]
    fn valid_value_passes_unchanged() {
        let validator = Validator::new(post_schema(), "SocialPost");
        let input = valid_post();
        let output = validator.validate(input.clone(), &contract()).unwrap();
        assert_eq!(output, input);
    }

    #[test]
    fn out_of_enum_risk_level_is_rejected_with_call_site_metadata() {
        let validator = Validator::new(post_schema(), "SocialPost");
        let mut input = valid_post();
        input["riskLevel"] = json!("extreme");

        let err = validator.check(&input, &contract()).unwrap_err();
        assert_eq!(err.label(), "SocialPost");
        assert_eq!(err.contract(), &contract());
        assert!(err.cites("riskLevel"));
        assert_eq!(err.violations().len(), 1);
        assert_eq!(err.violations()[0].found, "string \"extreme\"");

        let message = err.to_string();
        assert!(message.contains("fetchRecentSocialData @ social/api"));
        assert!(message.contains("riskLevel"));
    }

    #[test]
    fn missing_required_field_is_reported_as_missing() {
        let validator = Validator::new(post_schema(), "SocialPost");
        let mut input = valid_post();
        input.as_object_mut().unwrap().remove("username");

        let err = validator.check(&input, &contract()).unwrap_err();
        assert!(err.cites("username"));
        assert_eq!(err.violations()[0].found, "missing");
    }

    #[test]
    fn optional_fields_may_be_absent_or_null_but_not_mistyped() {
        let validator = Validator::new(post_schema(), "SocialPost");

        let mut with_null = valid_post();
        with_null["latitude"] = Value::Null;
        assert!(validator.check(&with_null, &contract()).is_ok());

        let mut mistyped = valid_post();
        mistyped["latitude"] = json!("north");
        let err = validator.check(&mistyped, &contract()).unwrap_err();
        assert!(err.cites("latitude"));
    }

    #[test]
    fn non_finite_numbers_are_not_mistaken_for_absent_fields() {
        #[derive(Debug, Serialize)]
        struct Post {
            id: &'static str,
            platform: &'static str,
            username: &'static str,
            content: &'static str,
            timestamp: &'static str,
            #[serde(rename = "riskLevel")]
            risk_level: &'static str,
            latitude: Option<f64>,
            longitude: Option<f64>,
        }

        let post = |latitude, longitude| Post {
            id: "1",
            platform: "twitter",
            username: "@a",
            content: "x",
            timestamp: "2023-11-10T14:30:00Z",
            risk_level: "high",
            latitude,
            longitude,
        };
        let validator = Validator::new(Schema::array_of(post_schema()), "SocialPosts");

        assert!(validator.validate(vec![post(Some(40.7), None)], &contract()).is_ok());

        let err = validator
            .validate(
                vec![post(Some(40.7), Some(-74.0)), post(Some(f64::NAN), Some(f64::INFINITY))],
                &contract(),
            )
            .unwrap_err();
        assert!(err.cites("[1].latitude"));
        assert!(err.cites("[1].longitude"));
        assert_eq!(err.violations()[0].expected, "finite number");
    }

    #[test]
    fn extra_fields_are_accepted_and_kept() {
        let validator = Validator::new(post_schema(), "SocialPost");
        let mut input = valid_post();
        input["source"] = json!("firehose");

        let output = validator.validate(input.clone(), &contract()).unwrap();
        assert_eq!(output["source"], "firehose");
    }

    #[test]
    fn sequence_failure_names_element_and_field() {
        let validator = Validator::new(Schema::array_of(post_schema()), "SocialPosts");
        let mut bad = valid_post();
        bad["riskLevel"] = json!("extreme");
        let input = json!([valid_post(), valid_post(), bad]);

        let err = validator.check(&input, &contract()).unwrap_err();
        assert_eq!(err.violations().len(), 1);
        assert!(err.cites("[2].riskLevel"));
    }

    #[test]
    fn nested_objects_report_dotted_paths() {
        let schema = Schema::object().required(
            "location",
            Schema::object()
                .required("address", Schema::String)
                .required("latitude", Schema::Number)
                .required("longitude", Schema::Number),
        );
        let validator = Validator::new(schema, "Threat");
        let input = json!({ "location": { "address": "Test" } });

        let err = validator.check(&input, &contract()).unwrap_err();
        assert!(err.cites("location.latitude"));
        assert!(err.cites("location.longitude"));
    }

    #[test]
    fn timestamp_and_integer_primitives() {
        let schema = Schema::object()
            .required("at", Schema::Timestamp)
            .required("count", Schema::Integer);
        let validator = Validator::new(schema, "Sample");

        assert!(validator
            .check(&json!({ "at": "2023-11-10T14:30:00Z", "count": 3 }), &contract())
            .is_ok());

        let err = validator
            .check(&json!({ "at": "yesterday", "count": 1.5 }), &contract())
            .unwrap_err();
        assert!(err.cites("at"));
        assert!(err.cites("count"));
    }

    #[test]
    fn decode_validates_before_deserializing() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct Post {
            id: String,
            #[serde(rename = "riskLevel")]
            risk_level: String,
        }

        let validator = Validator::new(post_schema(), "SocialPost");
        let incoming = Contract::incoming("onHighRiskPost", "threats/module", "social", "threats");

        let post: Post = validator.decode(valid_post(), &incoming).unwrap();
        assert_eq!(post.id, "1");
        assert_eq!(post.risk_level, "high");

        let err = validator.decode::<Post>(json!({ "id": 1 }), &incoming).unwrap_err();
        assert!(err.cites("id"));
        assert_eq!(err.contract().direction, crate::Direction::Incoming);
    }

    #[test]
    fn typed_values_are_checked_through_serde() {
        #[derive(Debug, Clone, PartialEq, Serialize)]
        struct Level {
            level: &'static str,
        }

        let validator = Validator::new(
            Schema::object().required("level", Schema::enumeration(["high", "medium", "low"])),
            "Level",
        );
        assert_eq!(
            validator.validate(Level { level: "low" }, &contract()).unwrap(),
            Level { level: "low" }
        );
        assert!(validator.validate(Level { level: "none" }, &contract()).is_err());
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 128,
            ..ProptestConfig::default()
        })]

        /// Property: any value satisfying the schema comes back deep-equal.
        #[test]
        fn validation_is_identity_on_valid_values(
            id in "[a-z0-9]{1,8}",
            content in ".{0,64}",
            risk in prop::sample::select(vec!["high", "medium", "low"]),
            latitude in prop::option::of(-90.0f64..90.0),
        ) {
            let mut input = json!({
                "id": id,
                "platform": "twitter",
                "username": "@user",
                "content": content,
                "timestamp": "2023-11-10T14:30:00Z",
                "riskLevel": risk,
            });
            if let Some(lat) = latitude {
                input["latitude"] = json!(lat);
            }

            let validator = Validator::new(post_schema(), "SocialPost");
            let output = validator.validate(input.clone(), &contract()).unwrap();
            prop_assert_eq!(output, input);
        }
    }
}
