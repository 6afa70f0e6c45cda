use serde_json::Value;

/// Shape a capability reply must have
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaKind {
    /// A JSON object carrying at least the listed fields
    Json {
        required: &'static [&'static str],
    },
    /// Free-form, non-empty text
    Text,
}

/// Named response schema used to coerce replies into typed records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseSchema {
    pub name: &'static str,
    pub kind: SchemaKind,
}

impl ResponseSchema {
    pub const fn json(name: &'static str, required: &'static [&'static str]) -> Self {
        Self { name, kind: SchemaKind::Json { required } }
    }

    pub const fn text(name: &'static str) -> Self {
        Self { name, kind: SchemaKind::Text }
    }

    pub fn is_json(&self) -> bool {
        matches!(self.kind, SchemaKind::Json { .. })
    }

    /// Check a reply against the schema, returning a description of the first violation
    pub fn validate(&self, value: &Value) -> Result<(), String> {
        match self.kind {
            SchemaKind::Text =>
                match value {
                    Value::String(text) if !text.trim().is_empty() => Ok(()),
                    Value::String(_) => Err(format!("{}: empty reply", self.name)),
                    other => Err(format!("{}: expected text, got {}", self.name, kind_of(other))),
                }
            SchemaKind::Json { required } => {
                let object = match value {
                    Value::Object(map) => map,
                    other => {
                        return Err(
                            format!("{}: expected a JSON object, got {}", self.name, kind_of(other))
                        );
                    }
                };

                if object.is_empty() {
                    return Err(format!("{}: empty reply", self.name));
                }

                for field in required {
                    match object.get(*field) {
                        None => {
                            return Err(
                                format!("{}: missing required field `{}`", self.name, field)
                            );
                        }
                        Some(Value::Null) => {
                            return Err(format!("{}: field `{}` is null", self.name, field));
                        }
                        Some(_) => {}
                    }
                }
                Ok(())
            }
        }
    }

    /// Instruction appended to prompts so the model answers in the expected shape
    pub fn describe(&self) -> String {
        match self.kind {
            SchemaKind::Text => "Respond in plain Markdown text.".to_string(),
            SchemaKind::Json { required } =>
                format!(
                    "Respond with a single JSON object (no prose, no code fences) named `{}` containing the fields: {}.",
                    self.name,
                    required.join(", ")
                ),
        }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
