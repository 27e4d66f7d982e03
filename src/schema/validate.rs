use std::fmt;

use serde_json::Value;

/// Expected JSON shape of a payload field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    /// Any JSON number.
    Number,
    /// Integral JSON number.
    Integer,
    /// JSON string.
    String,
    /// JSON boolean.
    Bool,
    /// JSON array of anything.
    Array,
    /// JSON object.
    Object,
    /// Array of 3 or 4 integers in `0..=255`.
    Colour,
}

impl FieldKind {
    fn describe(self) -> &'static str {
        match self {
            Self::Number => "a number",
            Self::Integer => "an integer",
            Self::String => "a string",
            Self::Bool => "a boolean",
            Self::Array => "an array",
            Self::Object => "an object",
            Self::Colour => "a colour ([r, g, b] or [r, g, b, a], 0-255)",
        }
    }

    fn accepts(self, v: &Value) -> bool {
        match self {
            Self::Number => v.is_number(),
            Self::Integer => v.is_i64() || v.is_u64(),
            Self::String => v.is_string(),
            Self::Bool => v.is_boolean(),
            Self::Array => v.is_array(),
            Self::Object => v.is_object(),
            Self::Colour => v.as_array().is_some_and(|a| {
                (a.len() == 3 || a.len() == 4)
                    && a.iter().all(|c| c.as_u64().is_some_and(|c| c <= 255))
            }),
        }
    }
}

#[derive(Clone, Debug)]
struct FieldSpec {
    name: &'static str,
    kind: FieldKind,
    required: bool,
}

/// Declarative description of a widget's payload object.
#[derive(Clone, Debug, Default)]
pub struct WidgetSchema {
    fields: Vec<FieldSpec>,
    allow_unknown: bool,
}

impl WidgetSchema {
    /// Schema for an object with no declared fields.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a required field.
    pub fn required(mut self, name: &'static str, kind: FieldKind) -> Self {
        self.fields.push(FieldSpec {
            name,
            kind,
            required: true,
        });
        self
    }

    /// Declare an optional field.
    pub fn optional(mut self, name: &'static str, kind: FieldKind) -> Self {
        self.fields.push(FieldSpec {
            name,
            kind,
            required: false,
        });
        self
    }

    /// Accept fields the schema does not declare.
    pub fn allow_unknown(mut self) -> Self {
        self.allow_unknown = true;
        self
    }

    /// Check `payload`, collecting every violation.
    pub fn validate(&self, payload: &Value) -> Result<(), SchemaErrors> {
        let mut errors = Vec::new();

        let Some(obj) = payload.as_object() else {
            errors.push(SchemaError::at(&[], "payload must be an object"));
            return Err(SchemaErrors { errors });
        };

        for field in &self.fields {
            let path = [SchemaPathElem::Field(field.name.to_string())];
            match obj.get(field.name) {
                None | Some(Value::Null) if field.required => {
                    errors.push(SchemaError::at(&path, "required field is missing"));
                }
                None | Some(Value::Null) => {}
                Some(v) if !field.kind.accepts(v) => {
                    errors.push(SchemaError::at(
                        &path,
                        format!("must be {}", field.kind.describe()),
                    ));
                }
                Some(_) => {}
            }
        }

        if !self.allow_unknown {
            for key in obj.keys() {
                if !self.fields.iter().any(|f| f.name == key) {
                    errors.push(SchemaError::at(
                        &[SchemaPathElem::Field(key.clone())],
                        "unknown field",
                    ));
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaErrors { errors })
        }
    }
}

/// One step of a path into a payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaPathElem {
    /// Object key.
    Field(String),
    /// Array index.
    Index(usize),
}

/// A single schema violation.
#[derive(Debug, Clone)]
pub struct SchemaError {
    /// Location of the offending value.
    pub path: Vec<SchemaPathElem>,
    /// What is wrong with it.
    pub message: String,
}

impl SchemaError {
    fn at(path: &[SchemaPathElem], message: impl Into<String>) -> Self {
        Self {
            path: path.to_vec(),
            message: message.into(),
        }
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            return write!(f, "{}", self.message);
        }
        write!(f, "{}: {}", format_path(&self.path), self.message)
    }
}

fn format_path(path: &[SchemaPathElem]) -> String {
    let mut s = String::from("$");
    for p in path {
        match p {
            SchemaPathElem::Field(name) => {
                s.push('.');
                s.push_str(name);
            }
            SchemaPathElem::Index(i) => {
                s.push('[');
                s.push_str(&i.to_string());
                s.push(']');
            }
        }
    }
    s
}

/// All violations found in one payload.
#[derive(Debug, Clone)]
pub struct SchemaErrors {
    /// Violations in field declaration order, then unknown fields.
    pub errors: Vec<SchemaError>,
}

impl fmt::Display for SchemaErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{e}")?;
        }
        Ok(())
    }
}

impl std::error::Error for SchemaErrors {}

#[cfg(test)]
#[path = "../../tests/unit/schema/validate.rs"]
mod tests;
