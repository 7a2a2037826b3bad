//! The shared integration-parameters object.
//!
//! The parameters are owned by the parent application; the connector reads
//! one field (`credentials`) to derive its initial connected state and
//! writes two fields (`credentials`, `type`) when a flow succeeds. Every
//! other key passes through untouched.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use thiserror::Error;

/// Type tag written alongside the credentials on a successful connect.
pub const INTEGRATION_TYPE: &str = "HubSpot";

/// Key under which the credentials payload is stored.
pub const CREDENTIALS_KEY: &str = "credentials";

const TYPE_KEY: &str = "type";

/// Errors reading or writing a parameters file.
#[derive(Error, Debug)]
pub enum ParamsError {
    #[error("Failed to read parameters from {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse parameters: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Integration parameters must be a JSON object")]
    NotAnObject,

    #[error("Failed to write parameters to {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Integration parameters shared with the parent application.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntegrationParams {
    fields: Map<String, Value>,
}

impl IntegrationParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopt a parameters object handed over by the parent application.
    /// `null` is treated as an empty object; anything else non-object is
    /// rejected.
    pub fn from_value(value: Value) -> Result<Self, ParamsError> {
        match value {
            Value::Null => Ok(Self::new()),
            Value::Object(fields) => Ok(Self { fields }),
            _ => Err(ParamsError::NotAnObject),
        }
    }

    pub fn as_value(&self) -> Value {
        Value::Object(self.fields.clone())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.fields.insert(key.into(), value);
    }

    pub fn credentials(&self) -> Option<&Value> {
        self.fields.get(CREDENTIALS_KEY)
    }

    /// Whether a credentials value is present.
    ///
    /// `null`, `false`, `0` and `""` count as absent; any other value,
    /// an empty object included, counts as present.
    pub fn has_credentials(&self) -> bool {
        self.credentials().is_some_and(is_truthy)
    }

    /// Merge a successful flow's result into the parameters.
    ///
    /// Sets `credentials` and the literal `type` tag; all other keys are
    /// preserved.
    pub fn merge_credentials(&mut self, credentials: Value) {
        self.fields.insert(CREDENTIALS_KEY.to_string(), credentials);
        self.fields
            .insert(TYPE_KEY.to_string(), Value::String(INTEGRATION_TYPE.to_string()));
    }

    /// Remove the stored credentials and the type tag.
    pub fn clear_credentials(&mut self) {
        self.fields.remove(CREDENTIALS_KEY);
        self.fields.remove(TYPE_KEY);
    }

    /// Load a parameters file. A missing file is an empty object, so a
    /// fresh caller starts from a clean slate.
    pub fn load(path: &Path) -> Result<Self, ParamsError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::new()),
            Err(e) => {
                return Err(ParamsError::Read {
                    path: path.to_path_buf(),
                    source: e,
                })
            }
        };
        let value: Value = serde_json::from_str(&content)?;
        Self::from_value(value)
    }

    /// Write the parameters file back for the owning application.
    pub fn save(&self, path: &Path) -> Result<(), ParamsError> {
        let content = serde_json::to_string_pretty(&self.as_value())?;
        std::fs::write(path, content).map_err(|e| ParamsError::Write {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
