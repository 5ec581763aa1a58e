//! Arguments bound to named callables.
//!
//! Named callables receive their arguments as JSON values: a positional list
//! and a map of named arguments. Typed accessors decode them on demand.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Errors produced while decoding bound arguments.
#[derive(Debug, thiserror::Error)]
pub enum ArgumentError {
    #[error("missing positional argument {index}")]
    MissingPositional { index: usize },

    #[error("missing named argument `{key}`")]
    MissingNamed { key: String },

    #[error("invalid argument {argument}: {source}")]
    Invalid {
        argument: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Positional and named arguments for a named callable.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Arguments {
    #[serde(default)]
    positional: Vec<Value>,
    #[serde(default)]
    named: BTreeMap<String, Value>,
}

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arguments with positional values only.
    pub fn positional(values: Vec<Value>) -> Self {
        Self {
            positional: values,
            named: BTreeMap::new(),
        }
    }

    /// Appends a positional argument (builder pattern).
    #[must_use]
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Sets a named argument (builder pattern).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.named.insert(key.into(), value.into());
        self
    }

    pub fn positional_values(&self) -> &[Value] {
        &self.positional
    }

    pub fn named_values(&self) -> &BTreeMap<String, Value> {
        &self.named
    }

    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.named.is_empty()
    }

    /// Decodes the positional argument at `index`.
    pub fn get<T: DeserializeOwned>(&self, index: usize) -> Result<T, ArgumentError> {
        let value = self
            .positional
            .get(index)
            .ok_or(ArgumentError::MissingPositional { index })?;
        decode(value, || index.to_string())
    }

    /// Decodes the named argument `key`.
    pub fn get_named<T: DeserializeOwned>(&self, key: &str) -> Result<T, ArgumentError> {
        let value = self
            .named
            .get(key)
            .ok_or_else(|| ArgumentError::MissingNamed {
                key: key.to_owned(),
            })?;
        decode(value, || format!("`{key}`"))
    }

    /// Decodes the named argument `key`, falling back to `default` when absent.
    pub fn get_named_or<T: DeserializeOwned>(
        &self,
        key: &str,
        default: T,
    ) -> Result<T, ArgumentError> {
        match self.named.get(key) {
            Some(value) => decode(value, || format!("`{key}`")),
            None => Ok(default),
        }
    }
}

fn decode<T: DeserializeOwned>(
    value: &Value,
    argument: impl FnOnce() -> String,
) -> Result<T, ArgumentError> {
    T::deserialize(value).map_err(|source| ArgumentError::Invalid {
        argument: argument(),
        source,
    })
}
