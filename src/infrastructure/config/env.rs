//! Environment variable snapshot and the `YANI_*` key mapping.

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

use crate::domain::models::config::parse_port;
use crate::domain::models::duration;

/// Prefix shared by every variable mapped into the configuration namespace
pub const ENV_PREFIX: &str = "YANI_";

/// Variable selecting the configuration file; never overlaid as a key
pub const CONFIG_PATH_VAR: &str = "YANI_CONFIG_PATH";

/// Failure while reading the process environment
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvError {
    #[error("environment variable {name} is not valid unicode")]
    NotUnicode { name: String },
}

/// Immutable copy of the `YANI_*` process environment
///
/// Capturing once and passing the snapshot around keeps path resolution and
/// loading free of hidden process state, so both can run any number of times.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    vars: BTreeMap<String, String>,
}

impl EnvSnapshot {
    /// Copy every `YANI_*` variable from the process environment
    pub fn capture() -> Result<Self, EnvError> {
        let mut vars = BTreeMap::new();
        for (name, value) in std::env::vars_os() {
            if !name.as_encoded_bytes().starts_with(ENV_PREFIX.as_bytes()) {
                continue;
            }
            let not_unicode = || EnvError::NotUnicode {
                name: name.to_string_lossy().into_owned(),
            };
            let name_str = name.to_str().ok_or_else(not_unicode)?;
            let value_str = value.to_str().ok_or_else(not_unicode)?;
            vars.insert(name_str.to_string(), value_str.to_string());
        }
        Ok(Self { vars })
    }

    /// Look up a variable by its full name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Variables that map onto configuration keys, ordered by name
    pub fn overrides(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars
            .iter()
            .filter(|(name, _)| name.starts_with(ENV_PREFIX) && name.as_str() != CONFIG_PATH_VAR)
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EnvSnapshot {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Map a variable name onto a dotted configuration key
///
/// `YANI_STORAGE_DSN` becomes `storage.dsn`: prefix stripped, lowercased,
/// underscores turned into dots.
pub fn env_key(name: &str) -> String {
    name.strip_prefix(ENV_PREFIX)
        .unwrap_or(name)
        .to_lowercase()
        .replace('_', ".")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldKind {
    Text,
    Port,
    Duration,
}

const KNOWN_KEYS: [(&str, FieldKind); 4] = [
    ("env", FieldKind::Text),
    ("storage.dsn", FieldKind::Text),
    ("grpc.port", FieldKind::Port),
    ("grpc.timeout", FieldKind::Duration),
];

/// A typed value ready to be layered on top of the configuration file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OverrideValue {
    Text(String),
    Integer(i64),
}

/// One environment variable coerced to the type of the key it targets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvOverride {
    /// Dotted configuration key
    pub key: String,
    pub value: OverrideValue,
}

/// An environment value that does not fit the type of its key
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{var} sets {key} to {value:?}: {reason}")]
pub struct CoercionError {
    pub key: String,
    pub var: String,
    pub value: String,
    pub reason: String,
}

/// Coerce every recognized `YANI_*` variable to its field type
///
/// Variables whose key is not part of the configuration schema are skipped.
pub fn collect_overrides(env: &EnvSnapshot) -> Result<Vec<EnvOverride>, CoercionError> {
    let mut overrides = Vec::new();
    for (var, raw) in env.overrides() {
        let key = env_key(var);
        let Some((_, kind)) = KNOWN_KEYS.iter().find(|(known, _)| *known == key) else {
            continue;
        };

        let fail = |reason: String| CoercionError {
            key: key.clone(),
            var: var.to_string(),
            value: raw.to_string(),
            reason,
        };
        let value = match kind {
            FieldKind::Text => OverrideValue::Text(raw.to_string()),
            FieldKind::Port => {
                OverrideValue::Integer(parse_port(raw).map_err(|e| fail(e.to_string()))?)
            }
            FieldKind::Duration => {
                duration::parse(raw).map_err(|e| fail(e.to_string()))?;
                OverrideValue::Text(raw.to_string())
            }
        };

        overrides.push(EnvOverride { key, value });
    }
    Ok(overrides)
}
