//! Translation messages for a single locale and the `t()` lookup built on them.

use regex::{Captures, Regex};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::OnceLock;
use thiserror::Error;
use tracing::warn;

/// Reasons a messages document cannot be turned into a `MessageMapping`.
#[derive(Debug, Error)]
pub enum MessageFormatError {
    #[error("messages document is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("messages document must be a JSON object")]
    NotAnObject,

    #[error("unsupported value at key '{0}' (expected string, number, boolean or object)")]
    UnsupportedValue(String),
}

/// Immutable mapping from dot-delimited translation keys to message strings.
///
/// Built from a nested JSON document: `{"auth": {"signUp": "Sign up"}}`
/// produces the key `auth.signUp`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageMapping {
    entries: BTreeMap<String, String>,
}

static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();

fn placeholder_regex() -> &'static Regex {
    PLACEHOLDER_REGEX
        .get_or_init(|| Regex::new(r"\{([A-Za-z0-9_]+)\}").expect("placeholder regex is valid"))
}

impl MessageMapping {
    /// Parse a nested JSON messages document.
    pub fn from_json(document: &str) -> Result<Self, MessageFormatError> {
        let value: Value = serde_json::from_str(document)?;
        Self::from_value(&value)
    }

    /// Flatten an already-parsed JSON value.
    pub fn from_value(value: &Value) -> Result<Self, MessageFormatError> {
        let Value::Object(root) = value else {
            return Err(MessageFormatError::NotAnObject);
        };

        let mut entries = BTreeMap::new();
        for (key, child) in root {
            flatten_into(&mut entries, key.clone(), child)?;
        }
        Ok(Self { entries })
    }

    /// Look up the raw message for a key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All keys, sorted.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// A translator over the whole mapping.
    pub fn translator(&self) -> Translator<'_> {
        Translator {
            messages: self,
            namespace: None,
        }
    }

    /// A translator whose keys are relative to `namespace`
    /// (`ns.t("welcome")` looks up `"{namespace}.welcome"`).
    pub fn namespaced<'a>(&'a self, namespace: &'a str) -> Translator<'a> {
        Translator {
            messages: self,
            namespace: Some(namespace),
        }
    }
}

fn flatten_into(
    entries: &mut BTreeMap<String, String>,
    key: String,
    value: &Value,
) -> Result<(), MessageFormatError> {
    match value {
        Value::String(text) => {
            entries.insert(key, text.clone());
        }
        Value::Number(number) => {
            entries.insert(key, number.to_string());
        }
        Value::Bool(flag) => {
            entries.insert(key, flag.to_string());
        }
        Value::Object(children) => {
            for (child_key, child) in children {
                flatten_into(entries, format!("{}.{}", key, child_key), child)?;
            }
        }
        Value::Array(_) | Value::Null => return Err(MessageFormatError::UnsupportedValue(key)),
    }
    Ok(())
}

/// Replace `{name}` placeholders with values from `args`.
///
/// Placeholders with no matching argument are left untouched.
pub fn interpolate(template: &str, args: &[(&str, &str)]) -> String {
    if args.is_empty() {
        return template.to_string();
    }

    placeholder_regex()
        .replace_all(template, |caps: &Captures| {
            let name = &caps[1];
            args.iter()
                .find(|(arg, _)| *arg == name)
                .map(|(_, value)| value.to_string())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Key lookup function handed to renderers, optionally scoped to a namespace.
#[derive(Debug, Clone, Copy)]
pub struct Translator<'a> {
    messages: &'a MessageMapping,
    namespace: Option<&'a str>,
}

impl<'a> Translator<'a> {
    /// Translate a key with no interpolation.
    pub fn t(&self, key: &str) -> String {
        self.t_with(key, &[])
    }

    /// Translate a key and interpolate `{name}` placeholders.
    ///
    /// A missing key yields the fully qualified key itself.
    pub fn t_with(&self, key: &str, args: &[(&str, &str)]) -> String {
        let full_key = match self.namespace {
            Some(namespace) => format!("{}.{}", namespace, key),
            None => key.to_string(),
        };

        match self.messages.get(&full_key) {
            Some(template) => interpolate(template, args),
            None => {
                warn!("Missing translation for key '{}'", full_key);
                full_key
            }
        }
    }
}
