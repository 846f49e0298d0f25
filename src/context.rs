//! Render context construction.
//! Builds the `{Env, Values}` data every template of an application sees.

use crate::decrypt::Decryptor;
use crate::error::{Error, Result};
use log::debug;
use serde::Serialize;
use serde_yaml::{Mapping, Value};
use std::path::Path;

/// Data visible to templates as `Env` and `Values`.
///
/// Both fields are schema-free YAML trees. A context is built once per
/// application and shared read-only by all of its output units.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Context {
    #[serde(rename = "Env")]
    pub env: Value,
    #[serde(rename = "Values")]
    pub values: Value,
    #[serde(skip)]
    env_loaded: bool,
    #[serde(skip)]
    values_loaded: bool,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            env: Value::Mapping(Mapping::new()),
            values: Value::Mapping(Mapping::new()),
            env_loaded: false,
            values_loaded: false,
        }
    }
}

impl Context {
    /// Creates a context from already loaded data. A `Null` field counts as absent.
    pub fn new(env: Value, values: Value) -> Self {
        let mut context = Self::default();
        context.set_env(env);
        context.set_values(values);
        context
    }

    fn set_env(&mut self, env: Value) {
        if !env.is_null() {
            self.env = env;
            self.env_loaded = true;
        }
    }

    fn set_values(&mut self, values: Value) {
        if !values.is_null() {
            merge_values(&mut self.values, values);
            self.values_loaded = true;
        }
    }

    /// Returns false when no environment document was loaded.
    ///
    /// An empty document counts as absent; an explicit `{}` does not.
    pub fn has_env(&self) -> bool {
        self.env_loaded
    }

    /// Returns false when no values document or override was loaded.
    pub fn has_values(&self) -> bool {
        self.values_loaded
    }
}

/// Decrypts and parses a YAML mapping source.
///
/// # Returns
/// * `Ok(None)` if the source does not exist
/// * `Ok(Some(Value::Null))` for an empty document
/// * `Ok(Some(mapping))` otherwise
///
/// # Errors
/// * `Error::ParseError` if the document is not valid YAML
/// * `Error::InvalidDocument` if the document is not a mapping
pub fn load_source(path: &Path, decryptor: &dyn Decryptor) -> Result<Option<Value>> {
    let Some(text) = decryptor.decrypt(path, "yaml")? else {
        return Ok(None);
    };

    let value: Value = serde_yaml::from_str(&text)
        .map_err(|e| Error::ParseError { path: path.display().to_string(), source: e })?;

    match value {
        Value::Null | Value::Mapping(_) => Ok(Some(value)),
        _ => Err(Error::InvalidDocument {
            path: path.display().to_string(),
            reason: "expected a mapping at the top level".to_string(),
        }),
    }
}

/// Builds the base context from the environment source.
///
/// An absent or empty source yields a context with empty `Env`; callers
/// should warn when [`Context::has_env`] is false.
pub fn gen_context(env_source: Option<&Path>, decryptor: &dyn Decryptor) -> Result<Context> {
    let mut context = Context::default();
    if let Some(path) = env_source {
        if let Some(env) = load_source(path, decryptor)? {
            debug!("Loaded environment from {}", path.display());
            context.set_env(env);
        }
    }
    Ok(context)
}

/// Copies `base` and loads the application's values overlay into the copy.
///
/// Values files are deep-merged in order, then each `key.path=value`
/// override is applied on top.
pub fn set_value_context<P: AsRef<Path>>(
    values_sources: &[P],
    override_vars: &[String],
    base: &Context,
    decryptor: &dyn Decryptor,
) -> Result<Context> {
    let mut context = base.clone();

    for source in values_sources {
        let path = source.as_ref();
        if let Some(values) = load_source(path, decryptor)? {
            debug!("Merging values from {}", path.display());
            context.set_values(values);
        }
    }

    for expr in override_vars {
        set_override(&mut context.values, expr)?;
        context.values_loaded = true;
    }

    Ok(context)
}

/// Deep-merges `overlay` into `base`.
///
/// Mappings merge key by key; any other value replaces what was there.
pub fn merge_values(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Mapping(base), Value::Mapping(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

/// Applies a `dotted.key=value` override to `values`.
///
/// The right-hand side is read as a YAML scalar, so `replicas=3` sets a
/// number and `debug=true` a boolean. Anything that would not read back as
/// the same text, such as `tag=1.10` (the float `1.1`) or `x=a: b`, is kept
/// as a string. Intermediate keys that are missing or not mappings are
/// replaced with mappings.
pub fn set_override(values: &mut Value, expr: &str) -> Result<()> {
    let (key, raw) = expr
        .split_once('=')
        .ok_or_else(|| Error::ConfigError(format!("override '{expr}' is not of the form key=value")))?;

    let segments: Vec<&str> = key.trim().split('.').collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(Error::ConfigError(format!("override '{expr}' has an empty key")));
    }

    insert_path(values, &segments, parse_scalar(raw));
    Ok(())
}

fn parse_scalar(raw: &str) -> Value {
    let text = Value::String(raw.to_string());
    if raw.is_empty() {
        return text;
    }
    match serde_yaml::from_str::<Value>(raw) {
        Ok(Value::Number(number)) => {
            // 1.10 reads as 1.1 and 0x1F as 31; keep the text in those cases
            if number.to_string() == raw.trim() {
                Value::Number(number)
            } else {
                text
            }
        }
        Ok(value @ (Value::Bool(_) | Value::String(_))) => value,
        _ => text,
    }
}

fn insert_path(target: &mut Value, path: &[&str], value: Value) {
    let [first, rest @ ..] = path else {
        *target = value;
        return;
    };
    if !target.is_mapping() {
        *target = Value::Mapping(Mapping::new());
    }
    if let Value::Mapping(map) = target {
        let child = map.entry(Value::String((*first).to_string())).or_insert(Value::Null);
        insert_path(child, rest, value);
    }
}
