//! Built-in filters and functions available to templates, on top of the
//! MiniJinja builtins.

use minijinja::{Environment, Error, ErrorKind, Value};
use regex::Regex;

/// Registers every bogie filter and function on `env`.
pub fn register(env: &mut Environment<'_>) {
    env.add_filter("to_yaml", to_yaml);
    env.add_filter("from_yaml", from_yaml);
    env.add_filter("from_json", from_json);
    env.add_filter("quote", quote);
    env.add_filter("squote", squote);
    env.add_filter("snake_case", snake_case);
    env.add_filter("kebab_case", kebab_case);
    env.add_filter("camel_case", camel_case);
    env.add_filter("pascal_case", pascal_case);
    env.add_filter("regex_replace", regex_replace);
    env.add_filter("regex_match", regex_match);

    env.add_function("env", env_var);
    env.add_function("required", required);
    env.add_function("fail", fail);
}

fn invalid(msg: String) -> Error {
    Error::new(ErrorKind::InvalidOperation, msg)
}

/// Serializes a value as a YAML document without the trailing newline.
pub fn to_yaml(value: Value) -> Result<String, Error> {
    let out = serde_yaml::to_string(&value).map_err(|e| invalid(format!("to_yaml: {e}")))?;
    Ok(out.trim_end_matches('\n').to_string())
}

pub fn from_yaml(text: &str) -> Result<Value, Error> {
    let parsed: serde_yaml::Value =
        serde_yaml::from_str(text).map_err(|e| invalid(format!("from_yaml: {e}")))?;
    Ok(Value::from_serialize(&parsed))
}

pub fn from_json(text: &str) -> Result<Value, Error> {
    let parsed: serde_json::Value =
        serde_json::from_str(text).map_err(|e| invalid(format!("from_json: {e}")))?;
    Ok(Value::from_serialize(&parsed))
}

/// Wraps the value in double quotes, escaping as a JSON string.
pub fn quote(value: Value) -> Result<String, Error> {
    let text = value.as_str().map_or_else(|| value.to_string(), str::to_string);
    serde_json::to_string(&text).map_err(|e| invalid(format!("quote: {e}")))
}

pub fn squote(value: Value) -> String {
    let text = value.as_str().map_or_else(|| value.to_string(), str::to_string);
    format!("'{text}'")
}

pub fn snake_case(value: &str) -> String {
    cruet::to_snake_case(value)
}

pub fn kebab_case(value: &str) -> String {
    cruet::to_kebab_case(value)
}

pub fn camel_case(value: &str) -> String {
    cruet::to_camel_case(value)
}

pub fn pascal_case(value: &str) -> String {
    cruet::to_pascal_case(value)
}

fn compile(pattern: &str) -> Result<Regex, Error> {
    Regex::new(pattern).map_err(|e| invalid(format!("invalid regex '{pattern}': {e}")))
}

pub fn regex_replace(value: &str, pattern: &str, replacement: &str) -> Result<String, Error> {
    Ok(compile(pattern)?.replace_all(value, replacement).into_owned())
}

pub fn regex_match(value: &str, pattern: &str) -> Result<bool, Error> {
    Ok(compile(pattern)?.is_match(value))
}

/// Reads a process environment variable, falling back to `default`.
pub fn env_var(name: &str, default: Option<String>) -> Result<String, Error> {
    match std::env::var(name) {
        Ok(value) => Ok(value),
        Err(_) => default.ok_or_else(|| invalid(format!("environment variable '{name}' is not set"))),
    }
}

/// Fails rendering when `value` is undefined, none or an empty string.
pub fn required(value: Value, message: Option<&str>) -> Result<Value, Error> {
    if value.is_undefined() || value.is_none() || value.as_str() == Some("") {
        let message = message.unwrap_or("a required value is missing");
        return Err(invalid(message.to_string()));
    }
    Ok(value)
}

pub fn fail(message: &str) -> Result<String, Error> {
    Err(invalid(message.to_string()))
}
