use std::collections::BTreeMap;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

use crate::api::{CliOption, Value};

/// Errors from reading a [`Namespace`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NamespaceError {
    /// Nothing is stored under the name.
    #[error("no value stored for '{0}'.")]
    UnknownName(String),
    /// The stored value does not convert to the requested type.
    #[error("value '{value}' of '{name}' cannot convert to {type_name}.")]
    Conversion {
        /// The store name.
        name: String,
        /// The stored value's string form.
        value: String,
        /// The requested type.
        type_name: &'static str,
    },
    /// A sequence accessor was used on a scalar entry.
    #[error("value of '{0}' is not a list.")]
    NotAList(String),
}

/// The parsed result table, keyed by each option's name.
///
/// Seeded with defaults before parsing, so every registered option has an entry.
/// The scalar accessors convert the *string form* of the stored value, which means an option may be read back
/// as any type its value happens to represent (ex: a string option holding `"2"` reads as an `i8` or `i64`).
///
/// ### Example
/// ```
/// use flagparse::{ArgumentParser, CliOption, OptionType};
///
/// let parser = ArgumentParser::new("program")
///     .add(CliOption::new("--count").option_type(OptionType::Integer))
///     .build()
///     .unwrap();
///
/// let namespace = parser.parse_args(&["--count", "3"]).unwrap();
/// assert_eq!(namespace.get_i32("count").unwrap(), 3);
/// assert_eq!(namespace.get_i64("count").unwrap(), 3);
/// assert_eq!(namespace.get_string("count").unwrap(), "3");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Namespace {
    values: BTreeMap<String, Value>,
}

impl Namespace {
    pub(crate) fn seeded(options: &[CliOption]) -> Self {
        let mut values = BTreeMap::default();

        for option in options {
            values.insert(option.get_name().to_string(), option.seed());
        }

        Self { values }
    }

    pub(crate) fn set_value(&mut self, name: &str, value: Value) {
        self.values.insert(name.to_string(), value);
    }

    pub(crate) fn add_value(&mut self, name: &str, value: Value) {
        match self.values.get_mut(name) {
            Some(Value::List(values)) => values.push(value),
            Some(existing) => {
                let previous = std::mem::replace(existing, Value::List(Vec::default()));
                *existing = Value::List(vec![previous, value]);
            }
            None => {
                self.values.insert(name.to_string(), Value::List(vec![value]));
            }
        }
    }

    /// The logical NOT of the value currently stored under `name`, coerced to a boolean.
    pub(crate) fn flip_default(&self, name: &str) -> bool {
        !self.values.get(name).map(Value::is_true).unwrap_or(false)
    }

    /// Whether anything is stored under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// The stored names, in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// The raw stored entry.
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    fn require(&self, name: &str) -> Result<&Value, NamespaceError> {
        self.values
            .get(name)
            .ok_or_else(|| NamespaceError::UnknownName(name.to_string()))
    }

    /// Read the string form of the stored value, converted into `T`.
    ///
    /// ### Example
    /// ```
    /// use flagparse::{ArgumentParser, CliOption};
    ///
    /// let parser = ArgumentParser::new("program")
    ///     .add(CliOption::new("--port"))
    ///     .build()
    ///     .unwrap();
    ///
    /// let namespace = parser.parse_args(&["--port", "8080"]).unwrap();
    /// let port: u16 = namespace.get("port").unwrap();
    /// assert_eq!(port, 8080);
    /// ```
    pub fn get<T: FromStr>(&self, name: &str) -> Result<T, NamespaceError> {
        let value = self.require(name)?;
        convert(name, &value.to_string())
    }

    /// Read each element of a stored list, converted into `T`.
    pub fn get_all<T: FromStr>(&self, name: &str) -> Result<Vec<T>, NamespaceError> {
        self.get_list(name)?
            .iter()
            .map(|value| convert(name, &value.to_string()))
            .collect()
    }

    /// Read the stored value as a string.
    pub fn get_string(&self, name: &str) -> Result<String, NamespaceError> {
        Ok(self.require(name)?.to_string())
    }

    /// Read the stored value as a boolean: `true` when its string form is `true` (ignoring ASCII case).
    pub fn get_bool(&self, name: &str) -> Result<bool, NamespaceError> {
        Ok(self.require(name)?.to_string().eq_ignore_ascii_case("true"))
    }

    /// Read the stored value as an `i8`.
    pub fn get_i8(&self, name: &str) -> Result<i8, NamespaceError> {
        self.get(name)
    }

    /// Read the stored value as an `i16`.
    pub fn get_i16(&self, name: &str) -> Result<i16, NamespaceError> {
        self.get(name)
    }

    /// Read the stored value as an `i32`.
    pub fn get_i32(&self, name: &str) -> Result<i32, NamespaceError> {
        self.get(name)
    }

    /// Read the stored value as an `i64`.
    pub fn get_i64(&self, name: &str) -> Result<i64, NamespaceError> {
        self.get(name)
    }

    /// Read the stored value as an `f32`.
    pub fn get_f32(&self, name: &str) -> Result<f32, NamespaceError> {
        self.get(name)
    }

    /// Read the stored value as an `f64`.
    pub fn get_f64(&self, name: &str) -> Result<f64, NamespaceError> {
        self.get(name)
    }

    /// Read the stored value as a path, or `None` when nothing is stored under the name.
    pub fn get_path(&self, name: &str) -> Option<PathBuf> {
        self.values.get(name).map(|value| match value {
            Value::Path(path) => path.clone(),
            other => PathBuf::from(other.to_string()),
        })
    }

    /// Read the ordered values of a repeatable option.
    pub fn get_list(&self, name: &str) -> Result<&[Value], NamespaceError> {
        match self.require(name)? {
            Value::List(values) => Ok(values.as_slice()),
            _ => Err(NamespaceError::NotAList(name.to_string())),
        }
    }
}

fn convert<T: FromStr>(name: &str, value: &str) -> Result<T, NamespaceError> {
    T::from_str(value).map_err(|_| NamespaceError::Conversion {
        name: name.to_string(),
        value: value.to_string(),
        type_name: std::any::type_name::<T>(),
    })
}

impl std::fmt::Display for Namespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{{}}}",
            self.values
                .iter()
                .map(|(name, value)| format!("{name}={value}"))
                .collect::<Vec<String>>()
                .join(", ")
        )
    }
}
