use std::path::PathBuf;

/// A single entry of the [`Namespace`](crate::Namespace).
///
/// Repeatable options store a [`Value::List`] of their element type.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A [`OptionType::String`](crate::OptionType::String) value.
    String(String),
    /// A switch or boolean value.
    Boolean(bool),
    /// An 8-bit integer.
    Byte(i8),
    /// A 16-bit integer.
    Short(i16),
    /// A 32-bit integer.
    Integer(i32),
    /// A 64-bit integer.
    Long(i64),
    /// A single precision float.
    Float(f32),
    /// A double precision float.
    Double(f64),
    /// A file system path.
    Path(PathBuf),
    /// The ordered values of a repeatable option.
    List(Vec<Value>),
}

impl Value {
    /// Coerce to a boolean: `true` only for a boolean `true`.
    /// Every other value (including lists) coerces to `false`.
    pub fn is_true(&self) -> bool {
        matches!(self, Value::Boolean(true))
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::String(value) => write!(f, "{value}"),
            Value::Boolean(value) => write!(f, "{value}"),
            Value::Byte(value) => write!(f, "{value}"),
            Value::Short(value) => write!(f, "{value}"),
            Value::Integer(value) => write!(f, "{value}"),
            Value::Long(value) => write!(f, "{value}"),
            Value::Float(value) => write!(f, "{value}"),
            Value::Double(value) => write!(f, "{value}"),
            Value::Path(value) => write!(f, "{}", value.display()),
            Value::List(values) => write!(
                f,
                "[{}]",
                values
                    .iter()
                    .map(|v| v.to_string())
                    .collect::<Vec<String>>()
                    .join(", ")
            ),
        }
    }
}

macro_rules! from_primitive {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$t> for Value {
                fn from(value: $t) -> Self {
                    Value::$variant(value)
                }
            }
        )*
    };
}

from_primitive!(
    String => String,
    bool => Boolean,
    i8 => Byte,
    i16 => Short,
    i32 => Integer,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    PathBuf => Path,
);

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Value::List(values.into_iter().map(Into::into).collect())
    }
}
