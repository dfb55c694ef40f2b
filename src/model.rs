use std::path::{Path, PathBuf};

use crate::api::Value;

/// The closed set of types an option value may take.
///
/// Numeric types are validated by parsing, path types by inspecting the file system at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionType {
    /// Any string; always valid.
    String,
    /// A switch; never takes a value on the Cli.
    Boolean,
    /// 8-bit signed integer.
    Byte,
    /// 16-bit signed integer.
    Short,
    /// 32-bit signed integer.
    Integer,
    /// 64-bit signed integer.
    Long,
    /// 32-bit float.
    Float,
    /// 64-bit float.
    Double,
    /// Nothing exists at the path, or it exists and is not a directory.
    File,
    /// Nothing exists at the path, or it is a directory.
    Directory,
    /// Any path.
    FileOrDirectory,
    /// An existing file.
    ExistingFile,
    /// An existing directory.
    ExistingDirectory,
    /// Anything that exists.
    ExistingFileOrDirectory,
    /// Nothing exists at the path (intended as a file).
    NonexistingFile,
    /// Nothing exists at the path (intended as a directory).
    NonexistingDirectory,
    /// Nothing exists at the path.
    NonexistingFileOrDirectory,
}

impl OptionType {
    /// Whether values of this type are file system paths.
    pub fn is_path(&self) -> bool {
        matches!(
            self,
            OptionType::File
                | OptionType::Directory
                | OptionType::FileOrDirectory
                | OptionType::ExistingFile
                | OptionType::ExistingDirectory
                | OptionType::ExistingFileOrDirectory
                | OptionType::NonexistingFile
                | OptionType::NonexistingDirectory
                | OptionType::NonexistingFileOrDirectory
        )
    }

    /// Type-check (without converting) a raw token.
    ///
    /// Path types are checked against the live file system, so the answer only holds at the instant it is taken.
    pub fn is_valid(&self, token: &str) -> bool {
        match self {
            OptionType::String | OptionType::Boolean => true,
            OptionType::Byte => token.parse::<i8>().is_ok(),
            OptionType::Short => token.parse::<i16>().is_ok(),
            OptionType::Integer => token.parse::<i32>().is_ok(),
            OptionType::Long => token.parse::<i64>().is_ok(),
            OptionType::Float => token.parse::<f32>().is_ok(),
            OptionType::Double => token.parse::<f64>().is_ok(),
            path_type => path_type.is_valid_path(Path::new(token)),
        }
    }

    fn is_valid_path(&self, path: &Path) -> bool {
        let exists = path.exists();

        match self {
            OptionType::File => !exists || !path.is_dir(),
            OptionType::Directory => !exists || path.is_dir(),
            OptionType::FileOrDirectory => true,
            OptionType::ExistingFile => path.is_file(),
            OptionType::ExistingDirectory => path.is_dir(),
            OptionType::ExistingFileOrDirectory => exists,
            OptionType::NonexistingFile
            | OptionType::NonexistingDirectory
            | OptionType::NonexistingFileOrDirectory => !exists,
            _ => unreachable!("internal error - not a path type: {self}"),
        }
    }

    /// Convert a token that has already passed [`OptionType::is_valid`].
    ///
    /// Returns `None` when the token does not convert, which the parser never allows to happen.
    pub fn parse(&self, token: &str) -> Option<Value> {
        let value = match self {
            OptionType::String => Value::String(token.to_string()),
            OptionType::Boolean => Value::Boolean(token.eq_ignore_ascii_case("true")),
            OptionType::Byte => Value::Byte(token.parse().ok()?),
            OptionType::Short => Value::Short(token.parse().ok()?),
            OptionType::Integer => Value::Integer(token.parse().ok()?),
            OptionType::Long => Value::Long(token.parse().ok()?),
            OptionType::Float => Value::Float(token.parse().ok()?),
            OptionType::Double => Value::Double(token.parse().ok()?),
            _ => Value::Path(PathBuf::from(token)),
        };

        Some(value)
    }

    /// The value installed for an option of this type when nothing else has been configured.
    pub fn zero(&self) -> Value {
        match self {
            OptionType::String => Value::String(String::default()),
            OptionType::Boolean => Value::Boolean(false),
            OptionType::Byte => Value::Byte(0),
            OptionType::Short => Value::Short(0),
            OptionType::Integer => Value::Integer(0),
            OptionType::Long => Value::Long(0),
            OptionType::Float => Value::Float(0.0),
            OptionType::Double => Value::Double(0.0),
            _ => Value::Path(PathBuf::from(".")),
        }
    }
}

impl std::fmt::Display for OptionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            OptionType::String => "string",
            OptionType::Boolean => "boolean",
            OptionType::Byte => "byte",
            OptionType::Short => "short",
            OptionType::Integer => "integer",
            OptionType::Long => "long",
            OptionType::Float => "float",
            OptionType::Double => "double",
            OptionType::File => "file",
            OptionType::Directory => "directory",
            OptionType::FileOrDirectory => "file or directory",
            OptionType::ExistingFile => "existing file",
            OptionType::ExistingDirectory => "existing directory",
            OptionType::ExistingFileOrDirectory => "existing file or directory",
            OptionType::NonexistingFile => "nonexisting file",
            OptionType::NonexistingDirectory => "nonexisting directory",
            OptionType::NonexistingFileOrDirectory => "nonexisting file or directory",
        };
        write!(f, "{name}")
    }
}
