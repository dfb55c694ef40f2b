mod core;
mod namespace;
mod option;
mod value;

pub use self::core::*;
pub use namespace::*;
pub use option::*;
pub use value::*;
