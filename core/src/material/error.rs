use thiserror::Error;

use super::index::MaterialPropertyIndex;
use super::value::MaterialPropertyDataType;

/// Errors raised while building layouts, declaring dependencies or writing
/// property values.
///
/// Functor contexts never return these: they report problems through `log`
/// and degrade to a `false`/`None` result instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MaterialPropertyError {
    #[error("Unknown material property '{0}'")]
    UnknownProperty(String),
    #[error("Invalid material property index {0}")]
    InvalidIndex(MaterialPropertyIndex),
    #[error("Material property '{name}' expects {expected} but got {actual}")]
    TypeMismatch {
        name: String,
        expected: MaterialPropertyDataType,
        actual: MaterialPropertyDataType,
    },
    #[error("Duplicate material property '{0}'")]
    DuplicateProperty(String),
}

pub type MaterialPropertyResult<T> = Result<T, MaterialPropertyError>;
