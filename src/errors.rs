use std::{fmt, io, str::Utf8Error};
use quick_xml::events::attributes::AttrError;

#[derive(Debug)] 
pub struct Error {
    pub message: String,
}

impl From<io::Error> for Error {
    fn from(value: io::Error) -> Self {
        Error {
            message: value.to_string()
        }
    }
}

impl From<quick_xml::Error> for Error {
    fn from(value: quick_xml::Error) -> Self {
        Error {
            message: value.to_string()
        }
    }
}

impl From<AttrError> for Error {
    fn from(value: AttrError) -> Self {
        Error {
            message: value.to_string()
        }
    }
}

impl From<Utf8Error> for Error {
    fn from(value: Utf8Error) -> Self {
        Error {
            message: value.to_string()
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Error {
            message: value.to_string()
        }
    }
}

impl From<ShapeError> for Error {
    fn from(value: ShapeError) -> Self {
        Error {
            message: value.to_string()
        }
    }
}

impl From<&str> for Error {
    fn from(value: &str) -> Self {
        Error {
            message: value.to_string()
        }
    }
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Error {
            message: value
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Failure to shape a single element. The rest of the batch is unaffected.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeError {
    /// A `lat` or `lon` attribute that is not a floating point number.
    InvalidPosition {
        id: Option<String>,
        attribute: String,
        value: String,
    },
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeError::InvalidPosition { id, attribute, value } => write!(
                f,
                "element {} has non-numeric {} attribute {:?}",
                id.as_deref().unwrap_or("<no id>"),
                attribute,
                value,
            ),
        }
    }
}

impl std::error::Error for ShapeError {}
