//! Error types for kiln-xcode.

use kiln_build::BuildError;
use kiln_common::ObjectId;
use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for kiln-xcode operations.
pub type Result<T> = std::result::Result<T, XcodeError>;

#[derive(Error, Debug, Diagnostic)]
pub enum XcodeError {
    /// The project description is not buildable.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] BuildError),

    /// Two different objects hashed to the same identifier.
    #[error("{}", duplicate_object_message(.id, .first, .second))]
    #[diagnostic(
        code(kiln::xcode::duplicate_object),
        help("rename the project or source file so that object names do not clash")
    )]
    DuplicateObject {
        id: ObjectId,
        first: String,
        second: String,
    },

    /// The project file could not be written.
    #[error("Failed to write {}: {source}", .path.display())]
    #[diagnostic(code(kiln::xcode::write))]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl XcodeError {
    /// Create a write error with path context
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}

fn duplicate_object_message(id: &ObjectId, first: &str, second: &str) -> String {
    if first == second {
        format!("object '{}' (id {}) is emitted twice", first, id)
    } else {
        format!("object id {} is used by both '{}' and '{}'", id, first, second)
    }
}
