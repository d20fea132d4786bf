//! Error types for kiln-build.

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for kiln-build operations.
pub type Result<T> = std::result::Result<T, BuildError>;

/// Errors raised while loading or validating a project description.
#[derive(Error, Debug, Diagnostic)]
pub enum BuildError {
    /// Failed to read the manifest file.
    #[error("Failed to read manifest {}: {source}", .path.display())]
    #[diagnostic(code(kiln::manifest::read))]
    ReadManifest {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the TOML manifest.
    #[error("Failed to parse manifest: {0}")]
    #[diagnostic(code(kiln::manifest::parse))]
    ParseToml(#[from] toml::de::Error),

    /// The target kind was never configured.
    #[error("project '{project}': target kind is not set")]
    #[diagnostic(
        code(kiln::config::target_kind),
        help("set `type = \"executable\"` in the [target] table")
    )]
    TargetKindUnset { project: String },

    /// The source list is empty.
    #[error("project '{project}': no source files")]
    #[diagnostic(
        code(kiln::config::no_sources),
        help("list at least one file in `sources`")
    )]
    NoSources { project: String },

    /// The project name is empty.
    #[error("project name must not be empty")]
    #[diagnostic(code(kiln::config::empty_name))]
    EmptyName,

    /// A source entry is an empty string.
    #[error("project '{project}': source file #{} has an empty path", .index + 1)]
    #[diagnostic(code(kiln::config::empty_source))]
    EmptySource { project: String, index: usize },

    /// The same source path appears more than once.
    #[error("project '{project}': source file '{path}' is listed more than once")]
    #[diagnostic(code(kiln::config::duplicate_source))]
    DuplicateSource { project: String, path: String },
}

impl BuildError {
    /// Whether this error describes an invalid project rather than a failure
    /// to read or parse one.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            BuildError::TargetKindUnset { .. }
                | BuildError::NoSources { .. }
                | BuildError::EmptyName
                | BuildError::EmptySource { .. }
                | BuildError::DuplicateSource { .. }
        )
    }
}
