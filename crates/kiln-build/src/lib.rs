//! Build description for kiln.
//!
//! This crate provides:
//! - The project model handed to every backend
//! - The `kiln.toml` manifest format
//! - Direct compiler command lines
//!
//! # Example
//!
//! ```toml
//! # kiln.toml
//! [project]
//! name = "foo"
//!
//! [target]
//! type = "executable"
//! sources = ["bar.c", "baz.c"]
//! ```

mod command;
mod config;
mod error;
mod project;

pub use command::{compile_args, compile_command, DEFAULT_COMPILER};
pub use config::{Manifest, ProjectConfig, TargetConfig, TargetType, XcodeSettings};
pub use error::{BuildError, Result};
pub use project::{ProjectDescription, TargetKind, UNNAMED_PROJECT};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_to_command() {
        let toml = r#"
[project]
name = "foo"

[target]
type = "executable"
sources = ["bar.c", "baz.c"]
        "#;

        let manifest = Manifest::from_str(toml).expect("Failed to parse manifest");
        let project = manifest.to_project();
        assert_eq!(
            compile_command(&project, DEFAULT_COMPILER).unwrap(),
            "cc -o foo bar.c baz.c"
        );
    }
}
