//! Xcode project generation.
//!
//! Turns a [`ProjectDescription`] into the text of a `project.pbxproj` file:
//! file references, build files, groups, the sources build phase, Debug and
//! Release configurations, configuration lists, the native target and the
//! root project object, in that order.
//!
//! Every object id is a 96-bit hash of the object's name and `isa` type, so
//! the same description always produces byte-identical output.
//!
//! # Usage
//!
//! ```
//! use kiln_build::ProjectDescription;
//!
//! let project = ProjectDescription::executable("foo").with_sources(&["bar.c", "baz.c"]);
//! let text = kiln_xcode::generate(&project)?;
//! assert!(text.starts_with("// !$*UTF8*$!"));
//! # Ok::<(), kiln_xcode::XcodeError>(())
//! ```

pub mod emitter;
mod error;
mod registry;
mod sink;
mod writer;

pub use emitter::Emitter;
pub use error::{Result, XcodeError};
pub use registry::ObjectRegistry;
pub use sink::{bundle_path, project_file_path, write_project, PROJECT_FILE_NAME};
pub use writer::{ProjectFile, ProjectWriter, XcodeConfig};

use kiln_build::ProjectDescription;

/// Generate a project file with default settings.
pub fn generate(project: &ProjectDescription) -> Result<String> {
    generate_with(project, &XcodeConfig::default())
}

/// Generate a project file.
pub fn generate_with(project: &ProjectDescription, config: &XcodeConfig) -> Result<String> {
    Ok(ProjectWriter::new(project, config).write()?.text)
}
