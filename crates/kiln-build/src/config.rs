//! Manifest format (`kiln.toml`).

use crate::project::{ProjectDescription, TargetKind};
use crate::{BuildError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Root manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    /// Project metadata.
    pub project: ProjectConfig,

    /// The single build target.
    #[serde(default)]
    pub target: TargetConfig,

    /// Xcode project generation settings.
    #[serde(default)]
    pub xcode: XcodeSettings,
}

/// Project metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Project name; also the name of the produced executable.
    pub name: String,
}

/// Target configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TargetConfig {
    /// Target type. Left unset, the project fails validation.
    #[serde(rename = "type", default)]
    pub target_type: Option<TargetType>,

    /// Source files, in compile order.
    #[serde(default)]
    pub sources: Vec<String>,
}

/// Target type as spelled in the manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetType {
    /// Command-line executable.
    Executable,
}

/// Optional `[xcode]` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct XcodeSettings {
    /// Value for the project's `ORGANIZATIONNAME` attribute.
    #[serde(default)]
    pub organization: Option<String>,
}

impl Manifest {
    /// Load a manifest from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| BuildError::ReadManifest {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("loaded manifest {}", path.display());
        Self::from_str(&content)
    }

    /// Parse a manifest from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self> {
        let manifest: Manifest = toml::from_str(content)?;
        Ok(manifest)
    }

    /// Build the project description this manifest configures.
    ///
    /// The result is not validated; backends validate before producing output.
    pub fn to_project(&self) -> ProjectDescription {
        let mut project = ProjectDescription::new();

        let kind = match self.target.target_type {
            Some(TargetType::Executable) => TargetKind::NativeExecutable,
            None => TargetKind::Unset,
        };
        project.set_target(kind, self.project.name.clone());

        for source in &self.target.sources {
            project.add_source(source.clone());
        }

        project
    }
}
