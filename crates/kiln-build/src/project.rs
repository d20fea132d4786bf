//! In-memory description of the single target a build produces.

use crate::{BuildError, Result};
use rustc_hash::FxHashSet;

/// Name a project carries before anything configures it.
pub const UNNAMED_PROJECT: &str = "<unnamed>";

/// What kind of artifact the target produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TargetKind {
    /// Not configured yet. Building in this state is an error.
    #[default]
    Unset,
    /// A command-line executable built from native sources.
    NativeExecutable,
}

/// A build target: kind, output name and ordered source list.
///
/// Source order is preserved everywhere it is used: compile command
/// arguments, group listings and build phases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDescription {
    kind: TargetKind,
    name: String,
    sources: Vec<String>,
}

impl ProjectDescription {
    pub fn new() -> Self {
        Self {
            kind: TargetKind::Unset,
            name: UNNAMED_PROJECT.to_string(),
            sources: Vec::new(),
        }
    }

    /// Create a native executable target.
    pub fn executable(name: impl Into<String>) -> Self {
        let mut project = Self::new();
        project.set_target(TargetKind::NativeExecutable, name);
        project
    }

    /// Add source files.
    pub fn with_sources(mut self, sources: &[&str]) -> Self {
        for source in sources {
            self.add_source(*source);
        }
        self
    }

    /// Set the target kind and output name.
    pub fn set_target(&mut self, kind: TargetKind, name: impl Into<String>) {
        self.kind = kind;
        self.name = name.into();
    }

    /// Append a source file, keeping insertion order.
    pub fn add_source(&mut self, path: impl Into<String>) {
        self.sources.push(path.into());
    }

    pub fn target_kind(&self) -> TargetKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    /// Check the description is complete enough to build.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(BuildError::EmptyName);
        }

        if self.kind == TargetKind::Unset {
            return Err(BuildError::TargetKindUnset {
                project: self.name.clone(),
            });
        }

        if self.sources.is_empty() {
            return Err(BuildError::NoSources {
                project: self.name.clone(),
            });
        }

        let mut seen = FxHashSet::default();
        for (index, source) in self.sources.iter().enumerate() {
            if source.is_empty() {
                return Err(BuildError::EmptySource {
                    project: self.name.clone(),
                    index,
                });
            }
            if !seen.insert(source.as_str()) {
                return Err(BuildError::DuplicateSource {
                    project: self.name.clone(),
                    path: source.clone(),
                });
            }
        }

        Ok(())
    }
}

impl Default for ProjectDescription {
    fn default() -> Self {
        Self::new()
    }
}
