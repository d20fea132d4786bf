//! Writing a generated project to disk.

use crate::writer::{ProjectWriter, XcodeConfig};
use crate::{Result, XcodeError};
use kiln_build::ProjectDescription;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the project file inside the `.xcodeproj` bundle.
pub const PROJECT_FILE_NAME: &str = "project.pbxproj";

/// `<dir>/<name>.xcodeproj`
pub fn bundle_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{}.xcodeproj", name))
}

/// `<dir>/<name>.xcodeproj/project.pbxproj`
pub fn project_file_path(dir: &Path, name: &str) -> PathBuf {
    bundle_path(dir, name).join(PROJECT_FILE_NAME)
}

/// Generate the project and write it under `dir`, returning the file path.
///
/// The whole document is generated before the filesystem is touched. If the
/// write fails, a partially written file is removed.
pub fn write_project(
    dir: &Path,
    project: &ProjectDescription,
    config: &XcodeConfig,
) -> Result<PathBuf> {
    let file = ProjectWriter::new(project, config).write()?;

    let bundle = bundle_path(dir, project.name());
    fs::create_dir_all(&bundle).map_err(|e| XcodeError::write(&bundle, e))?;

    let path = bundle.join(PROJECT_FILE_NAME);
    if let Err(e) = fs::write(&path, file.text.as_bytes()) {
        let _ = fs::remove_file(&path);
        return Err(XcodeError::write(path, e));
    }

    log::info!(
        "wrote {} ({} objects)",
        path.display(),
        file.objects.len()
    );
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_project_file_path() {
        assert_eq!(
            project_file_path(Path::new("out"), "foo"),
            Path::new("out/foo.xcodeproj/project.pbxproj")
        );
    }

    #[test]
    fn test_write_project() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let project = ProjectDescription::executable("foo").with_sources(&["bar.c", "baz.c"]);

        let path = write_project(temp_dir.path(), &project, &XcodeConfig::default()).unwrap();

        assert_eq!(path, project_file_path(temp_dir.path(), "foo"));
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("// !$*UTF8*$!\n{\n"));
    }

    #[test]
    fn test_invalid_project_touches_nothing() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let project = ProjectDescription::executable("foo");

        let result = write_project(temp_dir.path(), &project, &XcodeConfig::default());

        assert!(matches!(result, Err(XcodeError::Config(_))));
        assert!(!bundle_path(temp_dir.path(), "foo").exists());
    }

    #[test]
    fn test_unwritable_destination_is_an_io_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        // A regular file where the bundle directory should go.
        let blocker = bundle_path(temp_dir.path(), "foo");
        fs::write(&blocker, b"").unwrap();

        let project = ProjectDescription::executable("foo").with_sources(&["bar.c"]);
        let result = write_project(temp_dir.path(), &project, &XcodeConfig::default());

        match result {
            Err(XcodeError::Write { path, .. }) => assert_eq!(path, blocker),
            other => panic!("expected write error, got {:?}", other),
        }
    }
}
