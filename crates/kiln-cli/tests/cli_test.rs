//! Runs the `kiln` binary against manifests in a temporary directory.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const FOO_MANIFEST: &str = r#"
[project]
name = "foo"

[target]
type = "executable"
sources = ["bar.c", "baz.c"]
"#;

fn kiln(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_kiln"))
        .current_dir(dir)
        .env_remove("CC")
        .args(args)
        .output()
        .expect("Failed to run kiln")
}

fn project_dir(manifest: &str) -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    fs::write(dir.path().join("kiln.toml"), manifest).unwrap();
    dir
}

#[test]
fn test_command_prints_compiler_invocation() {
    let dir = project_dir(FOO_MANIFEST);
    let output = kiln(dir.path(), &["command"]);

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "cc -o foo bar.c baz.c\n");
}

#[test]
fn test_command_with_explicit_compiler() {
    let dir = project_dir(FOO_MANIFEST);
    let output = kiln(dir.path(), &["command", "--compiler", "clang"]);

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "clang -o foo bar.c baz.c\n");
}

#[test]
fn test_xcode_writes_project_file() {
    let dir = project_dir(FOO_MANIFEST);
    let output = kiln(dir.path(), &["xcode"]);

    assert!(output.status.success());
    let path = dir.path().join("foo.xcodeproj").join("project.pbxproj");
    let text = fs::read_to_string(path).expect("project file should exist");
    assert!(text.starts_with("// !$*UTF8*$!\n"));
    assert!(text.contains("/* Begin PBXNativeTarget section */"));
}

#[test]
fn test_xcode_rejects_empty_sources() {
    let dir = project_dir("[project]\nname = \"foo\"\n\n[target]\ntype = \"executable\"\n");
    let output = kiln(dir.path(), &["xcode"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("no source files"));
    assert!(!dir.path().join("foo.xcodeproj").exists());
}

#[test]
fn test_ids_lists_objects() {
    let dir = project_dir(FOO_MANIFEST);
    let output = kiln(dir.path(), &["ids"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().count(), 15);
    assert!(stdout.lines().last().unwrap().ends_with("fooPBXProject"));
}
