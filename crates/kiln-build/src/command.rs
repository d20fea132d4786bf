//! Compiler command lines for building a project directly.
//!
//! Only the command text is produced here; running it and checking the exit
//! status is left to the caller.

use crate::project::ProjectDescription;
use crate::Result;

/// Compiler used when none is configured.
pub const DEFAULT_COMPILER: &str = "cc";

/// Build the single command that compiles and links the project:
/// `<compiler> -o <name> <source_1> <source_2> ...`.
pub fn compile_command(project: &ProjectDescription, compiler: &str) -> Result<String> {
    project.validate()?;

    let args = compile_args(project, compiler);
    let command = args
        .iter()
        .map(|arg| shell_quote(arg))
        .collect::<Vec<_>>()
        .join(" ");

    log::debug!("compile command for '{}': {}", project.name(), command);
    Ok(command)
}

/// The same command as an argument vector, unquoted.
///
/// The project is assumed to be valid.
pub fn compile_args(project: &ProjectDescription, compiler: &str) -> Vec<String> {
    let mut args = Vec::with_capacity(project.sources().len() + 3);
    args.push(compiler.to_string());
    args.push("-o".to_string());
    args.push(project.name().to_string());
    args.extend(project.sources().iter().cloned());
    args
}

/// Quote an argument for a POSIX shell if it needs it.
fn shell_quote(arg: &str) -> String {
    let plain = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./=+,:@%".contains(c));

    if plain {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}
