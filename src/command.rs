use crate::env::Environment;
use anyhow::Result;
use std::io::Write;

/// Tells the read-eval loop what to do after a command has been dispatched.
///
/// Every dispatch path, builtin or external, produces exactly one of these.
/// Only the `exit` builtin produces [`Flow::Stop`]; a failing or
/// nonzero-exiting command is not a reason to leave the loop, mirroring the
/// convention that command failure is not shell failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep prompting.
    Continue,
    /// Leave the loop; the process then terminates successfully.
    Stop,
}

/// Object-safe trait for any command the shell can execute.
///
/// This is implemented by builtins via a blanket impl and by external
/// commands. Diagnostics go to `stderr`; only `help` writes to `stdout`.
pub trait ExecutableCommand {
    /// Executes the command, consuming it.
    fn execute(
        self: Box<Self>,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
        env: &mut Environment,
    ) -> Result<Flow>;
}

/// Factory that tries to create a command from a name and its arguments.
///
/// Returns `None` when the factory doesn't recognize the `name`; the
/// dispatcher then asks the next registered factory. Matching is exact and
/// case-sensitive.
pub trait CommandFactory {
    /// Attempt to create a command instance for the provided name and arguments.
    fn try_create(
        &self,
        env: &Environment,
        name: &str,
        args: &[&str],
    ) -> Option<Box<dyn ExecutableCommand>>;
}
