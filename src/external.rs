use crate::SHELL_NAME;
use crate::command::{CommandFactory, ExecutableCommand, Flow};
use crate::env::Environment;
use crate::interpreter::Factory;
use anyhow::Result;
use std::ffi::OsString;
use std::io::Write;
use std::process::Command;

/// Command that is not a builtin.
///
/// The program is resolved by the operating system's regular search-path
/// lookup inside `spawn()`; the shell does not implement a PATH walk of its
/// own. The child inherits the shell's stdio and runs in the foreground:
/// the shell blocks on it and holds no handle to it afterwards.
pub struct ExternalCommand {
    name: OsString,
    args: Vec<OsString>,
}

impl ExternalCommand {
    pub fn new(name: OsString, args: Vec<OsString>) -> Self {
        Self { name, args }
    }
}

impl CommandFactory for Factory<ExternalCommand> {
    /// Always matches: any name that is not a builtin is treated as an
    /// external program. Whether it actually exists is only known once the
    /// spawn is attempted, so this factory must be registered last.
    fn try_create(
        &self,
        _env: &Environment,
        name: &str,
        args: &[&str],
    ) -> Option<Box<dyn ExecutableCommand>> {
        Some(Box::new(ExternalCommand::new(
            name.into(),
            args.iter().map(|a| a.into()).collect(),
        )))
    }
}

impl ExecutableCommand for ExternalCommand {
    fn execute(
        self: Box<Self>,
        _stdout: &mut dyn Write,
        stderr: &mut dyn Write,
        env: &mut Environment,
    ) -> Result<Flow> {
        let spawned = Command::new(&self.name)
            .args(&self.args)
            .current_dir(&env.current_dir)
            .spawn();

        let mut child = match spawned {
            Ok(child) => child,
            // Lookup and spawn failures alike: report the OS error text
            // as-is and keep the loop running.
            Err(e) => {
                writeln!(stderr, "{}: {}: {}", SHELL_NAME, self.name.to_string_lossy(), e)?;
                return Ok(Flow::Continue);
            }
        };

        // wait() returns only once the child reaches a terminal state
        // (normal exit or death by signal); a stopped child keeps the shell
        // blocked, matching foreground-only execution. The child's own exit
        // code is not the shell's concern.
        if let Err(e) = child.wait() {
            writeln!(stderr, "{}: {}: {}", SHELL_NAME, self.name.to_string_lossy(), e)?;
        }
        Ok(Flow::Continue)
    }
}
