use crate::SHELL_NAME;
use crate::command::{CommandFactory, ExecutableCommand, Flow};
use crate::env::Environment;
use crate::interpreter::Factory;
use anyhow::{Context, Result};
use argh::{EarlyExit, FromArgs};
use std::env;
use std::io::Write;
use std::path::PathBuf;

/// Built-in commands known to the shell at compile time.
///
/// Builtins are parsed using the [`argh`] crate (`FromArgs`) and executed
/// directly in-process without spawning a child process.
pub(crate) trait BuiltinCommand: Sized + FromArgs {
    /// Canonical name of the command, e.g. "cd" or "exit".
    fn name() -> &'static str;

    /// Executes the command using the provided IO streams and environment.
    fn execute(
        self,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
        env: &mut Environment,
    ) -> Result<Flow>;
}

impl<T: BuiltinCommand> ExecutableCommand for T {
    fn execute(
        self: Box<Self>,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
        env: &mut Environment,
    ) -> Result<Flow> {
        match T::execute(*self, stdout, stderr, env) {
            Ok(flow) => Ok(flow),
            Err(e) => {
                // A failing builtin is reported, never fatal.
                writeln!(stderr, "{}: {:#}", SHELL_NAME, e)?;
                Ok(Flow::Continue)
            }
        }
    }
}

/// Stand-in command produced when argh rejects the arguments.
///
/// Carries argh's own usage text: errors go to stderr, `--help` output to
/// stdout. Either way the loop keeps running.
struct InvalidArgs {
    output: String,
    is_error: bool,
}

impl ExecutableCommand for InvalidArgs {
    fn execute(
        self: Box<Self>,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
        _env: &mut Environment,
    ) -> Result<Flow> {
        if self.is_error {
            stderr.write_all(self.output.as_bytes())?;
            stderr.write_all(b"\n")?;
        } else {
            stdout.write_all(self.output.as_bytes())?;
        }
        Ok(Flow::Continue)
    }
}

impl<T: BuiltinCommand + 'static> CommandFactory for Factory<T> {
    fn try_create(
        &self,
        _env: &Environment,
        name: &str,
        args: &[&str],
    ) -> Option<Box<dyn ExecutableCommand>> {
        if name == T::name() {
            Some(match T::from_args(&[name], args) {
                Ok(cmd) => Box::new(cmd),
                Err(EarlyExit { output, status }) => Box::new(InvalidArgs {
                    output,
                    is_error: status.is_err(),
                }),
            })
        } else {
            None
        }
    }
}

#[derive(FromArgs)]
/// Change the current working directory.
pub struct Cd {
    #[argh(positional)]
    /// directory to switch to; absolute or relative to the current directory.
    pub path: String,

    #[argh(positional, greedy)]
    /// surplus words are accepted and ignored.
    pub _args: Vec<String>,
}

impl BuiltinCommand for Cd {
    fn name() -> &'static str {
        "cd"
    }

    fn execute(
        self,
        _stdout: &mut dyn Write,
        _stderr: &mut dyn Write,
        env: &mut Environment,
    ) -> Result<Flow> {
        let target = PathBuf::from(&self.path);
        env::set_current_dir(&target).with_context(|| format!("cd: {}", target.display()))?;
        // Re-read the cwd so the tracked directory stays absolute even when
        // the target was relative.
        env.current_dir = env::current_dir().unwrap_or(target);
        Ok(Flow::Continue)
    }
}

#[derive(FromArgs)]
/// Print the usage banner and the list of builtin commands.
pub struct Help {
    #[argh(positional, greedy)]
    /// surplus words are accepted and ignored.
    pub _args: Vec<String>,
}

impl BuiltinCommand for Help {
    fn name() -> &'static str {
        "help"
    }

    fn execute(
        self,
        stdout: &mut dyn Write,
        _stderr: &mut dyn Write,
        _env: &mut Environment,
    ) -> Result<Flow> {
        writeln!(stdout, "{}", SHELL_NAME)?;
        writeln!(stdout, "Type program names and arguments and hit enter.")?;
        writeln!(stdout, "The following are built in:")?;
        for name in [Cd::name(), Help::name(), Exit::name()] {
            writeln!(stdout, "  {}", name)?;
        }
        writeln!(stdout, "Use the man command for information on other programs.")?;
        Ok(Flow::Continue)
    }
}

#[derive(FromArgs)]
/// Leave the shell.
pub struct Exit {
    #[argh(positional, greedy)]
    /// surplus words are accepted and ignored.
    pub _args: Vec<String>,
}

impl BuiltinCommand for Exit {
    fn name() -> &'static str {
        "exit"
    }

    fn execute(
        self,
        _stdout: &mut dyn Write,
        _stderr: &mut dyn Write,
        _env: &mut Environment,
    ) -> Result<Flow> {
        Ok(Flow::Stop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{lock_current_dir, make_unique_temp_dir};
    use std::env as stdenv;
    use std::fs;

    #[test]
    fn exit_signals_stop_and_writes_nothing() {
        let mut env = Environment::new();
        let (mut out, mut err) = (Vec::new(), Vec::new());

        let cmd = Exit { _args: Vec::new() };
        let flow = cmd.execute(&mut out, &mut err, &mut env).unwrap();

        assert_eq!(flow, Flow::Stop);
        assert!(out.is_empty());
        assert!(err.is_empty());
    }

    #[test]
    fn help_lists_builtins_in_registration_order() {
        let mut env = Environment::new();
        let (mut out, mut err) = (Vec::new(), Vec::new());

        let cmd = Help { _args: Vec::new() };
        let flow = cmd.execute(&mut out, &mut err, &mut env).unwrap();

        assert_eq!(flow, Flow::Continue);
        assert!(err.is_empty());

        let s = String::from_utf8(out).unwrap();
        assert!(s.contains(SHELL_NAME));
        let cd = s.find("  cd\n").expect("cd listed");
        let help = s.find("  help\n").expect("help listed");
        let exit = s.find("  exit\n").expect("exit listed");
        assert!(cd < help && help < exit);
    }

    #[test]
    fn cd_to_absolute_path_changes_directory() {
        let _lock = lock_current_dir();
        let temp = make_unique_temp_dir().expect("failed to create temp dir");
        let canonical_temp = fs::canonicalize(&temp).expect("canonicalize failed");
        let orig = stdenv::current_dir().unwrap();

        let mut env = Environment::new();
        let cmd = Cd {
            path: canonical_temp.to_string_lossy().to_string(),
            _args: Vec::new(),
        };
        let flow = cmd
            .execute(&mut Vec::new(), &mut Vec::new(), &mut env)
            .unwrap();

        assert_eq!(flow, Flow::Continue);
        assert_eq!(
            fs::canonicalize(stdenv::current_dir().unwrap()).unwrap(),
            canonical_temp
        );
        assert_eq!(fs::canonicalize(&env.current_dir).unwrap(), canonical_temp);

        stdenv::set_current_dir(orig).expect("failed to restore cwd");
        let _ = fs::remove_dir_all(&temp);
    }

    #[test]
    fn cd_to_nonexistent_path_errors_and_keeps_directory() {
        let _lock = lock_current_dir();
        let orig = stdenv::current_dir().unwrap();

        let mut env = Environment::new();
        let cmd = Cd {
            path: "/nonexistent-path-xyz".to_string(),
            _args: Vec::new(),
        };
        let res = cmd.execute(&mut Vec::new(), &mut Vec::new(), &mut env);

        assert!(res.is_err());
        let msg = format!("{:#}", res.unwrap_err());
        assert!(msg.contains("cd: /nonexistent-path-xyz"));
        assert_eq!(stdenv::current_dir().unwrap(), orig);
        assert_eq!(env.current_dir, Environment::new().current_dir);
    }

    #[test]
    fn cd_ignores_surplus_arguments() {
        let _lock = lock_current_dir();
        let temp = make_unique_temp_dir().expect("failed to create temp dir");
        let canonical_temp = fs::canonicalize(&temp).expect("canonicalize failed");
        let orig = stdenv::current_dir().unwrap();

        let mut env = Environment::new();
        let factory = Factory::<Cd>::default();
        let target = canonical_temp.to_string_lossy().to_string();
        let cmd = factory
            .try_create(&env, "cd", &[target.as_str(), "extra", "words"])
            .expect("factory match");

        let (mut out, mut err) = (Vec::new(), Vec::new());
        let flow = cmd.execute(&mut out, &mut err, &mut env).unwrap();

        assert_eq!(flow, Flow::Continue);
        assert!(out.is_empty());
        assert!(err.is_empty());
        assert_eq!(
            fs::canonicalize(stdenv::current_dir().unwrap()).unwrap(),
            canonical_temp
        );

        stdenv::set_current_dir(orig).expect("failed to restore cwd");
        let _ = fs::remove_dir_all(&temp);
    }

    #[test]
    fn factory_only_matches_exact_name() {
        let env = Environment::new();
        let factory = Factory::<Exit>::default();

        assert!(factory.try_create(&env, "exit", &[]).is_some());
        assert!(factory.try_create(&env, "Exit", &[]).is_none());
        assert!(factory.try_create(&env, "exi", &[]).is_none());
        assert!(factory.try_create(&env, "exits", &[]).is_none());
    }

    #[test]
    fn cd_without_argument_becomes_a_usage_report() {
        let env = Environment::new();
        let factory = Factory::<Cd>::default();

        let cmd = factory.try_create(&env, "cd", &[]).expect("factory match");
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let flow = cmd
            .execute(&mut out, &mut err, &mut Environment::new())
            .unwrap();

        assert_eq!(flow, Flow::Continue);
        assert!(out.is_empty());
        assert!(!err.is_empty());
    }
}
