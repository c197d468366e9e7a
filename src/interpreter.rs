use crate::SHELL_NAME;
use crate::command::{CommandFactory, Flow};
use crate::env::Environment;
use crate::lexer;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::io::{self, Write};

const PROMPT: &str = "> ";

/// Factory allows creating instances of ExecutableCommand.
///
/// Only supports commands defined in this crate — BuiltinCommand and ExternalCommand.
pub(crate) struct Factory<T> {
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Default for Factory<T> {
    fn default() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

/// The interactive command interpreter.
///
/// Holds an [`Environment`] and an ordered list of [`CommandFactory`]
/// objects that are queried to create commands by name. The list is built
/// once and never mutated afterwards; see [`Default`] for the factories
/// registered out of the box.
///
/// Example
/// ```
/// use minish::Interpreter;
/// use minish::command::Flow;
/// let mut sh = Interpreter::default();
/// let mut out = Vec::new();
/// let mut err = Vec::new();
/// let tokens = vec!["exit".to_string()];
/// let flow = sh.dispatch(&tokens, &mut out, &mut err).unwrap();
/// assert_eq!(flow, Flow::Stop);
/// ```
pub struct Interpreter {
    env: Environment,
    commands: Vec<Box<dyn CommandFactory>>,
}

impl Interpreter {
    /// Create a new interpreter with a custom set of command factories.
    pub fn new(commands: Vec<Box<dyn CommandFactory>>) -> Self {
        Self {
            env: Environment::new(),
            commands,
        }
    }

    /// Dispatch one tokenized command line.
    ///
    /// An empty token sequence is a no-op and keeps the loop running.
    /// Otherwise the first token is the command name and the factories are
    /// queried in registration order; the first match wins. With the
    /// default factory set the external launcher matches anything, so the
    /// trailing not-found report only fires for custom factory sets.
    pub fn dispatch(
        &mut self,
        tokens: &[String],
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
    ) -> anyhow::Result<Flow> {
        let Some((name, rest)) = tokens.split_first() else {
            return Ok(Flow::Continue);
        };
        let args: Vec<&str> = rest.iter().map(String::as_str).collect();

        for factory in &self.commands {
            if let Some(cmd) = factory.try_create(&self.env, name, &args) {
                return cmd.execute(stdout, stderr, &mut self.env);
            }
        }

        writeln!(stderr, "{}: command not found: {}", SHELL_NAME, name)?;
        Ok(Flow::Continue)
    }

    /// The blocking read-eval loop.
    ///
    /// Each iteration prints the prompt, reads one line, tokenizes it and
    /// dispatches it; the loop ends when a command signals [`Flow::Stop`]
    /// or the input stream is exhausted (Ctrl-D), both of which are normal
    /// termination. Any other read failure is fatal and propagated to the
    /// caller. Nothing is ever recorded in history.
    pub fn repl(&mut self) -> anyhow::Result<()> {
        let mut editor = DefaultEditor::new()?;

        loop {
            match editor.readline(PROMPT) {
                Ok(line) => {
                    let tokens = lexer::split_into_tokens(&line);
                    let stdout = io::stdout();
                    let stderr = io::stderr();
                    let flow = self.dispatch(&tokens, &mut stdout.lock(), &mut stderr.lock())?;
                    if flow == Flow::Stop {
                        break;
                    }
                }
                // Ctrl-C drops the pending line and prompts again.
                Err(ReadlineError::Interrupted) => continue,
                // End of input: leave the loop successfully, like `exit`.
                Err(ReadlineError::Eof) => break,
                Err(err) => return Err(err.into()),
            }
        }

        Ok(())
    }
}

impl Default for Interpreter {
    /// Create an interpreter with the default set of commands:
    /// - builtins: `cd`, `help`, `exit`
    /// - the external command launcher, registered last
    fn default() -> Self {
        use crate::builtin::{Cd, Exit, Help};
        use crate::external::ExternalCommand;
        Self::new(vec![
            Box::new(Factory::<Cd>::default()),
            Box::new(Factory::<Help>::default()),
            Box::new(Factory::<Exit>::default()),
            Box::new(Factory::<ExternalCommand>::default()),
        ])
    }
}
