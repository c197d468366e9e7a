//! A tiny interactive command interpreter.
//!
//! This crate implements the whole read-parse-dispatch-execute loop of a
//! minimal shell: a prompt is printed, one line is read from the terminal,
//! split into whitespace-delimited words, and either handled by one of the
//! builtins (`cd`, `help`, `exit`) in-process or spawned as an external
//! program which the shell waits on before prompting again.
//!
//! There is deliberately no scripting layer: no variables, pipelines,
//! redirection, background jobs, history or completion. The public modules
//! [`command`] and [`env`] expose the traits and types needed to embed the
//! interpreter with a custom command set.
//!
//! The main entry point is [`Interpreter`].

mod builtin;
pub mod command;
pub mod env;
mod external;
mod interpreter;
mod lexer;

/// Prefix used on every diagnostic the shell writes to stderr.
pub(crate) const SHELL_NAME: &str = "minish";

/// Just a convenient re-export of the interactive command runner.
///
/// See [`Interpreter`] for the high-level API and examples.
pub use interpreter::Interpreter;
