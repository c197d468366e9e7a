use std::env as stdenv;
use std::path::PathBuf;

/// Process-wide shell state.
///
/// The working directory is the only piece of state that outlives a single
/// loop iteration. It is initialized from the process cwd, mutated only by
/// the `cd` builtin, and read by the external launcher when spawning a
/// child. The interpreter is single-threaded, so no synchronization is
/// needed.
#[derive(Debug)]
pub struct Environment {
    pub current_dir: PathBuf,
}

impl Environment {
    pub fn new() -> Self {
        let current_dir = stdenv::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self { current_dir }
    }
}
