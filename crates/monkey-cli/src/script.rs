//! Script file runner

use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use monkey::Environment;
use tracing::debug;

use crate::session::{Outcome, Session};

/// Run the script at `path` in a fresh environment.
///
/// Parse and runtime errors are reported on stdout and turn into a failing
/// exit code; I/O errors propagate.
pub fn run(path: &Path, session: &Session) -> Result<ExitCode> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("unable to read script {}", path.display()))?;
    debug!(path = %path.display(), bytes = source.len(), "running script");

    let mut env = Environment::new();
    let mut out = io::stdout().lock();
    let outcome = session.run(&source, &mut env, &mut out)?;
    out.flush()?;

    Ok(match outcome {
        Outcome::Success => ExitCode::SUCCESS,
        Outcome::ParseErrors | Outcome::RuntimeError => ExitCode::FAILURE,
    })
}
