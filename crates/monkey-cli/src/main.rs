//! `monkey`: interactive shell and script runner

mod repl;
mod script;
mod session;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use monkey::EvalContext;

use crate::repl::Repl;
use crate::session::{Mode, Session};

/// The Monkey programming language.
///
/// Without a script, starts an interactive session.
#[derive(Parser, Debug)]
#[command(name = "monkey", version, about, long_about = None)]
struct Cli {
    /// Script to run instead of starting the REPL
    script: Option<PathBuf>,

    /// Evaluate input, or only parse or tokenize it
    #[arg(long, value_enum, default_value_t = Mode::Eval)]
    mode: Mode,

    /// Abort with a stack overflow error past this many nested calls
    #[arg(long, value_name = "N")]
    max_call_depth: Option<usize>,

    /// Omit the monkey face above parse errors
    #[arg(long)]
    no_banner: bool,
}

impl Cli {
    fn session(&self) -> Session {
        Session {
            mode: self.mode,
            ctx: EvalContext {
                max_call_depth: self.max_call_depth,
                ..EvalContext::default()
            },
            banner: !self.no_banner,
        }
    }
}

/// Install a stderr subscriber, only if `RUST_LOG` is set.
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if std::env::var("RUST_LOG").is_ok() {
        let filter = EnvFilter::from_default_env();
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true),
            )
            .with(filter)
            .init();
    }
}

fn main() -> Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();
    let session = cli.session();

    match &cli.script {
        Some(path) => script::run(path, &session),
        None => {
            Repl::new(session)?.run()?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flags() {
        let cli = Cli::parse_from(["monkey", "prog.mk", "--mode", "parse", "--max-call-depth", "64"]);
        assert_eq!(cli.script, Some(PathBuf::from("prog.mk")));
        assert_eq!(cli.mode, Mode::Parse);

        let session = cli.session();
        assert_eq!(session.ctx.max_call_depth, Some(64));
        assert!(session.banner);
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["monkey", "--no-banner"]);
        assert!(cli.script.is_none());
        assert_eq!(cli.mode, Mode::Eval);
        assert!(!cli.session().banner);
    }
}
