//! Interactive read-eval-print loop

use std::io::{self, Write};

use anyhow::Result;
use monkey::Environment;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::debug;

use crate::session::Session;

const PROMPT: &str = ">> ";

/// REPL state: the line editor plus one environment shared by every line.
pub struct Repl {
    session: Session,
    env: Environment,
    editor: DefaultEditor,
}

impl Repl {
    /// Create a REPL with a fresh environment.
    pub fn new(session: Session) -> Result<Self> {
        Ok(Self {
            session,
            env: Environment::new(),
            editor: DefaultEditor::new()?,
        })
    }

    fn greet(&self) {
        let user = std::env::var("USER").unwrap_or_else(|_| "there".to_string());
        println!("Hello {}! This is the Monkey programming language!", user);
        println!("Feel free to type in commands");
    }

    /// Read lines until `exit`, `quit` or end of input.
    pub fn run(&mut self) -> Result<()> {
        self.greet();

        loop {
            match self.editor.readline(PROMPT) {
                Ok(line) => {
                    let input = line.trim();
                    if input.is_empty() {
                        continue;
                    }
                    if matches!(input, "exit" | "quit") {
                        break;
                    }
                    let _ = self.editor.add_history_entry(input);

                    let mut out = io::stdout().lock();
                    let outcome = self.session.run(input, &mut self.env, &mut out)?;
                    out.flush()?;
                    debug!(?outcome, live_scopes = self.env.live_scopes(), "line done");
                }
                // Ctrl-C abandons the current line only
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => break,
                Err(err) => return Err(err.into()),
            }
        }

        Ok(())
    }
}
