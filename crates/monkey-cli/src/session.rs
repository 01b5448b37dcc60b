//! Running one chunk of source text in the selected mode

use std::io::Write;

use anyhow::Result;
use clap::ValueEnum;
use monkey::ast::Statement;
use monkey::{eval_with_context, parse_program, Environment, EvalContext, Lexer, ParseError};

/// What to do with each chunk of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Parse and evaluate, printing the result
    Eval,
    /// Parse and print the canonical rendering of the program
    Parse,
    /// Print one JSON token per line
    Lex,
}

/// How a chunk of input turned out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Ran to completion without errors
    Success,
    /// The parser reported errors; nothing was evaluated
    ParseErrors,
    /// Evaluation produced an error value
    RuntimeError,
}

const MONKEY_FACE: &str = r#"            __,__
   .--.  .-"     "-.  .--.
  / .. \/  .-. .-.  \/ .. \
 | |  '|  /   Y   \  |'  | |
 | \   \  \ 0 | 0 /  /   / |
  \ '- ,\.-"""""""-./, -' /
   ''-' /_   ^ ^   _\ '-''
       |  \._   _./  |
       \   \ '~' /   /
        '._ '-=-' _.'
           '-----'
"#;

/// Settings shared by the REPL and the script runner.
#[derive(Debug, Clone)]
pub struct Session {
    /// Output mode
    pub mode: Mode,
    /// Evaluation limits
    pub ctx: EvalContext,
    /// Print the monkey face above parse errors
    pub banner: bool,
}

impl Session {
    /// Process `source` against `env`, writing results to `out`.
    pub fn run(&self, source: &str, env: &mut Environment, out: &mut impl Write) -> Result<Outcome> {
        if self.mode == Mode::Lex {
            for token in Lexer::new(source) {
                writeln!(out, "{}", serde_json::to_string(&token)?)?;
            }
            return Ok(Outcome::Success);
        }

        let (program, errors) = parse_program(source);
        if !errors.is_empty() {
            self.print_parse_errors(&errors, out)?;
            return Ok(Outcome::ParseErrors);
        }

        if self.mode == Mode::Parse {
            writeln!(out, "{}", program)?;
            return Ok(Outcome::Success);
        }

        let value = eval_with_context(&program, env, &self.ctx);

        // A trailing `let` has nothing worth echoing
        let ends_in_let = matches!(program.statements.last(), Some(Statement::Let(_)));
        if value.is_error() || !ends_in_let {
            writeln!(out, "{}", value)?;
        }

        Ok(if value.is_error() {
            Outcome::RuntimeError
        } else {
            Outcome::Success
        })
    }

    fn print_parse_errors(&self, errors: &[ParseError], out: &mut impl Write) -> Result<()> {
        if self.banner {
            write!(out, "{}", MONKEY_FACE)?;
            writeln!(out, "Woops! We ran into some monkey business here!")?;
            writeln!(out, " parser errors:")?;
        }
        for err in errors {
            writeln!(out, "\t{}", err)?;
        }
        Ok(())
    }
}
