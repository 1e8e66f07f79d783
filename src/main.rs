// SPDX-License-Identifier: MIT

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use serde::Serialize;
use std::path::{Path, PathBuf};
use timecheck_rs::env::{DeclarationLoader, Declarations, Env};
use timecheck_rs::eval::{format_timestamp, parse_timestamp};
use timecheck_rs::TimeCheckError;

const DEFAULT_EXPRESSION: &str = r#"request.time < timestamp("2020-07-01T00:00:00.000Z")"#;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// YAML file of variable declarations (defaults to `request.time: timestamp`).
    ///
    /// Declarations only widen what `check` accepts; `eval` binds `request.time`
    /// and nothing else, so any other declared variable fails to evaluate.
    #[arg(long, global = true, env = "TIMECHECK_DECLARATIONS")]
    declarations: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate an expression with `request.time` bound to now
    ///
    /// `request.time` is the only variable bound at evaluation time.
    Eval {
        /// The expression to evaluate
        #[arg(short, long, default_value = DEFAULT_EXPRESSION)]
        expr: String,

        /// RFC 3339 instant to use instead of the wall clock
        #[arg(short, long)]
        now: Option<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Parse and check an expression without evaluating it
    Check {
        /// The expression to check
        #[arg(short, long, default_value = DEFAULT_EXPRESSION)]
        expr: String,
    },
}

#[derive(Serialize)]
struct EvalReport<'a> {
    expression: &'a str,
    now: String,
    result: bool,
}

fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();

    let args = Args::parse();
    let env = load_env(args.declarations.as_deref())?;

    match args.command {
        Commands::Eval { expr, now, json } => {
            let checked = env
                .compile(&expr)
                .with_context(|| format!("failed to compile '{}'", expr))?;

            let now = match now {
                Some(s) => parse_timestamp(&s).map_err(|e| {
                    TimeCheckError::config(format!("invalid --now '{}': {}", s, e))
                })?,
                None => Utc::now(),
            };
            log::info!("Evaluating with now = {}", format_timestamp(&now));

            let result = checked
                .evaluate(now)
                .with_context(|| format!("failed to evaluate '{}'", expr))?;

            if json {
                let report = EvalReport {
                    expression: &expr,
                    now: format_timestamp(&now),
                    result,
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("result: {}", result);
            }
        }
        Commands::Check { expr } => {
            let checked = env
                .compile(&expr)
                .with_context(|| format!("failed to compile '{}'", expr))?;
            println!("parsed: {}", checked.expr);
            println!("type: {}", checked.result_type);
            println!("{:#?}", checked.expr);
        }
    }

    Ok(())
}

fn load_env(path: Option<&Path>) -> anyhow::Result<Env> {
    let declarations = match path {
        Some(path) => DeclarationLoader::new()
            .load(path)
            .with_context(|| format!("failed to load declarations from {}", path.display()))?,
        None => Declarations::request_time(),
    };

    for (name, decl) in &declarations.variables {
        log::info!("Declared {}: {}", name, decl.var_type);
    }

    Ok(Env::new(declarations))
}
