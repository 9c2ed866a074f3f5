//! isosprite CLI - Sprite sizing, atlas planning and smoke anchor extraction
//!
//! This binary wraps the isosprite core for render pipelines: it reports
//! sprite sizes, plans atlas sheets and writes smoke anchor records.

use clap::Parser;
use std::process::ExitCode;

mod cli_args;

use cli_args::{Cli, Commands, SmokeCommands};
use isosprite_cli::commands::plan::PlanArgs;
use isosprite_cli::{commands, input::Inputs, logging};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.global.verbose);

    let result = Inputs::load(cli.global.catalog.as_deref(), cli.global.config.as_deref())
        .and_then(|inputs| dispatch(&inputs, cli.command));

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}

fn dispatch(inputs: &Inputs, command: Commands) -> anyhow::Result<ExitCode> {
    match command {
        Commands::Size {
            item,
            scale,
            atlas,
            json,
        } => commands::size::run(inputs, &item, scale, atlas, json),
        Commands::Catalog { require, json } => commands::catalog::run(inputs, &require, json),
        Commands::Plan {
            stage,
            item,
            version,
            renders_dir,
            frames,
            varieties,
            json,
        } => commands::plan::run(
            inputs,
            &PlanArgs {
                stage,
                item: &item,
                version: &version,
                renders_dir: renders_dir.as_deref(),
                frames,
                varieties: &varieties,
            },
            json,
        ),
        Commands::Smoke { command } => match command {
            SmokeCommands::Moving {
                item,
                version,
                sequences,
                frames,
                out_dir,
                json,
            } => commands::smoke::run_moving(
                inputs,
                &item,
                &version,
                &sequences,
                frames,
                out_dir.as_deref(),
                json,
            ),
            SmokeCommands::Static {
                item,
                version,
                snapshot,
                out_dir,
                json,
            } => commands::smoke::run_static(
                inputs,
                &item,
                &version,
                &snapshot,
                out_dir.as_deref(),
                json,
            ),
        },
    }
}
