mod cli;
mod handlers;

use clap::{CommandFactory, Parser};
use cli::{BoardAction, Cli, Commands};
use std::path::PathBuf;
use taskboard_cli::{output, run_session, BoardController, JsonLinesSink};
use taskboard_core::{AppConfig, DefaultCardConfig};
use taskboard_domain::ColumnSet;
use taskboard_persistence::JsonFileStore;

fn init_tracing() -> anyhow::Result<()> {
    if let Ok(log_path) = std::env::var("TASKBOARD_DEBUG_LOG") {
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        tracing_subscriber::fmt()
            .with_writer(log_file)
            .with_max_level(tracing::Level::DEBUG)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_max_level(tracing::Level::WARN)
            .init();
    }
    Ok(())
}

fn resolve_file(cli_file: Option<String>, config: &AppConfig) -> anyhow::Result<PathBuf> {
    match cli_file {
        Some(file) => Ok(PathBuf::from(file)),
        None => Ok(config.data_path()?),
    }
}

/// Store and board settings for `file`, as resolved against the config.
fn setup(
    file: Option<String>,
) -> anyhow::Result<(JsonFileStore, ColumnSet, DefaultCardConfig)> {
    let config = AppConfig::load();
    let columns = ColumnSet::new(config.effective_columns()?)?;
    let default_card = config.effective_default_card();
    let store = JsonFileStore::new(resolve_file(file, &config)?);
    Ok((store, columns, default_card))
}

async fn open(file: Option<String>) -> anyhow::Result<BoardController<JsonFileStore>> {
    let (store, columns, default_card) = setup(file)?;
    Ok(BoardController::open(store, columns, default_card).await?)
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command.unwrap_or(Commands::Session) {
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "taskboard",
                &mut std::io::stdout(),
            );
        }
        Commands::Card(card_cmd) => {
            let mut controller = open(cli.file).await?;
            handlers::card::handle(&mut controller, card_cmd.action).await?;
        }
        Commands::Board(board_cmd) => match board_cmd.action {
            BoardAction::Show => {
                let mut controller = open(cli.file).await?;
                handlers::board::handle_show(&mut controller).await?;
            }
            // Reads the file as-is; opening a controller would repair it.
            BoardAction::Check => {
                let (store, columns, default_card) = setup(cli.file)?;
                handlers::board::handle_check(&store, columns, default_card).await?;
            }
        },
        Commands::Session => {
            let mut controller = open(cli.file).await?;
            let mut sink = JsonLinesSink::new(std::io::stdout());
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            run_session(&mut controller, stdin, &mut sink).await?;
        }
    }

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        output::output_error(&e.to_string());
    }

    Ok(())
}
