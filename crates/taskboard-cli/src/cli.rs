use clap::{Args, Parser, Subcommand, ValueEnum};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("TASKBOARD_BUILD_COMMIT"),
    ")"
);

#[derive(Parser)]
#[command(name = "taskboard")]
#[command(about = "A single-user task board with ordered workflow columns", long_about = None)]
#[command(version, long_version = LONG_VERSION)]
pub struct Cli {
    /// Path to the card file (or set TASKBOARD_FILE env var)
    #[arg(value_name = "FILE", env = "TASKBOARD_FILE")]
    pub file: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Card operations
    Card(CardCommand),
    /// Board operations
    Board(BoardCommand),
    /// Read JSON commands from stdin, one per line (the default)
    Session,
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Args)]
pub struct CardCommand {
    #[command(subcommand)]
    pub action: CardAction,
}

#[derive(Subcommand)]
pub enum CardAction {
    /// Add a card at the bottom of a column
    Add {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value_t = 0)]
        column: usize,
    },
    /// Replace the name and description of a card
    Edit {
        #[command(flatten)]
        at: CardRef,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Delete a card
    Delete {
        #[command(flatten)]
        at: CardRef,
    },
    /// Move a card one step
    Move {
        #[command(flatten)]
        at: CardRef,
        #[arg(long, value_enum)]
        direction: Direction,
    },
    /// List cards in display order
    List {
        #[arg(long)]
        column: Option<usize>,
    },
}

/// A card addressed by where it sits.
#[derive(Args, Clone, Copy)]
pub struct CardRef {
    #[arg(long)]
    pub column: usize,
    #[arg(long)]
    pub position: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Args)]
pub struct BoardCommand {
    #[command(subcommand)]
    pub action: BoardAction,
}

#[derive(Subcommand)]
pub enum BoardAction {
    /// Show every column with its cards
    Show,
    /// Report ordering problems in the card file without fixing them
    Check,
}
