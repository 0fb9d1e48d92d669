//! Headless whiteboard client.
//!
//! `board` subcommands are one-shot REST calls that print the server's board
//! JSON; `join` runs a full interactive session, reading input events as
//! JSONL and mirroring remote cursors and board updates until the input
//! stream ends.

mod api;
mod error;
mod rate_limit;
mod session;
mod sync;

use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use tokio::io::AsyncReadExt;

use crate::api::ApiClient;
use crate::error::ClientError;
use crate::session::SessionConfig;

#[derive(Parser, Debug)]
#[command(name = "whiteboard-cli", about = "Collaborative whiteboard client")]
struct Cli {
    #[arg(long, env = "WHITEBOARD_BASE_URL", default_value = "http://127.0.0.1:3000")]
    base_url: String,

    #[arg(long, env = "WHITEBOARD_USERNAME")]
    username: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Board(BoardCommand),
    Join(JoinArgs),
}

#[derive(Args, Debug)]
struct BoardCommand {
    #[command(subcommand)]
    command: BoardSubcommand,
}

#[derive(Subcommand, Debug)]
enum BoardSubcommand {
    Create,
    Read {
        board_id: String,
    },
    Save {
        board_id: String,
        #[arg(long, default_value = "-", help = "Board JSON file path, or - for stdin")]
        data: String,
    },
}

#[derive(Args, Debug)]
struct JoinArgs {
    #[arg(help = "Board to join; a new board is created when omitted")]
    board_id: Option<String>,

    #[arg(long, default_value = "-", help = "Input events file path (JSONL), or - for stdin")]
    input: String,

    #[arg(long, default_value_t = false, help = "Print each rendered scene as a JSON line")]
    emit_scenes: bool,

    #[arg(long, default_value_t = 1280.0)]
    width: f64,

    #[arg(long, default_value_t = 720.0)]
    height: f64,

    #[arg(long, default_value_t = 50)]
    cursor_window_ms: u64,
}

#[tokio::main]
async fn main() -> Result<(), ClientError> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let api = ApiClient::new(&cli.base_url);

    match cli.command {
        Command::Board(board) => run_board(&api, board).await,
        Command::Join(join) => {
            let config = SessionConfig {
                board_id: join.board_id,
                username: cli.username,
                input: join.input,
                viewport_width: join.width,
                viewport_height: join.height,
                cursor_window: Duration::from_millis(join.cursor_window_ms),
                emit_scenes: join.emit_scenes,
            };
            session::run(api, config).await
        }
    }
}

async fn run_board(api: &ApiClient, board: BoardCommand) -> Result<(), ClientError> {
    match board.command {
        BoardSubcommand::Create => {
            let board = api.create().await?;
            eprintln!("{}", api.board_url(&board.id));
            print_json(&board)
        }
        BoardSubcommand::Read { board_id } => {
            let board = api.load(&board_id).await?;
            print_json(&board)
        }
        BoardSubcommand::Save { board_id, data } => {
            let mut board: board::doc::Board = serde_json::from_str(&read_input(&data).await?)?;
            board.id = board_id;
            if api.save(&board).await? {
                print_json(&board)
            } else {
                Err(ClientError::SaveRejected)
            }
        }
    }
}

async fn read_input(path: &str) -> Result<String, ClientError> {
    if path == "-" {
        let mut buffer = String::new();
        tokio::io::stdin().read_to_string(&mut buffer).await?;
        Ok(buffer)
    } else {
        Ok(tokio::fs::read_to_string(path).await?)
    }
}

fn print_json(board: &board::doc::Board) -> Result<(), ClientError> {
    println!("{}", serde_json::to_string_pretty(board)?);
    Ok(())
}
