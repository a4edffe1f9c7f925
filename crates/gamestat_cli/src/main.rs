//! Command-line presentation layer for the character roster.
//!
//! # Responsibility
//! - Collect and validate user input, then invoke Record Store operations.
//! - Re-fetch and re-render the full roster after every successful mutation.
//!
//! # Invariants
//! - Level input is parsed as `u32` by clap, so negative or non-numeric
//!   values never reach the store.
//! - Not-found and validation failures exit non-zero without state change.

use clap::{Parser, Subcommand};
use gamestat_core::db::open_db;
use gamestat_core::{
    default_log_level, init_logging, Character, RepoError, RosterService,
    SqliteCharacterRepository,
};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "gamestat", version, about = "Character roster over a local SQLite store")]
struct Cli {
    /// Roster database file; created automatically on first run.
    #[arg(long, global = true, default_value = "gamestat.db")]
    db: PathBuf,

    /// Directory for rolling log files. Logging is off when omitted.
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Add a character and print the refreshed roster.
    Add {
        name: String,
        weapon: String,
        level: u32,
        realm: String,
    },
    /// Print the roster ordered by id.
    List {
        /// Emit the roster as JSON instead of the table view.
        #[arg(long)]
        json: bool,
    },
    /// Overwrite all fields of an existing character.
    Update {
        id: i64,
        name: String,
        weapon: String,
        level: u32,
        realm: String,
    },
    /// Delete a character by id.
    Delete { id: i64 },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(message) = setup_logging(cli.log_dir.as_deref()) {
        eprintln!("error: {message}");
        return ExitCode::FAILURE;
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn setup_logging(log_dir: Option<&std::path::Path>) -> Result<(), String> {
    let Some(dir) = log_dir else {
        return Ok(());
    };
    let absolute = if dir.is_absolute() {
        dir.to_path_buf()
    } else {
        std::env::current_dir()
            .map_err(|err| format!("cannot resolve current directory: {err}"))?
            .join(dir)
    };
    let dir_str = absolute
        .to_str()
        .ok_or_else(|| format!("log directory `{}` is not valid UTF-8", absolute.display()))?;
    init_logging(default_log_level(), dir_str)
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let conn = open_db(&cli.db)?;
    let repo = SqliteCharacterRepository::try_new(&conn)?;
    let service = RosterService::new(repo);

    match &cli.command {
        Command::Add {
            name,
            weapon,
            level,
            realm,
        } => {
            let created = service.create_character(name, weapon, *level, realm)?;
            println!("added {} (id {})", created.name, created.id);
            print_roster(&service.list_characters()?);
        }
        Command::List { json } => {
            let roster = service.list_characters()?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&roster)?);
            } else {
                print_roster(&roster);
            }
        }
        Command::Update {
            id,
            name,
            weapon,
            level,
            realm,
        } => {
            let updated = service.update_character(*id, name, weapon, *level, realm)?;
            println!("updated {} (id {})", updated.name, updated.id);
            print_roster(&service.list_characters()?);
        }
        Command::Delete { id } => {
            if !service.delete_character(*id)? {
                return Err(Box::new(RepoError::NotFound(*id)));
            }
            println!("deleted id {id}");
            print_roster(&service.list_characters()?);
        }
    }

    Ok(())
}

fn print_roster(roster: &[Character]) {
    if roster.is_empty() {
        println!("(roster is empty)");
        return;
    }
    for character in roster {
        println!("{}", format_row(character));
    }
}

fn format_row(character: &Character) -> String {
    format!(
        "{}: {} - Lv {} ({}) [{}]",
        character.id, character.name, character.level, character.weapon, character.realm
    )
}
