use std::path::PathBuf;

use clap::{Parser, Subcommand};
use quaddb::Database;
use serde_json::Value;
use tracing::debug;

use crate::config::{Overrides, Settings};

/// Activity command module.
pub mod activity;
/// Collections command module.
pub mod collections;
/// Count command module.
pub mod count;
/// Delete command module.
pub mod delete;
/// Find command module.
pub mod find;
/// Generate key command module.
pub mod generate_key;
/// Get command module.
pub mod get;
/// Insert command module.
pub mod insert;
/// List command module.
pub mod list;
/// Search command module.
pub mod search;
/// Update command module.
pub mod update;

/// The CLI for the QuadDB encrypted document store.
///
/// Every command prints its result as JSON on stdout. Logs go to stderr.
#[derive(Parser)]
#[command(name = "quaddb", version, about = "Encrypted, file-backed document store")]
pub struct Cli {
    #[command(subcommand)]
    /// The subcommand to execute.
    pub command: Commands,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase verbosity (can be used multiple times: -v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// TOML config file (default: ./config/config.toml when present)
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the collection files
    #[arg(long, value_name = "DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Secret the collection key is derived from (SHA-256)
    #[arg(long, value_name = "SECRET", global = true)]
    pub aes_key: Option<String>,
}

impl Cli {
    /// Command line values that take precedence over the config file.
    pub fn overrides(&self) -> Overrides {
        Overrides {
            config_file: self.config.clone(),
            data_dir:    self.data_dir.clone(),
            aes_key:     self.aes_key.clone(),
        }
    }
}

/// Enumeration of all available CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Generate a random AES key and print it hex encoded.
    ///
    /// The hex string can be used as the secret given to --aes-key.
    #[command(visible_alias = "gen")]
    GenerateKey(generate_key::GenerateKeyArgs),
    /// Insert a document, or a JSON array of {id, data} objects.
    Insert(insert::InsertArgs),
    /// Retrieve a document by id.
    Get(get::GetArgs),
    /// Replace the payload of an existing document.
    Update(update::UpdateArgs),
    /// Delete a document.
    Delete(delete::DeleteArgs),
    /// List a page of documents, ordered by id.
    List(list::ListArgs),
    /// Count the documents of a collection.
    Count(count::CountArgs),
    /// List every collection with its document count.
    Collections,
    /// Query the field index with field=value filters, all of which must match.
    Search(search::SearchArgs),
    /// Scan a collection for documents whose field path equals a value exactly.
    Find(find::FindArgs),
    /// Show collection counts and the access activity of this run.
    Activity,
}

/// Execute the specified CLI command.
///
/// Every command except `generate-key` loads the layered settings and opens
/// the database before dispatching to its command module.
///
/// # Returns
/// The JSON value to print, or the first error hit.
pub fn run_command(cli: Cli) -> quaddb::Result<Value> {
    let overrides = cli.overrides();
    let open_database = || -> quaddb::Result<Database> {
        let settings = Settings::load(&overrides)?;
        let db = settings.open_database()?;
        debug!("Database ready at {:?}", db.data_dir());
        Ok(db)
    };

    match cli.command {
        Commands::GenerateKey(args) => generate_key::run(&args),
        Commands::Insert(args) => insert::run(args, &open_database()?),
        Commands::Get(args) => get::run(&args, &open_database()?),
        Commands::Update(args) => update::run(&args, &open_database()?),
        Commands::Delete(args) => delete::run(&args, &open_database()?),
        Commands::List(args) => list::run(&args, &open_database()?),
        Commands::Count(args) => count::run(&args, &open_database()?),
        Commands::Collections => collections::run(&open_database()?),
        Commands::Search(args) => search::run(&args, &open_database()?),
        Commands::Find(args) => find::run(&args, &open_database()?),
        Commands::Activity => activity::run(&open_database()?),
    }
}
