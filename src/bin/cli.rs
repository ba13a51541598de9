//! FarnDB CLI
//!
//! Command-line interface for a FarnDB data file.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use farndb::command::{
    parse_document, parse_optional_query, parse_patch, parse_query, Command, Response,
};
use farndb::{Config, Document, Engine, LoadMode};
use tracing_subscriber::{fmt, EnvFilter};

/// FarnDB CLI
#[derive(Parser, Debug)]
#[command(name = "farndb-cli")]
#[command(about = "Lightweight JSON document store")]
#[command(version)]
struct Args {
    /// Database file path
    #[arg(long, default_value = "farndb.json")]
    db: PathBuf,

    /// Fail instead of starting empty when the database file cannot be loaded
    #[arg(long)]
    strict: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Insert a document
    Insert {
        /// Collection name
        collection: String,

        /// JSON document to insert
        data: String,
    },

    /// Find documents
    Find {
        /// Collection name
        collection: String,

        /// JSON query (optional)
        #[arg(long)]
        query: Option<String>,

        /// Limit results
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Update documents
    Update {
        /// Collection name
        collection: String,

        /// JSON query to match documents
        query: String,

        /// JSON fields to merge into matching documents
        data: String,
    },

    /// Delete documents
    Delete {
        /// Collection name
        collection: String,

        /// JSON query to match documents ('{}' matches all)
        query: String,
    },

    /// Count documents
    Count {
        /// Collection name
        collection: String,

        /// JSON query (optional)
        #[arg(long)]
        query: Option<String>,
    },

    /// List collections
    List,

    /// Drop a collection
    Drop {
        /// Collection name
        collection: String,
    },

    /// Backup the database file
    Backup {
        /// Backup file path
        path: PathBuf,
    },
}

impl Commands {
    /// Parse JSON arguments; fails before the database is opened
    fn into_command(self) -> farndb::Result<Command> {
        Ok(match self {
            Commands::Insert { collection, data } => Command::Insert {
                collection,
                document: parse_document(&data)?,
            },
            Commands::Find {
                collection,
                query,
                limit,
            } => Command::Find {
                collection,
                query: parse_optional_query(query.as_deref())?,
                limit,
            },
            Commands::Update {
                collection,
                query,
                data,
            } => Command::Update {
                collection,
                query: parse_query(&query)?,
                patch: parse_patch(&data)?,
            },
            Commands::Delete { collection, query } => Command::Delete {
                collection,
                query: parse_query(&query)?,
            },
            Commands::Count { collection, query } => Command::Count {
                collection,
                query: parse_optional_query(query.as_deref())?,
            },
            Commands::List => Command::List,
            Commands::Drop { collection } => Command::Drop { collection },
            Commands::Backup { path } => Command::Backup { path },
        })
    }
}

fn main() -> ExitCode {
    // Initialize tracing/logging (stderr, quiet by default)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let command = match args.command.into_command() {
        Ok(command) => command,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let load_mode = if args.strict {
        LoadMode::Strict
    } else {
        LoadMode::Lenient
    };
    let config = Config::builder().path(&args.db).load_mode(load_mode).build();

    let mut engine = match Engine::open(config) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let collection = command.collection().unwrap_or_default().to_string();
    let command_type = command.command_type();
    let path = engine.path().display().to_string();
    if command_type.is_mutating() {
        tracing::info!(command = command_type.name(), %path, "executing");
    } else {
        tracing::debug!(command = command_type.name(), %path, "executing");
    }

    match engine.execute(command) {
        Ok(response) => {
            print_response(&collection, &response);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn print_response(collection: &str, response: &Response) {
    match response {
        Response::Inserted(id) => println!("Inserted document with ID: {}", id),
        Response::Documents(documents) => {
            print_documents(&format!("Documents in '{}'", collection), documents);
            println!("\nTotal: {} document(s)", documents.len());
        }
        Response::Updated(count) => println!("Updated {} document(s)", count),
        Response::Deleted(count) => println!("Deleted {} document(s)", count),
        Response::Count(count) => {
            println!("Count: {} document(s) in '{}'", count, collection)
        }
        Response::Collections(collections) if collections.is_empty() => {
            println!("No collections found")
        }
        Response::Collections(collections) => {
            println!("Collections:");
            for (name, count) in collections {
                println!("   {}: {} document(s)", name, count);
            }
        }
        Response::Dropped(true) => println!("Dropped collection '{}'", collection),
        Response::Dropped(false) => println!("Collection '{}' not found", collection),
        Response::BackedUp { path, bytes } => {
            println!("Backup created: {} ({} bytes)", path.display(), bytes)
        }
    }
}

fn print_documents(title: &str, documents: &[Document]) {
    if documents.is_empty() {
        println!("No data found.");
        return;
    }

    println!("\n{}", title);
    println!("{}", "-".repeat(50));
    for (i, document) in documents.iter().enumerate() {
        match serde_json::to_string_pretty(document) {
            Ok(text) => println!("#{}: {}", i + 1, text),
            Err(e) => println!("#{}: <unprintable: {}>", i + 1, e),
        }
    }
}
