//! devstore CLI
//!
//! Command-line interface over a filesystem-backed storage area.

use std::io::Write;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use devstore::{
    Config, DeviceStorage, NamePattern, Overwrite, SaveOutcome, SpaceKind, StorageArea,
};

/// devstore CLI
#[derive(Parser, Debug)]
#[command(name = "devstore-cli")]
#[command(about = "CLI for devstore device-storage areas")]
#[command(version)]
struct Args {
    /// Root directory holding the storage areas
    #[arg(short, long, default_value = "./devstore_data")]
    root: String,

    /// Storage area name (sdcard, music, pictures, videos, apps)
    #[arg(short, long, default_value = "sdcard")]
    area: String,

    /// Modeled area capacity in MB
    #[arg(short, long, default_value = "256")]
    capacity_mb: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check whether a file exists
    Exists {
        /// The file name to check
        name: String,
    },

    /// Save text content to a file
    Save {
        /// The file name to save to
        name: String,

        /// The text content to save
        content: String,

        /// Overwrite an existing file
        #[arg(short, long)]
        overwrite: bool,
    },

    /// Print a file's content as text
    Read {
        /// The file name to read
        name: String,
    },

    /// Print a file's name, size, and content type
    Open {
        /// The file name to open
        name: String,
    },

    /// Delete a file
    Del {
        /// The file name to delete
        name: String,
    },

    /// List files
    Ls {
        /// Path prefix to list under (default: area root)
        #[arg(default_value = "")]
        path: String,

        /// Regex to filter names with
        #[arg(short, long)]
        pattern: Option<String>,
    },

    /// Show free and used space
    Space,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,devstore=info"));

    fmt().with_env_filter(filter).with_target(true).init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> devstore::Result<()> {
    let area: StorageArea = args.area.parse()?;

    let config = Config::builder()
        .root_dir(&args.root)
        .area(area)
        .capacity_bytes(args.capacity_mb * 1024 * 1024)
        .build();

    let store = DeviceStorage::open(config)?;

    match args.command {
        Commands::Exists { name } => match store.exists(name).wait()? {
            Some(entry) => println!("{} ({} bytes)", entry.name(), entry.blob().len()),
            None => println!("not found"),
        },

        Commands::Save {
            name,
            content,
            overwrite,
        } => match store.save(content, name, Overwrite::from(overwrite)).wait()? {
            SaveOutcome::Written => println!("saved"),
            SaveOutcome::SkippedExisting => println!("exists, not overwritten"),
        },

        Commands::Read { name } => {
            let text = store.read_as_text(name).wait()?;
            let mut out = std::io::stdout().lock();
            let _ = out.write_all(text.as_bytes());
            let _ = out.write_all(b"\n");
        }

        Commands::Open { name } => {
            let entry = store.open_file(name).wait()?;
            println!(
                "{}  {} bytes  {}",
                entry.name(),
                entry.blob().len(),
                entry.blob().content_type()
            );
        }

        Commands::Del { name } => {
            store.delete(name).wait()?;
            println!("deleted");
        }

        Commands::Ls { path, pattern } => {
            let pattern = match pattern {
                Some(expr) => {
                    let re = regex::Regex::new(&expr)
                        .map_err(|e| devstore::StoreError::Backend(format!("bad pattern: {e}")))?;
                    NamePattern::Regex(re)
                }
                None => NamePattern::Any,
            };

            for entry in store.list(path, pattern).wait()? {
                println!("{}  {} bytes", entry.name(), entry.blob().len());
            }
        }

        Commands::Space => {
            let free = store.space(SpaceKind::Free).wait()?;
            let used = store.space(SpaceKind::Used).wait()?;
            println!("used: {used} bytes");
            println!("free: {free} bytes");
        }
    }

    store.close()
}
