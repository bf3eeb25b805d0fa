use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::error;

use photocat::config::Config;
use photocat::db::Database;
use photocat::magick::Magick;
use photocat::Catalog;

enum Command {
    Import(Vec<PathBuf>),
    Inspect(PathBuf),
    Show(String),
}

struct Args {
    config_path: Option<PathBuf>,
    no_thumbnail: bool,
    command: Command,
}

fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().collect();
    let mut config_path = None;
    let mut no_thumbnail = false;
    let mut positional = Vec::new();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            "--version" | "-V" => {
                println!("photocat {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                } else {
                    eprintln!("Error: --config requires a path argument");
                    std::process::exit(1);
                }
            }
            "--no-thumbnail" => no_thumbnail = true,
            arg if arg.starts_with('-') => {
                eprintln!("Unknown argument: {}", arg);
                print_help();
                std::process::exit(1);
            }
            arg => positional.push(arg.to_string()),
        }
        i += 1;
    }

    let mut positional = positional.into_iter();
    let command = match (positional.next().as_deref(), positional.len()) {
        (Some("import"), n) if n > 0 => Command::Import(positional.map(PathBuf::from).collect()),
        (Some("inspect"), 1) => Command::Inspect(PathBuf::from(positional.next().unwrap_or_default())),
        (Some("show"), 1) => Command::Show(positional.next().unwrap_or_default()),
        _ => {
            print_help();
            std::process::exit(1);
        }
    };

    Args {
        config_path,
        no_thumbnail,
        command,
    }
}

fn print_help() {
    println!(
        r#"photocat - catalog photos using ImageMagick metadata

USAGE:
    photocat [OPTIONS] import FILE...
    photocat [OPTIONS] inspect FILE
    photocat [OPTIONS] show SIGNATURE

COMMANDS:
    import              Read metadata (and a thumbnail) and store each file
    inspect             Print the normalized metadata as JSON, store nothing
    show                Print a stored record

OPTIONS:
    --config, -c PATH   Path to config file
    --no-thumbnail      Skip thumbnail generation on import
    --version, -V       Show version
    --help, -h          Show this help message

ENVIRONMENT:
    PHOTOCAT_CONFIG     Path to config file (overrides default location)
    PHOTOCAT_MAGICK     Path to the magick executable
    PHOTOCAT_DB         Path to the database file
    PHOTOCAT_LOG        Log level (trace, debug, info, warn, error)

Config file location: $XDG_CONFIG_HOME/photocat/config.toml"#
    );
}

fn main() -> Result<()> {
    let args = parse_args();

    let _ = photocat::logging::init(Some(Config::config_dir().join("logs")));

    let mut config = match &args.config_path {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if args.no_thumbnail {
        config.thumbnails.enabled = false;
    }

    let magick = Magick::new(&config.magick);

    // Inspecting never reads or writes the store
    if let Command::Inspect(path) = &args.command {
        let record = photocat::catalog::inspect(&magick, path)
            .with_context(|| format!("inspecting {}", path.display()))?;
        println!("{}", serde_json::to_string_pretty(&record)?);
        return Ok(());
    }

    let db = Database::open(&config.db_path)
        .with_context(|| format!("opening database {}", config.db_path.display()))?;
    db.initialize()?;

    let catalog = Catalog::new(magick, db, config.thumbnails.clone());
    let outcome = run(&catalog, args.command);
    let closed = catalog.into_db().close();

    if !finish(outcome, closed)? {
        std::process::exit(1);
    }
    Ok(())
}

/// Combine a command's outcome with the store's close result.
///
/// The command's own error wins over a close failure.
fn finish(outcome: Result<bool>, closed: photocat::Result<()>) -> Result<bool> {
    let ok = outcome?;
    closed.context("closing database")?;
    Ok(ok)
}

/// Run one command. `Ok(false)` means some files failed to import.
fn run(catalog: &Catalog, command: Command) -> Result<bool> {
    match command {
        Command::Import(paths) => {
            let mut failures = 0;
            for path in &paths {
                match catalog.import(path) {
                    Ok(record) => println!("{}", record),
                    Err(e) => {
                        error!(file = ?path, "Import failed: {}", e);
                        eprintln!("{}: {}", path.display(), e);
                        failures += 1;
                    }
                }
            }
            Ok(failures == 0)
        }
        Command::Inspect(path) => {
            let record = catalog
                .inspect(&path)
                .with_context(|| format!("inspecting {}", path.display()))?;
            println!("{}", serde_json::to_string_pretty(&record)?);
            Ok(true)
        }
        Command::Show(signature) => {
            let record = catalog.db().load(&signature)?;
            println!("{}", record.describe());
            Ok(true)
        }
    }
}
