//! `typeshape` – check JSON documents against descriptor notation.
//!
//! ```text
//! typeshape check '{id: number, tags: Array<string>}' payload.json
//! typeshape --config types.toml check tree - < tree.json
//! typeshape name 'Optional<(string | number)?>'
//! typeshape types
//! ```

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use typeshape::error::Result;
use typeshape::registry::Registry;
use typeshape::settings::Settings;
use typeshape::from_serialized_text;

#[derive(Parser)]
#[command(name = "typeshape", version, about = "Validate JSON against runtime type descriptors")]
struct Cli {
    /// Configuration file with named type definitions (defaults to ./typeshape.*)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Cast a JSON document to a type
    Check {
        /// Type in descriptor notation; configured names are in scope
        #[arg(value_name = "TYPE")]
        ty: String,
        /// JSON file (or - for stdin)
        #[arg(default_value = "-")]
        file: String,
    },
    /// Print the canonical name of a type
    Name {
        #[arg(value_name = "TYPE")]
        ty: String,
    },
    /// List the configured types
    Types,
}

fn read_input(file: &str) -> Result<String> {
    if file == "-" {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        Ok(fs::read_to_string(file)?)
    }
}

fn run(cli: Cli, registry: &Registry) -> Result<bool> {
    match cli.command {
        Commands::Check { ty, file } => {
            let ty = registry.parse(&ty)?;
            let text = read_input(&file)?;
            match from_serialized_text(&text, &ty) {
                Ok(_) => {
                    info!(%file, expected = %ty, "accepted");
                    println!("ok");
                    Ok(true)
                }
                Err(e) => {
                    eprintln!("{e}");
                    Ok(false)
                }
            }
        }
        Commands::Name { ty } => {
            println!("{}", registry.parse(&ty)?);
            Ok(true)
        }
        Commands::Types => {
            for (name, ty) in registry.iter() {
                println!("{name} = {ty}");
            }
            Ok(true)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match Settings::load(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::from(2);
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let outcome = Registry::from_settings(&settings).and_then(|registry| run(cli, &registry));
    match outcome {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            debug!(error = ?e, "typeshape failed");
            eprintln!("{e}");
            ExitCode::from(2)
        }
    }
}
