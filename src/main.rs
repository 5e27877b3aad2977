use crate::config::{Config, DEFAULT_CONFIG_FILE};
use crate::emit::Target;
use crate::error::GeneratorError;
use crate::lexer::parse_line;
use clap::{Parser as ClapParser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod emit;
mod error;
mod generator;
mod lexer;
mod ordinal;
mod token;

#[derive(ClapParser)]
#[command(author, version, about = "Codepoint enum generator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the config file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE, global = true)]
    config: PathBuf,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate an enum for every codepoints file in a directory
    Generate {
        /// Directory to scan (defaults to input_dir from the config)
        dir: Option<PathBuf>,
        /// Language of the generated enums
        #[arg(short, long, value_enum)]
        target: Option<Target>,
        /// Extension of input files, without the dot
        #[arg(short, long)]
        extension: Option<String>,
        /// Don't echo generated files to stdout
        #[arg(short, long)]
        quiet: bool,
    },
    /// Show how lines are split into identifier and value
    Parse {
        /// Lines to tokenize
        #[arg(required = true)]
        lines: Vec<String>,
    },
    /// Manage the enumgen configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the effective configuration
    Show,
    /// Write a config file with defaults
    Init,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()))
        .with(fmt::layer().with_writer(io::stderr))
        .init();
}

fn generate(
    mut config: Config,
    dir: Option<PathBuf>,
    target: Option<Target>,
    extension: Option<String>,
    quiet: bool,
) -> Result<(), GeneratorError> {
    if let Some(dir) = dir {
        config.input_dir = dir;
    }
    if let Some(target) = target {
        config.target = target;
    }
    if let Some(extension) = extension {
        config.extension = extension.trim_start_matches('.').to_string();
    }

    let stdout = io::stdout();
    let mut stdout = stdout.lock();
    let echo: Option<&mut dyn Write> = if quiet { None } else { Some(&mut stdout) };

    let summary = generator::generate_all(
        &config.input_dir,
        &config.extension,
        config.target.emitter(),
        echo,
    )?;

    info!(
        files = summary.outputs.len(),
        members = summary.members,
        "generation complete"
    );
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load(&cli.config)?;

    match cli.command {
        Commands::Generate {
            dir,
            target,
            extension,
            quiet,
        } => {
            generate(config, dir, target, extension, quiet)?;
        }
        Commands::Parse { lines } => {
            for line in lines {
                match parse_line(&line) {
                    Ok(token) => println!("{}\t{}", token.identifier(), token.value()),
                    Err(e) => println!("Error: {} ({:?})", e, line),
                }
            }
        }
        Commands::Config { command } => match command {
            ConfigCommands::Show => {
                println!("{}", serde_json::to_string_pretty(&config)?);
            }
            ConfigCommands::Init => {
                if cli.config.exists() {
                    println!("Config file already exists at: {}", cli.config.display());
                    println!("Edit it directly or remove the file to reinitialize.");
                } else {
                    Config::default().save(&cli.config)?;
                    println!("Initialized new config file at: {}", cli.config.display());
                }
            }
        },
    }

    Ok(())
}
