//! Archsync CLI
//!
//! Command-line interface for archsync - upload, download and archive
//! software architecture workspaces.

mod commands;
mod config;
mod display;

use std::path::PathBuf;

use anyhow::Result;
use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use url::Url;

use archsync_core::EncryptionAlgorithm;
use config::CliConfig;

#[derive(Parser)]
#[command(name = "archsync")]
#[command(version, about = "Workspace client with encryption and local archive")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Workspace API base URL
    #[arg(
        long,
        global = true,
        env = "ARCHSYNC_API_URL",
        default_value = "https://api.structurizr.com"
    )]
    api_url: Url,

    /// API key
    #[arg(long, global = true, env = "ARCHSYNC_API_KEY", default_value = "")]
    api_key: String,

    /// API secret
    #[arg(
        long,
        global = true,
        env = "ARCHSYNC_API_SECRET",
        default_value = "",
        hide_env_values = true
    )]
    api_secret: String,

    /// Directory receiving a copy of every upload
    #[arg(long, global = true, env = "ARCHSYNC_ARCHIVE_DIR")]
    archive_dir: Option<PathBuf>,

    /// Passphrase for client-side encryption
    #[arg(long, global = true, env = "ARCHSYNC_PASSPHRASE", hide_env_values = true)]
    passphrase: Option<String>,

    /// Encryption algorithm used with --passphrase
    #[arg(
        long,
        global = true,
        env = "ARCHSYNC_ENCRYPTION",
        value_enum,
        ignore_case = true,
        default_value_t = AlgorithmArg::Aes
    )]
    algorithm: AlgorithmArg,

    /// Merge layout from the remote workspace before uploading
    #[arg(
        long,
        global = true,
        env = "ARCHSYNC_MERGE_FROM_REMOTE",
        default_value_t = true,
        action = ArgAction::Set,
        value_parser = BoolishValueParser::new()
    )]
    merge_from_remote: bool,

    /// Shorthand for --merge-from-remote false
    #[arg(long, global = true)]
    no_merge: bool,

    /// User recorded as the last modifier of uploads
    #[arg(long, global = true, env = "ARCHSYNC_USER")]
    user: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "ARCHSYNC_TIMEOUT_SECS", default_value_t = 60)]
    timeout: u64,
}

#[derive(Clone, Copy, ValueEnum)]
enum AlgorithmArg {
    /// AES-256-GCM, PBKDF2 key derivation
    Aes,
    /// XChaCha20-Poly1305, Argon2id key derivation
    Xchacha20,
}

impl From<AlgorithmArg> for EncryptionAlgorithm {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::Aes => EncryptionAlgorithm::Aes,
            AlgorithmArg::Xchacha20 => EncryptionAlgorithm::XChaCha20,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Download a workspace
    Get {
        /// Workspace id
        id: i64,

        /// Output file (default: stdout)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Upload a workspace JSON file
    Put {
        /// Workspace id
        id: i64,

        /// Workspace JSON file
        file: PathBuf,
    },

    /// Browse the local archive
    #[command(subcommand)]
    Archive(ArchiveCommands),

    /// Decrypt an encrypted workspace file
    Decrypt {
        /// Encrypted workspace file
        file: PathBuf,

        /// Output file (default: stdout)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum ArchiveCommands {
    /// List archived uploads
    List {
        /// Only uploads of this workspace
        #[arg(long)]
        id: Option<i64>,
    },

    /// Show the header of an archived upload
    Show {
        /// Archived file
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("archsync_core=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    let config = CliConfig {
        api_url: cli.api_url,
        api_key: cli.api_key,
        api_secret: cli.api_secret,
        archive_dir: cli.archive_dir,
        passphrase: cli.passphrase,
        algorithm: cli.algorithm.into(),
        merge_from_remote: cli.merge_from_remote && !cli.no_merge,
        user: cli.user,
        timeout_secs: cli.timeout,
    };

    match cli.command {
        Commands::Get { id, output } => commands::get::run(&config, id, output.as_deref())?,
        Commands::Put { id, file } => commands::put::run(&config, id, &file)?,
        Commands::Archive(cmd) => match cmd {
            ArchiveCommands::List { id } => commands::archive::list(&config, id)?,
            ArchiveCommands::Show { file } => commands::archive::show(&file)?,
        },
        Commands::Decrypt { file, output } => {
            commands::decrypt::run(&config, &file, output.as_deref())?;
        }
    }

    Ok(())
}
