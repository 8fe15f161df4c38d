mod cipher_commands;
mod config_commands;

use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};

use {
    clap::{Parser, Subcommand},
    tracing::debug,
    tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt},
};

#[derive(Parser)]
#[command(
    name = "keyseal",
    version,
    about = "keyseal: password-derived file signing and encryption"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Output logs as JSON instead of human-readable.
    #[arg(long, global = true, default_value_t = false)]
    json_logs: bool,

    /// Config file (overrides discovery of ./keyseal.toml and ~/.config/keyseal/).
    #[arg(long, global = true, env = "KEYSEAL_CONFIG")]
    config: Option<PathBuf>,

    /// Read the password from this file instead of the environment.
    #[arg(long, global = true)]
    password_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a detached signature for a file.
    Sign {
        file: PathBuf,
        /// Signature output path (default: `<file>.sig`).
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Check a file against its detached signature.
    Verify {
        file: PathBuf,
        /// Signature path (default: `<file>.sig`).
        #[arg(short, long)]
        signature: Option<PathBuf>,
    },
    /// Encrypt a file.
    Encrypt {
        input: PathBuf,
        #[arg(short, long)]
        out: PathBuf,
        /// Write base64 text instead of raw bytes.
        #[arg(long)]
        armor: bool,
    },
    /// Decrypt a file produced by `encrypt`.
    Decrypt {
        input: PathBuf,
        #[arg(short, long)]
        out: PathBuf,
        /// Input is base64 text.
        #[arg(long)]
        armor: bool,
    },
    /// Configuration management.
    Config {
        #[command(subcommand)]
        action: config_commands::ConfigAction,
    },
}

fn init_telemetry(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    let registry = tracing_subscriber::registry().with(filter);

    // Logs go to stderr so command output on stdout stays clean.
    if cli.json_logs {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<keyseal_config::KeysealConfig> {
    match &cli.config {
        Some(path) => keyseal_config::load_config(path),
        None => Ok(keyseal_config::discover_and_load()),
    }
}

fn open_cipher(
    password_file: Option<&Path>,
    config: &keyseal_config::KeysealConfig,
) -> anyhow::Result<keyseal_cipher::Cipher> {
    let password =
        cipher_commands::resolve_password(password_file, &config.password_env, |name| {
            std::env::var(name).ok()
        })?;
    cipher_commands::build_cipher(&password, config)
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = load_config(&cli)?;
    debug!(context = %config.context, m_cost = config.kdf.m_cost, "config loaded");

    let Cli {
        command,
        password_file,
        ..
    } = cli;
    let password_file = password_file.as_deref();

    match command {
        Commands::Sign { file, out } => {
            let cipher = open_cipher(password_file, &config)?;
            let sig = cipher_commands::sign(&cipher, &file, out)?;
            println!("{}", sig.display());
        },
        Commands::Verify { file, signature } => {
            let cipher = open_cipher(password_file, &config)?;
            if cipher_commands::verify(&cipher, &file, signature)? {
                println!("valid");
            } else {
                println!("invalid");
                return Ok(ExitCode::FAILURE);
            }
        },
        Commands::Encrypt { input, out, armor } => {
            let cipher = open_cipher(password_file, &config)?;
            cipher_commands::encrypt(&cipher, &input, &out, armor)?;
        },
        Commands::Decrypt { input, out, armor } => {
            let cipher = open_cipher(password_file, &config)?;
            cipher_commands::decrypt(&cipher, &input, &out, armor)?;
        },
        Commands::Config { action } => {
            if !config_commands::handle_config(action, &config)? {
                return Ok(ExitCode::FAILURE);
            }
        },
    }

    Ok(ExitCode::SUCCESS)
}

fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_telemetry(&cli);

    debug!(version = env!("CARGO_PKG_VERSION"), "keyseal starting");

    run(cli)
}
