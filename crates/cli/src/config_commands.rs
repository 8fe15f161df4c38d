use {anyhow::Result, clap::Subcommand};

use keyseal_config::{
    KeysealConfig,
    validate::{self, Severity},
};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration as TOML.
    Show,
    /// Validate the configuration and report errors/warnings.
    Check,
}

/// Handle a config subcommand. Returns `false` when `check` found errors.
pub fn handle_config(action: ConfigAction, config: &KeysealConfig) -> Result<bool> {
    match action {
        ConfigAction::Show => {
            print!("{}", keyseal_config::to_toml_string(config)?);
            Ok(true)
        },
        ConfigAction::Check => Ok(check(config)),
    }
}

/// ANSI color codes.
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";
const RESET: &str = "\x1b[0m";

fn check(config: &KeysealConfig) -> bool {
    let result = validate::validate(config);

    for d in &result.diagnostics {
        let color = match d.severity {
            Severity::Error => RED,
            Severity::Warning => YELLOW,
            Severity::Info => CYAN,
        };
        eprintln!("{color}{}{RESET} [{}] {}: {}", d.severity, d.category, d.path, d.message);
    }

    let errors = result.count(Severity::Error);
    let warnings = result.count(Severity::Warning);
    if errors == 0 && warnings == 0 {
        eprintln!("config OK");
    } else {
        eprintln!("{errors} error(s), {warnings} warning(s)");
    }

    !result.has_errors()
}
