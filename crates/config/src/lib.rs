//! Configuration loading and validation for keyseal.
//!
//! Config files: `keyseal.toml`, `keyseal.yaml`, or `keyseal.json`
//! Searched in `./` then `~/.config/keyseal/`.
//!
//! Supports `${ENV_VAR}` substitution in all string values.

pub mod env_subst;
pub mod loader;
pub mod schema;
pub mod validate;

pub use {
    loader::{config_dir, discover_and_load, find_config_file, load_config, to_toml_string},
    schema::KeysealConfig,
    validate::{Diagnostic, Severity, ValidationResult, validate},
};
