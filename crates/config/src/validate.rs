//! Configuration validation.
//!
//! Reports Argon2 parameters the KDF would reject as errors and parameters
//! below the OWASP-recommended Argon2id floor as warnings.

use crate::schema::KeysealConfig;

/// Minimum memory cost (KiB) before a weak-parameter warning is raised.
pub const RECOMMENDED_MIN_M_COST: u32 = 19456;

/// Minimum iteration count before a weak-parameter warning is raised.
pub const RECOMMENDED_MIN_T_COST: u32 = 2;

/// Severity level for a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
            Self::Info => write!(f, "info"),
        }
    }
}

/// A single validation diagnostic.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Category: "kdf", "security", "context"
    pub category: &'static str,
    /// Dotted path, e.g. "kdf.m_cost"
    pub path: String,
    pub message: String,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] {}: {}",
            self.severity, self.category, self.path, self.message
        )
    }
}

/// Result of validating a configuration.
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub diagnostics: Vec<Diagnostic>,
}

impl ValidationResult {
    /// Returns `true` if any diagnostic is an error.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Count diagnostics by severity.
    #[must_use]
    pub fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    fn push(
        &mut self,
        severity: Severity,
        category: &'static str,
        path: &str,
        message: impl Into<String>,
    ) {
        self.diagnostics.push(Diagnostic {
            severity,
            category,
            path: path.to_string(),
            message: message.into(),
        });
    }
}

/// Validate a loaded configuration.
#[must_use]
pub fn validate(config: &KeysealConfig) -> ValidationResult {
    let mut result = ValidationResult::default();

    if let Err(e) = config.kdf.validate() {
        result.push(Severity::Error, "kdf", "kdf", e.to_string());
    } else {
        if config.kdf.m_cost < RECOMMENDED_MIN_M_COST {
            result.push(
                Severity::Warning,
                "security",
                "kdf.m_cost",
                format!(
                    "memory cost {} KiB is below the recommended {RECOMMENDED_MIN_M_COST} KiB",
                    config.kdf.m_cost
                ),
            );
        }
        if config.kdf.t_cost < RECOMMENDED_MIN_T_COST {
            result.push(
                Severity::Warning,
                "security",
                "kdf.t_cost",
                format!(
                    "{} iteration(s) is below the recommended {RECOMMENDED_MIN_T_COST}",
                    config.kdf.t_cost
                ),
            );
        }
    }

    if config.context.trim().is_empty() {
        result.push(
            Severity::Error,
            "context",
            "context",
            "context must not be empty",
        );
    }

    if config.password_env.trim().is_empty() {
        result.push(
            Severity::Error,
            "context",
            "password_env",
            "password_env must name an environment variable",
        );
    }

    result
}

#[cfg(test)]
mod tests {
    use {super::*, keyseal_cipher::KdfParams, rstest::rstest};

    #[test]
    fn default_config_is_clean() {
        let result = validate(&KeysealConfig::default());
        assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
    }

    #[rstest]
    #[case::weak_memory(1024, 3, "kdf.m_cost")]
    #[case::single_pass(65536, 1, "kdf.t_cost")]
    fn weak_params_warn(#[case] m_cost: u32, #[case] t_cost: u32, #[case] path: &str) {
        let config = KeysealConfig {
            kdf: KdfParams {
                m_cost,
                t_cost,
                p_cost: 1,
            },
            ..KeysealConfig::default()
        };

        let result = validate(&config);
        assert!(!result.has_errors());
        assert_eq!(result.count(Severity::Warning), 1);
        assert_eq!(result.diagnostics[0].path, path);
    }

    #[test]
    fn invalid_params_error() {
        let config = KeysealConfig {
            kdf: KdfParams {
                m_cost: 0,
                t_cost: 0,
                p_cost: 0,
            },
            ..KeysealConfig::default()
        };

        let result = validate(&config);
        assert!(result.has_errors());
        assert_eq!(result.diagnostics[0].category, "kdf");
    }

    #[test]
    fn empty_context_error() {
        let config = KeysealConfig {
            context: "  ".to_string(),
            ..KeysealConfig::default()
        };

        let result = validate(&config);
        assert!(result.has_errors());
        assert_eq!(result.diagnostics[0].path, "context");
    }

    #[test]
    fn diagnostic_display() {
        let d = Diagnostic {
            severity: Severity::Warning,
            category: "security",
            path: "kdf.t_cost".to_string(),
            message: "too low".to_string(),
        };
        assert_eq!(d.to_string(), "warning [security] kdf.t_cost: too low");
    }
}
