//! Validated run configuration.

use std::path::PathBuf;

use crate::cli::ScanArgs;
use crate::error::{ScanError, ScanResult};
use crate::verify::RateTier;

/// Environment variable holding the breach lookup API key.
pub const HIBP_API_KEY_VAR: &str = "BREACHSCAN_HIBP_API_KEY";
/// Environment variable holding the directory bearer token.
pub const GRAPH_TOKEN_VAR: &str = "BREACHSCAN_GRAPH_TOKEN";

/// How the seed groups were supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Seeds {
    /// Object ids, used as-is.
    Ids(Vec<String>),
    /// Display names, resolved to ids before traversal.
    Names(Vec<String>),
}

/// Everything a scan needs, after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    /// Starting groups.
    pub seeds: Seeds,
    /// Descend into nested groups.
    pub expand_nested: bool,
    /// Breach lookup budget.
    pub rate: RateTier,
    /// Enumerate members only.
    pub skip_breach_check: bool,
    /// Present whenever the breach check runs.
    pub api_key: Option<String>,
    /// HTML report path.
    pub output: PathBuf,
    /// Browser to print the PDF with; `None` when no PDF was requested.
    pub pdf_browser: Option<String>,
}

impl ScanConfig {
    /// Validates parsed arguments, reading secrets through `env`.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Config`] when no seeds were given, a seed is
    /// blank, or the API key is missing while the breach check is enabled.
    pub fn from_args(
        args: &ScanArgs,
        env: impl Fn(&str) -> Option<String>,
    ) -> ScanResult<Self> {
        let seeds = match (args.group_ids.is_empty(), args.group_names.is_empty()) {
            (false, true) => Seeds::Ids(clean(&args.group_ids, "--group-id")?),
            (true, false) => Seeds::Names(clean(&args.group_names, "--group-name")?),
            (true, true) => {
                return Err(ScanError::Config(
                    "one of --group-id or --group-name is required".into(),
                ))
            }
            (false, false) => {
                return Err(ScanError::Config(
                    "--group-id and --group-name cannot be combined".into(),
                ))
            }
        };

        let api_key = if args.skip_breach_check {
            None
        } else {
            let key = secret(&env, HIBP_API_KEY_VAR).ok_or_else(|| {
                ScanError::Config(format!(
                    "{HIBP_API_KEY_VAR} is not set; set it or pass --skip-breach-check"
                ))
            })?;
            Some(key)
        };

        Ok(Self {
            seeds,
            expand_nested: !args.no_nested,
            rate: args.rate,
            skip_breach_check: args.skip_breach_check,
            api_key,
            output: args.output.clone(),
            pdf_browser: args.pdf.then(|| args.browser.clone()),
        })
    }
}

/// Reads the directory bearer token through `env`.
///
/// # Errors
///
/// Returns [`ScanError::Config`] when the token is unset or blank.
pub fn graph_token(env: impl Fn(&str) -> Option<String>) -> ScanResult<String> {
    secret(&env, GRAPH_TOKEN_VAR)
        .ok_or_else(|| ScanError::Config(format!("{GRAPH_TOKEN_VAR} is not set")))
}

/// Process environment, after loading `.env` from the working directory.
pub fn process_env() -> impl Fn(&str) -> Option<String> {
    let _ = dotenvy::dotenv();
    |key: &str| std::env::var(key).ok()
}

fn secret(env: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    env(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn clean(values: &[String], flag: &str) -> ScanResult<Vec<String>> {
    values
        .iter()
        .map(|v| {
            let v = v.trim();
            if v.is_empty() {
                Err(ScanError::Config(format!("{flag} must not be empty")))
            } else {
                Ok(v.to_string())
            }
        })
        .collect()
}
