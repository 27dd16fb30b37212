//! Settings read from `MONKEY_*` environment variables
//!
//! Command-line flags win over anything set here; `main` ORs the two.

use std::env;
use std::path::PathBuf;

const DIAGNOSTICS_VAR: &str = "MONKEY_DIAGNOSTICS";
const HISTORY_FILE_VAR: &str = "MONKEY_HISTORY_FILE";
const NO_HISTORY_VAR: &str = "MONKEY_NO_HISTORY";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    /// Diagnostics go out as JSON unless asked otherwise
    pub default_json: bool,
    /// Where the REPL keeps its history, overriding `~/.monkey/history`
    pub history_file: Option<PathBuf>,
    /// Never load or save REPL history
    pub no_history: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build a config from any variable source
    ///
    /// `MONKEY_DIAGNOSTICS` must equal `json` (any case) to switch formats.
    /// `MONKEY_NO_HISTORY` only needs to be present. An empty
    /// `MONKEY_HISTORY_FILE` counts as unset.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let default_json = lookup(DIAGNOSTICS_VAR)
            .is_some_and(|format| format.trim().eq_ignore_ascii_case("json"));
        let history_file = lookup(HISTORY_FILE_VAR)
            .filter(|path| !path.is_empty())
            .map(PathBuf::from);

        Self {
            default_json,
            history_file,
            no_history: lookup(NO_HISTORY_VAR).is_some(),
        }
    }

    /// History location, or `None` when there is no home directory to fall back on
    pub fn history_path(&self) -> Option<PathBuf> {
        match &self.history_file {
            Some(path) => Some(path.clone()),
            None => dirs::home_dir().map(|home| home.join(".monkey").join("history")),
        }
    }
}
