// dialect.rs - The two supported shell families and their invocation details

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Shell family a module's entry script is written for.
///
/// Execution requires an exact match between the module's declared dialect
/// and the caller's active dialect; there is no cross-dialect translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    Bash,
    Pwsh,
}

impl Dialect {
    /// Interpreter program and the arguments that precede the script path.
    pub fn interpreter(&self) -> (&'static str, &'static [&'static str]) {
        match self {
            Dialect::Bash => ("bash", &[]),
            Dialect::Pwsh => ("pwsh", &["-NoProfile", "-File"]),
        }
    }

    /// File extension an entry script must carry for this dialect.
    pub fn script_extension(&self) -> &'static str {
        match self {
            Dialect::Bash => ".sh",
            Dialect::Pwsh => ".ps1",
        }
    }

    /// The dialect's own keyword for evaluating a script in-place.
    pub fn source_keyword(&self) -> &'static str {
        match self {
            Dialect::Bash => "source",
            Dialect::Pwsh => ".",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::Bash => "bash",
            Dialect::Pwsh => "pwsh",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bash" => Ok(Dialect::Bash),
            "pwsh" => Ok(Dialect::Pwsh),
            other => Err(format!("unsupported shell dialect: {other}")),
        }
    }
}
