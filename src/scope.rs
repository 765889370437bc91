// scope.rs - Module origin tiers and their precedence order

use std::fmt;

use serde::{Deserialize, Serialize};

/// Origin tier a module was loaded from.
///
/// `Local` always shadows `Bundled`. `Community` is reserved in the data
/// model for forward compatibility and is never scanned in this version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Local,
    Bundled,
    Community,
}

/// Scopes in precedence order. The registry builder scans these and only
/// these; `Community` is deliberately absent.
pub const SCAN_ORDER: [Scope; 2] = [Scope::Local, Scope::Bundled];

impl Scope {
    /// Directory name under `<home>/modules/` for this scope.
    pub fn dir_name(&self) -> &'static str {
        match self {
            Scope::Local => "local",
            Scope::Bundled => "bundled",
            Scope::Community => "community",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}
