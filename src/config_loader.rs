//! Layered configuration: defaults, then `<home>/footo.toml`, then `FOOTO_*`
//! environment variables. The resolved config is threaded explicitly into the
//! registry builder and scaffolder; there is no process-wide mutable state.

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::dialect::Dialect;
use crate::errors::{FootoError, FootoResult};
use crate::scope::Scope;

/// Name of the per-user config file inside the footo home directory.
const CONFIG_FILE: &str = "footo.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FootoConfig {
    /// Root of the footo tree (module scopes live under `<home>/modules`).
    pub home: PathBuf,
    /// Active shell dialect, unless overridden on the command line.
    #[serde(default = "default_shell")]
    pub shell: String,
    /// Editor to launch after scaffolding; falls back to `$EDITOR`.
    #[serde(default)]
    pub editor: Option<String>,
}

fn default_shell() -> String {
    "bash".to_string()
}

impl FootoConfig {
    pub fn modules_dir(&self) -> PathBuf {
        self.home.join("modules")
    }

    pub fn scope_dir(&self, scope: Scope) -> PathBuf {
        self.modules_dir().join(scope.dir_name())
    }

    /// Active dialect from config, or the explicit CLI override.
    pub fn active_dialect(&self, override_shell: Option<Dialect>) -> FootoResult<Dialect> {
        if let Some(dialect) = override_shell {
            return Ok(dialect);
        }
        self.shell
            .parse()
            .map_err(|e: String| FootoError::config(e))
    }

    /// Create the scope directory tree if it does not exist yet.
    ///
    /// All three scope directories are created, including the reserved
    /// `community` tier, matching the on-disk layout contract.
    pub fn ensure_directories(&self) -> FootoResult<()> {
        for scope in [Scope::Local, Scope::Bundled, Scope::Community] {
            let dir = self.scope_dir(scope);
            std::fs::create_dir_all(&dir)
                .map_err(|e| FootoError::io(format!("creating {}", dir.display()), e))?;
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct FootoConfigDefaults {
    home: PathBuf,
    shell: String,
}

fn default_home() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".footo")
}

/// Load config with the home directory resolved first.
///
/// `FOOTO_HOME` (or the explicit override) decides where `footo.toml` lives,
/// so the env layer is consulted for the home before the TOML file is merged.
pub fn load_config(home_override: Option<&Path>) -> FootoResult<FootoConfig> {
    let home = home_override
        .map(Path::to_path_buf)
        .or_else(|| std::env::var_os("FOOTO_HOME").map(PathBuf::from))
        .unwrap_or_else(default_home);

    let figment = Figment::from(Serialized::defaults(FootoConfigDefaults {
        home: home.clone(),
        shell: default_shell(),
    }))
    .merge(Toml::file(home.join(CONFIG_FILE)))
    .merge(Env::prefixed("FOOTO_"));

    let mut config: FootoConfig = figment
        .extract()
        .map_err(|e| FootoError::config(e.to_string()))?;

    // The home was already resolved above (explicit override first, then
    // FOOTO_HOME, then the default); the env layer merged after the defaults
    // must not let FOOTO_HOME beat an explicit override.
    config.home = home;

    // The shell key must parse; reject garbage here rather than at dispatch.
    config
        .shell
        .parse::<Dialect>()
        .map_err(FootoError::config)?;

    Ok(config)
}
