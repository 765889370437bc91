//! Module scaffolding: `footo create <name>` writes a fresh local module
//! (descriptor plus template entry script) and hands the files to the user's
//! editor. The descriptor is serialized with the same types the metadata
//! reader parses, so a scaffolded module always round-trips.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{info, warn};

use crate::config_loader::FootoConfig;
use crate::descriptor::{validate_module_name, ModuleDescriptor, META_FILE};
use crate::dialect::Dialect;
use crate::errors::{FootoError, FootoResult};
use crate::registry::ModuleRegistry;
use crate::scope::Scope;

/// Editors we will auto-launch. Anything else is skipped with a warning; the
/// user can always open the files by hand.
const SAFE_EDITORS: [&str; 14] = [
    "nano", "vim", "vi", "emacs", "code", "notepad", "subl", "sublime", "atom", "gedit", "kate",
    "micro", "joe", "ne",
];

/// Files created for a new module.
#[derive(Debug)]
pub struct ScaffoldedModule {
    pub dir: PathBuf,
    pub meta_path: PathBuf,
    pub script_path: PathBuf,
}

/// Create a new module skeleton in the `local` scope.
///
/// Refuses names that already resolve in any scope so a new local module
/// never silently shadows a bundled one at creation time.
pub fn create_module(
    config: &FootoConfig,
    registry: &ModuleRegistry,
    name: &str,
    dialect: Dialect,
) -> FootoResult<ScaffoldedModule> {
    validate_module_name(name)?;

    if let Some(existing) = registry.get(name) {
        return Err(FootoError::validation(
            "name",
            format!(
                "module '{name}' already exists in {} scope",
                existing.module.scope
            ),
        ));
    }

    let dir = config.scope_dir(Scope::Local).join(name);
    if dir.exists() {
        return Err(FootoError::validation(
            "name",
            format!("directory already exists: {}", dir.display()),
        ));
    }
    std::fs::create_dir_all(&dir)
        .map_err(|e| FootoError::io(format!("creating {}", dir.display()), e))?;
    set_permissions(&dir, 0o700);

    let entry = format!("script{}", dialect.script_extension());
    let descriptor = ModuleDescriptor {
        name: name.to_string(),
        version: "0.1.0".to_string(),
        description: format!("A new {name} module."),
        lang: dialect,
        entry: entry.clone(),
    };

    let meta_path = dir.join(META_FILE);
    let meta_json = serde_json::to_string_pretty(&descriptor)
        .map_err(|e| FootoError::metadata_invalid(name, e.to_string()))?;
    std::fs::write(&meta_path, meta_json)
        .map_err(|e| FootoError::io(format!("writing {}", meta_path.display()), e))?;
    set_permissions(&meta_path, 0o600);

    let script_path = dir.join(&entry);
    std::fs::write(&script_path, script_template(&descriptor))
        .map_err(|e| FootoError::io(format!("writing {}", script_path.display()), e))?;
    set_permissions(&script_path, 0o700);

    info!(module = name, dir = %dir.display(), "module scaffolded");

    Ok(ScaffoldedModule {
        dir,
        meta_path,
        script_path,
    })
}

fn script_template(descriptor: &ModuleDescriptor) -> String {
    match descriptor.lang {
        Dialect::Bash => format!(
            "#!/usr/bin/env bash\n\
             # Module: {name}\n\
             # {description}\n\n\
             set -euo pipefail\n\n\
             echo \"Hello from {name}!\"\n",
            name = descriptor.name,
            description = descriptor.description,
        ),
        Dialect::Pwsh => format!(
            "# Module: {name}\n\
             # {description}\n\n\
             Write-Output \"Hello from {name}!\"\n",
            name = descriptor.name,
            description = descriptor.description,
        ),
    }
}

#[cfg(unix)]
fn set_permissions(path: &Path, mode: u32) {
    use std::os::unix::fs::PermissionsExt;
    if let Err(e) = std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode)) {
        warn!(path = %path.display(), error = %e, "failed to set permissions");
    }
}

#[cfg(not(unix))]
fn set_permissions(_path: &Path, _mode: u32) {}

/// Best-effort editor launch against the whitelist. Never fatal.
pub fn open_in_editor(config: &FootoConfig, files: &[&Path]) -> bool {
    let editor = match config
        .editor
        .clone()
        .or_else(|| std::env::var("EDITOR").ok())
    {
        Some(editor) if !editor.trim().is_empty() => editor,
        _ => return false,
    };

    let program = editor.split_whitespace().next().unwrap_or(&editor);
    let editor_name = Path::new(program)
        .file_name()
        .map(|n| n.to_string_lossy().to_lowercase().replace(".exe", ""))
        .unwrap_or_default();

    if !SAFE_EDITORS.contains(&editor_name.as_str()) {
        warn!(editor = %editor, "editor not in whitelist, skipping auto-open");
        return false;
    }

    match Command::new(program).args(files).spawn() {
        Ok(_) => true,
        Err(e) => {
            warn!(editor = %editor, error = %e, "failed to launch editor");
            false
        }
    }
}
