//! Scope scanner: walks one scope directory and yields every module
//! descriptor found there, keeping broken modules as diagnostics instead of
//! failing the scan.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::descriptor::{read_descriptor, ModuleDescriptor};
use crate::errors::FootoError;
use crate::scope::Scope;

/// One valid module found on disk.
#[derive(Debug, Clone)]
pub struct LoadedModule {
    pub descriptor: ModuleDescriptor,
    pub dir: PathBuf,
    pub scope: Scope,
}

/// A module directory that carried a descriptor but failed validation.
#[derive(Debug, Clone)]
pub struct InvalidModule {
    pub dir_name: String,
    pub scope: Scope,
    pub reason: String,
}

/// Result of scanning one scope directory.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    pub modules: Vec<LoadedModule>,
    pub invalid: Vec<InvalidModule>,
}

/// Scan one scope root for modules.
///
/// A missing root is a normal state (a user with no local modules) and yields
/// an empty outcome. Entries are sorted by directory name so diagnostics are
/// stable; precedence is decided at scope level, never by intra-scope order.
pub fn scan_scope(root: &Path, scope: Scope) -> ScanOutcome {
    let mut outcome = ScanOutcome::default();

    if !root.is_dir() {
        debug!(scope = %scope, root = %root.display(), "scope directory absent, treating as empty");
        return outcome;
    }

    let entries = match std::fs::read_dir(root) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(scope = %scope, error = %e, "failed to read scope directory");
            return outcome;
        }
    };

    let mut dirs: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_dir())
        .collect();
    dirs.sort();

    for dir in dirs {
        let dir_name = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        match read_descriptor(&dir) {
            Ok(Some(descriptor)) => {
                debug!(scope = %scope, module = %descriptor.name, "found module");
                outcome.modules.push(LoadedModule {
                    descriptor,
                    dir,
                    scope,
                });
            }
            // No meta.json: not a module, skip silently.
            Ok(None) => {}
            Err(FootoError::MetadataInvalid { reason, .. }) => {
                warn!(scope = %scope, module = %dir_name, reason = %reason, "dropping invalid module");
                outcome.invalid.push(InvalidModule {
                    dir_name,
                    scope,
                    reason,
                });
            }
            Err(e) => {
                warn!(scope = %scope, module = %dir_name, error = %e, "failed to read module");
                outcome.invalid.push(InvalidModule {
                    dir_name,
                    scope,
                    reason: e.to_string(),
                });
            }
        }
    }

    outcome
}
