//! Metadata reader: parses one module's `meta.json` into a validated
//! [`ModuleDescriptor`].
//!
//! A directory without a `meta.json` is simply not a module; everything else
//! that fails validation is a metadata error for that one module and never
//! aborts the surrounding scan.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::dialect::Dialect;
use crate::errors::{FootoError, FootoResult};

/// Descriptor file name inside each module directory.
pub const META_FILE: &str = "meta.json";

/// Upper bound on descriptor file size.
const MAX_META_SIZE: u64 = 100 * 1024;

/// Maximum length for a module name.
const MAX_NAME_LEN: usize = 50;

/// Windows device names that must not be used as module directory names.
const RESERVED_NAMES: [&str; 12] = [
    "con", "prn", "aux", "nul", "com1", "com2", "com3", "com4", "lpt1", "lpt2", "lpt3", "lpt4",
];

/// Identity and execution metadata for one module.
///
/// Unknown extra fields in `meta.json` are ignored for forward compatibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleDescriptor {
    pub name: String,
    pub version: String,
    pub description: String,
    pub lang: Dialect,
    pub entry: String,
}

impl ModuleDescriptor {
    /// Absolute path of the entry script given the module directory.
    pub fn entry_path(&self, module_dir: &Path) -> PathBuf {
        module_dir.join(&self.entry)
    }
}

/// Validate a module name: 1-50 chars, alphanumeric plus `-` and `_`, and not
/// a reserved Windows device name. Rejects anything that could smuggle a path.
pub fn validate_module_name(name: &str) -> FootoResult<()> {
    if name.is_empty() {
        return Err(FootoError::validation("name", "module name cannot be empty"));
    }
    if name.len() > MAX_NAME_LEN {
        return Err(FootoError::validation(
            "name",
            format!("module name too long (max {MAX_NAME_LEN} chars)"),
        ));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(FootoError::validation(
            "name",
            "module name can only contain letters, numbers, hyphens, and underscores",
        ));
    }
    if RESERVED_NAMES.contains(&name.to_lowercase().as_str()) {
        return Err(FootoError::validation(
            "name",
            format!("'{name}' is a reserved system name"),
        ));
    }
    Ok(())
}

/// Read and validate the descriptor for the module at `module_dir`.
///
/// Returns `Ok(None)` when the directory carries no `meta.json` (not a
/// module), `Err(MetadataInvalid)` for anything present but broken.
pub fn read_descriptor(module_dir: &Path) -> FootoResult<Option<ModuleDescriptor>> {
    let meta_path = module_dir.join(META_FILE);
    if !meta_path.is_file() {
        return Ok(None);
    }

    let module_label = module_dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| module_dir.display().to_string());

    let meta_len = std::fs::metadata(&meta_path)
        .map_err(|e| FootoError::io(format!("reading {}", meta_path.display()), e))?
        .len();
    if meta_len > MAX_META_SIZE {
        return Err(FootoError::metadata_invalid(
            module_label,
            format!("{META_FILE} exceeds maximum size ({MAX_META_SIZE} bytes)"),
        ));
    }

    let raw = std::fs::read_to_string(&meta_path)
        .map_err(|e| FootoError::io(format!("reading {}", meta_path.display()), e))?;

    let descriptor: ModuleDescriptor = serde_json::from_str(&raw)
        .map_err(|e| FootoError::metadata_invalid(&module_label, format!("invalid JSON: {e}")))?;

    validate_descriptor(&descriptor, module_dir)
        .map_err(|reason| FootoError::metadata_invalid(&module_label, reason))?;

    Ok(Some(descriptor))
}

fn validate_descriptor(descriptor: &ModuleDescriptor, module_dir: &Path) -> Result<(), String> {
    validate_module_name(&descriptor.name).map_err(|e| e.to_string())?;

    if !is_semver(&descriptor.version) {
        return Err(format!("invalid version format: {}", descriptor.version));
    }
    if descriptor.description.trim().is_empty() {
        return Err("description cannot be empty".to_string());
    }

    // Entry must be a bare file name inside the module directory.
    if descriptor.entry.is_empty() {
        return Err("entry script name cannot be empty".to_string());
    }
    if descriptor.entry.contains('/') || descriptor.entry.contains('\\') || descriptor.entry.contains("..") {
        return Err(format!(
            "entry script must be a plain file name, got: {}",
            descriptor.entry
        ));
    }
    let expected_ext = descriptor.lang.script_extension();
    if !descriptor.entry.ends_with(expected_ext) {
        return Err(format!(
            "entry script must have {} extension for {}",
            expected_ext, descriptor.lang
        ));
    }
    if !descriptor.entry_path(module_dir).is_file() {
        return Err(format!("entry script '{}' not found", descriptor.entry));
    }

    Ok(())
}

/// Plain X.Y.Z numeric version check.
fn is_semver(version: &str) -> bool {
    let parts: Vec<&str> = version.split('.').collect();
    parts.len() == 3
        && parts
            .iter()
            .all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()))
}
