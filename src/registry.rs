//! Registry builder: merges per-scope scans into one name-to-module lookup
//! honoring scope precedence.
//!
//! The registry is rebuilt from disk on every invocation. Module counts are
//! small (tens, not thousands), so the full scan cost per invocation buys
//! freedom from staleness.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::config_loader::FootoConfig;
use crate::scanner::{scan_scope, InvalidModule, LoadedModule};
use crate::scope::{Scope, SCAN_ORDER};

/// The winning module for one name, plus where it came from.
#[derive(Debug, Clone)]
pub struct RegistryEntry {
    pub module: LoadedModule,
}

/// Non-fatal findings surfaced while building the registry.
#[derive(Debug, Clone)]
pub enum RegistryDiagnostic {
    /// Descriptor present but broken; the module was dropped.
    Invalid(InvalidModule),
    /// A lower-precedence scope declared a name already registered.
    Shadowed {
        name: String,
        winner: Scope,
        loser: Scope,
    },
    /// Two module directories in the same scope declared the same name.
    /// Treated as a metadata failure for the second-seen entry.
    DuplicateInScope { name: String, scope: Scope },
}

/// Ordered, scope-aware index of available modules.
#[derive(Debug, Default)]
pub struct ModuleRegistry {
    // Keyed by lowercased name; lookup is case-insensitive.
    entries: HashMap<String, RegistryEntry>,
    diagnostics: Vec<RegistryDiagnostic>,
}

impl ModuleRegistry {
    /// Build the registry by scanning `local` then `bundled`, first-wins.
    pub fn build(config: &FootoConfig) -> Self {
        let mut registry = ModuleRegistry::default();

        for scope in SCAN_ORDER {
            let outcome = scan_scope(&config.scope_dir(scope), scope);

            for invalid in outcome.invalid {
                registry.diagnostics.push(RegistryDiagnostic::Invalid(invalid));
            }

            for module in outcome.modules {
                registry.insert(module);
            }
        }

        debug!(modules = registry.entries.len(), "registry built");
        registry
    }

    fn insert(&mut self, module: LoadedModule) {
        let key = module.descriptor.name.to_lowercase();

        if let Some(existing) = self.entries.get(&key) {
            let winner = existing.module.scope;
            let loser = module.scope;
            if winner == loser {
                warn!(name = %module.descriptor.name, scope = %loser,
                      "duplicate module name within one scope, keeping first");
                self.diagnostics.push(RegistryDiagnostic::DuplicateInScope {
                    name: module.descriptor.name,
                    scope: loser,
                });
            } else {
                debug!(name = %module.descriptor.name, winner = %winner, loser = %loser,
                       "module shadowed by higher-precedence scope");
                self.diagnostics.push(RegistryDiagnostic::Shadowed {
                    name: module.descriptor.name,
                    winner,
                    loser,
                });
            }
            return;
        }

        self.entries.insert(key, RegistryEntry { module });
    }

    /// Case-insensitive lookup of the winning entry for a name.
    pub fn get(&self, name: &str) -> Option<&RegistryEntry> {
        self.entries.get(&name.to_lowercase())
    }

    /// Entries belonging to one scope, sorted by module name.
    pub fn entries_in_scope(&self, scope: Scope) -> Vec<&RegistryEntry> {
        let mut entries: Vec<&RegistryEntry> = self
            .entries
            .values()
            .filter(|e| e.module.scope == scope)
            .collect();
        entries.sort_by(|a, b| a.module.descriptor.name.cmp(&b.module.descriptor.name));
        entries
    }

    pub fn diagnostics(&self) -> &[RegistryDiagnostic] {
        &self.diagnostics
    }

    /// Invalid-module diagnostics for one scope, for `list` output.
    pub fn invalid_in_scope(&self, scope: Scope) -> Vec<&InvalidModule> {
        self.diagnostics
            .iter()
            .filter_map(|d| match d {
                RegistryDiagnostic::Invalid(invalid) if invalid.scope == scope => Some(invalid),
                _ => None,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
