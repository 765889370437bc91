//! Resolver: turns a requested module name plus the active dialect into an
//! execution plan, or a typed failure. Pure lookup over the registry; no
//! hidden state, so repeated calls against an unchanged registry return
//! identical results.

use std::path::PathBuf;

use crate::dialect::Dialect;
use crate::errors::{FootoError, FootoResult};
use crate::registry::ModuleRegistry;
use crate::scope::Scope;

/// Fully-resolved instructions for one dispatch. Consumed exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionPlan {
    pub name: String,
    pub entry_path: PathBuf,
    pub module_dir: PathBuf,
    pub dialect: Dialect,
    pub scope: Scope,
    pub args: Vec<String>,
}

/// Resolve `name` against the registry under the caller's active dialect.
///
/// A dialect mismatch is fatal for the invocation and is reported before any
/// process is spawned; cross-dialect execution is never attempted.
pub fn resolve(
    registry: &ModuleRegistry,
    name: &str,
    active_dialect: Dialect,
    args: Vec<String>,
) -> FootoResult<ExecutionPlan> {
    let entry = registry
        .get(name)
        .ok_or_else(|| FootoError::module_not_found(name))?;

    let descriptor = &entry.module.descriptor;
    if descriptor.lang != active_dialect {
        return Err(FootoError::dialect_mismatch(
            &descriptor.name,
            descriptor.lang,
            active_dialect,
        ));
    }

    Ok(ExecutionPlan {
        name: descriptor.name.clone(),
        entry_path: descriptor.entry_path(&entry.module.dir),
        module_dir: entry.module.dir.clone(),
        dialect: descriptor.lang,
        scope: entry.module.scope,
        args,
    })
}
