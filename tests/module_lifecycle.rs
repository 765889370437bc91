//! Integration tests driving the public crate API across a full module
//! lifecycle: scaffold, rescan, resolve, execute, emit.

use anyhow::Result;
use footo::config_loader::{load_config, FootoConfig};
use footo::dialect::Dialect;
use footo::registry::ModuleRegistry;
use footo::scope::Scope;
use footo::{bridge, dispatcher, resolver, scaffold};
use tempfile::TempDir;

fn fixture() -> (TempDir, FootoConfig) {
    let tmp = TempDir::new().unwrap();
    let config = load_config(Some(tmp.path())).unwrap();
    config.ensure_directories().unwrap();
    (tmp, config)
}

#[test]
#[cfg(unix)]
fn scaffold_then_execute_new_module() -> Result<()> {
    let (_tmp, config) = fixture();

    let registry = ModuleRegistry::build(&config);
    scaffold::create_module(&config, &registry, "hello", Dialect::Bash)?;

    // Fresh scan per invocation: the new module is visible immediately.
    let registry = ModuleRegistry::build(&config);
    let plan = resolver::resolve(&registry, "hello", Dialect::Bash, vec![])?;
    assert_eq!(plan.scope, Scope::Local);

    let result = dispatcher::dispatch(&plan)?;
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = bridge::emit_to(&result, &mut out, &mut err)?;
    assert_eq!(code, 0);
    assert_eq!(out, b"Hello from hello!\n");
    Ok(())
}

#[test]
fn empty_system_is_a_normal_state() {
    let tmp = TempDir::new().unwrap();
    // No directories created at all.
    let config = load_config(Some(tmp.path())).unwrap();
    let registry = ModuleRegistry::build(&config);
    assert!(registry.is_empty());
    assert!(registry.entries_in_scope(Scope::Local).is_empty());
    assert!(registry.entries_in_scope(Scope::Bundled).is_empty());
}

#[test]
fn wrapper_functions_cover_both_dialects() {
    for dialect in [Dialect::Bash, Dialect::Pwsh] {
        let wrapper = bridge::render_wrapper(dialect);
        assert!(wrapper.contains("footo"));
        // Both wrappers gate evaluation on the `run` subcommand.
        assert!(wrapper.contains("run"));
    }
}
