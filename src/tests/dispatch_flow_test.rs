//! End-to-end flow tests: registry build, resolution, dispatch, and the
//! shell-bridge emit path, driven against real module trees on disk.

use std::path::Path;

use tempfile::TempDir;

use crate::bridge;
use crate::config_loader::{load_config, FootoConfig};
use crate::descriptor::META_FILE;
use crate::dialect::Dialect;
use crate::dispatcher::{self, ResultKind};
use crate::errors::FootoError;
use crate::registry::ModuleRegistry;
use crate::resolver;
use crate::scope::Scope;

fn add_bash_module(scope_dir: &Path, name: &str, script_body: &str) {
    let dir = scope_dir.join(name);
    std::fs::create_dir_all(&dir).unwrap();
    let meta = format!(
        r#"{{"name": "{name}", "version": "1.0.0", "description": "flow test module", "lang": "bash", "entry": "script.sh"}}"#
    );
    std::fs::write(dir.join(META_FILE), meta).unwrap();
    std::fs::write(dir.join("script.sh"), script_body).unwrap();
}

fn fixture() -> (TempDir, FootoConfig) {
    let tmp = TempDir::new().unwrap();
    let config = load_config(Some(tmp.path())).unwrap();
    config.ensure_directories().unwrap();
    (tmp, config)
}

#[test]
#[cfg(unix)]
fn state_mutation_module_round_trip() {
    let (_tmp, config) = fixture();
    // The module's only output is a single state-mutation statement in its
    // declared dialect; the wrapper would evaluate it on exit 0.
    add_bash_module(
        &config.scope_dir(Scope::Local),
        "goto-project",
        "echo 'cd /some/path'\n",
    );

    let registry = ModuleRegistry::build(&config);
    let plan = resolver::resolve(&registry, "goto-project", Dialect::Bash, vec![]).unwrap();
    let result = dispatcher::dispatch(&plan).unwrap();

    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = bridge::emit_to(&result, &mut out, &mut err).unwrap();
    assert_eq!(code, 0);
    assert_eq!(out, b"cd /some/path\n");
    assert!(err.is_empty());
}

#[test]
fn dialect_mismatch_fails_before_any_spawn() {
    let (_tmp, config) = fixture();
    add_bash_module(&config.scope_dir(Scope::Local), "goto-project", "echo 'cd /x'\n");

    let registry = ModuleRegistry::build(&config);
    // Under the other dialect, resolution fails; no process is ever created.
    let result = resolver::resolve(&registry, "goto-project", Dialect::Pwsh, vec![]);
    match result {
        Err(e @ FootoError::DialectMismatch { .. }) => assert_eq!(e.exit_code(), 4),
        other => panic!("expected DialectMismatch, got {other:?}"),
    }
}

#[test]
#[cfg(unix)]
fn failing_script_propagates_status_and_keeps_output() {
    let (_tmp, config) = fixture();
    add_bash_module(
        &config.scope_dir(Scope::Local),
        "flaky",
        "echo 'diagnostic text'\nexit 2\n",
    );

    let registry = ModuleRegistry::build(&config);
    let plan = resolver::resolve(&registry, "flaky", Dialect::Bash, vec![]).unwrap();
    let result = dispatcher::dispatch(&plan).unwrap();

    assert_eq!(result.kind, ResultKind::ScriptFailed);

    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = bridge::emit_to(&result, &mut out, &mut err).unwrap();
    // The wrapper sees a non-zero status and displays, never evaluates.
    assert_eq!(code, 2);
    assert_eq!(out, b"diagnostic text\n");
}

#[test]
#[cfg(unix)]
fn local_module_shadows_bundled_at_execution() {
    let (_tmp, config) = fixture();
    add_bash_module(&config.scope_dir(Scope::Local), "greet", "echo 'from local'\n");
    add_bash_module(&config.scope_dir(Scope::Bundled), "greet", "echo 'from bundled'\n");

    let registry = ModuleRegistry::build(&config);
    let plan = resolver::resolve(&registry, "greet", Dialect::Bash, vec![]).unwrap();
    let result = dispatcher::dispatch(&plan).unwrap();
    assert_eq!(result.stdout, b"from local\n");
}

#[test]
fn unknown_module_maps_to_module_not_found_exit_code() {
    let (_tmp, config) = fixture();
    let registry = ModuleRegistry::build(&config);
    let err = resolver::resolve(&registry, "ghost", Dialect::Bash, vec![]).unwrap_err();
    assert!(matches!(err, FootoError::ModuleNotFound { .. }));
    assert_eq!(err.exit_code(), 3);
}
