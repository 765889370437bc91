//! Dispatcher: spawns the dialect's interpreter against an execution plan and
//! classifies the outcome.
//!
//! Arguments pass through as discrete tokens; the dispatcher injects no
//! shell-level re-quoting or globbing of its own. The wait is synchronous and
//! untimed: a hung module hangs the invocation, matching "execute as if the
//! user had typed it directly".

use std::process::Command;

use tracing::{debug, info};

use crate::errors::{FootoError, FootoResult};
use crate::resolver::ExecutionPlan;

/// Upper bound on entry script size, checked before spawning.
const MAX_SCRIPT_SIZE: u64 = 10 * 1024 * 1024;

/// How a completed dispatch ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultKind {
    /// Module exited with status zero.
    Ok,
    /// Module ran but exited non-zero; its output is still surfaced.
    ScriptFailed,
}

/// Captured outcome of one module run, handed to the shell-bridge encoder.
#[derive(Debug)]
pub struct ExecutionResult {
    pub module: String,
    /// Exit status code; `None` when the child was killed by a signal.
    pub status: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    pub kind: ResultKind,
}

impl ExecutionResult {
    /// Exit code the dispatcher process should propagate for this result.
    pub fn exit_code(&self) -> i32 {
        match self.kind {
            ResultKind::Ok => 0,
            ResultKind::ScriptFailed => self.status.unwrap_or(7),
        }
    }
}

/// Run the plan's entry script under its dialect's interpreter.
///
/// A failure to launch the interpreter at all is a `SpawnFailure`, distinct
/// from the module's own logic failing (`ScriptFailed`).
pub fn dispatch(plan: &ExecutionPlan) -> FootoResult<ExecutionResult> {
    let script_len = std::fs::metadata(&plan.entry_path)
        .map_err(|e| FootoError::io(format!("reading {}", plan.entry_path.display()), e))?
        .len();
    if script_len > MAX_SCRIPT_SIZE {
        return Err(FootoError::metadata_invalid(
            &plan.name,
            format!("entry script exceeds maximum size ({MAX_SCRIPT_SIZE} bytes)"),
        ));
    }

    let (program, pre_args) = plan.dialect.interpreter();
    debug!(module = %plan.name, program, entry = %plan.entry_path.display(), "spawning module");

    let output = Command::new(program)
        .args(pre_args)
        .arg(&plan.entry_path)
        .args(&plan.args)
        .current_dir(&plan.module_dir)
        .output()
        .map_err(|e| FootoError::spawn_failure(program, e))?;

    let status = output.status.code();
    let kind = if output.status.success() {
        ResultKind::Ok
    } else {
        ResultKind::ScriptFailed
    };

    info!(module = %plan.name, scope = %plan.scope, status = ?status, "module finished");

    Ok(ExecutionResult {
        module: plan.name.clone(),
        status,
        stdout: output.stdout,
        stderr: output.stderr,
        kind,
    })
}
