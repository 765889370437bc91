//! Shell-bridge encoder: the wire contract between the dispatcher process and
//! the wrapper function living in the user's interactive shell.
//!
//! The dispatcher cannot mutate its parent shell's state, so a state-mutating
//! module emits shell code on stdout and the wrapper evaluates that text in
//! its own context, gated on the dispatcher's exit status:
//!
//! - exit 0 under `run`: the wrapper `eval`s the captured stdout
//! - anything else: the wrapper displays the text, never evaluates it
//!
//! The encoder is a transparent pipe. Module stdout is copied byte-for-byte
//! with no decoration and no added trailing newline; one interleaved byte
//! would change the evaluated semantics and corrupt the user's session.
//! Diagnostics travel exclusively on stderr.

use std::io::{self, Write};

use crate::dialect::Dialect;
use crate::dispatcher::ExecutionResult;
use crate::errors::{FootoError, FootoResult};

/// Wrapper function for bash. Installed once into the user's shell startup
/// file by the installer collaborator; `footo init bash` prints it.
///
/// `${1-}` keeps an empty argument vector from indexing past the end; a
/// missing first argument means "no subcommand" and falls through to the
/// display branch.
const BASH_WRAPPER: &str = r#"# footo shell bridge (bash)
footo() {
    local out rc
    if [ "${1-}" = "run" ]; then
        out="$(FOOTO_SHELL=bash command footo "$@")"
        rc=$?
        if [ "$rc" -eq 0 ]; then
            eval "$out"
        else
            [ -n "$out" ] && printf '%s\n' "$out"
            return "$rc"
        fi
    else
        FOOTO_SHELL=bash command footo "$@"
    fi
}
"#;

/// Wrapper function for pwsh, same contract as the bash variant.
///
/// The dialect travels as the `--shell` flag rather than an environment
/// assignment, so the wrapper never mutates the session's environment. The
/// failure branch displays and falls off the end of the function; `exit`
/// here would terminate the interactive session itself. `$LASTEXITCODE`
/// stays visible to the caller either way.
const PWSH_WRAPPER: &str = r#"# footo shell bridge (pwsh)
function footo {
    $bin = Get-Command -Name footo -CommandType Application | Select-Object -First 1
    if ($args.Count -gt 0 -and $args[0] -eq 'run') {
        $out = & $bin --shell pwsh @args | Out-String
        if ($LASTEXITCODE -eq 0) {
            if ($out) { Invoke-Expression $out }
        } elseif ($out) {
            Write-Host $out
        }
    } else {
        & $bin --shell pwsh @args
    }
}
"#;

/// The wrapper function text for one dialect.
pub fn render_wrapper(dialect: Dialect) -> &'static str {
    match dialect {
        Dialect::Bash => BASH_WRAPPER,
        Dialect::Pwsh => PWSH_WRAPPER,
    }
}

/// Copy a result's captured streams to the given sinks, verbatim, and return
/// the exit code to propagate. The evaluate/display decision is the shell
/// wrapper's; this side only guarantees a clean channel and a truthful exit
/// status.
pub fn emit_to(
    result: &ExecutionResult,
    out: &mut impl Write,
    err: &mut impl Write,
) -> FootoResult<i32> {
    out.write_all(&result.stdout)
        .and_then(|_| out.flush())
        .map_err(|e| FootoError::io("writing module output", e))?;
    err.write_all(&result.stderr)
        .and_then(|_| err.flush())
        .map_err(|e| FootoError::io("writing module diagnostics", e))?;
    Ok(result.exit_code())
}

/// Emit to the dispatcher's real stdout/stderr.
pub fn emit(result: &ExecutionResult) -> FootoResult<i32> {
    emit_to(result, &mut io::stdout().lock(), &mut io::stderr().lock())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatcher::ResultKind;

    fn result(kind: ResultKind, status: Option<i32>, stdout: &[u8], stderr: &[u8]) -> ExecutionResult {
        ExecutionResult {
            module: "greet".to_string(),
            status,
            stdout: stdout.to_vec(),
            stderr: stderr.to_vec(),
            kind,
        }
    }

    #[test]
    fn test_emit_is_byte_for_byte_verbatim() {
        // No trailing newline in the module output; none may be added.
        let r = result(ResultKind::Ok, Some(0), b"cd /some/path", b"");
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = emit_to(&r, &mut out, &mut err).unwrap();
        assert_eq!(code, 0);
        assert_eq!(out, b"cd /some/path");
        assert!(err.is_empty());
    }

    #[test]
    fn test_failed_run_keeps_output_and_propagates_status() {
        let r = result(
            ResultKind::ScriptFailed,
            Some(2),
            b"half-written state\n",
            b"disk full\n",
        );
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = emit_to(&r, &mut out, &mut err).unwrap();
        assert_eq!(code, 2);
        assert_eq!(out, b"half-written state\n");
        assert_eq!(err, b"disk full\n");
    }

    #[test]
    fn test_streams_are_never_interleaved() {
        let r = result(ResultKind::Ok, Some(0), b"export A=1\n", b"note: cached\n");
        let mut out = Vec::new();
        let mut err = Vec::new();
        emit_to(&r, &mut out, &mut err).unwrap();
        assert_eq!(out, b"export A=1\n");
        assert_eq!(err, b"note: cached\n");
    }

    #[test]
    fn test_bash_wrapper_contract() {
        let wrapper = render_wrapper(Dialect::Bash);
        // Evaluate only under `run` with exit status zero.
        assert!(wrapper.contains(r#"[ "${1-}" = "run" ]"#));
        assert!(wrapper.contains("eval \"$out\""));
        // Empty argument vector must not index past the end.
        assert!(wrapper.contains("${1-}"));
        // Failure branch displays instead of evaluating.
        assert!(wrapper.contains("printf '%s\\n' \"$out\""));
    }

    #[test]
    fn test_pwsh_wrapper_contract() {
        let wrapper = render_wrapper(Dialect::Pwsh);
        assert!(wrapper.contains("$args.Count -gt 0"));
        assert!(wrapper.contains("Invoke-Expression"));
        assert!(wrapper.contains("$LASTEXITCODE -eq 0"));
    }

    #[test]
    fn test_pwsh_wrapper_failure_branch_never_exits_the_session() {
        // `exit` inside a function dot-sourced into an interactive pwsh
        // session closes the user's terminal; a failing run must display the
        // output and fall through instead.
        let wrapper = render_wrapper(Dialect::Pwsh);
        assert!(!wrapper.contains("exit"));
        assert!(wrapper.contains("Write-Host $out"));
    }

    #[test]
    fn test_pwsh_wrapper_does_not_mutate_session_environment() {
        // The dialect is passed per-invocation via --shell; assigning
        // $env:FOOTO_SHELL at function scope would leak past the call.
        let wrapper = render_wrapper(Dialect::Pwsh);
        assert!(!wrapper.contains("$env:"));
        assert!(wrapper.contains("--shell pwsh"));
    }
}
