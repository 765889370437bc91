//! Library root for the `footo` crate
//!
//! Footo registers small, named shell scripts ("modules") under precedence
//! scopes and dispatches them by name, bridging their output back into the
//! invoking shell so modules can mutate the caller's live session.

// Core error handling
pub mod errors;

// Module metadata & scopes
pub mod descriptor;
pub mod dialect;
pub mod scope;

// Registry construction
pub mod registry;
pub mod scanner;

// Resolution & execution
pub mod dispatcher;
pub mod resolver;

// Shell-bridge protocol
pub mod bridge;

// Scaffolding
pub mod scaffold;

// Configuration & CLI
pub mod cli;
pub mod config_loader;

#[cfg(test)]
mod tests {
    pub mod dispatch_flow_test;
    pub mod registry_precedence_test;
}

pub use dispatcher::{ExecutionResult, ResultKind};
pub use errors::{FootoError, FootoResult};
pub use registry::ModuleRegistry;
pub use resolver::ExecutionPlan;
