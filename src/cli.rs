use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use tracing::debug;

use crate::bridge;
use crate::config_loader::{load_config, FootoConfig};
use crate::dialect::Dialect;
use crate::dispatcher;
use crate::errors::FootoResult;
use crate::registry::ModuleRegistry;
use crate::resolver;
use crate::scaffold;
use crate::scope::SCAN_ORDER;

/// Top-level CLI interface for Footo
#[derive(Parser)]
#[command(
    name = "footo",
    version = "1.1.0",
    about = "Footo: a command interface for reusable terminal functions"
)]
pub struct Cli {
    /// Active shell dialect (overrides FOOTO_SHELL and the config file)
    #[arg(long, global = true, value_enum)]
    pub shell: Option<Dialect>,

    /// Footo home directory (overrides FOOTO_HOME)
    #[arg(long, global = true, value_name = "DIR")]
    pub home: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all available modules, grouped by scope
    List,

    /// Show the resolved descriptor for a module
    Info { name: String },

    /// Run a module through the shell bridge (its output may be evaluated
    /// by the wrapper function in your shell)
    Run {
        name: String,
        /// Arguments forwarded to the module verbatim
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Create a new module skeleton in the local scope
    Create { name: String },

    /// Print the shell wrapper function for a dialect
    Init {
        #[arg(value_enum)]
        dialect: Dialect,
    },

    /// Bare `footo <name> [args...]`: informational execution, output is
    /// displayed and never evaluated
    #[command(external_subcommand)]
    External(Vec<String>),
}

/// Run the parsed CLI and return the process exit code.
pub fn dispatch(cli: Cli) -> i32 {
    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            e.exit_code()
        }
    }
}

fn run(cli: Cli) -> FootoResult<i32> {
    let config = load_config(cli.home.as_deref())?;
    config.ensure_directories()?;

    let command = match cli.command {
        Some(command) => command,
        None => {
            // No subcommand at all: show usage, not an error.
            let _ = Cli::command().print_help();
            return Ok(0);
        }
    };

    match command {
        Commands::List => {
            let registry = ModuleRegistry::build(&config);
            print_module_list(&registry);
            Ok(0)
        }
        Commands::Info { name } => {
            let registry = ModuleRegistry::build(&config);
            print_module_info(&registry, &name)
        }
        Commands::Run { name, args } => {
            execute_module(&config, cli.shell, &name, args)
        }
        Commands::External(mut argv) => {
            // Shorthand for `run`, minus the state-mutation semantics: the
            // wrapper only evaluates output under an explicit `run`.
            let name = argv.remove(0);
            execute_module(&config, cli.shell, &name, argv)
        }
        Commands::Create { name } => {
            let registry = ModuleRegistry::build(&config);
            let dialect = config.active_dialect(cli.shell)?;
            let created = scaffold::create_module(&config, &registry, &name, dialect)?;
            println!("Module '{name}' created successfully.");
            println!("  Location: {}", created.dir.display());
            println!("  Metadata: {}", created.meta_path.display());
            println!("  Script:   {}", created.script_path.display());
            if !scaffold::open_in_editor(&config, &[&created.meta_path, &created.script_path]) {
                println!("\nEdit your module files at: {}", created.dir.display());
            }
            Ok(0)
        }
        Commands::Init { dialect } => {
            print!("{}", bridge::render_wrapper(dialect));
            Ok(0)
        }
    }
}

/// Resolve and dispatch one module, then hand the result to the bridge.
fn execute_module(
    config: &FootoConfig,
    shell_override: Option<Dialect>,
    name: &str,
    args: Vec<String>,
) -> FootoResult<i32> {
    let active = config.active_dialect(shell_override)?;
    let registry = ModuleRegistry::build(config);

    let plan = resolver::resolve(&registry, name, active, args)?;
    debug!(module = %plan.name, dialect = %plan.dialect, "resolved execution plan");

    let result = dispatcher::dispatch(&plan)?;
    bridge::emit(&result)
}

fn print_module_list(registry: &ModuleRegistry) {
    println!("Available modules:");
    for scope in SCAN_ORDER {
        println!("\n  {scope}:");
        let entries = registry.entries_in_scope(scope);
        let invalid = registry.invalid_in_scope(scope);

        if entries.is_empty() && invalid.is_empty() {
            println!("    (no modules found)");
            continue;
        }
        for entry in entries {
            let descriptor = &entry.module.descriptor;
            println!("    - {} (v{})", descriptor.name, descriptor.version);
            if !descriptor.description.is_empty() {
                println!("      {}", descriptor.description);
            }
        }
        for broken in invalid {
            println!("    - {} (invalid: {})", broken.dir_name, broken.reason);
        }
    }
}

fn print_module_info(registry: &ModuleRegistry, name: &str) -> FootoResult<i32> {
    let entry = registry
        .get(name)
        .ok_or_else(|| crate::errors::FootoError::module_not_found(name))?;
    let descriptor = &entry.module.descriptor;

    println!("Module: {}", descriptor.name);
    println!("  Scope:       {}", entry.module.scope);
    println!("  Version:     {}", descriptor.version);
    println!("  Description: {}", descriptor.description);
    println!("  Dialect:     {}", descriptor.lang);
    println!("  Entry:       {}", descriptor.entry);
    println!("  Path:        {}", entry.module.dir.display());
    Ok(0)
}
