//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// tsc-closure - emit Closure-annotated modules from TypeScript sources
#[derive(Parser)]
#[command(name = "tsc-closure")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compile inputs and emit Closure modules
    Emit(EmitArgs),

    /// Validate a host config and print it normalised
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct EmitArgs {
    /// Input files, relative to the execution root
    pub inputs: Vec<PathBuf>,

    /// Execution root inputs are resolved against
    #[arg(long = "execroot", env = "JS_BINARY__EXECROOT", default_value = ".")]
    pub exec_root: PathBuf,

    /// Output directory, relative to the execution root
    #[arg(long, env = "BAZEL_BINDIR")]
    pub bin_dir: Option<PathBuf>,

    /// Host config JSON file
    #[arg(long)]
    pub host_config: Option<PathBuf>,

    /// Root module ids are relative to (overrides rootModulePath)
    #[arg(long)]
    pub root_dir: Option<String>,

    /// Write aggregated externs here
    #[arg(long, env = "EXTERNS_PATH")]
    pub externs: Option<PathBuf>,

    /// Write the modules manifest here as JSON
    #[arg(long)]
    pub manifest: Option<PathBuf>,

    /// Emit `.js` instead of `.closure.js`
    #[arg(long)]
    pub es5: bool,

    /// Alternate node_modules used to find the default library
    #[arg(long)]
    pub node_modules_prefix: Option<String>,
}

#[derive(Args)]
pub struct ConfigArgs {
    /// Host config JSON file
    pub path: PathBuf,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
