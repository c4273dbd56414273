//! pomedit CLI - Command-line editor for Maven POM files.

use anyhow::{Context as _, Result};
use clap::Parser;
use pomedit_cli::commands::{
    self, AddDependencyArgs, AddParentArgs, AddPropertiesArgs, Context, DeleteDependencyArgs,
    ModifyProjectArgs,
};
use pomedit_cli::config::EditorConfig;
use pomedit_cli::logging::init_cli_logger;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pomedit")]
#[command(version, about = "Edit Maven pom.xml files from the command line", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Configuration file path [default: ~/.pomedit/config.toml]
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print the modified POM instead of writing it
    #[arg(long, global = true)]
    dry_run: bool,

    /// Verbose output
    #[arg(short = 'v', action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only print warnings and errors
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Add a dependency, replacing any with the same groupId and artifactId
    AddDependency(AddDependencyArgs),

    /// Delete the dependencies matching groupId, artifactId and/or version
    DeleteDependency(DeleteDependencyArgs),

    /// Set the parent reference
    AddParent(AddParentArgs),

    /// Add properties globally or to a profile
    AddProperties(AddPropertiesArgs),

    /// Change the project's groupId, artifactId, version, name, description or URL
    ModifyProject(ModifyProjectArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_cli_logger(cli.verbose, cli.quiet);

    let config = EditorConfig::load(cli.config.as_deref()).context("Failed to load config")?;
    let ctx = Context {
        config,
        dry_run: cli.dry_run,
    };

    match cli.command {
        Command::AddDependency(args) => commands::add_dependency::run(args, &ctx),
        Command::DeleteDependency(args) => commands::delete_dependency::run(args, &ctx),
        Command::AddParent(args) => commands::add_parent::run(args, &ctx),
        Command::AddProperties(args) => commands::add_properties::run(args, &ctx),
        Command::ModifyProject(args) => commands::modify_project::run(args, &ctx),
    }
}
