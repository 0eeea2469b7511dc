//! Command dispatch

use std::io;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::services::GenerateOptions;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, Settings};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;
use crate::tree_traits::TreeNodeConvert;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Generate {
            input,
            output,
            max_brightness_offset,
            colors,
        }) => {
            let options = GenerateOptions {
                max_brightness_offset: *max_brightness_offset,
                colors: (!colors.is_empty()).then(|| colors.clone()),
            };
            cmd_generate(cli, input, output, &options)
        }
        Some(Commands::Tree { input }) => cmd_tree(cli, input),
        Some(Commands::Config { command }) => cmd_config(cli, command),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => {
            Cli::command()
                .print_help()
                .map_err(|e| InfraError::io("print help", e))?;
            Ok(())
        }
    }
}

fn container(cli: &Cli) -> CliResult<ServiceContainer> {
    let settings = Settings::load(cli.config.as_deref())?;
    debug!("settings: {:?}", settings);
    Ok(ServiceContainer::new(settings))
}

#[instrument(skip(cli, options))]
fn cmd_generate(
    cli: &Cli,
    input: &Path,
    output_path: &Path,
    options: &GenerateOptions,
) -> CliResult<()> {
    if options.colors.as_ref().is_some_and(|c| c.iter().all(|s| s.trim().is_empty())) {
        return Err(CliError::InvalidArgs("--colors needs at least one color".into()));
    }
    let service = container(cli)?.mindmap_service();
    let stats = service.generate(input, output_path, options)?;

    output::success(&format!("Generated {}", output_path.display()));
    output::success_detail(&format!(
        "{} pages, {} nodes, {} links",
        stats.pages, stats.nodes, stats.links
    ));
    Ok(())
}

#[instrument(skip(cli))]
fn cmd_tree(cli: &Cli, input: &Path) -> CliResult<()> {
    let service = container(cli)?.mindmap_service();
    let tree = service.outline(input)?;
    output::info(&tree.to_tree_string());
    Ok(())
}

fn cmd_config(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = Settings::load(cli.config.as_deref())?;
            output::info(&settings.to_toml()?);
            Ok(())
        }
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => {
                    let state = if path.exists() { "exists" } else { "not found" };
                    output::action("global", &format!("{} ({state})", path.display()));
                }
                None => output::action("global", "no config directory available"),
            }
            if let Some(path) = &cli.config {
                output::action("file", &path.display());
            }
            Ok(())
        }
        ConfigCommands::Init => {
            let path = global_config_path()
                .ok_or_else(|| CliError::Usage("no config directory available".into()))?;
            if path.exists() {
                return Err(CliError::Usage(format!(
                    "config already exists: {}",
                    path.display()
                )));
            }
            if let Some(dir) = path.parent() {
                std::fs::create_dir_all(dir)
                    .map_err(|e| InfraError::io(format!("create {}", dir.display()), e))?;
            }
            std::fs::write(&path, Settings::template())
                .map_err(|e| InfraError::io(format!("write {}", path.display()), e))?;
            output::success(&format!("Created {}", path.display()));
            Ok(())
        }
    }
}
