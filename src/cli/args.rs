//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Create Draw.io mind map diagrams with indented text files
#[derive(Parser, Debug)]
#[command(name = "diomindmap")]
#[command(author, version, about, long_about = None)]
#[command(disable_version_flag = true)]
pub struct Cli {
    /// Show the application's version and exit
    #[arg(short = 'v', long, action = ArgAction::Version)]
    pub version: Option<bool>,

    /// Debug output (repeat for more: -d info, -dd debug, -ddd trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub debug: u8,

    /// Config file layered over the global config
    #[arg(long, global = true, env = "DIOMINDMAP_CONFIG", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a Draw.io diagram from a text file
    Generate {
        /// The source text file to read from
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        input: PathBuf,

        /// The destination file to write to
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        output: PathBuf,

        /// The maximum brightness offset between the base color and leaf nodes
        #[arg(short = 'b', long, allow_negative_numbers = true)]
        max_brightness_offset: Option<i32>,

        /// Base colors for children of the diagram root node (repeatable, in order)
        #[arg(short, long = "colors", value_name = "HEX")]
        colors: Vec<String>,
    },

    /// Show the parsed outline as a tree
    Tree {
        /// The source text file to read from
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        input: PathBuf,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Create global config template
    Init,

    /// Show config paths
    Path,
}
