// ABOUTME: Command line argument definitions and parsing using Clap
// ABOUTME: Defines the main CLI structure and subcommands for cardrender

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cardrender")]
#[command(about = "Render trip recommendation and itinerary cards from templates")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Path to configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Disable colored output")]
    pub no_color: bool,

    #[arg(long, global = true, help = "Directory holding the template files")]
    pub template_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a registered template
    Render {
        #[arg(help = "Template identifier (see `list`)")]
        template: String,

        #[arg(short, long, help = "JSON file with the card data")]
        data: Option<PathBuf>,

        #[arg(short = 'V', long = "var", help = "Set a string field (key=value)")]
        vars: Vec<String>,

        #[arg(short, long, help = "Write the rendered card to a file")]
        output: Option<PathBuf>,

        #[arg(long, help = "Print an error fragment instead of failing")]
        fallback: bool,

        #[arg(long, help = "Do not fill in default field values")]
        no_defaults: bool,
    },

    /// Render a template file given by path
    Inline {
        #[arg(help = "Path to the template file")]
        file: PathBuf,

        #[arg(short, long, help = "JSON file with the card data")]
        data: Option<PathBuf>,

        #[arg(short = 'V', long = "var", help = "Set a string field (key=value)")]
        vars: Vec<String>,

        #[arg(short, long, help = "Write the rendered output to a file")]
        output: Option<PathBuf>,
    },

    /// Check card data against a template's required fields
    Validate {
        #[arg(help = "Template identifier (see `list`)")]
        template: String,

        #[arg(short, long, help = "JSON file with the card data")]
        data: PathBuf,

        #[arg(short = 'V', long = "var", help = "Set a string field (key=value)")]
        vars: Vec<String>,
    },

    /// Check template syntax without rendering
    Check {
        #[arg(help = "Template identifier (see `list`)")]
        template: String,
    },

    /// List the registered templates
    List,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parse variables from key=value format
    pub fn parse_variables(vars: &[String]) -> anyhow::Result<Vec<(String, String)>> {
        let mut variables = Vec::with_capacity(vars.len());

        for var in vars {
            if let Some((key, value)) = var.split_once('=') {
                variables.push((key.to_string(), value.to_string()));
            } else {
                return Err(anyhow::anyhow!(
                    "Invalid variable format '{}'. Expected 'key=value'",
                    var
                ));
            }
        }

        Ok(variables)
    }
}
