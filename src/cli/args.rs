// ABOUTME: Command line argument definitions and parsing using Clap
// ABOUTME: Defines the main CLI structure and subcommands for htmlrender

use clap::{Parser, Subcommand};
use std::collections::HashMap;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "htmlrender")]
#[command(about = "Render HTML pages from cached, layout-composed templates")]
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

    #[arg(short, long, global = true, help = "Templates directory")]
    pub templates: Option<PathBuf>,

    #[arg(
        short = 'D',
        long = "default",
        global = true,
        help = "Default string_map value for every page (key=value)"
    )]
    pub defaults: Vec<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render one template to stdout or a file
    Render {
        #[arg(help = "Template name, e.g. home.page.tmpl")]
        name: String,

        #[arg(
            short = 'V',
            long = "var",
            help = "String value for string_map (key=value)"
        )]
        vars: Vec<String>,

        #[arg(long, help = "JSON file holding the full template payload")]
        data: Option<PathBuf>,

        #[arg(short, long, help = "Output file")]
        output: Option<PathBuf>,

        #[arg(long, help = "Compile from source instead of building the cache")]
        no_cache: bool,
    },

    /// List every page template in the templates directory
    List,

    /// Compile every page with its layouts and report the first failure
    Check,

    /// Render the built-in home and about pages
    Pages,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parse variables from key=value format
    pub fn parse_variables(vars: &[String]) -> anyhow::Result<HashMap<String, String>> {
        let mut variables = HashMap::new();

        for var in vars {
            if let Some((key, value)) = var.split_once('=') {
                variables.insert(key.to_string(), value.to_string());
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
