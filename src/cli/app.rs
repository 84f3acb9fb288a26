// ABOUTME: Main application orchestration for the htmlrender CLI
// ABOUTME: Coordinates between CLI arguments, configuration, logging, and command execution

use anyhow::Result;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use super::commands;
use super::{AppConfig, Args, Commands};

pub struct App {
    config: AppConfig,
}

impl App {
    /// Create a new application instance
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Initialize logging based on configuration
    pub fn init_logging(&self, verbose: bool, no_color: bool) -> Result<()> {
        let log_level = if verbose {
            "debug"
        } else {
            &self.config.logging.level
        };

        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

        // Logs go to stderr so rendered pages on stdout stay clean
        match self.config.logging.format.as_str() {
            "compact" => {
                tracing_subscriber::fmt()
                    .compact()
                    .with_env_filter(env_filter)
                    .with_ansi(!no_color)
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .try_init()
                    .map_err(|e| anyhow::anyhow!(e))?;
            }
            _ => {
                tracing_subscriber::fmt()
                    .with_env_filter(env_filter)
                    .with_ansi(!no_color)
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .try_init()
                    .map_err(|e| anyhow::anyhow!(e))?;
            }
        }

        debug!("Logging initialized with level: {}", log_level);
        Ok(())
    }

    /// Run the application with parsed arguments
    pub fn run(&mut self, args: Args) -> Result<()> {
        if let Some(dir) = args.templates.clone() {
            self.config.templates.dir = dir;
        }
        self.config.merge_defaults(Args::parse_variables(&args.defaults)?);

        self.init_logging(args.verbose, args.no_color)?;

        info!("Starting htmlrender v{}", env!("CARGO_PKG_VERSION"));
        debug!("Configuration loaded from: {:?}", args.config);
        debug!(
            "port={} in_production={} use_cache={} templates={}",
            self.config.port,
            self.config.in_production,
            self.config.use_cache,
            self.config.templates.dir.display()
        );

        match args.command {
            Commands::Render {
                name,
                vars,
                data,
                output,
                no_cache,
            } => commands::render_template(name, vars, data, output, no_cache, &self.config),

            Commands::List => commands::list_templates(&self.config),

            Commands::Check => commands::check_templates(&self.config),

            Commands::Pages => commands::render_pages(&self.config),
        }
    }

    /// Create application from command line arguments
    pub fn from_args(args: &Args) -> Result<Self> {
        let config = AppConfig::load(args.config.clone())?;
        Ok(Self::new(config))
    }
}
