// ABOUTME: Main application orchestration for the cardrender CLI
// ABOUTME: Coordinates between CLI arguments, configuration, and command execution

use anyhow::Result;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use super::commands;
use super::{Args, Commands, Config};

pub struct App {
    config: Config,
}

impl App {
    /// Create a new application instance
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Initialize logging based on configuration. Logs go to stderr so
    /// rendered output on stdout stays clean.
    pub fn init_logging(&self, verbose: bool, no_color: bool) -> Result<()> {
        let log_level = if verbose {
            "debug"
        } else {
            self.config.logging.level.as_str()
        };

        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

        let result = match self.config.logging.format.as_str() {
            "compact" => tracing_subscriber::fmt()
                .compact()
                .with_env_filter(env_filter)
                .with_ansi(!no_color)
                .with_target(false)
                .with_writer(std::io::stderr)
                .try_init(),
            _ => tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_ansi(!no_color)
                .with_target(false)
                .with_writer(std::io::stderr)
                .try_init(),
        };
        result.map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

        debug!("Logging initialized with level: {}", log_level);
        Ok(())
    }

    /// Run the application with parsed arguments
    pub fn run(&mut self, args: Args) -> Result<()> {
        self.init_logging(args.verbose, args.no_color)?;

        info!("Starting cardrender v{}", env!("CARGO_PKG_VERSION"));
        debug!("Templates read from: {}", self.config.template_dir.display());

        match args.command {
            Commands::Render {
                template,
                data,
                vars,
                output,
                fallback,
                no_defaults,
            } => commands::render_template(
                &template,
                data.as_deref(),
                &vars,
                output.as_deref(),
                commands::RenderOptions {
                    fallback,
                    apply_defaults: self.config.apply_defaults && !no_defaults,
                },
                &self.config,
            ),

            Commands::Inline {
                file,
                data,
                vars,
                output,
            } => commands::render_inline(&file, data.as_deref(), &vars, output.as_deref()),

            Commands::Validate {
                template,
                data,
                vars,
            } => commands::validate_data(&template, &data, &vars, &self.config),

            Commands::Check { template } => commands::check_template(&template, &self.config),

            Commands::List => commands::list_templates(&self.config),
        }
    }

    /// Create application from command line arguments
    pub fn from_args(args: &Args) -> Result<Self> {
        let mut config = Config::load(args.config.clone())?;
        if let Some(dir) = &args.template_dir {
            config.template_dir = dir.clone();
        }
        Ok(Self::new(config))
    }
}
