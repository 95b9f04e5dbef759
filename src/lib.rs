// ABOUTME: Main library module for the cardrender template renderer
// ABOUTME: Exports the template core and the command line front end

pub mod cli;
pub mod template;

// Re-export commonly used types
pub use cli::{App, Args, Config};
pub use template::{Context, Renderer, Template, TemplateEngine, TemplateError, Value};

// Error handling
pub type Result<T> = anyhow::Result<T>;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
