// ABOUTME: Template module for rendering directive templates into cards
// ABOUTME: Provides the value model, parser, engine, template cache and render entry point

pub mod cache;
pub mod context;
pub mod engine;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod registry;
pub mod renderer;
pub mod schema;
pub mod value;

#[cfg(test)]
mod test_support;

pub use cache::TemplateCache;
pub use context::{resolve, Scope};
pub use engine::TemplateEngine;
pub use error::{Position, Result, TemplateError};
pub use parser::{Node, Template};
pub use registry::TemplateRegistry;
pub use renderer::Renderer;
pub use schema::ValidationReport;
pub use value::{context_from_json, context_from_str, Context, Value};
