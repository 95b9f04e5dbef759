// ABOUTME: Template engine that expands if/each blocks and substitutes variable tags
// ABOUTME: Evaluates a parsed block tree against layered scopes into a single output buffer

use super::context::Scope;
use super::error::Result;
use super::parser::{Node, Template};
use super::value::{Context, Value};

#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateEngine;

impl TemplateEngine {
    pub fn new() -> Self {
        Self
    }

    /// Render a template string with the given context
    pub fn render_template(&self, template: &str, context: &Context) -> Result<String> {
        let template = Template::parse(template)?;
        self.render(&template, context)
    }

    /// Render an already parsed template
    pub fn render(&self, template: &Template, context: &Context) -> Result<String> {
        let mut out = String::new();
        render_nodes(template.nodes(), &Scope::root(context), &mut out)?;
        Ok(out)
    }

    /// Validate template syntax without rendering
    pub fn validate_template(&self, template: &str) -> Result<()> {
        Template::parse(template).map(|_| ())
    }

    /// Check if a string contains template expressions
    pub fn has_templates(&self, text: &str) -> bool {
        text.contains("{{") && text.contains("}}")
    }
}

fn render_nodes(nodes: &[Node], scope: &Scope<'_>, out: &mut String) -> Result<()> {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Variable(path) => {
                // Undefined renders as nothing
                if let Some(value) = scope.resolve(path) {
                    out.push_str(&value.render_text(path)?);
                }
            }
            Node::If { path, body } => {
                if scope.resolve(path).is_some_and(Value::is_truthy) {
                    render_nodes(body, scope, out)?;
                }
            }
            Node::Each { path, body } => {
                // Anything other than a sequence expands to nothing
                let Some(items) = scope.resolve(path).and_then(Value::as_sequence) else {
                    continue;
                };
                for (index, item) in items.iter().enumerate() {
                    let frame = Scope::iteration(scope, item, index, items.len());
                    render_nodes(body, &frame, out)?;
                }
            }
        }
    }
    Ok(())
}
