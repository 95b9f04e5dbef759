// ABOUTME: Command implementations for the cardrender CLI
// ABOUTME: Handles execution of render, inline, validate, check, and list commands

use anyhow::{Context as _, Result};
use std::path::Path;
use tracing::{info, warn};

use super::args::Args;
use super::config::Config;
use crate::template::{context_from_str, schema, Context, Renderer, TemplateEngine, Value};

#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Print an error fragment instead of failing
    pub fallback: bool,
    pub apply_defaults: bool,
}

/// Build the render context from an optional JSON file and `key=value` overrides
pub fn load_context(data: Option<&Path>, vars: &[String]) -> Result<Context> {
    let mut context = match data {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read data file {}", path.display()))?;
            context_from_str(&text)
                .with_context(|| format!("Invalid data file {}", path.display()))?
        }
        None => Context::new(),
    };

    for (key, value) in Args::parse_variables(vars)? {
        context.insert(key, Value::String(value));
    }

    Ok(context)
}

/// Render a registered template
pub fn render_template(
    template_id: &str,
    data: Option<&Path>,
    vars: &[String],
    output: Option<&Path>,
    options: RenderOptions,
    config: &Config,
) -> Result<()> {
    let renderer = Renderer::new(&config.template_dir);
    if !renderer.registry().is_known(template_id) {
        warn!(
            "Available templates: {}",
            renderer.registry().available().join(", ")
        );
    }

    let mut context = load_context(data, vars)?;
    if options.apply_defaults {
        schema::apply_defaults(template_id, &mut context);
    }
    info!("Rendering '{}' with {} fields", template_id, context.len());

    let html = if options.fallback {
        renderer.render_or_fallback(template_id, &context)
    } else {
        renderer
            .render(template_id, &context)
            .with_context(|| format!("Failed to render template '{}'", template_id))?
    };

    write_output(&html, output)
}

/// Render a template file given by path, without the registry or the cache
pub fn render_inline(
    file: &Path,
    data: Option<&Path>,
    vars: &[String],
    output: Option<&Path>,
) -> Result<()> {
    let template = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read template {}", file.display()))?;
    let context = load_context(data, vars)?;

    let html = TemplateEngine::new()
        .render_template(&template, &context)
        .with_context(|| format!("Failed to render template {}", file.display()))?;

    write_output(&html, output)
}

/// Check card data against a template's requirements and its syntax
pub fn validate_data(
    template_id: &str,
    data: &Path,
    vars: &[String],
    config: &Config,
) -> Result<()> {
    info!("Validating data for template: {}", template_id);

    let context = load_context(Some(data), vars)?;
    let report = schema::validate(template_id, &context);

    let renderer = Renderer::new(&config.template_dir);
    renderer
        .load(template_id)
        .with_context(|| format!("Template '{}' failed to load", template_id))?;

    if !report.is_valid {
        for error in &report.errors {
            println!("  ✗ {}", error);
        }
        return Err(anyhow::anyhow!(
            "Data for template '{}' is invalid ({} errors)",
            template_id,
            report.errors.len()
        ));
    }

    println!("✓ Data for template '{}' is valid", template_id);
    println!("  Fields: {}", context.len());
    Ok(())
}

/// Check that a registered template parses
pub fn check_template(template_id: &str, config: &Config) -> Result<()> {
    let renderer = Renderer::new(&config.template_dir);
    let path = renderer.cache().resolve_path(renderer.registry().resolve(template_id));

    let template = renderer
        .load(template_id)
        .with_context(|| format!("Template check failed for '{}'", template_id))?;

    println!("✓ Template '{}' is valid", template_id);
    println!("  Path: {}", path.display());
    println!("  Blocks: {}", if template.has_blocks() { "yes" } else { "no" });
    Ok(())
}

/// Print the registered identifiers and where their files live
pub fn list_templates(config: &Config) -> Result<()> {
    let renderer = Renderer::new(&config.template_dir);

    for (id, relative) in renderer.registry().entries() {
        let path = renderer.cache().resolve_path(relative);
        let marker = if path.exists() { "" } else { "  (missing)" };
        println!("{:<16} {}{}", id, path.display(), marker);
    }

    Ok(())
}

fn write_output(content: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create output directory {}", parent.display())
                })?;
            }
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write output file {}", path.display()))?;
            info!("Output written to: {}", path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_load_context_merges_vars_over_file() {
        let dir = tempdir().unwrap();
        let data = dir.path().join("card.json");
        fs::write(&data, r#"{"message_title": "from file", "count": 2}"#).unwrap();

        let context = load_context(Some(data.as_path()), &["message_title=from flag".to_string()]).unwrap();

        assert_eq!(context.get("message_title"), Some(&Value::from("from flag")));
        assert_eq!(context.get("count"), Some(&Value::from(2i64)));
    }

    #[test]
    fn test_load_context_rejects_non_object() {
        let dir = tempdir().unwrap();
        let data = dir.path().join("card.json");
        fs::write(&data, "[1, 2, 3]").unwrap();

        assert!(load_context(Some(data.as_path()), &[]).is_err());
    }

    #[test]
    fn test_render_template_to_file() {
        let dir = tempdir().unwrap();
        let templates = dir.path().join("templates");
        fs::create_dir_all(templates.join("reminder")).unwrap();
        fs::write(
            templates.join("reminder/departure.html"),
            "{{message_icon}} {{message_title}}",
        )
        .unwrap();

        let config = Config {
            template_dir: templates,
            ..Config::default()
        };
        let output = dir.path().join("out/card.html");

        render_template(
            "departure",
            None,
            &["message_title=Leave".to_string()],
            Some(output.as_path()),
            RenderOptions {
                fallback: false,
                apply_defaults: true,
            },
            &config,
        )
        .unwrap();

        assert_eq!(fs::read_to_string(&output).unwrap(), "🚗 Leave");
    }

    #[test]
    fn test_validate_data_reports_missing_fields() {
        let dir = tempdir().unwrap();
        let templates = dir.path().join("templates");
        fs::create_dir_all(templates.join("reminder")).unwrap();
        fs::write(templates.join("reminder/departure.html"), "x").unwrap();
        let data = dir.path().join("card.json");
        fs::write(
            &data,
            r#"{"message_title": "Time to go", "message_content": "Train at 9"}"#,
        )
        .unwrap();

        let config = Config {
            template_dir: templates,
            ..Config::default()
        };

        assert!(validate_data("departure", &data, &[], &config).is_err());
        assert!(validate_data(
            "departure",
            &data,
            &[
                "current_time=08:00".to_string(),
                "confirm_button_text=OK".to_string()
            ],
            &config
        )
        .is_ok());
    }
}
