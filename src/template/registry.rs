// ABOUTME: Fixed table mapping short template identifiers to resource paths
// ABOUTME: Unknown identifiers fall back to the first entry with a logged warning

use std::path::Path;
use tracing::warn;

/// Identifier and resource path (relative to the template directory)
const TEMPLATES: &[(&str, &str)] = &[
    ("gas-station", "recommendation/gas-station.html"),
    ("attraction", "recommendation/attraction.html"),
    ("restaurant", "recommendation/restaurant.html"),
    ("departure", "reminder/departure.html"),
    ("schedule-change", "itinerary/schedule-change.html"),
    ("full-schedule", "itinerary/full-schedule.html"),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateRegistry;

impl TemplateRegistry {
    pub fn new() -> Self {
        Self
    }

    /// Resource path for `template_id`.
    ///
    /// An unknown identifier resolves to the default (first) entry instead of
    /// failing, and a warning is logged so typos do not go unnoticed.
    pub fn resolve(&self, template_id: &str) -> &'static Path {
        match self.lookup(template_id) {
            Some(path) => path,
            None => {
                warn!(
                    "Unknown template '{}', falling back to '{}'",
                    template_id, TEMPLATES[0].0
                );
                self.default_path()
            }
        }
    }

    /// Path of the entry unknown identifiers fall back to
    pub fn default_path(&self) -> &'static Path {
        Path::new(TEMPLATES[0].1)
    }

    /// Resource path for a known identifier, without fallback
    pub fn lookup(&self, template_id: &str) -> Option<&'static Path> {
        TEMPLATES
            .iter()
            .find(|(id, _)| *id == template_id)
            .map(|(_, path)| Path::new(*path))
    }

    pub fn is_known(&self, template_id: &str) -> bool {
        self.lookup(template_id).is_some()
    }

    /// Identifiers in table order
    pub fn available(&self) -> Vec<&'static str> {
        TEMPLATES.iter().map(|(id, _)| *id).collect()
    }

    /// Identifier and path pairs in table order
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, &'static Path)> {
        TEMPLATES.iter().map(|(id, path)| (*id, Path::new(*path)))
    }
}
