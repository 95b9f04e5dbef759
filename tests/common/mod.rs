// ABOUTME: Common utilities and helpers for integration tests
// ABOUTME: Provides temporary template directories and shared card data

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use cardrender::template::{context_from_json, Context};

pub struct TestEnvironment {
    pub temp_dir: TempDir,
}

impl TestEnvironment {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn template_dir(&self) -> PathBuf {
        self.path().join("templates")
    }

    /// Write a template under the template directory, creating parents
    pub fn write_template(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.template_dir().join(relative);
        fs::create_dir_all(path.parent().unwrap()).expect("Failed to create template dir");
        fs::write(&path, content).expect("Failed to write template");
        path
    }

    /// Write a JSON data file next to the templates
    pub fn write_data(&self, name: &str, data: &serde_json::Value) -> PathBuf {
        let path = self.path().join(format!("{}.json", name));
        fs::write(&path, serde_json::to_string_pretty(data).unwrap())
            .expect("Failed to write data file");
        path
    }
}

/// Templates shipped with the crate
pub fn bundled_template_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("templates")
}

pub fn context(data: serde_json::Value) -> Context {
    context_from_json(data).expect("test data must be a JSON object")
}

/// A complete gas-station card
pub fn gas_station_data() -> serde_json::Value {
    serde_json::json!({
        "message_title": "Fuel up",
        "message_content": "Tank is low",
        "station_name": "Shell",
        "station_image": "https://example.com/shell.jpg",
        "fuel_types": "92, 95",
        "distance": "800m",
        "address": "2 Ring Rd",
        "operating_hours": "24h",
        "navigate_alert_text": "Opening map",
        "navigate_button_text": "Go"
    })
}

pub fn full_schedule_data() -> serde_json::Value {
    serde_json::json!({
        "trip_title": "Beijing in two days",
        "header_title": "Beijing",
        "header_subtitle": "Culture and food",
        "itinerary_title": "Itinerary",
        "days": [
            {
                "day_title": "Day 1",
                "activities": [
                    {
                        "time": "09:00",
                        "icon": "🏛️",
                        "title": "Forbidden City",
                        "description": "Palace museum",
                        "price": "60",
                        "buttons": [{"class": "nav", "text": "Navigate"}]
                    },
                    {
                        "time": "18:00",
                        "icon": "🍽️",
                        "title": "Roast duck",
                        "description": "Dinner",
                        "price": "200"
                    }
                ]
            },
            {
                "day_title": "Day 2",
                "activities": [
                    {
                        "time": "08:00",
                        "icon": "🧱",
                        "title": "Great Wall",
                        "description": "Mutianyu section",
                        "price": "45"
                    }
                ]
            }
        ],
        "cost_summary": {
            "title": "Costs",
            "breakdown": [
                {"label": "Tickets", "value": "105"},
                {"label": "Food", "value": "200"}
            ],
            "total_label": "Total",
            "total_value": "305"
        },
        "footer_text": "Have a good trip"
    })
}
