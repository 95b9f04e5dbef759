// ABOUTME: Integration tests for the command line interface
// ABOUTME: Runs the built binary against temporary template directories and data files

use std::fs;
use std::process::{Command, Output};

use serde_json::json;

mod common;
use common::{bundled_template_dir, full_schedule_data, gas_station_data, TestEnvironment};

fn cardrender(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_cardrender"))
        .args(args)
        .env_remove("RUST_LOG")
        .env_remove("CARDRENDER_TEMPLATE_DIR")
        .output()
        .expect("Failed to execute cardrender")
}

#[test]
fn test_cli_help_command() {
    let output = cardrender(&["--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("cardrender"));
    assert!(stdout.contains("render"));
}

#[test]
fn test_cli_list_templates() {
    let env = TestEnvironment::new();
    env.write_template("reminder/departure.html", "x");
    let dir = env.template_dir();

    let output = cardrender(&["--template-dir", dir.to_str().unwrap(), "list"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("gas-station"));
    assert!(stdout.contains("full-schedule"));
    assert!(stdout.contains("(missing)"));
    let departure_line = stdout
        .lines()
        .find(|line| line.starts_with("departure"))
        .unwrap();
    assert!(!departure_line.contains("(missing)"));
}

#[test]
fn test_cli_render_with_vars_to_stdout() {
    let env = TestEnvironment::new();
    env.write_template(
        "reminder/departure.html",
        "{{message_icon}} {{message_title}}{{#if current_time}} at {{current_time}}{{/if}}",
    );
    let dir = env.template_dir();

    let output = cardrender(&[
        "--template-dir",
        dir.to_str().unwrap(),
        "render",
        "departure",
        "-V",
        "message_title=Time to leave",
    ]);

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "🚗 Time to leave\n");
}

#[test]
fn test_cli_render_bundled_template_to_file() {
    let env = TestEnvironment::new();
    let data = env.write_data("schedule", &full_schedule_data());
    let out = env.path().join("out/schedule.html");
    let dir = bundled_template_dir();

    let output = cardrender(&[
        "--template-dir",
        dir.to_str().unwrap(),
        "render",
        "full-schedule",
        "--data",
        data.to_str().unwrap(),
        "--output",
        out.to_str().unwrap(),
    ]);

    assert!(output.status.success());
    let html = fs::read_to_string(&out).unwrap();
    assert!(html.contains("Forbidden City"));
    assert!(html.contains("详细行程"));
}

#[test]
fn test_cli_render_parse_error_fails() {
    let env = TestEnvironment::new();
    env.write_template("reminder/departure.html", "{{#each items}}open");
    let dir = env.template_dir();

    let output = cardrender(&["--template-dir", dir.to_str().unwrap(), "render", "departure"]);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("{{#each items}}"));
}

#[test]
fn test_cli_render_fallback_fragment() {
    let env = TestEnvironment::new();
    let dir = env.template_dir();

    let output = cardrender(&[
        "--template-dir",
        dir.to_str().unwrap(),
        "render",
        "restaurant",
        "--fallback",
    ]);

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "<div class=\"error\">Template rendering failed: recommendation/restaurant.html</div>\n"
    );
}

#[test]
fn test_cli_inline_template() {
    let env = TestEnvironment::new();
    let template = env.path().join("greeting.txt");
    fs::write(&template, "{{#each people}}{{name}}{{#if @last}}.{{/if}}{{/each}}").unwrap();
    let data = env.write_data("people", &json!({"people": [{"name": "a"}, {"name": "b"}]}));

    let output = cardrender(&[
        "inline",
        template.to_str().unwrap(),
        "--data",
        data.to_str().unwrap(),
    ]);

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "ab.\n");
}

#[test]
fn test_cli_validate_data() {
    let env = TestEnvironment::new();
    env.write_template("recommendation/gas-station.html", "{{station_name}}");
    let dir = env.template_dir();
    let good = env.write_data("good", &gas_station_data());
    let mut bad = gas_station_data();
    bad["station_image"] = json!("shell.jpg");
    bad["navigate_button_text"] = json!("");
    bad.as_object_mut().unwrap().remove("station_name");
    let bad = env.write_data("bad", &bad);

    let output = cardrender(&[
        "--template-dir",
        dir.to_str().unwrap(),
        "validate",
        "gas-station",
        "--data",
        good.to_str().unwrap(),
    ]);
    assert!(output.status.success());

    let output = cardrender(&[
        "--template-dir",
        dir.to_str().unwrap(),
        "validate",
        "gas-station",
        "--data",
        bad.to_str().unwrap(),
    ]);
    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("station_name is required"));
    assert!(stdout.contains("navigate_button_text is required"));
    assert!(stdout.contains("station_image must be a valid URL"));
}

#[test]
fn test_cli_check_template() {
    let env = TestEnvironment::new();
    env.write_template("itinerary/schedule-change.html", "{{#if a}}{{/each}}");
    let dir = env.template_dir();

    let output = cardrender(&["--template-dir", dir.to_str().unwrap(), "check", "schedule-change"]);
    assert!(!output.status.success());

    let bundled = bundled_template_dir();
    let output = cardrender(&[
        "--template-dir",
        bundled.to_str().unwrap(),
        "check",
        "schedule-change",
    ]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Blocks: yes"));
}
