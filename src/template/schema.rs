// ABOUTME: Per-template data requirements and default field values
// ABOUTME: Checks field presence, types, ranges and nested item shapes of card data before rendering

use url::Url;

use super::value::{Context, Value};

#[derive(Debug, Clone, Copy)]
enum Kind {
    Text,
    Url,
    Number { min: Option<f64>, max: Option<f64> },
    /// Sequence whose items are mappings with the given fields
    List(&'static [Field]),
    Object(&'static [Field]),
}

#[derive(Debug, Clone, Copy)]
struct Field {
    name: &'static str,
    kind: Kind,
    required: bool,
}

const fn text(name: &'static str) -> Field {
    Field {
        name,
        kind: Kind::Text,
        required: true,
    }
}

const fn url(name: &'static str) -> Field {
    Field {
        name,
        kind: Kind::Url,
        required: true,
    }
}

const fn number(name: &'static str, min: Option<f64>, max: Option<f64>) -> Field {
    Field {
        name,
        kind: Kind::Number { min, max },
        required: true,
    }
}

const fn list(name: &'static str, fields: &'static [Field]) -> Field {
    Field {
        name,
        kind: Kind::List(fields),
        required: true,
    }
}

const fn object(name: &'static str, fields: &'static [Field]) -> Field {
    Field {
        name,
        kind: Kind::Object(fields),
        required: true,
    }
}

const fn optional(field: Field) -> Field {
    Field {
        required: false,
        ..field
    }
}

const GAS_STATION: &[Field] = &[
    optional(text("message_icon")),
    text("message_title"),
    text("message_content"),
    optional(text("station_icon")),
    text("station_name"),
    url("station_image"),
    text("fuel_types"),
    text("distance"),
    text("address"),
    text("operating_hours"),
    optional(text("services")),
    text("navigate_alert_text"),
    text("navigate_button_text"),
];

const RESTAURANT: &[Field] = &[
    optional(text("message_icon")),
    text("message_title"),
    text("message_content"),
    optional(text("restaurant_icon")),
    text("restaurant_name"),
    url("restaurant_image"),
    optional(number("rating", Some(0.0), Some(5.0))),
    optional(number("review_count", Some(0.0), None)),
    text("distance"),
    text("address"),
    text("operating_hours"),
    optional(text("phone")),
    text("navigate_alert_text"),
    text("navigate_button_text"),
];

const ATTRACTION: &[Field] = &[
    optional(text("message_icon")),
    text("message_title"),
    text("message_content"),
    optional(text("attraction_icon")),
    text("attraction_name"),
    url("attraction_image"),
    optional(number("rating", Some(0.0), Some(5.0))),
    optional(number("review_count", Some(0.0), None)),
    text("distance"),
    text("address"),
    text("operating_hours"),
    text("ticket_info"),
    text("navigate_alert_text"),
    text("navigate_button_text"),
];

const DEPARTURE: &[Field] = &[
    optional(text("message_icon")),
    text("message_title"),
    text("message_content"),
    text("current_time"),
    text("confirm_button_text"),
];

const SCHEDULE_ITEM: &[Field] = &[
    text("label"),
    text("icon"),
    text("icon_color"),
    text("content"),
];

const SCHEDULE_CHANGE: &[Field] = &[
    optional(text("alert_color")),
    optional(text("alert_icon")),
    text("alert_title"),
    text("alert_message"),
    text("service_title"),
    text("action_button_text"),
    text("action_alert_text"),
    list("schedule_items", SCHEDULE_ITEM),
];

const BUTTON: &[Field] = &[text("class"), text("text")];

const ACTIVITY: &[Field] = &[
    text("time"),
    text("icon"),
    text("title"),
    text("description"),
    text("price"),
    optional(list("buttons", BUTTON)),
];

const DAY: &[Field] = &[text("day_title"), list("activities", ACTIVITY)];

const BREAKDOWN_ROW: &[Field] = &[text("label"), text("value")];

const COST_SUMMARY: &[Field] = &[
    text("title"),
    list("breakdown", BREAKDOWN_ROW),
    text("total_label"),
    text("total_value"),
];

const FULL_SCHEDULE: &[Field] = &[
    text("trip_title"),
    optional(text("print_button_text")),
    text("header_title"),
    text("header_subtitle"),
    text("itinerary_title"),
    optional(text("schedule_section_title")),
    list("days", DAY),
    optional(object("cost_summary", COST_SUMMARY)),
    text("footer_text"),
];

struct Schema {
    id: &'static str,
    /// Fields that must be present and truthy
    required: &'static [&'static str],
    required_sequences: &'static [&'static str],
    fields: &'static [Field],
    defaults: &'static [(&'static str, &'static str)],
}

const SCHEMAS: &[Schema] = &[
    Schema {
        id: "gas-station",
        required: &["message_title", "station_name", "navigate_button_text"],
        required_sequences: &[],
        fields: GAS_STATION,
        defaults: &[("message_icon", "⛽")],
    },
    Schema {
        id: "restaurant",
        required: &["message_title", "restaurant_name", "navigate_button_text"],
        required_sequences: &[],
        fields: RESTAURANT,
        defaults: &[("message_icon", "🍽️")],
    },
    Schema {
        id: "attraction",
        required: &["message_title", "attraction_name", "navigate_button_text"],
        required_sequences: &[],
        fields: ATTRACTION,
        defaults: &[("message_icon", "🏛️")],
    },
    Schema {
        id: "departure",
        required: &["message_title", "confirm_button_text"],
        required_sequences: &[],
        fields: DEPARTURE,
        defaults: &[("message_icon", "🚗")],
    },
    Schema {
        id: "schedule-change",
        required: &["alert_title", "service_title"],
        required_sequences: &[],
        fields: SCHEDULE_CHANGE,
        defaults: &[("alert_color", "text-orange-600"), ("alert_icon", "⚠️")],
    },
    Schema {
        id: "full-schedule",
        required: &["trip_title"],
        required_sequences: &["days"],
        fields: FULL_SCHEDULE,
        defaults: &[
            ("print_button_text", "打印行程"),
            ("schedule_section_title", "详细行程"),
        ],
    },
];

fn schema_for(template_id: &str) -> Option<&'static Schema> {
    SCHEMAS.iter().find(|schema| schema.id == template_id)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub is_valid: bool,
}

impl ValidationReport {
    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}

/// Check `data` against the requirements of `template_id`.
///
/// Key fields must be present and truthy. Every field of the card must also
/// have the right type: text, URL, number within range, or a list whose
/// items have the listed fields. Nested problems are reported with their
/// path, e.g. `days[0].activities[1].title is required`. Identifiers
/// without a schema always validate.
pub fn validate(template_id: &str, data: &Context) -> ValidationReport {
    let Some(schema) = schema_for(template_id) else {
        return ValidationReport::from_errors(Vec::new());
    };

    let mut errors = Vec::new();
    for field in schema.required {
        if !data.get(*field).is_some_and(Value::is_truthy) {
            errors.push(format!("{} is required", field));
        }
    }
    for field in schema.required_sequences {
        if data.get(*field).and_then(Value::as_sequence).is_none() {
            errors.push(format!("{} array is required", field));
        }
    }

    let mut field_errors = Vec::new();
    check_fields(schema.fields, data, "", &mut field_errors);
    for error in field_errors {
        if !errors.contains(&error) {
            errors.push(error);
        }
    }

    ValidationReport::from_errors(errors)
}

fn check_fields(fields: &[Field], data: &Context, prefix: &str, errors: &mut Vec<String>) {
    for field in fields {
        let path = format!("{}{}", prefix, field.name);
        match data.get(field.name) {
            Some(value) => check_value(field.kind, value, &path, errors),
            None if field.required => errors.push(format!("{} is required", path)),
            None => {}
        }
    }
}

fn check_value(kind: Kind, value: &Value, path: &str, errors: &mut Vec<String>) {
    match (kind, value) {
        (Kind::Text, Value::String(_)) => {}
        (Kind::Text, _) => errors.push(format!("{} must be a string", path)),
        (Kind::Url, Value::String(s)) => {
            if Url::parse(s).is_err() {
                errors.push(format!("{} must be a valid URL", path));
            }
        }
        (Kind::Url, _) => errors.push(format!("{} must be a valid URL", path)),
        (Kind::Number { min, max }, Value::Number(n)) => {
            let n = n.as_f64().unwrap_or_default();
            if let Some(min) = min.filter(|min| n < *min) {
                errors.push(format!("{} must be at least {}", path, min));
            }
            if let Some(max) = max.filter(|max| n > *max) {
                errors.push(format!("{} must be at most {}", path, max));
            }
        }
        (Kind::Number { .. }, _) => errors.push(format!("{} must be a number", path)),
        (Kind::List(fields), Value::Sequence(items)) => {
            for (index, item) in items.iter().enumerate() {
                let item_path = format!("{}[{}]", path, index);
                match item {
                    Value::Mapping(map) => {
                        check_fields(fields, map, &format!("{}.", item_path), errors)
                    }
                    _ => errors.push(format!("{} must be an object", item_path)),
                }
            }
        }
        (Kind::List(_), _) => errors.push(format!("{} must be an array", path)),
        (Kind::Object(fields), Value::Mapping(map)) => {
            check_fields(fields, map, &format!("{}.", path), errors)
        }
        (Kind::Object(_), _) => errors.push(format!("{} must be an object", path)),
    }
}

/// Fill in default values for fields the caller left out
pub fn apply_defaults(template_id: &str, data: &mut Context) {
    let Some(schema) = schema_for(template_id) else {
        return;
    };
    for (field, default) in schema.defaults {
        data.entry(field.to_string())
            .or_insert_with(|| Value::from(*default));
    }
}
