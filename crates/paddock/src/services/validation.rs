//! Pre-publish checks for authored content.
//!
//! Rules run against the raw document rather than the typed records so that
//! a record missing required fields can still be inspected and reported on.
//! A field counts as missing when it is absent, `null`, `false`, `0` or an
//! empty string.

use super::types::{parse_content_date, ContentKind};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

pub const MIN_AGE: f64 = 0.0;
pub const MAX_AGE: f64 = 40.0;
pub const MIN_EXCERPT_LEN: usize = 50;
pub const MIN_BODY_LEN: usize = 200;
pub const MIN_GALLERY_IMAGES: usize = 2;
pub const META_DESCRIPTION_MIN: usize = 50;
pub const META_DESCRIPTION_MAX: usize = 160;
pub const SEO_TITLE_MAX: usize = 60;
pub const IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".webp", ".gif"];

/// Outcome of validating one record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    fn from_parts(errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    pub fn valid() -> Self {
        Self::from_parts(Vec::new(), Vec::new())
    }
}

/// Age of a piece of content relative to now
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Freshness {
    Fresh,
    Recent,
    Aging,
    Stale,
    Undated,
}

impl std::fmt::Display for Freshness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Freshness::Fresh => "fresh",
            Freshness::Recent => "recent",
            Freshness::Aging => "aging",
            Freshness::Stale => "stale",
            Freshness::Undated => "undated",
        };
        write!(f, "{}", s)
    }
}

/// Validate a record of the given kind. Kinds without a checklist always pass.
pub fn validate(record: &Value, kind: ContentKind) -> ValidationResult {
    match kind {
        ContentKind::Horse => validate_horse(record),
        ContentKind::Service => validate_service(record),
        ContentKind::Facility => validate_facility(record),
        _ => ValidationResult::valid(),
    }
}

pub fn validate_horse(horse: &Value) -> ValidationResult {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    require(horse, "name", "Horse name is required", &mut errors);
    require(horse, "status", "Status is required", &mut errors);
    require(horse, "type", "Listing type (Sale/Lease/Both) is required", &mut errors);
    require(horse, "main_image", "Main photo is required", &mut errors);

    match horse.get("basic_info").filter(|v| truthy(Some(v))) {
        None => errors.push("Basic information is required".to_string()),
        Some(info) => {
            let age_ok = info
                .get("age")
                .and_then(as_number)
                .is_some_and(|age| (MIN_AGE..=MAX_AGE).contains(&age));
            if !age_ok {
                errors.push("Valid age is required (0-40 years)".to_string());
            }
            require(info, "height", "Height is required", &mut errors);
            require(info, "gender", "Gender is required", &mut errors);
            require(info, "breed", "Breed is required", &mut errors);
            require(info, "color", "Color is required", &mut errors);
        },
    }

    match horse.get("performance").filter(|v| truthy(Some(v))) {
        None => errors.push("Performance information is required".to_string()),
        Some(perf) => {
            require(perf, "discipline", "Discipline is required", &mut errors);
            require(perf, "level", "Suitable level is required", &mut errors);
        },
    }

    match horse.get("pricing").filter(|v| truthy(Some(v))) {
        None => errors.push("Pricing information is required".to_string()),
        Some(pricing) => {
            let has_sale = truthy(pricing.get("sale_price"));
            let has_lease = truthy(pricing.get("lease_price"));
            match horse.get("type").and_then(Value::as_str) {
                Some("Sale") if !has_sale => {
                    errors.push("Sale price is required for horses for sale".to_string())
                },
                Some("Lease") if !has_lease => {
                    errors.push("Lease price is required for horses for lease".to_string())
                },
                Some("Both") if !has_sale && !has_lease => {
                    errors.push("At least one price (sale or lease) is required".to_string())
                },
                _ => {},
            }
        },
    }

    check_description(
        horse.get("excerpt"),
        "Short description is required",
        MIN_EXCERPT_LEN,
        "Short description should be at least 50 characters",
        &mut errors,
        &mut warnings,
    );
    check_description(
        horse.get("body"),
        "Full description is required",
        MIN_BODY_LEN,
        "Full description should be at least 200 characters",
        &mut errors,
        &mut warnings,
    );

    if list_len(horse.get("gallery")) < MIN_GALLERY_IMAGES {
        warnings.push("At least 2 gallery photos recommended".to_string());
    }

    if truthy(horse.get("meta_description")) && !meta_description_in_window(horse) {
        warnings.push("Meta description should be between 50-160 characters".to_string());
    }

    ValidationResult::from_parts(errors, warnings)
}

pub fn validate_service(service: &Value) -> ValidationResult {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    require(service, "title", "Service name is required", &mut errors);
    require(service, "service_category", "Service category is required", &mut errors);
    require(service, "image", "Featured image is required", &mut errors);
    require(service, "excerpt", "Short description is required", &mut errors);

    match service.get("pricing_options").and_then(Value::as_array) {
        Some(options) if !options.is_empty() => {
            for (index, option) in options.iter().enumerate() {
                if !truthy(option.get("name")) {
                    errors.push(format!("Pricing option {}: Name is required", index + 1));
                }
                if !truthy(option.get("price")) {
                    warnings.push(format!("Pricing option {}: Price is recommended", index + 1));
                }
            }
        },
        _ => warnings.push("At least one pricing option recommended".to_string()),
    }

    require(service, "body", "Full description is required", &mut errors);

    ValidationResult::from_parts(errors, warnings)
}

pub fn validate_facility(facility: &Value) -> ValidationResult {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    require(facility, "title", "Facility name is required", &mut errors);
    require(facility, "facility_type", "Facility type is required", &mut errors);
    require(facility, "main_image", "Main image is required", &mut errors);

    if list_len(facility.get("features")) == 0 {
        warnings.push("At least one feature should be listed".to_string());
    }

    require(facility, "body", "Description is required", &mut errors);

    if list_len(facility.get("gallery")) == 0 {
        warnings.push("Photo gallery recommended".to_string());
    }

    ValidationResult::from_parts(errors, warnings)
}

/// Generic check that each named top-level field is present
pub fn validate_required(record: &Value, fields: &[&str]) -> ValidationResult {
    let errors = fields
        .iter()
        .filter(|field| !truthy(record.get(**field)))
        .map(|field| format!("Missing required field: {}", field))
        .collect();
    ValidationResult::from_parts(errors, Vec::new())
}

/// True when the path ends in an allowed image extension (case-insensitive)
pub fn validate_image(path: &str) -> bool {
    let Some(dot) = path.rfind('.') else {
        return false;
    };
    let extension = path[dot..].to_lowercase();
    IMAGE_EXTENSIONS.contains(&extension.as_str())
}

/// SEO recommendations for a record; empty when nothing to improve
pub fn validate_seo(record: &Value) -> Vec<String> {
    let mut warnings = Vec::new();

    if !truthy(record.get("meta_description")) {
        warnings.push("Meta description is recommended for SEO".to_string());
    } else if !meta_description_in_window(record) {
        warnings.push("Meta description should be between 50-160 characters".to_string());
    }

    if text_len(record.get("title")).is_some_and(|len| len > SEO_TITLE_MAX) {
        warnings.push("Title should be under 60 characters for optimal SEO".to_string());
    }

    if list_len(record.get("keywords")) == 0 {
        warnings.push("Keywords are recommended for SEO".to_string());
    }

    warnings
}

/// Bucket a content date by whole days elapsed before `now`
pub fn check_content_freshness(date: Option<&str>, now: DateTime<Utc>) -> Freshness {
    let Some(date) = date.and_then(parse_content_date) else {
        return Freshness::Undated;
    };

    match (now - date).num_days() {
        d if d < 7 => Freshness::Fresh,
        d if d < 30 => Freshness::Recent,
        d if d < 90 => Freshness::Aging,
        _ => Freshness::Stale,
    }
}

fn truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

fn require(record: &Value, field: &str, message: &str, errors: &mut Vec<String>) {
    if !truthy(record.get(field)) {
        errors.push(message.to_string());
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn text_len(value: Option<&Value>) -> Option<usize> {
    value.and_then(Value::as_str).map(|s| s.chars().count())
}

/// Length of an array field, or of a string field; 0 when absent
fn list_len(value: Option<&Value>) -> usize {
    match value {
        Some(Value::Array(items)) => items.len(),
        Some(Value::String(s)) => s.chars().count(),
        _ => 0,
    }
}

fn meta_description_in_window(record: &Value) -> bool {
    text_len(record.get("meta_description"))
        .is_none_or(|len| (META_DESCRIPTION_MIN..=META_DESCRIPTION_MAX).contains(&len))
}

fn check_description(
    value: Option<&Value>,
    missing: &str,
    min_len: usize,
    short: &str,
    errors: &mut Vec<String>,
    warnings: &mut Vec<String>,
) {
    if !truthy(value) {
        errors.push(missing.to_string());
    } else if text_len(value).is_some_and(|len| len < min_len) {
        warnings.push(short.to_string());
    }
}
