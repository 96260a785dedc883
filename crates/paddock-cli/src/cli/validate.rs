use super::{load_project, open_store};
use anyhow::Result;
use chrono::Utc;
use clap::Args;
use paddock::services::store::Stored;
use paddock::services::{
    check_content_freshness, validate, validate_image, validate_seo, BlogPost, ContentKind,
    ContentStore, Freshness, Horse, ServiceError, Testimonial, ValidationResult,
};
use paddock::source::{ContentSource, FsSource};
use serde_json::Value;

/// Kinds that carry a publishing checklist
const CHECKED_KINDS: [ContentKind; 3] =
    [ContentKind::Horse, ContentKind::Service, ContentKind::Facility];

/// Kinds ordered by date
const DATED_KINDS: [ContentKind; 3] =
    [ContentKind::Horse, ContentKind::Blog, ContentKind::Testimonial];

/// Fields holding a single image path
const IMAGE_FIELDS: [&str; 4] = ["main_image", "image", "featured_image", "photo"];

#[derive(Args)]
pub struct ValidateArgs {
    /// Content kind to check; defaults to horse, service and facility
    kind: Option<String>,

    /// Also report SEO recommendations
    #[arg(long)]
    seo: bool,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
pub struct FreshnessArgs {
    /// Content kind to check; defaults to horse, blog and testimonial
    kind: Option<String>,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

pub async fn execute_validate(args: ValidateArgs) -> Result<()> {
    let kinds = match &args.kind {
        Some(kind) => vec![kind.parse::<ContentKind>()?],
        None => CHECKED_KINDS.to_vec(),
    };

    let (project_root, config) = load_project()?;
    let source = FsSource::new(project_root.join(&config.content.root));

    let mut reports = Vec::new();
    for kind in kinds {
        for entry in source.list(kind).await? {
            let result = match entry.format.parse::<Value>(&entry.text) {
                Ok(record) => check_record(&record, kind, args.seo),
                Err(e) => ValidationResult {
                    is_valid: false,
                    errors: vec![format!("Could not parse file: {}", e)],
                    warnings: Vec::new(),
                },
            };
            reports.push(serde_json::json!({
                "kind": kind,
                "file": entry.location,
                "is_valid": result.is_valid,
                "errors": result.errors,
                "warnings": result.warnings,
            }));
        }
    }

    let invalid = reports.iter().filter(|r| r["is_valid"] == false).count();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            let status = if report["is_valid"] == true { "ok" } else { "invalid" };
            println!("[{}] {}", status, report["file"].as_str().unwrap_or_default());
            for error in report["errors"].as_array().into_iter().flatten() {
                println!("  error: {}", error.as_str().unwrap_or_default());
            }
            for warning in report["warnings"].as_array().into_iter().flatten() {
                println!("  warning: {}", warning.as_str().unwrap_or_default());
            }
        }
        println!("\n{} of {} record(s) valid", reports.len() - invalid, reports.len());
    }

    if invalid > 0 {
        let message = format!("{} record(s) failed validation", invalid);
        return Err(ServiceError::Validation(message).into());
    }
    Ok(())
}

/// Run the kind's checklist plus image and optional SEO checks
fn check_record(record: &Value, kind: ContentKind, seo: bool) -> ValidationResult {
    let mut result = validate(record, kind);

    let gallery = record
        .get("gallery")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|item| item.as_str().or_else(|| item.get("image")?.as_str()));
    let images = IMAGE_FIELDS
        .iter()
        .filter_map(|field| record.get(*field)?.as_str())
        .chain(gallery)
        .filter(|path| !path.is_empty());
    for path in images {
        if !validate_image(path) {
            result.warnings.push(format!("Unsupported image format: {}", path));
        }
    }

    if seo {
        result.warnings.extend(validate_seo(record));
    }
    result
}

pub async fn execute_freshness(args: FreshnessArgs) -> Result<()> {
    let kinds = match &args.kind {
        Some(kind) => vec![kind.parse::<ContentKind>()?],
        None => DATED_KINDS.to_vec(),
    };

    let (project_root, config) = load_project()?;
    let store = open_store(&project_root, &config);

    let mut rows = Vec::new();
    for kind in kinds {
        store.load_content(kind).await?;
        match kind {
            ContentKind::Horse => rows.extend(freshness_rows::<Horse>(&store)),
            ContentKind::Blog => rows.extend(freshness_rows::<BlogPost>(&store)),
            ContentKind::Testimonial => rows.extend(freshness_rows::<Testimonial>(&store)),
            other => {
                return Err(anyhow::anyhow!(
                    "{} content is not dated; choose horse, blog or testimonial",
                    other
                ))
            },
        }
    }

    if args.json {
        let output: Vec<Value> = rows
            .iter()
            .map(|(kind, slug, date, freshness)| {
                serde_json::json!({
                    "kind": kind,
                    "slug": slug,
                    "date": date,
                    "freshness": freshness,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    for (kind, slug, date, freshness) in &rows {
        println!(
            "{:<8} {:<12} {:<28} {}",
            freshness,
            kind,
            slug,
            date.as_deref().unwrap_or("-")
        );
    }
    Ok(())
}

type FreshnessRow = (ContentKind, String, Option<String>, Freshness);

fn freshness_rows<T: Stored>(store: &ContentStore) -> Vec<FreshnessRow> {
    let now = Utc::now();
    store
        .collection::<T>()
        .iter()
        .map(|record| {
            (
                T::KIND,
                record.slug().to_string(),
                record.raw_date().map(String::from),
                check_content_freshness(record.raw_date(), now),
            )
        })
        .collect()
}
