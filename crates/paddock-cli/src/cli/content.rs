use super::{load_project, open_store, truncate};
use anyhow::Result;
use clap::Args;
use paddock::services::store::Stored;
use paddock::services::{
    views, BlogPost, ContentKind, ContentStore, DisplayConfig, Facility, Horse, Record, Service,
    ServiceError, TeamMember, Testimonial,
};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Args)]
pub struct ListArgs {
    /// Content kind (horse, service, team, blog, facility, testimonial, page, setting)
    kind: String,

    /// Only featured records
    #[arg(long)]
    featured: bool,

    /// Only dated records, newest first
    #[arg(long, conflicts_with = "featured")]
    recent: bool,

    /// Filter by category (discipline, service category, role or blog category)
    #[arg(long)]
    category: Option<String>,

    /// Filter by tag
    #[arg(long)]
    tag: Option<String>,

    /// Case-insensitive text search
    #[arg(long)]
    search: Option<String>,

    /// Maximum number of records
    #[arg(long)]
    limit: Option<usize>,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Content kind
    kind: String,

    /// Record slug, or document name for pages and settings
    slug: String,
}

pub async fn execute_list(args: ListArgs) -> Result<()> {
    let kind: ContentKind = args.kind.parse()?;
    let (project_root, config) = load_project()?;
    let store = open_store(&project_root, &config);
    store.load_content(kind).await?;

    match kind {
        ContentKind::Horse => list_records::<Horse>(&store, &args, &config.display),
        ContentKind::Service => list_records::<Service>(&store, &args, &config.display),
        ContentKind::Team => list_records::<TeamMember>(&store, &args, &config.display),
        ContentKind::Blog => list_records::<BlogPost>(&store, &args, &config.display),
        ContentKind::Facility => list_records::<Facility>(&store, &args, &config.display),
        ContentKind::Testimonial => list_records::<Testimonial>(&store, &args, &config.display),
        ContentKind::Page => list_documents(&store.pages(), args.json),
        ContentKind::Setting => list_documents(&store.settings(), args.json),
    }
}

pub async fn execute_show(args: ShowArgs) -> Result<()> {
    let kind: ContentKind = args.kind.parse()?;
    let (project_root, config) = load_project()?;
    let store = open_store(&project_root, &config);
    store.load_content(kind).await?;

    let found = match kind {
        ContentKind::Horse => to_json(store.horse_by_slug(&args.slug))?,
        ContentKind::Service => to_json(store.service_by_slug(&args.slug))?,
        ContentKind::Team => to_json(store.team_member_by_slug(&args.slug))?,
        ContentKind::Blog => to_json(store.blog_post_by_slug(&args.slug))?,
        ContentKind::Facility => to_json(store.facility_by_slug(&args.slug))?,
        ContentKind::Testimonial => to_json(store.testimonial_by_slug(&args.slug))?,
        ContentKind::Page => store.page(&args.slug),
        ContentKind::Setting => store.setting(&args.slug),
    };

    let value =
        found.ok_or_else(|| ServiceError::NotFound(format!("{} '{}'", kind, args.slug)))?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

fn to_json<T: Record>(record: Option<T>) -> Result<Option<Value>> {
    record
        .map(serde_json::to_value)
        .transpose()
        .map_err(Into::into)
}

/// Apply the list options in a fixed order: featured or recent, then
/// category, tag, search, and finally the limit.
fn select<T: Stored>(store: &ContentStore, args: &ListArgs, display: &DisplayConfig) -> Vec<T> {
    let mut records = if args.featured {
        store.featured::<T>(Some(args.limit.unwrap_or(display.featured_limit)))
    } else if args.recent {
        store.recent::<T>(args.limit.unwrap_or(display.recent_limit))
    } else {
        store.collection::<T>().to_vec()
    };

    records = views::by_category(&records, args.category.as_deref());
    if let Some(tag) = &args.tag {
        records = views::by_tag(&records, tag);
    }
    if let Some(term) = &args.search {
        records = views::search(&records, term);
    }
    if let Some(limit) = args.limit {
        records.truncate(limit);
    }
    records
}

fn list_records<T: Stored>(
    store: &ContentStore,
    args: &ListArgs,
    display: &DisplayConfig,
) -> Result<()> {
    let records = select::<T>(store, args, display);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("No {} content found", T::KIND);
        return Ok(());
    }

    for record in &records {
        let marker = if record.is_featured() { "*" } else { " " };
        println!(
            "{} {:<28} {:<36} {}",
            marker,
            record.slug(),
            truncate(record.label().unwrap_or("(untitled)"), 36),
            record.raw_date().unwrap_or("")
        );
    }
    println!("\n{} record(s)", records.len());
    Ok(())
}

fn list_documents(documents: &BTreeMap<String, Value>, json: bool) -> Result<()> {
    let names: Vec<&String> = documents.keys().collect();
    if json {
        println!("{}", serde_json::to_string_pretty(&names)?);
    } else if names.is_empty() {
        println!("No documents found");
    } else {
        for name in names {
            println!("{}", name);
        }
    }
    Ok(())
}
