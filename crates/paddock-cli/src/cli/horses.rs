use super::{load_project, open_store, truncate};
use anyhow::Result;
use clap::Args;
use paddock::services::views::format_price;
use paddock::services::{FilterUpdate, HorseListing};

#[derive(Args)]
pub struct HorsesArgs {
    /// Status: Available, Pending, Sold, Leased or all
    #[arg(long)]
    status: Option<String>,

    /// Listing type: Sale, Lease, Both or all
    #[arg(long = "type", value_name = "TYPE")]
    listing_type: Option<String>,

    /// Discipline, exact match
    #[arg(long)]
    discipline: Option<String>,

    /// Suitable level, exact match
    #[arg(long)]
    level: Option<String>,

    /// Minimum effective price, inclusive
    #[arg(long)]
    min_price: Option<String>,

    /// Maximum effective price, inclusive
    #[arg(long)]
    max_price: Option<String>,

    /// Search name, breed and descriptions
    #[arg(long)]
    search: Option<String>,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

pub async fn execute(args: HorsesArgs) -> Result<()> {
    let (project_root, config) = load_project()?;
    let mut listing = HorseListing::new(open_store(&project_root, &config));
    listing.load().await?;

    listing.update_filters(FilterUpdate {
        status: args.status,
        listing_type: args.listing_type,
        discipline: args.discipline,
        level: args.level,
        min_price: args.min_price,
        max_price: args.max_price,
        search: args.search,
    });

    let horses = listing.filtered();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&horses)?);
        return Ok(());
    }

    if horses.is_empty() {
        println!("No horses match the current filters");
        return Ok(());
    }

    for horse in &horses {
        println!(
            "{:<24} {:<28} {:<10} {:<6} {}",
            horse.slug,
            truncate(horse.name.as_deref().unwrap_or("(unnamed)"), 28),
            horse.status.map(|s| s.to_string()).unwrap_or_default(),
            horse.listing_type.map(|t| t.to_string()).unwrap_or_default(),
            format_price(Some(horse.effective_price()), &config.display.currency)
        );
    }
    println!("\n{} horse(s)", horses.len());
    Ok(())
}
