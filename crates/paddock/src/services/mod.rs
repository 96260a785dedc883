pub mod config;
pub mod filter;
pub mod horses;
pub mod loader;
pub mod records;
pub mod settings;
pub mod store;
pub mod types;
pub mod validation;
pub mod views;

pub use config::ConfigService;
pub use filter::{apply_filters, matches_filters, FilterUpdate, HorseFilters};
pub use horses::HorseListing;
pub use loader::{sort_records, ContentLoader};
pub use records::{
    BasicInfo, BlogPost, Facility, Horse, HorseStatus, ListingType, Performance, Pricing,
    PricingOption, Record, Service, TeamMember, Testimonial,
};
pub use settings::{ContactInfo, SiteSettings, SocialLinks};
pub use store::{ContentStore, LoadState};
pub use types::{
    normalize_slug, parse_content_date, ContentConfig, ContentFormat, ContentKind, DisplayConfig,
    ProjectConfig, SortPolicy,
};
pub use validation::{
    check_content_freshness, validate, validate_image, validate_required, validate_seo,
    Freshness, ValidationResult,
};

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("failed to load content: {0}")]
    LoadFailed(String),

    #[error("{0}")]
    Internal(#[from] anyhow::Error),
}
