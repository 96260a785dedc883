//! Typed content records.
//!
//! Every collection record keeps the fields the engine reads as typed
//! members and carries the rest of the authored document in `extra`, so a
//! record serializes back to what the CMS wrote plus its resolved slug.

use super::types::{normalize_slug, parse_content_date, ContentKind};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use serde_with::{serde_as, DefaultOnError, DefaultOnNull, DisplayFromStr, PickFirst};

/// Behaviour shared by every collection record
pub trait Record: DeserializeOwned + Serialize + Clone + Send + Sync + 'static {
    const KIND: ContentKind;

    fn slug(&self) -> &str;

    fn set_slug(&mut self, slug: String);

    /// Display name: `name` or `title`, whichever the kind uses
    fn label(&self) -> Option<&str>;

    fn raw_date(&self) -> Option<&str> {
        None
    }

    fn order(&self) -> f64 {
        0.0
    }

    fn is_featured(&self) -> bool {
        false
    }

    fn category(&self) -> Option<&str> {
        None
    }

    fn tags(&self) -> &[String] {
        &[]
    }

    /// Text fields consulted by free-text search
    fn search_fields(&self) -> Vec<&str>;

    fn date(&self) -> Option<DateTime<Utc>> {
        self.raw_date().and_then(parse_content_date)
    }

    /// Slug used for lookups: the resolved slug, else the normalized label.
    fn lookup_slug(&self) -> String {
        if !self.slug().is_empty() {
            return self.slug().to_string();
        }
        self.label().map(normalize_slug).unwrap_or_default()
    }
}

/// Listing state of a horse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HorseStatus {
    Available,
    Pending,
    Sold,
    Leased,
}

impl std::fmt::Display for HorseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            HorseStatus::Available => "Available",
            HorseStatus::Pending => "Pending",
            HorseStatus::Sold => "Sold",
            HorseStatus::Leased => "Leased",
        };
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for HorseStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "available" => Ok(HorseStatus::Available),
            "pending" => Ok(HorseStatus::Pending),
            "sold" => Ok(HorseStatus::Sold),
            "leased" => Ok(HorseStatus::Leased),
            _ => Err(anyhow::anyhow!("Invalid horse status: {}", s)),
        }
    }
}

/// Whether a horse is offered for sale, lease, or either
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListingType {
    Sale,
    Lease,
    Both,
}

impl std::fmt::Display for ListingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ListingType::Sale => "Sale",
            ListingType::Lease => "Lease",
            ListingType::Both => "Both",
        };
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for ListingType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sale" => Ok(ListingType::Sale),
            "lease" => Ok(ListingType::Lease),
            "both" => Ok(ListingType::Both),
            _ => Err(anyhow::anyhow!("Invalid listing type: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BasicInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breed: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Age and height stay untyped: the CMS writes numbers or strings.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Performance {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discipline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pricing {
    #[serde_as(as = "DefaultOnError<Option<PickFirst<(_, DisplayFromStr)>>>")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sale_price: Option<f64>,
    #[serde_as(as = "DefaultOnError<Option<PickFirst<(_, DisplayFromStr)>>>")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lease_price: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A horse listed for sale or lease
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Horse {
    #[serde(default)]
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<HorseStatus>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub listing_type: Option<ListingType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub basic_info: Option<BasicInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performance: Option<Performance>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pricing: Option<Pricing>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Horse {
    pub fn breed(&self) -> Option<&str> {
        self.basic_info.as_ref()?.breed.as_deref()
    }

    pub fn discipline(&self) -> Option<&str> {
        self.performance.as_ref()?.discipline.as_deref()
    }

    pub fn level(&self) -> Option<&str> {
        self.performance.as_ref()?.level.as_deref()
    }

    /// Price used for range filtering: sale price, else lease price, else 0.
    /// A zero price counts as unset.
    pub fn effective_price(&self) -> f64 {
        let Some(pricing) = &self.pricing else {
            return 0.0;
        };
        pricing
            .sale_price
            .filter(|p| *p != 0.0)
            .or(pricing.lease_price.filter(|p| *p != 0.0))
            .unwrap_or(0.0)
    }
}

impl Record for Horse {
    const KIND: ContentKind = ContentKind::Horse;

    fn slug(&self) -> &str {
        &self.slug
    }

    fn set_slug(&mut self, slug: String) {
        self.slug = slug;
    }

    fn label(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn raw_date(&self) -> Option<&str> {
        self.date.as_deref()
    }

    fn is_featured(&self) -> bool {
        self.featured.unwrap_or(false)
    }

    fn category(&self) -> Option<&str> {
        self.discipline()
    }

    fn search_fields(&self) -> Vec<&str> {
        [
            self.name.as_deref(),
            self.breed(),
            self.excerpt.as_deref(),
            self.body.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

/// One price tier of a service
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PricingOption {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde_as(as = "DefaultOnError<Option<PickFirst<(_, DisplayFromStr)>>>")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_unit: Option<String>,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub popular: Option<bool>,
}

/// A boarding, training or lesson service
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Service {
    #[serde(default)]
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_category: Option<String>,
    #[serde_as(as = "DefaultOnError<Option<PickFirst<(_, DisplayFromStr)>>>")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pricing_options: Vec<PricingOption>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Record for Service {
    const KIND: ContentKind = ContentKind::Service;

    fn slug(&self) -> &str {
        &self.slug
    }

    fn set_slug(&mut self, slug: String) {
        self.slug = slug;
    }

    fn label(&self) -> Option<&str> {
        self.title.as_deref()
    }

    fn order(&self) -> f64 {
        self.order.unwrap_or(0.0)
    }

    fn is_featured(&self) -> bool {
        self.featured.unwrap_or(false)
    }

    fn category(&self) -> Option<&str> {
        self.service_category.as_deref()
    }

    fn search_fields(&self) -> Vec<&str> {
        [self.title.as_deref(), self.body.as_deref(), self.excerpt.as_deref()]
            .into_iter()
            .flatten()
            .collect()
    }
}

/// A member of staff
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    #[serde(default)]
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde_as(as = "DefaultOnError<Option<PickFirst<(_, DisplayFromStr)>>>")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Record for TeamMember {
    const KIND: ContentKind = ContentKind::Team;

    fn slug(&self) -> &str {
        &self.slug
    }

    fn set_slug(&mut self, slug: String) {
        self.slug = slug;
    }

    fn label(&self) -> Option<&str> {
        self.name.as_deref().or(self.title.as_deref())
    }

    fn order(&self) -> f64 {
        self.order.unwrap_or(0.0)
    }

    fn is_featured(&self) -> bool {
        self.featured.unwrap_or(false)
    }

    fn category(&self) -> Option<&str> {
        self.role.as_deref()
    }

    fn search_fields(&self) -> Vec<&str> {
        [self.name.as_deref(), self.role.as_deref(), self.body.as_deref()]
            .into_iter()
            .flatten()
            .collect()
    }
}

/// A barn, arena or paddock
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Facility {
    #[serde(default)]
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facility_type: Option<String>,
    #[serde_as(as = "DefaultOnError<Option<PickFirst<(_, DisplayFromStr)>>>")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Record for Facility {
    const KIND: ContentKind = ContentKind::Facility;

    fn slug(&self) -> &str {
        &self.slug
    }

    fn set_slug(&mut self, slug: String) {
        self.slug = slug;
    }

    fn label(&self) -> Option<&str> {
        self.title.as_deref()
    }

    fn order(&self) -> f64 {
        self.order.unwrap_or(0.0)
    }

    fn is_featured(&self) -> bool {
        self.featured.unwrap_or(false)
    }

    fn category(&self) -> Option<&str> {
        self.facility_type.as_deref()
    }

    fn search_fields(&self) -> Vec<&str> {
        [self.title.as_deref(), self.body.as_deref(), self.excerpt.as_deref()]
            .into_iter()
            .flatten()
            .collect()
    }
}

/// A blog post or news item
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlogPost {
    #[serde(default)]
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Record for BlogPost {
    const KIND: ContentKind = ContentKind::Blog;

    fn slug(&self) -> &str {
        &self.slug
    }

    fn set_slug(&mut self, slug: String) {
        self.slug = slug;
    }

    fn label(&self) -> Option<&str> {
        self.title.as_deref()
    }

    fn raw_date(&self) -> Option<&str> {
        self.date.as_deref()
    }

    fn is_featured(&self) -> bool {
        self.featured.unwrap_or(false)
    }

    fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn search_fields(&self) -> Vec<&str> {
        [self.title.as_deref(), self.body.as_deref(), self.excerpt.as_deref()]
            .into_iter()
            .flatten()
            .collect()
    }
}

/// A client testimonial
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Testimonial {
    #[serde(default)]
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Record for Testimonial {
    const KIND: ContentKind = ContentKind::Testimonial;

    fn slug(&self) -> &str {
        &self.slug
    }

    fn set_slug(&mut self, slug: String) {
        self.slug = slug;
    }

    fn label(&self) -> Option<&str> {
        self.name.as_deref().or(self.title.as_deref())
    }

    fn raw_date(&self) -> Option<&str> {
        self.date.as_deref()
    }

    fn is_featured(&self) -> bool {
        self.featured.unwrap_or(false)
    }

    fn search_fields(&self) -> Vec<&str> {
        [self.name.as_deref(), self.title.as_deref(), self.body.as_deref()]
            .into_iter()
            .flatten()
            .collect()
    }
}
