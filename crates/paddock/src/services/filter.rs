use super::records::{Horse, HorseStatus, ListingType, Record};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Current horse listing filters. `None` means "all" and never excludes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HorseFilters {
    pub status: Option<HorseStatus>,
    #[serde(rename = "type")]
    pub listing_type: Option<ListingType>,
    pub discipline: Option<String>,
    pub level: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub search: Option<String>,
}

/// Partial filter update with raw values as a UI or command line supplies them.
///
/// A field left `None` is untouched. A present value of `"all"`, an empty
/// string, or anything that does not parse resets the field to "all".
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FilterUpdate {
    pub status: Option<String>,
    #[serde(rename = "type")]
    pub listing_type: Option<String>,
    pub discipline: Option<String>,
    pub level: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub search: Option<String>,
}

impl HorseFilters {
    /// True when every field is at its "all" default
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Shallow-merge an update; the last write wins per field.
    pub fn merge(&mut self, update: FilterUpdate) {
        if let Some(raw) = update.status {
            self.status = parse_choice(&raw);
        }
        if let Some(raw) = update.listing_type {
            self.listing_type = parse_choice(&raw);
        }
        if let Some(raw) = update.discipline {
            self.discipline = parse_text(&raw, true);
        }
        if let Some(raw) = update.level {
            self.level = parse_text(&raw, true);
        }
        if let Some(raw) = update.min_price {
            self.min_price = parse_price(&raw);
        }
        if let Some(raw) = update.max_price {
            self.max_price = parse_price(&raw);
        }
        if let Some(raw) = update.search {
            self.search = parse_text(&raw, false);
        }
    }
}

fn is_sentinel(raw: &str) -> bool {
    raw.is_empty() || raw.eq_ignore_ascii_case("all")
}

fn parse_choice<T: FromStr>(raw: &str) -> Option<T> {
    let raw = raw.trim();
    if is_sentinel(raw) {
        return None;
    }
    raw.parse().ok()
}

fn parse_text(raw: &str, allow_all: bool) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || (allow_all && is_sentinel(trimmed)) {
        return None;
    }
    Some(trimmed.to_string())
}

fn parse_price(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|p| p.is_finite())
}

/// Apply filters, keeping the input order of the horses that pass.
pub fn apply_filters(horses: &[Horse], filters: &HorseFilters) -> Vec<Horse> {
    horses
        .iter()
        .filter(|horse| matches_filters(horse, filters))
        .cloned()
        .collect()
}

/// Check a horse against every active filter (AND between filters)
pub fn matches_filters(horse: &Horse, filters: &HorseFilters) -> bool {
    if let Some(status) = filters.status {
        if horse.status != Some(status) {
            return false;
        }
    }

    if let Some(wanted) = filters.listing_type {
        if !matches_listing_type(horse.listing_type, wanted) {
            return false;
        }
    }

    if let Some(discipline) = &filters.discipline {
        if horse.discipline() != Some(discipline.as_str()) {
            return false;
        }
    }

    if let Some(level) = &filters.level {
        if horse.level() != Some(level.as_str()) {
            return false;
        }
    }

    if let Some(min) = filters.min_price {
        if horse.effective_price() < min {
            return false;
        }
    }

    if let Some(max) = filters.max_price {
        if horse.effective_price() > max {
            return false;
        }
    }

    if let Some(term) = &filters.search {
        let term = term.to_lowercase();
        let found = horse
            .search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(&term));
        if !found {
            return false;
        }
    }

    true
}

/// A `Both` listing satisfies a Sale or Lease filter; a `Both` filter only
/// matches listings marked `Both`.
fn matches_listing_type(listing: Option<ListingType>, wanted: ListingType) -> bool {
    match wanted {
        ListingType::Both => listing == Some(ListingType::Both),
        _ => listing == Some(wanted) || listing == Some(ListingType::Both),
    }
}
