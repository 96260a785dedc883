//! Pure derived views over loaded collections.

use super::records::Record;

/// Find a record by slug (explicit slug, else normalized name/title)
pub fn find_by_slug<'a, T: Record>(records: &'a [T], slug: &str) -> Option<&'a T> {
    records.iter().find(|r| r.lookup_slug() == slug)
}

/// Featured records in collection order, optionally capped
pub fn featured<T: Record>(records: &[T], limit: Option<usize>) -> Vec<T> {
    records
        .iter()
        .filter(|r| r.is_featured())
        .take(limit.unwrap_or(usize::MAX))
        .cloned()
        .collect()
}

/// Dated records, newest first, capped at `limit`
pub fn recent<T: Record>(records: &[T], limit: usize) -> Vec<T> {
    let mut dated: Vec<_> = records
        .iter()
        .filter_map(|r| r.date().map(|d| (d, r)))
        .collect();
    dated.sort_by(|a, b| b.0.cmp(&a.0));
    dated
        .into_iter()
        .take(limit)
        .map(|(_, r)| r.clone())
        .collect()
}

/// Records in a category. `None`, empty, or `"all"` returns everything.
pub fn by_category<T: Record>(records: &[T], category: Option<&str>) -> Vec<T> {
    match category {
        Some(c) if !c.is_empty() && c != "all" => records
            .iter()
            .filter(|r| r.category() == Some(c))
            .cloned()
            .collect(),
        _ => records.to_vec(),
    }
}

/// Records carrying `tag`
pub fn by_tag<T: Record>(records: &[T], tag: &str) -> Vec<T> {
    records
        .iter()
        .filter(|r| r.tags().iter().any(|t| t == tag))
        .cloned()
        .collect()
}

/// Case-insensitive substring search over each record's search fields.
/// An empty term returns everything.
pub fn search<T: Record>(records: &[T], term: &str) -> Vec<T> {
    if term.is_empty() {
        return records.to_vec();
    }
    let term = term.to_lowercase();
    records
        .iter()
        .filter(|r| {
            r.search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(&term))
        })
        .cloned()
        .collect()
}

/// Format a price in whole units, e.g. `$45,000` for CAD.
pub fn format_price(price: Option<f64>, currency: &str) -> String {
    let Some(price) = price.filter(|p| *p != 0.0 && p.is_finite()) else {
        return "Contact for pricing".to_string();
    };

    let rounded = price.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let symbol = match currency.to_uppercase().as_str() {
        "CAD" => "$".to_string(),
        "USD" => "US$".to_string(),
        "EUR" => "€".to_string(),
        "GBP" => "£".to_string(),
        other => format!("{} ", other),
    };
    let sign = if rounded < 0 { "-" } else { "" };
    format!("{}{}{}", sign, symbol, grouped)
}
