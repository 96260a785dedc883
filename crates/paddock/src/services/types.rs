use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Content kind enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Horse,
    Service,
    Team,
    Blog,
    Facility,
    Testimonial,
    Page,
    Setting,
}

impl ContentKind {
    /// Every kind, in the order an "all" load fans out.
    pub const ALL: [ContentKind; 8] = [
        ContentKind::Horse,
        ContentKind::Service,
        ContentKind::Team,
        ContentKind::Blog,
        ContentKind::Facility,
        ContentKind::Testimonial,
        ContentKind::Page,
        ContentKind::Setting,
    ];

    /// Directory under the content root holding this kind's entries
    pub fn dir_name(&self) -> &'static str {
        match self {
            ContentKind::Horse => "horses",
            ContentKind::Service => "services",
            ContentKind::Team => "team",
            ContentKind::Blog => "blog",
            ContentKind::Facility => "facilities",
            ContentKind::Testimonial => "testimonials",
            ContentKind::Page => "pages",
            ContentKind::Setting => "settings",
        }
    }

    /// Ordering applied by the loader to this kind's collection
    pub fn sort_policy(&self) -> SortPolicy {
        match self {
            ContentKind::Horse | ContentKind::Blog | ContentKind::Testimonial => {
                SortPolicy::NewestFirst
            },
            ContentKind::Service | ContentKind::Team | ContentKind::Facility => {
                SortPolicy::ExplicitOrder
            },
            ContentKind::Page | ContentKind::Setting => SortPolicy::Unsorted,
        }
    }

    /// Pages and settings are fetched by name rather than scanned.
    pub fn is_collection(&self) -> bool {
        !matches!(self, ContentKind::Page | ContentKind::Setting)
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ContentKind::Horse => "horse",
            ContentKind::Service => "service",
            ContentKind::Team => "team",
            ContentKind::Blog => "blog",
            ContentKind::Facility => "facility",
            ContentKind::Testimonial => "testimonial",
            ContentKind::Page => "page",
            ContentKind::Setting => "setting",
        };
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for ContentKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "horse" | "horses" => Ok(ContentKind::Horse),
            "service" | "services" => Ok(ContentKind::Service),
            "team" | "team-member" | "team_member" => Ok(ContentKind::Team),
            "blog" | "post" | "posts" => Ok(ContentKind::Blog),
            "facility" | "facilities" => Ok(ContentKind::Facility),
            "testimonial" | "testimonials" => Ok(ContentKind::Testimonial),
            "page" | "pages" => Ok(ContentKind::Page),
            "setting" | "settings" => Ok(ContentKind::Setting),
            _ => Err(anyhow::anyhow!("Invalid content kind: {}", s)),
        }
    }
}

/// How a collection is ordered after loading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortPolicy {
    /// `date` descending; undated records last
    NewestFirst,
    /// `order` ascending (default 0), stable on scan order
    ExplicitOrder,
    Unsorted,
}

/// Content file format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentFormat {
    Json,
    Yaml,
}

impl ContentFormat {
    /// Detect the format from a file extension, if it is one we read
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        ext.parse().ok()
    }

    /// Parse entry text in this format
    pub fn parse<T: DeserializeOwned>(&self, text: &str) -> anyhow::Result<T> {
        match self {
            ContentFormat::Json => Ok(serde_json::from_str(text)?),
            ContentFormat::Yaml => Ok(serde_yaml::from_str(text)?),
        }
    }

    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            ContentFormat::Json => &["json"],
            ContentFormat::Yaml => &["yaml", "yml"],
        }
    }
}

impl std::fmt::Display for ContentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ContentFormat::Json => "json",
            ContentFormat::Yaml => "yaml",
        };
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for ContentFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ContentFormat::Json),
            "yaml" | "yml" => Ok(ContentFormat::Yaml),
            _ => Err(anyhow::anyhow!("Invalid content format: {}", s)),
        }
    }
}

/// Normalize a display name into a slug: lowercase, whitespace runs become `-`.
pub fn normalize_slug(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

/// Parse the date formats the CMS writes (RFC 3339, naive datetime, plain date).
pub fn parse_content_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Content location and the named documents to fetch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Content root, relative to the project root unless absolute
    pub root: String,
    /// Page documents loaded by a `page` load
    pub pages: Vec<String>,
    /// Setting documents loaded by a `setting` load
    pub settings: Vec<String>,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            root: "src/content".to_string(),
            pages: vec!["home".to_string(), "about".to_string(), "contact".to_string()],
            settings: vec!["general".to_string(), "seo".to_string()],
        }
    }
}

/// Presentation defaults for derived views
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub featured_limit: usize,
    pub recent_limit: usize,
    pub currency: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            featured_limit: 3,
            recent_limit: 3,
            currency: "CAD".to_string(),
        }
    }
}

/// Project configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub content: ContentConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    mod content_kind {
        use super::*;

        #[test]
        fn serializes_lowercase() {
            let json = serde_json::to_string(&ContentKind::Testimonial).unwrap();
            assert_eq!(json, "\"testimonial\"");
        }

        #[test]
        fn from_str_accepts_directory_names() {
            for kind in ContentKind::ALL {
                assert_eq!(kind.dir_name().parse::<ContentKind>().unwrap(), kind);
                assert_eq!(kind.to_string().parse::<ContentKind>().unwrap(), kind);
            }
        }

        #[test]
        fn from_str_case_insensitive() {
            assert_eq!("Horses".parse::<ContentKind>().unwrap(), ContentKind::Horse);
            assert_eq!("BLOG".parse::<ContentKind>().unwrap(), ContentKind::Blog);
        }

        #[test]
        fn from_str_invalid_returns_error() {
            assert!("stallions".parse::<ContentKind>().is_err());
        }

        #[test]
        fn sort_policies_follow_kind() {
            assert_eq!(ContentKind::Horse.sort_policy(), SortPolicy::NewestFirst);
            assert_eq!(ContentKind::Blog.sort_policy(), SortPolicy::NewestFirst);
            assert_eq!(ContentKind::Testimonial.sort_policy(), SortPolicy::NewestFirst);
            assert_eq!(ContentKind::Service.sort_policy(), SortPolicy::ExplicitOrder);
            assert_eq!(ContentKind::Team.sort_policy(), SortPolicy::ExplicitOrder);
            assert_eq!(ContentKind::Facility.sort_policy(), SortPolicy::ExplicitOrder);
            assert_eq!(ContentKind::Page.sort_policy(), SortPolicy::Unsorted);
        }

        #[test]
        fn pages_and_settings_are_not_collections() {
            assert!(!ContentKind::Page.is_collection());
            assert!(!ContentKind::Setting.is_collection());
            assert!(ContentKind::Horse.is_collection());
        }
    }

    mod content_format {
        use super::*;

        #[test]
        fn detects_from_extension() {
            assert_eq!(
                ContentFormat::from_path(Path::new("horses/star.json")),
                Some(ContentFormat::Json)
            );
            assert_eq!(
                ContentFormat::from_path(Path::new("horses/star.yml")),
                Some(ContentFormat::Yaml)
            );
            assert_eq!(ContentFormat::from_path(Path::new("horses/star.md")), None);
            assert_eq!(ContentFormat::from_path(Path::new("horses/README")), None);
        }

        #[test]
        fn parses_yaml_and_json_alike() {
            let from_json: serde_json::Value =
                ContentFormat::Json.parse(r#"{"name": "Star"}"#).unwrap();
            let from_yaml: serde_json::Value = ContentFormat::Yaml.parse("name: Star\n").unwrap();
            assert_eq!(from_json, from_yaml);
        }
    }

    mod slugs {
        use super::*;

        #[test]
        fn lowercases_and_hyphenates() {
            assert_eq!(normalize_slug("Midnight Star"), "midnight-star");
            assert_eq!(normalize_slug("Hunter  Jumper\tLessons"), "hunter-jumper-lessons");
        }

        #[test]
        fn keeps_punctuation() {
            assert_eq!(normalize_slug("Mr. Ed"), "mr.-ed");
        }
    }

    mod dates {
        use super::*;

        #[test]
        fn parses_rfc3339() {
            let dt = parse_content_date("2024-03-15T10:30:00.000Z").unwrap();
            assert_eq!((dt.year(), dt.month(), dt.day()), (2024, 3, 15));
            assert_eq!(dt.hour(), 10);
        }

        #[test]
        fn parses_plain_date_at_midnight() {
            let dt = parse_content_date("2024-03-15").unwrap();
            assert_eq!((dt.year(), dt.month(), dt.day()), (2024, 3, 15));
            assert_eq!(dt.hour(), 0);
        }

        #[test]
        fn parses_naive_datetime() {
            assert!(parse_content_date("2024-03-15T10:30").is_some());
            assert!(parse_content_date("2024-03-15 10:30:00").is_some());
        }

        #[test]
        fn rejects_garbage() {
            assert!(parse_content_date("").is_none());
            assert!(parse_content_date("next tuesday").is_none());
        }
    }

    mod config {
        use super::*;

        #[test]
        fn default_content_root() {
            let config = ProjectConfig::default();
            assert_eq!(config.content.root, "src/content");
            assert_eq!(config.content.pages, vec!["home", "about", "contact"]);
            assert_eq!(config.content.settings, vec!["general", "seo"]);
            assert_eq!(config.display.featured_limit, 3);
            assert_eq!(config.display.currency, "CAD");
        }
    }
}
