use super::loader::{sort_records, ContentLoader};
use super::records::{
    BlogPost, Facility, Horse, HorseStatus, Record, Service, TeamMember, Testimonial,
};
use super::settings::SiteSettings;
use super::types::{ContentConfig, ContentKind, ProjectConfig, SortPolicy};
use super::views;
use super::ServiceError;
use crate::source::{ContentSource, FsSource};
use anyhow::Result;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

/// Lifecycle of one content kind inside the store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Uninitialized,
    Loading,
    Loaded,
    Failed(String),
}

/// One kind's data. Readers clone the `Arc`; a reload swaps it whole.
struct Slot<C> {
    data: RwLock<Arc<C>>,
}

impl<C: Default> Default for Slot<C> {
    fn default() -> Self {
        Self {
            data: RwLock::new(Arc::new(C::default())),
        }
    }
}

impl<C> Slot<C> {
    fn snapshot(&self) -> Arc<C> {
        self.data
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn replace(&self, value: C) {
        *self.data.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(value);
    }
}

type Documents = BTreeMap<String, Value>;

/// Cache of loaded content, one slot per kind.
///
/// Share it behind an `Arc`. Each kind is written only by its own load and a
/// failed load leaves the previous collection in place.
pub struct ContentStore {
    loader: ContentLoader,
    page_names: Vec<String>,
    setting_names: Vec<String>,
    horses: Slot<Vec<Horse>>,
    services: Slot<Vec<Service>>,
    team: Slot<Vec<TeamMember>>,
    blog: Slot<Vec<BlogPost>>,
    facilities: Slot<Vec<Facility>>,
    testimonials: Slot<Vec<Testimonial>>,
    pages: Slot<Documents>,
    settings: Slot<Documents>,
    states: RwLock<HashMap<ContentKind, LoadState>>,
}

impl ContentStore {
    /// Create an empty store over a source, using the default page and settings names
    pub fn new(source: Arc<dyn ContentSource>) -> Self {
        let defaults = ContentConfig::default();
        Self {
            loader: ContentLoader::new(source),
            page_names: defaults.pages,
            setting_names: defaults.settings,
            horses: Slot::default(),
            services: Slot::default(),
            team: Slot::default(),
            blog: Slot::default(),
            facilities: Slot::default(),
            testimonials: Slot::default(),
            pages: Slot::default(),
            settings: Slot::default(),
            states: RwLock::new(HashMap::new()),
        }
    }

    /// Override which page and settings documents a load reads
    pub fn with_documents(mut self, pages: Vec<String>, settings: Vec<String>) -> Self {
        self.page_names = pages;
        self.setting_names = settings;
        self
    }

    /// Build a store reading from the configured content root under `project_root`
    pub fn from_config(project_root: &Path, config: &ProjectConfig) -> Self {
        let source = FsSource::new(project_root.join(&config.content.root));
        Self::new(Arc::new(source))
            .with_documents(config.content.pages.clone(), config.content.settings.clone())
    }

    /// Reload one kind from the source
    pub async fn load_content(&self, kind: ContentKind) -> Result<(), ServiceError> {
        self.set_state(kind, LoadState::Loading);
        tracing::debug!(kind = %kind, "loading content");

        let outcome = match kind {
            ContentKind::Horse => self.loader.load_horses().await.map(|r| self.horses.replace(r)),
            ContentKind::Service => {
                self.loader.load_services().await.map(|r| self.services.replace(r))
            },
            ContentKind::Team => {
                self.loader.load_team_members().await.map(|r| self.team.replace(r))
            },
            ContentKind::Blog => self.loader.load_blog_posts().await.map(|r| self.blog.replace(r)),
            ContentKind::Facility => {
                self.loader.load_facilities().await.map(|r| self.facilities.replace(r))
            },
            ContentKind::Testimonial => {
                self.loader.load_testimonials().await.map(|r| self.testimonials.replace(r))
            },
            ContentKind::Page => self
                .load_documents(kind, &self.page_names)
                .await
                .map(|d| self.pages.replace(d)),
            ContentKind::Setting => self
                .load_documents(kind, &self.setting_names)
                .await
                .map(|d| self.settings.replace(d)),
        };

        match outcome {
            Ok(()) => {
                self.set_state(kind, LoadState::Loaded);
                tracing::info!(kind = %kind, "content loaded");
                Ok(())
            },
            Err(e) => {
                let message = format!("{:#}", e);
                tracing::error!(kind = %kind, error = %message, "error loading content");
                self.set_state(kind, LoadState::Failed(message.clone()));
                Err(ServiceError::LoadFailed(format!("{}: {}", kind, message)))
            },
        }
    }

    /// Reload every kind concurrently. Kinds succeed or fail independently;
    /// the error lists every kind that failed.
    pub async fn load_all(&self) -> Result<(), ServiceError> {
        let results =
            futures::future::join_all(ContentKind::ALL.iter().map(|k| self.load_content(*k))).await;

        let failures: Vec<String> = results
            .into_iter()
            .filter_map(|r| match r {
                Err(ServiceError::LoadFailed(message)) => Some(message),
                Err(e) => Some(e.to_string()),
                Ok(()) => None,
            })
            .collect();

        if failures.is_empty() {
            Ok(())
        } else {
            Err(ServiceError::LoadFailed(failures.join("; ")))
        }
    }

    async fn load_documents(&self, kind: ContentKind, names: &[String]) -> Result<Documents> {
        let mut documents = Documents::new();
        for name in names {
            let document = match kind {
                ContentKind::Setting => self.loader.load_setting(name).await?,
                _ => self.loader.load_page(name).await?,
            };
            if let Some(document) = document {
                documents.insert(name.clone(), document);
            }
        }
        Ok(documents)
    }

    fn set_state(&self, kind: ContentKind, state: LoadState) {
        self.states
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(kind, state);
    }

    pub fn state(&self, kind: ContentKind) -> LoadState {
        self.states
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&kind)
            .cloned()
            .unwrap_or_default()
    }

    /// True while any kind is mid-load
    pub fn is_loading(&self) -> bool {
        self.states
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .any(|s| *s == LoadState::Loading)
    }

    /// Every kind currently in `Failed`, as `kind: message` joined by "; ".
    /// A kind drops out once it loads again.
    pub fn error(&self) -> Option<String> {
        let states = self.states.read().unwrap_or_else(PoisonError::into_inner);
        let failures: Vec<String> = ContentKind::ALL
            .iter()
            .filter_map(|kind| match states.get(kind) {
                Some(LoadState::Failed(message)) => Some(format!("{}: {}", kind, message)),
                _ => None,
            })
            .collect();

        if failures.is_empty() {
            None
        } else {
            Some(failures.join("; "))
        }
    }

    pub fn horses(&self) -> Arc<Vec<Horse>> {
        self.horses.snapshot()
    }

    pub fn services(&self) -> Arc<Vec<Service>> {
        self.services.snapshot()
    }

    pub fn team_members(&self) -> Arc<Vec<TeamMember>> {
        self.team.snapshot()
    }

    pub fn blog_posts(&self) -> Arc<Vec<BlogPost>> {
        self.blog.snapshot()
    }

    pub fn facilities(&self) -> Arc<Vec<Facility>> {
        self.facilities.snapshot()
    }

    pub fn testimonials(&self) -> Arc<Vec<Testimonial>> {
        self.testimonials.snapshot()
    }

    pub fn pages(&self) -> Arc<Documents> {
        self.pages.snapshot()
    }

    pub fn settings(&self) -> Arc<Documents> {
        self.settings.snapshot()
    }

    /// Snapshot of whichever collection holds `T`
    pub fn collection<T: Stored>(&self) -> Arc<Vec<T>> {
        T::snapshot(self)
    }

    pub fn sorted_services(&self) -> Vec<Service> {
        let mut services = self.services().to_vec();
        sort_records(&mut services, SortPolicy::ExplicitOrder);
        services
    }

    pub fn featured_services(&self) -> Vec<Service> {
        views::featured(&self.services(), None)
    }

    pub fn available_horses(&self) -> Vec<Horse> {
        self.horses()
            .iter()
            .filter(|h| h.status == Some(HorseStatus::Available))
            .cloned()
            .collect()
    }

    pub fn featured_horses(&self) -> Vec<Horse> {
        views::featured(&self.horses(), None)
    }

    pub fn featured<T: Stored>(&self, limit: Option<usize>) -> Vec<T> {
        views::featured(&self.collection::<T>(), limit)
    }

    pub fn recent<T: Stored>(&self, limit: usize) -> Vec<T> {
        views::recent(&self.collection::<T>(), limit)
    }

    pub fn by_category<T: Stored>(&self, category: Option<&str>) -> Vec<T> {
        views::by_category(&self.collection::<T>(), category)
    }

    pub fn by_tag<T: Stored>(&self, tag: &str) -> Vec<T> {
        views::by_tag(&self.collection::<T>(), tag)
    }

    pub fn search<T: Stored>(&self, term: &str) -> Vec<T> {
        views::search(&self.collection::<T>(), term)
    }

    /// Look up any stored record by slug
    pub fn find<T: Stored>(&self, slug: &str) -> Option<T> {
        views::find_by_slug(&self.collection::<T>(), slug).cloned()
    }

    pub fn horse_by_slug(&self, slug: &str) -> Option<Horse> {
        self.find(slug)
    }

    pub fn service_by_slug(&self, slug: &str) -> Option<Service> {
        self.find(slug)
    }

    pub fn facility_by_slug(&self, slug: &str) -> Option<Facility> {
        self.find(slug)
    }

    pub fn team_member_by_slug(&self, slug: &str) -> Option<TeamMember> {
        self.find(slug)
    }

    pub fn blog_post_by_slug(&self, slug: &str) -> Option<BlogPost> {
        self.find(slug)
    }

    pub fn testimonial_by_slug(&self, slug: &str) -> Option<Testimonial> {
        self.find(slug)
    }

    pub fn page(&self, name: &str) -> Option<Value> {
        self.pages().get(name).cloned()
    }

    pub fn setting(&self, name: &str) -> Option<Value> {
        self.settings().get(name).cloned()
    }

    /// Built-in site settings with the `general` settings document merged over them
    pub fn site_settings(&self) -> SiteSettings {
        let mut site = SiteSettings::default();
        if let Some(general) = self.setting("general") {
            if let Err(e) = site.merge(&general) {
                tracing::warn!(error = %e, "ignoring invalid general settings");
                return SiteSettings::default();
            }
        }
        site
    }
}

/// Record types with a collection in [`ContentStore`]
pub trait Stored: Record {
    fn snapshot(store: &ContentStore) -> Arc<Vec<Self>>;
}

impl Stored for Horse {
    fn snapshot(store: &ContentStore) -> Arc<Vec<Self>> {
        store.horses()
    }
}

impl Stored for Service {
    fn snapshot(store: &ContentStore) -> Arc<Vec<Self>> {
        store.services()
    }
}

impl Stored for TeamMember {
    fn snapshot(store: &ContentStore) -> Arc<Vec<Self>> {
        store.team_members()
    }
}

impl Stored for BlogPost {
    fn snapshot(store: &ContentStore) -> Arc<Vec<Self>> {
        store.blog_posts()
    }
}

impl Stored for Facility {
    fn snapshot(store: &ContentStore) -> Arc<Vec<Self>> {
        store.facilities()
    }
}

impl Stored for Testimonial {
    fn snapshot(store: &ContentStore) -> Arc<Vec<Self>> {
        store.testimonials()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::ContentFormat;
    use crate::source::RawEntry;
    use crate::testing::InMemorySource;

    fn seeded() -> Arc<InMemorySource> {
        Arc::new(
            InMemorySource::new()
                .with_json(
                    ContentKind::Horse,
                    "star",
                    r#"{"name": "Midnight Star", "status": "Available", "featured": true, "date": "2024-05-01"}"#,
                )
                .with_json(
                    ContentKind::Horse,
                    "pip",
                    r#"{"name": "Pip", "status": "Sold", "date": "2024-01-01"}"#,
                )
                .with_json(
                    ContentKind::Service,
                    "lessons",
                    r#"{"title": "Riding Lessons", "order": 2, "featured": true}"#,
                )
                .with_json(ContentKind::Service, "board", r#"{"title": "Full Board", "order": 1}"#)
                .with_json(ContentKind::Page, "home", r#"{"title": "Welcome"}"#)
                .with_json(
                    ContentKind::Setting,
                    "general",
                    r#"{"site_title": "Willow Creek", "contact": {"phone": "555-0100"}}"#,
                ),
        )
    }

    fn slugs<T: Record>(records: &[T]) -> Vec<&str> {
        records.iter().map(|r| r.slug()).collect()
    }

    #[tokio::test]
    async fn starts_uninitialized_and_empty() {
        let store = ContentStore::new(seeded());
        assert_eq!(store.state(ContentKind::Horse), LoadState::Uninitialized);
        assert!(store.horses().is_empty());
        assert!(!store.is_loading());
        assert!(store.error().is_none());
    }

    #[tokio::test]
    async fn load_all_populates_every_kind() {
        let store = ContentStore::new(seeded());
        store.load_all().await.unwrap();

        for kind in ContentKind::ALL {
            assert_eq!(store.state(kind), LoadState::Loaded, "{}", kind);
        }
        assert_eq!(slugs(&store.horses()), vec!["star", "pip"]);
        assert_eq!(slugs(&store.services()), vec!["board", "lessons"]);
        assert_eq!(store.page("home").unwrap()["title"], "Welcome");
        assert!(store.page("about").is_none());
    }

    #[tokio::test]
    async fn derived_views() {
        let store = ContentStore::new(seeded());
        store.load_all().await.unwrap();

        assert_eq!(slugs(&store.sorted_services()), vec!["board", "lessons"]);
        assert_eq!(slugs(&store.featured_services()), vec!["lessons"]);
        assert_eq!(slugs(&store.available_horses()), vec!["star"]);
        assert_eq!(slugs(&store.featured_horses()), vec!["star"]);
        assert_eq!(slugs(&store.recent::<Horse>(1)), vec!["star"]);
        assert_eq!(slugs(&store.search::<Service>("board")), vec!["board"]);
    }

    #[tokio::test]
    async fn lookups_by_slug() {
        let store = ContentStore::new(seeded());
        store.load_all().await.unwrap();

        assert_eq!(store.horse_by_slug("pip").unwrap().name.as_deref(), Some("Pip"));
        assert!(store.service_by_slug("board").is_some());
        assert!(store.facility_by_slug("board").is_none());
        assert!(store.blog_post_by_slug("anything").is_none());
    }

    #[tokio::test]
    async fn site_settings_merge_general_document() {
        let store = ContentStore::new(seeded());
        store.load_content(ContentKind::Setting).await.unwrap();

        let site = store.site_settings();
        assert_eq!(site.site_title, "Willow Creek");
        assert!(site.has_contact_info());
    }

    #[tokio::test]
    async fn site_settings_default_before_load() {
        let store = ContentStore::new(seeded());
        assert_eq!(store.site_settings(), SiteSettings::default());
    }

    #[tokio::test]
    async fn failed_reload_keeps_previous_collection() {
        let source = seeded();
        let store = ContentStore::new(source.clone());
        store.load_content(ContentKind::Horse).await.unwrap();

        source.set_failing(ContentKind::Horse, true);
        let err = store.load_content(ContentKind::Horse).await.unwrap_err();

        assert!(matches!(err, ServiceError::LoadFailed(_)));
        assert!(matches!(store.state(ContentKind::Horse), LoadState::Failed(_)));
        assert_eq!(store.horses().len(), 2);
        assert!(store.error().is_some());

        source.set_failing(ContentKind::Horse, false);
        store.load_content(ContentKind::Horse).await.unwrap();
        assert_eq!(store.state(ContentKind::Horse), LoadState::Loaded);
        assert!(store.error().is_none());
    }

    #[tokio::test]
    async fn error_lists_every_kind_still_failing() {
        let source = seeded();
        let store = ContentStore::new(source.clone());
        source.set_failing(ContentKind::Blog, true);
        source.set_failing(ContentKind::Horse, true);

        assert!(store.load_content(ContentKind::Blog).await.is_err());
        assert!(store.load_content(ContentKind::Horse).await.is_err());
        let error = store.error().unwrap();
        assert!(error.contains("horse: "));
        assert!(error.contains("blog: "));

        source.set_failing(ContentKind::Horse, false);
        store.load_content(ContentKind::Horse).await.unwrap();
        let error = store.error().unwrap();
        assert!(error.starts_with("blog: "));
        assert!(!error.contains("horse"));

        source.set_failing(ContentKind::Blog, false);
        store.load_content(ContentKind::Blog).await.unwrap();
        assert!(store.error().is_none());
    }

    #[tokio::test]
    async fn load_all_reports_partial_failure() {
        let source = seeded();
        source.set_failing(ContentKind::Blog, true);
        let store = ContentStore::new(source);

        let err = store.load_all().await.unwrap_err();
        assert!(err.to_string().contains("blog"));
        assert!(matches!(store.state(ContentKind::Blog), LoadState::Failed(_)));
        assert_eq!(store.state(ContentKind::Horse), LoadState::Loaded);
        assert_eq!(store.horses().len(), 2);
    }

    #[tokio::test]
    async fn reload_swaps_collection_without_touching_old_snapshots() {
        let source = seeded();
        let store = ContentStore::new(source.clone());
        store.load_content(ContentKind::Horse).await.unwrap();
        let before = store.horses();

        source.insert(
            ContentKind::Horse,
            RawEntry::new("dusty", ContentFormat::Yaml, "name: Dusty\ndate: 2024-06-01\n"),
        );
        store.load_content(ContentKind::Horse).await.unwrap();

        assert_eq!(before.len(), 2);
        assert_eq!(slugs(&store.horses()), vec!["dusty", "star", "pip"]);
    }

    #[tokio::test]
    async fn configured_document_names_are_loaded() {
        let source = Arc::new(
            InMemorySource::new()
                .with_json(ContentKind::Page, "home", r#"{"title": "Home"}"#)
                .with_json(ContentKind::Page, "events", r#"{"title": "Events"}"#),
        );
        let store = ContentStore::new(source).with_documents(vec!["events".into()], vec![]);
        store.load_content(ContentKind::Page).await.unwrap();

        assert!(store.page("events").is_some());
        assert!(store.page("home").is_none());
    }
}
