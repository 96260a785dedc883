use super::filter::{apply_filters, FilterUpdate, HorseFilters};
use super::records::Horse;
use super::store::{ContentStore, LoadState};
use super::types::ContentKind;
use super::ServiceError;
use std::sync::Arc;

/// Horse listing view: the shared store plus this listing's filter state
pub struct HorseListing {
    store: Arc<ContentStore>,
    filters: HorseFilters,
}

impl HorseListing {
    pub fn new(store: Arc<ContentStore>) -> Self {
        Self {
            store,
            filters: HorseFilters::default(),
        }
    }

    /// Reload horses into the shared store
    pub async fn load(&self) -> Result<(), ServiceError> {
        self.store.load_content(ContentKind::Horse).await
    }

    pub fn filters(&self) -> &HorseFilters {
        &self.filters
    }

    pub fn update_filters(&mut self, update: FilterUpdate) {
        self.filters.merge(update);
        tracing::debug!(filters = ?self.filters, "horse filters updated");
    }

    pub fn reset_filters(&mut self) {
        self.filters = HorseFilters::default();
    }

    /// Current horses passing every active filter, in store order
    pub fn filtered(&self) -> Vec<Horse> {
        apply_filters(&self.store.horses(), &self.filters)
    }

    pub fn available(&self) -> Vec<Horse> {
        self.store.available_horses()
    }

    pub fn featured(&self) -> Vec<Horse> {
        self.store.featured_horses()
    }

    pub fn by_slug(&self, slug: &str) -> Option<Horse> {
        self.store.horse_by_slug(slug)
    }

    pub fn is_loading(&self) -> bool {
        self.store.state(ContentKind::Horse) == LoadState::Loading
    }

    pub fn error(&self) -> Option<String> {
        match self.store.state(ContentKind::Horse) {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::InMemorySource;

    async fn listing(source: InMemorySource) -> HorseListing {
        let listing = HorseListing::new(Arc::new(ContentStore::new(Arc::new(source))));
        listing.load().await.unwrap();
        listing
    }

    fn herd() -> InMemorySource {
        InMemorySource::new()
            .with_json(
                ContentKind::Horse,
                "star",
                r#"{"name": "Midnight Star", "status": "Available", "type": "Sale", "date": "2024-05-01",
                   "performance": {"discipline": "Hunter"}, "pricing": {"sale_price": 45000}}"#,
            )
            .with_json(
                ContentKind::Horse,
                "dusty",
                r#"{"name": "Dusty Road", "status": "Available", "type": "Lease", "date": "2024-04-01",
                   "performance": {"discipline": "Jumper"}, "pricing": {"lease_price": 800}, "featured": true}"#,
            )
            .with_json(
                ContentKind::Horse,
                "pip",
                r#"{"name": "Pip", "status": "Sold", "type": "Sale", "date": "2024-03-01"}"#,
            )
    }

    fn slugs(horses: &[Horse]) -> Vec<&str> {
        horses.iter().map(|h| h.slug.as_str()).collect()
    }

    #[tokio::test]
    async fn unfiltered_listing_shows_everything() {
        let listing = listing(herd()).await;
        assert!(listing.filters().is_empty());
        assert_eq!(slugs(&listing.filtered()), vec!["star", "dusty", "pip"]);
    }

    #[tokio::test]
    async fn updates_accumulate_and_reset_clears() {
        let mut listing = listing(herd()).await;

        listing.update_filters(FilterUpdate {
            status: Some("Available".into()),
            ..Default::default()
        });
        assert_eq!(slugs(&listing.filtered()), vec!["star", "dusty"]);

        listing.update_filters(FilterUpdate {
            max_price: Some("1000".into()),
            ..Default::default()
        });
        assert_eq!(slugs(&listing.filtered()), vec!["dusty"]);

        listing.reset_filters();
        assert_eq!(listing.filtered().len(), 3);
    }

    #[tokio::test]
    async fn views_delegate_to_store() {
        let listing = listing(herd()).await;
        assert_eq!(slugs(&listing.available()), vec!["star", "dusty"]);
        assert_eq!(slugs(&listing.featured()), vec!["dusty"]);
        assert_eq!(listing.by_slug("pip").unwrap().name.as_deref(), Some("Pip"));
        assert!(!listing.is_loading());
        assert!(listing.error().is_none());
    }

    #[tokio::test]
    async fn load_failure_surfaces_as_error() {
        let listing = HorseListing::new(Arc::new(ContentStore::new(Arc::new(
            InMemorySource::new().failing(ContentKind::Horse),
        ))));

        assert!(listing.load().await.is_err());
        assert!(listing.error().is_some());
        assert!(listing.filtered().is_empty());
    }
}
