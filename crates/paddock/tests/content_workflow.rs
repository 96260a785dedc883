use paddock::services::{
    apply_filters, validate, ConfigService, ContentKind, ContentStore, FilterUpdate, HorseFilters,
    HorseListing, LoadState, ServiceError, TeamMember,
};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

/// A project laid out with the default `src/content` root
fn project() -> TempDir {
    let dir = TempDir::new().unwrap();
    let content = dir.path().join("src/content");

    write(
        &content,
        "horses/midnight-star.json",
        r#"{
            "name": "Midnight Star", "status": "Available", "type": "Sale", "date": "2024-05-01",
            "featured": true,
            "basic_info": {"age": 9, "height": "16.2hh", "gender": "Mare", "breed": "Hanoverian", "color": "Bay"},
            "performance": {"discipline": "Hunter", "level": "Intermediate"},
            "pricing": {"sale_price": 45000}
        }"#,
    );
    write(
        &content,
        "horses/dusty.yaml",
        "name: Dusty Road\nstatus: Available\ntype: Both\ndate: 2024-06-01\npricing:\n  lease_price: 900\n",
    );
    write(&content, "horses/broken.json", r#"{"name": "Broken", "#);
    write(&content, "horses/notes.txt", "not content");

    write(&content, "team/b-alex.json", r#"{"name": "Alex", "order": 1}"#);
    write(&content, "team/a-sam.json", r#"{"name": "Sam", "order": 1}"#);
    write(&content, "team/c-jo.json", r#"{"name": "Jo"}"#);

    write(&content, "pages/home.json", r#"{"title": "Welcome to the barn"}"#);
    write(
        &content,
        "settings/general.yml",
        "site_title: Willow Creek\ncontact:\n  email: barn@example.com\n",
    );
    dir
}

fn store(dir: &TempDir) -> Arc<ContentStore> {
    let config = ConfigService::new(dir.path()).load().unwrap();
    Arc::new(ContentStore::from_config(dir.path(), &config))
}

#[tokio::test]
async fn load_all_reads_the_content_tree() {
    let dir = project();
    let store = store(&dir);

    store.load_all().await.unwrap();

    let horses = store.horses();
    let slugs: Vec<_> = horses.iter().map(|h| h.slug.as_str()).collect();
    assert_eq!(slugs, vec!["dusty", "midnight-star"]);

    assert!(store.blog_posts().is_empty());
    assert_eq!(store.state(ContentKind::Blog), LoadState::Loaded);
    assert_eq!(store.page("home").unwrap()["title"], "Welcome to the barn");
    assert_eq!(store.site_settings().site_title, "Willow Creek");
}

#[tokio::test]
async fn equal_order_keeps_file_name_order() {
    let dir = project();
    let store = store(&dir);
    store.load_content(ContentKind::Team).await.unwrap();

    let team = store.collection::<TeamMember>();
    let names: Vec<_> = team.iter().filter_map(|m| m.name.as_deref()).collect();
    assert_eq!(names, vec!["Jo", "Sam", "Alex"]);
}

#[tokio::test]
async fn default_filters_return_the_cached_collection() {
    let dir = project();
    let store = store(&dir);
    store.load_content(ContentKind::Horse).await.unwrap();

    let horses = store.horses();
    assert_eq!(apply_filters(&horses, &HorseFilters::default()), *horses);
}

#[tokio::test]
async fn listing_filters_over_disk_content() {
    let dir = project();
    let mut listing = HorseListing::new(store(&dir));
    listing.load().await.unwrap();

    listing.update_filters(FilterUpdate {
        listing_type: Some("Lease".into()),
        ..Default::default()
    });
    let leased: Vec<_> = listing.filtered().into_iter().map(|h| h.slug).collect();
    assert_eq!(leased, vec!["dusty"]);

    listing.update_filters(FilterUpdate {
        listing_type: Some("Sale".into()),
        min_price: Some("1000".into()),
        ..Default::default()
    });
    let sale: Vec<_> = listing.filtered().into_iter().map(|h| h.slug).collect();
    assert_eq!(sale, vec!["midnight-star"]);
}

#[tokio::test]
async fn unreadable_kind_directory_fails_only_that_kind() {
    let dir = project();
    write(&dir.path().join("src/content"), "blog", "a file where a directory belongs");
    let store = store(&dir);

    let err = store.load_all().await.unwrap_err();
    assert!(matches!(err, ServiceError::LoadFailed(_)));
    assert!(matches!(store.state(ContentKind::Blog), LoadState::Failed(_)));
    assert_eq!(store.state(ContentKind::Horse), LoadState::Loaded);
    assert_eq!(store.horses().len(), 2);
}

#[tokio::test]
async fn configured_content_root_is_honoured() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "site/horses/solo.json", r#"{"name": "Solo"}"#);
    let config = ConfigService::new(dir.path());
    config.set("content.root", "site".to_string()).unwrap();

    let store = ContentStore::from_config(dir.path(), &config.load().unwrap());
    store.load_content(ContentKind::Horse).await.unwrap();
    assert!(store.horse_by_slug("solo").is_some());
}

#[test]
fn raw_documents_validate_on_disk_shape() {
    let dir = project();
    let text =
        std::fs::read_to_string(dir.path().join("src/content/horses/midnight-star.json")).unwrap();
    let record: serde_json::Value = serde_json::from_str(&text).unwrap();

    let result = validate(&record, ContentKind::Horse);
    assert!(!result.is_valid);
    assert!(result.errors.contains(&"Main photo is required".to_string()));
    assert!(result.errors.contains(&"Short description is required".to_string()));
}
