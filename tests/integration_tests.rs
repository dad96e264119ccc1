//! Integration tests for the page enhancements
//!
//! These tests run the document-ready flow end to end: a parsed page, a
//! mocked dictionary server, and a preference file that survives between
//! "visits".

use intro_page::i18n::{HttpTranslationSource, Region};
use intro_page::page::{self, Document, Page};
use intro_page::storage::{FilePreferenceStore, PreferenceStore, REGION_KEY};
use intro_page::toggle::{ControlEvent, RegionToggle, CONTROL_ID};
use tempfile::TempDir;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

// ==================== Test Helpers ====================

const PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>自介</title></head>
<body>
<h1 id="greeting" data-i18n="greeting">Hi</h1>
<p id="call-me" data-i18n="callMe">call me</p>
<p id="custom" data-i18n="notTranslated">stays</p>
<footer id="updated" data-date="2025-10-03">2025-10-03</footer>
<footer id="bad-date" data-date="someday">someday</footer>
</body>
</html>"#;

async fn mount_dictionaries(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/components/i18n-zh-sg.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "greeting": "Hi，初次见面～",
            "callMe": "你可以叫我"
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/components/i18n-zh-my.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "greeting": "Hai，初次见面啦～",
            "callMe": "你可以叫我啦"
        })))
        .mount(server)
        .await;
}

fn text_of(page: &Page, id: &str) -> String {
    page.text(page.element_by_id(id).expect("element exists"))
}

// ==================== Document Ready Tests ====================

#[tokio::test]
async fn test_document_ready_first_visit() {
    let server = MockServer::start().await;
    mount_dictionaries(&server).await;
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let store = FilePreferenceStore::new(temp_dir.path().join("prefs.json"));

    let mut document = Page::parse(PAGE).expect("Page should parse");
    let mut toggle = RegionToggle::from_saved(store, HttpTranslationSource::new(server.uri()));

    page::on_document_ready(&mut document, &mut toggle).await;

    assert_eq!(toggle.region(), Region::SG);
    assert_eq!(text_of(&document, "greeting"), "Hi，初次见面～");
    assert_eq!(text_of(&document, "call-me"), "你可以叫我");
    assert_eq!(text_of(&document, "custom"), "stays");
    assert_eq!(text_of(&document, "updated"), "✨ 3 Oct 2025 | 更新记录 ✨");
    assert_eq!(text_of(&document, "bad-date"), "someday");
    assert_eq!(document.title(), "自介 (华文，新加坡)");
    assert!(document.element_by_id(CONTROL_ID).is_some());
}

#[tokio::test]
async fn test_region_choice_survives_next_visit() {
    let server = MockServer::start().await;
    mount_dictionaries(&server).await;
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let prefs = temp_dir.path().join("prefs.json");

    // First visit: switch to Malaysia
    {
        let mut document = Page::parse(PAGE).unwrap();
        let mut toggle = RegionToggle::from_saved(
            FilePreferenceStore::new(&prefs),
            HttpTranslationSource::new(server.uri()),
        );
        page::on_document_ready(&mut document, &mut toggle).await;
        assert!(toggle.handle_event(&mut document, &ControlEvent::Click).await);
        assert_eq!(text_of(&document, "greeting"), "Hai，初次见面啦～");
    }

    // Second visit starts in Malaysia
    let mut document = Page::parse(PAGE).unwrap();
    let mut toggle = RegionToggle::from_saved(
        FilePreferenceStore::new(&prefs),
        HttpTranslationSource::new(server.uri()),
    );
    page::on_document_ready(&mut document, &mut toggle).await;

    assert_eq!(toggle.region(), Region::MY);
    assert_eq!(text_of(&document, "call-me"), "你可以叫我啦");
    assert_eq!(document.title(), "自介 (华文，马来西亚)");

    let button = toggle.control().unwrap();
    assert_eq!(document.attribute(button, "aria-checked").as_deref(), Some("false"));
}

#[tokio::test]
async fn test_double_toggle_round_trip() {
    let server = MockServer::start().await;
    mount_dictionaries(&server).await;
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let store = FilePreferenceStore::new(temp_dir.path().join("prefs.json"));

    let mut document = Page::parse(PAGE).unwrap();
    let mut toggle = RegionToggle::from_saved(store.clone(), HttpTranslationSource::new(server.uri()));
    page::on_document_ready(&mut document, &mut toggle).await;
    let before = document.render();

    toggle.handle_event(&mut document, &ControlEvent::KeyDown("Enter".into())).await;
    toggle.handle_event(&mut document, &ControlEvent::KeyDown(" ".into())).await;

    assert_eq!(toggle.region(), Region::SG);
    assert_eq!(store.get(REGION_KEY).unwrap(), Some("SG".to_string()));
    assert_eq!(document.render(), before);
}

// ==================== Failure Tests ====================

#[tokio::test]
async fn test_server_error_falls_back() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let store = FilePreferenceStore::new(temp_dir.path().join("prefs.json"));

    let mut document = Page::parse(PAGE).unwrap();
    let mut toggle = RegionToggle::from_saved(store, HttpTranslationSource::new(server.uri()));
    page::on_document_ready(&mut document, &mut toggle).await;

    assert_eq!(text_of(&document, "greeting"), "Hi，初次见面～ (◕‿◕✿)");
    assert_eq!(text_of(&document, "custom"), "stays");
    assert_eq!(text_of(&document, "updated"), "✨ 3 Oct 2025 | 更新记录 ✨");
}

#[tokio::test]
async fn test_unreachable_server_and_corrupt_preferences() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let prefs = temp_dir.path().join("prefs.json");
    std::fs::write(&prefs, "{broken").unwrap();

    let mut document = Page::parse(PAGE).unwrap();
    // Nothing listens on port 9 (discard)
    let mut toggle = RegionToggle::from_saved(
        FilePreferenceStore::new(&prefs),
        HttpTranslationSource::new("http://127.0.0.1:9"),
    );
    page::on_document_ready(&mut document, &mut toggle).await;
    toggle.toggle_region(&mut document).await;

    // The corrupt file only costs the saved choice; the page still renders
    assert_eq!(toggle.region(), Region::MY);
    assert_eq!(text_of(&document, "call-me"), "你可以叫我");
    assert_eq!(document.title(), "自介 (华文，马来西亚)");

    // The toggle rewrote the preference file, so the next visit starts in MY
    let store = FilePreferenceStore::new(&prefs);
    assert_eq!(store.get(REGION_KEY).unwrap(), Some("MY".to_string()));
}
