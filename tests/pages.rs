mod common;

use axum::http::StatusCode;
use common::TestHarness;
use tinywiki::{Page, Title};

#[tokio::test]
async fn save_then_view_shows_body() {
    let harness = TestHarness::new();

    let resp = harness.post_form("/save/Hello", "body=world").await;
    assert_eq!(resp.status, StatusCode::FOUND);
    assert_eq!(resp.location(), Some("/view/Hello"));

    let resp = harness.get("/view/Hello").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("<pre>world</pre>"));
    assert!(resp.body.contains("<h1>Hello</h1>"));
}

#[tokio::test]
async fn view_missing_page_redirects_to_edit() {
    let harness = TestHarness::new();

    let resp = harness.get("/view/Missing").await;
    assert_eq!(resp.status, StatusCode::FOUND);
    assert_eq!(resp.location(), Some("/edit/Missing"));
}

#[tokio::test]
async fn edit_missing_page_renders_empty_form() {
    let harness = TestHarness::new();

    let resp = harness.get("/edit/Fresh").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("action=\"/save/Fresh\""));
    assert!(resp.body.contains("cols=\"80\"></textarea>"));
}

#[tokio::test]
async fn edit_existing_page_prefills_escaped_body() {
    let harness = TestHarness::new();
    let title = Title::parse("Draft").unwrap();
    harness.state.pages.save(&Page::new(title, "<script>x</script>")).unwrap();

    let resp = harness.get("/edit/Draft").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("&lt;script&gt;x&lt;/script&gt;"));
    assert!(!resp.body.contains("<script>"));
}

#[tokio::test]
async fn second_save_overwrites_first() {
    let harness = TestHarness::new();

    harness.post_form("/save/Note", "body=first+version").await;
    harness.post_form("/save/Note", "body=second").await;

    let resp = harness.get("/view/Note").await;
    assert!(resp.body.contains("<pre>second</pre>"));
    assert!(!resp.body.contains("first version"));
}

#[tokio::test]
async fn save_without_body_field_stores_empty_page() {
    let harness = TestHarness::new();

    let resp = harness.post_form("/save/Blank", "other=1").await;
    assert_eq!(resp.status, StatusCode::FOUND);

    let page = harness.state.pages.load(&Title::parse("Blank").unwrap()).unwrap();
    assert!(page.body.is_empty());
}

#[tokio::test]
async fn save_decodes_form_encoding() {
    let harness = TestHarness::new();

    harness.post_form("/save/Enc", "body=a%26b+c%0Ad").await;
    let page = harness.state.pages.load(&Title::parse("Enc").unwrap()).unwrap();
    assert_eq!(page.body, b"a&b c\nd");
}

#[tokio::test]
async fn index_lists_each_saved_title_once() {
    let harness = TestHarness::new();

    for title in ["Beta", "Alpha", "Beta"] {
        harness.post_form(&format!("/save/{title}"), "body=x").await;
    }

    for uri in ["/", "/index/Anything"] {
        let resp = harness.get(uri).await;
        assert_eq!(resp.status, StatusCode::OK);
        assert_eq!(resp.body.matches("href=\"/view/Alpha\"").count(), 1);
        assert_eq!(resp.body.matches("href=\"/view/Beta\"").count(), 1);
        assert_eq!(resp.body.matches("<li>").count(), 2);
    }
}

#[tokio::test]
async fn index_of_empty_wiki_has_no_entries() {
    let harness = TestHarness::new();

    let resp = harness.get("/").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(!resp.body.contains("<li>"));
}

#[tokio::test]
async fn missing_template_is_internal_error() {
    let templates = tempfile::tempdir().unwrap();
    let harness = TestHarness::with_templates(templates.path().to_path_buf());
    harness.post_form("/save/Hello", "body=world").await;

    let resp = harness.get("/view/Hello").await;
    assert_eq!(resp.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(resp.body.contains("view.html"));
}

#[tokio::test]
async fn save_failure_is_internal_error() {
    let harness = TestHarness::new();
    // A directory squatting on the page's file name makes the write fail
    std::fs::create_dir(harness.pages_dir.path().join("Blocked.txt")).unwrap();

    let resp = harness.post_form("/save/Blocked", "body=x").await;
    assert_eq!(resp.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(resp.body.starts_with("I/O error"));
}

#[tokio::test]
async fn save_keeps_non_utf8_bytes() {
    let harness = TestHarness::new();

    let resp = harness.post_form("/save/Bin", "body=%FFab").await;
    assert_eq!(resp.status, StatusCode::FOUND);
    assert_eq!(harness.stored_body("Bin"), vec![0xff, b'a', b'b']);
    assert_eq!(
        std::fs::read(harness.pages_dir.path().join("Bin.txt")).unwrap(),
        vec![0xff, b'a', b'b']
    );
}

#[tokio::test]
async fn save_accepts_multipart_form() {
    let harness = TestHarness::new();
    let body = concat!(
        "--XYZ\r\n",
        "Content-Disposition: form-data; name=\"other\"\r\n\r\n",
        "skip\r\n",
        "--XYZ\r\n",
        "Content-Disposition: form-data; name=\"body\"\r\n\r\n",
        "from multipart\r\n",
        "--XYZ--\r\n",
    );

    let resp = harness
        .post_raw("/save/Multi", Some("multipart/form-data; boundary=XYZ"), body.as_bytes().to_vec())
        .await;
    assert_eq!(resp.status, StatusCode::FOUND);
    assert_eq!(harness.stored_body("Multi"), b"from multipart");
}

#[tokio::test]
async fn save_falls_back_to_query_string() {
    let harness = TestHarness::new();

    let resp = harness.post_raw("/save/Query?body=from+query", None, Vec::new()).await;
    assert_eq!(resp.status, StatusCode::FOUND);
    assert_eq!(harness.stored_body("Query"), b"from query");

    harness.post_form("/save/Both?body=query", "body=form").await;
    assert_eq!(harness.stored_body("Both"), b"form");
}
