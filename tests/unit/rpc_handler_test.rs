//! Unit tests for the RPC handler: the JSON-RPC methods dispatched by `handle_method`.
//!
//! These go through the same code path as the `aibrowser-rpc` binary, with a
//! remote surface outbox and an in-memory JSON store.

use std::sync::Mutex;

use serde_json::json;

use aibrowser::app::App;
use aibrowser::rpc_handler::handle_method;
use aibrowser::store::JsonFileStore;
use aibrowser::surface::{CommandQueue, RemoteSurfaceFactory, SurfaceCommand};
use aibrowser::types::surface::SurfaceId;
use aibrowser::ui::projection::UiQueue;

/// Create a fresh App whose surfaces write into the returned outbox.
fn setup() -> (Mutex<App>, CommandQueue, UiQueue) {
    let outbox = CommandQueue::new();
    let ui = UiQueue::new();
    let app = App::new(
        Box::new(JsonFileStore::in_memory()),
        Box::new(RemoteSurfaceFactory::new(outbox.clone())),
        Box::new(ui.clone()),
        false,
    );
    (Mutex::new(app), outbox, ui)
}

// ─── Ping ───

#[test]
fn test_ping() {
    let (app, _, _) = setup();
    let res = handle_method(&app, "ping", &json!({})).unwrap();
    assert_eq!(res, json!({"pong": true}));
}

// ─── Unknown method ───

#[test]
fn test_unknown_method_returns_error() {
    let (app, _, _) = setup();
    let res = handle_method(&app, "nonexistent.method", &json!({}));
    assert!(res.unwrap_err().contains("unknown method"));
}

// ─── Tabs ───

#[test]
fn test_tab_create_list_switch_close() {
    let (app, _, _) = setup();

    let res = handle_method(&app, "tab.create", &json!({"url": "https://a.com"})).unwrap();
    assert_eq!(res, json!({"id": 2}));

    let list = handle_method(&app, "tab.list", &json!({})).unwrap();
    let tabs = list["tabs"].as_array().unwrap();
    assert_eq!(tabs.len(), 2);
    assert_eq!(tabs[1]["url"], "https://a.com");
    assert_eq!(list["active"], 2);

    handle_method(&app, "tab.switch", &json!({"id": 1})).unwrap();
    let list = handle_method(&app, "tab.list", &json!({})).unwrap();
    assert_eq!(list["active"], 1);

    handle_method(&app, "tab.close", &json!({"id": 1})).unwrap();
    let list = handle_method(&app, "tab.list", &json!({})).unwrap();
    assert_eq!(list["tabs"].as_array().unwrap().len(), 1);
    assert_eq!(list["active"], 2);
}

#[test]
fn test_tab_errors() {
    let (app, _, _) = setup();
    let err = handle_method(&app, "tab.switch", &json!({"id": 99})).unwrap_err();
    assert!(err.contains("Tab not found"));
    let err = handle_method(&app, "tab.close", &json!({})).unwrap_err();
    assert_eq!(err, "missing id");
}

#[test]
fn test_tab_reorder() {
    let (app, _, _) = setup();
    handle_method(&app, "tab.create", &json!({})).unwrap();
    let res = handle_method(&app, "tab.reorder", &json!({"dragged": 2, "target": 1})).unwrap();
    assert_eq!(res, json!({"moved": true}));
    let res = handle_method(&app, "tab.reorder", &json!({"dragged": 2, "target": 2})).unwrap();
    assert_eq!(res, json!({"moved": false}));

    let list = handle_method(&app, "tab.list", &json!({})).unwrap();
    assert_eq!(list["tabs"][0]["id"], 2);
}

#[test]
fn test_tab_close_active_emits_destroy() {
    let (app, outbox, _) = setup();
    handle_method(&app, "tab.close_active", &json!({})).unwrap();
    let commands = outbox.commands_for(SurfaceId(1));
    assert_eq!(commands.last(), Some(&SurfaceCommand::Destroy));
    assert_eq!(
        outbox.commands_for(SurfaceId(2)).first(),
        Some(&SurfaceCommand::Create { url: "about:newtab".into() })
    );
}

// ─── Navigation ───

#[test]
fn test_navigate_sends_load_command() {
    let (app, outbox, _) = setup();
    outbox.drain();

    let res = handle_method(&app, "navigate", &json!({"input": "example.com"})).unwrap();
    assert_eq!(res, json!({"url": "https://example.com"}));
    assert_eq!(
        outbox.drain(),
        vec![(SurfaceId(1), SurfaceCommand::Load { url: "https://example.com".into() })]
    );

    let res = handle_method(&app, "navigate", &json!({"input": ""})).unwrap();
    assert_eq!(res, json!({"url": null}));
}

#[test]
fn test_back_follows_reported_state() {
    let (app, outbox, _) = setup();
    outbox.drain();

    handle_method(&app, "nav.back", &json!({})).unwrap();
    assert!(outbox.drain().is_empty());

    handle_method(&app, "surface.event", &json!({
        "surface": 1,
        "event": {"type": "navigated", "url": "https://b.com"},
        "state": {"url": "https://b.com", "can_go_back": true, "can_go_forward": false}
    }))
    .unwrap();
    handle_method(&app, "nav.back", &json!({})).unwrap();
    assert_eq!(outbox.drain(), vec![(SurfaceId(1), SurfaceCommand::GoBack)]);
}

#[test]
fn test_zoom_methods() {
    let (app, _, _) = setup();
    assert_eq!(handle_method(&app, "zoom.in", &json!({})).unwrap(), json!({"level": 1.0}));
    assert_eq!(handle_method(&app, "zoom.out", &json!({})).unwrap(), json!({"level": 0.0}));
    assert_eq!(handle_method(&app, "zoom.out", &json!({})).unwrap(), json!({"level": -1.0}));
    assert_eq!(handle_method(&app, "zoom.reset", &json!({})).unwrap(), json!({"level": 0.0}));
}

// ─── Surface events ───

#[test]
fn test_surface_event_updates_tab() {
    let (app, _, ui) = setup();
    ui.drain();

    let res = handle_method(&app, "surface.event", &json!({
        "surface": 1,
        "event": {"type": "title-updated", "title": "Hello"}
    }))
    .unwrap();
    assert_eq!(res, json!({"applied": true}));

    let list = handle_method(&app, "tab.list", &json!({})).unwrap();
    assert_eq!(list["tabs"][0]["title"], "Hello");
    assert!(!ui.drain().is_empty());
}

#[test]
fn test_surface_event_from_unknown_surface() {
    let (app, _, _) = setup();
    let res = handle_method(&app, "surface.event", &json!({
        "surface": 77,
        "event": {"type": "load-start"}
    }))
    .unwrap();
    assert_eq!(res, json!({"applied": false}));
}

#[test]
fn test_surface_event_rejects_bad_payload() {
    let (app, _, _) = setup();
    let err = handle_method(&app, "surface.event", &json!({
        "surface": 1,
        "event": {"type": "teleported"}
    }))
    .unwrap_err();
    assert!(err.starts_with("invalid event"));
}

// ─── Bookmarks ───

#[test]
fn test_bookmark_add_list_remove() {
    let (app, _, _) = setup();

    let res = handle_method(&app, "bookmark.add", &json!({
        "url": "https://example.com",
        "title": "Example"
    }))
    .unwrap();
    let id = res["id"].as_str().unwrap().to_string();
    assert_eq!(res["url"], "https://example.com");

    let list = handle_method(&app, "bookmark.list", &json!({})).unwrap();
    assert_eq!(list.as_array().unwrap().len(), 1);

    let dup = handle_method(&app, "bookmark.add", &json!({"url": "https://example.com"}));
    assert!(dup.unwrap_err().contains("already exists"));

    handle_method(&app, "bookmark.remove", &json!({"id": id})).unwrap();
    let list = handle_method(&app, "bookmark.list", &json!({})).unwrap();
    assert!(list.as_array().unwrap().is_empty());
}

#[test]
fn test_bookmark_toggle_on_new_tab_page() {
    let (app, _, _) = setup();
    let res = handle_method(&app, "bookmark.toggle", &json!({})).unwrap();
    assert_eq!(res, json!({"bookmarked": null}));
}

// ─── History & autocomplete ───

#[test]
fn test_history_and_autocomplete() {
    let (app, _, _) = setup();
    for event in [
        json!({"type": "navigated", "url": "https://docs.rs"}),
        json!({"type": "title-updated", "title": "Docs.rs"}),
        json!({"type": "load-stop"}),
    ] {
        handle_method(&app, "surface.event", &json!({"surface": 1, "event": event})).unwrap();
    }

    let history = handle_method(&app, "history.list", &json!({})).unwrap();
    assert_eq!(history.as_array().unwrap().len(), 1);
    assert_eq!(history[0]["title"], "Docs.rs");

    let filtered = handle_method(&app, "history.list", &json!({"filter": "nothing"})).unwrap();
    assert!(filtered.as_array().unwrap().is_empty());

    let suggestions = handle_method(&app, "autocomplete", &json!({"query": "docs"})).unwrap();
    assert_eq!(suggestions[0]["kind"], "history");
    assert_eq!(suggestions[0]["url"], "https://docs.rs");

    handle_method(&app, "history.clear", &json!({})).unwrap();
    let history = handle_method(&app, "history.list", &json!({})).unwrap();
    assert!(history.as_array().unwrap().is_empty());
}

// ─── Downloads ───

#[test]
fn test_download_flow() {
    let (app, _, _) = setup();
    let res = handle_method(&app, "download.started", &json!({
        "id": "d1",
        "url": "https://example.com/a.zip",
        "filename": "a.zip",
        "save_path": "/tmp/a.zip",
        "total_bytes": 100
    }))
    .unwrap();
    assert_eq!(res["state"], "in_progress");

    let res = handle_method(&app, "download.progress", &json!({"id": "d1", "received_bytes": 50})).unwrap();
    assert_eq!(res["received_bytes"], 50);

    let res = handle_method(&app, "download.done", &json!({"id": "d1", "state": "completed"})).unwrap();
    assert_eq!(res["state"], "completed");

    let list = handle_method(&app, "download.list", &json!({})).unwrap();
    assert_eq!(list.as_array().unwrap().len(), 1);

    let res = handle_method(&app, "download.clear", &json!({})).unwrap();
    assert_eq!(res, json!({"removed": 1}));
}

#[test]
fn test_queued_download_starts_in_place() {
    let (app, _, _) = setup();
    let params = json!({
        "id": "q1",
        "url": "https://example.com/b.iso",
        "filename": "b.iso",
        "save_path": "/tmp/b.iso"
    });
    let res = handle_method(&app, "download.queued", &params).unwrap();
    assert_eq!(res["state"], "queued");

    let dup = handle_method(&app, "download.queued", &params).unwrap_err();
    assert!(dup.contains("already exists"));

    let res = handle_method(&app, "download.started", &params).unwrap();
    assert_eq!(res["state"], "in_progress");
    let list = handle_method(&app, "download.list", &json!({})).unwrap();
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[test]
fn test_download_errors() {
    let (app, _, _) = setup();
    let err = handle_method(&app, "download.done", &json!({"id": "d1", "state": "exploded"})).unwrap_err();
    assert!(err.contains("invalid download state"));
    let err = handle_method(&app, "download.remove", &json!({"id": "d1"})).unwrap_err();
    assert!(err.contains("Download not found"));
}

// ─── Settings ───

#[test]
fn test_settings_get_and_save() {
    let (app, _, _) = setup();
    let settings = handle_method(&app, "settings.get", &json!({})).unwrap();
    assert_eq!(settings["search_engine"], "duckduckgo");
    assert_eq!(settings["theme"], "dark");

    let saved = handle_method(&app, "settings.save", &json!({"theme": "light"})).unwrap();
    assert_eq!(saved["theme"], "light");
    assert_eq!(saved["search_engine"], "duckduckgo");

    let err = handle_method(&app, "settings.save", &json!({"theme": "sepia"})).unwrap_err();
    assert!(err.starts_with("invalid settings"));
}
