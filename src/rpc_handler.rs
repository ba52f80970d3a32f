//! RPC method handler for the AIBrowser JSON-RPC protocol.
//!
//! Kept apart from `rpc_server.rs` so it can be unit-tested without stdio.
//! `handle_method` dispatches one call to the `App`.

use std::sync::Mutex;

use serde_json::{json, Value};

use crate::app::App;
use crate::surface::SurfaceState;
use crate::types::download::DownloadState;
use crate::types::settings::SettingsPatch;
use crate::types::surface::{SurfaceEvent, SurfaceId};
use crate::types::tab::TabId;

fn str_param<'a>(params: &'a Value, key: &str) -> Result<&'a str, String> {
    params
        .get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| format!("missing {}", key))
}

fn u64_param(params: &Value, key: &str) -> Result<u64, String> {
    params
        .get(key)
        .and_then(|v| v.as_u64())
        .ok_or_else(|| format!("missing {}", key))
}

fn opt_u64_param(params: &Value, key: &str) -> Option<u64> {
    params.get(key).and_then(|v| v.as_u64())
}

fn tab_param(params: &Value, key: &str) -> Result<TabId, String> {
    u64_param(params, key).map(TabId)
}

fn to_value<T: serde::Serialize>(value: T) -> Result<Value, String> {
    serde_json::to_value(value).map_err(|e| e.to_string())
}

/// Dispatch a JSON-RPC method call.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
pub fn handle_method(app: &Mutex<App>, method: &str, params: &Value) -> Result<Value, String> {
    let mut a = app.lock().map_err(|e| e.to_string())?;

    match method {
        "ping" => Ok(json!({"pong": true})),

        // ─── Tabs ───
        "tab.create" => {
            let url = params.get("url").and_then(|v| v.as_str());
            let id = a.create_tab(url);
            Ok(json!({"id": id}))
        }
        "tab.switch" => {
            let id = tab_param(params, "id")?;
            a.switch_tab(id).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }
        "tab.close" => {
            let id = tab_param(params, "id")?;
            a.close_tab(id).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }
        "tab.close_active" => {
            a.close_active_tab().map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }
        "tab.reorder" => {
            let dragged = tab_param(params, "dragged")?;
            let target = tab_param(params, "target")?;
            Ok(json!({"moved": a.reorder_tabs(dragged, target)}))
        }
        "tab.list" => {
            let active = a.active_tab().map(|t| t.id);
            let tabs = to_value(a.tabs())?;
            Ok(json!({"tabs": tabs, "active": active}))
        }

        // ─── Navigation ───
        "navigate" => {
            let input = str_param(params, "input")?;
            let url = a.navigate(input).map_err(|e| e.to_string())?;
            Ok(json!({"url": url}))
        }
        "nav.back" => a.go_back().map(|_| json!({"ok": true})).map_err(|e| e.to_string()),
        "nav.forward" => a.go_forward().map(|_| json!({"ok": true})).map_err(|e| e.to_string()),
        "nav.reload" => a.reload().map(|_| json!({"ok": true})).map_err(|e| e.to_string()),
        "nav.stop" => a.stop().map(|_| json!({"ok": true})).map_err(|e| e.to_string()),
        "nav.home" => a.go_home().map(|_| json!({"ok": true})).map_err(|e| e.to_string()),
        "zoom.in" => a.zoom_in().map(|level| json!({"level": level})).map_err(|e| e.to_string()),
        "zoom.out" => a.zoom_out().map(|level| json!({"level": level})).map_err(|e| e.to_string()),
        "zoom.reset" => a.zoom_reset().map(|level| json!({"level": level})).map_err(|e| e.to_string()),

        // ─── Surface events ───
        "surface.event" => {
            let surface = SurfaceId(u64_param(params, "surface")?);
            let event: SurfaceEvent = serde_json::from_value(
                params.get("event").cloned().ok_or("missing event")?,
            )
            .map_err(|e| format!("invalid event: {}", e))?;
            if let Some(state) = params.get("state") {
                let state: SurfaceState = serde_json::from_value(state.clone())
                    .map_err(|e| format!("invalid state: {}", e))?;
                a.apply_surface_state(surface, &state);
            }
            Ok(json!({"applied": a.handle_surface_event(surface, event)}))
        }

        // ─── Bookmarks ───
        "bookmark.add" => {
            let url = str_param(params, "url")?;
            let title = params.get("title").and_then(|v| v.as_str()).unwrap_or("");
            let bookmark = a.add_bookmark(title, url).map_err(|e| e.to_string())?;
            to_value(bookmark)
        }
        "bookmark.toggle" => {
            let state = a.toggle_bookmark().map_err(|e| e.to_string())?;
            Ok(json!({"bookmarked": state}))
        }
        "bookmark.remove" => {
            let id = str_param(params, "id")?;
            a.remove_bookmark(id).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }
        "bookmark.list" => to_value(a.bookmarks()),

        // ─── History ───
        "history.list" => {
            let filter = params.get("filter").and_then(|v| v.as_str()).unwrap_or("");
            to_value(a.history(filter))
        }
        "history.clear" => {
            a.clear_history();
            Ok(json!({"ok": true}))
        }
        "autocomplete" => {
            let query = params.get("query").and_then(|v| v.as_str()).unwrap_or("");
            to_value(a.suggest(query))
        }

        // ─── Downloads ───
        "download.queued" => {
            let id = str_param(params, "id")?;
            let url = str_param(params, "url")?;
            let filename = str_param(params, "filename")?;
            let save_path = str_param(params, "save_path")?;
            let item = a
                .download_queued(id, url, filename, save_path)
                .map_err(|e| e.to_string())?;
            to_value(item)
        }
        "download.started" => {
            let id = str_param(params, "id")?;
            let url = str_param(params, "url")?;
            let filename = str_param(params, "filename")?;
            let save_path = str_param(params, "save_path")?;
            let total = opt_u64_param(params, "total_bytes");
            let item = a
                .download_started(id, url, filename, save_path, total)
                .map_err(|e| e.to_string())?;
            to_value(item)
        }
        "download.progress" => {
            let id = str_param(params, "id")?;
            let received = u64_param(params, "received_bytes")?;
            let total = opt_u64_param(params, "total_bytes");
            let item = a
                .download_progress(id, received, total)
                .map_err(|e| e.to_string())?;
            to_value(item)
        }
        "download.done" => {
            let id = str_param(params, "id")?;
            let state_name = str_param(params, "state")?;
            let state = DownloadState::parse(state_name)
                .ok_or_else(|| format!("invalid download state: {}", state_name))?;
            let item = a.download_done(id, state).map_err(|e| e.to_string())?;
            to_value(item)
        }
        "download.list" => to_value(a.downloads()),
        "download.remove" => {
            let id = str_param(params, "id")?;
            a.remove_download(id).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }
        "download.clear" => Ok(json!({"removed": a.clear_downloads()})),

        // ─── Settings ───
        "settings.get" => to_value(a.settings()),
        "settings.save" => {
            let patch: SettingsPatch = serde_json::from_value(params.clone())
                .map_err(|e| format!("invalid settings: {}", e))?;
            to_value(a.save_settings(patch))
        }

        _ => Err(format!("unknown method: {}", method)),
    }
}
