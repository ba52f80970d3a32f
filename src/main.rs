//! AIBrowser console demo.
//!
//! Drives the browser core with headless surfaces and an in-memory store and
//! prints what the chrome would receive. The real front end talks to the
//! `aibrowser-rpc` sidecar instead.

use aibrowser::app::App;
use aibrowser::managers::tab_registry::TabRegistryTrait;
use aibrowser::services::navigation_resolver;
use aibrowser::store::JsonFileStore;
use aibrowser::surface::HeadlessSurfaceFactory;
use aibrowser::types::download::DownloadState;
use aibrowser::types::settings::{SearchEngine, SettingsPatch};
use aibrowser::types::surface::{SurfaceEvent, SurfaceId};
use aibrowser::ui::projection::UiQueue;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

type DemoResult = Result<(), Box<dyn std::error::Error>>;

fn main() -> DemoResult {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║                 AIBrowser v{} — Demo Mode                ║", env!("CARGO_PKG_VERSION"));
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    demo_resolver();

    let ui = UiQueue::new();
    let factory = HeadlessSurfaceFactory::new();
    let journal = factory.journal();
    let mut app = App::new(
        Box::new(JsonFileStore::in_memory()),
        Box::new(factory),
        Box::new(ui.clone()),
        false,
    );

    demo_tabs(&mut app, &ui)?;
    demo_surface_events(&mut app, &ui)?;
    demo_bookmarks_and_history(&mut app)?;
    demo_downloads(&mut app)?;
    demo_settings(&mut app);

    section("Surface commands");
    for (surface, command) in journal.snapshot() {
        println!("  {} <- {:?}", surface, command);
    }

    println!();
    println!("═══════════════════════════════════════════════════════════════");
    println!("  ✅ Demo finished with {} open tab(s)", app.tabs().len());
    println!("═══════════════════════════════════════════════════════════════");
    Ok(())
}

fn section(name: &str) {
    println!("───────────────────────────────────────────────────────────────");
    println!("  📦 {}", name);
    println!("───────────────────────────────────────────────────────────────");
}

fn print_updates(ui: &UiQueue) {
    for update in ui.drain() {
        println!("    ui: {:?}", update);
    }
}

fn demo_resolver() {
    section("Navigation Resolver");
    for input in ["github.com", "http://example.org/a b", "rust ownership", "about:newtab", "localhost"] {
        let resolved = navigation_resolver::resolve(input, SearchEngine::DuckDuckGo);
        println!("  {:<26} -> {}", format!("{:?}", input), resolved.unwrap_or_default());
    }
    println!();
}

fn demo_tabs(app: &mut App, ui: &UiQueue) -> DemoResult {
    section("Tabs");
    print_updates(ui);

    let second = app.create_tab(Some("https://rust-lang.org"));
    let third = app.create_tab(None);
    println!("  Opened {} tabs", app.tabs().len());

    app.reorder_tabs(third, second);
    let order: Vec<String> = app.tabs().iter().map(|t| t.id.to_string()).collect();
    println!("  Order after drag: {}", order.join(", "));

    app.close_tab(third)?;
    println!("  Closed {}, active is now {:?}", third, app.active_tab().map(|t| t.id));
    print_updates(ui);
    println!();
    Ok(())
}

fn active_surface(app: &App) -> Option<SurfaceId> {
    let tab = app.active_tab()?;
    app.registry().surface_for_tab(tab.id)
}

fn demo_surface_events(app: &mut App, ui: &UiQueue) -> DemoResult {
    section("Surface events");
    let url = app.navigate("crates.io")?.unwrap_or_default();
    println!("  Navigating to {}", url);

    let Some(surface) = active_surface(app) else {
        return Ok(());
    };
    app.handle_surface_event(surface, SurfaceEvent::LoadStart);
    app.handle_surface_event(surface, SurfaceEvent::Navigated { url: url.clone() });
    app.handle_surface_event(surface, SurfaceEvent::TitleUpdated { title: "crates.io: Rust Package Registry".into() });
    app.handle_surface_event(surface, SurfaceEvent::LoadStop);
    print_updates(ui);

    let stale = app.handle_surface_event(SurfaceId(999), SurfaceEvent::LoadStart);
    println!("  Event from unknown surface applied: {}", stale);
    println!();
    Ok(())
}

fn demo_bookmarks_and_history(app: &mut App) -> DemoResult {
    section("Bookmarks & History");
    let bookmarked = app.toggle_bookmark()?;
    println!("  Toggled bookmark on active tab: {:?}", bookmarked);
    app.add_bookmark("The Rust Book", "https://doc.rust-lang.org/book/")?;
    for bookmark in app.bookmarks() {
        println!("  ★ {} ({})", bookmark.title, bookmark.url);
    }
    for entry in app.history("") {
        println!("  🕐 {} ({})", entry.title, entry.url);
    }
    for suggestion in app.suggest("rust") {
        println!("  → {:?} {}", suggestion.kind, suggestion.url);
    }
    println!();
    Ok(())
}

fn demo_downloads(app: &mut App) -> DemoResult {
    section("Downloads");
    app.download_started("dl-1", "https://example.com/a.zip", "a.zip", "/tmp/a.zip", Some(2048))?;
    app.download_progress("dl-1", 1024, None)?;
    let item = app.download_done("dl-1", DownloadState::Completed)?;
    println!("  {} finished as {:?} ({:.0}%)", item.filename, item.state, item.progress() * 100.0);
    println!();
    Ok(())
}

fn demo_settings(app: &mut App) {
    section("Settings");
    let settings = app.save_settings(SettingsPatch {
        search_engine: Some("google".into()),
        ..SettingsPatch::default()
    });
    println!("  Search engine: {}", settings.search_engine().display_name());
    println!("  Save history:  {}", settings.save_history);
    println!();
}
