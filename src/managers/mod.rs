// AIBrowser state managers
// Managers own in-memory session state: the tab registry and the download list.

pub mod download_manager;
pub mod tab_registry;
