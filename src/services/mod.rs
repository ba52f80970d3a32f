// AIBrowser services
// Stateless logic: address resolution, surface event reconciliation, autocomplete.

pub mod autocomplete;
pub mod navigation_resolver;
pub mod surface_reconciler;
