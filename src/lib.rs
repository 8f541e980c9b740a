//! osint-dispatch: category-driven OSINT lookups over a static tool registry.
//!
//! A query is routed to every tool registered for its category. `api` tools
//! are fetched and their JSON returned, `web` tools yield a URL to open by
//! hand, and failures are reported per tool without stopping the rest.

pub mod config;
pub mod registry;
pub mod router;
pub mod tools;
pub mod types;
pub mod ui;
