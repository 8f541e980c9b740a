pub mod loader;

pub use loader::{list_categories, list_tools_by_category, load_registry, RegistryError};
