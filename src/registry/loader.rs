//! Tool registry loader.
//!
//! The registry is a JSON document with a top-level `tools` array of
//! [`ToolDescriptor`] entries. It is read from disk on every call; nothing is
//! cached between dispatches.

use crate::types::ToolDescriptor;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Failure to obtain the tool registry.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Tool registry unavailable at {}: {source}", path.display())]
    Unavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Tool registry at {} is malformed: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Deserialize)]
struct RegistryFile {
    tools: Vec<ToolDescriptor>,
}

/// Load every enabled tool descriptor, in file order.
pub fn load_registry(path: &Path) -> Result<Vec<ToolDescriptor>, RegistryError> {
    let contents = std::fs::read_to_string(path).map_err(|source| RegistryError::Unavailable {
        path: path.to_path_buf(),
        source,
    })?;

    let file: RegistryFile =
        serde_json::from_str(&contents).map_err(|source| RegistryError::Malformed {
            path: path.to_path_buf(),
            source,
        })?;

    let total = file.tools.len();
    let tools: Vec<ToolDescriptor> = file
        .tools
        .into_iter()
        .filter(|tool| {
            if !tool.enabled {
                debug!("Skipping disabled tool: {}", tool.name);
            }
            tool.enabled
        })
        .collect();

    debug!(
        "Loaded {} of {} tools from {:?}",
        tools.len(),
        total,
        path
    );
    Ok(tools)
}

/// Tools whose category matches `category` case-insensitively.
///
/// A category with no registered tools yields an empty list.
pub fn list_tools_by_category(
    path: &Path,
    category: &str,
) -> Result<Vec<ToolDescriptor>, RegistryError> {
    let tools: Vec<ToolDescriptor> = load_registry(path)?
        .into_iter()
        .filter(|tool| tool.in_category(category))
        .collect();

    debug!("{} tools match category '{}'", tools.len(), category);
    Ok(tools)
}

/// Distinct categories present in the registry, in first-seen order.
pub fn list_categories(path: &Path) -> Result<Vec<String>, RegistryError> {
    let mut categories: Vec<String> = Vec::new();
    for tool in load_registry(path)? {
        if !categories.iter().any(|c| tool.in_category(c)) {
            categories.push(tool.category);
        }
    }
    Ok(categories)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::IntegrationMethod;
    use std::io::Write;

    const REGISTRY: &str = r#"{
        "tools": [
            {"name": "ExampleLookup", "category": "Domain",
             "integration": {"method": "api", "url": "https://api.example.com/lookup?q=<query>"}},
            {"name": "WhoisPage", "category": "domain",
             "integration": {"method": "web", "url": "https://who.example/<query>"}},
            {"name": "Retired", "category": "Domain", "enabled": false,
             "integration": {"method": "api", "url": "https://old.example/<query>"}},
            {"name": "Scraper", "category": "Username",
             "integration": {"method": "scrape", "url": "https://s.example/<query>"}}
        ]
    }"#;

    fn write_registry(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn filters_by_category_case_insensitively() {
        let file = write_registry(REGISTRY);
        let upper = list_tools_by_category(file.path(), "Domain").unwrap();
        let lower = list_tools_by_category(file.path(), "domain").unwrap();

        assert_eq!(upper, lower);
        let names: Vec<&str> = upper.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["ExampleLookup", "WhoisPage"]);
    }

    #[test]
    fn unknown_category_is_empty_not_error() {
        let file = write_registry(REGISTRY);
        let tools = list_tools_by_category(file.path(), "Phone").unwrap();
        assert!(tools.is_empty());
    }

    #[test]
    fn disabled_tools_are_skipped() {
        let file = write_registry(REGISTRY);
        let all = load_registry(file.path()).unwrap();
        assert_eq!(all.len(), 3);
        assert!(all.iter().all(|t| t.name != "Retired"));
    }

    #[test]
    fn unknown_method_loads_as_unsupported() {
        let file = write_registry(REGISTRY);
        let tools = list_tools_by_category(file.path(), "USERNAME").unwrap();
        assert_eq!(
            tools[0].integration.method,
            IntegrationMethod::Unsupported("scrape".into())
        );
    }

    #[test]
    fn categories_are_deduplicated_in_first_seen_order() {
        let file = write_registry(REGISTRY);
        let categories = list_categories(file.path()).unwrap();
        assert_eq!(categories, vec!["Domain".to_string(), "Username".to_string()]);
    }

    #[test]
    fn bundled_registry_covers_every_cli_category() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("registry/tools.json");
        for category in crate::types::Category::ALL {
            let tools = list_tools_by_category(&path, category.as_str()).unwrap();
            assert!(!tools.is_empty(), "no tools for {}", category);
        }
    }

    #[test]
    fn missing_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_registry(&dir.path().join("tools.json")).unwrap_err();
        assert!(matches!(err, RegistryError::Unavailable { .. }));
    }

    #[test]
    fn garbage_is_malformed() {
        let file = write_registry("{\"tools\": [ {\"name\": 1} ]}");
        let err = list_tools_by_category(file.path(), "Domain").unwrap_err();
        assert!(matches!(err, RegistryError::Malformed { .. }));

        let file = write_registry("not json");
        assert!(matches!(
            load_registry(file.path()).unwrap_err(),
            RegistryError::Malformed { .. }
        ));
    }
}
