//! Dispatcher: one category + query in, one [`ResultMap`] out.

use crate::registry::{self, RegistryError};
use crate::tools::{self, Fetch};
use crate::types::{ResultMap, ToolOutcome};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

/// Run every tool registered for `category`, one after another.
///
/// Tools are invoked in registry order and each outcome is stored under the
/// tool's name. Only a registry failure is returned as an error; tool
/// failures are recorded in the map.
pub async fn route_query(
    registry_path: &Path,
    fetcher: &dyn Fetch,
    category: &str,
    query: &str,
) -> Result<ResultMap, RegistryError> {
    let matching = registry::list_tools_by_category(registry_path, category)?;
    info!(
        "Dispatching '{}' to {} {} tools",
        query,
        matching.len(),
        category
    );

    let mut results = ResultMap::new();
    for tool in &matching {
        let started = Instant::now();
        let outcome = tools::invoke(fetcher, tool, query).await;
        let elapsed = started.elapsed();
        debug!("{} finished in {:?}", tool.name, elapsed);

        if results.insert_timed(tool.name.clone(), outcome, elapsed).is_some() {
            warn!("Duplicate tool name '{}'; keeping the later result", tool.name);
        }
    }

    Ok(results)
}

/// Like [`route_query`], but with up to `max_in_flight` tools running at once.
///
/// The returned map is identical to the sequential one: outcomes are
/// collected in registry order regardless of completion order.
pub async fn route_query_concurrent(
    registry_path: &Path,
    fetcher: Arc<dyn Fetch>,
    category: &str,
    query: &str,
    max_in_flight: usize,
) -> Result<ResultMap, RegistryError> {
    if max_in_flight <= 1 {
        return route_query(registry_path, fetcher.as_ref(), category, query).await;
    }

    let matching = registry::list_tools_by_category(registry_path, category)?;
    info!(
        "Dispatching '{}' to {} {} tools ({} in flight)",
        query,
        matching.len(),
        category,
        max_in_flight
    );

    let permits = Arc::new(Semaphore::new(max_in_flight));
    let mut handles = Vec::with_capacity(matching.len());
    for tool in matching {
        let fetcher = fetcher.clone();
        let permits = permits.clone();
        let query = query.to_string();
        let name = tool.name.clone();
        let handle = tokio::spawn(async move {
            let _permit = permits.acquire_owned().await.ok();
            let started = Instant::now();
            let outcome = tools::invoke(fetcher.as_ref(), &tool, &query).await;
            let elapsed = started.elapsed();
            debug!("{} finished in {:?}", tool.name, elapsed);
            (outcome, elapsed)
        });
        handles.push((name, handle));
    }

    let mut results = ResultMap::new();
    for (name, handle) in handles {
        let previous = match handle.await {
            Ok((outcome, elapsed)) => results.insert_timed(name.clone(), outcome, elapsed),
            Err(e) => {
                warn!("Tool '{}' task failed: {}", name, e);
                results.insert(name.clone(), ToolOutcome::error(format!("Tool task failed: {}", e)))
            }
        };
        if previous.is_some() {
            warn!("Duplicate tool name '{}'; keeping the later result", name);
        }
    }

    Ok(results)
}
