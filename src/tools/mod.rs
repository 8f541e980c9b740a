pub mod http;
pub mod traits;

pub use http::HttpInvoker;
pub use traits::{Fetch, FetchResponse};

use crate::types::{IntegrationMethod, ToolDescriptor, ToolOutcome};
use tracing::{debug, warn};

// ---------------------------------------------------------------------------
// Tool invocation
// ---------------------------------------------------------------------------

/// Invoke one tool for `query`.
///
/// Never fails: every fault of an `api` tool becomes an error record, `web`
/// tools only build a URL, and unknown methods report as unsupported.
pub async fn invoke(fetcher: &dyn Fetch, tool: &ToolDescriptor, query: &str) -> ToolOutcome {
    if !tool.integration.has_placeholder() {
        debug!("Tool '{}' URL has no placeholder; query not substituted", tool.name);
    }

    match &tool.integration.method {
        IntegrationMethod::Api => run_api(fetcher, tool, query).await,
        IntegrationMethod::Web => run_web(tool, query),
        IntegrationMethod::Unsupported(method) => {
            debug!("Tool '{}' uses unsupported method '{}'", tool.name, method);
            ToolOutcome::Unsupported
        }
    }
}

async fn run_api(fetcher: &dyn Fetch, tool: &ToolDescriptor, query: &str) -> ToolOutcome {
    let url = tool.integration.render_url(query);

    let resp = match fetcher.get(&url).await {
        Ok(resp) => resp,
        Err(e) => {
            warn!("Tool '{}' request failed: {:#}", tool.name, e);
            return ToolOutcome::error(format!("{:#}", e));
        }
    };

    if !resp.is_success() {
        warn!("Tool '{}' returned status {}", tool.name, resp.status);
        return ToolOutcome::error(resp.body);
    }

    match serde_json::from_str(&resp.body) {
        Ok(value) => ToolOutcome::Json(value),
        Err(e) => {
            warn!("Tool '{}' returned a non-JSON body: {}", tool.name, e);
            ToolOutcome::error(format!("Invalid JSON response: {}", e))
        }
    }
}

fn run_web(tool: &ToolDescriptor, query: &str) -> ToolOutcome {
    ToolOutcome::Link {
        url: tool.integration.render_url(query),
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted fetcher shared by the invoker and router tests.

    use super::traits::{Fetch, FetchResponse};
    use anyhow::{bail, Result};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct ScriptedFetcher {
        responses: HashMap<String, (u16, String)>,
        requested: Mutex<Vec<String>>,
    }

    impl ScriptedFetcher {
        pub fn respond(mut self, url: &str, status: u16, body: &str) -> Self {
            self.responses
                .insert(url.to_string(), (status, body.to_string()));
            self
        }

        pub fn requested(&self) -> Vec<String> {
            self.requested.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Fetch for ScriptedFetcher {
        async fn get(&self, url: &str) -> Result<FetchResponse> {
            self.requested.lock().unwrap().push(url.to_string());
            match self.responses.get(url) {
                Some((status, body)) => Ok(FetchResponse {
                    status: *status,
                    body: body.clone(),
                }),
                None => bail!("connection refused: {}", url),
            }
        }
    }
}
