//! Shared types used across the dispatcher: tool descriptors, outcomes and
//! the per-dispatch result map.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::time::Duration;

/// Literal token in a URL template that is replaced by the user's query.
pub const QUERY_PLACEHOLDER: &str = "<query>";

// ---------------------------------------------------------------------------
// Registry entries
// ---------------------------------------------------------------------------

/// One third-party OSINT service as described by the registry file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Disabled entries stay in the file but are never dispatched.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    pub integration: Integration,
}

fn default_enabled() -> bool {
    true
}

impl ToolDescriptor {
    /// Case-insensitive exact match against a category name.
    pub fn in_category(&self, category: &str) -> bool {
        self.category.to_lowercase() == category.to_lowercase()
    }
}

/// How a tool is reached and where.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Integration {
    pub method: IntegrationMethod,
    /// URL template containing [`QUERY_PLACEHOLDER`].
    pub url: String,
}

impl Integration {
    /// Substitute `query` for every placeholder in the URL template.
    ///
    /// The query is inserted verbatim. A template without a placeholder is
    /// returned unchanged.
    pub fn render_url(&self, query: &str) -> String {
        self.url.replace(QUERY_PLACEHOLDER, query)
    }

    pub fn has_placeholder(&self) -> bool {
        self.url.contains(QUERY_PLACEHOLDER)
    }
}

/// Integration method, resolved when the registry is parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IntegrationMethod {
    /// Programmatic GET returning JSON.
    Api,
    /// URL construction only, for manual browsing.
    Web,
    /// Anything else; the raw value is kept for reporting.
    Unsupported(String),
}

impl From<String> for IntegrationMethod {
    fn from(raw: String) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "api" => Self::Api,
            "web" => Self::Web,
            _ => Self::Unsupported(raw),
        }
    }
}

impl From<IntegrationMethod> for String {
    fn from(method: IntegrationMethod) -> Self {
        method.to_string()
    }
}

impl fmt::Display for IntegrationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api => f.pad("api"),
            Self::Web => f.pad("web"),
            Self::Unsupported(raw) => f.pad(raw),
        }
    }
}

// ---------------------------------------------------------------------------
// Categories offered by the CLI
// ---------------------------------------------------------------------------

/// The fixed set of target kinds a user can pick from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Category {
    Username,
    Email,
    Domain,
    Ip,
}

impl Category {
    pub const ALL: [Category; 4] = [Self::Username, Self::Email, Self::Domain, Self::Ip];

    /// Parse a user-typed category name (case-insensitive).
    pub fn parse(input: &str) -> Option<Self> {
        let wanted = input.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().to_lowercase() == wanted)
    }

    /// Name as it appears in the registry.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Username => "Username",
            Self::Email => "Email",
            Self::Domain => "Domain",
            Self::Ip => "IP",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Dispatch results
// ---------------------------------------------------------------------------

/// What a single tool invocation produced.
///
/// Serializes to the shape shown to the user: the decoded body itself,
/// `{"error": ..}`, `{"url": ..}` or `{"status": "unsupported"}`.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutcome {
    Json(serde_json::Value),
    Error { error: String },
    Link { url: String },
    Unsupported,
}

impl ToolOutcome {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            error: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }
}

impl Serialize for ToolOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Json(value) => value.serialize(serializer),
            Self::Error { error } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("error", error)?;
                map.end()
            }
            Self::Link { url } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("url", url)?;
                map.end()
            }
            Self::Unsupported => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("status", "unsupported")?;
                map.end()
            }
        }
    }
}

/// Tool name to outcome, in the order tools were dispatched.
///
/// Inserting a name that is already present replaces its outcome but keeps
/// the original position. Elapsed times are carried for display only and do
/// not take part in equality or serialization.
#[derive(Debug, Clone, Default)]
pub struct ResultMap {
    entries: Vec<ResultEntry>,
}

#[derive(Debug, Clone)]
struct ResultEntry {
    name: String,
    outcome: ToolOutcome,
    elapsed: Option<Duration>,
}

impl ResultMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an outcome, returning the one it replaced, if any.
    pub fn insert(&mut self, name: impl Into<String>, outcome: ToolOutcome) -> Option<ToolOutcome> {
        self.upsert(name.into(), outcome, None)
    }

    /// Insert an outcome together with how long the tool took.
    pub fn insert_timed(
        &mut self,
        name: impl Into<String>,
        outcome: ToolOutcome,
        elapsed: Duration,
    ) -> Option<ToolOutcome> {
        self.upsert(name.into(), outcome, Some(elapsed))
    }

    fn upsert(
        &mut self,
        name: String,
        outcome: ToolOutcome,
        elapsed: Option<Duration>,
    ) -> Option<ToolOutcome> {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.name == name) {
            entry.elapsed = elapsed;
            return Some(std::mem::replace(&mut entry.outcome, outcome));
        }
        self.entries.push(ResultEntry {
            name,
            outcome,
            elapsed,
        });
        None
    }

    pub fn get(&self, name: &str) -> Option<&ToolOutcome> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| &e.outcome)
    }

    /// How long the named tool took, when it was recorded.
    pub fn elapsed(&self, name: &str) -> Option<Duration> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .and_then(|e| e.elapsed)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ToolOutcome)> {
        self.entries.iter().map(|e| (e.name.as_str(), &e.outcome))
    }

    /// Like [`ResultMap::iter`], with each tool's elapsed time.
    pub fn iter_timed(&self) -> impl Iterator<Item = (&str, &ToolOutcome, Option<Duration>)> {
        self.entries
            .iter()
            .map(|e| (e.name.as_str(), &e.outcome, e.elapsed))
    }

    /// Number of entries holding an error record.
    pub fn error_count(&self) -> usize {
        self.entries.iter().filter(|e| e.outcome.is_error()).count()
    }
}

impl PartialEq for ResultMap {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self
                .entries
                .iter()
                .zip(&other.entries)
                .all(|(a, b)| a.name == b.name && a.outcome == b.outcome)
    }
}

impl Serialize for ResultMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.name, &entry.outcome)?;
        }
        map.end()
    }
}
