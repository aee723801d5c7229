use std::fmt;
use std::str::FromStr;

/// Extension every stored archive name carries.
pub const ARCHIVE_SUFFIX: &str = ".wacz";

/// Name shown to the user: the stored name minus its fixed-length suffix.
pub fn display_name(stored: &str) -> &str {
    let cut = stored.len().saturating_sub(ARCHIVE_SUFFIX.len());
    // Names are expected to be ASCII-suffixed; never split a code point.
    match stored.get(..cut) {
        Some(head) => head,
        None => stored,
    }
}

/// Stored name reconstructed from a display name.
pub fn stored_name(display: &str) -> String {
    format!("{display}{ARCHIVE_SUFFIX}")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Archive {
    pub name: String,
}

impl Archive {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn display_name(&self) -> &str {
        display_name(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub id: String,
    pub url: String,
    pub status: String,
    pub created_at: String,
}

impl Job {
    pub fn status_kind(&self) -> JobStatus {
        JobStatus::classify(&self.status)
    }

    pub fn short_id(&self) -> &str {
        match self.id.char_indices().nth(8) {
            Some((idx, _)) => &self.id[..idx],
            None => &self.id,
        }
    }
}

/// Display classification of the open-ended job status string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    InProgress,
    Completed,
    Failed,
}

impl JobStatus {
    pub fn classify(status: &str) -> Self {
        match status {
            "completed" => JobStatus::Completed,
            "failed" => JobStatus::Failed,
            _ => JobStatus::InProgress,
        }
    }
}

/// Crawl boundary policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScopeType {
    #[default]
    Page,
    PageSpa,
    Prefix,
    Host,
    Domain,
    Any,
}

impl ScopeType {
    pub const ALL: [ScopeType; 6] = [
        ScopeType::Page,
        ScopeType::PageSpa,
        ScopeType::Prefix,
        ScopeType::Host,
        ScopeType::Domain,
        ScopeType::Any,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ScopeType::Page => "page",
            ScopeType::PageSpa => "page-spa",
            ScopeType::Prefix => "prefix",
            ScopeType::Host => "host",
            ScopeType::Domain => "domain",
            ScopeType::Any => "any",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScopeType::Page => "Page (Single Page)",
            ScopeType::PageSpa => "Page (SPA)",
            ScopeType::Prefix => "Prefix",
            ScopeType::Host => "Host",
            ScopeType::Domain => "Domain",
            ScopeType::Any => "Any",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ScopeType::Page => "crawl only this page and no additional links",
            ScopeType::PageSpa => {
                "crawl only this page, but load any links that include different hashtags"
            }
            ScopeType::Prefix => "crawl any pages in the same directory as the start page",
            ScopeType::Host => "crawl pages that share the same host",
            ScopeType::Domain => "crawl pages that share the same domain and subdomains",
            ScopeType::Any => "crawl any and all pages linked from this page",
        }
    }
}

impl fmt::Display for ScopeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScopeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ScopeType::ALL
            .into_iter()
            .find(|scope| scope.as_str() == s.trim())
            .ok_or_else(|| format!("unknown scope type '{}'", s.trim()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlOptions {
    pub name: String,
    pub scope: ScopeType,
    pub page_limit: i64,
    pub size_limit: i64,
    pub depth: i64,
}

/// A validated job-creation request ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlSubmission {
    pub url: String,
    pub options: CrawlOptions,
}
