use serde::{Deserialize, Serialize};

/// An external link found in an HTML document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedLink {
    pub url: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkCheckResult {
    pub url: String,
    pub status_code: u16,
    pub final_url: String,
    pub redirect_count: usize,
    pub redirected: bool,
    pub broken: bool,
    pub silent: bool,
    #[serde(default)]
    pub bot_blocked: bool,
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(default)]
    pub text: String,
}

impl LinkCheckResult {
    pub fn new(url: String) -> Self {
        Self {
            final_url: url.clone(),
            url,
            status_code: 0,
            redirect_count: 0,
            redirected: false,
            broken: false,
            silent: false,
            bot_blocked: false,
            error: None,
            file: None,
            text: String::new(),
        }
    }

    /// A transport-level failure: no status, no redirects, always broken
    pub fn with_error(url: String, error: String) -> Self {
        Self {
            broken: true,
            error: Some(error),
            ..Self::new(url)
        }
    }

    /// Whether the failure belongs in the broken-links report
    pub fn is_reportable(&self) -> bool {
        self.broken && !self.silent && !self.bot_blocked
    }
}
