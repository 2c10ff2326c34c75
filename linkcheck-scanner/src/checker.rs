use crate::blocking::{CONNECTION_ERROR, DomainLists, LinkCheckInput};
use crate::error::{Result, ScanError};
use crate::result::LinkCheckResult;
use reqwest::Client;
use reqwest::header::LOCATION;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAX_REDIRECTS: usize = 5;
pub const DEFAULT_SILENT_CODES: &[u16] = &[403, 503];
pub const DEFAULT_USER_AGENT: &str = concat!("linkcheck/", env!("CARGO_PKG_VERSION"));

/// Final response of a fetch after redirects were followed
struct FetchOutcome {
    status_code: u16,
    final_url: String,
    redirect_count: usize,
    body: Option<String>,
}

pub struct LinkChecker {
    client: Client,
    max_redirects: usize,
    silent_codes: Vec<u16>,
    domain_lists: DomainLists,
}

impl LinkChecker {
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT_SECS)
    }

    pub fn with_timeout(timeout_secs: u64) -> Result<Self> {
        // Redirects are followed by hand so every hop is counted.
        let client = Client::builder()
            .user_agent(DEFAULT_USER_AGENT)
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.div_ceil(2)))
            .redirect(reqwest::redirect::Policy::none())
            .cookie_store(true)
            .build()?;

        Ok(Self {
            client,
            max_redirects: DEFAULT_MAX_REDIRECTS,
            silent_codes: DEFAULT_SILENT_CODES.to_vec(),
            domain_lists: DomainLists::builtin(),
        })
    }

    pub fn with_max_redirects(mut self, max_redirects: usize) -> Self {
        self.max_redirects = max_redirects;
        self
    }

    pub fn with_silent_codes(mut self, silent_codes: Vec<u16>) -> Self {
        self.silent_codes = silent_codes;
        self
    }

    pub fn with_domain_lists(mut self, domain_lists: DomainLists) -> Self {
        self.domain_lists = domain_lists;
        self
    }

    /// Check a single link. Never fails: transport errors are recorded on
    /// the returned result.
    pub async fn check(&self, url: &str) -> LinkCheckResult {
        debug!("Checking {}", url);

        match self.fetch(url).await {
            Ok(outcome) => self.result_from_outcome(url, outcome),
            Err(e) => {
                info!("Request for {} failed: {}", url, e);

                let message = describe_error(&e);
                let bot_blocked = self
                    .domain_lists
                    .classify(&LinkCheckInput::new(url).with_error(&message));

                let mut result = LinkCheckResult::with_error(url.to_string(), message);
                result.bot_blocked = bot_blocked;
                result
            }
        }
    }

    fn result_from_outcome(&self, url: &str, outcome: FetchOutcome) -> LinkCheckResult {
        let FetchOutcome {
            status_code,
            final_url,
            redirect_count,
            body,
        } = outcome;

        let mut result = LinkCheckResult::new(url.to_string());
        result.status_code = status_code;
        result.final_url = final_url;
        result.redirect_count = redirect_count;
        result.redirected = redirect_count > 0;

        let failed = status_code >= 400;
        if self.silent_codes.contains(&status_code) {
            result.silent = true;
        } else if failed {
            result.broken = true;
        }

        if failed {
            let mut input = LinkCheckInput::new(url).with_status_code(status_code);
            if let Some(ref body) = body {
                input = input.with_response_body(body);
            }
            result.bot_blocked = self.domain_lists.classify(&input);
            debug!(
                "{} returned {} (bot blocked: {})",
                url, status_code, result.bot_blocked
            );
        }

        result
    }

    async fn fetch(&self, url: &str) -> Result<FetchOutcome> {
        let mut current =
            Url::parse(url).map_err(|e| ScanError::InvalidUrl(format!("{}: {}", url, e)))?;
        let mut redirect_count = 0;

        loop {
            let response = self.client.get(current.clone()).send().await?;
            let status = response.status();

            let location = response
                .headers()
                .get(LOCATION)
                .and_then(|v| v.to_str().ok())
                .map(|s| s.to_string());

            if status.is_redirection()
                && let Some(location) = location
            {
                if redirect_count >= self.max_redirects {
                    return Err(ScanError::TooManyRedirects(self.max_redirects));
                }
                let next = current
                    .join(&location)
                    .map_err(|e| ScanError::InvalidUrl(format!("{}: {}", location, e)))?;
                debug!("  -> redirect {} to {}", redirect_count + 1, next);
                current = next;
                redirect_count += 1;
                continue;
            }

            // An undecodable failure body must not mask the status the server sent.
            let body = match response.text().await {
                Ok(body) => Some(body),
                Err(e) if status.as_u16() >= 400 => {
                    debug!("Discarding unreadable body from {}: {}", current, e);
                    None
                }
                Err(e) => return Err(e.into()),
            };

            return Ok(FetchOutcome {
                status_code: status.as_u16(),
                final_url: current.to_string(),
                redirect_count,
                body,
            });
        }
    }
}

/// Render a fetch failure the way it appears in reports
pub fn describe_error(error: &ScanError) -> String {
    match error {
        ScanError::HttpError(e) if e.is_timeout() => "Timeout".to_string(),
        ScanError::HttpError(e) if e.is_connect() => CONNECTION_ERROR.to_string(),
        ScanError::HttpError(e) if e.is_decode() => format!("Content encoding error: {}", e),
        other => other.to_string(),
    }
}
