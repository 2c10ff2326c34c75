use crate::report::CheckReport;
use crate::suggest::generate_suggestions;
use indicatif::{ProgressBar, ProgressStyle};
use linkcheck_scanner::checker::{
    DEFAULT_MAX_REDIRECTS, DEFAULT_SILENT_CODES, DEFAULT_TIMEOUT_SECS,
};
use linkcheck_scanner::error::ScanError;
use linkcheck_scanner::extract::extract_links_from_file;
use linkcheck_scanner::{DomainLists, LinkChecker};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

pub const DEFAULT_DELAY: Duration = Duration::from_millis(100);

/// Options for configuring a check run
pub struct CheckOptions {
    pub files: Vec<PathBuf>,
    pub timeout_secs: u64,
    pub max_redirects: usize,
    pub silent_codes: Vec<u16>,
    /// Pause between consecutive requests
    pub delay: Duration,
    pub ai_suggestions: bool,
    pub show_progress_bars: bool,
    pub domain_lists: DomainLists,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            files: Vec::new(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_redirects: DEFAULT_MAX_REDIRECTS,
            silent_codes: DEFAULT_SILENT_CODES.to_vec(),
            delay: DEFAULT_DELAY,
            ai_suggestions: false,
            show_progress_bars: false,
            domain_lists: DomainLists::builtin(),
        }
    }
}

/// Callback for reporting check progress
pub type CheckProgressCallback = Arc<dyn Fn(String) + Send + Sync>;

/// Parse a comma-separated list of status codes, e.g. `"403,503"`
pub fn parse_silent_codes(codes: &str) -> Result<Vec<u16>, String> {
    codes
        .split(',')
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(|code| {
            code.parse::<u16>()
                .map_err(|_| format!("Invalid status code '{}'", code))
        })
        .collect()
}

/// Check every external link in the given files, one request at a time
pub async fn execute_check(
    options: CheckOptions,
    progress_callback: Option<CheckProgressCallback>,
) -> Result<CheckReport, ScanError> {
    let CheckOptions {
        files,
        timeout_secs,
        max_redirects,
        silent_codes,
        delay,
        ai_suggestions,
        show_progress_bars,
        domain_lists,
    } = options;

    let checker = LinkChecker::with_timeout(timeout_secs)?
        .with_max_redirects(max_redirects)
        .with_silent_codes(silent_codes)
        .with_domain_lists(domain_lists);

    let progress_bar = if show_progress_bars {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message("Starting link check...");
        Some(pb)
    } else {
        None
    };

    let mut report = CheckReport::default();
    let mut requests_sent = 0usize;

    for file in &files {
        let links = match extract_links_from_file(file) {
            Ok(links) => links,
            Err(e) => {
                warn!("Error parsing {}: {}", file.display(), e);
                if let Some(ref callback) = progress_callback {
                    callback(format!("[!] Error parsing {}: {}", file.display(), e));
                }
                continue;
            }
        };

        report.total_links += links.len();
        if links.is_empty() {
            debug!("No external links in {}", file.display());
            continue;
        }

        if let Some(ref callback) = progress_callback {
            callback(format!(
                "Checking {} links in {}...",
                links.len(),
                file.display()
            ));
        }

        for link in links {
            if requests_sent > 0 && !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            requests_sent += 1;

            if let Some(ref pb) = progress_bar {
                pb.set_message(format!("[{}] {}", requests_sent, link.url));
                pb.tick();
            }

            let mut result = checker.check(&link.url).await;
            result.file = Some(file.display().to_string());
            result.text = link.text;

            if result.is_reportable() {
                info!("Broken link: {} ({})", result.url, result.status_code);
                report.broken_results.push(result);
            } else if result.redirected {
                report.redirect_results.push(result);
            } else if result.broken {
                debug!("Suppressed failure for {}", result.url);
            }
        }
    }

    if ai_suggestions {
        report.ai_suggestions =
            generate_suggestions(&report.broken_results, &report.redirect_results);
    }

    if let Some(ref pb) = progress_bar {
        pb.finish_with_message(format!(
            "Link check complete! {} links, {} broken",
            report.total_links,
            report.broken_results.len()
        ));
    }

    Ok(report)
}
