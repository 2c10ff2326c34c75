// Report model and formatters

use crate::suggest::Suggestion;
use linkcheck_scanner::result::LinkCheckResult;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Output format of `linkcheck check`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportFormat {
    Json,
    Text,
}

impl ReportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(ReportFormat::Json),
            "text" | "txt" => Some(ReportFormat::Text),
            _ => None,
        }
    }
}

/// Section of a report rendered by `linkcheck format`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportMode {
    Broken,
    Redirect,
    Ai,
}

impl ReportMode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "broken" => Some(ReportMode::Broken),
            "redirect" | "redirects" => Some(ReportMode::Redirect),
            "ai" => Some(ReportMode::Ai),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckReport {
    pub broken_results: Vec<LinkCheckResult>,
    pub redirect_results: Vec<LinkCheckResult>,
    pub ai_suggestions: Vec<Suggestion>,
    pub total_links: usize,
}

impl CheckReport {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

pub fn format_broken_results(report: &CheckReport) -> String {
    let mut lines = Vec::new();
    for result in &report.broken_results {
        let error_info = result
            .error
            .as_ref()
            .map(|e| format!(" ({})", e))
            .unwrap_or_default();
        lines.push(format!(
            "❌ {} - Status: {}{}",
            result.url, result.status_code, error_info
        ));
        if !result.text.is_empty() {
            lines.push(format!("   Link text: {}", result.text));
        }
    }
    lines.join("\n")
}

pub fn format_redirect_results(report: &CheckReport) -> String {
    report
        .redirect_results
        .iter()
        .map(|r| {
            format!(
                "🔄 {} -> {} ({} redirects)",
                r.url, r.final_url, r.redirect_count
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_ai_suggestions(report: &CheckReport) -> String {
    let mut lines = Vec::new();
    for suggestion in &report.ai_suggestions {
        lines.push(format!("🤖 {}", suggestion.original_url));
        lines.push(format!("   Issue: {}", suggestion.issue));
        for fix in &suggestion.suggestions {
            lines.push(format!("   💡 {}: {}", fix.fix_type.as_str(), fix.url));
            lines.push(format!("      Reason: {}", fix.reason));
        }
    }
    lines.join("\n")
}

pub fn format_report(report: &CheckReport, mode: ReportMode) -> String {
    match mode {
        ReportMode::Broken => format_broken_results(report),
        ReportMode::Redirect => format_redirect_results(report),
        ReportMode::Ai => format_ai_suggestions(report),
    }
}

pub fn generate_text_report(report: &CheckReport) -> String {
    let mut text = String::new();

    text.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
    text.push_str("                  LINK CHECK REPORT\n");
    text.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");

    text.push_str(&format!(
        "Generated:    {}\n",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    ));
    text.push_str(&format!("Links:        {}\n", report.total_links));
    text.push_str(&format!("Broken:       {}\n", report.broken_results.len()));
    text.push_str(&format!("Redirected:   {}\n", report.redirect_results.len()));
    text.push_str(&format!("Suggestions:  {}\n", report.ai_suggestions.len()));

    let sections = [
        ("BROKEN LINKS", format_broken_results(report)),
        ("REDIRECTS", format_redirect_results(report)),
        ("SUGGESTIONS", format_ai_suggestions(report)),
    ];

    for (title, body) in sections {
        if body.is_empty() {
            continue;
        }
        text.push_str("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
        text.push_str(title);
        text.push_str("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");
        text.push_str(&body);
        text.push('\n');
    }

    if report.broken_results.is_empty() {
        text.push_str("\nNo broken links found.\n");
    }

    text
}

pub fn save_report(content: &str, path: &Path) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}
