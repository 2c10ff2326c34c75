// Rule-based remediation suggestions for broken and redirected links

use linkcheck_scanner::result::LinkCheckResult;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixType {
    BranchUpdate,
    HttpsUpgrade,
    VersionUpdate,
    RedirectUpdate,
}

impl FixType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FixType::BranchUpdate => "branch_update",
            FixType::HttpsUpgrade => "https_upgrade",
            FixType::VersionUpdate => "version_update",
            FixType::RedirectUpdate => "redirect_update",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestedFix {
    #[serde(rename = "type")]
    pub fix_type: FixType,
    pub url: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub original_url: String,
    pub issue: String,
    pub suggestions: Vec<SuggestedFix>,
}

fn fix(fix_type: FixType, url: String, reason: &str) -> SuggestedFix {
    SuggestedFix {
        fix_type,
        url,
        reason: reason.to_string(),
    }
}

fn https_upgrade(url: &str, reason: &str) -> SuggestedFix {
    fix(FixType::HttpsUpgrade, url.replace("http://", "https://"), reason)
}

pub fn suggest_for_broken(result: &LinkCheckResult) -> Option<Suggestion> {
    if result.bot_blocked {
        return None;
    }

    let url = result.url.as_str();
    let mut fixes = Vec::new();

    if url.contains("github.com") {
        if url.contains("/blob/master/") {
            fixes.push(fix(
                FixType::BranchUpdate,
                url.replace("/blob/master/", "/blob/main/"),
                "GitHub default branch changed from master to main",
            ));
        }
    } else if url.contains("github.io") {
        if url.contains("http://") {
            fixes.push(https_upgrade(url, "GitHub Pages now requires HTTPS"));
        }
    } else if url.contains("readthedocs.org") {
        if url.contains("http://") {
            fixes.push(https_upgrade(url, "Read the Docs now requires HTTPS"));
        }
    } else if url.contains("docs.python.org") {
        if url.contains("/2.7/") {
            fixes.push(fix(
                FixType::VersionUpdate,
                url.replace("/2.7/", "/3/"),
                "Python 2.7 is deprecated, consider Python 3 documentation",
            ));
        }
    } else if url.starts_with("http://") && !url.contains("localhost") {
        fixes.push(https_upgrade(
            url,
            "HTTPS is more secure and widely supported",
        ));
    }

    if fixes.is_empty() {
        return None;
    }

    Some(Suggestion {
        original_url: result.url.clone(),
        issue: format!("Broken link (Status: {})", result.status_code),
        suggestions: fixes,
    })
}

pub fn suggest_for_redirect(result: &LinkCheckResult) -> Option<Suggestion> {
    if result.redirect_count == 0 || result.bot_blocked {
        return None;
    }

    Some(Suggestion {
        original_url: result.url.clone(),
        issue: format!("Redirected {} times", result.redirect_count),
        suggestions: vec![SuggestedFix {
            fix_type: FixType::RedirectUpdate,
            url: result.final_url.clone(),
            reason: format!(
                "Update to final destination to avoid {} redirect(s)",
                result.redirect_count
            ),
        }],
    })
}

pub fn generate_suggestions(
    broken_results: &[LinkCheckResult],
    redirect_results: &[LinkCheckResult],
) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();

    suggestions.extend(broken_results.iter().filter_map(suggest_for_broken));
    suggestions.extend(redirect_results.iter().filter_map(suggest_for_redirect));

    suggestions
}
