use anyhow::{Context, anyhow};
use clap::ArgMatches;
use colored::Colorize;
use linkcheck_core::check::{CheckOptions, execute_check, parse_silent_codes};
use linkcheck_core::report::{
    CheckReport, ReportFormat, ReportMode, format_report, generate_text_report, save_report,
};
use linkcheck_scanner::{DomainLists, is_likely_bot_blocked};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::Level;

// Helper functions for the handlers

/// Install the stderr log subscriber; stdout is reserved for reports
pub fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

/// Expand a leading `~` in a user-supplied path
pub fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}

/// Built-in domain lists extended with the user's additions
pub fn build_domain_lists(bot_domains: &[String], trusted_domains: &[String]) -> DomainLists {
    DomainLists::builtin()
        .with_bot_prone(bot_domains.iter().map(|d| d.trim()).filter(|d| !d.is_empty()))
        .with_legitimate(trusted_domains.iter().map(|d| d.trim()).filter(|d| !d.is_empty()))
}

pub fn parse_report(json: &str) -> anyhow::Result<CheckReport> {
    CheckReport::from_json(json).context("Error parsing JSON report")
}

/// Load a JSON report from a file, or from stdin when no path is given
pub fn read_report(input: Option<&Path>) -> anyhow::Result<CheckReport> {
    let json = match input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read report {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read report from stdin")?;
            buffer
        }
    };
    parse_report(&json)
}

/// Render a finished report in the requested format
pub fn render_report(report: &CheckReport, format: ReportFormat) -> anyhow::Result<String> {
    match format {
        ReportFormat::Json => report.to_json().context("Failed to serialize report"),
        ReportFormat::Text => Ok(generate_text_report(report)),
    }
}

fn strings(args: &ArgMatches, id: &str) -> Vec<String> {
    args.get_many::<String>(id)
        .map(|values| values.cloned().collect())
        .unwrap_or_default()
}

fn fail(error: impl std::fmt::Display) -> ! {
    eprintln!("{} {}", "✗".red().bold(), error);
    std::process::exit(1);
}

pub async fn handle_check(sub_matches: &ArgMatches, quiet: bool) {
    let files: Vec<PathBuf> = strings(sub_matches, "FILE")
        .iter()
        .map(|f| expand_path(f))
        .collect();
    let timeout_secs = *sub_matches.get_one::<u64>("timeout").unwrap_or(&30);
    let max_redirects = *sub_matches.get_one::<usize>("max-redirects").unwrap_or(&5);
    let delay_ms = *sub_matches.get_one::<u64>("delay-ms").unwrap_or(&100);
    let ai_suggestions = sub_matches.get_flag("ai-suggestions");
    let output = sub_matches.get_one::<String>("output").map(|p| expand_path(p));
    let format = sub_matches
        .get_one::<String>("format")
        .and_then(|f| ReportFormat::from_str(f))
        .unwrap_or(ReportFormat::Json);

    let silent_codes = match sub_matches.get_one::<String>("silent-codes") {
        Some(codes) => parse_silent_codes(codes).unwrap_or_else(|e| fail(e)),
        None => Vec::new(),
    };

    let domain_lists = build_domain_lists(
        &strings(sub_matches, "bot-domain"),
        &strings(sub_matches, "trusted-domain"),
    );

    let options = CheckOptions {
        files,
        timeout_secs,
        max_redirects,
        silent_codes,
        delay: Duration::from_millis(delay_ms),
        ai_suggestions,
        show_progress_bars: !quiet,
        domain_lists,
    };

    let progress_callback = if quiet {
        None
    } else {
        let callback: linkcheck_core::check::CheckProgressCallback =
            Arc::new(|msg: String| eprintln!("{}", msg));
        Some(callback)
    };

    let report = match execute_check(options, progress_callback).await {
        Ok(report) => report,
        Err(e) => fail(format!("Link check failed: {}", e)),
    };

    let rendered = render_report(&report, format).unwrap_or_else(|e| fail(format!("{:#}", e)));

    match output {
        Some(path) => {
            if let Err(e) = save_report(&rendered, &path) {
                fail(format!("Failed to write report {}: {}", path.display(), e));
            }
            if !quiet {
                eprintln!(
                    "{} Report saved to {}",
                    "✓".green().bold(),
                    path.display().to_string().bright_white()
                );
            }
        }
        None => println!("{}", rendered),
    }

    if !quiet {
        let broken = report.broken_results.len();
        let broken_str = if broken == 0 {
            broken.to_string().green()
        } else {
            broken.to_string().red().bold()
        };
        eprintln!(
            "{} Checked {} links: {} broken, {} redirected",
            "✓".green().bold(),
            report.total_links.to_string().cyan(),
            broken_str,
            report.redirect_results.len().to_string().cyan()
        );
    }
}

pub fn handle_format(sub_matches: &ArgMatches) {
    let mode = sub_matches
        .get_one::<String>("MODE")
        .and_then(|m| ReportMode::from_str(m))
        .unwrap_or_else(|| fail(anyhow!("Unknown mode (expected broken, redirect or ai)")));
    let input = sub_matches.get_one::<String>("input").map(|p| expand_path(p));

    match read_report(input.as_deref()) {
        Ok(report) => println!("{}", format_report(&report, mode)),
        Err(e) => fail(format!("{:#}", e)),
    }
}

pub fn handle_classify(sub_matches: &ArgMatches) {
    let Some(url) = sub_matches.get_one::<String>("URL") else {
        fail("A URL is required");
    };
    let status_code = sub_matches.get_one::<u16>("status").copied();
    let error = sub_matches.get_one::<String>("error").map(String::as_str);

    println!("{}", is_likely_bot_blocked(url, None, status_code, error));
}
