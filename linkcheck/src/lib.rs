// Include handlers module directly from handlers.rs
#[path = "handlers.rs"]
pub mod handlers;

// Re-export commonly used handler functions for convenience
pub use handlers::{build_domain_lists, expand_path, parse_report, read_report, render_report};

// Re-export check functionality from linkcheck-core
pub use linkcheck_core::check::{
    CheckOptions, CheckProgressCallback, execute_check, parse_silent_codes,
};
pub use linkcheck_core::report::{CheckReport, ReportFormat, ReportMode};

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);
