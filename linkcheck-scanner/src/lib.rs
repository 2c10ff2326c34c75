pub mod blocking;
pub mod checker;
pub mod error;
pub mod extract;
pub mod result;

pub use blocking::{DomainLists, LinkCheckInput, is_likely_bot_blocked};
pub use checker::LinkChecker;
pub use error::ScanError;
pub use result::{ExtractedLink, LinkCheckResult};
