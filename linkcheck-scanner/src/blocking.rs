//! Bot-blocking heuristics.
//!
//! Many large sites refuse or throttle automated clients. A failed check
//! against one of them says little about whether the link is dead, so the
//! checker asks [`is_likely_bot_blocked`] before reporting a failure.
//!
//! Rules, first match wins:
//!
//! 1. the URL contains a bot-prone domain;
//! 2. the URL contains a trusted domain and the error is a connection error;
//! 3. the error mentions an encoding failure;
//! 4. the status is 429, 451 or 503.

/// Sites that routinely block or challenge automated clients.
pub const BOT_PRONE_DOMAINS: &[&str] = &[
    "netflix.com",
    "amazon.com",
    "wikipedia.org",
    "facebook.com",
    "twitter.com",
    "linkedin.com",
    "instagram.com",
    "youtube.com",
    "tiktok.com",
    "reddit.com",
    "pinterest.com",
    "quora.com",
    "medium.com",
    "glassdoor.com",
    "yelp.com",
];

/// Technical and documentation sites whose connection failures are almost
/// always caused by network restrictions on the runner.
pub const LEGITIMATE_DOMAINS: &[&str] = &[
    "python.org",
    "jupyter.org",
    "github.com",
    "githubusercontent.com",
    "numpy.org",
    "scipy.org",
    "matplotlib.org",
    "pydata.org",
    "readthedocs.io",
    "readthedocs.org",
    "anaconda.com",
    "stackoverflow.com",
    "julialang.org",
];

/// Rate limited, unavailable for legal reasons, service unavailable.
pub const BLOCKING_STATUS_CODES: &[u16] = &[429, 451, 503];

/// Error text recorded for failed TCP/TLS connections.
pub const CONNECTION_ERROR: &str = "Connection Error";

/// The outcome of one link fetch, as seen by the classifier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkCheckInput<'a> {
    pub url: &'a str,
    pub response_body: Option<&'a str>,
    pub status_code: Option<u16>,
    pub error: Option<&'a str>,
}

impl<'a> LinkCheckInput<'a> {
    pub fn new(url: &'a str) -> Self {
        Self {
            url,
            ..Default::default()
        }
    }

    pub fn with_response_body(mut self, body: &'a str) -> Self {
        self.response_body = Some(body);
        self
    }

    pub fn with_status_code(mut self, status_code: u16) -> Self {
        self.status_code = Some(status_code);
        self
    }

    pub fn with_error(mut self, error: &'a str) -> Self {
        self.error = Some(error);
        self
    }
}

/// Domain substrings consulted by the classifier.
///
/// Defaults to [`BOT_PRONE_DOMAINS`] and [`LEGITIMATE_DOMAINS`]; callers
/// can append their own entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainLists {
    pub bot_prone: Vec<String>,
    pub legitimate: Vec<String>,
}

impl DomainLists {
    pub fn builtin() -> Self {
        Self {
            bot_prone: BOT_PRONE_DOMAINS.iter().map(|d| d.to_string()).collect(),
            legitimate: LEGITIMATE_DOMAINS.iter().map(|d| d.to_string()).collect(),
        }
    }

    pub fn with_bot_prone<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.bot_prone.extend(domains.into_iter().map(Into::into));
        self
    }

    pub fn with_legitimate<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.legitimate.extend(domains.into_iter().map(Into::into));
        self
    }

    pub fn classify(&self, input: &LinkCheckInput<'_>) -> bool {
        classify_with(input, &self.bot_prone, &self.legitimate)
    }
}

impl Default for DomainLists {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Classify a failed fetch against the built-in domain lists.
///
/// Returns `true` when the failure looks like an anti-automation defense
/// rather than a dead link.
pub fn is_likely_bot_blocked(
    url: &str,
    response_body: Option<&str>,
    status_code: Option<u16>,
    error: Option<&str>,
) -> bool {
    let input = LinkCheckInput {
        url,
        response_body,
        status_code,
        error,
    };
    classify_with(&input, BOT_PRONE_DOMAINS, LEGITIMATE_DOMAINS)
}

fn classify_with<B, L>(input: &LinkCheckInput<'_>, bot_prone: &[B], legitimate: &[L]) -> bool
where
    B: AsRef<str>,
    L: AsRef<str>,
{
    if contains_any(input.url, bot_prone) {
        return true;
    }

    if contains_any(input.url, legitimate)
        && input.error.is_some_and(|e| e.contains(CONNECTION_ERROR))
    {
        return true;
    }

    if input
        .error
        .is_some_and(|e| e.to_lowercase().contains("encoding"))
    {
        return true;
    }

    input
        .status_code
        .is_some_and(|code| BLOCKING_STATUS_CODES.contains(&code))
}

fn contains_any<S: AsRef<str>>(url: &str, domains: &[S]) -> bool {
    domains.iter().any(|d| url.contains(d.as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bot_prone_domains_are_blocked() {
        assert!(is_likely_bot_blocked("https://www.netflix.com/", None, None, None));
        assert!(is_likely_bot_blocked("https://www.amazon.com/", None, None, None));
        assert!(is_likely_bot_blocked(
            "https://www.wikipedia.org/wiki/Test",
            None,
            None,
            None
        ));
    }

    #[test]
    fn test_bot_prone_wins_over_everything_else() {
        for domain in BOT_PRONE_DOMAINS {
            let url = format!("https://www.{}/some/page", domain);
            assert!(is_likely_bot_blocked(&url, None, Some(200), None), "{}", url);
            assert!(is_likely_bot_blocked(&url, None, Some(404), Some("timeout")), "{}", url);
        }
    }

    #[test]
    fn test_ordinary_domains_are_not_blocked() {
        assert!(!is_likely_bot_blocked("https://example.com/", None, None, None));
        assert!(!is_likely_bot_blocked(
            "https://code.tutsplus.com/tutorial/something",
            None,
            None,
            None
        ));
        assert!(!is_likely_bot_blocked("https://github.com/user/repo", None, None, None));
    }

    #[test]
    fn test_legitimate_domain_with_connection_error() {
        for url in [
            "https://www.python.org/",
            "https://jupyter.org/",
            "https://docs.python.org/3/",
            "https://github.com/user/repo",
        ] {
            assert!(is_likely_bot_blocked(url, None, None, Some("Connection Error")), "{}", url);
            assert!(!is_likely_bot_blocked(url, None, None, None), "{}", url);
        }
    }

    #[test]
    fn test_connection_error_match_is_a_substring() {
        assert!(is_likely_bot_blocked(
            "https://numpy.org/doc/",
            None,
            None,
            Some("Connection Error: refused")
        ));
    }

    #[test]
    fn test_unknown_domain_with_connection_error() {
        assert!(!is_likely_bot_blocked(
            "https://unknown-domain.com/",
            None,
            None,
            Some("Connection Error")
        ));
    }

    #[test]
    fn test_legitimate_domain_with_other_error() {
        assert!(!is_likely_bot_blocked(
            "https://www.python.org/",
            None,
            None,
            Some("Timeout")
        ));
    }

    #[test]
    fn test_encoding_errors() {
        assert!(is_likely_bot_blocked(
            "https://example.com/",
            None,
            None,
            Some("some encoding problem")
        ));
        assert!(is_likely_bot_blocked(
            "https://example.com/",
            None,
            None,
            Some("Content-Encoding mismatch")
        ));
        assert!(!is_likely_bot_blocked("https://example.com/", None, None, Some("timeout")));
    }

    #[test]
    fn test_blocking_status_codes() {
        for code in [429, 451, 503] {
            assert!(is_likely_bot_blocked("https://example.com/", None, Some(code), None));
        }
        for code in [200, 404, 500] {
            assert!(!is_likely_bot_blocked("https://example.com/", None, Some(code), None));
        }
    }

    #[test]
    fn test_response_body_does_not_trigger() {
        assert!(!is_likely_bot_blocked(
            "https://example.com/",
            Some("<html>Access denied: are you a robot?</html>"),
            Some(404),
            None
        ));
    }

    #[test]
    fn test_domain_lists_defaults_match_free_function() {
        let lists = DomainLists::default();
        let cases = [
            LinkCheckInput::new("https://www.netflix.com/"),
            LinkCheckInput::new("https://example.com/"),
            LinkCheckInput::new("https://www.python.org/").with_error("Connection Error"),
            LinkCheckInput::new("https://example.com/").with_status_code(429),
            LinkCheckInput::new("https://example.com/").with_response_body("<p>gone</p>"),
        ];
        for input in cases {
            assert_eq!(
                lists.classify(&input),
                is_likely_bot_blocked(
                    input.url,
                    input.response_body,
                    input.status_code,
                    input.error
                ),
                "{:?}",
                input
            );
        }
    }

    #[test]
    fn test_domain_lists_extension() {
        let lists = DomainLists::builtin()
            .with_bot_prone(["tutsplus.com"])
            .with_legitimate(vec!["quantitative.example".to_string()]);

        assert!(lists.classify(&LinkCheckInput::new("https://code.tutsplus.com/x")));
        assert!(
            lists.classify(
                &LinkCheckInput::new("https://quantitative.example/").with_error("Connection Error")
            )
        );
        assert!(!lists.classify(&LinkCheckInput::new("https://quantitative.example/")));
    }

    #[test]
    fn test_domain_on_both_lists_is_bot_blocked() {
        let lists = DomainLists::builtin().with_bot_prone(["python.org"]);
        assert!(lists.classify(&LinkCheckInput::new("https://www.python.org/")));
    }
}
