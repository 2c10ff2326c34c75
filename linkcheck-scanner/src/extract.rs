use crate::error::Result;
use crate::result::ExtractedLink;
use scraper::{Html, Selector};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Anchor text longer than this is cut off
pub const MAX_LINK_TEXT_CHARS: usize = 100;

/// Check if URL is external (absolute http or https)
pub fn is_external_link(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// Extract all external `<a href>` links in document order
pub fn extract_links_from_html(html: &str) -> Vec<ExtractedLink> {
    let document = Html::parse_document(html);
    let Ok(link_selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    let mut links = Vec::new();
    for element in document.select(&link_selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        if !is_external_link(href) {
            continue;
        }

        let text: String = element
            .text()
            .collect::<String>()
            .trim()
            .chars()
            .take(MAX_LINK_TEXT_CHARS)
            .collect();

        debug!("Found link: {}", href);
        links.push(ExtractedLink {
            url: href.to_string(),
            text,
        });
    }

    links
}

pub fn extract_links_from_file(path: &Path) -> Result<Vec<ExtractedLink>> {
    let content = fs::read_to_string(path)?;
    Ok(extract_links_from_html(&content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_is_external_link() {
        assert!(is_external_link("https://example.com"));
        assert!(is_external_link("http://example.com/page"));
        assert!(!is_external_link("/relative/page.html"));
        assert!(!is_external_link("#section"));
        assert!(!is_external_link("mailto:someone@example.com"));
        assert!(!is_external_link("ftp://example.com/file"));
    }

    #[test]
    fn test_extracts_only_external_links() {
        let html = r##"<html><body>
            <a href="https://example.com/a">First</a>
            <a href="/local">Local</a>
            <a href="#top">Top</a>
            <a>No href</a>
            <a href="http://example.org/b">Second</a>
        </body></html>"##;

        let links = extract_links_from_html(html);

        assert_eq!(links.len(), 2);
        assert_eq!(links[0].url, "https://example.com/a");
        assert_eq!(links[0].text, "First");
        assert_eq!(links[1].url, "http://example.org/b");
        assert_eq!(links[1].text, "Second");
    }

    #[test]
    fn test_link_text_is_trimmed_and_truncated() {
        let long_text = "x".repeat(250);
        let html = format!(
            r#"<a href="https://example.com/">
                   <span>{}</span>
               </a>"#,
            long_text
        );

        let links = extract_links_from_html(&html);

        assert_eq!(links.len(), 1);
        assert_eq!(links[0].text.chars().count(), MAX_LINK_TEXT_CHARS);
        assert!(links[0].text.starts_with('x'));
    }

    #[test]
    fn test_nested_markup_text() {
        let html = r#"<a href="https://numpy.org/"><code>numpy</code> docs</a>"#;
        let links = extract_links_from_html(html);
        assert_eq!(links[0].text, "numpy docs");
    }

    #[test]
    fn test_extract_links_from_file() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, r#"<p><a href="https://jupyter.org/">Jupyter</a></p>"#)?;

        let links = extract_links_from_file(file.path())?;

        assert_eq!(links.len(), 1);
        assert_eq!(links[0].url, "https://jupyter.org/");
        Ok(())
    }

    #[test]
    fn test_extract_links_from_missing_file() {
        let result = extract_links_from_file(Path::new("/nonexistent/lecture.html"));
        assert!(result.is_err());
    }
}
