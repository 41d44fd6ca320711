//! Link extraction from fragment text.
//!
//! Every pattern runs independently over every fragment, so one span of text
//! may be reported as more than one kind of link. Link boxes are the box of
//! the containing fragment.

use regex::{Regex, RegexBuilder};

use crate::error::{Error, Result};
use crate::model::{Link, LinkType, TextFragment};

use super::options::LinkConfig;

const URL_PATTERN: &str = r#"\bhttps?://[^\s<>"]*[^\s<>".,;:!?)\]]"#;
const WWW_PATTERN: &str = r#"\bwww\.[^\s<>"]*[^\s<>".,;:!?)\]]"#;
const EMAIL_PATTERN: &str = r"\b[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}\b";
const PHONE_PATTERN: &str = r"(?:\+?\d{1,3}[\s.-]?)?\(?\d{3}\)?[\s.-]?\d{3}[\s.-]?\d{4}\b";
const FILE_PATTERN: &str = r"^\s*(file://\S+|/[^\s/]+(?:/\S*)?|[A-Z]:\\\S*)";

#[derive(Debug, Clone)]
struct LinkPattern {
    link_type: LinkType,
    regex: Regex,
}

/// Extracts URLs, email addresses, phone numbers and file paths.
#[derive(Debug, Clone)]
pub struct LinkDetector {
    patterns: Vec<LinkPattern>,
}

impl Default for LinkDetector {
    fn default() -> Self {
        Self::with_config(LinkConfig::default()).expect("built-in link patterns are valid")
    }
}

impl LinkDetector {
    /// Create a new link detector with the built-in patterns.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a link detector with extra custom patterns.
    ///
    /// Custom patterns are matched case-insensitively after the built-in ones
    /// and report their matches as [`LinkType::Unknown`].
    pub fn with_config(config: LinkConfig) -> Result<Self> {
        let builtin = [
            ("url", LinkType::Url, URL_PATTERN),
            ("www", LinkType::Url, WWW_PATTERN),
            ("email", LinkType::Email, EMAIL_PATTERN),
            ("phone", LinkType::Phone, PHONE_PATTERN),
            ("file", LinkType::File, FILE_PATTERN),
        ];

        let mut patterns = Vec::with_capacity(builtin.len() + config.custom_patterns.len());
        for (name, link_type, pattern) in builtin {
            patterns.push(LinkPattern {
                link_type,
                regex: compile(name, pattern)?,
            });
        }
        for custom in &config.custom_patterns {
            patterns.push(LinkPattern {
                link_type: LinkType::Unknown,
                regex: compile(&custom.name, &custom.pattern)?,
            });
        }

        Ok(Self { patterns })
    }

    /// Detect links in fragments, in fragment input order.
    pub fn detect(&self, fragments: &[TextFragment]) -> Vec<Link> {
        let links: Vec<Link> = fragments
            .iter()
            .flat_map(|fragment| self.detect_in(fragment))
            .collect();

        log::debug!("LinkDetector: found {} links", links.len());
        links
    }

    /// Links in one fragment, by start offset then pattern order.
    fn detect_in(&self, fragment: &TextFragment) -> Vec<Link> {
        let mut matches: Vec<(usize, usize, Link)> = Vec::new();

        for (order, pattern) in self.patterns.iter().enumerate() {
            for m in pattern.regex.find_iter(&fragment.text) {
                let text = m.as_str().trim();
                if text.is_empty() {
                    continue;
                }
                matches.push((
                    m.start(),
                    order,
                    Link {
                        text: text.to_string(),
                        link_type: pattern.link_type,
                        url: canonical_url(pattern.link_type, text),
                        bounding_box: fragment.bounding_box,
                        fragment_id: fragment.id.clone(),
                    },
                ));
            }
        }

        matches.sort_by_key(|(start, order, _)| (*start, *order));
        matches.into_iter().map(|(_, _, link)| link).collect()
    }
}

/// Canonical target for a matched link.
pub fn canonical_url(link_type: LinkType, text: &str) -> String {
    match link_type {
        LinkType::Url if text.to_ascii_lowercase().starts_with("www.") => {
            format!("https://{}", text)
        }
        LinkType::Email => format!("mailto:{}", text),
        LinkType::Phone => {
            let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
            format!("tel:{}", digits)
        }
        _ => text.to_string(),
    }
}

fn compile(name: &str, pattern: &str) -> Result<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|source| Error::InvalidPattern {
            name: name.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::options::CustomLinkPattern;
    use crate::model::BoundingBox;

    fn fragment(id: &str, text: &str) -> TextFragment {
        TextFragment::new(id, text, BoundingBox::new(0.1, 0.5, 0.6, 0.02), 0.9)
    }

    #[test]
    fn test_email_and_url() {
        let f = fragment("f1", "Contact a@b.com or visit https://x.io");
        let links = LinkDetector::new().detect(std::slice::from_ref(&f));

        assert_eq!(links.len(), 2);
        assert_eq!(links[0].link_type, LinkType::Email);
        assert_eq!(links[0].url, "mailto:a@b.com");
        assert_eq!(links[1].link_type, LinkType::Url);
        assert_eq!(links[1].url, "https://x.io");
        assert!(links.iter().all(|l| l.bounding_box == f.bounding_box));
        assert!(links.iter().all(|l| l.fragment_id == "f1"));
    }

    #[test]
    fn test_trailing_punctuation_excluded() {
        let links = LinkDetector::new().detect(&[fragment("f", "See https://example.com/docs.")]);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].text, "https://example.com/docs");
    }

    #[test]
    fn test_www_canonical() {
        let links = LinkDetector::new().detect(&[fragment("f", "Go to WWW.Example.org today")]);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].url, "https://WWW.Example.org");
    }

    #[test]
    fn test_phone_canonical() {
        let links = LinkDetector::new().detect(&[fragment("f", "Call (555) 123-4567 now")]);
        let phone = links.iter().find(|l| l.link_type == LinkType::Phone).unwrap();
        assert_eq!(phone.url, "tel:5551234567");
    }

    #[test]
    fn test_file_paths() {
        let detector = LinkDetector::new();
        let links = detector.detect(&[
            fragment("a", "/usr/local/bin/tool"),
            fragment("b", r"C:\Users\report.docx"),
            fragment("c", "file:///tmp/x.txt"),
            fragment("d", "path is /usr/bin"),
        ]);

        let files: Vec<&str> = links
            .iter()
            .filter(|l| l.link_type == LinkType::File)
            .map(|l| l.fragment_id.as_str())
            .collect();
        assert_eq!(files, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_custom_pattern() {
        let detector = LinkDetector::with_config(LinkConfig {
            custom_patterns: vec![CustomLinkPattern {
                name: "ticket".to_string(),
                pattern: r"\bJIRA-\d+\b".to_string(),
            }],
        })
        .unwrap();

        let links = detector.detect(&[fragment("f", "Fixed in jira-42")]);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].link_type, LinkType::Unknown);
        assert_eq!(links[0].url, "jira-42");
    }

    #[test]
    fn test_invalid_custom_pattern() {
        let result = LinkDetector::with_config(LinkConfig {
            custom_patterns: vec![CustomLinkPattern {
                name: "broken".to_string(),
                pattern: "(unclosed".to_string(),
            }],
        });
        assert!(matches!(result, Err(Error::InvalidPattern { ref name, .. }) if name == "broken"));
    }

    #[test]
    fn test_no_links() {
        assert!(LinkDetector::new().detect(&[fragment("f", "Nothing here")]).is_empty());
        assert!(LinkDetector::new().detect(&[]).is_empty());
    }
}
