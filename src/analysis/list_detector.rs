//! List detection from leading markers.

use regex::Regex;

use crate::error::{Error, Result};
use crate::model::{List, ListItem, ListType, TextFragment};

use super::options::ListConfig;

const NUMBERED_PATTERN: &str =
    r"(?s)^\s*(\(\d{1,3}\)|(?:\d{1,3}|[a-zA-Z]|[ivxlcdmIVXLCDM]{1,6})[.)])\s+(\S.*)$";

/// Detects bulleted, numbered and checkbox lists.
///
/// Fragments are scanned top to bottom; consecutive fragments carrying the
/// same kind of marker form one list.
#[derive(Debug, Clone)]
pub struct ListDetector {
    config: ListConfig,
    checkbox: Regex,
    bullet: Regex,
    numbered: Regex,
}

impl Default for ListDetector {
    fn default() -> Self {
        Self::with_config(ListConfig::default()).expect("default list patterns are valid")
    }
}

impl ListDetector {
    /// Create a new list detector with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a list detector with custom configuration.
    pub fn with_config(config: ListConfig) -> Result<Self> {
        let bullets: String = config
            .bullet_characters
            .iter()
            .map(|c| regex::escape(&c.to_string()))
            .collect();

        let checkbox = compile(
            "checkbox",
            &format!(r"(?s)^\s*(?:[{}]\s*)?(\[[ xX✓]\]|[☐☑☒])\s+(\S.*)$", bullets),
        )?;
        let bullet = compile("bullet", &format!(r"(?s)^\s*([{}])\s+(\S.*)$", bullets))?;
        let numbered = compile("numbered", NUMBERED_PATTERN)?;

        Ok(Self {
            config,
            checkbox,
            bullet,
            numbered,
        })
    }

    /// Detect lists among the given fragments.
    pub fn detect(&self, fragments: &[TextFragment]) -> Vec<List> {
        let mut ordered: Vec<&TextFragment> = fragments.iter().collect();
        ordered.sort_by(|a, b| {
            b.bounding_box
                .max_y()
                .total_cmp(&a.bounding_box.max_y())
                .then_with(|| a.bounding_box.min_x().total_cmp(&b.bounding_box.min_x()))
        });

        let mut lists = Vec::new();
        let mut open: Option<(ListType, Vec<ListItem>)> = None;

        for fragment in ordered {
            match self.classify(fragment) {
                Some((list_type, item)) => match open.as_mut() {
                    Some((current, items)) if *current == list_type => items.push(item),
                    _ => {
                        lists.extend(self.flush(open.take()));
                        open = Some((list_type, vec![item]));
                    }
                },
                None => lists.extend(self.flush(open.take())),
            }
        }
        lists.extend(self.flush(open.take()));

        log::debug!("ListDetector: found {} lists", lists.len());
        lists
    }

    /// Classify a fragment's leading marker.
    fn classify(&self, fragment: &TextFragment) -> Option<(ListType, ListItem)> {
        let text = fragment.text.as_str();

        if let Some(caps) = self.checkbox.captures(text) {
            let marker = caps.get(1)?.as_str();
            let body = caps.get(2)?.as_str().trim();
            let checked = marker.contains(['x', 'X', '✓', '☑', '☒']);
            let item = ListItem::from_fragment(fragment, marker, body).with_checked(checked);
            return Some((ListType::Checkbox, item));
        }

        if let Some(caps) = self.bullet.captures(text) {
            let item = ListItem::from_fragment(
                fragment,
                caps.get(1)?.as_str(),
                caps.get(2)?.as_str().trim(),
            );
            return Some((ListType::Unordered, item));
        }

        if let Some(caps) = self.numbered.captures(text) {
            let item = ListItem::from_fragment(
                fragment,
                caps.get(1)?.as_str(),
                caps.get(2)?.as_str().trim(),
            );
            return Some((ListType::Ordered, item));
        }

        log::trace!("ListDetector: no marker in fragment {}", fragment.id);
        None
    }

    fn flush(&self, open: Option<(ListType, Vec<ListItem>)>) -> Option<List> {
        let (list_type, items) = open?;
        if items.len() < self.config.minimum_items {
            log::trace!(
                "ListDetector: dropping {:?} run of {} items",
                list_type,
                items.len()
            );
            return None;
        }
        List::from_items(list_type, items)
    }
}

fn compile(name: &str, pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|source| Error::InvalidPattern {
        name: name.to_string(),
        source,
    })
}
