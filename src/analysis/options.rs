//! Analysis options and per-detector configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Options for structure analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnalysisOptions {
    /// Line, column and paragraph grouping
    pub layout: LayoutConfig,

    /// Heading classification
    pub headings: HeadingConfig,

    /// Table inference
    pub tables: TableDetectorConfig,

    /// List detection
    pub lists: ListConfig,

    /// Link extraction
    pub links: LinkConfig,

    /// Whether to use parallel processing
    pub parallel: bool,
}

impl AnalysisOptions {
    /// Create new analysis options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set layout configuration.
    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    /// Set heading configuration.
    pub fn with_headings(mut self, headings: HeadingConfig) -> Self {
        self.headings = headings;
        self
    }

    /// Set table detector configuration.
    pub fn with_tables(mut self, tables: TableDetectorConfig) -> Self {
        self.tables = tables;
        self
    }

    /// Set list detector configuration.
    pub fn with_lists(mut self, lists: ListConfig) -> Self {
        self.lists = lists;
        self
    }

    /// Set link detector configuration.
    pub fn with_links(mut self, links: LinkConfig) -> Self {
        self.links = links;
        self
    }

    /// Add a custom link pattern. Matches are reported as `unknown` links.
    pub fn with_link_pattern(mut self, name: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.links.custom_patterns.push(CustomLinkPattern {
            name: name.into(),
            pattern: pattern.into(),
        });
        self
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Check numeric settings for values the detectors cannot work with.
    pub fn validate(&self) -> Result<()> {
        let layout = &self.layout;
        ensure_non_negative("layout.lineThreshold", layout.line_threshold)?;
        ensure_non_negative("layout.minimumGutterWidth", layout.minimum_gutter_width)?;
        ensure_non_negative("layout.gutterClusterTolerance", layout.gutter_cluster_tolerance)?;
        ensure_non_negative("layout.paragraphMaxGap", layout.paragraph_max_gap)?;
        ensure_non_negative(
            "layout.paragraphAlignmentTolerance",
            layout.paragraph_alignment_tolerance,
        )?;
        if layout.paragraph_overlap_tolerance > layout.paragraph_max_gap {
            return Err(Error::InvalidConfig(
                "layout.paragraphOverlapTolerance must not exceed layout.paragraphMaxGap"
                    .to_string(),
            ));
        }

        ensure_non_negative("headings.sizeThreshold", self.headings.size_threshold)?;
        ensure_non_negative("headings.heightTolerance", self.headings.height_tolerance)?;
        if !(1..=6).contains(&self.headings.max_levels) {
            return Err(Error::InvalidConfig(format!(
                "headings.maxLevels must be between 1 and 6, got {}",
                self.headings.max_levels
            )));
        }

        ensure_at_least_one("tables.minimumRows", self.tables.minimum_rows)?;
        ensure_at_least_one("tables.minimumColumns", self.tables.minimum_columns)?;
        ensure_non_negative("tables.alignmentTolerance", self.tables.alignment_tolerance)?;
        ensure_non_negative("tables.headerHeightRatio", self.tables.header_height_ratio)?;

        ensure_at_least_one("lists.minimumItems", self.lists.minimum_items)?;
        if self.lists.bullet_characters.is_empty() {
            return Err(Error::InvalidConfig(
                "lists.bulletCharacters must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            headings: HeadingConfig::default(),
            tables: TableDetectorConfig::default(),
            lists: ListConfig::default(),
            links: LinkConfig::default(),
            parallel: true,
        }
    }
}

fn ensure_non_negative(name: &str, value: f32) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidConfig(format!(
            "{} must be a non-negative number, got {}",
            name, value
        )))
    }
}

fn ensure_at_least_one(name: &str, value: usize) -> Result<()> {
    if value >= 1 {
        Ok(())
    } else {
        Err(Error::InvalidConfig(format!("{} must be at least 1", name)))
    }
}

/// Layout analyzer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Max center distance for two fragments on one line (fraction of average height)
    pub line_threshold: f32,
    /// Minimum horizontal gap counted as a gutter candidate (fraction of page width)
    pub minimum_gutter_width: f32,
    /// Distance within which gutter centers cluster together
    pub gutter_cluster_tolerance: f32,
    /// Columns with fewer fragments are dropped
    pub minimum_column_elements: usize,
    /// Max vertical gap between consecutive fragments of a paragraph
    pub paragraph_max_gap: f32,
    /// Most negative vertical gap (overlap) still accepted in a paragraph
    pub paragraph_overlap_tolerance: f32,
    /// Horizontal alignment tolerance between consecutive paragraph fragments
    pub paragraph_alignment_tolerance: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            line_threshold: 0.5,
            minimum_gutter_width: 0.03,
            gutter_cluster_tolerance: 0.05,
            minimum_column_elements: 3,
            paragraph_max_gap: 0.02,
            paragraph_overlap_tolerance: -0.01,
            paragraph_alignment_tolerance: 0.3,
        }
    }
}

/// Heading detector configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeadingConfig {
    /// Fragments taller than `median * size_threshold` are heading candidates
    pub size_threshold: f32,
    /// Maximum number of distinct heading levels
    pub max_levels: u8,
    /// Heights within this distance share a level
    pub height_tolerance: f32,
}

impl Default for HeadingConfig {
    fn default() -> Self {
        Self {
            size_threshold: 1.2,
            max_levels: 6,
            height_tolerance: 0.01,
        }
    }
}

/// Table detector configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TableDetectorConfig {
    /// Minimum number of rows to consider as table
    pub minimum_rows: usize,
    /// Minimum number of fragments per line to consider as table row
    pub minimum_columns: usize,
    /// Max left-edge difference for two cells to count as aligned
    pub alignment_tolerance: f32,
    /// First row is a header when its mean height exceeds the body's by this ratio
    pub header_height_ratio: f32,
}

impl Default for TableDetectorConfig {
    fn default() -> Self {
        Self {
            minimum_rows: 2,
            minimum_columns: 2,
            alignment_tolerance: 0.02,
            header_height_ratio: 1.1,
        }
    }
}

/// List detector configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ListConfig {
    /// Lists with fewer items are dropped
    pub minimum_items: usize,
    /// Characters accepted as bullet markers
    pub bullet_characters: Vec<char>,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            minimum_items: 2,
            bullet_characters: vec![
                '•', '·', '◦', '▪', '▸', '▹', '►', '■', '□', '●', '○', '◆', '◇', '▶', '▷',
                '➤', '➜', '※', '☞', '-', '–', '—', '*',
            ],
        }
    }
}

/// Link detector configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LinkConfig {
    /// Extra patterns, matched after the built-in ones
    pub custom_patterns: Vec<CustomLinkPattern>,
}

/// A named user-supplied link pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomLinkPattern {
    /// Pattern name, used in error messages
    pub name: String,
    /// Regular expression (matched case-insensitively)
    pub pattern: String,
}
