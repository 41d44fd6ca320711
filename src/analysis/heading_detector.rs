//! Heading detection based on relative fragment height.

use crate::model::{Heading, TextFragment};

use super::layout::HeightStatistics;
use super::options::HeadingConfig;

/// Detects headings as fragments noticeably taller than body text.
#[derive(Debug, Clone, Default)]
pub struct HeadingDetector {
    config: HeadingConfig,
}

impl HeadingDetector {
    /// Create a new heading detector with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new heading detector with custom configuration.
    pub fn with_config(config: HeadingConfig) -> Self {
        Self { config }
    }

    /// Detect headings among the given fragments.
    ///
    /// Candidates are fragments taller than `median * size_threshold`. Their
    /// heights are bucketed from tallest down, each bucket becoming one level
    /// (1 is the tallest). Headings are returned top to bottom.
    pub fn detect(&self, fragments: &[TextFragment], stats: &HeightStatistics) -> Vec<Heading> {
        if fragments.is_empty() || stats.mean == 0.0 {
            return vec![];
        }

        let threshold = stats.median * self.config.size_threshold;
        let mut candidates: Vec<&TextFragment> = fragments
            .iter()
            .filter(|f| !f.is_blank() && f.height() > threshold)
            .collect();

        if candidates.is_empty() {
            return vec![];
        }

        let levels = self.level_heights(&candidates);
        log::debug!(
            "Headings: {} candidates above {:.4}, level heights {:?}",
            candidates.len(),
            threshold,
            levels
        );

        candidates.sort_by(|a, b| {
            b.bounding_box
                .max_y()
                .total_cmp(&a.bounding_box.max_y())
                .then_with(|| a.bounding_box.min_x().total_cmp(&b.bounding_box.min_x()))
        });

        candidates
            .into_iter()
            .map(|f| Heading::from_fragment(f, self.level_for(f.height(), &levels)))
            .collect()
    }

    /// Distinct candidate heights, tallest first, capped at `max_levels`.
    fn level_heights(&self, candidates: &[&TextFragment]) -> Vec<f32> {
        let mut heights: Vec<f32> = candidates.iter().map(|f| f.height()).collect();
        heights.sort_by(|a, b| b.total_cmp(a));

        let max_levels = usize::from(self.config.max_levels.max(1));
        let mut levels: Vec<f32> = Vec::new();

        for height in heights {
            if levels.len() >= max_levels {
                break;
            }
            match levels.last() {
                Some(last) if (last - height) <= self.config.height_tolerance => {}
                _ => levels.push(height),
            }
        }

        levels
    }

    fn level_for(&self, height: f32, levels: &[f32]) -> u8 {
        let index = levels
            .iter()
            .position(|level| (level - height).abs() <= self.config.height_tolerance)
            .map(|i| i + 1)
            .unwrap_or(levels.len());
        index.clamp(1, 6) as u8
    }
}
