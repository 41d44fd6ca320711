//! Layout analysis over recognized fragments.
//!
//! This module groups fragments into lines, detects column gutters, computes
//! height statistics and forms paragraphs from whatever the specialized
//! detectors leave behind. The results are shared with the other detectors
//! through [`LayoutContext`].

use std::collections::BTreeSet;

use crate::model::{column_index_for, BoundingBox, Column, Paragraph, TextFragment};

use super::options::LayoutConfig;

/// A line of fragments sharing a vertical band, ordered left to right.
#[derive(Debug, Clone)]
pub struct Line<'a> {
    /// The fragments in this line, sorted by left edge
    pub fragments: Vec<&'a TextFragment>,
}

impl<'a> Line<'a> {
    /// Create a line from fragments, sorting them left to right.
    pub fn from_fragments(mut fragments: Vec<&'a TextFragment>) -> Self {
        fragments.sort_by(|a, b| a.bounding_box.min_x().total_cmp(&b.bounding_box.min_x()));
        Self { fragments }
    }

    /// Number of fragments in the line.
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Check if the line has no fragments.
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Union of the fragment boxes.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::union_all(self.fragments.iter().map(|f| &f.bounding_box))
    }

    /// Mean fragment height.
    pub fn average_height(&self) -> f32 {
        if self.fragments.is_empty() {
            return 0.0;
        }
        self.fragments.iter().map(|f| f.height()).sum::<f32>() / self.fragments.len() as f32
    }

    /// Get the combined text of all fragments.
    pub fn text(&self) -> String {
        self.fragments
            .iter()
            .map(|f| f.text.trim())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Summary statistics over fragment heights.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HeightStatistics {
    /// Mean height
    pub mean: f32,
    /// Median height
    pub median: f32,
    /// Population standard deviation
    pub standard_deviation: f32,
    /// Smallest height
    pub min: f32,
    /// Largest height
    pub max: f32,
}

impl HeightStatistics {
    /// Compute statistics over the given fragments.
    ///
    /// Empty input yields all-zero statistics.
    pub fn from_fragments<'a, I>(fragments: I) -> Self
    where
        I: IntoIterator<Item = &'a TextFragment>,
    {
        let mut heights: Vec<f32> = fragments.into_iter().map(|f| f.height()).collect();
        if heights.is_empty() {
            return Self::default();
        }

        heights.sort_by(|a, b| a.total_cmp(b));

        let count = heights.len() as f32;
        let mean = heights.iter().sum::<f32>() / count;
        let variance = heights.iter().map(|h| (h - mean).powi(2)).sum::<f32>() / count;

        let mid = heights.len() / 2;
        let median = if heights.len() % 2 == 0 {
            (heights[mid - 1] + heights[mid]) / 2.0
        } else {
            heights[mid]
        };

        Self {
            mean,
            median,
            standard_deviation: variance.sqrt(),
            min: heights[0],
            max: heights[heights.len() - 1],
        }
    }
}

/// Shared layout results for one page.
#[derive(Debug, Clone)]
pub struct LayoutContext<'a> {
    /// Lines, top to bottom
    pub lines: Vec<Line<'a>>,
    /// Columns, left to right
    pub columns: Vec<Column>,
    /// Height statistics over every fragment
    pub stats: HeightStatistics,
}

/// Layout analyzer for grouping fragments into lines, columns and paragraphs.
#[derive(Debug, Clone, Default)]
pub struct LayoutAnalyzer {
    config: LayoutConfig,
}

/// A cluster of gap centers that may be a column gutter.
#[derive(Debug, Default)]
struct GutterCluster {
    sum: f32,
    count: usize,
    lines: BTreeSet<usize>,
}

impl GutterCluster {
    fn mean(&self) -> f32 {
        self.sum / self.count as f32
    }

    fn add(&mut self, center: f32, line: usize) {
        self.sum += center;
        self.count += 1;
        self.lines.insert(line);
    }
}

impl LayoutAnalyzer {
    /// Create a new layout analyzer with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new layout analyzer with custom configuration.
    pub fn with_config(config: LayoutConfig) -> Self {
        Self { config }
    }

    /// Get the analyzer configuration.
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Run line grouping, column detection and height statistics.
    pub fn analyze<'a>(&self, fragments: &'a [TextFragment]) -> LayoutContext<'a> {
        let refs: Vec<&TextFragment> = fragments.iter().collect();

        let stats = HeightStatistics::from_fragments(fragments);
        let lines = self.group_lines(&refs);
        let columns = self.detect_columns(&lines);

        log::debug!(
            "Layout: {} fragments, {} lines, {} columns, mean height {:.4}",
            fragments.len(),
            lines.len(),
            columns.len(),
            stats.mean
        );

        LayoutContext {
            lines,
            columns,
            stats,
        }
    }

    /// Group fragments into lines, top to bottom, each sorted left to right.
    pub fn group_lines<'a>(&self, fragments: &[&'a TextFragment]) -> Vec<Line<'a>> {
        if fragments.is_empty() {
            return vec![];
        }

        let avg_height = average_height(fragments);
        let threshold = avg_height * self.config.line_threshold;

        let mut sorted = fragments.to_vec();
        sorted.sort_by(|a, b| {
            b.bounding_box
                .max_y()
                .total_cmp(&a.bounding_box.max_y())
                .then_with(|| a.bounding_box.min_x().total_cmp(&b.bounding_box.min_x()))
        });

        let mut lines: Vec<Line<'a>> = Vec::new();
        let mut current: Vec<&'a TextFragment> = Vec::new();
        let mut reference_y: Option<f32> = None;

        for fragment in sorted {
            let center_y = fragment.bounding_box.center_y();

            match reference_y {
                Some(y) if (center_y - y).abs() < threshold => {
                    current.push(fragment);
                }
                _ => {
                    if !current.is_empty() {
                        lines.push(Line::from_fragments(std::mem::take(&mut current)));
                    }
                    reference_y = Some(center_y);
                    current.push(fragment);
                }
            }
        }

        if !current.is_empty() {
            lines.push(Line::from_fragments(current));
        }

        lines
    }

    /// Detect columns from gutters that recur across lines.
    ///
    /// Gaps between adjacent fragments on the same line are clustered by
    /// their center; clusters seen on enough lines become gutters, and the
    /// gutters split the page into column bands.
    pub fn detect_columns(&self, lines: &[Line<'_>]) -> Vec<Column> {
        if lines.is_empty() {
            return vec![];
        }

        let gutters = self.find_gutters(lines);
        log::debug!("Layout: gutters at {:?}", gutters);

        let mut edges = Vec::with_capacity(gutters.len() + 2);
        edges.push(0.0_f32);
        edges.extend(gutters.iter().copied().filter(|g| *g > 0.0 && *g < 1.0));
        edges.push(1.0);

        let band_count = edges.len() - 1;
        let mut band_fragments: Vec<Vec<&TextFragment>> = vec![Vec::new(); band_count];

        for fragment in lines.iter().flat_map(|l| l.fragments.iter().copied()) {
            let center_x = fragment.bounding_box.center_x().clamp(0.0, 1.0);
            let band = edges[1..]
                .iter()
                .position(|edge| center_x < *edge)
                .unwrap_or(band_count - 1);
            band_fragments[band].push(fragment);
        }

        let columns: Vec<Column> = band_fragments
            .into_iter()
            .enumerate()
            .filter(|(band, fragments)| {
                let keep = fragments.len() >= self.config.minimum_column_elements;
                if !keep {
                    log::trace!(
                        "Layout: dropping band {} with {} fragments",
                        band,
                        fragments.len()
                    );
                }
                keep
            })
            .enumerate()
            .map(|(index, (band, fragments))| Column {
                index,
                min_x: edges[band],
                max_x: edges[band + 1],
                fragment_ids: fragments.iter().map(|f| f.id.clone()).collect(),
            })
            .collect();

        columns
    }

    /// Find gutter centers, sorted left to right.
    fn find_gutters(&self, lines: &[Line<'_>]) -> Vec<f32> {
        let mut gap_centers: Vec<(f32, usize)> = Vec::new();

        for (line_idx, line) in lines.iter().enumerate() {
            if line.len() < 2 {
                continue;
            }
            for pair in line.fragments.windows(2) {
                let left = &pair[0].bounding_box;
                let right = &pair[1].bounding_box;
                let gap = right.min_x() - left.max_x();
                if gap >= self.config.minimum_gutter_width {
                    gap_centers.push(((left.max_x() + right.min_x()) / 2.0, line_idx));
                }
            }
        }

        if gap_centers.is_empty() {
            return vec![];
        }

        gap_centers.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut clusters: Vec<GutterCluster> = Vec::new();
        for (center, line_idx) in gap_centers {
            match clusters.last_mut() {
                Some(cluster)
                    if (center - cluster.mean()).abs() <= self.config.gutter_cluster_tolerance =>
                {
                    cluster.add(center, line_idx);
                }
                _ => {
                    let mut cluster = GutterCluster::default();
                    cluster.add(center, line_idx);
                    clusters.push(cluster);
                }
            }
        }

        let min_lines = (lines.len() / 3).max(2);
        log::trace!(
            "Layout: {} gap clusters, gutter needs {} lines",
            clusters.len(),
            min_lines
        );

        clusters
            .iter()
            .filter(|c| c.lines.len() >= min_lines)
            .map(|c| c.mean())
            .collect()
    }

    /// Group unclaimed fragments into paragraphs.
    ///
    /// Fragments are walked in reading order; a fragment continues the
    /// current paragraph when it sits just below the previous one and
    /// overlaps it horizontally.
    pub fn group_paragraphs(
        &self,
        fragments: &[&TextFragment],
        columns: &[Column],
        avg_height: f32,
    ) -> Vec<Paragraph> {
        if fragments.is_empty() {
            return vec![];
        }

        let boxes: Vec<BoundingBox> = fragments.iter().map(|f| f.bounding_box).collect();
        let order = reading_order(&boxes, columns, avg_height, self.config.line_threshold);

        let mut paragraphs = Vec::new();
        let mut current: Vec<&TextFragment> = Vec::new();

        for idx in order {
            let fragment = fragments[idx];

            if let Some(prev) = current.last() {
                if !self.continues_paragraph(&prev.bounding_box, &fragment.bounding_box) {
                    paragraphs.extend(Paragraph::from_fragments(&current));
                    current.clear();
                }
            }

            current.push(fragment);
        }

        paragraphs.extend(Paragraph::from_fragments(&current));

        log::debug!(
            "Layout: {} fragments grouped into {} paragraphs",
            fragments.len(),
            paragraphs.len()
        );

        paragraphs
    }

    fn continues_paragraph(&self, prev: &BoundingBox, next: &BoundingBox) -> bool {
        let gap = prev.min_y() - next.max_y();
        gap < self.config.paragraph_max_gap
            && gap >= self.config.paragraph_overlap_tolerance
            && prev.is_horizontally_aligned(next, self.config.paragraph_alignment_tolerance)
    }
}

/// Mean height of the given fragments, 0 when empty.
pub fn average_height(fragments: &[&TextFragment]) -> f32 {
    if fragments.is_empty() {
        return 0.0;
    }
    fragments.iter().map(|f| f.height()).sum::<f32>() / fragments.len() as f32
}

/// Compute the reading order of a set of boxes.
///
/// With more than one column, boxes are read column by column (by the
/// column of their center, nearest band when between bands) and top to
/// bottom within a column. Otherwise boxes are read top to bottom, and boxes
/// whose centers are closer than `avg_height * line_threshold` are treated as
/// one line and read left to right.
///
/// Returns indices into `boxes`.
pub fn reading_order(
    boxes: &[BoundingBox],
    columns: &[Column],
    avg_height: f32,
    line_threshold: f32,
) -> Vec<usize> {
    let mut order: Vec<usize> = (0..boxes.len()).collect();

    if columns.len() > 1 {
        let column_of: Vec<usize> = boxes
            .iter()
            .map(|b| column_index_for(columns, b.center_x()).unwrap_or(0))
            .collect();

        order.sort_by(|&a, &b| {
            column_of[a]
                .cmp(&column_of[b])
                .then_with(|| boxes[b].max_y().total_cmp(&boxes[a].max_y()))
                .then_with(|| boxes[a].min_x().total_cmp(&boxes[b].min_x()))
                .then_with(|| a.cmp(&b))
        });
        return order;
    }

    order.sort_by(|&a, &b| {
        boxes[b]
            .max_y()
            .total_cmp(&boxes[a].max_y())
            .then_with(|| boxes[a].min_x().total_cmp(&boxes[b].min_x()))
            .then_with(|| a.cmp(&b))
    });

    // Band boxes into lines, then read each band left to right
    let threshold = avg_height * line_threshold;
    let mut result = Vec::with_capacity(order.len());
    let mut band: Vec<usize> = Vec::new();
    let mut reference_y: Option<f32> = None;

    for idx in order {
        let center_y = boxes[idx].center_y();
        match reference_y {
            Some(y) if (center_y - y).abs() < threshold => band.push(idx),
            _ => {
                flush_band(&mut band, boxes, &mut result);
                reference_y = Some(center_y);
                band.push(idx);
            }
        }
    }
    flush_band(&mut band, boxes, &mut result);

    result
}

fn flush_band(band: &mut Vec<usize>, boxes: &[BoundingBox], result: &mut Vec<usize>) {
    band.sort_by(|&a, &b| {
        boxes[a]
            .min_x()
            .total_cmp(&boxes[b].min_x())
            .then_with(|| a.cmp(&b))
    });
    result.append(band);
}
