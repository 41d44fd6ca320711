//! Table detection from runs of aligned lines.
//!
//! A table is a vertical run of lines that each hold several fragments, have
//! a similar number of fragments, and whose fragments start at roughly the
//! same x positions as those of the line above. No ruling lines are needed.

use crate::model::{Table, TableRow};

use super::layout::Line;
use super::options::TableDetectorConfig;

/// Detects tables in grouped lines.
#[derive(Debug, Clone, Default)]
pub struct TableDetector {
    config: TableDetectorConfig,
}

impl TableDetector {
    /// Create a new table detector with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new table detector with custom configuration.
    pub fn with_config(config: TableDetectorConfig) -> Self {
        Self { config }
    }

    /// Detect tables in lines ordered top to bottom.
    pub fn detect(&self, lines: &[Line<'_>]) -> Vec<Table> {
        log::debug!("TableDetector: starting with {} lines", lines.len());

        let minimum_rows = self.config.minimum_rows.max(1);
        if lines.len() < minimum_rows {
            return vec![];
        }

        let mut tables = Vec::new();
        let mut region: Vec<&Line<'_>> = Vec::new();

        for line in lines {
            if !region.is_empty() && self.extends_region(&region, line) {
                region.push(line);
                continue;
            }

            tables.extend(self.close_region(&mut region));
            if line.len() >= self.config.minimum_columns {
                region.push(line);
            }
        }
        tables.extend(self.close_region(&mut region));

        log::debug!("TableDetector: found {} tables", tables.len());
        tables
    }

    /// Check whether `line` continues the current region.
    fn extends_region(&self, region: &[&Line<'_>], line: &Line<'_>) -> bool {
        if line.len() < self.config.minimum_columns {
            return false;
        }

        // Row width is fixed by the first row of the region
        let established = region[0].len();
        if line.len().abs_diff(established) > 1 {
            return false;
        }

        let Some(previous) = region.last() else {
            return false;
        };

        let overlap = previous.len().min(line.len());
        let aligned = previous
            .fragments
            .iter()
            .zip(line.fragments.iter())
            .filter(|(above, below)| {
                (above.bounding_box.min_x() - below.bounding_box.min_x()).abs()
                    <= self.config.alignment_tolerance
            })
            .count();

        aligned * 2 > overlap
    }

    /// Turn the region into a table if it is tall enough, leaving it empty.
    fn close_region(&self, region: &mut Vec<&Line<'_>>) -> Option<Table> {
        let lines = std::mem::take(region);
        if lines.is_empty() || lines.len() < self.config.minimum_rows.max(1) {
            if !lines.is_empty() {
                log::trace!("TableDetector: dropping region of {} lines", lines.len());
            }
            return None;
        }

        let mut rows: Vec<TableRow> = lines
            .iter()
            .enumerate()
            .filter_map(|(index, line)| TableRow::from_line(index, &line.fragments))
            .collect();

        if self.is_header(&lines) {
            if let Some(first) = rows.first_mut() {
                first.is_header = true;
            }
        }

        Table::from_rows(rows)
    }

    /// First row is a header when it is noticeably taller than the body rows.
    fn is_header(&self, lines: &[&Line<'_>]) -> bool {
        if lines.len() < 2 {
            return false;
        }

        let first = lines[0].average_height();
        let rest = &lines[1..];
        let body = rest.iter().map(|l| l.average_height()).sum::<f32>() / rest.len() as f32;

        first > body * self.config.header_height_ratio
    }
}
