//! Structure analysis over recognized text fragments.
//!
//! Layout analysis runs first and produces lines, columns and height
//! statistics. The heading, table, list and link detectors then run
//! independently, and the [`StructureAnalyzer`] merges their output into a
//! [`StructuredDocument`](crate::StructuredDocument).

mod assembler;
mod heading_detector;
mod layout;
mod link_detector;
mod list_detector;
mod options;
mod table_detector;

pub use assembler::StructureAnalyzer;
pub use heading_detector::HeadingDetector;
pub use layout::{
    average_height, reading_order, HeightStatistics, LayoutAnalyzer, LayoutContext, Line,
};
pub use link_detector::{canonical_url, LinkDetector};
pub use list_detector::ListDetector;
pub use options::{
    AnalysisOptions, CustomLinkPattern, HeadingConfig, LayoutConfig, LinkConfig, ListConfig,
    TableDetectorConfig,
};
pub use table_detector::TableDetector;
