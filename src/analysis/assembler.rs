//! Document assembly: runs every detector and merges the results.

use std::collections::HashSet;

use rayon::prelude::*;

use crate::error::Result;
use crate::model::{
    BoundingBox, ElementKind, ElementRef, Heading, Link, List, MultiPageDocument, PageSize,
    StructuredDocument, Table, TextFragment,
};
use crate::source::{FragmentSource, PageInput};

use super::heading_detector::HeadingDetector;
use super::layout::{reading_order, LayoutAnalyzer, LayoutContext};
use super::link_detector::LinkDetector;
use super::list_detector::ListDetector;
use super::options::AnalysisOptions;
use super::table_detector::TableDetector;

/// Reconstructs document structure from recognized fragments.
///
/// The analyzer holds configuration and compiled patterns only, so one
/// instance can be shared across threads and reused for any number of pages.
///
/// # Example
///
/// ```
/// use unocr::{BoundingBox, PageSize, StructureAnalyzer, TextFragment};
///
/// let fragments = vec![
///     TextFragment::new("1", "Quarterly Report", BoundingBox::new(0.1, 0.9, 0.5, 0.05), 0.98),
///     TextFragment::new("2", "Sales grew in every region.", BoundingBox::new(0.1, 0.8, 0.6, 0.02), 0.95),
///     TextFragment::new("3", "Costs stayed flat.", BoundingBox::new(0.1, 0.7, 0.4, 0.02), 0.95),
/// ];
///
/// let analyzer = StructureAnalyzer::new();
/// let doc = analyzer.analyze(fragments, PageSize::new(1240.0, 1754.0));
///
/// assert_eq!(doc.headings.len(), 1);
/// assert_eq!(doc.headings[0].text, "Quarterly Report");
/// ```
#[derive(Debug, Clone)]
pub struct StructureAnalyzer {
    options: AnalysisOptions,
    layout: LayoutAnalyzer,
    headings: HeadingDetector,
    tables: TableDetector,
    lists: ListDetector,
    links: LinkDetector,
}

/// Raw detector output for one page.
struct Detections {
    headings: Vec<Heading>,
    tables: Vec<Table>,
    lists: Vec<List>,
    links: Vec<Link>,
}

impl Default for StructureAnalyzer {
    fn default() -> Self {
        Self {
            options: AnalysisOptions::default(),
            layout: LayoutAnalyzer::new(),
            headings: HeadingDetector::new(),
            tables: TableDetector::new(),
            lists: ListDetector::new(),
            links: LinkDetector::new(),
        }
    }
}

impl StructureAnalyzer {
    /// Create an analyzer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an analyzer with custom options.
    ///
    /// Fails with [`Error::InvalidConfig`](crate::Error::InvalidConfig) for
    /// out-of-range settings and [`Error::InvalidPattern`](crate::Error::InvalidPattern)
    /// for patterns that do not compile.
    pub fn with_options(options: AnalysisOptions) -> Result<Self> {
        options.validate()?;

        Ok(Self {
            layout: LayoutAnalyzer::with_config(options.layout.clone()),
            headings: HeadingDetector::with_config(options.headings.clone()),
            tables: TableDetector::with_config(options.tables.clone()),
            lists: ListDetector::with_config(options.lists.clone())?,
            links: LinkDetector::with_config(options.links.clone())?,
            options,
        })
    }

    /// Get the analysis options.
    pub fn options(&self) -> &AnalysisOptions {
        &self.options
    }

    /// Analyze one page of fragments.
    pub fn analyze(&self, fragments: Vec<TextFragment>, size: PageSize) -> StructuredDocument {
        let mut doc = StructuredDocument::new(size);
        if fragments.is_empty() {
            doc.text_fragments = fragments;
            return doc;
        }

        {
            let context = self.layout.analyze(&fragments);
            let mut detections = self.detect(&fragments, &context);
            self.resolve_overlaps(&mut detections);

            let consumed = consumed_ids(&detections);
            let remaining: Vec<&TextFragment> = fragments
                .iter()
                .filter(|f| !consumed.contains(f.id.as_str()))
                .collect();

            log::debug!(
                "Assembler: {} headings, {} tables, {} lists, {} links; {} of {} fragments left for paragraphs",
                detections.headings.len(),
                detections.tables.len(),
                detections.lists.len(),
                detections.links.len(),
                remaining.len(),
                fragments.len()
            );

            doc.paragraphs =
                self.layout
                    .group_paragraphs(&remaining, &context.columns, context.stats.mean);
            doc.headings = detections.headings;
            doc.tables = detections.tables;
            doc.lists = detections.lists;
            doc.links = detections.links;
            doc.reading_order = self.order_elements(&doc, &context);
            doc.columns = context.columns;
        }

        doc.text_fragments = fragments;
        doc
    }

    /// Analyze several pages; output order matches input order.
    pub fn analyze_pages(&self, pages: Vec<PageInput>) -> MultiPageDocument {
        let pages = if self.options.parallel {
            pages
                .into_par_iter()
                .map(|page| self.analyze(page.fragments, page.size))
                .collect()
        } else {
            pages
                .into_iter()
                .map(|page| self.analyze(page.fragments, page.size))
                .collect()
        };

        MultiPageDocument::new(pages)
    }

    /// Pull every page from a source and analyze it.
    ///
    /// Any page the source fails to deliver aborts the run. The error
    /// returned is the one for the lowest failing page number.
    pub fn analyze_source(&self, source: &dyn FragmentSource) -> Result<MultiPageDocument> {
        let page_count = source.page_count();
        log::debug!(
            "Assembler: analyzing {} pages from source {}",
            page_count,
            source.name()
        );

        let recognize = |page: u32| -> Result<StructuredDocument> {
            let input = source.recognize_page(page).map_err(|e| {
                log::warn!("Source {} failed on page {}: {}", source.name(), page, e);
                e
            })?;
            Ok(self.analyze(input.fragments, input.size))
        };

        let pages: Result<Vec<StructuredDocument>> = if self.options.parallel {
            let results: Vec<Result<StructuredDocument>> =
                (1..=page_count).into_par_iter().map(recognize).collect();
            results.into_iter().collect()
        } else {
            (1..=page_count).map(recognize).collect()
        };

        Ok(MultiPageDocument::new(pages?))
    }

    /// Run the independent detectors, in parallel when enabled.
    fn detect(&self, fragments: &[TextFragment], context: &LayoutContext<'_>) -> Detections {
        let run_headings = || self.headings.detect(fragments, &context.stats);
        let run_tables = || self.tables.detect(&context.lines);
        let run_lists = || self.lists.detect(fragments);
        let run_links = || self.links.detect(fragments);

        let ((headings, tables), (lists, links)) = if self.options.parallel {
            rayon::join(
                || rayon::join(run_headings, run_tables),
                || rayon::join(run_lists, run_links),
            )
        } else {
            ((run_headings(), run_tables()), (run_lists(), run_links()))
        };

        Detections {
            headings,
            tables,
            lists,
            links,
        }
    }

    /// Give every fragment a single owner: table cells first, then list
    /// items, then headings. Losing entities are dropped so their other
    /// fragments fall through to paragraphs.
    fn resolve_overlaps(&self, detections: &mut Detections) {
        let mut owned: HashSet<String> = detections
            .tables
            .iter()
            .flat_map(|t| t.cells())
            .flat_map(|c| c.fragment_ids.iter().cloned())
            .collect();

        let minimum_items = self.options.lists.minimum_items;
        let lists = std::mem::take(&mut detections.lists);
        for list in lists {
            let list_type = list.list_type;
            let items: Vec<_> = list
                .items
                .into_iter()
                .filter(|item| !item.fragment_ids.iter().any(|id| owned.contains(id)))
                .collect();
            if items.len() < minimum_items {
                log::trace!("Assembler: dropping list shadowed by a table");
                continue;
            }
            if let Some(list) = List::from_items(list_type, items) {
                detections.lists.push(list);
            }
        }
        owned.extend(
            detections
                .lists
                .iter()
                .flat_map(|l| l.items.iter())
                .flat_map(|i| i.fragment_ids.iter().cloned()),
        );

        let before = detections.headings.len();
        detections
            .headings
            .retain(|h| !h.fragment_ids.iter().any(|id| owned.contains(id)));
        if detections.headings.len() < before {
            log::debug!(
                "Assembler: {} headings already owned by tables or lists",
                before - detections.headings.len()
            );
        }
    }

    /// Reading order over headings, paragraphs, tables and lists.
    fn order_elements(
        &self,
        doc: &StructuredDocument,
        context: &LayoutContext<'_>,
    ) -> Vec<ElementRef> {
        let mut refs: Vec<ElementRef> = Vec::new();
        let mut boxes: Vec<BoundingBox> = Vec::new();

        let mut push = |kind: ElementKind, items: Vec<BoundingBox>| {
            for (index, bounding_box) in items.into_iter().enumerate() {
                refs.push(ElementRef::new(kind, index));
                boxes.push(bounding_box);
            }
        };

        push(
            ElementKind::Heading,
            doc.headings.iter().map(|h| h.bounding_box).collect(),
        );
        push(
            ElementKind::Paragraph,
            doc.paragraphs.iter().map(|p| p.bounding_box).collect(),
        );
        push(
            ElementKind::Table,
            doc.tables.iter().map(|t| t.bounding_box).collect(),
        );
        push(
            ElementKind::List,
            doc.lists.iter().map(|l| l.bounding_box).collect(),
        );

        reading_order(
            &boxes,
            &context.columns,
            context.stats.mean,
            self.layout.config().line_threshold,
        )
        .into_iter()
        .map(|i| refs[i])
        .collect()
    }
}

/// Ids of fragments claimed by headings, table cells and list items.
fn consumed_ids(detections: &Detections) -> HashSet<&str> {
    let heading_ids = detections
        .headings
        .iter()
        .flat_map(|h| h.fragment_ids.iter());
    let cell_ids = detections
        .tables
        .iter()
        .flat_map(|t| t.cells())
        .flat_map(|c| c.fragment_ids.iter());
    let item_ids = detections
        .lists
        .iter()
        .flat_map(|l| l.items.iter())
        .flat_map(|i| i.fragment_ids.iter());

    heading_ids
        .chain(cell_ids)
        .chain(item_ids)
        .map(String::as_str)
        .collect()
}
