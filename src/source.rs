//! Page sources feeding recognized fragments into analysis.
//!
//! A recognition engine is wrapped behind [`FragmentSource`]; the analyzer
//! pulls pages from it one at a time (possibly from several threads) and
//! never looks at pixels itself.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{PageSize, TextFragment};

/// Recognized fragments of one page.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PageInput {
    /// Size of the page image
    pub size: PageSize,

    /// Fragments in engine order
    pub fragments: Vec<TextFragment>,
}

impl PageInput {
    /// Create a page input.
    pub fn new(size: PageSize, fragments: Vec<TextFragment>) -> Self {
        Self { size, fragments }
    }
}

/// A producer of recognized pages.
///
/// Implement this trait to plug a recognition engine into
/// [`StructureAnalyzer::analyze_source`](crate::StructureAnalyzer::analyze_source).
pub trait FragmentSource: Sync {
    /// Get the name of this source.
    fn name(&self) -> &str;

    /// Get the number of pages the source can deliver.
    fn page_count(&self) -> u32;

    /// Recognize a page (1-indexed).
    ///
    /// Engine failures should be reported as [`Error::Recognition`], and
    /// requests past the end as [`Error::PageOutOfRange`].
    fn recognize_page(&self, page: u32) -> Result<PageInput>;
}

impl FragmentSource for Vec<PageInput> {
    fn name(&self) -> &str {
        "memory"
    }

    fn page_count(&self) -> u32 {
        self.len() as u32
    }

    fn recognize_page(&self, page: u32) -> Result<PageInput> {
        let count = self.page_count();
        if page == 0 || page > count {
            return Err(Error::PageOutOfRange(page, count));
        }
        Ok(self[(page - 1) as usize].clone())
    }
}
