//! Page-lifetime state shared by the load and unload events.

use rand::Rng;

use crate::capability::BrowserContext;
use crate::capability::MemoryInfo;

/// Exclusive upper bound of a generated `page_load_id`.
pub const PAGE_LOAD_ID_RANGE: u32 = 100_000_000;

/// State created once when the beacon starts on a page.
///
/// Share it by `Arc` with every builder that emits events for the same page, so
/// the load and unload events carry the same `page_load_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSession {
    page_load_id: u32,
    initial_memory: Option<MemoryInfo>,
}

impl PageSession {
    /// Generate the page's id and snapshot memory, if the browser exposes it.
    pub fn start<C>(ctx: &C) -> Self
    where C: BrowserContext + ?Sized {
        let page_load_id = rand::rng().random_range(0..PAGE_LOAD_ID_RANGE);
        let initial_memory = ctx.memory();
        tracing::debug!(
            page_load_id,
            memory_captured = initial_memory.is_some(),
            "page session started"
        );
        Self::with_id(page_load_id, initial_memory)
    }

    pub fn with_id(page_load_id: u32, initial_memory: Option<MemoryInfo>) -> Self {
        Self {
            page_load_id,
            initial_memory,
        }
    }

    pub fn page_load_id(&self) -> u32 {
        self.page_load_id
    }

    /// Memory as it was when the session started.
    pub fn initial_memory(&self) -> Option<&MemoryInfo> {
        self.initial_memory.as_ref()
    }
}
