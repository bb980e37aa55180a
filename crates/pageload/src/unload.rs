//! Construction of the companion `page-unload` event.
//!
//! Shares the `page_load_id` of the load event and records both memory
//! snapshots, so a consumer can compute how the heap grew over the page's life.

use std::sync::Arc;

use event_types::EventRecord;
use event_types::EventType;

use crate::capability::BrowserContext;
use crate::session::PageSession;
use crate::timing::TimingMark;

pub struct UnloadEventBuilder {
    session: Arc<PageSession>,
}

impl UnloadEventBuilder {
    pub fn new(session: Arc<PageSession>) -> Self {
        Self { session }
    }

    pub fn build<C>(&self, ctx: &C) -> EventRecord
    where C: BrowserContext + ?Sized {
        let mut event = EventRecord::new(EventType::PageUnload, self.session.page_load_id());

        let navigation_start = ctx.navigation_timing().mark(TimingMark::NavigationStart);
        let time_on_page = navigation_start.and_then(|start| {
            let start = i64::try_from(start).ok()?;
            let now = i64::try_from(ctx.now_ms()).ok()?;
            now.checked_sub(start)
        });
        event.insert_opt("time_on_page_ms", time_on_page);

        if let Some(start) = self.session.initial_memory() {
            event.insert("js_heap_size_used_start_b", start.used_js_heap_size);
            event.insert("js_heap_size_total_start_b", start.total_js_heap_size);
        }
        if let Some(end) = ctx.memory() {
            event.insert("js_heap_size_used_end_b", end.used_js_heap_size);
            event.insert("js_heap_size_total_end_b", end.total_js_heap_size);
        }

        event
    }
}

#[cfg(test)]
mod tests {
    use event_types::FieldValue;

    use super::*;
    use crate::capability::MemoryInfo;
    use crate::capability::NavigationTiming;

    struct Leaving {
        now: u64,
        memory: Option<MemoryInfo>,
    }

    impl BrowserContext for Leaving {
        fn navigation_timing(&self) -> NavigationTiming {
            NavigationTiming::uniform(10_000)
        }

        fn user_agent(&self) -> String {
            "agent".to_string()
        }

        fn now_ms(&self) -> u64 {
            self.now
        }

        fn path_shape(&self) -> Option<String> {
            None
        }

        fn memory(&self) -> Option<MemoryInfo> {
            self.memory
        }
    }

    #[test]
    fn unload_carries_session_id_and_time_on_page() {
        let session = Arc::new(PageSession::with_id(555, None));
        let event = UnloadEventBuilder::new(session).build(&Leaving {
            now: 70_000,
            memory: None,
        });

        assert_eq!(event.event_type(), Some(EventType::PageUnload));
        assert_eq!(event.page_load_id(), Some(555));
        assert_eq!(event.get("time_on_page_ms"), Some(&FieldValue::Integer(60_000)));
        assert!(!event.contains("js_heap_size_used_start_b"));
        assert!(!event.contains("js_heap_size_used_end_b"));
    }

    #[test]
    fn unload_reports_both_memory_snapshots() {
        let start = MemoryInfo {
            used_js_heap_size: 1_000,
            total_js_heap_size: 4_000,
        };
        let session = Arc::new(PageSession::with_id(1, Some(start)));
        let event = UnloadEventBuilder::new(session).build(&Leaving {
            now: 10_000,
            memory: Some(MemoryInfo {
                used_js_heap_size: 3_000,
                total_js_heap_size: 8_000,
            }),
        });

        assert_eq!(
            event.get("js_heap_size_used_start_b"),
            Some(&FieldValue::UnsignedInteger(1_000))
        );
        assert_eq!(
            event.get("js_heap_size_total_start_b"),
            Some(&FieldValue::UnsignedInteger(4_000))
        );
        assert_eq!(
            event.get("js_heap_size_used_end_b"),
            Some(&FieldValue::UnsignedInteger(3_000))
        );
        assert_eq!(
            event.get("js_heap_size_total_end_b"),
            Some(&FieldValue::UnsignedInteger(8_000))
        );
        assert_eq!(event.get("time_on_page_ms"), Some(&FieldValue::Integer(0)));
    }
}
