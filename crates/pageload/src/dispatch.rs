//! One-shot listeners that build an event and hand it to a sink.
//!
//! The load listener runs on a cooperative (current-thread) runtime, the same
//! way page scripts share the browser's main thread. Delivery goes through
//! `spawn_blocking` so a blocking sink never stalls that thread. Failed
//! deliveries are logged and dropped.

use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use event_sink::EventSink;
use event_types::EventRecord;
use tokio::task::JoinHandle;

use crate::builder::PageLoadEventBuilder;
use crate::capability::BrowserContext;
use crate::unload::UnloadEventBuilder;

pub type SharedSink = Arc<dyn EventSink + Send + Sync>;

pub struct LoadListener<C> {
    ctx: Arc<C>,
    builder: PageLoadEventBuilder,
    sink: SharedSink,
    fired: AtomicBool,
}

impl<C> LoadListener<C>
where C: BrowserContext
{
    pub fn new(ctx: Arc<C>, builder: PageLoadEventBuilder, sink: SharedSink) -> Self {
        Self {
            ctx,
            builder,
            sink,
            fired: AtomicBool::new(false),
        }
    }

    pub fn has_fired(&self) -> bool {
        self.fired.load(Ordering::SeqCst)
    }

    /// Handle the page's load event.
    ///
    /// Yields once so load handlers registered by the page run first, then
    /// builds the `page-load` event and starts its delivery. Only the first
    /// call does anything; later calls return `None` immediately. The returned
    /// handle completes when the sink is done; page code does not need to await it.
    pub async fn on_load(&self) -> Option<JoinHandle<()>> {
        if self.fired.swap(true, Ordering::SeqCst) {
            tracing::debug!("load listener already fired");
            return None;
        }

        tokio::task::yield_now().await;

        match self.builder.build(&*self.ctx) {
            Ok(event) => Some(deliver(self.sink.clone(), event)),
            Err(report) => {
                tracing::warn!(
                    page_load_id = self.builder.session().page_load_id(),
                    error = ?report,
                    "page-load event not sent"
                );
                None
            }
        }
    }
}

/// Hand `event` to the sink on the blocking pool.
fn deliver(sink: SharedSink, event: EventRecord) -> JoinHandle<()> {
    tokio::task::spawn_blocking(move || send_logged(&*sink, &event))
}

fn send_logged(sink: &(dyn EventSink + Send + Sync), event: &EventRecord) {
    let event_type = event.event_type().map(|t| t.as_str()).unwrap_or("unknown");
    match sink.send(event) {
        Ok(()) => tracing::debug!(event_type, fields = event.len(), "event sent"),
        Err(e) => tracing::warn!(event_type, error = %e, "event delivery failed"),
    }
}

/// One-shot listener for the page's unload event.
///
/// Unload handlers cannot defer work, so the event is sent synchronously on the
/// calling thread. With a blocking sink, call it from a thread that may block.
pub struct UnloadListener<C> {
    ctx: Arc<C>,
    builder: UnloadEventBuilder,
    sink: SharedSink,
    fired: AtomicBool,
}

impl<C> UnloadListener<C>
where C: BrowserContext
{
    pub fn new(ctx: Arc<C>, builder: UnloadEventBuilder, sink: SharedSink) -> Self {
        Self {
            ctx,
            builder,
            sink,
            fired: AtomicBool::new(false),
        }
    }

    /// Returns `true` when this call built and sent the event.
    pub fn on_unload(&self) -> bool {
        if self.fired.swap(true, Ordering::SeqCst) {
            tracing::debug!("unload listener already fired");
            return false;
        }

        let event = self.builder.build(&*self.ctx);
        send_logged(&*self.sink, &event);
        true
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use event_sink::memory::MemorySink;
    use event_sink::SinkError;
    use event_types::EventType;
    use event_types::FieldValue;

    use super::*;
    use crate::capability::NavigationTiming;
    use crate::capability::ResourceEntry;
    use crate::session::PageSession;

    /// Context whose resource list page code can grow during load.
    struct LivePage {
        path_shape: Option<String>,
        resources: Mutex<Vec<ResourceEntry>>,
    }

    impl LivePage {
        fn new() -> Self {
            Self {
                path_shape: Some("/live".to_string()),
                resources: Mutex::new(vec![ResourceEntry::named("/main.js")]),
            }
        }
    }

    impl BrowserContext for LivePage {
        fn navigation_timing(&self) -> NavigationTiming {
            NavigationTiming::uniform(5_000)
        }

        fn user_agent(&self) -> String {
            "live".to_string()
        }

        fn now_ms(&self) -> u64 {
            9_000
        }

        fn path_shape(&self) -> Option<String> {
            self.path_shape.clone()
        }

        fn resource_entries(&self) -> Option<Vec<ResourceEntry>> {
            Some(self.resources.lock().unwrap().clone())
        }
    }

    struct FailingSink;

    impl EventSink for FailingSink {
        fn send(&self, _event: &EventRecord) -> Result<(), SinkError> {
            Err(SinkError::Status {
                status: 500,
                body: "down".to_string(),
            })
        }
    }

    fn listener(
        ctx: Arc<LivePage>,
        sink: SharedSink,
    ) -> LoadListener<LivePage> {
        let session = Arc::new(PageSession::with_id(808, None));
        LoadListener::new(ctx, PageLoadEventBuilder::new(session), sink)
    }

    #[tokio::test]
    async fn load_listener_fires_once() {
        let sink = Arc::new(MemorySink::new());
        let listener = listener(Arc::new(LivePage::new()), sink.clone());

        let handle = listener.on_load().await.expect("first load dispatches");
        handle.await.unwrap();
        assert!(listener.has_fired());
        assert!(listener.on_load().await.is_none());

        let events = sink.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type(), Some(EventType::PageLoad));
        assert_eq!(events[0].page_load_id(), Some(808));
    }

    #[tokio::test]
    async fn load_listener_runs_after_other_load_handlers() {
        let ctx = Arc::new(LivePage::new());
        let sink = Arc::new(MemorySink::new());
        let listener = Arc::new(listener(ctx.clone(), sink.clone()));

        // Registered first, but deferred past the page's own handler below.
        let beacon = tokio::spawn({
            let listener = listener.clone();
            async move { listener.on_load().await }
        });
        let page_handler = tokio::spawn({
            let ctx = ctx.clone();
            async move {
                ctx.resources
                    .lock()
                    .unwrap()
                    .push(ResourceEntry::named("/lazy-widget.js"));
            }
        });

        page_handler.await.unwrap();
        beacon.await.unwrap().expect("dispatched").await.unwrap();

        let events = sink.events();
        assert_eq!(
            events[0].get("resource_count"),
            Some(&FieldValue::UnsignedInteger(2))
        );
    }

    #[tokio::test]
    async fn missing_path_shape_sends_nothing() {
        let ctx = Arc::new(LivePage {
            path_shape: None,
            ..LivePage::new()
        });
        let sink = Arc::new(MemorySink::new());
        let listener = listener(ctx, sink.clone());

        assert!(listener.on_load().await.is_none());
        assert!(listener.has_fired());
        assert!(sink.is_empty());
    }

    #[test_log::test(tokio::test)]
    async fn sink_failure_is_not_propagated() {
        let listener = listener(Arc::new(LivePage::new()), Arc::new(FailingSink));
        let handle = listener.on_load().await.expect("dispatched");
        assert!(handle.await.is_ok());
    }

    #[test]
    fn unload_listener_fires_once_with_shared_id() {
        let ctx = Arc::new(LivePage::new());
        let sink = Arc::new(MemorySink::new());
        let session = Arc::new(PageSession::with_id(4_321, None));
        let unload = UnloadListener::new(ctx, UnloadEventBuilder::new(session), sink.clone());

        assert!(unload.on_unload());
        assert!(!unload.on_unload());

        let events = sink.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type(), Some(EventType::PageUnload));
        assert_eq!(events[0].page_load_id(), Some(4_321));
        assert_eq!(
            events[0].get("time_on_page_ms"),
            Some(&FieldValue::Integer(4_000))
        );
    }
}
