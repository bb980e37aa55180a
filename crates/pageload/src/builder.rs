//! Construction of the `page-load` wide event.
//!
//! The builder only reads from a [`BrowserContext`]; handing the record to a
//! sink is the dispatcher's job. Each capability contributes its own group of
//! fields, and an unsupported capability simply contributes nothing.

use std::sync::Arc;

use error_stack::Report;
use event_types::EventRecord;
use event_types::EventType;

use crate::assets::TrackedAssets;
use crate::capability::BrowserContext;
use crate::capability::ConnectionInfo;
use crate::capability::Dimensions;
use crate::capability::MemoryInfo;
use crate::capability::NavigationTiming;
use crate::capability::PaintEntry;
use crate::capability::ResourceEntry;
use crate::error::BuildError;
use crate::error::BuildResult;
use crate::session::PageSession;
use crate::timing::OFFSET_FIELDS;
use crate::timing::SPAN_FIELDS;

const FIRST_PAINT: &str = "first-paint";
const FIRST_CONTENTFUL_PAINT: &str = "first-contentful-paint";

pub struct PageLoadEventBuilder {
    session: Arc<PageSession>,
    assets: TrackedAssets,
}

impl PageLoadEventBuilder {
    pub fn new(session: Arc<PageSession>) -> Self {
        Self {
            session,
            assets: TrackedAssets::default(),
        }
    }

    pub fn with_tracked_assets(mut self, assets: TrackedAssets) -> Self {
        self.assets = assets;
        self
    }

    pub fn session(&self) -> &Arc<PageSession> {
        &self.session
    }

    /// Build one `page-load` record from the current browser state.
    ///
    /// Fails only when the page has no route-shape marker.
    pub fn build<C>(&self, ctx: &C) -> BuildResult<EventRecord>
    where C: BrowserContext + ?Sized {
        let path_shape = ctx
            .path_shape()
            .ok_or_else(|| Report::new(BuildError::MissingPathShape))?;

        let mut event = EventRecord::new(EventType::PageLoad, self.session.page_load_id());
        event.insert("user_agent", ctx.user_agent());
        event.insert("path_shape", path_shape);

        add_geometry(&mut event, "window", ctx.window_size());
        add_geometry(&mut event, "screen", ctx.screen_size());
        if let Some(connection) = ctx.connection() {
            add_connection(&mut event, connection);
        }
        event.insert_opt("redirect_count", ctx.redirect_count());

        add_navigation_timing(&mut event, &ctx.navigation_timing());
        if let Some(paints) = ctx.paint_entries() {
            add_paint_timing(&mut event, &paints);
        }
        if let Some(memory) = ctx.memory() {
            add_memory(&mut event, &memory);
        }
        if let Some(resources) = ctx.resource_entries() {
            add_resource_timing(&mut event, &resources, &self.assets);
        }

        tracing::debug!(
            page_load_id = self.session.page_load_id(),
            fields = event.len(),
            "page-load event built"
        );
        Ok(event)
    }
}

fn add_geometry(event: &mut EventRecord, prefix: &str, size: Option<Dimensions>) {
    if let Some(size) = size {
        event.insert(format!("{prefix}_height"), size.height);
        event.insert(format!("{prefix}_width"), size.width);
    }
}

fn add_connection(event: &mut EventRecord, connection: ConnectionInfo) {
    event.insert_opt("connection_type", connection.connection_type);
    event.insert_opt("connection_type_effective", connection.effective_type);
    event.insert_opt("connection_rtt", connection.rtt);
}

fn add_navigation_timing(event: &mut EventRecord, timing: &NavigationTiming) {
    for (field, mark) in OFFSET_FIELDS {
        event.insert_opt(field, timing.offset(mark));
    }
    for (field, start, end) in SPAN_FIELDS {
        event.insert_opt(field, timing.span(start, end));
    }
}

fn add_paint_timing(event: &mut EventRecord, paints: &[PaintEntry]) {
    for paint in paints {
        match paint.name.as_str() {
            FIRST_PAINT => event.insert("timing_first_paint_ms", paint.start_time),
            FIRST_CONTENTFUL_PAINT => {
                event.insert("timing_first_contentful_paint_ms", paint.start_time)
            }
            _ => {}
        }
    }
}

fn add_memory(event: &mut EventRecord, memory: &MemoryInfo) {
    event.insert("js_heap_size_total_b", memory.total_js_heap_size);
    event.insert("js_heap_size_used_b", memory.used_js_heap_size);
}

fn add_resource_timing(event: &mut EventRecord, resources: &[ResourceEntry], assets: &TrackedAssets) {
    event.insert("resource_count", resources.len() as u64);
    for resource in resources {
        let Some(asset) = assets.find(&resource.name) else {
            continue;
        };
        event.insert(asset.encoded_size_field(), resource.encoded_body_size);
        event.insert(asset.decoded_size_field(), resource.decoded_body_size);
        event.insert(asset.duration_field(), resource.duration);
    }
}
