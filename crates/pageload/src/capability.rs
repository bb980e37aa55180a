//! Capability probes over the ambient browser state.
//!
//! Every optional browser API is read through [`BrowserContext`]. A method that
//! returns `None` means the capability is unsupported in this browser, and the
//! builders drop the matching fields. The default implementations report every
//! optional capability as unsupported, so a context only overrides what it has.

use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;

pub use crate::timing::NavigationTiming;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// `navigator.connection`; each attribute may be missing on its own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionInfo {
    #[serde(rename = "type")]
    pub connection_type: Option<String>,
    pub effective_type: Option<String>,
    pub rtt: Option<u32>,
}

/// An entry of `performance.getEntriesByType("paint")`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaintEntry {
    pub name: String,
    pub start_time: f64,
}

impl PaintEntry {
    pub fn new(name: impl Into<String>, start_time: f64) -> Self {
        Self {
            name: name.into(),
            start_time,
        }
    }
}

/// An entry of `performance.getEntriesByType("resource")`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResourceEntry {
    pub name: String,
    pub encoded_body_size: u64,
    pub decoded_body_size: u64,
    pub duration: f64,
}

impl ResourceEntry {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// `performance.memory` (Chromium only).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryInfo {
    #[serde(rename = "usedJSHeapSize")]
    pub used_js_heap_size: u64,
    #[serde(rename = "totalJSHeapSize")]
    pub total_js_heap_size: u64,
}

/// Read-only view of the browser state a page-load event is built from.
pub trait BrowserContext {
    /// Navigation timing; always present.
    fn navigation_timing(&self) -> NavigationTiming;

    /// `navigator.userAgent`; always present.
    fn user_agent(&self) -> String;

    /// Current wall-clock time in epoch milliseconds.
    fn now_ms(&self) -> u64;

    /// Route template from the page-embedded route-shape marker.
    fn path_shape(&self) -> Option<String>;

    fn window_size(&self) -> Option<Dimensions> {
        None
    }

    fn screen_size(&self) -> Option<Dimensions> {
        None
    }

    fn connection(&self) -> Option<ConnectionInfo> {
        None
    }

    fn redirect_count(&self) -> Option<u32> {
        None
    }

    /// Paint timing entries; `None` when the entries API is unsupported.
    fn paint_entries(&self) -> Option<Vec<PaintEntry>> {
        None
    }

    /// Resource timing entries; `None` when the entries API is unsupported.
    fn resource_entries(&self) -> Option<Vec<ResourceEntry>> {
        None
    }

    fn memory(&self) -> Option<MemoryInfo> {
        None
    }
}

impl<T> BrowserContext for Arc<T>
where T: BrowserContext + ?Sized
{
    fn navigation_timing(&self) -> NavigationTiming {
        (**self).navigation_timing()
    }

    fn user_agent(&self) -> String {
        (**self).user_agent()
    }

    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }

    fn path_shape(&self) -> Option<String> {
        (**self).path_shape()
    }

    fn window_size(&self) -> Option<Dimensions> {
        (**self).window_size()
    }

    fn screen_size(&self) -> Option<Dimensions> {
        (**self).screen_size()
    }

    fn connection(&self) -> Option<ConnectionInfo> {
        (**self).connection()
    }

    fn redirect_count(&self) -> Option<u32> {
        (**self).redirect_count()
    }

    fn paint_entries(&self) -> Option<Vec<PaintEntry>> {
        (**self).paint_entries()
    }

    fn resource_entries(&self) -> Option<Vec<ResourceEntry>> {
        (**self).resource_entries()
    }

    fn memory(&self) -> Option<MemoryInfo> {
        (**self).memory()
    }
}
