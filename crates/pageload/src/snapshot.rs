//! Captured browser state, loadable from JSON or YAML.
//!
//! A snapshot is a frozen [`BrowserContext`]: whatever a page exposed at load
//! time, recorded with the browser's own attribute names. Capabilities that were
//! unavailable are simply left out of the file.

use std::path::Path;

use error_stack::ResultExt;
use serde::Deserialize;
use serde::Serialize;

use crate::capability::BrowserContext;
use crate::capability::ConnectionInfo;
use crate::capability::Dimensions;
use crate::capability::MemoryInfo;
use crate::capability::NavigationTiming;
use crate::capability::PaintEntry;
use crate::capability::ResourceEntry;
use crate::error::SnapshotError;
use crate::error::SnapshotResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowserSnapshot {
    pub user_agent: String,
    pub navigation_timing: NavigationTiming,
    /// Capture time; defaults to `loadEventEnd`.
    pub now_ms: Option<u64>,
    pub path_shape: Option<String>,
    pub window: Option<Dimensions>,
    pub screen: Option<Dimensions>,
    pub connection: Option<ConnectionInfo>,
    pub redirect_count: Option<u32>,
    pub paint_entries: Option<Vec<PaintEntry>>,
    pub resource_entries: Option<Vec<ResourceEntry>>,
    pub memory: Option<MemoryInfo>,
}

impl BrowserSnapshot {
    /// Load a snapshot, picking YAML for `.yaml`/`.yml` files and JSON otherwise.
    pub fn from_path(path: impl AsRef<Path>) -> SnapshotResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).change_context(SnapshotError::Read {
            path: path.display().to_string(),
        })?;

        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

        let snapshot = if is_yaml {
            Self::from_yaml_str(&content)
        } else {
            Self::from_json_str(&content)
        };
        snapshot.attach_printable_lazy(|| format!("snapshot file: {}", path.display()))
    }

    pub fn from_json_str(content: &str) -> SnapshotResult<Self> {
        serde_json::from_str(content).change_context(SnapshotError::Parse { format: "JSON" })
    }

    pub fn from_yaml_str(content: &str) -> SnapshotResult<Self> {
        serde_yaml::from_str(content).change_context(SnapshotError::Parse { format: "YAML" })
    }
}

impl BrowserContext for BrowserSnapshot {
    fn navigation_timing(&self) -> NavigationTiming {
        self.navigation_timing
    }

    fn user_agent(&self) -> String {
        self.user_agent.clone()
    }

    fn now_ms(&self) -> u64 {
        self.now_ms
            .unwrap_or(self.navigation_timing.load_event_end)
    }

    fn path_shape(&self) -> Option<String> {
        self.path_shape.clone()
    }

    fn window_size(&self) -> Option<Dimensions> {
        self.window
    }

    fn screen_size(&self) -> Option<Dimensions> {
        self.screen
    }

    fn connection(&self) -> Option<ConnectionInfo> {
        self.connection.clone()
    }

    fn redirect_count(&self) -> Option<u32> {
        self.redirect_count
    }

    fn paint_entries(&self) -> Option<Vec<PaintEntry>> {
        self.paint_entries.clone()
    }

    fn resource_entries(&self) -> Option<Vec<ResourceEntry>> {
        self.resource_entries.clone()
    }

    fn memory(&self) -> Option<MemoryInfo> {
        self.memory
    }
}
