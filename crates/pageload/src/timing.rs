//! Navigation timing marks and the fields derived from them.
//!
//! Two kinds of fields are produced. Offsets subtract `navigationStart` from a
//! single mark; spans subtract one mark from another. Both tables are fixed and
//! every value is a signed millisecond count, so a mark the browser left at zero
//! (`unloadEventEnd` on a first navigation) shows up as a large negative offset.

use serde::Deserialize;
use serde::Serialize;

/// Legacy `performance.timing` marks, as epoch milliseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationTiming {
    pub navigation_start: u64,
    pub unload_event_end: u64,
    pub domain_lookup_start: u64,
    pub domain_lookup_end: u64,
    pub connect_start: u64,
    pub connect_end: u64,
    pub request_start: u64,
    pub response_end: u64,
    pub dom_interactive: u64,
    pub dom_complete: u64,
    pub load_event_end: u64,
    /// Only exposed by Internet Explorer and legacy Edge.
    #[serde(default)]
    pub ms_first_paint: Option<u64>,
}

impl NavigationTiming {
    /// Timing where every mark, including `msFirstPaint`, equals `at`.
    pub fn uniform(at: u64) -> Self {
        Self {
            navigation_start: at,
            unload_event_end: at,
            domain_lookup_start: at,
            domain_lookup_end: at,
            connect_start: at,
            connect_end: at,
            request_start: at,
            response_end: at,
            dom_interactive: at,
            dom_complete: at,
            load_event_end: at,
            ms_first_paint: Some(at),
        }
    }

    pub fn mark(&self, mark: TimingMark) -> Option<u64> {
        match mark {
            TimingMark::NavigationStart => Some(self.navigation_start),
            TimingMark::UnloadEventEnd => Some(self.unload_event_end),
            TimingMark::DomainLookupStart => Some(self.domain_lookup_start),
            TimingMark::DomainLookupEnd => Some(self.domain_lookup_end),
            TimingMark::ConnectStart => Some(self.connect_start),
            TimingMark::ConnectEnd => Some(self.connect_end),
            TimingMark::RequestStart => Some(self.request_start),
            TimingMark::ResponseEnd => Some(self.response_end),
            TimingMark::DomInteractive => Some(self.dom_interactive),
            TimingMark::DomComplete => Some(self.dom_complete),
            TimingMark::LoadEventEnd => Some(self.load_event_end),
            TimingMark::MsFirstPaint => self.ms_first_paint,
        }
    }

    /// `end - start` in milliseconds, or `None` when either mark is missing.
    pub fn span(&self, start: TimingMark, end: TimingMark) -> Option<i64> {
        let start = i64::try_from(self.mark(start)?).ok()?;
        let end = i64::try_from(self.mark(end)?).ok()?;
        end.checked_sub(start)
    }

    /// `mark - navigationStart` in milliseconds.
    pub fn offset(&self, mark: TimingMark) -> Option<i64> {
        self.span(TimingMark::NavigationStart, mark)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimingMark {
    NavigationStart,
    UnloadEventEnd,
    DomainLookupStart,
    DomainLookupEnd,
    ConnectStart,
    ConnectEnd,
    RequestStart,
    ResponseEnd,
    DomInteractive,
    DomComplete,
    LoadEventEnd,
    MsFirstPaint,
}

/// Fields computed as `mark - navigationStart`.
pub const OFFSET_FIELDS: [(&str, TimingMark); 8] = [
    ("timing_unload_ms", TimingMark::UnloadEventEnd),
    ("timing_dns_end_ms", TimingMark::DomainLookupEnd),
    ("timing_ssl_end_ms", TimingMark::ConnectEnd),
    ("timing_response_end_ms", TimingMark::ResponseEnd),
    ("timing_dom_interactive_ms", TimingMark::DomInteractive),
    ("timing_dom_complete_ms", TimingMark::DomComplete),
    ("timing_dom_loaded_ms", TimingMark::LoadEventEnd),
    ("timing_ms_first_paint_ms", TimingMark::MsFirstPaint),
];

/// Fields computed as `end - start`, listed as `(field, start, end)`.
pub const SPAN_FIELDS: [(&str, TimingMark, TimingMark); 5] = [
    (
        "timing_dns_duration_ms",
        TimingMark::DomainLookupStart,
        TimingMark::DomainLookupEnd,
    ),
    (
        "timing_ssl_duration_ms",
        TimingMark::ConnectStart,
        TimingMark::ConnectEnd,
    ),
    (
        "timing_server_duration_ms",
        TimingMark::RequestStart,
        TimingMark::ResponseEnd,
    ),
    (
        "timing_dom_loaded_duration_ms",
        TimingMark::DomComplete,
        TimingMark::LoadEventEnd,
    ),
    (
        "timing_total_duration_ms",
        TimingMark::ConnectStart,
        TimingMark::LoadEventEnd,
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    const NAV_START: u64 = 1_700_000_000_000;

    #[test]
    fn uniform_timing_has_zero_offsets() {
        let timing = NavigationTiming::uniform(NAV_START);
        for (field, mark) in OFFSET_FIELDS {
            assert_eq!(timing.offset(mark), Some(0), "{field}");
        }
    }

    #[test]
    fn offset_is_relative_to_navigation_start() {
        let timing = NavigationTiming {
            dom_interactive: NAV_START + 320,
            ..NavigationTiming::uniform(NAV_START)
        };
        assert_eq!(timing.offset(TimingMark::DomInteractive), Some(320));
    }

    #[test]
    fn unset_mark_gives_negative_offset() {
        let timing = NavigationTiming {
            unload_event_end: 0,
            ..NavigationTiming::uniform(NAV_START)
        };
        assert_eq!(
            timing.offset(TimingMark::UnloadEventEnd),
            Some(-(NAV_START as i64))
        );
    }

    #[test]
    fn missing_ms_first_paint_has_no_offset() {
        let timing = NavigationTiming {
            ms_first_paint: None,
            ..NavigationTiming::uniform(NAV_START)
        };
        assert_eq!(timing.offset(TimingMark::MsFirstPaint), None);
    }

    #[test]
    fn span_ignores_navigation_start() {
        let timing = NavigationTiming {
            request_start: NAV_START + 100,
            response_end: NAV_START + 180,
            ..NavigationTiming::uniform(NAV_START)
        };
        assert_eq!(
            timing.span(TimingMark::RequestStart, TimingMark::ResponseEnd),
            Some(80)
        );
    }

    #[test]
    fn out_of_range_mark_is_absent() {
        let timing = NavigationTiming {
            load_event_end: u64::MAX,
            ..NavigationTiming::uniform(NAV_START)
        };
        assert_eq!(timing.offset(TimingMark::LoadEventEnd), None);
    }

    #[test]
    fn deserializes_browser_field_names() {
        let timing: NavigationTiming = serde_json::from_str(
            r#"{
                "navigationStart": 1000, "unloadEventEnd": 0,
                "domainLookupStart": 1005, "domainLookupEnd": 1010,
                "connectStart": 1010, "connectEnd": 1030,
                "requestStart": 1031, "responseEnd": 1100,
                "domInteractive": 1200, "domComplete": 1400,
                "loadEventEnd": 1450
            }"#,
        )
        .unwrap();
        assert_eq!(timing.connect_end, 1030);
        assert_eq!(timing.ms_first_paint, None);
    }
}
