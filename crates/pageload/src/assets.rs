//! Tracked assets and the resource-timing field names derived from them.
//!
//! Field names are computed once when the asset list is built, never while an
//! event is being assembled.

/// Assets tracked when no explicit list is configured.
pub const DEFAULT_TRACKED_ASSETS: [&str; 3] = ["/main.js", "/main.css", "/vendor.js"];

/// A resource identifier and the output fields it maps to.
///
/// The `_kb` fields hold raw byte counts. The suffix is kept for compatibility
/// with existing datasets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedAsset {
    identifier: String,
    stem: String,
    encoded_size_field: String,
    decoded_size_field: String,
    duration_field: String,
}

impl TrackedAsset {
    /// Returns `None` for an identifier that would match every resource.
    pub fn new(identifier: impl Into<String>) -> Option<Self> {
        let identifier = identifier.into();
        if identifier.is_empty() {
            return None;
        }

        let stem = field_stem(&identifier);
        Some(Self {
            encoded_size_field: format!("resource_{stem}_encoded_size_kb"),
            decoded_size_field: format!("resource_{stem}_decoded_size_kb"),
            duration_field: format!("resource_{stem}_timing_duration_ms"),
            identifier,
            stem,
        })
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn stem(&self) -> &str {
        &self.stem
    }

    pub fn encoded_size_field(&self) -> &str {
        &self.encoded_size_field
    }

    pub fn decoded_size_field(&self) -> &str {
        &self.decoded_size_field
    }

    pub fn duration_field(&self) -> &str {
        &self.duration_field
    }

    pub fn matches(&self, resource_name: &str) -> bool {
        resource_name.contains(&self.identifier)
    }
}

/// `/static/main.js` -> `staticmainjs`
///
/// Every `.` is dropped, not only the one before the extension, so stems stay
/// valid as unquoted column names.
fn field_stem(identifier: &str) -> String {
    identifier
        .chars()
        .filter(|c| *c != '/' && *c != '.')
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedAssets {
    assets: Vec<TrackedAsset>,
}

impl TrackedAssets {
    /// Build the list, skipping empty identifiers.
    pub fn new<I, S>(identifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let assets = identifiers
            .into_iter()
            .filter_map(TrackedAsset::new)
            .collect();
        Self { assets }
    }

    /// First tracked asset whose identifier occurs in `resource_name`.
    pub fn find(&self, resource_name: &str) -> Option<&TrackedAsset> {
        self.assets.iter().find(|asset| asset.matches(resource_name))
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

impl Default for TrackedAssets {
    fn default() -> Self {
        Self::new(DEFAULT_TRACKED_ASSETS)
    }
}
