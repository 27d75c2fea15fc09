//! Background asset selection from weather-condition keywords.

/// Asset used when no keyword group matches the description.
pub const DEFAULT_ASSET: &str = "default.mp4";

/// Ordered keyword groups; first matching group wins.
const KEYWORD_ASSETS: &[(&[&str], &str)] = &[
    (&["clear"], "sunny.mp4"),
    (&["cloud"], "cloudy.mp4"),
    (&["rain", "drizzle"], "rainy.mp4"),
    (&["snow"], "snow.mp4"),
    (&["thunder", "storm"], "storm.mp4"),
];

/// Map a free-text condition description to a video asset name.
///
/// Case-insensitive substring match over the ordered keyword groups.
pub fn select_asset(description: &str) -> &'static str {
    let lower = description.to_lowercase();

    for (keywords, asset) in KEYWORD_ASSETS {
        if keywords.iter().any(|k| lower.contains(k)) {
            return asset;
        }
    }

    DEFAULT_ASSET
}

/// Tracks the currently loaded background asset and swaps it only
/// when the newly selected one differs.
#[derive(Debug, Default)]
pub struct Backdrop {
    current: Option<&'static str>,
}

impl Backdrop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select an asset for `description`; returns `Some(asset)` when a
    /// swap is needed and `None` when the asset is already loaded.
    pub fn update(&mut self, description: &str) -> Option<&'static str> {
        let asset = select_asset(description);

        if self.current == Some(asset) {
            return None;
        }

        self.current = Some(asset);
        Some(asset)
    }

    pub fn current(&self) -> Option<&'static str> {
        self.current
    }
}
