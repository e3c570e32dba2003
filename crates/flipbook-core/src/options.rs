use crate::cache::CachePolicy;
use crate::types::*;
use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Scale used for the main page view
pub const DEFAULT_VIEW_SCALE: f32 = 1.5;
/// Scale used for the thumbnail strip
pub const DEFAULT_THUMBNAIL_SCALE: f32 = 0.3;
/// JPEG quality, 1-100
pub const DEFAULT_JPEG_QUALITY: u8 = 80;
/// Pages on each side of the current page to preload
pub const DEFAULT_PRELOAD_RADIUS: usize = 2;
/// Length of the flip animation
pub const DEFAULT_FLIP_DURATION_MS: u64 = 600;

/// Viewer configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ViewerOptions {
    pub preload_radius: usize,
    pub flip_duration_ms: u64,
    pub view_scale: f32,
    pub thumbnail_scale: f32,
    pub jpeg_quality: u8,
    pub cache_policy: CachePolicy,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            preload_radius: DEFAULT_PRELOAD_RADIUS,
            flip_duration_ms: DEFAULT_FLIP_DURATION_MS,
            view_scale: DEFAULT_VIEW_SCALE,
            thumbnail_scale: DEFAULT_THUMBNAIL_SCALE,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            cache_policy: CachePolicy::Unbounded,
        }
    }
}

impl ViewerOptions {
    pub fn flip_duration(&self) -> Duration {
        Duration::from_millis(self.flip_duration_ms)
    }

    /// Pages a preload pass keeps around the current page, itself included
    pub fn preload_window(&self) -> usize {
        self.preload_radius.saturating_mul(2).saturating_add(1)
    }

    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options: Self = serde_json::from_slice(&bytes)
            .map_err(|e| FlipbookError::Config(format!("Failed to parse config: {}", e)))?;
        options.validate()?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| FlipbookError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if !(self.view_scale.is_finite() && self.view_scale > 0.0) {
            return Err(FlipbookError::Config(format!(
                "View scale must be positive, got {}",
                self.view_scale
            )));
        }

        if !(self.thumbnail_scale.is_finite() && self.thumbnail_scale > 0.0) {
            return Err(FlipbookError::Config(format!(
                "Thumbnail scale must be positive, got {}",
                self.thumbnail_scale
            )));
        }

        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(FlipbookError::Config(format!(
                "JPEG quality must be between 1 and 100, got {}",
                self.jpeg_quality
            )));
        }

        // A smaller cache would evict the page on screen during a preload pass
        if let CachePolicy::Lru { capacity } = self.cache_policy {
            let window = self.preload_window();
            if capacity < window {
                return Err(FlipbookError::Config(format!(
                    "LRU cache capacity must be at least {} to hold the preload window, got {}",
                    window, capacity
                )));
            }
        }

        Ok(())
    }
}
