//! Scroll view configuration.
//!
//! # Example
//!
//! ```
//! use scrollkit::ScrollViewConfig;
//!
//! let config = ScrollViewConfig::from_toml_str(
//!     r#"
//!     slots_per_tick = 25
//!     visibility_margin = 48.0
//!     "#,
//! )?;
//! assert_eq!(config.slots_per_tick, 25);
//! assert_eq!(config.grow_settle_frames, 2);
//! # Ok::<(), scrollkit::ConfigError>(())
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Tuning knobs for a [`DynamicScrollView`](crate::DynamicScrollView).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollViewConfig {
    /// Maximum number of slots created per growth batch.
    pub slots_per_tick: usize,
    /// Frame boundaries to wait after a growth batch before classifying.
    pub grow_settle_frames: u32,
    /// Frame boundaries to wait after a shrink before classifying.
    pub shrink_settle_frames: u32,
    /// Amount the viewport is inflated by before classification.
    ///
    /// Zero means items appear and disappear exactly at the viewport edge.
    pub visibility_margin: f32,
}

impl Default for ScrollViewConfig {
    fn default() -> Self {
        Self {
            slots_per_tick: 10,
            grow_settle_frames: 2,
            shrink_settle_frames: 1,
            visibility_margin: 0.0,
        }
    }
}

impl ScrollViewConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a configuration from TOML. Missing keys take their
    /// default values.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the growth budget.
    pub fn with_slots_per_tick(mut self, slots_per_tick: usize) -> Self {
        self.slots_per_tick = slots_per_tick;
        self
    }

    /// Set the frame boundaries awaited after growth and after shrink.
    pub fn with_settle_frames(mut self, grow: u32, shrink: u32) -> Self {
        self.grow_settle_frames = grow;
        self.shrink_settle_frames = shrink;
        self
    }

    /// Set the look-ahead margin.
    pub fn with_visibility_margin(mut self, margin: f32) -> Self {
        self.visibility_margin = margin;
        self
    }

    /// Check that the configuration can drive population to completion.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.slots_per_tick == 0 {
            return Err(ConfigError::ZeroSlotBudget);
        }
        if self.grow_settle_frames == 0 {
            return Err(ConfigError::ZeroGrowSettle);
        }
        if !self.visibility_margin.is_finite() || self.visibility_margin < 0.0 {
            return Err(ConfigError::InvalidMargin(self.visibility_margin));
        }
        Ok(())
    }
}

static_assertions::assert_impl_all!(ScrollViewConfig: Send, Sync);
