//! Error types for the scroll view crate.

use thiserror::Error;

/// Errors reported by an [`ItemPool`](crate::ItemPool).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    /// The pool has no prototype to instantiate items from.
    #[error("no item prototype configured")]
    NoPrototype,

    /// Every instance the pool may hand out is in use.
    #[error("pool exhausted ({capacity} instances in use)")]
    Exhausted { capacity: usize },

    /// Any other collaborator-specific failure.
    #[error("{0}")]
    Other(String),
}

/// Configuration problems reported while a view populates.
///
/// These are delivered on the view's `diagnostics` signal. The affected
/// record is not materialized; population carries on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScrollViewError {
    /// No pooling collaborator has been installed on the view.
    #[error("no item pool configured; visible records cannot be materialized")]
    MissingPool,

    /// The pool refused to hand out an instance.
    #[error("failed to acquire an item for index {index}: {source}")]
    Acquire {
        index: usize,
        #[source]
        source: PoolError,
    },
}

/// Invalid [`ScrollViewConfig`](crate::ScrollViewConfig) values.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Growth would never make progress.
    #[error("slots_per_tick must be at least 1")]
    ZeroSlotBudget,

    /// Growth batches must be separated by at least one frame boundary.
    #[error("grow_settle_frames must be at least 1")]
    ZeroGrowSettle,

    /// The look-ahead margin must not shrink the viewport.
    #[error("visibility_margin must be a finite, non-negative number (got {0})")]
    InvalidMargin(f32),

    /// The TOML document could not be parsed.
    #[error("failed to parse scroll view config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
