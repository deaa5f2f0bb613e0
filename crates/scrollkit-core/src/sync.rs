//! Property wiring: keep two properties aligned.
//!
//! A [`PropertySync`] binds a *source* and a *target* [`Property`] and copies
//! values between them when driven by the host frame loop.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use scrollkit_core::{Property, PropertySync, SyncDirection, TickPhase};
//!
//! let volume = Arc::new(Property::new(0.5_f32));
//! let slider = Arc::new(Property::new(0.0_f32));
//!
//! let mut sync = PropertySync::new(volume.clone(), slider.clone())
//!     .with_direction(SyncDirection::BiDirectional);
//! sync.start();
//! assert_eq!(slider.get(), 0.5);
//!
//! slider.set(0.8);
//! sync.on_tick(TickPhase::Update);
//! assert_eq!(volume.get(), 0.8);
//! ```

use std::fmt;
use std::sync::Arc;

use crate::logging::targets;
use crate::property::{Property, Revision};
use crate::signal::Signal;
use crate::tick::TickPhase;

/// Which way values flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncDirection {
    /// Source values are copied to the target.
    #[default]
    SourceUpdatesTarget,
    /// Target values are copied to the source.
    TargetUpdatesSource,
    /// Whichever side changed since the last sync wins; the source wins ties.
    BiDirectional,
}

/// When a sync runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncTrigger {
    /// Only once, when started. The sync disables itself afterwards.
    OnStart,
    /// On every [`TickPhase::Update`].
    #[default]
    OnUpdate,
    /// On every [`TickPhase::LateUpdate`].
    OnLateUpdate,
    /// On every [`TickPhase::FixedUpdate`].
    OnFixedUpdate,
}

impl SyncTrigger {
    fn matches(self, phase: TickPhase) -> bool {
        matches!(
            (self, phase),
            (Self::OnUpdate, TickPhase::Update)
                | (Self::OnLateUpdate, TickPhase::LateUpdate)
                | (Self::OnFixedUpdate, TickPhase::FixedUpdate)
        )
    }
}

type Transform<T> = Arc<dyn Fn(&T) -> T + Send + Sync>;

/// Keeps a source and a target property aligned.
pub struct PropertySync<T> {
    source: Arc<Property<T>>,
    target: Arc<Property<T>>,
    direction: SyncDirection,
    trigger: SyncTrigger,
    transform: Option<Transform<T>>,
    enabled: bool,
    /// Revisions of each side as of the last sync.
    seen_source: Option<Revision>,
    seen_target: Option<Revision>,
    /// Emitted with the direction of every write performed by the sync.
    pub changed: Signal<SyncDirection>,
}

impl<T> PropertySync<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    /// Bind `source` to `target` with the default direction and trigger.
    pub fn new(source: Arc<Property<T>>, target: Arc<Property<T>>) -> Self {
        Self {
            source,
            target,
            direction: SyncDirection::default(),
            trigger: SyncTrigger::default(),
            transform: None,
            enabled: true,
            seen_source: None,
            seen_target: None,
            changed: Signal::new(),
        }
    }

    /// Set the direction of updates.
    pub fn with_direction(mut self, direction: SyncDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Set when the sync runs.
    pub fn with_trigger(mut self, trigger: SyncTrigger) -> Self {
        self.trigger = trigger;
        self
    }

    /// Apply `transform` to every value copied in either direction.
    ///
    /// In bi-directional mode the same function is used both ways, so it
    /// should be its own inverse.
    pub fn with_transform<F>(mut self, transform: F) -> Self
    where
        F: Fn(&T) -> T + Send + Sync + 'static,
    {
        self.transform = Some(Arc::new(transform));
        self
    }

    pub fn direction(&self) -> SyncDirection {
        self.direction
    }

    pub fn trigger(&self) -> SyncTrigger {
        self.trigger
    }

    pub fn source(&self) -> &Arc<Property<T>> {
        &self.source
    }

    pub fn target(&self) -> &Arc<Property<T>> {
        &self.target
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Perform the initial sync.
    ///
    /// Always updates once. A sync triggered [`SyncTrigger::OnStart`] then
    /// disables itself.
    pub fn start(&mut self) {
        self.update_now();
        if self.trigger == SyncTrigger::OnStart {
            self.enabled = false;
        }
    }

    /// Drive the sync for one phase of a host frame.
    ///
    /// Returns `true` if a value was written.
    pub fn on_tick(&mut self, phase: TickPhase) -> bool {
        if !self.enabled || !self.trigger.matches(phase) {
            return false;
        }
        self.update_now()
    }

    /// Immediately copy values according to the direction.
    ///
    /// Returns `true` if a value was written.
    pub fn update_now(&mut self) -> bool {
        match self.direction {
            SyncDirection::SourceUpdatesTarget => self.push_to_target(),
            SyncDirection::TargetUpdatesSource => self.push_to_source(),
            SyncDirection::BiDirectional => {
                if self.seen_source != Some(self.source.revision()) {
                    self.push_to_target()
                } else if self.seen_target != Some(self.target.revision()) {
                    self.push_to_source()
                } else {
                    false
                }
            }
        }
    }

    fn convert(&self, value: &T) -> T {
        match &self.transform {
            Some(transform) => transform(value),
            None => value.clone(),
        }
    }

    fn push_to_target(&mut self) -> bool {
        let (source, source_revision) = self.source.snapshot();
        let written = self.target.set_revisioned(self.convert(&source));
        self.seen_source = Some(source_revision);
        self.seen_target = Some(written.unwrap_or_else(|| self.target.revision()));
        self.report(written.is_some(), SyncDirection::SourceUpdatesTarget)
    }

    fn push_to_source(&mut self) -> bool {
        let (target, target_revision) = self.target.snapshot();
        let written = self.source.set_revisioned(self.convert(&target));
        self.seen_target = Some(target_revision);
        self.seen_source = Some(written.unwrap_or_else(|| self.source.revision()));
        self.report(written.is_some(), SyncDirection::TargetUpdatesSource)
    }

    fn report(&self, written: bool, direction: SyncDirection) -> bool {
        if written {
            tracing::trace!(target: targets::SYNC, ?direction, "property synced");
            self.changed.emit(direction);
        }
        written
    }
}

impl PropertySync<bool> {
    /// Bind two boolean properties so that each holds the negation of the other.
    pub fn inverted(source: Arc<Property<bool>>, target: Arc<Property<bool>>) -> Self {
        Self::new(source, target).with_transform(|value: &bool| !*value)
    }
}

impl<T: Clone + fmt::Debug> fmt::Debug for PropertySync<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertySync")
            .field("source", &self.source)
            .field("target", &self.target)
            .field("direction", &self.direction)
            .field("trigger", &self.trigger)
            .field("transformed", &self.transform.is_some())
            .field("enabled", &self.enabled)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn pair<T: Clone>(source: T, target: T) -> (Arc<Property<T>>, Arc<Property<T>>) {
        (Arc::new(Property::new(source)), Arc::new(Property::new(target)))
    }

    #[test]
    fn test_source_updates_target() {
        let (source, target) = pair(1, 0);
        let mut sync = PropertySync::new(source.clone(), target.clone());

        sync.start();
        assert_eq!(target.get(), 1);

        source.set(7);
        assert!(sync.on_tick(TickPhase::Update));
        assert_eq!(target.get(), 7);

        // Target edits are overwritten on the next tick.
        target.set(3);
        sync.on_tick(TickPhase::Update);
        assert_eq!(target.get(), 7);
    }

    #[test]
    fn test_target_updates_source() {
        let (source, target) = pair("a".to_string(), "b".to_string());
        let mut sync = PropertySync::new(source.clone(), target.clone())
            .with_direction(SyncDirection::TargetUpdatesSource);

        sync.start();
        assert_eq!(source.get(), "b");
    }

    #[test]
    fn test_bidirectional_prefers_changed_side() {
        let (source, target) = pair(10, 0);
        let mut sync = PropertySync::new(source.clone(), target.clone())
            .with_direction(SyncDirection::BiDirectional);

        sync.start();
        assert_eq!(target.get(), 10);

        target.set(25);
        assert!(sync.on_tick(TickPhase::Update));
        assert_eq!(source.get(), 25);

        // Nothing changed since.
        assert!(!sync.on_tick(TickPhase::Update));

        source.set(40);
        target.set(41);
        sync.on_tick(TickPhase::Update);
        assert_eq!(source.get(), 40);
        assert_eq!(target.get(), 40);
    }

    #[test]
    fn test_inverted_bool_bidirectional_is_stable() {
        let (source, target) = pair(true, true);
        let mut sync = PropertySync::inverted(source.clone(), target.clone())
            .with_direction(SyncDirection::BiDirectional);

        sync.start();
        assert!(!target.get());
        assert!(!sync.on_tick(TickPhase::Update));

        target.set(true);
        sync.on_tick(TickPhase::Update);
        assert!(!source.get());
        assert!(!sync.on_tick(TickPhase::Update));
    }

    #[test]
    fn test_bidirectional_sees_a_round_trip_edit() {
        let (source, target) = pair(1, 0);
        let mut sync = PropertySync::new(source.clone(), target.clone())
            .with_direction(SyncDirection::BiDirectional);
        sync.start();
        assert!(!sync.on_tick(TickPhase::Update));

        // Edited and restored between ticks: nothing to copy, and the sync
        // must not mistake the other side for the one that moved.
        target.set(5);
        target.set(1);
        assert!(!sync.on_tick(TickPhase::Update));
        assert_eq!(source.get(), 1);

        source.set(2);
        assert!(sync.on_tick(TickPhase::Update));
        assert_eq!(target.get(), 2);
        assert!(!sync.on_tick(TickPhase::Update));
    }

    #[test]
    fn test_trigger_phase_filtering() {
        let (source, target) = pair(0, 0);
        let mut sync = PropertySync::new(source.clone(), target.clone())
            .with_trigger(SyncTrigger::OnLateUpdate);
        sync.start();

        source.set(5);
        assert!(!sync.on_tick(TickPhase::Update));
        assert!(!sync.on_tick(TickPhase::FixedUpdate));
        assert_eq!(target.get(), 0);
        assert!(sync.on_tick(TickPhase::LateUpdate));
        assert_eq!(target.get(), 5);
    }

    #[test]
    fn test_on_start_runs_once() {
        let (source, target) = pair(1, 0);
        let mut sync = PropertySync::new(source.clone(), target.clone())
            .with_trigger(SyncTrigger::OnStart);

        sync.start();
        assert_eq!(target.get(), 1);
        assert!(!sync.is_enabled());

        source.set(2);
        sync.on_tick(TickPhase::Update);
        assert_eq!(target.get(), 1);
    }

    #[test]
    fn test_changed_signal_fires_on_writes_only() {
        let (source, target) = pair(1, 0);
        let mut sync = PropertySync::new(source.clone(), target.clone());
        let writes = Arc::new(AtomicUsize::new(0));

        let writes_clone = writes.clone();
        sync.changed.connect(move |direction| {
            assert_eq!(*direction, SyncDirection::SourceUpdatesTarget);
            writes_clone.fetch_add(1, Ordering::SeqCst);
        });

        sync.start();
        sync.on_tick(TickPhase::Update);
        sync.on_tick(TickPhase::Update);
        assert_eq!(writes.load(Ordering::SeqCst), 1);
    }
}
