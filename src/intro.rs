//! Once-per-visitor intro overlay.
//!
//! Whether the intro has been seen lives behind [`SeenFlagStore`], injected
//! by whoever mounts the overlay. [`IntroController`] is the overlay's state
//! machine; the host feeds it events and carries out the returned actions.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Duration;

use log::{debug, warn};
use thiserror::Error;

use crate::subscription::{PreferenceSource, Subscription};

/// Storage key of the persisted flag.
pub const INTRO_SEEN_KEY: &str = "portfolio-intro-seen";

/// Media query signalling that animation should be suppressed.
pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

/// Pause between the last frame and the overlay closing itself.
pub const AUTO_DISMISS_DELAY: Duration = Duration::from_millis(500);

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FlagError {
    #[error("storage is unavailable")]
    Unavailable,
    #[error("couldn't write flag: {0}")]
    Write(String),
}

/// The persisted "seen intro" marker. Absence means not yet seen.
pub trait SeenFlagStore {
    fn has_seen(&self) -> bool;
    fn mark_seen(&self) -> Result<(), FlagError>;
}

/// In-process flag, for tests and for hosts without persistent storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryFlagStore {
    seen: Arc<AtomicBool>,
    read_only: bool,
}

impl MemoryFlagStore {
    pub fn new(seen: bool) -> Self {
        Self {
            seen: Arc::new(AtomicBool::new(seen)),
            read_only: false,
        }
    }

    /// A store whose writes always fail.
    pub fn read_only(seen: bool) -> Self {
        Self {
            read_only: true,
            ..Self::new(seen)
        }
    }
}

impl SeenFlagStore for MemoryFlagStore {
    fn has_seen(&self) -> bool {
        self.seen.load(Ordering::SeqCst)
    }

    fn mark_seen(&self) -> Result<(), FlagError> {
        if self.read_only {
            return Err(FlagError::Unavailable);
        }
        self.seen.store(true, Ordering::SeqCst);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntroState {
    /// Never opened: already seen, or motion is reduced.
    Skipped,
    Playing,
    /// Finished playing, waiting for the dismiss timer.
    Closing,
    Dismissed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntroEvent {
    Skip,
    PlaybackEnded,
    DismissTimerElapsed,
    ReducedMotionChanged(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntroAction {
    None,
    /// Start a timer and send `DismissTimerElapsed` when it fires.
    ScheduleDismiss(Duration),
    /// Stop the clip and cancel any pending dismissal.
    Suspend,
    /// Play the clip again from its first frame.
    Restart,
    Close,
}

pub struct IntroController<S> {
    store: S,
    state: IntroState,
    reduced_motion: bool,
    flag_written: bool,
}

impl<S: SeenFlagStore> IntroController<S> {
    /// Reads the flag once and decides whether the overlay opens.
    pub fn mount(store: S, reduced_motion: bool) -> Self {
        let seen = store.has_seen();
        let state = if seen || reduced_motion {
            IntroState::Skipped
        } else {
            IntroState::Playing
        };
        debug!("intro mounted: seen={seen} reduced_motion={reduced_motion} -> {state:?}");
        Self {
            store,
            state,
            reduced_motion,
            flag_written: false,
        }
    }

    pub fn state(&self) -> IntroState {
        self.state
    }

    /// Whether the overlay should be on screen right now.
    pub fn is_visible(&self) -> bool {
        matches!(self.state, IntroState::Playing | IntroState::Closing) && !self.reduced_motion
    }

    pub fn handle(&mut self, event: IntroEvent) -> IntroAction {
        match (self.state, event) {
            (_, IntroEvent::ReducedMotionChanged(reduced)) => self.set_reduced_motion(reduced),
            (IntroState::Playing | IntroState::Closing, IntroEvent::Skip) => self.dismiss(),
            // a suppressed clip can't finish
            (_, IntroEvent::PlaybackEnded | IntroEvent::DismissTimerElapsed)
                if self.reduced_motion =>
            {
                IntroAction::None
            }
            (IntroState::Playing, IntroEvent::PlaybackEnded) => {
                self.state = IntroState::Closing;
                IntroAction::ScheduleDismiss(AUTO_DISMISS_DELAY)
            }
            (IntroState::Closing, IntroEvent::DismissTimerElapsed) => self.dismiss(),
            _ => IntroAction::None,
        }
    }

    fn set_reduced_motion(&mut self, reduced: bool) -> IntroAction {
        if reduced == self.reduced_motion {
            return IntroAction::None;
        }
        self.reduced_motion = reduced;
        match (self.state, reduced) {
            (IntroState::Playing | IntroState::Closing, true) => {
                self.state = IntroState::Playing;
                IntroAction::Suspend
            }
            (IntroState::Playing, false) => IntroAction::Restart,
            _ => IntroAction::None,
        }
    }

    fn dismiss(&mut self) -> IntroAction {
        self.state = IntroState::Dismissed;
        if !self.flag_written {
            self.flag_written = true;
            // worst case the intro plays again on the next visit
            if let Err(e) = self.store.mark_seen() {
                warn!("couldn't persist {INTRO_SEEN_KEY}: {e}");
            }
        }
        IntroAction::Close
    }

    /// Forwards changes of `source` into this controller via `on_change`.
    ///
    /// The returned subscription must be held for as long as the overlay is
    /// mounted.
    pub fn watch_preference(
        source: &dyn PreferenceSource,
        on_change: impl Fn(IntroEvent) + Send + Sync + 'static,
    ) -> Subscription {
        source.subscribe(Box::new(move |reduced| {
            on_change(IntroEvent::ReducedMotionChanged(reduced))
        }))
    }
}
