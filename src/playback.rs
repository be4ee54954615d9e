//! Playback driver: owns the frame counter of one composition.
//!
//! The host calls [`Player::advance`] (or [`Player::tick`]) from its render
//! loop; listeners learn about frame changes and the end of the sequence
//! through [`Player::subscribe`].

use std::time::Duration;

use log::debug;

use crate::scene::Composition;
use crate::subscription::{Listeners, Subscription};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Paused,
    Playing,
    /// Reached the end of a non-looping sequence.
    Ended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerEvent {
    Play,
    Pause,
    FrameChanged(u32),
    /// Emitted once per run, after the last frame has been shown.
    Ended,
    Looped,
}

/// Turns wall-clock time into whole frames, carrying the remainder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameClock {
    frame_duration: Duration,
    carry: Duration,
}

impl FrameClock {
    pub fn new(fps: u32) -> Self {
        Self {
            frame_duration: Duration::from_secs(1) / fps.max(1),
            carry: Duration::ZERO,
        }
    }

    pub fn frame_duration(&self) -> Duration {
        self.frame_duration
    }

    /// Number of frames that elapsed, including time carried from earlier calls.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.carry += elapsed;
        let frames = self.carry.as_nanos() / self.frame_duration.as_nanos();
        let frames = u32::try_from(frames).unwrap_or(u32::MAX);
        self.carry = self.carry.saturating_sub(self.frame_duration * frames);
        frames
    }

    pub fn reset(&mut self) {
        self.carry = Duration::ZERO;
    }
}

pub struct Player {
    duration_in_frames: u32,
    frame: u32,
    state: PlaybackState,
    looping: bool,
    clock: FrameClock,
    listeners: Listeners<PlayerEvent>,
}

impl Player {
    pub fn new(duration_in_frames: u32, fps: u32) -> Self {
        Self {
            duration_in_frames,
            frame: 0,
            state: PlaybackState::Paused,
            looping: false,
            clock: FrameClock::new(fps),
            listeners: Listeners::new(),
        }
    }

    pub fn for_composition(composition: &Composition) -> Self {
        Self::new(composition.duration_in_frames(), composition.config.fps)
    }

    pub fn frame(&self) -> u32 {
        self.frame
    }

    pub fn last_frame(&self) -> u32 {
        self.duration_in_frames.saturating_sub(1)
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    pub fn frame_duration(&self) -> Duration {
        self.clock.frame_duration()
    }

    pub fn subscribe(&self, listener: impl Fn(&PlayerEvent) + Send + Sync + 'static) -> Subscription {
        self.listeners.subscribe(listener)
    }

    /// Starts playback; an ended sequence restarts from the first frame.
    pub fn play(&mut self) {
        if self.state == PlaybackState::Playing {
            return;
        }
        if self.state == PlaybackState::Ended {
            self.set_frame(0);
        }
        self.state = PlaybackState::Playing;
        self.clock.reset();
        debug!("playback started at frame {}", self.frame);
        self.listeners.emit(&PlayerEvent::Play);
    }

    pub fn pause(&mut self) {
        if self.state != PlaybackState::Playing {
            return;
        }
        self.state = PlaybackState::Paused;
        debug!("playback paused at frame {}", self.frame);
        self.listeners.emit(&PlayerEvent::Pause);
    }

    pub fn toggle(&mut self) {
        if self.is_playing() {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Pauses and rewinds to the first frame.
    pub fn stop(&mut self) {
        self.pause();
        self.seek(0);
    }

    pub fn seek(&mut self, frame: u32) {
        let frame = frame.min(self.last_frame());
        if self.state == PlaybackState::Ended {
            self.state = PlaybackState::Paused;
        }
        self.set_frame(frame);
    }

    pub fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    /// Advances one frame while playing.
    pub fn tick(&mut self) {
        if self.state != PlaybackState::Playing {
            return;
        }
        if self.frame < self.last_frame() {
            self.set_frame(self.frame + 1);
            return;
        }
        if self.looping {
            debug!("playback looped");
            self.listeners.emit(&PlayerEvent::Looped);
            self.set_frame(0);
        } else {
            self.state = PlaybackState::Ended;
            debug!("playback ended after {} frames", self.duration_in_frames);
            self.listeners.emit(&PlayerEvent::Ended);
        }
    }

    /// Advances by however many frames fit into `elapsed` wall-clock time.
    pub fn advance(&mut self, elapsed: Duration) {
        if !self.is_playing() {
            return;
        }
        for _ in 0..self.clock.advance(elapsed) {
            self.tick();
            if !self.is_playing() {
                break;
            }
        }
    }

    fn set_frame(&mut self, frame: u32) {
        if frame != self.frame {
            self.frame = frame;
            self.listeners.emit(&PlayerEvent::FrameChanged(frame));
        }
    }
}

impl std::fmt::Debug for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Player")
            .field("duration_in_frames", &self.duration_in_frames)
            .field("frame", &self.frame)
            .field("state", &self.state)
            .field("looping", &self.looping)
            .finish()
    }
}
