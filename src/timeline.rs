//! Frame-based interpolation.
//!
//! Every value here is a pure function of a frame number and a curve defined
//! once at startup. Construction validates the curve; evaluation is total and
//! never fails, out-of-range frames are clamped (or extended, when asked).

mod easing;
mod spring;

pub use easing::Easing;
pub use spring::{spring, SpringConfig};

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TimelineError {
    #[error("a curve needs at least two keyframes, got {0}")]
    TooFewKeyframes(usize),
    #[error("keyframe ranges differ in length: {input} input frames, {output} output values")]
    LengthMismatch { input: usize, output: usize },
    #[error("input frames must be strictly increasing (index {0})")]
    NotIncreasing(usize),
    #[error("keyframes must be finite numbers")]
    NonFinite,
    #[error("segment ends before it starts: {start} > {end}")]
    InvertedSegment { start: f64, end: f64 },
}

/// What happens to frames outside the keyframe range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Extrapolate {
    #[default]
    Clamp,
    /// Keep following the slope of the outermost segment.
    Extend,
}

/// Two point linear interpolation, clamped on both sides.
///
/// `interpolate(5.0, [0.0, 10.0], [0.0, 1.0])` is `0.5`, and any frame past
/// `10.0` gives `1.0`. A zero-width input range behaves as a step.
pub fn interpolate(frame: f64, input: [f64; 2], output: [f64; 2]) -> f64 {
    let [f0, f1] = input;
    let [v0, v1] = output;
    if f1 <= f0 {
        return if frame < f0 { v0 } else { v1 };
    }
    if frame <= f0 {
        return v0;
    }
    if frame >= f1 {
        return v1;
    }
    v0 + (v1 - v0) * (frame - f0) / (f1 - f0)
}

/// A single property's interpolation window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    start: f64,
    end: f64,
    from: f64,
    to: f64,
    easing: Easing,
}

impl Segment {
    pub fn new(start: f64, end: f64, from: f64, to: f64) -> Result<Self, TimelineError> {
        if ![start, end, from, to].iter().all(|v| v.is_finite()) {
            return Err(TimelineError::NonFinite);
        }
        if start > end {
            return Err(TimelineError::InvertedSegment { start, end });
        }
        Ok(Self {
            start,
            end,
            from,
            to,
            easing: Easing::Linear,
        })
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn value_at(&self, frame: f64) -> f64 {
        if self.start == self.end {
            return if frame < self.start { self.from } else { self.to };
        }
        if frame <= self.start {
            return self.from;
        }
        if frame >= self.end {
            return self.to;
        }
        let t = (frame - self.start) / (self.end - self.start);
        self.from + (self.to - self.from) * self.easing.apply(t)
    }
}

/// Piecewise curve over more than two keyframes.
#[derive(Debug, Clone, PartialEq)]
pub struct Keyframes {
    input: Vec<f64>,
    output: Vec<f64>,
    easing: Easing,
    left: Extrapolate,
    right: Extrapolate,
}

impl Keyframes {
    pub fn new(input: Vec<f64>, output: Vec<f64>) -> Result<Self, TimelineError> {
        if input.len() != output.len() {
            return Err(TimelineError::LengthMismatch {
                input: input.len(),
                output: output.len(),
            });
        }
        if input.len() < 2 {
            return Err(TimelineError::TooFewKeyframes(input.len()));
        }
        if !input.iter().chain(output.iter()).all(|v| v.is_finite()) {
            return Err(TimelineError::NonFinite);
        }
        if let Some(i) = input.windows(2).position(|w| w[0] >= w[1]) {
            return Err(TimelineError::NotIncreasing(i + 1));
        }
        Ok(Self {
            input,
            output,
            easing: Easing::Linear,
            left: Extrapolate::Clamp,
            right: Extrapolate::Clamp,
        })
    }

    /// Shorthand for a two keyframe curve.
    pub fn linear(start: f64, end: f64, from: f64, to: f64) -> Result<Self, TimelineError> {
        Self::new(vec![start, end], vec![from, to])
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn extrapolate_left(mut self, mode: Extrapolate) -> Self {
        self.left = mode;
        self
    }

    pub fn extrapolate_right(mut self, mode: Extrapolate) -> Self {
        self.right = mode;
        self
    }

    pub fn first_frame(&self) -> f64 {
        self.input[0]
    }

    pub fn last_frame(&self) -> f64 {
        self.input[self.input.len() - 1]
    }

    pub fn value_at(&self, frame: f64) -> f64 {
        let last = self.input.len() - 1;
        if frame.is_nan() {
            return self.output[0];
        }
        if frame < self.input[0] {
            return match self.left {
                Extrapolate::Clamp => self.output[0],
                Extrapolate::Extend => self.segment_value(0, frame, false),
            };
        }
        if frame > self.input[last] {
            return match self.right {
                Extrapolate::Clamp => self.output[last],
                Extrapolate::Extend => self.segment_value(last - 1, frame, false),
            };
        }
        // index of the first keyframe strictly after `frame`
        let upper = self.input.partition_point(|&f| f <= frame);
        if upper > last {
            return self.output[last];
        }
        if self.input[upper - 1] == frame {
            return self.output[upper - 1];
        }
        self.segment_value(upper - 1, frame, true)
    }

    fn segment_value(&self, i: usize, frame: f64, eased: bool) -> f64 {
        let (f0, f1) = (self.input[i], self.input[i + 1]);
        let (v0, v1) = (self.output[i], self.output[i + 1]);
        let t = (frame - f0) / (f1 - f0);
        let t = if eased { self.easing.apply(t) } else { t };
        v0 + (v1 - v0) * t
    }
}
