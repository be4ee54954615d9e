//! The two clips the site plays: the intro and the per-project demo.

mod intro;
mod project_demo;

pub use intro::{intro_video, INTRO_ID};
pub use project_demo::{project_demo, DemoProps, PROJECT_DEMO_ID};

use crate::config::{intro_timing, palette};
use crate::scene::{ElementKind, Layer, Property, SceneElement};
use crate::timeline::{Extrapolate, Keyframes, Segment, TimelineError};

/// Gradient backdrop fading in over the first `fade_in` frames.
fn background_layer(fade_in: u32) -> Result<Layer, TimelineError> {
    let css = format!(
        "radial-gradient(ellipse at 30% 20%, {p}40 0%, transparent 50%), \
         radial-gradient(ellipse at 70% 80%, {s}30 0%, transparent 50%), \
         linear-gradient(180deg, {b} 0%, {surface} 100%)",
        p = palette::PRIMARY,
        s = palette::SECONDARY,
        b = palette::BACKGROUND,
        surface = palette::SURFACE,
    );
    // only the far side is clamped; frames never go negative anyway
    let opacity = Keyframes::linear(0.0, f64::from(fade_in), 0.0, 1.0)?
        .extrapolate_left(Extrapolate::Extend);
    Ok(Layer::new("background").element(
        SceneElement::new("gradient", ElementKind::Background { css })
            .track(Property::Opacity, opacity),
    ))
}

/// Whole-scene fade over the last frames of a clip.
fn fade_out(duration: u32) -> Result<Segment, TimelineError> {
    let end = f64::from(duration);
    let start = f64::from(duration.saturating_sub(intro_timing::FADE_OUT));
    Segment::new(start, end, 1.0, 0.0)
}

/// Horizontal offset of item `index` in a centred row of `count` items.
fn row_offset(index: usize, count: usize, spacing: f64) -> f64 {
    (index as f64 - (count.saturating_sub(1)) as f64 / 2.0) * spacing
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_offset_is_centred() {
        assert_eq!(row_offset(0, 1, 50.0), 0.0);
        assert_eq!(row_offset(0, 3, 50.0), -50.0);
        assert_eq!(row_offset(2, 3, 50.0), 50.0);
        assert_eq!(row_offset(1, 4, 10.0), -5.0);
    }

    #[test]
    fn test_fade_out_window() {
        let seg = fade_out(180).unwrap();
        assert_eq!(seg.start(), 150.0);
        assert_eq!(seg.end(), 180.0);
        assert_eq!(seg.value_at(165.0), 0.5);
    }
}
