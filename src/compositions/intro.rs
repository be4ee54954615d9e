use std::f64::consts::TAU;

use crate::config::{intro_timing as t, palette, VideoConfig, TECH_STACK};
use crate::scene::{Composition, ElementKind, Layer, Placement, Property, SceneElement};
use crate::timeline::{Keyframes, Segment, TimelineError};

use super::{background_layer, fade_out, row_offset};

pub const INTRO_ID: &str = "IntroVideo";

const NAME_FONT_SIZE: f64 = 140.0;
// average advance of a bold system-ui glyph, relative to font size
const GLYPH_ADVANCE: f64 = 0.6;
const NAME_RISE: f64 = 30.0;
const SUBTITLE_RISE: f64 = 20.0;
const ORBIT_RADIUS: f64 = 200.0;
const PARTICLE_OPACITY: f64 = 0.3;
const PROMPT_BOTTOM: f64 = 80.0;
const PROMPT_DRIFT: f64 = 10.0;
const PROMPT_EASE: f64 = 10.0;

/// Builds the intro clip for `owner`.
pub fn intro_video(
    owner: &str,
    subtitle: &str,
    config: VideoConfig,
) -> Result<Composition, TimelineError> {
    let duration = config.duration_in_frames;
    Ok(Composition::new(INTRO_ID, config)
        .track(Property::Opacity, fade_out(duration)?)
        .layer(background_layer(t::BACKGROUND_FADE_IN)?)
        .layer(particles(&config)?)
        .layer(name_reveal(owner, subtitle)?)
        .layer(tech_orbit()?)
        .layer(scroll_prompt(&config)?))
}

fn particles(config: &VideoConfig) -> Result<Layer, TimelineError> {
    let (converge_start, converge_end) = (
        f64::from(t::PARTICLE_CONVERGE.0),
        f64::from(t::PARTICLE_CONVERGE.1),
    );
    let width = f64::from(config.width);
    let height = f64::from(config.height);

    let dots = (0..t::PARTICLE_COUNT)
        .map(|i| {
            let x = f64::from((i * 67) % 100);
            let y = f64::from((i * 43) % 100);
            let delay = f64::from(i * 3);
            let opacity = Keyframes::new(
                vec![delay, delay + 30.0, converge_start, converge_end],
                vec![0.0, PARTICLE_OPACITY, PARTICLE_OPACITY, 0.0],
            )?;
            Ok(SceneElement::new(
                format!("particle-{i}"),
                ElementKind::Dot {
                    diameter: 6.0,
                    color: palette::PRIMARY,
                },
            )
            .placed(Placement::Percent { x, y })
            .track(Property::Opacity, opacity)
            .track(
                Property::TranslateX,
                Segment::new(converge_start, converge_end, 0.0, (50.0 - x) / 100.0 * width)?,
            )
            .track(
                Property::TranslateY,
                Segment::new(converge_start, converge_end, 0.0, (50.0 - y) / 100.0 * height)?,
            ))
        })
        .collect::<Result<Vec<_>, TimelineError>>()?;

    Ok(Layer::new("particles").elements(dots))
}

fn name_reveal(owner: &str, subtitle: &str) -> Result<Layer, TimelineError> {
    let letters = owner.chars().collect::<Vec<_>>();
    let fade = f64::from(t::LETTER_FADE);

    let mut layer = Layer::new("name");
    for (i, ch) in letters.iter().enumerate() {
        let start = t::NAME_START + i as u32 * t::LETTER_DELAY;
        layer = layer.element(
            SceneElement::new(
                format!("letter-{i}"),
                ElementKind::Glyph {
                    ch: *ch,
                    font_size: NAME_FONT_SIZE,
                    weight: 700,
                    color: palette::FOREGROUND,
                },
            )
            .starting_at(start)
            .placed(Placement::Center {
                dx: row_offset(i, letters.len(), NAME_FONT_SIZE * GLYPH_ADVANCE),
                dy: -50.0,
            })
            .track(Property::Opacity, Segment::new(0.0, fade, 0.0, 1.0)?)
            .track(Property::TranslateY, Segment::new(0.0, fade, NAME_RISE, 0.0)?),
        );
    }

    let from = f64::from(t::SUBTITLE_DELAY);
    let to = from + f64::from(t::SUBTITLE_SLIDE);
    Ok(layer.element(
        SceneElement::new(
            "subtitle",
            ElementKind::Text {
                content: subtitle.to_uppercase(),
                font_size: 48.0,
                weight: 300,
                color: palette::PRIMARY,
                letter_spacing: 0.2,
            },
        )
        .starting_at(t::NAME_START)
        .placed(Placement::Center { dx: 0.0, dy: 70.0 })
        .track(Property::Opacity, Segment::new(from, to, 0.0, 1.0)?)
        .track(Property::TranslateY, Segment::new(from, to, SUBTITLE_RISE, 0.0)?),
    ))
}

fn tech_orbit() -> Result<Layer, TimelineError> {
    let pop = f64::from(t::TECH_POP);
    let revolution = f64::from(t::TECH_REVOLUTION);
    let count = TECH_STACK.len() as f64;

    let badges = TECH_STACK
        .iter()
        .enumerate()
        .map(|(i, tech)| {
            Ok(SceneElement::new(
                format!("tech-{}", tech.name.to_lowercase()),
                ElementKind::Badge {
                    label: tech.name.to_string(),
                    color: tech.color,
                    diameter: 80.0,
                },
            )
            .starting_at(t::TECH_ORBIT_START + i as u32 * t::TECH_STAGGER)
            .placed(Placement::Orbit {
                radius: ORBIT_RADIUS,
                base_angle: i as f64 / count * TAU,
            })
            .track(Property::Rotation, Segment::new(0.0, revolution, 0.0, TAU)?)
            .track(Property::Scale, Segment::new(0.0, pop, 0.0, 1.0)?)
            .track(Property::Opacity, Segment::new(0.0, pop, 0.0, 1.0)?))
        })
        .collect::<Result<Vec<_>, TimelineError>>()?;

    Ok(Layer::new("tech").elements(badges))
}

fn scroll_prompt(config: &VideoConfig) -> Result<Layer, TimelineError> {
    let start = f64::from(t::SCROLL_PROMPT);
    let end = f64::from(config.duration_in_frames);
    let opacity = Keyframes::new(
        vec![start, start + PROMPT_EASE, end - PROMPT_EASE, end],
        vec![0.0, 1.0, 1.0, 0.0],
    )?;
    let drift = Segment::new(start, end, 0.0, PROMPT_DRIFT)?;
    let bottom = f64::from(config.height) / 2.0 - PROMPT_BOTTOM;

    Ok(Layer::new("prompt")
        .track(Property::Opacity, opacity)
        .track(Property::TranslateY, drift)
        .element(
            SceneElement::new(
                "prompt-text",
                ElementKind::Text {
                    content: "SCROLL TO EXPLORE".to_string(),
                    font_size: 18.0,
                    weight: 400,
                    color: palette::MUTED,
                    letter_spacing: 0.1,
                },
            )
            .placed(Placement::Center {
                dx: 0.0,
                dy: bottom - 34.0,
            }),
        )
        .element(
            SceneElement::new(
                "prompt-arrow",
                ElementKind::Icon {
                    symbol: "↓",
                    size: 24.0,
                    color: palette::MUTED,
                },
            )
            .placed(Placement::Center {
                dx: 0.0,
                dy: bottom - 12.0,
            }),
        ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn intro() -> Composition {
        intro_video("Najm Adams", "Software Developer", VideoConfig::default()).unwrap()
    }

    #[test]
    fn test_layout() {
        let comp = intro();
        assert_eq!(comp.id, INTRO_ID);
        assert_eq!(comp.duration_in_frames(), 180);
        // 30 particles, 10 letters + subtitle, 4 badges, 2 prompt parts, 1 background
        assert_eq!(comp.element_count(), 30 + 11 + 4 + 2 + 1);
    }

    #[test]
    fn test_background_fades_in() {
        let comp = intro();
        let opacity = |f| comp.compose(f).element("gradient").unwrap().style.opacity;
        assert_eq!(opacity(0), 0.0);
        assert!((opacity(5) - 1.0 / 3.0).abs() < 1e-9);
        assert_eq!(opacity(15), 1.0);
        assert_eq!(opacity(100), 1.0);
    }

    #[test]
    fn test_letters_are_staggered() {
        let comp = intro();
        let first = |f| comp.compose(f).element("letter-0").unwrap().style;
        assert_eq!(first(14).opacity, 0.0);
        assert_eq!(first(15).translate_y, 30.0);
        assert_eq!(first(20).opacity, 0.5);
        assert_eq!(first(25).opacity, 1.0);
        assert_eq!(first(25).translate_y, 0.0);

        let fourth = comp.compose(24);
        assert_eq!(fourth.element("letter-3").unwrap().style.opacity, 0.0);
        assert_eq!(fourth.element("letter-2").unwrap().style.opacity, 0.3);
    }

    #[test]
    fn test_letters_are_centred() {
        let comp = intro();
        let frame = comp.compose(0);
        let first = frame.element("letter-0").unwrap();
        let last = frame.element("letter-9").unwrap();
        assert!((first.x + last.x - 1920.0).abs() < 1e-9);
    }

    #[test]
    fn test_subtitle_window() {
        let comp = intro();
        let sub = |f| comp.compose(f).element("subtitle").unwrap().style;
        assert_eq!(sub(60).opacity, 0.0);
        assert_eq!(sub(60).translate_y, 20.0);
        assert_eq!(sub(75).opacity, 1.0);
        assert_eq!(sub(75).translate_y, 0.0);
    }

    #[test]
    fn test_tech_badges_orbit() {
        let comp = intro();
        let at_start = comp.compose(75);
        let react = at_start.element("tech-react").unwrap();
        assert_eq!(react.style.scale, 0.0);
        assert!((react.x - 1160.0).abs() < 1e-9);
        assert!((react.y - 540.0).abs() < 1e-9);

        let popped = comp.compose(90);
        assert_eq!(popped.element("tech-react").unwrap().style.opacity, 1.0);
        // second badge starts 8 frames later
        assert_eq!(popped.element("tech-next.js").unwrap().style.scale, 7.0 / 15.0);
    }

    #[test]
    fn test_particles_converge_on_centre() {
        let comp = intro();
        let frame = comp.compose(150);
        let p = frame.element("particle-5").unwrap();
        assert!((p.x + p.style.translate_x - 960.0).abs() < 1e-9);
        assert!((p.y + p.style.translate_y - 540.0).abs() < 1e-9);
        assert_eq!(p.style.opacity, 0.0);
        assert_eq!(comp.compose(100).element("particle-0").unwrap().style.opacity, 0.3);
    }

    #[test]
    fn test_prompt_and_fade_out() {
        let comp = intro();
        let prompt = |f| comp.compose(f).layer("prompt").unwrap().style;
        assert_eq!(prompt(149).opacity, 0.0);
        assert_eq!(prompt(160).opacity, 1.0);
        assert_eq!(prompt(165).opacity, 1.0);
        assert_eq!(prompt(165).translate_y, 5.0);

        assert_eq!(comp.compose(150).root.opacity, 1.0);
        assert_eq!(comp.compose(165).root.opacity, 0.5);
        assert!(comp.compose(179).root.opacity < 0.05);
    }
}
