use crate::config::{intro_timing, palette, VideoConfig, PROJECT_DEMO_FRAMES};
use crate::content::Project;
use crate::scene::{Composition, ElementKind, Layer, Placement, Property, SceneElement};
use crate::timeline::{Segment, TimelineError};

use super::{background_layer, fade_out, row_offset};

pub const PROJECT_DEMO_ID: &str = "ProjectDemo";

const CARD_START: u32 = 15;
const CARD_POP: f64 = 20.0;
const DETAILS_DELAY: f64 = 30.0;
const DETAILS_SLIDE: f64 = 20.0;
const BADGE_DELAY: u32 = 60;
const BADGE_STAGGER: u32 = 5;
const BADGE_POP: f64 = 10.0;
const BADGE_SPACING: f64 = 180.0;

/// What a project demo clip shows.
#[derive(Debug, Clone, PartialEq)]
pub struct DemoProps {
    pub title: String,
    pub description: String,
    pub tech: Vec<String>,
}

impl Default for DemoProps {
    fn default() -> Self {
        Self {
            title: "Sample Project".to_string(),
            description: "A comprehensive project description goes here.".to_string(),
            tech: vec![
                "React".to_string(),
                "Node.js".to_string(),
                "TypeScript".to_string(),
            ],
        }
    }
}

impl From<&Project> for DemoProps {
    fn from(project: &Project) -> Self {
        Self {
            title: project.title.clone(),
            description: project.description.clone(),
            tech: project.tech.iter().map(|t| t.trim().to_string()).collect(),
        }
    }
}

pub fn project_demo(props: &DemoProps, config: VideoConfig) -> Result<Composition, TimelineError> {
    let config = config.with_duration(PROJECT_DEMO_FRAMES);
    Ok(Composition::new(PROJECT_DEMO_ID, config)
        .track(Property::Opacity, fade_out(config.duration_in_frames)?)
        .layer(background_layer(intro_timing::BACKGROUND_FADE_IN)?)
        .layer(card(props)?))
}

fn card(props: &DemoProps) -> Result<Layer, TimelineError> {
    let start = f64::from(CARD_START);
    let details_from = start + DETAILS_DELAY;
    let details_to = details_from + DETAILS_SLIDE;

    let badges = props
        .tech
        .iter()
        .enumerate()
        .map(|(i, tech)| {
            Ok(SceneElement::new(
                format!("badge-{i}"),
                ElementKind::Pill {
                    label: tech.clone(),
                    color: palette::PRIMARY,
                    font_size: 20.0,
                },
            )
            .starting_at(CARD_START + BADGE_DELAY + i as u32 * BADGE_STAGGER)
            .placed(Placement::Center {
                dx: row_offset(i, props.tech.len(), BADGE_SPACING),
                dy: 130.0,
            })
            .track(Property::Opacity, Segment::new(0.0, BADGE_POP, 0.0, 1.0)?)
            .track(Property::Scale, Segment::new(0.0, BADGE_POP, 0.5, 1.0)?))
        })
        .collect::<Result<Vec<_>, TimelineError>>()?;

    Ok(Layer::new("card")
        .track(Property::Opacity, Segment::new(start, start + CARD_POP, 0.0, 1.0)?)
        .track(Property::Scale, Segment::new(start, start + CARD_POP, 0.9, 1.0)?)
        .element(SceneElement::new(
            "panel",
            ElementKind::Panel {
                width: 920.0,
                height: 480.0,
                fill: palette::SURFACE,
                accent: palette::PRIMARY,
            },
        ))
        .element(
            SceneElement::new(
                "title",
                ElementKind::Text {
                    content: props.title.clone(),
                    font_size: 56.0,
                    weight: 700,
                    color: palette::FOREGROUND,
                    letter_spacing: 0.0,
                },
            )
            .placed(Placement::Center {
                dx: 0.0,
                dy: -140.0,
            }),
        )
        .element(
            SceneElement::new(
                "description",
                ElementKind::Text {
                    content: props.description.clone(),
                    font_size: 28.0,
                    weight: 400,
                    color: palette::MUTED,
                    letter_spacing: 0.0,
                },
            )
            .placed(Placement::Center { dx: 0.0, dy: -20.0 })
            .track(
                Property::Opacity,
                Segment::new(details_from, details_to, 0.0, 1.0)?,
            )
            .track(
                Property::TranslateX,
                Segment::new(details_from, details_to, 100.0, 0.0)?,
            ),
        )
        .elements(badges))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo() -> Composition {
        project_demo(&DemoProps::default(), VideoConfig::default()).unwrap()
    }

    #[test]
    fn test_runs_ten_seconds() {
        let comp = demo();
        assert_eq!(comp.id, PROJECT_DEMO_ID);
        assert_eq!(comp.duration_in_frames(), 300);
        assert_eq!(comp.duration(), std::time::Duration::from_secs(10));
    }

    #[test]
    fn test_card_pops_in() {
        let comp = demo();
        let card = |f| comp.compose(f).layer("card").unwrap().style;
        assert_eq!(card(0).opacity, 0.0);
        assert_eq!(card(0).scale, 0.9);
        assert_eq!(card(25).opacity, 0.5);
        assert_eq!(card(35).opacity, 1.0);
        assert_eq!(card(35).scale, 1.0);
    }

    #[test]
    fn test_description_slides_in() {
        let comp = demo();
        let desc = |f| comp.compose(f).element("description").unwrap().style;
        assert_eq!(desc(45).translate_x, 100.0);
        assert_eq!(desc(55).translate_x, 50.0);
        assert_eq!(desc(65).translate_x, 0.0);
        assert_eq!(desc(65).opacity, 1.0);
    }

    #[test]
    fn test_badges_are_staggered() {
        let comp = demo();
        let frame = comp.compose(90);
        assert_eq!(frame.element("badge-0").unwrap().style.opacity, 1.0);
        assert_eq!(frame.element("badge-1").unwrap().style.opacity, 1.0);
        let third = frame.element("badge-2").unwrap().style;
        assert_eq!(third.opacity, 0.5);
        assert_eq!(third.scale, 0.75);
        assert!(frame.element("badge-3").is_none());
    }

    #[test]
    fn test_fades_out_at_end() {
        let comp = demo();
        assert_eq!(comp.compose(270).root.opacity, 1.0);
        assert_eq!(comp.compose(285).root.opacity, 0.5);
    }

    #[test]
    fn test_props_from_project_trim_tech() {
        let project = Project {
            title: "Steganography".to_string(),
            description: "Audio".to_string(),
            tech: vec![" Python".to_string()],
            github: "https://github.com/example/repo".to_string(),
            live: None,
            image: None,
        };
        let props = DemoProps::from(&project);
        assert_eq!(props.tech, vec!["Python".to_string()]);
    }
}
