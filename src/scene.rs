//! Scene composition: timed elements against one shared frame counter.
//!
//! A [`Composition`] is built once and never mutated. [`Composition::compose`]
//! turns a frame number into the full set of styles for that frame; every
//! layer and element is evaluated independently of the others.

use std::time::Duration;

use crate::config::VideoConfig;
use crate::timeline::{spring, Keyframes, Segment, SpringConfig};

/// An animatable scalar of an element or layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    Opacity,
    TranslateX,
    TranslateY,
    Scale,
    /// Radians. For orbiting elements this is the orbit angle instead.
    Rotation,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Curve {
    Segment(Segment),
    Keyframes(Keyframes),
    /// Spring released at local frame 0, mapped onto `from..to`.
    Spring {
        config: SpringConfig,
        from: f64,
        to: f64,
    },
}

impl Curve {
    pub fn value_at(&self, frame: f64, fps: f64) -> f64 {
        match self {
            Curve::Segment(s) => s.value_at(frame),
            Curve::Keyframes(k) => k.value_at(frame),
            Curve::Spring { config, from, to } => from + (to - from) * spring(frame, fps, *config),
        }
    }
}

impl From<Segment> for Curve {
    fn from(value: Segment) -> Self {
        Self::Segment(value)
    }
}

impl From<Keyframes> for Curve {
    fn from(value: Keyframes) -> Self {
        Self::Keyframes(value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub property: Property,
    pub curve: Curve,
}

impl Track {
    pub fn new(property: Property, curve: impl Into<Curve>) -> Self {
        Self {
            property,
            curve: curve.into(),
        }
    }
}

/// Visual properties of one element at one frame. Lengths are canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    pub opacity: f64,
    pub translate_x: f64,
    pub translate_y: f64,
    pub scale: f64,
    pub rotation: f64,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            translate_x: 0.0,
            translate_y: 0.0,
            scale: 1.0,
            rotation: 0.0,
        }
    }
}

impl Style {
    fn evaluate(tracks: &[Track], frame: f64, fps: f64) -> Self {
        let mut style = Self::default();
        for track in tracks {
            let v = track.curve.value_at(frame, fps);
            match track.property {
                Property::Opacity => style.opacity = v,
                Property::TranslateX => style.translate_x = v,
                Property::TranslateY => style.translate_y = v,
                Property::Scale => style.scale = v,
                Property::Rotation => style.rotation = v,
            }
        }
        style
    }

    /// `transform` value with lengths rendered by `len`.
    pub fn transform_with(&self, len: impl Fn(f64) -> String) -> String {
        format!(
            "translate({}, {}) scale({:.4}) rotate({:.4}rad)",
            len(self.translate_x),
            len(self.translate_y),
            self.scale,
            self.rotation
        )
    }

    pub fn to_css(&self) -> String {
        format!(
            "opacity: {:.4}; transform: {};",
            self.opacity,
            self.transform_with(|px| format!("{px:.2}px"))
        )
    }
}

/// Where an element sits on the canvas before its own transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// Offset in pixels from the canvas centre.
    Center { dx: f64, dy: f64 },
    /// Position as a percentage of the canvas size.
    Percent { x: f64, y: f64 },
    /// On a circle around the centre; the rotation track drives the angle.
    Orbit { radius: f64, base_angle: f64 },
}

impl Default for Placement {
    fn default() -> Self {
        Self::Center { dx: 0.0, dy: 0.0 }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ElementKind {
    /// Full-canvas layer painted with a CSS background.
    Background { css: String },
    Glyph {
        ch: char,
        font_size: f64,
        weight: u16,
        color: &'static str,
    },
    Text {
        content: String,
        font_size: f64,
        weight: u16,
        color: &'static str,
        letter_spacing: f64,
    },
    /// Round icon with an abbreviation and a caption underneath.
    Badge {
        label: String,
        color: &'static str,
        diameter: f64,
    },
    /// Rounded label, as used for technology tags.
    Pill {
        label: String,
        color: &'static str,
        font_size: f64,
    },
    Panel {
        width: f64,
        height: f64,
        fill: &'static str,
        accent: &'static str,
    },
    Dot {
        diameter: f64,
        color: &'static str,
    },
    Icon {
        symbol: &'static str,
        size: f64,
        color: &'static str,
    },
}

/// Text drawn inside a badge: the label's first two characters, uppercased.
pub fn badge_abbreviation(label: &str) -> String {
    label.chars().take(2).flat_map(char::to_uppercase).collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneElement {
    pub id: String,
    pub kind: ElementKind,
    /// Frame at which the element's local timeline starts.
    pub start: u32,
    pub placement: Placement,
    pub tracks: Vec<Track>,
}

impl SceneElement {
    pub fn new(id: impl Into<String>, kind: ElementKind) -> Self {
        Self {
            id: id.into(),
            kind,
            start: 0,
            placement: Placement::default(),
            tracks: Vec::new(),
        }
    }

    pub fn starting_at(mut self, start: u32) -> Self {
        self.start = start;
        self
    }

    pub fn placed(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    pub fn track(mut self, property: Property, curve: impl Into<Curve>) -> Self {
        self.tracks.push(Track::new(property, curve));
        self
    }
}

/// Elements sharing a common transform, such as a card and its contents.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub id: String,
    /// Evaluated against the composition frame, not a local one.
    pub tracks: Vec<Track>,
    pub elements: Vec<SceneElement>,
}

impl Layer {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tracks: Vec::new(),
            elements: Vec::new(),
        }
    }

    pub fn track(mut self, property: Property, curve: impl Into<Curve>) -> Self {
        self.tracks.push(Track::new(property, curve));
        self
    }

    pub fn element(mut self, element: SceneElement) -> Self {
        self.elements.push(element);
        self
    }

    pub fn elements(mut self, elements: impl IntoIterator<Item = SceneElement>) -> Self {
        self.elements.extend(elements);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Composition {
    pub id: String,
    pub config: VideoConfig,
    /// Whole-scene tracks, e.g. the final fade out.
    pub tracks: Vec<Track>,
    pub layers: Vec<Layer>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComposedElement<'a> {
    pub element: &'a SceneElement,
    /// Anchor position in canvas pixels from the top-left corner.
    pub x: f64,
    pub y: f64,
    pub style: Style,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComposedLayer<'a> {
    pub id: &'a str,
    pub style: Style,
    pub elements: Vec<ComposedElement<'a>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComposedFrame<'a> {
    pub frame: u32,
    pub root: Style,
    pub layers: Vec<ComposedLayer<'a>>,
}

impl ComposedFrame<'_> {
    pub fn element(&self, id: &str) -> Option<&ComposedElement<'_>> {
        self.layers
            .iter()
            .flat_map(|l| l.elements.iter())
            .find(|e| e.element.id == id)
    }

    pub fn layer(&self, id: &str) -> Option<&ComposedLayer<'_>> {
        self.layers.iter().find(|l| l.id == id)
    }
}

impl Composition {
    pub fn new(id: impl Into<String>, config: VideoConfig) -> Self {
        Self {
            id: id.into(),
            config,
            tracks: Vec::new(),
            layers: Vec::new(),
        }
    }

    pub fn track(mut self, property: Property, curve: impl Into<Curve>) -> Self {
        self.tracks.push(Track::new(property, curve));
        self
    }

    pub fn layer(mut self, layer: Layer) -> Self {
        self.layers.push(layer);
        self
    }

    pub fn duration_in_frames(&self) -> u32 {
        self.config.duration_in_frames
    }

    pub fn last_frame(&self) -> u32 {
        self.config.duration_in_frames.saturating_sub(1)
    }

    pub fn duration(&self) -> Duration {
        Duration::from_secs(u64::from(self.config.duration_in_frames)) / self.config.fps.max(1)
    }

    pub fn element_count(&self) -> usize {
        self.layers.iter().map(|l| l.elements.len()).sum()
    }

    /// Styles for every layer and element at `frame`.
    ///
    /// Frames past the end resolve to the last frame.
    pub fn compose(&self, frame: u32) -> ComposedFrame<'_> {
        let frame = frame.min(self.last_frame());
        let fps = f64::from(self.config.fps);
        let at = f64::from(frame);
        ComposedFrame {
            frame,
            root: Style::evaluate(&self.tracks, at, fps),
            layers: self
                .layers
                .iter()
                .map(|layer| ComposedLayer {
                    id: &layer.id,
                    style: Style::evaluate(&layer.tracks, at, fps),
                    elements: layer
                        .elements
                        .iter()
                        .map(|el| self.compose_element(el, at, fps))
                        .collect(),
                })
                .collect(),
        }
    }

    fn compose_element<'a>(&self, element: &'a SceneElement, at: f64, fps: f64) -> ComposedElement<'a> {
        let local = at - f64::from(element.start);
        let mut style = Style::evaluate(&element.tracks, local, fps);
        let width = f64::from(self.config.width);
        let height = f64::from(self.config.height);
        let (x, y) = match element.placement {
            Placement::Center { dx, dy } => (width / 2.0 + dx, height / 2.0 + dy),
            Placement::Percent { x, y } => (width * x / 100.0, height * y / 100.0),
            Placement::Orbit { radius, base_angle } => {
                let angle = base_angle + style.rotation;
                style.rotation = 0.0;
                (
                    width / 2.0 + angle.cos() * radius,
                    height / 2.0 + angle.sin() * radius,
                )
            }
        };
        ComposedElement {
            element,
            x,
            y,
            style,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn dot() -> ElementKind {
        ElementKind::Dot {
            diameter: 6.0,
            color: "#fff",
        }
    }

    fn sample() -> Composition {
        Composition::new("sample", VideoConfig::default().with_duration(60))
            .track(
                Property::Opacity,
                Segment::new(30.0, 60.0, 1.0, 0.0).unwrap(),
            )
            .layer(
                Layer::new("main").element(
                    SceneElement::new("fade", dot())
                        .starting_at(10)
                        .track(Property::Opacity, Segment::new(0.0, 10.0, 0.0, 1.0).unwrap())
                        .track(Property::TranslateY, Segment::new(0.0, 10.0, 30.0, 0.0).unwrap()),
                ),
            )
    }

    #[test]
    fn test_element_offsets_are_local() {
        let comp = sample();
        let before = comp.compose(5);
        let el = before.element("fade").unwrap();
        assert_eq!(el.style.opacity, 0.0);
        assert_eq!(el.style.translate_y, 30.0);

        let mid = comp.compose(15);
        let el = mid.element("fade").unwrap();
        assert_eq!(el.style.opacity, 0.5);
        assert_eq!(el.style.translate_y, 15.0);

        let after = comp.compose(25);
        assert_eq!(after.element("fade").unwrap().style.opacity, 1.0);
    }

    #[test]
    fn test_compose_is_deterministic() {
        let comp = sample();
        for frame in [0, 7, 29, 45, 59] {
            assert_eq!(comp.compose(frame), comp.compose(frame));
        }
    }

    #[test]
    fn test_frames_past_end_clamp_to_last() {
        let comp = sample();
        let end = comp.compose(10_000);
        assert_eq!(end.frame, 59);
        assert_eq!(end, comp.compose(59));
        assert!(end.root.opacity < 0.05);
    }

    #[test]
    fn test_untracked_properties_keep_identity() {
        let comp = sample();
        let frame = comp.compose(0);
        assert_eq!(frame.layer("main").unwrap().style, Style::default());
        let el = frame.element("fade").unwrap();
        assert_eq!(el.style.scale, 1.0);
        assert_eq!((el.x, el.y), (960.0, 540.0));
    }

    #[test]
    fn test_orbit_turns_rotation_into_position() {
        let comp = Composition::new("orbit", VideoConfig::default()).layer(
            Layer::new("ring").element(
                SceneElement::new("moon", dot())
                    .placed(Placement::Orbit {
                        radius: 100.0,
                        base_angle: 0.0,
                    })
                    .track(
                        Property::Rotation,
                        Segment::new(0.0, 40.0, 0.0, PI).unwrap(),
                    ),
            ),
        );
        let start = comp.compose(0);
        let moon = start.element("moon").unwrap();
        assert!((moon.x - 1060.0).abs() < 1e-9);
        assert!((moon.y - 540.0).abs() < 1e-9);

        let half = comp.compose(20);
        let moon = half.element("moon").unwrap();
        assert!((moon.x - 960.0).abs() < 1e-9);
        assert!((moon.y - 640.0).abs() < 1e-9);
        assert_eq!(moon.style.rotation, 0.0);
    }

    #[test]
    fn test_percent_placement_and_spring_curve() {
        let comp = Composition::new("pop", VideoConfig::default()).layer(
            Layer::new("main").element(
                SceneElement::new("pop", dot())
                    .starting_at(30)
                    .placed(Placement::Percent { x: 25.0, y: 50.0 })
                    .track(
                        Property::Scale,
                        Curve::Spring {
                            config: SpringConfig::GENTLE,
                            from: 0.0,
                            to: 1.0,
                        },
                    ),
            ),
        );
        let f = comp.compose(10);
        let pop = f.element("pop").unwrap();
        assert_eq!((pop.x, pop.y), (480.0, 540.0));
        assert_eq!(pop.style.scale, 0.0);
        let settled = comp.compose(179);
        assert!((settled.element("pop").unwrap().style.scale - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_css_output() {
        let style = Style {
            opacity: 0.5,
            translate_x: 0.0,
            translate_y: 12.5,
            scale: 0.9,
            rotation: 0.0,
        };
        assert_eq!(
            style.to_css(),
            "opacity: 0.5000; transform: translate(0.00px, 12.50px) scale(0.9000) rotate(0.0000rad);"
        );
    }

    #[test]
    fn test_badge_abbreviation_is_uppercase() {
        assert_eq!(badge_abbreviation("rust"), "RU");
        assert_eq!(badge_abbreviation("TypeScript"), "TY");
        assert_eq!(badge_abbreviation("x"), "X");
        assert_eq!(badge_abbreviation(""), "");
    }

    #[test]
    fn test_duration() {
        let comp = sample();
        assert_eq!(comp.duration(), Duration::from_secs(2));
        assert_eq!(comp.element_count(), 1);
    }
}
