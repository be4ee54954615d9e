//! Pointer-driven 3D tilt for cards.

/// Pointer position relative to an element's centre, each axis in `[-0.5, 0.5]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RelativePosition {
    pub x: f64,
    pub y: f64,
    pub hovering: bool,
}

/// Converts an offset inside an element of `width` x `height` to a centred position.
///
/// Offsets outside the element are clamped onto its edge; an empty element
/// reports the centre.
pub fn relative_position(offset_x: f64, offset_y: f64, width: f64, height: f64) -> RelativePosition {
    let axis = |offset: f64, size: f64| {
        if size > 0.0 {
            (offset / size).clamp(0.0, 1.0) - 0.5
        } else {
            0.0
        }
    };
    RelativePosition {
        x: axis(offset_x, width),
        y: axis(offset_y, height),
        hovering: true,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TiltOptions {
    /// Degrees at the element's edge.
    pub max_tilt: f64,
    pub perspective: f64,
    pub scale: f64,
    /// Transition length in milliseconds.
    pub speed: u32,
}

impl Default for TiltOptions {
    fn default() -> Self {
        Self {
            max_tilt: 10.0,
            perspective: 1000.0,
            scale: 1.02,
            speed: 300,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TiltStyle {
    pub transform: String,
    pub transition: String,
}

impl TiltStyle {
    pub fn to_css(&self) -> String {
        format!("transform: {}; transition: {};", self.transform, self.transition)
    }
}

pub fn tilt_style(position: RelativePosition, options: TiltOptions) -> TiltStyle {
    let transform = if position.hovering {
        format!(
            "perspective({}px) rotateX({:.2}deg) rotateY({:.2}deg) scale({})",
            options.perspective,
            -position.y * options.max_tilt,
            position.x * options.max_tilt,
            options.scale
        )
    } else {
        format!(
            "perspective({}px) rotateX(0deg) rotateY(0deg) scale(1)",
            options.perspective
        )
    };
    TiltStyle {
        transform,
        transition: format!(
            "transform {}ms cubic-bezier(0.03, 0.98, 0.52, 0.99)",
            options.speed
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centre_is_neutral() {
        let pos = relative_position(50.0, 25.0, 100.0, 50.0);
        assert_eq!((pos.x, pos.y), (0.0, 0.0));
        assert!(pos.hovering);
    }

    #[test]
    fn test_edges_and_clamping() {
        let pos = relative_position(0.0, 100.0, 100.0, 100.0);
        assert_eq!((pos.x, pos.y), (-0.5, 0.5));
        let outside = relative_position(250.0, -10.0, 100.0, 100.0);
        assert_eq!((outside.x, outside.y), (0.5, -0.5));
        let empty = relative_position(10.0, 10.0, 0.0, 0.0);
        assert_eq!((empty.x, empty.y), (0.0, 0.0));
    }

    #[test]
    fn test_hover_tilts_towards_pointer() {
        let style = tilt_style(
            RelativePosition {
                x: 0.5,
                y: -0.5,
                hovering: true,
            },
            TiltOptions::default(),
        );
        assert_eq!(
            style.transform,
            "perspective(1000px) rotateX(5.00deg) rotateY(5.00deg) scale(1.02)"
        );
    }

    #[test]
    fn test_leaving_resets() {
        let style = tilt_style(RelativePosition::default(), TiltOptions::default());
        assert_eq!(
            style.transform,
            "perspective(1000px) rotateX(0deg) rotateY(0deg) scale(1)"
        );
        assert!(style.to_css().contains("transition: transform 300ms"));
    }
}
