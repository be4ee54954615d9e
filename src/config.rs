use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Canvas and timing shared by every composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoConfig {
    pub fps: u32,
    pub width: u32,
    pub height: u32,
    pub duration_in_frames: u32,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            fps: 30,
            width: 1920,
            height: 1080,
            duration_in_frames: 180,
        }
    }
}

impl VideoConfig {
    pub fn with_duration(self, duration_in_frames: u32) -> Self {
        Self {
            duration_in_frames,
            ..self
        }
    }

    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs(1) / self.fps.max(1)
    }
}

pub const PROJECT_DEMO_FRAMES: u32 = 300;

/// Frame budget for each beat of the intro, at 30 fps.
pub mod intro_timing {
    pub const BACKGROUND_FADE_IN: u32 = 15;
    pub const NAME_START: u32 = 15;
    pub const LETTER_DELAY: u32 = 3;
    pub const LETTER_FADE: u32 = 10;
    pub const SUBTITLE_DELAY: u32 = 45;
    pub const SUBTITLE_SLIDE: u32 = 15;
    pub const TECH_ORBIT_START: u32 = 75;
    pub const TECH_STAGGER: u32 = 8;
    pub const TECH_POP: u32 = 15;
    pub const TECH_REVOLUTION: u32 = 120;
    pub const PARTICLE_COUNT: u32 = 30;
    pub const PARTICLE_CONVERGE: (u32, u32) = (120, 150);
    pub const SCROLL_PROMPT: u32 = 150;
    pub const FADE_OUT: u32 = 30;
}

/// Hex colours, as written into inline styles.
pub mod palette {
    pub const PRIMARY: &str = "#3b82f6";
    pub const SECONDARY: &str = "#8b5cf6";
    pub const BACKGROUND: &str = "#0f172a";
    pub const SURFACE: &str = "#1e293b";
    pub const FOREGROUND: &str = "#f8fafc";
    pub const MUTED: &str = "#64748b";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TechBadge {
    pub name: &'static str,
    pub color: &'static str,
}

pub const TECH_STACK: [TechBadge; 4] = [
    TechBadge {
        name: "React",
        color: "#61dafb",
    },
    TechBadge {
        name: "Next.js",
        color: "#ffffff",
    },
    TechBadge {
        name: "Node.js",
        color: "#68a063",
    },
    TechBadge {
        name: "TypeScript",
        color: "#3178c6",
    },
];
