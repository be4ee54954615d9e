//! Page sections and scroll-spy.

use serde::{Deserialize, Serialize};

/// How far below the top of the viewport a section counts as active.
pub const SCROLL_PROBE_OFFSET: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Home,
    About,
    Skills,
    Projects,
    Contact,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Home,
        Section::About,
        Section::Skills,
        Section::Projects,
        Section::Contact,
    ];

    /// Element id and fragment of the section.
    pub fn id(&self) -> &'static str {
        match self {
            Section::Home => "home",
            Section::About => "about",
            Section::Skills => "skills",
            Section::Projects => "projects",
            Section::Contact => "contact",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Section::Home => "Home",
            Section::About => "About",
            Section::Skills => "Skills",
            Section::Projects => "Projects",
            Section::Contact => "Contact",
        }
    }
}

/// Vertical extent of a rendered section, in document pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionBounds {
    pub section: Section,
    pub top: f64,
    pub height: f64,
}

/// The first section containing the scroll probe, if any.
pub fn active_section(scroll_y: f64, bounds: &[SectionBounds]) -> Option<Section> {
    let probe = scroll_y + SCROLL_PROBE_OFFSET;
    bounds
        .iter()
        .find(|b| probe >= b.top && probe < b.top + b.height)
        .map(|b| b.section)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> Vec<SectionBounds> {
        Section::ALL
            .iter()
            .enumerate()
            .map(|(i, &section)| SectionBounds {
                section,
                top: i as f64 * 800.0,
                height: 800.0,
            })
            .collect()
    }

    #[test]
    fn test_probe_looks_ahead() {
        let bounds = layout();
        assert_eq!(active_section(0.0, &bounds), Some(Section::Home));
        assert_eq!(active_section(699.0, &bounds), Some(Section::Home));
        assert_eq!(active_section(700.0, &bounds), Some(Section::About));
        assert_eq!(active_section(3100.0, &bounds), Some(Section::Contact));
    }

    #[test]
    fn test_outside_every_section() {
        let bounds = layout();
        assert_eq!(active_section(3900.0, &bounds), None);
        assert_eq!(active_section(0.0, &[]), None);
    }

    #[test]
    fn test_first_match_wins_on_overlap() {
        let bounds = [
            SectionBounds {
                section: Section::Skills,
                top: 0.0,
                height: 500.0,
            },
            SectionBounds {
                section: Section::Projects,
                top: 0.0,
                height: 500.0,
            },
        ];
        assert_eq!(active_section(10.0, &bounds), Some(Section::Skills));
    }

    #[test]
    fn test_ids_are_unique() {
        let ids = Section::ALL
            .iter()
            .map(|s| s.id())
            .collect::<std::collections::HashSet<_>>();
        assert_eq!(ids.len(), Section::ALL.len());
    }
}
