use chrono::{DateTime, Datelike, Utc};
use rust_embed::Embed;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use thiserror::Error;

use crate::config::VideoConfig;

pub const SITE_FILE: &str = "site.json";

static SITE: LazyLock<Result<SiteContent, ContentError>> = LazyLock::new(|| {
    let file = ContentAssets::get(SITE_FILE).ok_or(ContentError::Missing(SITE_FILE))?;
    SiteContent::parse(&file.data)
});

#[derive(Embed)]
#[folder = "content"]
pub struct ContentAssets;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ContentError {
    #[error("content file {0} is missing")]
    Missing(&'static str),
    #[error("couldn't parse site content: {0}")]
    Parse(String),
    #[error("skill {name} has level {level}, expected 0-100")]
    SkillLevel { name: String, level: u8 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillIcon {
    Globe,
    Database,
    Smartphone,
    Code,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    pub icon: SkillIcon,
    pub level: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub description: String,
    pub tech: Vec<String>,
    pub github: String,
    #[serde(default)]
    pub live: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactLink {
    pub label: String,
    pub icon: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub pitch: String,
    pub links: Vec<ContactLink>,
}

/// Everything the page renders, loaded from the embedded `site.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteContent {
    pub owner: String,
    pub role: String,
    pub tagline: String,
    pub about: Vec<String>,
    pub skills: Vec<Skill>,
    pub projects: Vec<Project>,
    pub contact: Contact,
    #[serde(default)]
    pub video: VideoConfig,
}

impl SiteContent {
    pub fn parse(data: &[u8]) -> Result<Self, ContentError> {
        let site: Self =
            serde_json::from_slice(data).map_err(|e| ContentError::Parse(e.to_string()))?;
        if let Some(skill) = site.skills.iter().find(|s| s.level > 100) {
            return Err(ContentError::SkillLevel {
                name: skill.name.clone(),
                level: skill.level,
            });
        }
        Ok(site)
    }

    pub fn project(&self, index: usize) -> Option<&Project> {
        self.projects.get(index)
    }
}

/// The embedded site content, parsed once per process.
pub fn site() -> Result<&'static SiteContent, ContentError> {
    SITE.as_ref().map_err(Clone::clone)
}

/// Year shown in the footer: the year the site was built.
pub fn copyright_year() -> i32 {
    DateTime::parse_from_rfc3339(env!("BUILD_TIME"))
        .map(|t| t.year())
        .unwrap_or_else(|_| Utc::now().year())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_site_parses() {
        let site = site().expect("embedded content should parse");
        assert_eq!(site.owner, "Najm Adams");
        assert_eq!(site.skills.len(), 4);
        assert_eq!(site.projects.len(), 6);
        assert_eq!(site.video, VideoConfig::default());
        assert!(site.project(0).unwrap().live.is_some());
        assert!(site.project(5).unwrap().live.is_none());
        assert!(site.project(6).is_none());
    }

    #[test]
    fn test_missing_video_uses_defaults() {
        let json = r#"{
            "owner": "A", "role": "B", "tagline": "C", "about": [],
            "skills": [], "projects": [],
            "contact": { "pitch": "hi", "links": [] }
        }"#;
        let site = SiteContent::parse(json.as_bytes()).unwrap();
        assert_eq!(site.video.fps, 30);
    }

    #[test]
    fn test_rejects_bad_skill_level() {
        let json = r#"{
            "owner": "A", "role": "B", "tagline": "C", "about": [],
            "skills": [{ "name": "Rust", "icon": "code", "level": 140 }],
            "projects": [],
            "contact": { "pitch": "hi", "links": [] }
        }"#;
        assert_eq!(
            SiteContent::parse(json.as_bytes()),
            Err(ContentError::SkillLevel {
                name: "Rust".to_string(),
                level: 140
            })
        );
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            SiteContent::parse(b"{ not json"),
            Err(ContentError::Parse(_))
        ));
    }

    #[test]
    fn test_copyright_year_is_plausible() {
        assert!(copyright_year() >= 2024);
    }
}
