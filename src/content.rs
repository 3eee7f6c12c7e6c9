use rust_embed::Embed;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::sync::LazyLock;
use thiserror::Error;

/// Site content, loaded once. A file that fails to load leaves its section
/// empty rather than taking the page down.
pub static PORTFOLIO: LazyLock<Portfolio> = LazyLock::new(|| {
    Portfolio::load().unwrap_or_else(|e| {
        log::error!("couldn't load portfolio content: {e}");
        Portfolio::default()
    })
});

#[derive(Embed)]
#[folder = "content"]
pub struct Assets;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("content file not found: {0}")]
    Missing(String),
    #[error("couldn't parse {name}: {source}")]
    Parse {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechItem {
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectLinks {
    #[serde(default)]
    pub live: Option<String>,
    #[serde(default)]
    pub github: Option<String>,
    #[serde(default)]
    pub docs: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub category: String,
    pub tech_stack: Vec<TechItem>,
    #[serde(default)]
    pub screenshots: Vec<String>,
    #[serde(default)]
    pub links: ProjectLinks,
    #[serde(default)]
    pub clickable: bool,
}

impl Project {
    pub fn primary_screenshot(&self) -> Option<&str> {
        self.screenshots.first().map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillCategory {
    pub icon: String,
    pub title: String,
    pub description: String,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hobby {
    pub icon: String,
    pub title: String,
    pub description: String,
    pub preview: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CertStatus {
    Completed,
    InProgress,
    Planned,
}

impl CertStatus {
    pub const ALL: [CertStatus; 3] = [Self::Completed, Self::InProgress, Self::Planned];

    pub fn heading(self) -> &'static str {
        match self {
            Self::Completed => "✅ Completed",
            Self::InProgress => "🔄 In Progress",
            Self::Planned => "🎯 Interested In",
        }
    }

    /// Left border accent of a card.
    pub fn accent_class(self) -> &'static str {
        match self {
            Self::Completed => "border-green",
            Self::InProgress => "border-yellow",
            Self::Planned => "border-blue",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Certification {
    pub name: String,
    pub issuer: String,
    pub status: CertStatus,
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Portfolio {
    pub projects: Vec<Project>,
    pub skills: Vec<SkillCategory>,
    pub hobbies: Vec<Hobby>,
    pub certifications: Vec<Certification>,
}

impl Portfolio {
    pub fn load() -> Result<Self, ContentError> {
        Ok(Self {
            projects: load("projects.json")?,
            skills: load("skills.json")?,
            hobbies: load("hobbies.json")?,
            certifications: load("certifications.json")?,
        })
    }

    /// The project with `id`, or the first project when there is none.
    pub fn spotlight(&self, id: &str) -> Option<&Project> {
        self.projects
            .iter()
            .find(|p| p.id == id)
            .or_else(|| self.projects.first())
    }

    pub fn certifications_with(&self, status: CertStatus) -> Vec<&Certification> {
        self.certifications
            .iter()
            .filter(|c| c.status == status)
            .collect()
    }

    /// Projects twice over, for a seamless looping carousel.
    pub fn carousel(&self) -> impl Iterator<Item = (usize, &Project)> {
        self.projects.iter().chain(self.projects.iter()).enumerate()
    }
}

pub fn load<T: DeserializeOwned>(name: &str) -> Result<T, ContentError> {
    let file = Assets::get(name).ok_or_else(|| ContentError::Missing(name.to_string()))?;
    parse(name, &file.data)
}

fn parse<T: DeserializeOwned>(name: &str, data: &[u8]) -> Result<T, ContentError> {
    serde_json::from_slice(data).map_err(|source| ContentError::Parse {
        name: name.to_string(),
        source,
    })
}
