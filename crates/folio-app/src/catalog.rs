#![forbid(unsafe_code)]

//! Portfolio content: the project catalog and the profile.
//!
//! Everything here is compiled in and immutable. The host builds one
//! [`PortfolioContent`] at startup and shares it through an `Arc`.

use serde::{Deserialize, Serialize};

/// Symbolic icon, drawn as a glyph in the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Icon {
    #[default]
    Code,
    Person,
}

impl Icon {
    /// Terminal glyph.
    pub const fn glyph(self) -> &'static str {
        match self {
            Icon::Code => "</>",
            Icon::Person => "☻",
        }
    }

    /// Stable name used in the serialised view tree.
    pub const fn name(self) -> &'static str {
        match self {
            Icon::Code => "code",
            Icon::Person => "person",
        }
    }
}

/// One showcased project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub title: String,
    pub description: String,
    /// Opened through the host when the card's action is activated.
    pub repository_url: String,
    /// Display order is insertion order.
    pub tags: Vec<String>,
    #[serde(default)]
    pub icon: Icon,
}

impl ProjectEntry {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        repository_url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            repository_url: repository_url.into(),
            tags: Vec::new(),
            icon: Icon::default(),
        }
    }

    #[must_use]
    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn icon(mut self, icon: Icon) -> Self {
        self.icon = icon;
        self
    }
}

/// Errors from building a [`Catalog`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The catalog must list at least one project.
    Empty,
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::Empty => write!(f, "project catalog is empty"),
        }
    }
}

impl std::error::Error for CatalogError {}

/// Non-empty, ordered list of projects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    entries: Vec<ProjectEntry>,
}

impl Catalog {
    /// # Errors
    ///
    /// Returns [`CatalogError::Empty`] for an empty list.
    pub fn new(entries: Vec<ProjectEntry>) -> Result<Self, CatalogError> {
        if entries.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[ProjectEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&ProjectEntry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProjectEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a ProjectEntry;
    type IntoIter = std::slice::Iter<'a, ProjectEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// The profile header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileInfo {
    pub greeting: String,
    pub role: String,
    pub bio: String,
    pub skills: Vec<String>,
    pub avatar: Icon,
}

/// Profile plus catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortfolioContent {
    pub profile: ProfileInfo,
    pub catalog: Catalog,
}

impl PortfolioContent {
    pub fn new(profile: ProfileInfo, catalog: Catalog) -> Self {
        Self { profile, catalog }
    }

    /// The compiled-in portfolio.
    pub fn builtin() -> Self {
        let profile = ProfileInfo {
            greeting: "Hi, I'm Mauro".into(),
            role: "Multiplatform Developer".into(),
            bio: "Specialized in Kotlin, Android and Compose Multiplatform. \
                  I build smooth experiences for mobile, desktop and web."
                .into(),
            skills: vec!["Android".into(), "iOS".into(), "KMP".into()],
            avatar: Icon::Person,
        };

        let entries = vec![
            ProjectEntry::new(
                "Project 1: Existing App",
                "Short description of your first project on GitHub. \
                 Explain what problem it solves.",
                "https://github.com/TU_USUARIO/PROYECTO_1",
            )
            .tags(["Kotlin", "Android", "Firebase"]),
            ProjectEntry::new(
                "Project 2: Secondary App",
                "Description of your second project. \
                 Mention the key technologies you used.",
                "https://github.com/TU_USUARIO/PROYECTO_2",
            )
            .tags(["Java", "Room", "MVVM"]),
            ProjectEntry::new(
                "Multiplatform Portfolio (This project)",
                "A progressive web app and native app built with Compose Multiplatform. \
                 Runs on Android, iOS, Desktop and Web (Wasm).",
                "https://github.com/TU_USUARIO/mauro_portafolio",
            )
            .tags(["KMP", "Compose", "Wasm", "Web"]),
        ];

        Self {
            profile,
            catalog: Catalog { entries },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_catalog_is_rejected() {
        assert_eq!(Catalog::new(Vec::new()), Err(CatalogError::Empty));
        assert_eq!(CatalogError::Empty.to_string(), "project catalog is empty");
    }

    #[test]
    fn catalog_keeps_order() {
        let catalog = Catalog::new(vec![
            ProjectEntry::new("B", "", "u2"),
            ProjectEntry::new("A", "", "u1"),
        ])
        .unwrap();
        let titles: Vec<_> = catalog.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, ["B", "A"]);
        assert_eq!(catalog.get(1).map(|e| e.repository_url.as_str()), Some("u1"));
        assert!(!catalog.is_empty());
    }

    #[test]
    fn builtin_content() {
        let content = PortfolioContent::builtin();
        assert_eq!(content.catalog.len(), 3);
        assert_eq!(content.profile.skills, ["Android", "iOS", "KMP"]);
        assert_eq!(content.profile.avatar, Icon::Person);

        let last = content.catalog.get(2).unwrap();
        assert_eq!(last.repository_url, "https://github.com/TU_USUARIO/mauro_portafolio");
        assert_eq!(last.tags, ["KMP", "Compose", "Wasm", "Web"]);
        assert!(content.catalog.iter().all(|e| e.icon == Icon::Code));
    }

    #[test]
    fn icon_names_serialise_lowercase() {
        assert_eq!(serde_json::to_string(&Icon::Person).unwrap(), "\"person\"");
        assert_eq!(Icon::Code.name(), "code");
        assert_eq!(Icon::Code.glyph(), "</>");
    }

    #[test]
    fn entry_defaults_to_code_icon() {
        let json = r#"{"title":"T","description":"D","repository_url":"U","tags":["x"]}"#;
        let entry: ProjectEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.icon, Icon::Code);
        assert_eq!(entry, ProjectEntry::new("T", "D", "U").tags(["x"]));
    }
}
