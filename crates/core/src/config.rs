//! Site profiles.
//!
//! A [`SiteProfile`] captures everything that ties a run to one novel on one
//! site: where the listing page is, how chapter pages are laid out, which
//! template noise to drop, and how the bound book is titled. Profiles are
//! plain JSON so a similarly templated site can be targeted without code
//! changes; fields left out of the file take the default profile's values.
//!
//! # Example
//!
//! ```rust
//! use serialbook_core::SiteProfile;
//!
//! let profile = SiteProfile::from_json(r#"{
//!     "base_url": "https://example.com/novels/night-garden",
//!     "novel_slug": "night-garden",
//!     "book_title": "NIGHT GARDEN"
//! }"#).unwrap();
//!
//! assert_eq!(profile.paragraph_selector, "p");
//! assert_eq!(profile.book_title, "NIGHT GARDEN");
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::chapter::{DEFAULT_DENYLIST, Denylist, ExtractConfig, FALLBACK_TITLE};
use crate::links::LinkScope;
use crate::render::{RenderConfig, TitlePage};
use crate::{Result, SerialbookError};

/// Default artifact name, written to the working directory.
pub const DEFAULT_OUTPUT: &str = "Shine_On_Me_Numbered.pdf";

/// Novel and site description for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteProfile {
    /// Listing page that links to every chapter.
    pub base_url: String,
    /// Path segment identifying the novel's pages.
    pub novel_slug: String,
    /// Boilerplate keywords (case-insensitive substring match).
    pub denylist: Vec<String>,
    /// Title selectors in priority order.
    pub title_selectors: Vec<String>,
    pub paragraph_selector: String,
    pub min_paragraph_chars: usize,
    pub fallback_title: String,
    pub book_title: String,
    pub book_subtitle: Option<String>,
    /// Running header on pages after the first; `None` disables it.
    pub header_text: Option<String>,
    /// Label printed before each chapter number.
    pub chapter_label: String,
}

impl Default for SiteProfile {
    fn default() -> Self {
        Self {
            base_url: "https://www.readthedrama.com/novels/shine-on-me".to_string(),
            novel_slug: "shine-on-me".to_string(),
            denylist: DEFAULT_DENYLIST.iter().map(|k| k.to_string()).collect(),
            title_selectors: vec!["h1".to_string(), "h2".to_string()],
            paragraph_selector: "p".to_string(),
            min_paragraph_chars: 5,
            fallback_title: FALLBACK_TITLE.to_string(),
            book_title: "SHINE ON ME".to_string(),
            book_subtitle: Some("A Complete Novel Collection".to_string()),
            header_text: Some("Shine on Me".to_string()),
            chapter_label: "CHAPTER".to_string(),
        }
    }
}

impl SiteProfile {
    pub fn from_json(json: &str) -> Result<Self> {
        let profile: SiteProfile = serde_json::from_str(json)?;
        profile.validate()?;
        Ok(profile)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(SerialbookError::FileNotFound(path.to_path_buf()));
        }
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks the fields that would otherwise only fail mid-run.
    pub fn validate(&self) -> Result<()> {
        self.link_scope()?;
        if self.title_selectors.is_empty() {
            return Err(SerialbookError::ConfigError("at least one title selector is required".to_string()));
        }
        Ok(())
    }

    pub fn link_scope(&self) -> Result<LinkScope> {
        LinkScope::new(&self.base_url, &self.novel_slug)
    }

    pub fn extract_config(&self) -> ExtractConfig {
        ExtractConfig {
            title_selectors: self.title_selectors.clone(),
            paragraph_selector: self.paragraph_selector.clone(),
            denylist: Denylist::new(self.denylist.iter().cloned()),
            min_paragraph_chars: self.min_paragraph_chars,
            fallback_title: self.fallback_title.clone(),
        }
    }

    pub fn title_page(&self) -> TitlePage {
        TitlePage::new(&self.book_title, self.book_subtitle.as_deref())
    }

    pub fn render_config(&self) -> RenderConfig {
        RenderConfig { chapter_label: self.chapter_label.clone(), ..Default::default() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_profile_is_valid() {
        let profile = SiteProfile::default();
        profile.validate().unwrap();
        assert_eq!(profile.extract_config().denylist, Denylist::default());
        assert_eq!(profile.title_page().subtitle.as_deref(), Some("A Complete Novel Collection"));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let profile = SiteProfile::from_json(r#"{"novel_slug": "other", "base_url": "https://example.com/n/other"}"#)
            .unwrap();
        assert_eq!(profile.novel_slug, "other");
        assert_eq!(profile.min_paragraph_chars, 5);
        assert_eq!(profile.chapter_label, "CHAPTER");
    }

    #[test]
    fn test_json_round_trip_through_file() {
        let profile = SiteProfile { header_text: None, ..Default::default() };
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(profile.to_json().unwrap().as_bytes()).unwrap();

        assert_eq!(SiteProfile::from_file(file.path()).unwrap(), profile);
    }

    #[test]
    fn test_invalid_profiles() {
        assert!(matches!(
            SiteProfile::from_json(r#"{"base_url": "nope"}"#),
            Err(SerialbookError::InvalidUrl(_))
        ));
        assert!(matches!(
            SiteProfile::from_json(r#"{"title_selectors": []}"#),
            Err(SerialbookError::ConfigError(_))
        ));
        assert!(matches!(SiteProfile::from_json("{"), Err(SerialbookError::ConfigError(_))));
        assert!(matches!(
            SiteProfile::from_file(Path::new("/nonexistent/profile.json")),
            Err(SerialbookError::FileNotFound(_))
        ));
    }

    #[test]
    fn test_render_config_label() {
        let profile = SiteProfile { chapter_label: "Kapitel".to_string(), ..Default::default() };
        assert_eq!(profile.render_config().chapter_label, "Kapitel");
    }
}
