#[cfg(not(feature = "hydrate"))]
use rust_embed::Embed;
use serde::{Deserialize, Serialize};
#[cfg(not(feature = "hydrate"))]
use std::sync::LazyLock;
use thiserror::Error;

use crate::tracker::{Section, SectionRegistry, TrackerConfig};

/// Name of the site document inside the embedded `data` folder.
pub const SITE_DATA_FILE: &str = "site.json";

#[cfg(not(feature = "hydrate"))]
static SITE_DATA: LazyLock<Result<SiteData, SiteDataError>> = LazyLock::new(read_site_data);

#[cfg(not(feature = "hydrate"))]
#[derive(Embed)]
#[folder = "data"]
pub struct DataAssets;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SiteDataError {
    #[error("site data not found: {0}")]
    NotFound(String),
    #[error("site data is not valid UTF-8")]
    Encoding,
    #[error("couldn't parse site data: {0}")]
    Parse(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteData {
    pub navigation: Vec<NavigationItem>,
    pub seo: SeoData,
    pub hero: HeroData,
    pub about: AboutData,
    pub skills: SkillsData,
    pub experience: ExperienceData,
    pub education: EducationData,
    pub contact: ContactData,
    pub tracker: Option<TrackerConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationItem {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub href: Option<String>,
    #[serde(default)]
    pub is_hidden: bool,
}

impl From<&NavigationItem> for Section {
    fn from(item: &NavigationItem) -> Self {
        Section::new(item.id.clone(), item.label.clone())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SeoData {
    pub title: String,
    pub description: String,
    pub keywords: String,
    pub author: String,
    pub og_image: String,
    pub twitter_handle: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Background {
    pub image: String,
    #[serde(default)]
    pub is_parallax: bool,
    #[serde(default)]
    pub is_animated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeroData {
    pub heading: String,
    pub greeting: String,
    pub titles: Vec<String>,
    pub scroll_text: String,
    pub flip_animation_duration: u64,
    pub title_change_interval: u64,
    pub background_image: Option<String>,
    pub background: Option<Background>,
}

impl Default for HeroData {
    fn default() -> Self {
        Self {
            heading: String::new(),
            greeting: String::new(),
            titles: Vec::new(),
            scroll_text: String::new(),
            flip_animation_duration: 500,
            title_change_interval: 3000,
            background_image: None,
            background: None,
        }
    }
}

impl HeroData {
    /// The explicit background block wins over the bare image url.
    pub fn effective_background(&self) -> Option<Background> {
        self.background.clone().or_else(|| {
            self.background_image
                .as_ref()
                .filter(|s| !s.trim().is_empty())
                .map(|image| Background {
                    image: image.clone(),
                    is_parallax: false,
                    is_animated: false,
                })
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AboutData {
    pub heading: String,
    pub subheading: String,
    pub image_url: String,
    pub contact_button_text: String,
    pub resume_url: String,
    pub resume_button_text: String,
    pub title_tags: Vec<String>,
    pub about_content: String,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub codepen: Option<String>,
    pub whatsapp_number: Option<String>,
    pub whatsapp_message: Option<String>,
}

impl AboutData {
    /// `wa.me` chat link: the number reduced to digits, the greeting percent
    /// encoded. `None` when no number with digits is configured.
    pub fn whatsapp_url(&self) -> Option<String> {
        let digits = self
            .whatsapp_number
            .as_deref()?
            .chars()
            .filter(char::is_ascii_digit)
            .collect::<String>();
        if digits.is_empty() {
            return None;
        }
        let url = match self.whatsapp_message.as_deref() {
            Some(msg) if !msg.trim().is_empty() => {
                format!("https://wa.me/{digits}?text={}", encode_uri_component(msg))
            }
            _ => format!("https://wa.me/{digits}"),
        };
        Some(url)
    }
}

/// Same escaping as `encodeURIComponent`.
fn encode_uri_component(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        match b {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(b as char),
            _ => out.push_str(&format!("%{b:02X}")),
        }
    }
    out
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SkillsData {
    pub heading: String,
    pub subheading: String,
    pub items: Vec<SkillItem>,
}

impl SkillsData {
    pub fn heading_or_default(&self) -> &str {
        non_blank_or(&self.heading, "My Skills")
    }

    pub fn subheading_or_default(&self) -> &str {
        non_blank_or(&self.subheading, "What I can do")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SkillItem {
    pub title: String,
    pub percentage: u32,
    pub subtitle: String,
    pub description: Option<String>,
    pub icon_src: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExperienceData {
    pub heading: String,
    pub subheading: String,
    pub jobs: Vec<JobItem>,
    pub background: Option<Background>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JobItem {
    pub title: String,
    pub company: String,
    pub employment_type: String,
    pub date_range: String,
    pub location: String,
    pub description: Vec<String>,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EducationData {
    pub heading: String,
    pub subheading: String,
    pub background: Option<Background>,
    pub academics: Vec<AcademicItem>,
    pub certifications: Vec<CertificationItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AcademicItem {
    pub degree: String,
    pub field_of_study: String,
    pub school: String,
    pub date_range: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CertificationItem {
    pub name: String,
    pub issuer: String,
    pub issue_date: String,
    pub credential_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactData {
    pub heading: String,
    pub subheading: String,
    pub get_in_touch_heading: String,
    pub get_in_touch_text: String,
    pub email: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub form_labels: FormLabels,
    pub form_buttons: FormButtons,
    pub form_messages: FormMessages,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormLabels {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormButtons {
    pub submit: String,
    pub sending: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormMessages {
    pub success: StatusMessage,
    pub error: StatusMessage,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusMessage {
    pub title: String,
    pub text: String,
}

impl SiteData {
    /// Every navigation item, hidden ones included, in document order.
    pub fn section_registry(&self) -> SectionRegistry {
        SectionRegistry::new(self.navigation.iter().map(Section::from))
    }

    /// Items that get a link in the navbar.
    pub fn visible_navigation(&self) -> impl Iterator<Item = &NavigationItem> {
        self.navigation.iter().filter(|item| !item.is_hidden)
    }

    /// Tracker settings from the document, or the defaults when the block is
    /// absent or invalid.
    pub fn tracker_config(&self) -> TrackerConfig {
        let Some(config) = self.tracker.clone() else {
            return TrackerConfig::default();
        };
        match config.validated() {
            Ok(config) => config,
            Err(e) => {
                log::warn!("ignoring tracker settings: {e}");
                TrackerConfig::default()
            }
        }
    }
}

fn non_blank_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() {
        fallback
    } else {
        value
    }
}

pub fn parse_site_data(content: &str) -> Result<SiteData, SiteDataError> {
    serde_json::from_str(content).map_err(|e| SiteDataError::Parse(e.to_string()))
}

#[cfg(not(feature = "hydrate"))]
fn read_site_data() -> Result<SiteData, SiteDataError> {
    let file = DataAssets::get(SITE_DATA_FILE)
        .ok_or_else(|| SiteDataError::NotFound(SITE_DATA_FILE.to_string()))?;
    let content = std::str::from_utf8(&file.data).map_err(|_| SiteDataError::Encoding)?;
    parse_site_data(content)
}

/// The embedded site document, parsed once.
#[cfg(not(feature = "hydrate"))]
pub fn load_site_data() -> Result<SiteData, SiteDataError> {
    SITE_DATA.clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_site_data_parses() {
        let data = load_site_data().expect("embedded site data should parse");
        assert!(!data.navigation.is_empty());
        let registry = data.section_registry();
        assert!(registry.contains("home"));
        assert!(registry.contains("contact"));
        assert!(!data.contact.form_buttons.submit.is_empty());
    }

    #[test]
    fn test_minimal_document_uses_defaults() {
        let data = parse_site_data(
            r##"{ "navigation": [{ "id": "about", "label": "About", "href": "#about" }] }"##,
        )
        .expect("minimal document");
        assert_eq!(data.navigation.len(), 1);
        assert!(!data.navigation[0].is_hidden);
        assert_eq!(data.hero.title_change_interval, 3000);
        assert_eq!(data.hero.flip_animation_duration, 500);
        assert_eq!(data.skills.heading_or_default(), "My Skills");
        assert_eq!(data.skills.subheading_or_default(), "What I can do");
        assert_eq!(data.tracker_config(), TrackerConfig::default());
    }

    #[test]
    fn test_hidden_items_tracked_but_not_linked() {
        let data = parse_site_data(
            r#"{ "navigation": [
                { "id": "home", "label": "Home", "isHidden": true },
                { "id": "about", "label": "About" }
            ] }"#,
        )
        .expect("valid document");
        assert_eq!(data.section_registry().len(), 2);
        let linked = data
            .visible_navigation()
            .map(|i| i.id.as_str())
            .collect::<Vec<_>>();
        assert_eq!(linked, vec!["about"]);
    }

    #[test]
    fn test_invalid_tracker_block_falls_back() {
        let data = parse_site_data(r#"{ "tracker": { "visibilityThreshold": 2.0 } }"#)
            .expect("valid document");
        assert_eq!(data.tracker_config(), TrackerConfig::default());

        let data = parse_site_data(r#"{ "tracker": { "suppressionMs": 1500 } }"#)
            .expect("valid document");
        assert_eq!(data.tracker_config().suppression_ms, 1500);
    }

    #[test]
    fn test_malformed_document() {
        let err = parse_site_data(r#"{ "navigation": 12 }"#).unwrap_err();
        assert!(matches!(err, SiteDataError::Parse(_)));
    }

    #[test]
    fn test_whatsapp_url() {
        let about = AboutData {
            whatsapp_number: Some("+1 (555) 010-4477".to_string()),
            whatsapp_message: Some("Hi, café & more?".to_string()),
            ..AboutData::default()
        };
        assert_eq!(
            about.whatsapp_url().as_deref(),
            Some("https://wa.me/15550104477?text=Hi%2C%20caf%C3%A9%20%26%20more%3F")
        );

        let bare = AboutData {
            whatsapp_number: Some("555 0100".to_string()),
            ..AboutData::default()
        };
        assert_eq!(bare.whatsapp_url().as_deref(), Some("https://wa.me/5550100"));

        let none = AboutData {
            whatsapp_number: Some("n/a".to_string()),
            ..AboutData::default()
        };
        assert_eq!(none.whatsapp_url(), None);
        assert_eq!(AboutData::default().whatsapp_url(), None);
    }

    #[test]
    fn test_hero_background_fallback() {
        let hero = HeroData {
            background_image: Some("/images/hero.webp".to_string()),
            ..HeroData::default()
        };
        let bg = hero.effective_background().expect("image url given");
        assert_eq!(bg.image, "/images/hero.webp");
        assert!(!bg.is_parallax);
        assert_eq!(HeroData::default().effective_background(), None);
    }
}
