use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactInfo {
    pub phone: String,
    pub email: String,
    pub address: String,
    pub hours: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialLinks {
    pub facebook: String,
    pub instagram: String,
    pub twitter: String,
    pub youtube: String,
}

/// Site-wide settings: built-in defaults overridden by the `general` settings document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteSettings {
    pub site_title: String,
    pub site_description: String,
    pub contact: ContactInfo,
    pub social: SocialLinks,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            site_title: "Blackberry Equestrian".to_string(),
            site_description:
                "Premier Hunter/Jumper boarding and training facility in Newtonville, Ontario"
                    .to_string(),
            contact: ContactInfo {
                address: "Newtonville, Ontario".to_string(),
                ..Default::default()
            },
            social: SocialLinks::default(),
        }
    }
}

/// Top-level override keys; absent keys leave the current value alone.
#[derive(Debug, Default, Deserialize)]
struct SettingsPatch {
    #[serde(alias = "siteTitle")]
    site_title: Option<String>,
    #[serde(alias = "siteDescription")]
    site_description: Option<String>,
    contact: Option<ContactInfo>,
    social: Option<SocialLinks>,
}

impl SiteSettings {
    /// Shallow-merge a settings document: each top-level key present replaces
    /// the current value wholesale.
    pub fn merge(&mut self, overrides: &Value) -> Result<()> {
        let patch: SettingsPatch =
            serde_json::from_value(overrides.clone()).context("Invalid site settings document")?;

        if let Some(title) = patch.site_title {
            self.site_title = title;
        }
        if let Some(description) = patch.site_description {
            self.site_description = description;
        }
        if let Some(contact) = patch.contact {
            self.contact = contact;
        }
        if let Some(social) = patch.social {
            self.social = social;
        }
        Ok(())
    }

    pub fn has_contact_info(&self) -> bool {
        !self.contact.phone.is_empty() || !self.contact.email.is_empty()
    }

    pub fn has_social_media(&self) -> bool {
        let s = &self.social;
        [&s.facebook, &s.instagram, &s.twitter, &s.youtube]
            .iter()
            .any(|link| !link.is_empty())
    }
}
