//! Avatar URLs.
//!
//! A user's own avatar URL wins. Without one, a generated-initials image URL
//! is built; its background color is derived from the name so a user keeps
//! the same color everywhere.

use sha2::{Digest, Sha256};
use url::Url;

use crm_common::UserProfile;

use crate::config::Config;

/// Up to two uppercase initials: first letter of the first and last words.
pub fn initials(name: &str) -> String {
    let mut words = name.split_whitespace();
    let Some(first) = words.next() else {
        return "?".to_string();
    };

    let mut out: String = first.chars().take(1).flat_map(char::to_uppercase).collect();
    if let Some(last) = words.next_back() {
        out.extend(last.chars().take(1).flat_map(char::to_uppercase));
    }
    out
}

/// Six hex digit background color for `name`.
pub fn background_color(name: &str) -> String {
    let digest = Sha256::digest(name.trim().to_lowercase().as_bytes());
    hex::encode(&digest[..3])
}

/// Builds avatar URLs against a generated-avatar service.
#[derive(Debug, Clone)]
pub struct AvatarGenerator {
    base_url: String,
    size: u32,
}

impl AvatarGenerator {
    pub fn new(base_url: impl Into<String>, size: u32) -> Self {
        Self {
            base_url: base_url.into(),
            size,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.avatar_base_url.clone(), config.avatar_size)
    }

    /// Avatar URL for `name`, preferring a non-blank `explicit` URL.
    ///
    /// Generated URLs carry only the initials; the background is seeded by
    /// the full name.
    pub fn url_for(&self, name: &str, explicit: Option<&str>) -> Result<String, url::ParseError> {
        if let Some(url) = explicit.map(str::trim).filter(|u| !u.is_empty()) {
            return Ok(url.to_string());
        }

        let name = name.trim();
        let seed = if name.is_empty() { "?" } else { name };

        let mut url = Url::parse(&self.base_url)?;
        url.query_pairs_mut()
            .append_pair("name", &initials(name))
            .append_pair("size", &self.size.to_string())
            .append_pair("background", &background_color(seed))
            .append_pair("color", "ffffff");
        Ok(url.into())
    }

    /// Avatar URL for a profile. Falls back to the email when the display
    /// name is blank.
    pub fn url_for_profile(&self, profile: &UserProfile) -> Result<String, url::ParseError> {
        let name = if profile.display_name.trim().is_empty() {
            profile.email.as_deref().unwrap_or_default()
        } else {
            profile.display_name.as_str()
        };
        self.url_for(name, profile.avatar_url.as_deref())
    }
}
