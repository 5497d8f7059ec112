use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use uuid::Uuid;

const TOPIC_SLUG_PREFIX: &str = "tt-";
const MAX_SLUG_LENGTH: usize = 255;

static SEPARATOR_RE: OnceLock<Regex> = OnceLock::new();

fn separator_pattern() -> &'static Regex {
    SEPARATOR_RE.get_or_init(|| Regex::new(r"[^a-z0-9]+").unwrap())
}

/// URL-safe identifier of an anime or a topic
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    /// Topic slugs are random: `tt-` plus the first group of a fresh UUID
    pub fn for_topic() -> Self {
        let id = Uuid::new_v4().simple().to_string();
        Self(format!("{}{}", TOPIC_SLUG_PREFIX, &id[..8]))
    }

    /// Anime slugs follow the title: lower-cased, runs of anything that is
    /// not a letter or digit collapsed into one dash
    pub fn from_title(title: &str) -> Self {
        let lowered = title.to_lowercase();
        let dashed = separator_pattern().replace_all(&lowered, "-");
        let mut slug = dashed.trim_matches('-').to_string();
        slug.truncate(MAX_SLUG_LENGTH);
        Self(slug)
    }

    /// Wrap a slug read back from storage
    pub fn from_stored(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Slug> for String {
    fn from(slug: Slug) -> Self {
        slug.0
    }
}
