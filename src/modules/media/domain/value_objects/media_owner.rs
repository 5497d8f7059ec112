use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Directory holding anime cover images (one per anime, outside the media set)
pub const COVER_DIRECTORY: &str = "anime/cover";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, DbEnum)]
#[ExistingTypePath = "crate::schema::sql_types::MediaOwnerKind"]
#[serde(rename_all = "lowercase")]
pub enum MediaOwnerKind {
    Anime,
    Topic,
}

impl MediaOwnerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaOwnerKind::Anime => "anime",
            MediaOwnerKind::Topic => "topic",
        }
    }

    /// Storage directory that photos of this owner kind are written to
    pub fn media_directory(&self) -> &'static str {
        match self {
            MediaOwnerKind::Anime => "anime/content",
            MediaOwnerKind::Topic => "topic",
        }
    }
}

impl fmt::Display for MediaOwnerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The anime or topic a media asset belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaOwner {
    pub kind: MediaOwnerKind,
    pub id: Uuid,
}

impl MediaOwner {
    pub fn anime(id: Uuid) -> Self {
        Self {
            kind: MediaOwnerKind::Anime,
            id,
        }
    }

    pub fn topic(id: Uuid) -> Self {
        Self {
            kind: MediaOwnerKind::Topic,
            id,
        }
    }

    /// Per-owner photo directory, e.g. `topic/<id>`. Files are content
    /// addressed, so keeping owners apart stops one owner's delete from
    /// removing bytes another owner still points at.
    pub fn media_directory(&self) -> String {
        format!("{}/{}", self.kind.media_directory(), self.id)
    }

    /// Per-anime cover directory, `anime/cover/<id>`
    pub fn cover_directory(&self) -> String {
        format!("{}/{}", COVER_DIRECTORY, self.id)
    }
}

impl fmt::Display for MediaOwner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directories_are_per_owner() {
        let id = Uuid::nil();
        assert_eq!(
            MediaOwner::anime(id).media_directory(),
            format!("anime/content/{}", id)
        );
        assert_eq!(MediaOwner::topic(id).media_directory(), format!("topic/{}", id));
        assert_eq!(MediaOwner::anime(id).cover_directory(), format!("anime/cover/{}", id));
    }
}
