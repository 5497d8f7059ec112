use std::sync::OnceLock;

use regex::Regex;

use crate::shared::errors::AppError;

static EXTENSION_RE: OnceLock<Regex> = OnceLock::new();

fn extension_pattern() -> &'static Regex {
    EXTENSION_RE.get_or_init(|| Regex::new(r"^[a-z0-9]{1,10}$").unwrap())
}

pub struct Validator;

impl Validator {
    pub fn validate_anime_title(title: &str) -> Result<(), AppError> {
        if title.trim().is_empty() {
            return Err(AppError::InvalidArgument(
                "Title cannot be empty".to_string(),
            ));
        }
        if title.len() > 255 {
            return Err(AppError::InvalidArgument(
                "Title too long (max 255 characters)".to_string(),
            ));
        }
        Ok(())
    }

    pub fn validate_topic_title(title: &str) -> Result<(), AppError> {
        if title.trim().is_empty() {
            return Err(AppError::InvalidArgument(
                "Topic title cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn validate_episodes(episodes: i32) -> Result<(), AppError> {
        if episodes < 0 {
            return Err(AppError::InvalidArgument(
                "Episode count cannot be negative".to_string(),
            ));
        }
        Ok(())
    }

    /// Extracts the extension of an uploaded file name and checks it against
    /// the allow-list. Returns the normalized (lower-case) extension.
    pub fn validate_image_extension(
        file_name: &str,
        allowed: &[String],
    ) -> Result<String, AppError> {
        let base = file_name.rsplit(['/', '\\']).next().unwrap_or(file_name);
        let extension = match base.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => ext.to_ascii_lowercase(),
            _ => {
                return Err(AppError::InvalidArgument(format!(
                    "File '{}' has no extension",
                    file_name
                )))
            }
        };

        if !extension_pattern().is_match(&extension) {
            return Err(AppError::InvalidArgument(format!(
                "File '{}' has a malformed extension",
                file_name
            )));
        }
        if !allowed.iter().any(|a| a.eq_ignore_ascii_case(&extension)) {
            return Err(AppError::InvalidArgument(format!(
                "Only image files are allowed ({}), got '.{}'",
                allowed.join(", "),
                extension
            )));
        }
        Ok(extension)
    }

    pub fn validate_pagination(page: u32, page_size: u32) -> Result<(), AppError> {
        if page == 0 {
            return Err(AppError::InvalidArgument(
                "Page numbers start at 1".to_string(),
            ));
        }
        if page_size == 0 {
            return Err(AppError::InvalidArgument(
                "Page size must be positive".to_string(),
            ));
        }
        if page_size > 100 {
            return Err(AppError::InvalidArgument(
                "Page size cannot exceed 100".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allowed() -> Vec<String> {
        vec!["jpg".into(), "jpeg".into(), "png".into()]
    }

    #[test]
    fn test_extension_is_lowercased() {
        assert_eq!(
            Validator::validate_image_extension("Poster.PNG", &allowed()).unwrap(),
            "png"
        );
    }

    #[test]
    fn test_extension_outside_allow_list_is_rejected() {
        let err = Validator::validate_image_extension("clip.gif", &allowed()).unwrap_err();
        assert!(matches!(err, AppError::InvalidArgument(_)));
    }

    #[test]
    fn test_extension_injection_is_rejected() {
        assert!(Validator::validate_image_extension("a.png/../../etc", &allowed()).is_err());
        assert!(Validator::validate_image_extension("evil.p ng", &allowed()).is_err());
        assert!(Validator::validate_image_extension(".png", &allowed()).is_err());
        assert!(Validator::validate_image_extension("noext", &allowed()).is_err());
    }

    #[test]
    fn test_pagination_bounds() {
        assert!(Validator::validate_pagination(1, 10).is_ok());
        assert!(Validator::validate_pagination(0, 10).is_err());
        assert!(Validator::validate_pagination(1, 0).is_err());
        assert!(Validator::validate_pagination(1, 101).is_err());
    }
}
