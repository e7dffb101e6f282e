use std::borrow::Cow;
use validator::{ValidateUrl, ValidationError};

use crate::models::project::{PROJECT_CATEGORIES, PROJECT_STATUSES};

const MAX_TECH_ITEMS: usize = 20;
const MAX_TECH_ITEM_LEN: usize = 50;
const MAX_IMAGES: usize = 10;

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

/// Accepts an empty string (treated as "clear the field") or a valid URL.
pub fn validate_optional_url(value: &str) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.validate_url() {
        Ok(())
    } else {
        Err(invalid("url", "Must be a valid URL"))
    }
}

pub fn validate_hex_color(value: &str) -> Result<(), ValidationError> {
    let valid = value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit());
    if valid {
        Ok(())
    } else {
        Err(invalid("color", "Color must be a hex value like #6b66da"))
    }
}

pub fn validate_project_category(value: &str) -> Result<(), ValidationError> {
    if PROJECT_CATEGORIES.contains(&value) {
        Ok(())
    } else {
        Err(invalid("category", "Please select a valid category"))
    }
}

pub fn validate_project_status(value: &str) -> Result<(), ValidationError> {
    if PROJECT_STATUSES.contains(&value) {
        Ok(())
    } else {
        Err(invalid("status", "Please select a valid status"))
    }
}

pub fn validate_tech_stack(items: &[String]) -> Result<(), ValidationError> {
    if items.len() > MAX_TECH_ITEMS {
        return Err(invalid("tech_stack", "Tech stack cannot exceed 20 entries"));
    }
    if items.iter().any(|t| t.chars().count() > MAX_TECH_ITEM_LEN) {
        return Err(invalid(
            "tech_stack",
            "Tech stack entries cannot exceed 50 characters",
        ));
    }
    Ok(())
}

pub fn validate_images(items: &[String]) -> Result<(), ValidationError> {
    if items.len() > MAX_IMAGES {
        return Err(invalid("images", "A project can have at most 10 images"));
    }
    if items.iter().any(|i| !i.trim().is_empty() && !i.trim().validate_url()) {
        return Err(invalid("images", "Images must be valid URLs"));
    }
    Ok(())
}

/// Trims and maps blank input to `None`.
pub fn clean_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn clean_images(images: Vec<String>) -> Vec<String> {
    images
        .into_iter()
        .map(|i| i.trim().to_string())
        .filter(|i| !i.is_empty())
        .collect()
}

/// Reduces a GitHub / Twitter / X profile URL or `@handle` to the bare handle.
pub fn clean_social_profile(value: Option<String>) -> Option<String> {
    let trimmed = value?.trim().to_string();
    if trimmed.is_empty() {
        return None;
    }

    for host in ["github.com/", "twitter.com/", "x.com/"] {
        if let Some(idx) = trimmed.find(host) {
            let handle: String = trimmed[idx + host.len()..]
                .chars()
                .take_while(|c| *c != '/' && *c != '?')
                .collect();
            if !handle.is_empty() {
                return Some(handle);
            }
        }
    }

    Some(trimmed.trim_start_matches('@').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn social_profiles_are_reduced_to_handles() {
        assert_eq!(
            clean_social_profile(Some("https://github.com/octocat?tab=repos".into())),
            Some("octocat".into())
        );
        assert_eq!(
            clean_social_profile(Some("https://x.com/rustlang/".into())),
            Some("rustlang".into())
        );
        assert_eq!(
            clean_social_profile(Some("  @ferris ".into())),
            Some("ferris".into())
        );
        assert_eq!(clean_social_profile(Some("   ".into())), None);
        assert_eq!(clean_social_profile(None), None);
    }

    #[test]
    fn hex_colors() {
        assert!(validate_hex_color("#6b66da").is_ok());
        assert!(validate_hex_color("#FFFFFF").is_ok());
        assert!(validate_hex_color("6b66da").is_err());
        assert!(validate_hex_color("#6b66dz").is_err());
        assert!(validate_hex_color("#fff").is_err());
    }

    #[test]
    fn optional_urls_allow_blank() {
        assert!(validate_optional_url("").is_ok());
        assert!(validate_optional_url("https://buildable.dev").is_ok());
        assert!(validate_optional_url("buildable.dev").is_err());
    }

    #[test]
    fn malformed_urls_are_rejected() {
        for bad in ["https:///", "https://exa%zzmple.com", "http://[::1", "https://?x"] {
            assert!(validate_optional_url(bad).is_err(), "{bad} should be rejected");
            assert!(validate_images(&[bad.to_string()]).is_err(), "{bad} should be rejected");
        }
        assert!(validate_images(&[" https://img.dev/a.png ".to_string()]).is_ok());
    }

    #[test]
    fn project_enumerations() {
        assert!(validate_project_category("ai-ml").is_ok());
        assert!(validate_project_category("spaceship").is_err());
        assert!(validate_project_status("in-progress").is_ok());
        assert!(validate_project_status("abandoned").is_err());
    }

    #[test]
    fn images_are_limited_and_cleaned() {
        let too_many: Vec<String> = (0..11).map(|i| format!("https://img.dev/{i}.png")).collect();
        assert!(validate_images(&too_many).is_err());
        assert!(validate_images(&["not a url".to_string()]).is_err());

        let cleaned = clean_images(vec![
            " https://img.dev/a.png ".into(),
            "".into(),
            "https://img.dev/b.png".into(),
        ]);
        assert_eq!(cleaned, vec!["https://img.dev/a.png", "https://img.dev/b.png"]);
    }

    #[test]
    fn tech_stack_limits() {
        assert!(validate_tech_stack(&["Rust".into(), "Axum".into()]).is_ok());
        assert!(validate_tech_stack(&["x".repeat(51)]).is_err());
    }
}
