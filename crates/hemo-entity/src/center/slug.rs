//! Subdomain slug normalization.
//!
//! The same normalization runs when a center is written and when a host
//! header is resolved, so a slug typed as `"Clinic One"` is stored and
//! looked up as `"clinic-one"`.

use hemo_core::error::AppError;

const MAX_SLUG_LEN: usize = 63;

/// Lowercase the slug and replace spaces with hyphens.
pub fn normalize_slug(raw: &str) -> String {
    raw.trim().to_lowercase().replace(' ', "-")
}

/// Normalize a slug and check that it can appear as a DNS label.
pub fn validate_slug(raw: &str) -> Result<String, AppError> {
    let slug = normalize_slug(raw);

    if slug.is_empty() {
        return Err(AppError::validation("Subdomain is required"));
    }
    if slug.len() > MAX_SLUG_LEN {
        return Err(AppError::validation(format!(
            "Subdomain must be at most {MAX_SLUG_LEN} characters"
        )));
    }
    if !slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(AppError::validation(format!(
            "Subdomain '{slug}' may only contain letters, digits, and hyphens"
        )));
    }
    if slug.starts_with('-') || slug.ends_with('-') {
        return Err(AppError::validation(format!(
            "Subdomain '{slug}' cannot start or end with a hyphen"
        )));
    }

    Ok(slug)
}
