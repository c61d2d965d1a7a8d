use crate::utils::error::{Result, ScrapeError};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(ScrapeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(ScrapeError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(ScrapeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(ScrapeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(ScrapeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(ScrapeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ScrapeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// File stems end up joined onto the output directory, so they must stay a single component.
pub fn validate_file_stem(field_name: &str, stem: &str) -> Result<()> {
    validate_non_empty_string(field_name, stem)?;
    if stem.contains('/') || stem.contains('\\') || stem.contains('\0') {
        return Err(ScrapeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: stem.to_string(),
            reason: "File stem must not contain path separators".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("catalog_url", "https://www.tibia.com/community/?subtopic=houses").is_ok());
        assert!(validate_url("catalog_url", "http://localhost:8080/").is_ok());
        assert!(validate_url("catalog_url", "").is_err());
        assert!(validate_url("catalog_url", "invalid-url").is_err());
        assert!(validate_url("catalog_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("concurrent_requests", 5, 1).is_ok());
        assert!(validate_positive_number("concurrent_requests", 0, 1).is_err());
    }

    #[test]
    fn test_validate_file_stem() {
        assert!(validate_file_stem("file_stem", "houses").is_ok());
        assert!(validate_file_stem("file_stem", "  ").is_err());
        assert!(validate_file_stem("file_stem", "../houses").is_err());
    }
}
