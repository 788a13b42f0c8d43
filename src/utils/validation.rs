use crate::utils::error::{ElexError, Result};
use chrono::NaiveDate;
use url::Url;

/// Election dates are always `YYYY-MM-DD`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(ElexError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(ElexError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(ElexError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(ElexError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if !allowed.contains(&value) {
        return Err(ElexError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Valid values: {}", allowed.join(", ")),
        });
    }
    Ok(())
}

/// Checks a command-line election date. Returns the date unchanged so that
/// later comparisons can stay on the ISO string.
pub fn validate_election_date(value: &str) -> Result<&str> {
    parse_iso_date(value).map_err(|reason| ElexError::InvalidArgument {
        argument: "election date".to_string(),
        value: value.to_string(),
        reason,
    })?;
    Ok(value)
}

/// Strict `YYYY-MM-DD`: chrono accepts unpadded fields, which would break
/// lexical ordering, so the length is checked too.
pub fn parse_iso_date(value: &str) -> std::result::Result<NaiveDate, String> {
    if value.len() != 10 {
        return Err("expected YYYY-MM-DD".to_string());
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|e| format!("expected YYYY-MM-DD ({e})"))
}
