use crate::utils::error::{CepError, Result};
use std::net::ToSocketAddrs;
use url::Url;

pub const CEP_PLACEHOLDER: &str = "{cep}";

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(CepError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(CepError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(CepError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

/// Upstream URLs are templates; the postal code replaces `{cep}` on every lookup.
pub fn validate_url_template(field_name: &str, template: &str) -> Result<()> {
    if !template.contains(CEP_PLACEHOLDER) {
        return Err(CepError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: template.to_string(),
            reason: format!("URL template must contain {}", CEP_PLACEHOLDER),
        });
    }

    validate_url(field_name, &template.replace(CEP_PLACEHOLDER, "01001000"))
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(CepError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(CepError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

/// Accepts anything `TcpListener::bind` can resolve, e.g. `0.0.0.0:8080` or `localhost:8080`.
pub fn validate_socket_addr(field_name: &str, value: &str) -> Result<()> {
    let invalid = |reason: String| CepError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason,
    };

    let mut addrs = value
        .to_socket_addrs()
        .map_err(|e| invalid(format!("Invalid socket address: {}", e)))?;
    if addrs.next().is_none() {
        return Err(invalid("Address resolved to nothing".to_string()));
    }
    Ok(())
}
