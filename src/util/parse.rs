use crate::error::{internal::InternalError, AppError};

/// Parses a u64 value from String
///
/// # Arguments
/// - `value` - The String to attempt to parse into `u64`
///
/// # Returns
/// - `Ok(u64)` - Successfully parsed String to `u64`
/// - `Err(AppError::InternalErr(ParseStringId))` - Failed to parse
///   the string as a u64
pub fn parse_u64_from_string(value: String) -> Result<u64, AppError> {
    let result = value
        .parse::<u64>()
        .map_err(|e| InternalError::ParseStringId { value, source: e })?;

    Ok(result)
}

/// Parses an optional stored snowflake, keeping `None` as `None`.
pub fn parse_optional_u64(value: Option<String>) -> Result<Option<u64>, AppError> {
    value.map(parse_u64_from_string).transpose()
}

/// Parses a boolean environment flag the way the deployment scripts write them.
///
/// Accepts `true`/`false`, `1`/`0` and `yes`/`no`, case-insensitively.
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" | "" => Some(false),
        _ => None,
    }
}

/// Lowercases and validates a link given to an admin URL command.
///
/// # Returns
/// - `Ok(String)` - The normalized `http`/`https` URL
/// - `Err(AppError::BadRequest)` - Not an absolute http(s) URL
pub fn parse_http_url(value: &str) -> Result<String, AppError> {
    let value = value.trim().to_lowercase();

    match url::Url::parse(&value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => Ok(value),
        _ => Err(AppError::BadRequest(format!(
            "`{}` is not a valid http(s) URL",
            value
        ))),
    }
}
