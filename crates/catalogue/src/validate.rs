use regex::Regex;
use std::sync::LazyLock;

use crate::error::{CatalogueError, CatalogueResult};

static UUID_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$")
        .expect("uuid pattern compiles")
});

static API_URL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://.*/api/?$").expect("api url pattern compiles"));

/// 8-4-4-4-12 hex groups, any case.
pub fn is_good_uuid(value: &str) -> bool {
    UUID_SHAPE.is_match(value)
}

/// Base URLs must point at the service's `/api` root.
pub fn is_good_api_url(url: &str) -> bool {
    API_URL_SHAPE.is_match(url)
}

/// API keys are issued as UUIDs.
pub fn is_good_api_key(key: &str) -> bool {
    is_good_uuid(key)
}

/// Reject `value` unless it has identifier shape. `what` names the argument
/// in the error message.
pub fn require_uuid(what: &'static str, value: &str) -> CatalogueResult<()> {
    if is_good_uuid(value) {
        Ok(())
    } else {
        Err(CatalogueError::InvalidIdentifier {
            what,
            value: value.to_string(),
        })
    }
}
