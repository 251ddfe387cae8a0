//! Identifier Classification and Resolution
//!
//! User-supplied issue identifiers come in two shapes: the opaque internal ID
//! the service assigns (UUID) and the human-readable composite key shown in
//! the UI (`ENG-123`). Classification is a single parse into a tagged variant;
//! only composite keys ever cost a network lookup.

use crate::api::IssueApi;
use crate::error::ApiError;
use std::fmt;
use std::sync::Arc;

const MAX_PREFIX_LEN: usize = 10;

/// A classified issue identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identifier {
    /// Opaque internal ID (UUID shape), usable directly against the API
    Opaque(String),
    /// Composite key, e.g. `ENG-123`. Prefix is stored uppercased.
    Composite { prefix: String, number: u64 },
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Opaque(id) => write!(f, "{}", id),
            Identifier::Composite { prefix, number } => write!(f, "{}-{}", prefix, number),
        }
    }
}

/// UUID shape: 36 chars, hyphens at 8/13/18/23, 32 hex digits.
fn is_opaque_shape(token: &str) -> bool {
    if token.len() != 36 {
        return false;
    }
    let bytes = token.as_bytes();
    for (i, b) in bytes.iter().enumerate() {
        match i {
            8 | 13 | 18 | 23 => {
                if *b != b'-' {
                    return false;
                }
            }
            _ => {}
        }
    }
    let stripped: String = token.chars().filter(|c| *c != '-').collect();
    match hex::decode(&stripped) {
        Ok(bytes) => bytes.len() == 16,
        Err(_) => false,
    }
}

impl Identifier {
    /// Classify a raw token. Opaque shape wins; otherwise the token must be a
    /// composite key (case-insensitive prefix, positive number). Anything
    /// else fails with `InvalidIdentifierFormat` and never reaches the
    /// network.
    pub fn parse(token: &str) -> Result<Identifier, ApiError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(ApiError::InvalidIdentifierFormat("<empty>".to_string()));
        }

        if is_opaque_shape(token) {
            return Ok(Identifier::Opaque(token.to_string()));
        }

        let (prefix, number) = token
            .split_once('-')
            .ok_or_else(|| ApiError::InvalidIdentifierFormat(token.to_string()))?;

        if prefix.is_empty()
            || prefix.len() > MAX_PREFIX_LEN
            || !prefix.chars().all(|c| c.is_ascii_alphabetic())
        {
            return Err(ApiError::InvalidIdentifierFormat(token.to_string()));
        }

        let number: u64 = number
            .parse()
            .map_err(|_| ApiError::InvalidIdentifierFormat(token.to_string()))?;
        if number == 0 {
            return Err(ApiError::InvalidIdentifierFormat(token.to_string()));
        }

        Ok(Identifier::Composite {
            prefix: prefix.to_ascii_uppercase(),
            number,
        })
    }
}

/// Resolves raw tokens to opaque issue IDs
///
/// Opaque-shaped tokens pass through without network traffic. Composite keys
/// cost exactly one `lookup_by_composite` call; retry policy, if any, lives
/// inside the API client.
pub struct IdentifierResolver {
    api: Arc<dyn IssueApi>,
}

impl IdentifierResolver {
    pub fn new(api: Arc<dyn IssueApi>) -> Self {
        Self { api }
    }

    pub async fn resolve(&self, token: &str) -> Result<String, ApiError> {
        match Identifier::parse(token)? {
            Identifier::Opaque(id) => Ok(id),
            Identifier::Composite { prefix, number } => {
                self.api.lookup_by_composite(&prefix, number).await
            }
        }
    }
}
