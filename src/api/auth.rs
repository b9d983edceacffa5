//! API token handling for the refunds API.
//!
//! Tokens are sent as `Authorization: Bearer <token>` and kept in the OS
//! keyring, never in the config file.

use tracing::{debug, warn};

use super::error::{ApiError, Result};

/// The keyring service name for refund-form tokens.
const KEYRING_SERVICE: &str = "refund-form";

/// Bearer credentials for the refunds API.
#[derive(Clone)]
pub struct Auth {
    header: String,
}

impl Auth {
    /// Create credentials from a raw token.
    pub fn bearer(token: &str) -> Self {
        Self {
            header: format!("Bearer {}", token.trim()),
        }
    }

    /// Load the token stored for `account`, if there is one.
    ///
    /// A missing entry is not an error: the API may accept anonymous guest
    /// requests. Neither is a keyring with no usable backend (no secret
    /// service, locked storage); the request is then sent without auth.
    /// Other keyring failures are reported.
    pub fn from_keyring(account: &str) -> Result<Option<Self>> {
        resolve_token(account, get_token(account))
    }

    /// The complete `Authorization` header value.
    pub fn header_value(&self) -> &str {
        &self.header
    }
}

impl std::fmt::Debug for Auth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Auth").field("header", &"Bearer ***").finish()
    }
}

#[derive(Debug)]
enum TokenLookup {
    Missing,
    Unavailable(keyring::Error),
    Failed(ApiError),
}

impl From<keyring::Error> for TokenLookup {
    fn from(err: keyring::Error) -> Self {
        match err {
            keyring::Error::NoEntry => TokenLookup::Missing,
            keyring::Error::PlatformFailure(_) | keyring::Error::NoStorageAccess(_) => {
                TokenLookup::Unavailable(err)
            }
            other => TokenLookup::Failed(ApiError::Keyring(format!(
                "failed to retrieve token: {}",
                other
            ))),
        }
    }
}

fn entry(account: &str) -> Result<keyring::Entry> {
    keyring::Entry::new(KEYRING_SERVICE, account)
        .map_err(|e| ApiError::Keyring(format!("failed to access keyring: {}", e)))
}

fn get_token(account: &str) -> std::result::Result<String, TokenLookup> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, account)?;
    Ok(entry.get_password()?)
}

fn resolve_token(
    account: &str,
    lookup: std::result::Result<String, TokenLookup>,
) -> Result<Option<Auth>> {
    match lookup {
        Ok(token) => Ok(Some(Auth::bearer(&token))),
        Err(TokenLookup::Missing) => {
            debug!(account, "No API token stored, sending requests without auth");
            Ok(None)
        }
        Err(TokenLookup::Unavailable(err)) => {
            warn!(account, "Keyring unavailable, sending requests without auth: {}", err);
            Ok(None)
        }
        Err(TokenLookup::Failed(err)) => Err(err),
    }
}

/// Store an API token in the OS keyring.
///
/// # Errors
///
/// Returns an error if the token is blank or cannot be stored.
pub fn store_token(account: &str, token: &str) -> Result<()> {
    if token.trim().is_empty() {
        return Err(ApiError::Keyring("token cannot be empty".to_string()));
    }

    entry(account)?
        .set_password(token.trim())
        .map_err(|e| ApiError::Keyring(format!("failed to store token: {}", e)))
}

/// Delete the API token stored for `account`.
///
/// # Errors
///
/// Returns an error if the token cannot be deleted.
pub fn delete_token(account: &str) -> Result<()> {
    entry(account)?
        .delete_password()
        .map_err(|e| ApiError::Keyring(format!("failed to delete token: {}", e)))
}
