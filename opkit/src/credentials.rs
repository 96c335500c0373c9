//! Credentials for the upstream API.
//!
//! Credentials are acquired once, from the environment or from explicit
//! values, and are read-only afterwards. They complete every request with an
//! `Authorization` header and supply the base URL routes are appended to.

use std::fmt;

use url::Url;

use crate::error::{ApiError, AuthError, ConfigError};

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.planetscale.com/v1";

/// Service token id variable; paired with [`SERVICE_TOKEN_ENV`].
pub const SERVICE_TOKEN_ID_ENV: &str = "PLANETSCALE_SERVICE_TOKEN_ID";
/// Service token secret variable.
pub const SERVICE_TOKEN_ENV: &str = "PLANETSCALE_SERVICE_TOKEN";
/// OAuth access token variable, used when no service token is configured.
pub const ACCESS_TOKEN_ENV: &str = "PLANETSCALE_ACCESS_TOKEN";
/// Optional base URL override.
pub const API_URL_ENV: &str = "PLANETSCALE_API_URL";

/// An API token.
#[derive(Clone, PartialEq, Eq)]
pub enum Token {
    /// A service token, sent as `id:secret`.
    ServiceToken {
        /// Token id.
        id: String,
        /// Token secret.
        secret: String,
    },
    /// An OAuth access token, sent as `Bearer <token>`.
    Bearer(String),
}

impl Token {
    /// Creates a service token.
    ///
    /// ## Errors
    ///
    /// Returns [`AuthError::InvalidTokenFormat`] if either part is empty or
    /// cannot be carried in an HTTP header.
    pub fn service(id: impl Into<String>, secret: impl Into<String>) -> Result<Self, AuthError> {
        let id = id.into();
        let secret = secret.into();
        if !is_header_safe(&id) || id.contains(':') || !is_header_safe(&secret) {
            return Err(AuthError::InvalidTokenFormat);
        }
        Ok(Self::ServiceToken { id, secret })
    }

    /// Creates a bearer token.
    ///
    /// ## Errors
    ///
    /// Returns [`AuthError::InvalidTokenFormat`] if the token is empty or
    /// cannot be carried in an HTTP header.
    pub fn bearer(token: impl Into<String>) -> Result<Self, AuthError> {
        let token = token.into();
        if !is_header_safe(&token) {
            return Err(AuthError::InvalidTokenFormat);
        }
        Ok(Self::Bearer(token))
    }

    /// Returns the `Authorization` header value.
    pub fn authorization(&self) -> String {
        match self {
            Self::ServiceToken { id, secret } => format!("{id}:{secret}"),
            Self::Bearer(token) => format!("Bearer {token}"),
        }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ServiceToken { id, .. } => f
                .debug_struct("ServiceToken")
                .field("id", id)
                .field("secret", &"[REDACTED]")
                .finish(),
            Self::Bearer(_) => f.debug_tuple("Bearer").field(&"[REDACTED]").finish(),
        }
    }
}

fn is_header_safe(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_graphic())
}

/// Token plus the base URL every route is appended to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    token: Token,
    base_url: Url,
}

impl Credentials {
    /// Creates credentials against the default base URL.
    pub fn new(token: Token) -> Self {
        Self {
            token,
            base_url: default_base_url(),
        }
    }

    /// Replaces the base URL.
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    /// Reads credentials from the process environment.
    ///
    /// A service token pair takes precedence over an access token. The base
    /// URL comes from `PLANETSCALE_API_URL` when set.
    ///
    /// ## Errors
    ///
    /// Returns [`AuthError::MissingCredential`] if no token is configured,
    /// [`AuthError::InvalidTokenFormat`] for an unusable token, or
    /// [`ConfigError::InvalidUrl`] for a bad base URL override.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads credentials through an arbitrary variable lookup.
    ///
    /// Empty values count as unset.
    ///
    /// ## Errors
    ///
    /// See [`Credentials::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ApiError> {
        let get = |name: &str| lookup(name).filter(|value| !value.is_empty());

        let token = match (get(SERVICE_TOKEN_ID_ENV), get(SERVICE_TOKEN_ENV)) {
            (Some(id), Some(secret)) => Token::service(id, secret)?,
            _ => match get(ACCESS_TOKEN_ENV) {
                Some(token) => Token::bearer(token)?,
                None => {
                    return Err(AuthError::MissingCredential {
                        env_vars: vec![
                            SERVICE_TOKEN_ID_ENV.to_string(),
                            SERVICE_TOKEN_ENV.to_string(),
                            ACCESS_TOKEN_ENV.to_string(),
                        ],
                    }
                    .into())
                }
            },
        };

        let mut credentials = Self::new(token);
        if let Some(url) = get(API_URL_ENV) {
            let base_url = Url::parse(&url).map_err(ConfigError::from)?;
            if base_url.cannot_be_a_base() {
                return Err(ConfigError::CannotBeABase { url }.into());
            }
            credentials = credentials.with_base_url(base_url);
        }
        Ok(credentials)
    }

    /// Returns the token.
    pub fn token(&self) -> &Token {
        &self.token
    }

    /// Returns the `Authorization` header value.
    pub fn authorization(&self) -> String {
        self.token.authorization()
    }

    /// Returns the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

fn default_base_url() -> Url {
    // Constant input; parsing cannot fail.
    Url::parse(DEFAULT_BASE_URL).unwrap_or_else(|_| unreachable!("default base URL is valid"))
}
