use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;

use crate::auth::AuthError;

/// A parsed `Authorization` header. `Bearer` carries a user token (JWT or
/// opaque refresh token, depending on the endpoint); `ApiKey` is the static
/// key presented by the Polka webhook caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credential {
    Bearer(String),
    ApiKey(String),
}

/// Parse the literal value of an `Authorization` header.
///
/// The value must split into exactly two whitespace-separated fields: a
/// scheme keyword (`Bearer` or `ApiKey`, case-sensitive) and the credential
/// itself. The credential is passed through untouched. This is the only
/// place in the codebase that looks at the header shape.
pub fn extract(header: Option<&str>) -> Result<Credential, AuthError> {
    let value = header.ok_or(AuthError::MissingCredential)?;
    if value.trim().is_empty() {
        return Err(AuthError::MissingCredential);
    }

    let fields: Vec<&str> = value.split_whitespace().collect();
    if fields.len() != 2 {
        return Err(AuthError::MalformedCredential);
    }

    match fields[0] {
        "Bearer" => Ok(Credential::Bearer(fields[1].to_string())),
        "ApiKey" => Ok(Credential::ApiKey(fields[1].to_string())),
        _ => Err(AuthError::MalformedCredential),
    }
}

/// Convenience wrapper over [`extract`] for an axum header map.
pub fn from_headers(headers: &HeaderMap) -> Result<Credential, AuthError> {
    extract(headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()))
}
