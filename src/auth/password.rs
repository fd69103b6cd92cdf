use bcrypt::DEFAULT_COST;

use crate::auth::AuthError;

/// Hash a password with bcrypt. A fresh random salt is drawn on every call,
/// so hashing the same password twice yields different encoded strings.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let hash = bcrypt::hash(password, DEFAULT_COST)?;
    Ok(hash)
}

/// Check a password against a stored bcrypt hash. The comparison inside
/// bcrypt is constant-time over the digest.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, AuthError> {
    let matches = bcrypt::verify(password, password_hash)?;
    Ok(matches)
}
