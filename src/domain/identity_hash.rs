use sha2::{Digest, Sha256};
use unicode_segmentation::UnicodeSegmentation;

use super::SubscriberEmail;

/// The public token a subscriber is known by outside the system.
///
/// Derived from the normalized email address alone, with no stored secret:
/// the same address always maps to the same token, and the token is safe to
/// embed in unsubscribe links because it does not reveal the address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdentityHash(String);

impl IdentityHash {
    pub fn derive(email: &SubscriberEmail) -> Self {
        let digest = Sha256::digest(email.as_ref().as_bytes());
        Self(hex::encode(digest))
    }

    /// Validates a token arriving from the outside world. Anything that is
    /// not 64 lowercase hex graphemes cannot have been produced by
    /// [`derive`](Self::derive).
    pub fn parse(s: String) -> Result<Self, String> {
        let is_wrong_length = s.graphemes(true).count() != 64;
        let is_not_lowercase_hex = !s.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f'));

        if is_wrong_length || is_not_lowercase_hex {
            Err(format!("{} is not a valid unsubscribe token.", s))
        } else {
            Ok(Self(s))
        }
    }
}

impl AsRef<str> for IdentityHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for IdentityHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
