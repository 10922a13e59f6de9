use validator::ValidateEmail;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriberEmail(String);

impl SubscriberEmail {
    /// Trims surrounding whitespace and lowercases the address before
    /// validating it. The same normalization runs on every path into the
    /// address book, so insertion and lookup can never disagree on the
    /// identity of an address.
    pub fn parse(s: String) -> Result<Self, String> {
        let normalized = s.trim().to_ascii_lowercase();
        if !normalized.validate_email() {
            return Err(format!("{} is not a valid subscriber email.", s));
        };
        Ok(Self(normalized))
    }
}

impl AsRef<str> for SubscriberEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SubscriberEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl TryFrom<String> for SubscriberEmail {
    type Error = String;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        SubscriberEmail::parse(value)
    }
}
