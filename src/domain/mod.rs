mod identity_hash;
mod issue;
mod subscriber_email;

pub use identity_hash::IdentityHash;
pub use issue::IssueContent;
pub use subscriber_email::SubscriberEmail;
