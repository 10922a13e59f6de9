use secrecy::SecretString;

use crate::domain::IssueContent;

/// Inbound payload of the gated operations: the operator's passcode plus
/// the issue to deliver or to typeset.
#[derive(serde::Deserialize)]
pub struct BodySchema {
    pub passcode: SecretString,
    pub issue: IssueData,
}

#[derive(serde::Deserialize)]
pub struct IssueData {
    pub title: String,
    pub date: String,
    pub body: String,
}

impl TryFrom<IssueData> for IssueContent {
    type Error = String;

    fn try_from(value: IssueData) -> Result<Self, Self::Error> {
        IssueContent::parse(value.title, value.date, value.body)
    }
}
