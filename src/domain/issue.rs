use tera::Context;

/// One newsletter issue as the operator submits it: a title, an issue date
/// and the body copy handed to the templates.
#[derive(Debug, Clone)]
pub struct IssueContent {
    title: String,
    date: String,
    body: String,
}

impl IssueContent {
    /// Every field is required; a payload with a blank field is rejected
    /// before any delivery work starts.
    pub fn parse(title: String, date: String, body: String) -> Result<Self, String> {
        for (field, value) in [("title", &title), ("date", &date), ("body", &body)] {
            if value.trim().is_empty() {
                return Err(format!("The issue {field} must not be empty."));
            }
        }
        Ok(Self { title, date, body })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Subject line of the outgoing mail: `<title>: <date>`.
    pub fn subject(&self) -> String {
        format!("{}: {}", self.title, self.date)
    }

    pub fn context(&self) -> Context {
        let mut ctx = Context::new();
        ctx.insert("title", &self.title);
        ctx.insert("date", &self.date);
        ctx.insert("body", &self.body);
        ctx
    }

    /// A fresh context carrying one recipient's unsubscribe link. Each
    /// recipient gets its own copy; the shared issue is never mutated.
    pub fn context_with_unsubscribe(&self, unsubscribe_url: &str) -> Context {
        let mut ctx = self.context();
        ctx.insert("unsubscribe_url", unsubscribe_url);
        ctx
    }
}
