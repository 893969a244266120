//! Command replies

/// A file sent along with a reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyAttachment {
    pub filename: String,
    pub data: Vec<u8>,
}

/// What the bot answers to a command. Replies are only visible to the
/// invoking user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandReply {
    pub content: String,
    pub attachment: Option<ReplyAttachment>,
}

impl CommandReply {
    /// Create a text reply
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            attachment: None,
        }
    }

    /// Attach a file to the reply
    pub fn with_attachment(mut self, filename: impl Into<String>, data: Vec<u8>) -> Self {
        self.attachment = Some(ReplyAttachment {
            filename: filename.into(),
            data,
        });
        self
    }
}
