use crate::{Account, Failure, OperationLabels, PREVIEW_CHARS};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperationKind {
    CreateAccount,
    Follow,
    CreatePost,
    SendMessage,
}

impl OperationKind {
    pub fn labels(self) -> OperationLabels {
        match self {
            OperationKind::CreateAccount => crate::generate_labels!(create_account),
            OperationKind::Follow => crate::generate_labels!(follow),
            OperationKind::CreatePost => crate::generate_labels!(create_post),
            OperationKind::SendMessage => crate::generate_labels!(send_message),
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OperationKind::CreateAccount => "create_account",
            OperationKind::Follow => "follow",
            OperationKind::CreatePost => "create_post",
            OperationKind::SendMessage => "send_message",
        })
    }
}

/// The inputs of an attempted operation, as much as is needed to audit it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Subject {
    Account {
        name: String,
    },
    Follow {
        follower: Account,
        followed: Account,
    },
    Post {
        author: Account,
        preview: String,
    },
    Message {
        sender: Account,
        receiver: Account,
        preview: String,
    },
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subject::Account { name } => write!(f, "account '{name}'"),
            Subject::Follow { follower, followed } => write!(f, "{follower} -> {followed}"),
            Subject::Post { author, preview } => write!(f, "{author}: '{preview}'"),
            Subject::Message {
                sender,
                receiver,
                preview,
            } => write!(f, "{sender} -> {receiver}: '{preview}'"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Carries the new identifier, or the service's message for follow calls.
    Succeeded(String),
    Failed(Failure),
}

/// One attempted remote call and how it ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OperationRecord {
    pub kind: OperationKind,
    pub subject: Subject,
    pub outcome: Outcome,
}

impl OperationRecord {
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Succeeded(_))
    }

    pub fn failure(&self) -> Option<&Failure> {
        match &self.outcome {
            Outcome::Failed(failure) => Some(failure),
            Outcome::Succeeded(_) => None,
        }
    }
}

/// First [`PREVIEW_CHARS`] characters of `content`, with an ellipsis when cut.
pub fn preview(content: &str) -> String {
    let mut chars = content.chars();
    let head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}
