use crate::{
    ConfigError, OperationKind, CREATE_ACCOUNT_TIMEOUT, CREATE_POST_TIMEOUT,
    DEFAULT_ACCOUNT_COUNT, DEFAULT_DIRECT_MESSAGES, DEFAULT_NAME_PREFIX, DEFAULT_NAME_STEMS,
    DEFAULT_POST_TEMPLATE, DEFAULT_RING_TEMPLATE, FOLLOW_TIMEOUT, SEND_MESSAGE_TIMEOUT,
};
use std::time::Duration;

/// Text with `{placeholder}` slots filled in per call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Template(String);

impl Template {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Fills every `{key}` slot in one pass over the template text. Substituted values are
    /// copied as-is, never scanned for slots. Unknown slots are left untouched.
    pub fn render(&self, vars: &[(&str, &str)]) -> String {
        let mut out = String::with_capacity(self.0.len());
        let mut rest = self.0.as_str();
        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let slot = &rest[open..];
            let value = slot.find('}').and_then(|close| {
                let key = &slot[1..close];
                vars.iter()
                    .find(|(name, _)| *name == key)
                    .map(|(_, value)| (*value, close))
            });
            match value {
                Some((value, close)) => {
                    out.push_str(value);
                    rest = &slot[close + 1..];
                }
                None => {
                    out.push('{');
                    rest = &slot[1..];
                }
            }
        }
        out.push_str(rest);
        out
    }
}

/// One message of the direct pattern, by registry index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirectMessage {
    pub sender: usize,
    pub receiver: usize,
    pub template: Template,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timeouts {
    pub create_account: Duration,
    pub follow: Duration,
    pub create_post: Duration,
    pub send_message: Duration,
}

impl Timeouts {
    pub fn for_kind(&self, kind: OperationKind) -> Duration {
        match kind {
            OperationKind::CreateAccount => self.create_account,
            OperationKind::Follow => self.follow,
            OperationKind::CreatePost => self.create_post,
            OperationKind::SendMessage => self.send_message,
        }
    }
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            create_account: CREATE_ACCOUNT_TIMEOUT,
            follow: FOLLOW_TIMEOUT,
            create_post: CREATE_POST_TIMEOUT,
            send_message: SEND_MESSAGE_TIMEOUT,
        }
    }
}

#[derive(Clone, Debug)]
pub struct WorkflowConfig {
    pub account_count: usize,
    pub name_prefix: String,
    pub name_stems: Vec<String>,
    pub post_template: Template,
    pub ring_template: Template,
    pub direct_messages: Vec<DirectMessage>,
    pub timeouts: Timeouts,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            account_count: DEFAULT_ACCOUNT_COUNT,
            name_prefix: DEFAULT_NAME_PREFIX.to_string(),
            name_stems: DEFAULT_NAME_STEMS.iter().map(|s| s.to_string()).collect(),
            post_template: Template::new(DEFAULT_POST_TEMPLATE),
            ring_template: Template::new(DEFAULT_RING_TEMPLATE),
            direct_messages: DEFAULT_DIRECT_MESSAGES
                .iter()
                .map(|(sender, receiver, text)| DirectMessage {
                    sender: *sender,
                    receiver: *receiver,
                    template: Template::new(*text),
                })
                .collect(),
            timeouts: Timeouts::default(),
        }
    }
}

impl WorkflowConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.account_count == 0 {
            return Err(ConfigError::NoAccounts);
        }

        if let Some(direct) = self
            .direct_messages
            .iter()
            .find(|d| d.sender >= self.account_count || d.receiver >= self.account_count)
        {
            return Err(ConfigError::DirectIndexOutOfRange {
                sender: direct.sender,
                receiver: direct.receiver,
                count: self.account_count,
            });
        }

        for kind in [
            OperationKind::CreateAccount,
            OperationKind::Follow,
            OperationKind::CreatePost,
            OperationKind::SendMessage,
        ] {
            if self.timeouts.for_kind(kind).is_zero() {
                return Err(ConfigError::ZeroTimeout(kind));
            }
        }

        Ok(())
    }

    /// Name stem for the account at `index`; falls back to the 1-based position.
    pub fn stem(&self, index: usize) -> String {
        self.name_stems
            .get(index)
            .cloned()
            .unwrap_or_else(|| (index + 1).to_string())
    }

    pub fn account_name(&self, index: usize, suffix: &str) -> String {
        format!("{}_{}_{}", self.name_prefix, self.stem(index), suffix)
    }
}
