use socialdrive_core::StatusCode;
use std::time::Duration;

/// Which calls of one operation kind a fault applies to, by 0-based call index.
#[derive(Clone, Debug, Default)]
pub enum Calls {
    #[default]
    None,
    All,
    Only(Vec<usize>),
}

impl Calls {
    pub fn contains(&self, call: usize) -> bool {
        match self {
            Calls::None => false,
            Calls::All => true,
            Calls::Only(calls) => calls.contains(&call),
        }
    }
}

/// Misbehavior injected into one operation kind.
#[derive(Clone, Debug)]
pub struct Fault {
    /// Answer with this error status.
    pub reject: Calls,
    pub reject_code: StatusCode,
    /// Answer successfully but leave the identifier (or success flag) out.
    pub drop_id: Calls,
    /// Sleep before answering.
    pub delay: Calls,
    pub delay_by: Duration,
}

impl Default for Fault {
    fn default() -> Self {
        Self {
            reject: Calls::None,
            reject_code: StatusCode::Unavailable,
            drop_id: Calls::None,
            delay: Calls::None,
            delay_by: Duration::ZERO,
        }
    }
}

impl Fault {
    pub fn reject(calls: Calls, code: StatusCode) -> Self {
        Self {
            reject: calls,
            reject_code: code,
            ..Default::default()
        }
    }

    pub fn drop_id(calls: Calls) -> Self {
        Self {
            drop_id: calls,
            ..Default::default()
        }
    }

    pub fn delay(calls: Calls, by: Duration) -> Self {
        Self {
            delay: calls,
            delay_by: by,
            ..Default::default()
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Faults {
    pub accounts: Fault,
    pub follows: Fault,
    pub posts: Fault,
    pub messages: Fault,
}

impl Faults {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn accounts(mut self, fault: Fault) -> Self {
        self.accounts = fault;
        self
    }

    pub fn follows(mut self, fault: Fault) -> Self {
        self.follows = fault;
        self
    }

    pub fn posts(mut self, fault: Fault) -> Self {
        self.posts = fault;
        self
    }

    pub fn messages(mut self, fault: Fault) -> Self {
        self.messages = fault;
        self
    }
}
