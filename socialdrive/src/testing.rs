//! Scripted in-memory service used by unit tests.
use crate::service::SocialService;
use socialdrive_core::{
    AccountId, CreateAccountRequest, CreateAccountResponse, CreatePostRequest, CreatePostResponse,
    Failure, FollowRequest, FollowResponse, MessageInfo, OperationKind, PostInfo,
    SendMessageRequest, SendMessageResponse, StatusCode,
};
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Clone, Copy, Debug)]
pub(crate) enum Behavior {
    Ok,
    /// Answer without the success marker.
    Empty,
    Status(StatusCode),
    Unexpected,
    /// Never answer.
    Hang,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Call {
    CreateAccount(String),
    Follow(AccountId, AccountId),
    CreatePost(AccountId, String),
    SendMessage(AccountId, AccountId, String),
}

impl Call {
    pub(crate) fn kind(&self) -> OperationKind {
        match self {
            Call::CreateAccount(_) => OperationKind::CreateAccount,
            Call::Follow(..) => OperationKind::Follow,
            Call::CreatePost(..) => OperationKind::CreatePost,
            Call::SendMessage(..) => OperationKind::SendMessage,
        }
    }
}

#[derive(Default)]
pub(crate) struct ScriptedService {
    overrides: HashMap<(OperationKind, usize), Behavior>,
    defaults: HashMap<OperationKind, Behavior>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedService {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Behavior for the `index`-th (0-based) call of `kind`.
    pub(crate) fn with(mut self, kind: OperationKind, index: usize, behavior: Behavior) -> Self {
        self.overrides.insert((kind, index), behavior);
        self
    }

    /// Behavior for every call of `kind` without an override.
    pub(crate) fn with_default(mut self, kind: OperationKind, behavior: Behavior) -> Self {
        self.defaults.insert(kind, behavior);
        self
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn calls_of(&self, kind: OperationKind) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|call| call.kind() == kind)
            .collect()
    }

    fn log(&self, call: Call) -> (Behavior, usize) {
        let kind = call.kind();
        let mut calls = self.calls.lock().unwrap();
        let index = calls.iter().filter(|c| c.kind() == kind).count();
        calls.push(call);
        let behavior = self
            .overrides
            .get(&(kind, index))
            .or_else(|| self.defaults.get(&kind))
            .copied()
            .unwrap_or(Behavior::Ok);
        (behavior, index)
    }
}

async fn misbehave(behavior: Behavior) -> Result<(), Failure> {
    match behavior {
        Behavior::Ok | Behavior::Empty => Ok(()),
        Behavior::Status(code) => Err(Failure::status(code, "scripted failure")),
        Behavior::Unexpected => Err(Failure::Unexpected("scripted fault".to_string())),
        Behavior::Hang => std::future::pending().await,
    }
}

impl SocialService for ScriptedService {
    async fn create_account(
        &self,
        request: CreateAccountRequest,
    ) -> Result<CreateAccountResponse, Failure> {
        let (behavior, index) = self.log(Call::CreateAccount(request.name.clone()));
        misbehave(behavior).await?;
        let id = match behavior {
            Behavior::Empty => None,
            _ => Some(AccountId::new(format!("acct-{index}"))),
        };
        Ok(CreateAccountResponse {
            id,
            name: request.name,
        })
    }

    async fn follow(&self, request: FollowRequest) -> Result<FollowResponse, Failure> {
        let (behavior, _) = self.log(Call::Follow(request.follower_id, request.followed_id));
        misbehave(behavior).await?;
        let success = !matches!(behavior, Behavior::Empty);
        Ok(FollowResponse {
            success,
            message: if success { "following" } else { "rejected" }.to_string(),
        })
    }

    async fn create_post(
        &self,
        request: CreatePostRequest,
    ) -> Result<CreatePostResponse, Failure> {
        let (behavior, index) = self.log(Call::CreatePost(
            request.author_id.clone(),
            request.content.clone(),
        ));
        misbehave(behavior).await?;
        let post = match behavior {
            Behavior::Empty => None,
            _ => Some(PostInfo {
                id: Some(format!("post-{index}").into()),
                author_id: Some(request.author_id),
                content: request.content,
            }),
        };
        Ok(CreatePostResponse { post })
    }

    async fn send_message(
        &self,
        request: SendMessageRequest,
    ) -> Result<SendMessageResponse, Failure> {
        let (behavior, index) = self.log(Call::SendMessage(
            request.sender_id.clone(),
            request.receiver_id.clone(),
            request.content.clone(),
        ));
        misbehave(behavior).await?;
        let message = match behavior {
            Behavior::Empty => Some(MessageInfo {
                id: None,
                ..Default::default()
            }),
            _ => Some(MessageInfo {
                id: Some(format!("msg-{index}").into()),
                sender_id: Some(request.sender_id),
                receiver_id: Some(request.receiver_id),
                content: request.content,
            }),
        };
        Ok(SendMessageResponse { message })
    }
}
