//! Request and response bodies of the four remote operations.
//!
//! Response fields are all defaulted: a body that omits the identifier still decodes, and the
//! caller decides whether that counts as success.
use crate::{AccountId, MessageId, PostId};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateAccountRequest {
    pub name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateAccountResponse {
    pub id: Option<AccountId>,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowRequest {
    pub follower_id: AccountId,
    pub followed_id: AccountId,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FollowResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub author_id: AccountId,
    pub content: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostInfo {
    pub id: Option<PostId>,
    pub author_id: Option<AccountId>,
    pub content: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreatePostResponse {
    pub post: Option<PostInfo>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendMessageRequest {
    pub sender_id: AccountId,
    pub receiver_id: AccountId,
    pub content: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageInfo {
    pub id: Option<MessageId>,
    pub sender_id: Option<AccountId>,
    pub receiver_id: Option<AccountId>,
    pub content: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SendMessageResponse {
    pub message: Option<MessageInfo>,
}
