//! The remote social-network service as seen by the driver.
//!
//! Implementations only move requests and responses; they report transport trouble as
//! [`Failure::Status`] or [`Failure::Unexpected`] and leave timeouts and the success checks
//! to [`RpcFacade`](crate::RpcFacade).
use socialdrive_core::{
    CreateAccountRequest, CreateAccountResponse, CreatePostRequest, CreatePostResponse, Failure,
    FollowRequest, FollowResponse, SendMessageRequest, SendMessageResponse,
};
use std::sync::Arc;

// The blanket `LocalSocialService` impl puts a second `create_account` etc. in scope here, so
// the forwarding impls below name the trait explicitly.

#[trait_variant::make(SocialService: Send)]
pub trait LocalSocialService {
    async fn create_account(
        &self,
        request: CreateAccountRequest,
    ) -> Result<CreateAccountResponse, Failure>;

    async fn follow(&self, request: FollowRequest) -> Result<FollowResponse, Failure>;

    async fn create_post(&self, request: CreatePostRequest)
        -> Result<CreatePostResponse, Failure>;

    async fn send_message(
        &self,
        request: SendMessageRequest,
    ) -> Result<SendMessageResponse, Failure>;
}

impl<S: SocialService + Sync> SocialService for &S {
    async fn create_account(
        &self,
        request: CreateAccountRequest,
    ) -> Result<CreateAccountResponse, Failure> {
        SocialService::create_account(&**self, request).await
    }

    async fn follow(&self, request: FollowRequest) -> Result<FollowResponse, Failure> {
        SocialService::follow(&**self, request).await
    }

    async fn create_post(
        &self,
        request: CreatePostRequest,
    ) -> Result<CreatePostResponse, Failure> {
        SocialService::create_post(&**self, request).await
    }

    async fn send_message(
        &self,
        request: SendMessageRequest,
    ) -> Result<SendMessageResponse, Failure> {
        SocialService::send_message(&**self, request).await
    }
}

impl<S: SocialService + Send + Sync> SocialService for Arc<S> {
    async fn create_account(
        &self,
        request: CreateAccountRequest,
    ) -> Result<CreateAccountResponse, Failure> {
        SocialService::create_account(&**self, request).await
    }

    async fn follow(&self, request: FollowRequest) -> Result<FollowResponse, Failure> {
        SocialService::follow(&**self, request).await
    }

    async fn create_post(
        &self,
        request: CreatePostRequest,
    ) -> Result<CreatePostResponse, Failure> {
        SocialService::create_post(&**self, request).await
    }

    async fn send_message(
        &self,
        request: SendMessageRequest,
    ) -> Result<SendMessageResponse, Failure> {
        SocialService::send_message(&**self, request).await
    }
}
