//! JSON-over-HTTP transport for [`SocialService`].
use crate::error::TransportError;
use crate::service::SocialService;
use reqwest::{Client, Response};
use serde::{de::DeserializeOwned, Serialize};
use socialdrive_core::{
    CreateAccountRequest, CreateAccountResponse, CreatePostRequest, CreatePostResponse,
    ErrorBody, Failure, FollowRequest, FollowResponse, SendMessageRequest, SendMessageResponse,
    StatusCode,
};
use tracing::{debug, trace};
use url::Url;

pub const ACCOUNTS_PATH: &str = "accounts";
pub const FOLLOWS_PATH: &str = "follows";
pub const POSTS_PATH: &str = "posts";
pub const MESSAGES_PATH: &str = "messages";

/// Connection to the service, held for the whole run and released on drop.
#[derive(Debug)]
pub struct HttpService {
    client: Client,
    base: Url,
}

impl HttpService {
    /// Accepts `host:port` or a full `http(s)://` URL.
    pub fn connect(address: &str) -> Result<Self, TransportError> {
        let base = parse_base_url(address)?;
        let client = Client::builder().build()?;
        debug!("Connection to {base} opened");
        Ok(Self { client, base })
    }

    async fn post<Req, Resp>(&self, path: &str, request: &Req) -> Result<Resp, Failure>
    where
        Req: Serialize,
        Resp: DeserializeOwned,
    {
        let url = self
            .base
            .join(path)
            .map_err(|err| Failure::Unexpected(format!("invalid endpoint {path}: {err}")))?;
        trace!("POST {url}");

        let response = self
            .client
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(classify_send_error)?;

        if !response.status().is_success() {
            return Err(status_failure(response).await);
        }

        response
            .json::<Resp>()
            .await
            .map_err(|err| Failure::Unexpected(format!("undecodable response: {err}")))
    }
}

impl Drop for HttpService {
    fn drop(&mut self) {
        debug!("Connection to {} released", self.base);
    }
}

impl SocialService for HttpService {
    async fn create_account(
        &self,
        request: CreateAccountRequest,
    ) -> Result<CreateAccountResponse, Failure> {
        self.post(ACCOUNTS_PATH, &request).await
    }

    async fn follow(&self, request: FollowRequest) -> Result<FollowResponse, Failure> {
        self.post(FOLLOWS_PATH, &request).await
    }

    async fn create_post(
        &self,
        request: CreatePostRequest,
    ) -> Result<CreatePostResponse, Failure> {
        self.post(POSTS_PATH, &request).await
    }

    async fn send_message(
        &self,
        request: SendMessageRequest,
    ) -> Result<SendMessageResponse, Failure> {
        self.post(MESSAGES_PATH, &request).await
    }
}

fn parse_base_url(address: &str) -> Result<Url, TransportError> {
    let address = address.trim();
    if address.is_empty() {
        return Err(TransportError::EmptyAddress);
    }

    let with_scheme = if address.contains("://") {
        address.to_string()
    } else {
        format!("http://{address}")
    };

    let mut url = Url::parse(&with_scheme)?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(TransportError::UnsupportedScheme(url.scheme().to_string()));
    }
    // `join` replaces the last segment unless the path ends in a slash.
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn classify_send_error(err: reqwest::Error) -> Failure {
    if err.is_timeout() {
        Failure::status(StatusCode::DeadlineExceeded, err.to_string())
    } else if err.is_connect() {
        Failure::status(StatusCode::Unavailable, err.to_string())
    } else {
        Failure::Unexpected(err.to_string())
    }
}

async fn status_failure(response: Response) -> Failure {
    let http_status = response.status();
    let body = match response.text().await {
        Ok(body) => body,
        Err(err) => return Failure::Unexpected(format!("unreadable error body: {err}")),
    };

    match serde_json::from_str::<ErrorBody>(&body) {
        Ok(ErrorBody { code, message }) => Failure::status(code, message),
        Err(_) => {
            let detail = if body.is_empty() {
                http_status.to_string()
            } else {
                body
            };
            Failure::status(StatusCode::from_http(http_status.as_u16()), detail)
        }
    }
}
