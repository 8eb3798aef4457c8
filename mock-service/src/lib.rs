//! In-process stand-in for the social-network service.
//!
//! Serves the four operations as JSON over HTTP with the same validation rules as the real
//! service, keeps everything in memory, and can be told to misbehave per operation kind.
use axum::{
    extract::State,
    http::StatusCode as HttpStatus,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use socialdrive_core::{
    Account, AccountId, CreateAccountRequest, CreateAccountResponse, CreatePostRequest,
    CreatePostResponse, ErrorBody, FollowRequest, FollowResponse, MessageId, MessageInfo, PostId,
    PostInfo, SendMessageRequest, SendMessageResponse, StatusCode,
};
use std::net::SocketAddr;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info};

mod fault;

pub use fault::{Calls, Fault, Faults};

pub mod prelude {
    pub use crate::{Calls, Fault, Faults, MockService, RunningMock, Snapshot};
}

/// Everything the service has stored so far.
#[derive(Clone, Debug, Default)]
pub struct Snapshot {
    pub accounts: Vec<Account>,
    pub follows: Vec<FollowRequest>,
    pub posts: Vec<PostInfo>,
    pub messages: Vec<MessageInfo>,
}

impl Snapshot {
    fn has_account(&self, id: &AccountId) -> bool {
        self.accounts.iter().any(|a| &a.id == id)
    }
}

#[derive(Default)]
struct CallCounters {
    accounts: AtomicUsize,
    follows: AtomicUsize,
    posts: AtomicUsize,
    messages: AtomicUsize,
}

struct AppState {
    store: Mutex<Snapshot>,
    faults: Faults,
    calls: CallCounters,
}

#[derive(Clone)]
pub struct MockService {
    state: Arc<AppState>,
}

impl Default for MockService {
    fn default() -> Self {
        Self::new(Faults::none())
    }
}

impl MockService {
    pub fn new(faults: Faults) -> Self {
        Self {
            state: Arc::new(AppState {
                store: Mutex::new(Snapshot::default()),
                faults,
                calls: CallCounters::default(),
            }),
        }
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/accounts", post(create_account).get(list_accounts))
            .route("/follows", post(follow).get(list_follows))
            .route("/posts", post(create_post).get(list_posts))
            .route("/messages", post(send_message).get(list_messages))
            .with_state(self.state.clone())
            .layer(TraceLayer::new_for_http())
    }

    pub async fn snapshot(&self) -> Snapshot {
        self.state.store.lock().await.clone()
    }

    /// Binds `addr` (port 0 picks a free port) and serves in a background task.
    pub async fn spawn(self, addr: SocketAddr) -> std::io::Result<RunningMock> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        let addr = listener.local_addr()?;
        let app = self.router();
        let task = tokio::spawn(async move {
            if let Err(err) = axum::serve(listener, app).await {
                error!("Mock service stopped: {err}");
            }
        });
        debug!("Mock service listening on {addr}");
        Ok(RunningMock {
            addr,
            service: self,
            task,
        })
    }
}

/// A mock service serving in the background. Stops when dropped.
pub struct RunningMock {
    pub addr: SocketAddr,
    service: MockService,
    task: JoinHandle<()>,
}

impl RunningMock {
    pub fn address(&self) -> String {
        self.addr.to_string()
    }

    pub async fn snapshot(&self) -> Snapshot {
        self.service.snapshot().await
    }
}

impl Drop for RunningMock {
    fn drop(&mut self) {
        self.task.abort();
    }
}

pub async fn run(addr: SocketAddr) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Mock social service listening on {}", listener.local_addr()?);
    axum::serve(listener, MockService::default().router()).await?;
    Ok(())
}

/* Errors */

#[derive(Debug)]
struct ApiError {
    code: StatusCode,
    message: String,
}

impl ApiError {
    fn new(code: StatusCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    fn unknown_account(id: &AccountId) -> Self {
        Self::new(StatusCode::NotFound, format!("account {id} not found"))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = HttpStatus::from_u16(self.code.http_status())
            .unwrap_or(HttpStatus::INTERNAL_SERVER_ERROR);
        let body = ErrorBody {
            code: self.code,
            message: self.message,
        };
        (status, Json(body)).into_response()
    }
}

/// Applies the injected fault for this call. `Ok(true)` means leave the id out.
async fn inject(fault: &Fault, counter: &AtomicUsize) -> Result<bool, ApiError> {
    let call = counter.fetch_add(1, Ordering::SeqCst);
    if fault.delay.contains(call) {
        tokio::time::sleep(fault.delay_by).await;
    }
    if fault.reject.contains(call) {
        debug!("MOCK SERVICE ___ REJECT {call}");
        return Err(ApiError::new(
            fault.reject_code,
            format!("injected failure on call {call}"),
        ));
    }
    Ok(fault.drop_id.contains(call))
}

fn require_content(content: &str) -> Result<(), ApiError> {
    if content.trim().is_empty() {
        Err(ApiError::new(
            StatusCode::InvalidArgument,
            "content must not be empty",
        ))
    } else {
        Ok(())
    }
}

/* Handlers */

type Shared = State<Arc<AppState>>;

async fn create_account(
    State(state): Shared,
    Json(request): Json<CreateAccountRequest>,
) -> Result<Json<CreateAccountResponse>, ApiError> {
    let drop_id = inject(&state.faults.accounts, &state.calls.accounts).await?;
    if request.name.trim().is_empty() {
        return Err(ApiError::new(
            StatusCode::InvalidArgument,
            "name must not be empty",
        ));
    }

    let account = Account {
        id: AccountId::new(uuid::Uuid::new_v4().to_string()),
        name: request.name,
    };
    state.store.lock().await.accounts.push(account.clone());
    debug!("Created account {account}");

    Ok(Json(CreateAccountResponse {
        id: (!drop_id).then_some(account.id),
        name: account.name,
    }))
}

async fn follow(
    State(state): Shared,
    Json(request): Json<FollowRequest>,
) -> Result<Json<FollowResponse>, ApiError> {
    let drop_id = inject(&state.faults.follows, &state.calls.follows).await?;
    if drop_id {
        return Ok(Json(FollowResponse {
            success: false,
            message: "follow not applied".to_string(),
        }));
    }

    let mut store = state.store.lock().await;
    for id in [&request.follower_id, &request.followed_id] {
        if !store.has_account(id) {
            return Err(ApiError::unknown_account(id));
        }
    }
    if request.follower_id == request.followed_id {
        return Err(ApiError::new(
            StatusCode::InvalidArgument,
            "an account cannot follow itself",
        ));
    }

    let message = if store.follows.contains(&request) {
        format!(
            "{} already follows {}",
            request.follower_id, request.followed_id
        )
    } else {
        let message = format!("{} now follows {}", request.follower_id, request.followed_id);
        store.follows.push(request);
        message
    };

    Ok(Json(FollowResponse {
        success: true,
        message,
    }))
}

async fn create_post(
    State(state): Shared,
    Json(request): Json<CreatePostRequest>,
) -> Result<Json<CreatePostResponse>, ApiError> {
    let drop_id = inject(&state.faults.posts, &state.calls.posts).await?;
    require_content(&request.content)?;

    let mut store = state.store.lock().await;
    if !store.has_account(&request.author_id) {
        return Err(ApiError::unknown_account(&request.author_id));
    }

    let post = PostInfo {
        id: Some(PostId::new(uuid::Uuid::new_v4().to_string())),
        author_id: Some(request.author_id),
        content: request.content,
    };
    store.posts.push(post.clone());

    Ok(Json(CreatePostResponse {
        post: Some(PostInfo {
            id: if drop_id { None } else { post.id },
            ..post
        }),
    }))
}

async fn send_message(
    State(state): Shared,
    Json(request): Json<SendMessageRequest>,
) -> Result<Json<SendMessageResponse>, ApiError> {
    let drop_id = inject(&state.faults.messages, &state.calls.messages).await?;
    require_content(&request.content)?;

    let mut store = state.store.lock().await;
    for id in [&request.sender_id, &request.receiver_id] {
        if !store.has_account(id) {
            return Err(ApiError::unknown_account(id));
        }
    }

    let message = MessageInfo {
        id: Some(MessageId::new(uuid::Uuid::new_v4().to_string())),
        sender_id: Some(request.sender_id),
        receiver_id: Some(request.receiver_id),
        content: request.content,
    };
    store.messages.push(message.clone());

    Ok(Json(SendMessageResponse {
        message: Some(MessageInfo {
            id: if drop_id { None } else { message.id },
            ..message
        }),
    }))
}

async fn list_accounts(State(state): Shared) -> Json<Vec<Account>> {
    Json(state.store.lock().await.accounts.clone())
}

async fn list_follows(State(state): Shared) -> Json<Vec<FollowRequest>> {
    Json(state.store.lock().await.follows.clone())
}

async fn list_posts(State(state): Shared) -> Json<Vec<PostInfo>> {
    Json(state.store.lock().await.posts.clone())
}

async fn list_messages(State(state): Shared) -> Json<Vec<MessageInfo>> {
    Json(state.store.lock().await.messages.clone())
}
