//! Typed, time-bounded calls to the remote service.
//!
//! Every call is classified into success or a [`Failure`] and handed to the [`Reporter`]
//! before the caller sees it. Nothing is retried.
use crate::reporter::Reporter;
use crate::service::SocialService;
use socialdrive_core::{
    preview, Account, CreateAccountRequest, CreatePostRequest, Failure, FollowRequest, MessageId,
    OperationKind, OperationRecord, Outcome, PostId, SendMessageRequest, Subject, Timeouts,
};
use std::fmt::Debug;
use std::future::Future;
use std::time::{Duration, Instant};

/// A finished call: the record that was reported, and the typed result.
#[derive(Debug)]
pub struct Attempt<T> {
    pub record: OperationRecord,
    pub result: Result<T, Failure>,
}

impl<T> Attempt<T> {
    pub fn into_result(self) -> Result<T, Failure> {
        self.result
    }
}

pub struct RpcFacade<S, R> {
    service: S,
    reporter: R,
    timeouts: Timeouts,
}

impl<S, R> RpcFacade<S, R>
where
    S: SocialService,
    R: Reporter,
{
    pub fn new(service: S, reporter: R, timeouts: Timeouts) -> Self {
        Self {
            service,
            reporter,
            timeouts,
        }
    }

    pub async fn create_account(&mut self, name: &str) -> Attempt<Account> {
        let request = CreateAccountRequest {
            name: name.to_string(),
        };
        let start = Instant::now();
        let result = bounded(self.timeouts.create_account, self.service.create_account(request))
            .await
            .and_then(|response| {
                require(response, "id", |r| {
                    let id = r.id.clone().filter(|id| !id.is_empty())?;
                    let name = if r.name.is_empty() {
                        name.to_string()
                    } else {
                        r.name.clone()
                    };
                    Some(Account { id, name })
                })
            });

        let subject = Subject::Account {
            name: name.to_string(),
        };
        self.finish(OperationKind::CreateAccount, subject, result, start, |a| {
            format!("created with id {}", a.id)
        })
    }

    pub async fn follow(&mut self, follower: &Account, followed: &Account) -> Attempt<String> {
        let request = FollowRequest {
            follower_id: follower.id.clone(),
            followed_id: followed.id.clone(),
        };
        let start = Instant::now();
        let result = bounded(self.timeouts.follow, self.service.follow(request))
            .await
            .and_then(|response| {
                require(response, "success", |r| r.success.then(|| r.message.clone()))
            });

        let subject = Subject::Follow {
            follower: follower.clone(),
            followed: followed.clone(),
        };
        self.finish(OperationKind::Follow, subject, result, start, |message| message.clone())
    }

    pub async fn create_post(&mut self, author: &Account, content: &str) -> Attempt<PostId> {
        let request = CreatePostRequest {
            author_id: author.id.clone(),
            content: content.to_string(),
        };
        let start = Instant::now();
        let result = bounded(self.timeouts.create_post, self.service.create_post(request))
            .await
            .and_then(|response| {
                require(response, "post.id", |r| {
                    r.post
                        .as_ref()?
                        .id
                        .clone()
                        .filter(|id| !id.is_empty())
                })
            });

        let subject = Subject::Post {
            author: author.clone(),
            preview: preview(content),
        };
        self.finish(OperationKind::CreatePost, subject, result, start, |id| {
            format!("post id {id}")
        })
    }

    pub async fn send_message(
        &mut self,
        sender: &Account,
        receiver: &Account,
        content: &str,
    ) -> Attempt<MessageId> {
        let request = SendMessageRequest {
            sender_id: sender.id.clone(),
            receiver_id: receiver.id.clone(),
            content: content.to_string(),
        };
        let start = Instant::now();
        let result = bounded(self.timeouts.send_message, self.service.send_message(request))
            .await
            .and_then(|response| {
                require(response, "message.id", |r| {
                    r.message
                        .as_ref()?
                        .id
                        .clone()
                        .filter(|id| !id.is_empty())
                })
            });

        let subject = Subject::Message {
            sender: sender.clone(),
            receiver: receiver.clone(),
            preview: preview(content),
        };
        self.finish(OperationKind::SendMessage, subject, result, start, |id| {
            format!("message id {id}")
        })
    }

    fn finish<T>(
        &mut self,
        kind: OperationKind,
        subject: Subject,
        result: Result<T, Failure>,
        start: Instant,
        describe: impl FnOnce(&T) -> String,
    ) -> Attempt<T> {
        let outcome = match &result {
            Ok(value) => Outcome::Succeeded(describe(value)),
            Err(failure) => Outcome::Failed(failure.clone()),
        };

        #[cfg(feature = "metrics")]
        {
            let labels = kind.labels();
            metrics::histogram!(labels.latency).record(start.elapsed().as_secs_f64());
            if result.is_ok() {
                metrics::counter!(labels.success).increment(1);
            } else {
                metrics::counter!(labels.error).increment(1);
            }
        }
        #[cfg(not(feature = "metrics"))]
        let _ = start;

        let record = OperationRecord {
            kind,
            subject,
            outcome,
        };
        self.reporter.record(&record);

        Attempt { record, result }
    }
}

/// Runs `call`, turning an elapsed deadline into a `DeadlineExceeded` status failure.
async fn bounded<T, F>(timeout: Duration, call: F) -> Result<T, Failure>
where
    F: Future<Output = Result<T, Failure>>,
{
    match tokio::time::timeout(timeout, call).await {
        Ok(result) => result,
        Err(_elapsed) => Err(Failure::deadline_exceeded(timeout)),
    }
}

/// Extracts the success marker from `response`, or fails with the response attached.
fn require<U: Debug, T>(
    response: U,
    expected: &'static str,
    extract: impl FnOnce(&U) -> Option<T>,
) -> Result<T, Failure> {
    extract(&response).ok_or_else(|| Failure::Logical {
        expected,
        response: format!("{response:?}"),
    })
}
