mod utils;
#[allow(unused)]
use utils::*;

use mock_service::prelude::*;
use socialdrive::prelude::*;
use socialdrive_core::{
    FailureClass, FollowRequest, MessageInfo, OperationKind, StatusCode, WorkflowError,
};
use std::time::Duration;

async fn drive_mock(mock: &RunningMock, config: WorkflowConfig) -> (RunSummary, MemoryReporter) {
    let mut reporter = MemoryReporter::new();
    let summary = drive(&mock.address(), config, &mut reporter, SequentialSuffix::new())
        .await
        .unwrap();
    (summary, reporter)
}

#[tokio::test]
#[ntest::timeout(30000)]
async fn full_run_populates_the_service() {
    init();
    let mock = spawn_mock(Faults::none()).await;

    let (summary, reporter) = drive_mock(&mock, WorkflowConfig::default()).await;

    assert_eq!(summary.state, WorkflowState::Done);
    for phase in summary.phases() {
        assert_eq!(phase.failed(), 0, "{phase}");
    }
    assert_eq!(reporter.records().len(), 5 + 20 + 5 + 5 + 2);

    let snapshot = mock.snapshot().await;
    assert_eq!(snapshot.accounts, summary.accounts);
    assert_eq!(snapshot.follows.len(), 20);
    assert_eq!(snapshot.posts.len(), 5);
    assert_eq!(snapshot.messages.len(), 7);

    for (post, author) in snapshot.posts.iter().zip(&summary.accounts) {
        assert_eq!(post.author_id.as_ref(), Some(&author.id));
        assert!(post.content.contains(&author.name));
    }

    let ids: Vec<_> = summary.accounts.iter().map(|a| a.id.clone()).collect();
    let pairs: Vec<_> = snapshot
        .messages
        .iter()
        .map(|MessageInfo { sender_id, receiver_id, .. }| {
            (sender_id.clone().unwrap(), receiver_id.clone().unwrap())
        })
        .collect();
    let expected: Vec<_> = [(0, 1), (1, 2), (2, 3), (3, 4), (4, 0), (0, 3), (2, 4)]
        .into_iter()
        .map(|(s, r)| (ids[s].clone(), ids[r].clone()))
        .collect();
    assert_eq!(pairs, expected);
}

#[tokio::test]
#[ntest::timeout(30000)]
async fn follows_are_visible_over_http() {
    init();
    let mock = spawn_mock(Faults::none()).await;
    let (summary, _) = drive_mock(&mock, WorkflowConfig::default()).await;

    let follows: Vec<FollowRequest> = reqwest::get(format!("http://{}/follows", mock.addr))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(follows.len(), 20);
    assert!(follows.iter().all(|f| f.follower_id != f.followed_id));
    assert_eq!(follows[0].follower_id, summary.accounts[0].id);
    assert_eq!(follows[0].followed_id, summary.accounts[1].id);
}

#[tokio::test]
#[ntest::timeout(30000)]
async fn rejected_creations_abort_the_run() {
    init();
    let mock = spawn_mock(
        Faults::none().accounts(Fault::reject(Calls::All, StatusCode::Unavailable)),
    )
    .await;

    let (summary, reporter) = drive_mock(&mock, WorkflowConfig::default()).await;

    assert_eq!(summary.state, WorkflowState::Aborted);
    assert_eq!(
        summary.abort_reason,
        Some(WorkflowError::InsufficientAccounts {
            created: 0,
            required: 5
        })
    );
    assert_eq!(summary.creation.attempted(), 5);
    assert_eq!(summary.downstream_calls(), 0);
    assert!(reporter
        .records()
        .iter()
        .all(|r| r.kind == OperationKind::CreateAccount));

    let snapshot = mock.snapshot().await;
    assert!(snapshot.accounts.is_empty());
    assert!(snapshot.follows.is_empty());
    assert!(snapshot.posts.is_empty());
    assert!(snapshot.messages.is_empty());
}

#[tokio::test]
#[ntest::timeout(30000)]
async fn missing_account_id_counts_as_failed_creation() {
    init();
    let mock = spawn_mock(Faults::none().accounts(Fault::drop_id(Calls::Only(vec![4])))).await;

    let (summary, _) = drive_mock(&mock, WorkflowConfig::default()).await;

    assert!(summary.is_aborted());
    assert_eq!(summary.accounts.len(), 4);
    let failure = summary.creation.records[4].failure().unwrap();
    assert_eq!(failure.class(), FailureClass::Logical);
    assert!(mock.snapshot().await.follows.is_empty());
}

#[tokio::test]
#[ntest::timeout(30000)]
async fn slow_follow_times_out_without_stopping_the_phase() {
    init();
    let mock = spawn_mock(Faults::none().follows(Fault::delay(
        Calls::Only(vec![3]),
        Duration::from_millis(500),
    )))
    .await;

    let mut config = WorkflowConfig::default();
    config.timeouts.follow = Duration::from_millis(100);
    let (summary, _) = drive_mock(&mock, config).await;

    assert_eq!(summary.state, WorkflowState::Done);
    assert_eq!(summary.following.attempted(), 20);
    assert_eq!(summary.following.failed(), 1);
    assert_eq!(
        summary.following.records[3].failure().and_then(|f| f.code()),
        Some(StatusCode::DeadlineExceeded)
    );
    assert_eq!(summary.posting.succeeded(), 5);
}

#[tokio::test]
#[ntest::timeout(30000)]
async fn service_errors_are_reported_per_call() {
    init();
    let mock = spawn_mock(
        Faults::none()
            .posts(Fault::reject(Calls::Only(vec![0, 2]), StatusCode::Internal))
            .messages(Fault::drop_id(Calls::Only(vec![5]))),
    )
    .await;

    let (summary, reporter) = drive_mock(&mock, WorkflowConfig::default()).await;

    assert_eq!(summary.state, WorkflowState::Done);
    assert_eq!(summary.posting.failed(), 2);
    assert_eq!(summary.ring_messages.failed(), 0);
    assert_eq!(summary.direct_messages.failed(), 1);

    let failed: Vec<_> = reporter
        .records()
        .iter()
        .filter_map(|r| r.failure().map(|f| (r.kind, f.class())))
        .collect();
    assert_eq!(
        failed,
        [
            (OperationKind::CreatePost, FailureClass::Status),
            (OperationKind::CreatePost, FailureClass::Status),
            (OperationKind::SendMessage, FailureClass::Logical),
        ]
    );
}

#[tokio::test]
#[ntest::timeout(30000)]
async fn unreachable_service_reports_every_creation() {
    init();
    // Bind and drop to get a port nobody listens on.
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };

    let mut reporter = MemoryReporter::new();
    let summary = drive(
        &addr.to_string(),
        WorkflowConfig::default(),
        &mut reporter,
        SequentialSuffix::new(),
    )
    .await
    .unwrap();

    assert!(summary.is_aborted());
    assert_eq!(reporter.records().len(), 5);
    assert!(reporter
        .records()
        .iter()
        .all(|r| r.failure().and_then(|f| f.code()) == Some(StatusCode::Unavailable)));
}

#[tokio::test]
async fn bad_address_is_a_transport_error() {
    let result = drive(
        "ftp://example.com",
        WorkflowConfig::default(),
        MemoryReporter::new(),
        SequentialSuffix::new(),
    )
    .await;
    assert!(matches!(result, Err(socialdrive::DriveError::Transport(_))));
}
