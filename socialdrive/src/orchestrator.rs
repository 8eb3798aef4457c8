//! The fixed four-phase workflow.
//!
//! `CreatingAccounts -> (gate) -> Following -> Posting -> Messaging -> Done`, or `Aborted`
//! when the gate finds fewer accounts than configured. Inside a phase a failed call is
//! recorded and the next call is issued anyway.
use crate::facade::RpcFacade;
use crate::names::SuffixGenerator;
use crate::registry::Registry;
use crate::reporter::Reporter;
use crate::service::SocialService;
use socialdrive_core::{
    Phase, PhaseReport, RunSummary, WorkflowConfig, WorkflowError, WorkflowState,
};
use tracing::{debug, error, info, instrument, warn};

pub struct Orchestrator<S, R, G> {
    config: WorkflowConfig,
    facade: RpcFacade<S, R>,
    names: G,
    registry: Registry,
    state: WorkflowState,
}

impl<S, R, G> Orchestrator<S, R, G>
where
    S: SocialService,
    R: Reporter,
    G: SuffixGenerator,
{
    pub fn new(
        config: WorkflowConfig,
        service: S,
        reporter: R,
        names: G,
    ) -> Result<Self, WorkflowError> {
        config.validate()?;
        let facade = RpcFacade::new(service, reporter, config.timeouts);
        Ok(Self {
            config,
            facade,
            names,
            registry: Registry::new(),
            state: WorkflowState::CreatingAccounts,
        })
    }

    #[instrument(name = "workflow", skip_all, fields(accounts = self.config.account_count))]
    pub async fn run(mut self) -> RunSummary {
        let mut summary = RunSummary::new();

        summary.creation = self.create_accounts().await;

        if let Err(err) = self.gate() {
            error!("Account gate failed: {err}. Skipping follows, posts and messages.");
            self.transition(WorkflowState::Aborted);
            summary.abort_reason = Some(err);
            return self.finish(summary);
        }

        info!("All {} accounts created:", self.registry.len());
        for (idx, account) in self.registry.all().iter().enumerate() {
            info!(" - account {} ({}): id {}", idx + 1, account.name, account.id);
        }

        self.transition(WorkflowState::Following);
        summary.following = self.follow_all().await;

        self.transition(WorkflowState::Posting);
        summary.posting = self.post_all().await;

        self.transition(WorkflowState::Messaging);
        summary.ring_messages = self.ring_messages().await;
        summary.direct_messages = self.direct_messages().await;

        self.transition(WorkflowState::Done);
        self.finish(summary)
    }

    /// Attempts every configured account, regardless of earlier failures.
    #[instrument(name = "accounts", skip_all)]
    async fn create_accounts(&mut self) -> PhaseReport {
        let mut report = PhaseReport::new(Phase::Accounts);
        for idx in 0..self.config.account_count {
            let name = self.config.account_name(idx, &self.names.next_suffix());
            let attempt = self.facade.create_account(&name).await;
            match attempt.result {
                Ok(account) => self.registry.register(account),
                Err(_) => warn!(
                    "Could not create account with stem '{}'",
                    self.config.stem(idx)
                ),
            }
            report.push(attempt.record);
        }
        report
    }

    fn gate(&self) -> Result<(), WorkflowError> {
        let created = self.registry.len();
        let required = self.config.account_count;
        if created == required {
            Ok(())
        } else {
            Err(WorkflowError::InsufficientAccounts { created, required })
        }
    }

    /// Every ordered pair `(i, j)` with `i != j`, in nested index order.
    #[instrument(name = "follows", skip_all)]
    async fn follow_all(&mut self) -> PhaseReport {
        let mut report = PhaseReport::new(Phase::Follows);
        let accounts = self.registry.all();
        for (i, follower) in accounts.iter().enumerate() {
            for (j, followed) in accounts.iter().enumerate() {
                if i == j {
                    continue;
                }
                let attempt = self.facade.follow(follower, followed).await;
                report.push(attempt.record);
            }
        }
        report
    }

    #[instrument(name = "posts", skip_all)]
    async fn post_all(&mut self) -> PhaseReport {
        let mut report = PhaseReport::new(Phase::Posts);
        for author in self.registry.all() {
            let content = self
                .config
                .post_template
                .render(&[("name", author.name.as_str())]);
            let attempt = self.facade.create_post(author, &content).await;
            report.push(attempt.record);
        }
        report
    }

    /// Account `i` messages account `(i + 1) mod N`.
    #[instrument(name = "ring_messages", skip_all)]
    async fn ring_messages(&mut self) -> PhaseReport {
        let mut report = PhaseReport::new(Phase::RingMessages);
        let accounts = self.registry.all();
        for (i, sender) in accounts.iter().enumerate() {
            let receiver = &accounts[(i + 1) % accounts.len()];
            let content = self.config.ring_template.render(&[
                ("sender", sender.name.as_str()),
                ("receiver", receiver.name.as_str()),
            ]);
            let attempt = self.facade.send_message(sender, receiver, &content).await;
            report.push(attempt.record);
        }
        report
    }

    #[instrument(name = "direct_messages", skip_all)]
    async fn direct_messages(&mut self) -> PhaseReport {
        let mut report = PhaseReport::new(Phase::DirectMessages);
        for direct in &self.config.direct_messages {
            // Indices were validated against the account count, and the gate guarantees it.
            let (Some(sender), Some(receiver)) = (
                self.registry.get(direct.sender),
                self.registry.get(direct.receiver),
            ) else {
                error!(
                    "Direct message {} -> {} refers to a missing account",
                    direct.sender, direct.receiver
                );
                continue;
            };
            let content = direct.template.render(&[
                ("sender", sender.name.as_str()),
                ("receiver", receiver.name.as_str()),
            ]);
            let attempt = self.facade.send_message(sender, receiver, &content).await;
            report.push(attempt.record);
        }
        report
    }

    fn transition(&mut self, next: WorkflowState) {
        debug!("{} -> {}", self.state, next);
        self.state = next;
    }

    fn finish(self, mut summary: RunSummary) -> RunSummary {
        summary.state = self.state;
        summary.accounts = self.registry.into_accounts();
        summary
    }
}
