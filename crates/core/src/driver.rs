//! Async driver for a swap session.
//!
//! Runs as a single task: edits arrive on a channel and are applied to the
//! [`SwapSession`] in order, quote requests are debounced and dispatched to
//! the [`QuoteClient`] without blocking further edits, and responses come
//! back tagged with their sequence number so that only the newest one is
//! ever applied.

use std::sync::Arc;

use anyhow::Context;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::mpsc::{self, Receiver, Sender};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info, warn};

use pool_dash_quote::{quote_with_retry, Quote, QuoteClient, QuoteError};
use pool_dash_shared::config::CoordinatorConfig;
use pool_dash_shared::{Address, SwapState};

use crate::coordinator::{
    AllowanceCheck, QuoteOutcome, QuoteStatus, QuoteTicket, SwapError, SwapSession,
};
use crate::debounce::Debouncer;
use crate::quote_stats;

#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    Edit { address: Address, amount: f64 },
    /// Dispatch any debounced request right away.
    Flush,
    /// Flush, wait for in-flight quotes, then stop.
    Close,
}

/// Snapshot published after every state change.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionUpdate {
    pub entered: SwapState,
    pub displayed: SwapState,
    pub status: QuoteStatus,
    pub allowance: Vec<AllowanceCheck>,
    pub error: Option<SwapError>,
}

impl SessionUpdate {
    fn of(session: &SwapSession, error: Option<SwapError>) -> Self {
        Self {
            entered: session.state().clone(),
            displayed: session.displayed_state().clone(),
            status: session.status().clone(),
            allowance: session.allowance_warnings(),
            error,
        }
    }
}

type QuoteResponse = (u64, Result<Quote, QuoteError>);

pub struct QuoteDriver<C> {
    client: Arc<C>,
    session: SwapSession,
    config: CoordinatorConfig,
}

impl<C> QuoteDriver<C>
where
    C: QuoteClient + 'static,
{
    pub fn new(client: Arc<C>, session: SwapSession, config: CoordinatorConfig) -> Self {
        let session = session.with_authenticated(config.authenticated);
        Self {
            client,
            session,
            config,
        }
    }

    /// Starts the driver on the current runtime.
    pub fn spawn(self) -> SessionHandle {
        let (cmd_tx, cmd_rx) = mpsc::channel(self.config.channel_capacity);
        let (update_tx, update_rx) = mpsc::channel(self.config.channel_capacity);
        let task = tokio::spawn(self.run(cmd_rx, update_tx));
        SessionHandle {
            commands: cmd_tx,
            updates: update_rx,
            task,
        }
    }

    pub async fn run(
        mut self,
        mut commands: Receiver<SessionCommand>,
        updates: Sender<SessionUpdate>,
    ) -> SwapSession {
        let (resp_tx, mut resp_rx) = mpsc::channel::<QuoteResponse>(self.config.channel_capacity);
        let mut debouncer: Debouncer<QuoteTicket> = Debouncer::new(self.config.debounce);
        let mut in_flight = 0usize;
        let mut closing = false;

        loop {
            if closing && in_flight == 0 && !debouncer.is_pending() {
                break;
            }
            let deadline = debouncer.deadline();

            tokio::select! {
                cmd = commands.recv(), if !closing => match cmd {
                    Some(SessionCommand::Edit { address, amount }) => {
                        match self.session.apply_amount_edit(&address, amount) {
                            Ok(edit) => {
                                if debouncer.push(Instant::now(), edit.ticket) {
                                    quote_stats::inc_requests_coalesced();
                                }
                                self.publish(&updates, None);
                            }
                            Err(e) => {
                                warn!(error = %e, "Rejected amount edit");
                                self.publish(&updates, Some(e));
                            }
                        }
                    }
                    Some(SessionCommand::Flush) => {
                        if let Some(ticket) = debouncer.flush() {
                            self.dispatch(ticket, &resp_tx);
                            in_flight += 1;
                        }
                    }
                    Some(SessionCommand::Close) | None => {
                        closing = true;
                        if let Some(ticket) = debouncer.flush() {
                            self.dispatch(ticket, &resp_tx);
                            in_flight += 1;
                        }
                    }
                },
                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    if let Some(ticket) = debouncer.poll(Instant::now()) {
                        self.dispatch(ticket, &resp_tx);
                        in_flight += 1;
                    }
                },
                Some((seq, result)) = resp_rx.recv(), if in_flight > 0 => {
                    in_flight -= 1;
                    if self.session.accept_quote(seq, result) == QuoteOutcome::Applied {
                        self.publish(&updates, None);
                    }
                },
                else => break,
            }
        }

        info!(latest_seq = self.session.latest_seq(), "Swap session closed");
        self.session
    }

    fn dispatch(&self, ticket: QuoteTicket, responses: &Sender<QuoteResponse>) {
        quote_stats::inc_requests_dispatched();
        debug!(seq = ticket.seq, "Dispatching quote request");
        let client = Arc::clone(&self.client);
        let responses = responses.clone();
        let limit = self.config.quote_timeout;
        let retries = self.config.max_retries;
        tokio::spawn(async move {
            let result = quote_with_retry(client.as_ref(), ticket.request, limit, retries).await;
            if responses.send((ticket.seq, result)).await.is_err() {
                debug!(seq = ticket.seq, "Session gone before quote arrived");
            }
        });
    }

    /// Never waits on the reader: when the updates channel is full the
    /// snapshot is dropped, and the next one supersedes it anyway.
    fn publish(&self, updates: &Sender<SessionUpdate>, error: Option<SwapError>) {
        match updates.try_send(SessionUpdate::of(&self.session, error)) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => debug!("Session update channel full, dropping update"),
            Err(TrySendError::Closed(_)) => debug!("Session update receiver dropped"),
        }
    }
}

/// Caller side of a running [`QuoteDriver`].
pub struct SessionHandle {
    commands: Sender<SessionCommand>,
    /// Latest session snapshots. Reading is optional; a full channel drops
    /// updates rather than holding up edits.
    pub updates: Receiver<SessionUpdate>,
    task: JoinHandle<SwapSession>,
}

impl SessionHandle {
    pub async fn edit(&self, address: Address, amount: f64) -> anyhow::Result<()> {
        self.send(SessionCommand::Edit { address, amount }).await
    }

    pub async fn flush(&self) -> anyhow::Result<()> {
        self.send(SessionCommand::Flush).await
    }

    async fn send(&self, command: SessionCommand) -> anyhow::Result<()> {
        self.commands
            .send(command)
            .await
            .context("swap session is no longer running")
    }

    /// Closes the session and returns its final state once every in-flight
    /// quote has settled. Updates not yet read are discarded.
    pub async fn close(self) -> anyhow::Result<SwapSession> {
        self.close_draining(|_| {}).await
    }

    /// Like [`SessionHandle::close`], but hands every update still queued,
    /// or published while in-flight quotes settle, to `on_update` in order.
    pub async fn close_draining(
        self,
        mut on_update: impl FnMut(SessionUpdate),
    ) -> anyhow::Result<SwapSession> {
        let SessionHandle {
            commands,
            mut updates,
            task,
        } = self;
        commands
            .send(SessionCommand::Close)
            .await
            .context("swap session is no longer running")?;
        // the driver drops its sender when it stops
        while let Some(update) = updates.recv().await {
            on_update(update);
        }
        task.await.context("swap session task failed")
    }
}
