//! Session token coordination
//!
//! One [`SessionTokenCoordinator`] owns the credential pair of one session.
//! Any number of requests share it. When a request is rejected for
//! authorization the coordinator runs at most one refresh at a time; every
//! request rejected while that refresh is in flight parks on a wait-list and
//! observes the same outcome.
//!
//! ```text
//!                  establish / initialize
//!   Unauthenticated ───────────────────────► Valid ◄──────────┐
//!         ▲                                    │              │ refresh ok
//!         │ clear (logout)                     │ rejection    │
//!         │                                    ▼              │
//!        any                               Refreshing ────────┘
//!                                              │
//!                                              │ refresh failed
//!                                              ▼
//!                                            Failed ── establish ──► Valid
//! ```

use std::future::Future;
use std::mem;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use thiserror::Error;
use tokio::sync::{oneshot, Mutex as AsyncMutex};
use tracing::{debug, info, warn};

use super::traits::{CredentialStore, RefreshClient, RefreshError};
use super::types::CredentialPair;

/// Errors surfaced by the coordinator
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// No usable credentials: not signed in, refresh failed, or the request
    /// was already retried once. Terminal for the request.
    #[error("authentication required: {0}")]
    Authentication(String),

    /// The credential store could not be read or written
    #[error("credential storage failed: {0}")]
    Storage(String),
}

/// Observable coordinator state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// No credentials held
    Unauthenticated,
    /// Credentials held, no refresh in flight
    Valid,
    /// A refresh is in flight
    Refreshing,
    /// The last refresh failed; credentials were discarded
    Failed(String),
}

impl SessionState {
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Valid | Self::Refreshing)
    }
}

/// One logical request's view of the session: the access token it was sent
/// with and whether it is already a retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestAttempt {
    access_token: String,
    retried: bool,
}

impl RequestAttempt {
    /// Attempt that has not been retried yet.
    #[must_use]
    pub fn first(access_token: impl Into<String>) -> Self {
        Self { access_token: access_token.into(), retried: false }
    }

    /// The retry of this attempt, sent with `access_token`.
    #[must_use]
    pub fn retry_with(&self, access_token: impl Into<String>) -> Self {
        Self { access_token: access_token.into(), retried: true }
    }

    #[must_use]
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    #[must_use]
    pub fn is_retry(&self) -> bool {
        self.retried
    }
}

/// Outcome of one send inside [`SessionTokenCoordinator::authorized`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Authorized<T> {
    /// The server accepted the credential
    Completed(T),
    /// The server rejected the credential (HTTP 401)
    Rejected,
}

type Waiter = oneshot::Sender<Result<String, SessionError>>;

enum Phase {
    Unauthenticated,
    Valid,
    Refreshing { waiters: Vec<Waiter> },
    Failed { reason: String },
}

struct SessionShared {
    credentials: Option<CredentialPair>,
    phase: Phase,
    /// Bumped on every credential replacement; a refresh started under an
    /// older generation is discarded when it settles.
    generation: u64,
}

impl SessionShared {
    /// Swap the phase, returning any parked waiters.
    fn transition(&mut self, next: Phase) -> Vec<Waiter> {
        match mem::replace(&mut self.phase, next) {
            Phase::Refreshing { waiters } => waiters,
            _ => Vec::new(),
        }
    }
}

enum Step {
    Wait(oneshot::Receiver<Result<String, SessionError>>),
    UseCurrent(String),
    Terminate { reason: String, generation: u64 },
}

enum StoreWrite<'a> {
    Save(&'a CredentialPair),
    Clear,
}

/// Apply `write` to the store on behalf of `generation`.
///
/// Store writes are serialised by `writes`. A write whose generation has
/// been superseded by the time it holds the lock is skipped and reported as
/// `Ok(false)`; the transition that superseded it performs its own write
/// afterwards, so the store always ends up matching the latest transition.
async fn write_store<S>(
    store: &S,
    shared: &Mutex<SessionShared>,
    writes: &AsyncMutex<()>,
    generation: u64,
    write: StoreWrite<'_>,
) -> Result<bool, String>
where
    S: CredentialStore + ?Sized,
{
    let _serialised = writes.lock().await;
    let current = shared.lock().generation;
    if current != generation {
        return Ok(false);
    }

    match write {
        StoreWrite::Save(credentials) => store.save(credentials).await?,
        StoreWrite::Clear => store.clear().await?,
    }
    Ok(true)
}

/// Serialises token refresh for one session.
///
/// Cloning is cheap and yields a handle to the same session.
pub struct SessionTokenCoordinator<C, S: ?Sized> {
    refresh_client: Arc<C>,
    store: Arc<S>,
    shared: Arc<Mutex<SessionShared>>,
    store_writes: Arc<AsyncMutex<()>>,
    refresh_timeout: Option<Duration>,
    refresh_count: Arc<AtomicU64>,
}

impl<C, S: ?Sized> Clone for SessionTokenCoordinator<C, S> {
    fn clone(&self) -> Self {
        Self {
            refresh_client: Arc::clone(&self.refresh_client),
            store: Arc::clone(&self.store),
            shared: Arc::clone(&self.shared),
            store_writes: Arc::clone(&self.store_writes),
            refresh_timeout: self.refresh_timeout,
            refresh_count: Arc::clone(&self.refresh_count),
        }
    }
}

impl<C, S> SessionTokenCoordinator<C, S>
where
    C: RefreshClient + 'static,
    S: CredentialStore + ?Sized + 'static,
{
    /// Create an unauthenticated coordinator.
    pub fn new(refresh_client: C, store: Arc<S>) -> Self {
        Self {
            refresh_client: Arc::new(refresh_client),
            store,
            shared: Arc::new(Mutex::new(SessionShared {
                credentials: None,
                phase: Phase::Unauthenticated,
                generation: 0,
            })),
            store_writes: Arc::new(AsyncMutex::new(())),
            refresh_timeout: None,
            refresh_count: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Bound each refresh call; an elapsed timeout counts as a failed
    /// refresh.
    #[must_use]
    pub fn with_refresh_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.refresh_timeout = timeout;
        self
    }

    /// Restore credentials from the store.
    ///
    /// Returns `true` if a stored pair was found.
    ///
    /// # Errors
    /// Returns [`SessionError::Storage`] if the store cannot be read.
    pub async fn initialize(&self) -> Result<bool, SessionError> {
        let stored = self.store.load().await.map_err(SessionError::Storage)?;
        let Some(credentials) = stored else {
            debug!("no stored credentials");
            return Ok(false);
        };

        self.install(credentials);
        info!("session restored from credential store");
        Ok(true)
    }

    /// Adopt a freshly issued pair (login, registration).
    ///
    /// Requests parked on an in-flight refresh are released with the new
    /// access token.
    ///
    /// # Errors
    /// Returns [`SessionError::Storage`] if the pair cannot be persisted;
    /// the in-memory session is left unchanged in that case.
    pub async fn establish(&self, credentials: CredentialPair) -> Result<(), SessionError> {
        let _serialised = self.store_writes.lock().await;
        self.store.save(&credentials).await.map_err(SessionError::Storage)?;
        self.install(credentials);
        info!("session established");
        Ok(())
    }

    fn install(&self, credentials: CredentialPair) {
        let token = credentials.access_token.clone();
        let waiters = {
            let mut shared = self.shared.lock();
            shared.credentials = Some(credentials);
            shared.generation += 1;
            shared.transition(Phase::Valid)
        };
        for waiter in waiters {
            let _ = waiter.send(Ok(token.clone()));
        }
    }

    /// Sign out: discard credentials from memory and store.
    ///
    /// Requests parked on an in-flight refresh fail with an authentication
    /// error; that refresh's outcome is discarded.
    ///
    /// # Errors
    /// Returns [`SessionError::Storage`] if the store cannot be cleared.
    pub async fn clear(&self) -> Result<(), SessionError> {
        let (waiters, generation) = {
            let mut shared = self.shared.lock();
            shared.credentials = None;
            shared.generation += 1;
            (shared.transition(Phase::Unauthenticated), shared.generation)
        };
        for waiter in waiters {
            let _ = waiter.send(Err(SessionError::Authentication("signed out".to_string())));
        }

        let cleared = write_store(
            &*self.store,
            &self.shared,
            &self.store_writes,
            generation,
            StoreWrite::Clear,
        )
        .await
        .map_err(SessionError::Storage)?;
        if !cleared {
            debug!("signed in again before the store was cleared");
        }
        info!("session cleared");
        Ok(())
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        match &self.shared.lock().phase {
            Phase::Unauthenticated => SessionState::Unauthenticated,
            Phase::Valid => SessionState::Valid,
            Phase::Refreshing { .. } => SessionState::Refreshing,
            Phase::Failed { reason } => SessionState::Failed(reason.clone()),
        }
    }

    /// Current credential pair, if any.
    #[must_use]
    pub fn credentials(&self) -> Option<CredentialPair> {
        self.shared.lock().credentials.clone()
    }

    /// Number of refresh calls issued so far.
    #[must_use]
    pub fn refresh_count(&self) -> u64 {
        self.refresh_count.load(Ordering::SeqCst)
    }

    /// Start a request with the current access token.
    ///
    /// # Errors
    /// Returns [`SessionError::Authentication`] when no credentials are held.
    pub fn begin(&self) -> Result<RequestAttempt, SessionError> {
        let shared = self.shared.lock();
        if let Phase::Failed { reason } = &shared.phase {
            return Err(SessionError::Authentication(reason.clone()));
        }
        shared
            .credentials
            .as_ref()
            .map(|credentials| RequestAttempt::first(credentials.access_token.clone()))
            .ok_or_else(|| SessionError::Authentication("not signed in".to_string()))
    }

    /// Handle an authorization rejection of `attempt`.
    ///
    /// Resolves to the access token the request should be retried with.
    /// Only the first rejection in the `Valid` state starts a refresh; later
    /// rejections wait for it. A token that is already stale resolves to the
    /// current one without refreshing.
    ///
    /// # Errors
    /// Returns [`SessionError::Authentication`] if the attempt was already
    /// retried, no session is held, or the refresh fails.
    pub async fn on_auth_rejected(&self, attempt: &RequestAttempt) -> Result<String, SessionError> {
        if attempt.is_retry() {
            debug!("retried request rejected again");
            return Err(SessionError::Authentication(
                "credentials rejected after refresh".to_string(),
            ));
        }

        let step = {
            let mut guard = self.shared.lock();
            let shared = &mut *guard;
            match shared.phase {
                Phase::Unauthenticated => {
                    return Err(SessionError::Authentication("not signed in".to_string()));
                }
                Phase::Failed { ref reason } => {
                    return Err(SessionError::Authentication(reason.clone()));
                }
                Phase::Refreshing { ref mut waiters } => {
                    let (tx, rx) = oneshot::channel();
                    waiters.push(tx);
                    debug!(waiting = waiters.len(), "joined in-flight refresh");
                    Step::Wait(rx)
                }
                Phase::Valid => match shared.credentials.clone() {
                    None => Step::Terminate {
                        reason: "not signed in".to_string(),
                        generation: shared.generation,
                    },
                    Some(current) if current.access_token != attempt.access_token() => {
                        Step::UseCurrent(current.access_token)
                    }
                    Some(current) if !current.has_refresh_token() => {
                        let reason = "no refresh credential".to_string();
                        shared.credentials = None;
                        shared.generation += 1;
                        shared.phase = Phase::Failed { reason: reason.clone() };
                        Step::Terminate { reason, generation: shared.generation }
                    }
                    Some(current) => {
                        let (tx, rx) = oneshot::channel();
                        shared.phase = Phase::Refreshing { waiters: vec![tx] };
                        self.spawn_refresh(current.refresh_token, shared.generation);
                        Step::Wait(rx)
                    }
                },
            }
        };

        match step {
            Step::UseCurrent(token) => {
                debug!("rejected token already superseded");
                Ok(token)
            }
            Step::Terminate { reason, generation } => {
                let cleared = write_store(
                    &*self.store,
                    &self.shared,
                    &self.store_writes,
                    generation,
                    StoreWrite::Clear,
                )
                .await;
                if let Err(error) = cleared {
                    warn!(error = %error, "failed to clear credential store");
                }
                Err(SessionError::Authentication(reason))
            }
            Step::Wait(rx) => rx.await.unwrap_or_else(|_| {
                Err(SessionError::Authentication("refresh abandoned".to_string()))
            }),
        }
    }

    /// Run `send` with the current access token, refreshing and retrying
    /// once if it reports [`Authorized::Rejected`].
    ///
    /// # Errors
    /// Propagates errors from `send`; session failures are converted with
    /// `E::from`.
    pub async fn authorized<T, E, F, Fut>(&self, mut send: F) -> Result<T, E>
    where
        F: FnMut(String) -> Fut,
        Fut: Future<Output = Result<Authorized<T>, E>>,
        E: From<SessionError>,
    {
        let mut attempt = self.begin()?;
        loop {
            match send(attempt.access_token().to_string()).await? {
                Authorized::Completed(value) => return Ok(value),
                Authorized::Rejected => {
                    let token = self.on_auth_rejected(&attempt).await?;
                    attempt = attempt.retry_with(token);
                }
            }
        }
    }

    // Detached so that dropping the request that triggered the refresh
    // cannot cancel it for the other waiters.
    fn spawn_refresh(&self, refresh_token: String, generation: u64) {
        let task = RefreshTask {
            client: Arc::clone(&self.refresh_client),
            store: Arc::clone(&self.store),
            shared: Arc::clone(&self.shared),
            writes: Arc::clone(&self.store_writes),
            timeout: self.refresh_timeout,
            count: Arc::clone(&self.refresh_count),
        };
        tokio::spawn(task.run(refresh_token, generation));
    }
}

struct RefreshTask<C, S: ?Sized> {
    client: Arc<C>,
    store: Arc<S>,
    shared: Arc<Mutex<SessionShared>>,
    writes: Arc<AsyncMutex<()>>,
    timeout: Option<Duration>,
    count: Arc<AtomicU64>,
}

impl<C, S> RefreshTask<C, S>
where
    C: RefreshClient + 'static,
    S: CredentialStore + ?Sized + 'static,
{
    async fn run(self, refresh_token: String, generation: u64) {
        let started = Instant::now();
        let attempt = self.count.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(attempt, "refreshing session credentials");

        let outcome = match self.timeout {
            Some(limit) => {
                match tokio::time::timeout(limit, self.client.refresh(&refresh_token)).await {
                    Ok(result) => result,
                    Err(_) => Err(RefreshError::Timeout(limit)),
                }
            }
            None => self.client.refresh(&refresh_token).await,
        };

        match outcome {
            Ok(credentials) => self.succeed(credentials, generation, started).await,
            Err(error) => self.fail(&error, generation, started).await,
        }
    }

    async fn succeed(&self, credentials: CredentialPair, generation: u64, started: Instant) {
        let (waiters, committed) = {
            let mut shared = self.shared.lock();
            if shared.generation != generation {
                debug!("refresh superseded, discarding new credentials");
                return;
            }
            shared.credentials = Some(credentials.clone());
            shared.generation += 1;
            (shared.transition(Phase::Valid), shared.generation)
        };

        // The new pair is already live in memory; a store failure only
        // costs the next process restart a login.
        let saved = write_store(
            &*self.store,
            &self.shared,
            &self.writes,
            committed,
            StoreWrite::Save(&credentials),
        )
        .await;
        match saved {
            Ok(true) => {}
            Ok(false) => debug!("session changed before refreshed credentials were stored"),
            Err(error) => warn!(error = %error, "failed to persist refreshed credentials"),
        }

        info!(
            waiters = waiters.len(),
            duration_ms = started.elapsed().as_millis() as u64,
            "session refreshed"
        );
        for waiter in waiters {
            let _ = waiter.send(Ok(credentials.access_token.clone()));
        }
    }

    async fn fail(&self, error: &RefreshError, generation: u64, started: Instant) {
        let reason = error.to_string();
        let (waiters, committed) = {
            let mut shared = self.shared.lock();
            if shared.generation != generation {
                debug!(error = %error, "refresh superseded, ignoring failure");
                return;
            }
            shared.credentials = None;
            shared.generation += 1;
            (shared.transition(Phase::Failed { reason: reason.clone() }), shared.generation)
        };

        let cleared =
            write_store(&*self.store, &self.shared, &self.writes, committed, StoreWrite::Clear)
                .await;
        if let Err(store_error) = cleared {
            warn!(error = %store_error, "failed to clear credential store");
        }

        warn!(
            error = %error,
            waiters = waiters.len(),
            duration_ms = started.elapsed().as_millis() as u64,
            "session refresh failed"
        );
        for waiter in waiters {
            let _ = waiter.send(Err(SessionError::Authentication(reason.clone())));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockCredentialStore, MockRefreshClient};

    fn pair(n: u32) -> CredentialPair {
        CredentialPair::new(format!("access-{n}"), format!("refresh-{n}"))
    }

    fn coordinator(
        client: MockRefreshClient,
    ) -> (SessionTokenCoordinator<MockRefreshClient, MockCredentialStore>, Arc<MockCredentialStore>)
    {
        let store = Arc::new(MockCredentialStore::new());
        (SessionTokenCoordinator::new(client, Arc::clone(&store)), store)
    }

    /// Validates the unauthenticated scenario: no credentials means no
    /// request can begin and no refresh can start.
    #[tokio::test]
    async fn test_unauthenticated_rejects_everything() {
        let client = MockRefreshClient::new();
        let (session, _store) = coordinator(client.clone());

        assert_eq!(session.state(), SessionState::Unauthenticated);
        assert!(matches!(session.begin(), Err(SessionError::Authentication(_))));

        let result = session.on_auth_rejected(&RequestAttempt::first("whatever")).await;
        assert!(matches!(result, Err(SessionError::Authentication(_))));
        assert_eq!(client.call_count(), 0);
    }

    /// Validates that `initialize` restores a stored pair.
    #[tokio::test]
    async fn test_initialize_restores_from_store() {
        let (session, store) = coordinator(MockRefreshClient::new());
        assert!(!session.initialize().await.unwrap());

        store.preload(pair(1));
        assert!(session.initialize().await.unwrap());
        assert_eq!(session.state(), SessionState::Valid);
        assert_eq!(session.begin().unwrap().access_token(), "access-1");
    }

    /// Validates the single rejection scenario: one refresh, new pair in
    /// memory and store.
    #[tokio::test]
    async fn test_rejection_refreshes_once() {
        let client = MockRefreshClient::new();
        let (session, store) = coordinator(client.clone());
        session.establish(pair(0)).await.unwrap();

        let attempt = session.begin().unwrap();
        let token = session.on_auth_rejected(&attempt).await.unwrap();

        assert_eq!(token, "access-1");
        assert_eq!(client.call_count(), 1);
        assert_eq!(client.received_tokens(), vec!["refresh-0".to_string()]);
        assert_eq!(session.state(), SessionState::Valid);
        assert_eq!(store.current(), Some(pair(1)));
        assert_eq!(session.refresh_count(), 1);
    }

    /// Validates that a retried attempt is never refreshed again.
    #[tokio::test]
    async fn test_retried_attempt_fails_without_refresh() {
        let client = MockRefreshClient::new();
        let (session, _store) = coordinator(client.clone());
        session.establish(pair(0)).await.unwrap();

        let retry = session.begin().unwrap().retry_with("access-0");
        let result = session.on_auth_rejected(&retry).await;

        assert!(matches!(result, Err(SessionError::Authentication(_))));
        assert_eq!(client.call_count(), 0);
        assert_eq!(session.state(), SessionState::Valid);
    }

    /// Validates the stale token scenario: a rejection of an already
    /// replaced token resolves with the current one.
    #[tokio::test]
    async fn test_stale_token_uses_current() {
        let client = MockRefreshClient::new();
        let (session, _store) = coordinator(client.clone());
        session.establish(pair(0)).await.unwrap();
        session.establish(pair(7)).await.unwrap();

        let token = session.on_auth_rejected(&RequestAttempt::first("access-0")).await.unwrap();
        assert_eq!(token, "access-7");
        assert_eq!(client.call_count(), 0);
    }

    /// Validates that a pair without a refresh credential fails terminally.
    #[tokio::test]
    async fn test_missing_refresh_token_fails() {
        let client = MockRefreshClient::new();
        let (session, store) = coordinator(client.clone());
        session.establish(CredentialPair::new("access-0", "")).await.unwrap();

        let attempt = session.begin().unwrap();
        let result = session.on_auth_rejected(&attempt).await;

        assert!(matches!(result, Err(SessionError::Authentication(_))));
        assert_eq!(client.call_count(), 0);
        assert!(matches!(session.state(), SessionState::Failed(_)));
        assert_eq!(store.current(), None);
    }

    /// Validates the refresh failure scenario: credentials are cleared and
    /// the session lands in `Failed` until re-established.
    #[tokio::test]
    async fn test_failed_refresh_clears_credentials() {
        let client = MockRefreshClient::new();
        client.push_response(Err(RefreshError::Rejected("expired".into())));
        let (session, store) = coordinator(client.clone());
        session.establish(pair(0)).await.unwrap();

        let attempt = session.begin().unwrap();
        let result = session.on_auth_rejected(&attempt).await;

        assert!(matches!(result, Err(SessionError::Authentication(_))));
        assert!(matches!(session.state(), SessionState::Failed(_)));
        assert_eq!(session.credentials(), None);
        assert_eq!(store.current(), None);
        assert!(session.begin().is_err());

        session.establish(pair(3)).await.unwrap();
        assert_eq!(session.state(), SessionState::Valid);
    }

    /// Validates the `authorized` retry loop against a server that accepts
    /// only the refreshed token.
    #[tokio::test]
    async fn test_authorized_retries_once_with_new_token() {
        let (session, _store) = coordinator(MockRefreshClient::new());
        session.establish(pair(0)).await.unwrap();

        let mut seen = Vec::new();
        let result: Result<&str, SessionError> = session
            .authorized(|token| {
                seen.push(token.clone());
                async move {
                    if token == "access-1" {
                        Ok(Authorized::Completed("ok"))
                    } else {
                        Ok(Authorized::Rejected)
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap(), "ok");
        assert_eq!(seen, vec!["access-0".to_string(), "access-1".to_string()]);
    }

    /// Validates that a server rejecting every token ends in an
    /// authentication error after exactly two sends.
    #[tokio::test]
    async fn test_authorized_gives_up_after_one_retry() {
        let client = MockRefreshClient::new();
        let (session, _store) = coordinator(client.clone());
        session.establish(pair(0)).await.unwrap();

        let mut sends = 0;
        let result: Result<(), SessionError> = session
            .authorized(|_token| {
                sends += 1;
                async { Ok(Authorized::Rejected) }
            })
            .await;

        assert!(matches!(result, Err(SessionError::Authentication(_))));
        assert_eq!(sends, 2);
        assert_eq!(client.call_count(), 1);
    }

    /// Validates logout while a refresh is parked: waiters fail and the late
    /// refresh result is discarded.
    #[tokio::test]
    async fn test_clear_releases_waiters_and_discards_refresh() {
        let client = MockRefreshClient::gated();
        let (session, store) = coordinator(client.clone());
        session.establish(pair(0)).await.unwrap();

        let attempt = session.begin().unwrap();
        let waiter = {
            let session = session.clone();
            tokio::spawn(async move { session.on_auth_rejected(&attempt).await })
        };
        assert!(
            crate::testing::poll_until(Duration::from_secs(1), Duration::from_millis(5), || {
                let session = session.clone();
                async move { session.state() == SessionState::Refreshing }
            })
            .await
        );

        session.clear().await.unwrap();
        assert!(matches!(waiter.await.unwrap(), Err(SessionError::Authentication(_))));

        client.release();
        assert!(
            crate::testing::poll_until(Duration::from_secs(1), Duration::from_millis(5), || {
                let client = client.clone();
                async move { client.completed_count() == 1 }
            })
            .await
        );
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(session.state(), SessionState::Unauthenticated);
        assert_eq!(store.current(), None);
    }
}
