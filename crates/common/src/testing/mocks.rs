//! Mock implementations of the session ports
//!
//! Both mocks are cheap to clone and share their state, so a test can keep
//! one handle while the coordinator owns another.

// Allow missing error/panic docs for test mocks - they are designed to be simple
// and errors are clearly indicated by their return types
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::Semaphore;

use crate::auth::{CredentialPair, CredentialStore, RefreshClient, RefreshError};

/// In-memory credential store
///
/// # Examples
///
/// ```
/// use convene_common::auth::CredentialPair;
/// use convene_common::testing::MockCredentialStore;
///
/// let store = MockCredentialStore::new();
/// store.preload(CredentialPair::new("a", "r"));
/// assert_eq!(store.current().map(|p| p.access_token), Some("a".to_string()));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockCredentialStore {
    data: Arc<Mutex<Option<CredentialPair>>>,
    saves: Arc<AtomicUsize>,
    clears: Arc<AtomicUsize>,
    fail_saves: Arc<Mutex<Option<String>>>,
    write_gate: Arc<Mutex<Option<Arc<Semaphore>>>>,
}

impl MockCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a pair in the store without counting a save.
    pub fn preload(&self, credentials: CredentialPair) {
        *self.data.lock() = Some(credentials);
    }

    /// What is stored right now.
    #[must_use]
    pub fn current(&self) -> Option<CredentialPair> {
        self.data.lock().clone()
    }

    /// Make every following `save` fail with `message`.
    pub fn fail_saves_with(&self, message: impl Into<String>) {
        *self.fail_saves.lock() = Some(message.into());
    }

    /// Hold every following `save` and `clear` until released.
    pub fn gate_writes(&self) {
        *self.write_gate.lock() = Some(Arc::new(Semaphore::new(0)));
    }

    /// Let one held write proceed.
    pub fn release_write(&self) {
        if let Some(gate) = self.write_gate.lock().as_ref() {
            gate.add_permits(1);
        }
    }

    async fn pass_gate(&self) -> Result<(), String> {
        let gate = self.write_gate.lock().clone();
        if let Some(gate) = gate {
            let permit = gate.acquire().await.map_err(|_| "gate closed".to_string())?;
            permit.forget();
        }
        Ok(())
    }

    /// Saves started, including ones still held at the gate.
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Clears started, including ones still held at the gate.
    #[must_use]
    pub fn clear_count(&self) -> usize {
        self.clears.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CredentialStore for MockCredentialStore {
    async fn save(&self, credentials: &CredentialPair) -> Result<(), String> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        self.pass_gate().await?;
        let failure = self.fail_saves.lock().clone();
        if let Some(message) = failure {
            return Err(message);
        }
        *self.data.lock() = Some(credentials.clone());
        Ok(())
    }

    async fn load(&self) -> Result<Option<CredentialPair>, String> {
        Ok(self.data.lock().clone())
    }

    async fn clear(&self) -> Result<(), String> {
        self.clears.fetch_add(1, Ordering::SeqCst);
        self.pass_gate().await?;
        *self.data.lock() = None;
        Ok(())
    }
}

/// Scriptable refresh endpoint
///
/// Without scripted responses the n-th call returns
/// `access-n`/`refresh-n`. A gated client holds every call until
/// [`release`](Self::release) is called, which keeps a refresh in flight for
/// as long as a test needs.
#[derive(Debug, Clone)]
pub struct MockRefreshClient {
    calls: Arc<AtomicUsize>,
    completed: Arc<AtomicUsize>,
    received: Arc<Mutex<Vec<String>>>,
    responses: Arc<Mutex<VecDeque<Result<CredentialPair, RefreshError>>>>,
    gate: Option<Arc<Semaphore>>,
}

impl MockRefreshClient {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(AtomicUsize::new(0)),
            completed: Arc::new(AtomicUsize::new(0)),
            received: Arc::new(Mutex::new(Vec::new())),
            responses: Arc::new(Mutex::new(VecDeque::new())),
            gate: None,
        }
    }

    /// A client whose calls block until released.
    pub fn gated() -> Self {
        Self { gate: Some(Arc::new(Semaphore::new(0))), ..Self::new() }
    }

    /// Queue the outcome of the next unscripted call.
    pub fn push_response(&self, response: Result<CredentialPair, RefreshError>) {
        self.responses.lock().push_back(response);
    }

    /// Let one held call proceed.
    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.add_permits(1);
        }
    }

    /// Calls started, including ones still held at the gate.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Calls that returned.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }

    /// Refresh tokens presented, in call order.
    #[must_use]
    pub fn received_tokens(&self) -> Vec<String> {
        self.received.lock().clone()
    }
}

impl Default for MockRefreshClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RefreshClient for MockRefreshClient {
    async fn refresh(&self, refresh_token: &str) -> Result<CredentialPair, RefreshError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        self.received.lock().push(refresh_token.to_string());

        if let Some(gate) = &self.gate {
            let permit = gate
                .acquire()
                .await
                .map_err(|_| RefreshError::Transport("gate closed".to_string()))?;
            permit.forget();
        }

        let scripted = self.responses.lock().pop_front();
        self.completed.fetch_add(1, Ordering::SeqCst);
        scripted.unwrap_or_else(|| {
            Ok(CredentialPair::new(format!("access-{call}"), format!("refresh-{call}")))
        })
    }
}
