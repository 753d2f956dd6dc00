use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use auth::TokenFingerprint;
use chrono::DateTime;
use chrono::Utc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::domain::auth::errors::RevocationError;
use crate::domain::auth::ports::RevocationStore;

const DEFAULT_SWEEP_THRESHOLD: usize = 10_000;

#[derive(Debug)]
struct Entries {
    /// fingerprint -> instant after which the entry is dead
    expiries: HashMap<TokenFingerprint, DateTime<Utc>>,
    /// Size at which the next insert triggers a sweep
    sweep_at: usize,
}

/// Process-local revocation store.
///
/// Expired entries are ignored on lookup and reclaimed either by a sweep
/// triggered when the map grows past a threshold, or by the background sweeper.
/// Deployments with several service instances need a shared store instead.
#[derive(Debug, Clone)]
pub struct InMemoryRevocationStore {
    entries: Arc<RwLock<Entries>>,
    sweep_threshold: usize,
}

impl InMemoryRevocationStore {
    pub fn new(sweep_threshold: usize) -> Self {
        let sweep_threshold = sweep_threshold.max(1);

        Self {
            entries: Arc::new(RwLock::new(Entries {
                expiries: HashMap::new(),
                sweep_at: sweep_threshold,
            })),
            sweep_threshold,
        }
    }

    /// Record a revocation as of `now`.
    ///
    /// Entries already dead at `now` are not stored. Re-revoking keeps the later
    /// expiry.
    pub async fn revoke_at(
        &self,
        fingerprint: TokenFingerprint,
        expires_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) {
        if expires_at <= now {
            return;
        }

        let mut entries = self.entries.write().await;

        entries
            .expiries
            .entry(fingerprint)
            .and_modify(|existing| *existing = (*existing).max(expires_at))
            .or_insert(expires_at);

        if entries.expiries.len() >= entries.sweep_at {
            let swept = Self::sweep(&mut entries.expiries, now);
            // Live entries can keep the map above the threshold; back off so
            // inserts stay amortized O(1).
            entries.sweep_at = (entries.expiries.len() * 2).max(self.sweep_threshold);
            tracing::debug!(
                swept,
                remaining = entries.expiries.len(),
                "Size-triggered revocation sweep"
            );
        }
    }

    /// Check for a revocation that is still alive at `now`.
    pub async fn is_revoked_at(&self, fingerprint: &TokenFingerprint, now: DateTime<Utc>) -> bool {
        self.entries
            .read()
            .await
            .expiries
            .get(fingerprint)
            .is_some_and(|expires_at| *expires_at > now)
    }

    /// Drop every entry dead at `now`.
    ///
    /// # Returns
    /// Number of entries removed
    pub async fn sweep_expired(&self, now: DateTime<Utc>) -> usize {
        let mut entries = self.entries.write().await;
        let swept = Self::sweep(&mut entries.expiries, now);
        entries.sweep_at = (entries.expiries.len() * 2).max(self.sweep_threshold);
        swept
    }

    fn sweep(expiries: &mut HashMap<TokenFingerprint, DateTime<Utc>>, now: DateTime<Utc>) -> usize {
        let before = expiries.len();
        expiries.retain(|_, expires_at| *expires_at > now);
        before - expiries.len()
    }

    /// Number of stored entries, dead ones included until swept.
    pub async fn len(&self) -> usize {
        self.entries.read().await.expiries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Spawn a task sweeping expired entries every `interval` until `shutdown` fires.
    pub fn spawn_sweeper(&self, interval: Duration, shutdown: CancellationToken) -> JoinHandle<()> {
        let store = self.clone();

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = shutdown.cancelled() => break,
                    _ = ticker.tick() => {
                        let swept = store.sweep_expired(Utc::now()).await;
                        if swept > 0 {
                            tracing::debug!(swept, "Swept expired revocations");
                        }
                    }
                }
            }

            tracing::info!("Revocation sweeper stopped");
        })
    }
}

impl Default for InMemoryRevocationStore {
    fn default() -> Self {
        Self::new(DEFAULT_SWEEP_THRESHOLD)
    }
}

#[async_trait]
impl RevocationStore for InMemoryRevocationStore {
    async fn revoke(
        &self,
        fingerprint: TokenFingerprint,
        expires_at: DateTime<Utc>,
    ) -> Result<(), RevocationError> {
        self.revoke_at(fingerprint, expires_at, Utc::now()).await;
        Ok(())
    }

    async fn is_revoked(&self, fingerprint: &TokenFingerprint) -> Result<bool, RevocationError> {
        Ok(self.is_revoked_at(fingerprint, Utc::now()).await)
    }
}
