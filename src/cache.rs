// ABOUTME: Time-boxed caches at the service boundary (current user, service status)
// Read-mostly, last write wins; staleness never touches the draft document

use chrono::{DateTime, Utc};
use std::convert::Infallible;
use std::fmt::Display;
use std::future::Future;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use crate::api::HttpPersistenceClient;
use crate::config::CacheConfig;
use crate::error::{BuilderError, BuilderResult};
use crate::wizard::UserContext;

/// Single cached value with a fixed lifetime
#[derive(Debug, Clone)]
pub struct TtlCache<T> {
    ttl: Duration,
    entry: Option<(T, Instant)>,
}

impl<T: Clone> TtlCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, entry: None }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Cached value if it has not expired
    pub fn get(&self) -> Option<T> {
        match &self.entry {
            Some((value, stored_at)) if stored_at.elapsed() < self.ttl => Some(value.clone()),
            _ => None,
        }
    }

    pub fn set(&mut self, value: T) {
        self.entry = Some((value, Instant::now()));
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    /// Return the cached value, fetching a new one when missing or expired.
    ///
    /// When the fetch fails after expiry, the expired value is served instead.
    pub async fn get_or_refresh<F, Fut, E>(&mut self, fetch: F) -> Result<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        if let Some(value) = self.get() {
            return Ok(value);
        }
        match self.refresh(fetch).await {
            Ok(value) => Ok(value),
            Err(err) => match &self.entry {
                Some((stale, _)) => {
                    warn!("Refresh failed, serving expired entry: {}", err);
                    Ok(stale.clone())
                }
                None => Err(err),
            },
        }
    }

    /// Fetch unconditionally; a failed fetch leaves the previous entry in place
    pub async fn refresh<F, Fut, E>(&mut self, fetch: F) -> Result<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let value = fetch().await?;
        self.set(value.clone());
        Ok(value)
    }
}

/// Current-user lookups, cached for a few minutes
#[derive(Debug, Clone)]
pub struct CurrentUserCache {
    cache: TtlCache<UserContext>,
}

impl CurrentUserCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            cache: TtlCache::new(ttl),
        }
    }

    pub async fn resolve(&mut self, client: &HttpPersistenceClient) -> BuilderResult<UserContext> {
        self.cache
            .get_or_refresh(|| async {
                debug!("Looking up current user");
                let user = client.current_user().await?;
                Ok::<_, BuilderError>(user.map_or(UserContext::Anonymous, UserContext::User))
            })
            .await
    }

    pub fn invalidate(&mut self) {
        self.cache.invalidate();
    }
}

/// Last observed availability of the persistence service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceStatus {
    pub reachable: bool,
    pub status_code: Option<u16>,
    pub checked_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ServiceStatusProbe {
    cache: TtlCache<ServiceStatus>,
}

impl ServiceStatusProbe {
    pub fn new(ttl: Duration) -> Self {
        Self {
            cache: TtlCache::new(ttl),
        }
    }

    pub async fn status(&mut self, client: &HttpPersistenceClient) -> ServiceStatus {
        let result = self
            .cache
            .get_or_refresh(|| async {
                let health = client.health().await;
                Ok::<_, Infallible>(ServiceStatus {
                    reachable: health.reachable,
                    status_code: health.status,
                    checked_at: Utc::now(),
                })
            })
            .await;
        match result {
            Ok(status) => status,
            Err(never) => match never {},
        }
    }

    pub fn invalidate(&mut self) {
        self.cache.invalidate();
    }
}

/// Process-scoped boundary state, built once from configuration
#[derive(Debug, Clone)]
pub struct BoundaryCaches {
    pub user: CurrentUserCache,
    pub status: ServiceStatusProbe,
}

impl BoundaryCaches {
    pub fn from_config(config: &CacheConfig) -> Self {
        Self {
            user: CurrentUserCache::new(config.user_ttl()),
            status: ServiceStatusProbe::new(config.status_ttl()),
        }
    }
}
