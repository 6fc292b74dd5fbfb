//! Cache-aside user service implementation.

use crate::cache::{cache_keys, CacheExt, CacheInterface, CachedUser};
use crate::dto::{
    CreateUserRequest, MessageResponse, UpdateUserRequest, UserDetailResponse, UserResponse,
};
use crate::user_service::UserService;
use async_trait::async_trait;
use roster_core::{
    HealthReport, ProbeStatus, RosterError, RosterResult, UserId, UserPatch, UserRecord,
    ValidateExt,
};
use roster_repository::UserStore;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// User service backed by a record store with a lookaside cache in front.
///
/// Store failures abort an operation. Cache failures never do: reads fall
/// back to the store and writes are skipped with a warning.
pub struct UserServiceImpl {
    store: Arc<dyn UserStore>,
    cache: Arc<dyn CacheInterface>,
}

impl UserServiceImpl {
    /// Creates a new user service.
    pub fn new(store: Arc<dyn UserStore>, cache: Arc<dyn CacheInterface>) -> Self {
        Self { store, cache }
    }

    async fn cached_record(&self, id: UserId) -> Option<UserRecord> {
        match self.cache.get::<CachedUser>(&cache_keys::user_by_id(id)).await {
            Ok(entry) => entry.map(|entry| entry.into_record(id)),
            Err(e) => {
                warn!("Cache read for user {} failed, using store: {}", id, e);
                None
            }
        }
    }

    async fn cache_record(&self, record: &UserRecord) {
        let key = cache_keys::user_by_id(record.id);
        if let Err(e) = self.cache.set(&key, &CachedUser::from(record)).await {
            warn!("Failed to cache user {}: {}", record.id, e);
        }
    }

    async fn evict(&self, id: UserId) {
        if let Err(e) = self.cache.delete(&cache_keys::user_by_id(id)).await {
            warn!("Failed to evict user {} from cache: {}", id, e);
        }
    }
}

#[async_trait]
impl UserService for UserServiceImpl {
    async fn create_user(&self, request: CreateUserRequest) -> RosterResult<UserResponse> {
        debug!("Creating user: {}", request.username);

        request.validate_request()?;

        let id = self.store.insert(&request.username, &request.email).await?;
        let record = UserRecord::new(id, request.username, request.email);

        self.cache_record(&record).await;

        info!("User created: {}", id);
        Ok(UserResponse::from(record))
    }

    async fn get_user(&self, id: UserId) -> RosterResult<UserDetailResponse> {
        debug!("Getting user: {}", id);

        if let Some(record) = self.cached_record(id).await {
            debug!("Cache hit for user: {}", id);
            return Ok(UserDetailResponse::from_record(record, true));
        }

        let record = self
            .store
            .fetch_by_id(id)
            .await?
            .ok_or_else(|| RosterError::not_found("User", id))?;

        self.cache_record(&record).await;

        Ok(UserDetailResponse::from_record(record, false))
    }

    async fn list_users(&self) -> RosterResult<Vec<UserResponse>> {
        debug!("Listing users");

        let users = self.store.fetch_all().await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    async fn update_user(&self, id: UserId, request: UpdateUserRequest) -> RosterResult<UserResponse> {
        debug!("Updating user: {}", id);

        if request.is_empty() {
            return Err(RosterError::validation("No fields to update"));
        }
        request.validate_request()?;

        let patch = UserPatch::from(request);
        let record = self
            .store
            .update_by_id(id, &patch)
            .await?
            .ok_or_else(|| RosterError::not_found("User", id))?;

        self.evict(id).await;
        self.cache_record(&record).await;

        info!("User updated: {}", id);
        Ok(UserResponse::from(record))
    }

    async fn delete_user(&self, id: UserId) -> RosterResult<MessageResponse> {
        debug!("Deleting user: {}", id);

        self.store
            .delete_by_id(id)
            .await?
            .ok_or_else(|| RosterError::not_found("User", id))?;

        self.evict(id).await;

        info!("User deleted: {}", id);
        Ok(MessageResponse::new(format!("User {} deleted", id)))
    }

    async fn health_check(&self) -> HealthReport {
        let (db, redis) = tokio::join!(self.store.ping(), self.cache.ping());

        let report = HealthReport {
            db: ProbeStatus::from_ping(db),
            redis: ProbeStatus::from_ping(redis),
        };
        if !report.is_healthy() {
            warn!("Health check degraded: db={}, redis={}", report.db, report.redis);
        }
        report
    }
}

impl std::fmt::Debug for UserServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserServiceImpl")
            .field("cache_enabled", &self.cache.is_enabled())
            .finish_non_exhaustive()
    }
}
