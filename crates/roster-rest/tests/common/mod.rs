//! Shared fixtures for router tests: the real user service over in-memory backends.

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use roster_config::ServerConfig;
use roster_core::{RosterError, RosterResult, UserId, UserPatch, UserRecord};
use roster_repository::UserStore;
use roster_rest::{create_router, AppState};
use roster_service::{CacheInterface, UserServiceImpl};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

/// In-memory record store enforcing unique emails.
#[derive(Default)]
pub struct InMemoryStore {
    users: Mutex<BTreeMap<UserId, UserRecord>>,
    next_id: Mutex<i64>,
    pub failing: AtomicBool,
}

impl InMemoryStore {
    fn check(&self) -> RosterResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            Err(RosterError::Database("connection refused".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl UserStore for InMemoryStore {
    async fn insert(&self, username: &str, email: &str) -> RosterResult<UserId> {
        self.check()?;
        let mut users = self.users.lock().unwrap();
        if users.values().any(|u| u.email == email) {
            return Err(RosterError::conflict("duplicate key value violates unique constraint"));
        }
        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;
        let id = UserId::new(*next_id);
        users.insert(id, UserRecord::new(id, username, email));
        Ok(id)
    }

    async fn fetch_by_id(&self, id: UserId) -> RosterResult<Option<UserRecord>> {
        self.check()?;
        Ok(self.users.lock().unwrap().get(&id).cloned())
    }

    async fn fetch_all(&self) -> RosterResult<Vec<UserRecord>> {
        self.check()?;
        Ok(self.users.lock().unwrap().values().cloned().collect())
    }

    async fn update_by_id(&self, id: UserId, patch: &UserPatch) -> RosterResult<Option<UserRecord>> {
        self.check()?;
        let mut users = self.users.lock().unwrap();
        Ok(users.get_mut(&id).map(|record| {
            *record = record.patched(patch);
            record.clone()
        }))
    }

    async fn delete_by_id(&self, id: UserId) -> RosterResult<Option<UserId>> {
        self.check()?;
        Ok(self.users.lock().unwrap().remove(&id).map(|record| record.id))
    }

    async fn ping(&self) -> RosterResult<bool> {
        self.check()?;
        Ok(true)
    }
}

/// In-memory cache that can be switched off to simulate an outage.
#[derive(Default)]
pub struct InMemoryCache {
    entries: Mutex<HashMap<String, String>>,
    pub failing: AtomicBool,
}

impl InMemoryCache {
    fn check(&self) -> RosterResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            Err(RosterError::cache("Connection refused (os error 111)"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl CacheInterface for InMemoryCache {
    async fn get_raw(&self, key: &str) -> RosterResult<Option<String>> {
        self.check()?;
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn set_raw(&self, key: &str, value: &str) -> RosterResult<()> {
        self.check()?;
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> RosterResult<bool> {
        self.check()?;
        Ok(self.entries.lock().unwrap().remove(key).is_some())
    }

    async fn ping(&self) -> RosterResult<bool> {
        self.check()?;
        Ok(true)
    }

    fn is_enabled(&self) -> bool {
        true
    }
}

/// Router under test plus handles on its backends.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<InMemoryStore>,
    pub cache: Arc<InMemoryCache>,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryStore::default());
        let cache = Arc::new(InMemoryCache::default());
        let service = Arc::new(UserServiceImpl::new(store.clone(), cache.clone()));
        let router = create_router(AppState::new(service), &ServerConfig::default());

        Self {
            router,
            store,
            cache,
        }
    }

    /// Sends a request and returns the status and the parsed JSON body.
    pub async fn send(&self, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };

        (status, value)
    }

    pub async fn create(&self, username: &str, email: &str) -> i64 {
        let body = serde_json::json!({ "username": username, "email": email }).to_string();
        let (status, json) = self.send(Method::POST, "/users", Some(&body)).await;
        assert_eq!(status, StatusCode::CREATED, "create failed: {json}");
        json["id"].as_i64().unwrap()
    }
}
