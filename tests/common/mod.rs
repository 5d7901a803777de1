#![allow(dead_code)]

use axum_test::TestServer;
use base64::{Engine, engine::general_purpose::STANDARD};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use shortify::application::services::{AdminAuthService, ShortenSettings};
use shortify::domain::repositories::LinkRepository;
use shortify::error::AppError;
use shortify::infrastructure::cache::NullCache;
use shortify::infrastructure::persistence::{PoolSettings, RetryPolicy, connect_link_repository};
use shortify::routes::router;
use shortify::state::AppState;
use shortify::utils::code_generator::{AlphaCodeGenerator, CodeGenerator};

pub const ADMIN_USER: &str = "admin";
pub const ADMIN_PASS: &str = "secret";
pub const TEST_HOST: &str = "short.ly";

fn quick_retry() -> RetryPolicy {
    RetryPolicy {
        attempts: 1,
        interval: Duration::from_millis(10),
    }
}

/// Fresh, migrated in-memory SQLite store.
pub async fn sqlite_repository() -> Arc<dyn LinkRepository> {
    connect_link_repository("sqlite::memory:", &PoolSettings::default(), quick_retry())
        .await
        .unwrap()
}

/// PostgreSQL store from `DATABASE_URL`, or `None` when no Postgres URL is configured.
pub async fn postgres_repository() -> Option<Arc<dyn LinkRepository>> {
    let url = std::env::var("DATABASE_URL").ok()?;
    if !url.starts_with("postgres") {
        return None;
    }

    Some(
        connect_link_repository(&url, &PoolSettings::default(), quick_retry())
            .await
            .unwrap(),
    )
}

/// Suffix that keeps test URLs unique across runs against a shared database.
pub fn unique_suffix() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{nanos}")
}

/// Generator that hands out predetermined codes, then fails.
pub struct ScriptedGenerator {
    codes: Mutex<VecDeque<String>>,
}

impl ScriptedGenerator {
    pub fn new(codes: &[&str]) -> Self {
        Self {
            codes: Mutex::new(codes.iter().map(|c| c.to_string()).collect()),
        }
    }
}

impl CodeGenerator for ScriptedGenerator {
    fn generate(&self, _length: usize) -> Result<String, AppError> {
        self.codes.lock().unwrap().pop_front().ok_or_else(|| {
            AppError::generation_failed("Script exhausted", serde_json::json!({}))
        })
    }
}

pub fn create_test_state(repo: Arc<dyn LinkRepository>, host_uri: Option<&str>) -> AppState {
    create_test_state_with(
        repo,
        Arc::new(AlphaCodeGenerator::new()),
        ShortenSettings::default(),
        host_uri,
    )
}

pub fn create_test_state_with(
    repo: Arc<dyn LinkRepository>,
    generator: Arc<dyn CodeGenerator>,
    settings: ShortenSettings,
    host_uri: Option<&str>,
) -> AppState {
    AppState::new(
        repo,
        generator,
        Arc::new(NullCache::new()),
        AdminAuthService::new(ADMIN_USER, ADMIN_PASS),
        settings,
        host_uri.map(str::to_string),
    )
}

pub fn create_test_server(state: AppState) -> TestServer {
    TestServer::new(router(state)).unwrap()
}

/// Value for an `Authorization: Basic ...` header.
pub fn basic_auth(user: &str, pass: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{user}:{pass}")))
}

pub fn admin_auth() -> String {
    basic_auth(ADMIN_USER, ADMIN_PASS)
}
