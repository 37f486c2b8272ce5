use mongodb::{Client, Database, options::ClientOptions};
use std::net::SocketAddr;
use swimbuddz_api::{build_router, state::AppState};
use swimbuddz_config::Settings;
use swimbuddz_db::indexes::ensure_indexes;
use tokio::net::TcpListener;

use super::member_backend::{MEMBER_PATH, MockMemberBackend};

/// A running test application with its own MongoDB database and a mock
/// members API.
pub struct TestApp {
    pub addr: SocketAddr,
    pub base_url: String,
    pub db: Database,
    pub settings: Settings,
    pub client: reqwest::Client,
    pub backend: MockMemberBackend,
}

impl TestApp {
    /// Spawn a new test server connected to the test MongoDB.
    ///
    /// Requires a running MongoDB at localhost:27017.
    /// Set SWIMBUDDZ__DATABASE__URL env var to override the connection string.
    /// Each test gets a unique database name for isolation.
    pub async fn spawn() -> Self {
        Self::spawn_with_settings(|_| {}).await
    }

    /// Spawn a test server with customized settings.
    ///
    /// The `mutator` closure runs after the test defaults are applied.
    pub async fn spawn_with_settings(mutator: impl FnOnce(&mut Settings)) -> Self {
        let db_name = format!("swimbuddz_test_{}", uuid::Uuid::new_v4().simple());
        let backend = MockMemberBackend::spawn().await;

        let mut settings = Settings::load().unwrap_or_else(|_| test_settings());
        if let Ok(url) = std::env::var("SWIMBUDDZ__DATABASE__URL") {
            settings.database.url = url;
        }
        settings.database.name = db_name.clone();
        settings.backend.base_url = backend.base_url.clone();
        settings.backend.member_path = MEMBER_PATH.to_string();
        settings.jwt.secret = TEST_JWT_SECRET.to_string();
        settings.jwt.issuer = None;

        mutator(&mut settings);

        let client_options = ClientOptions::parse(&settings.database.url)
            .await
            .expect("Failed to parse MongoDB URL");
        let mongo_client =
            Client::with_options(client_options).expect("Failed to create MongoDB client");
        let db = mongo_client.database(&db_name);

        ensure_indexes(&db).await.expect("Failed to create indexes");

        let app_state =
            AppState::new(db.clone(), settings.clone()).expect("Failed to create AppState");
        let app = build_router(app_state);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let base_url = format!("http://{}", addr);
        let client = reqwest::Client::new();

        Self {
            addr,
            base_url,
            db,
            settings,
            client,
            backend,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let db = self.db.clone();
        // Best effort cleanup: drop the test database
        tokio::spawn(async move {
            let _ = db.drop().await;
        });
    }
}

pub const TEST_JWT_SECRET: &str = "test-secret-key-for-jwt-signing-minimum-32-chars";

fn test_settings() -> Settings {
    Settings {
        app: swimbuddz_config::AppSettings {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origins: vec![],
        },
        database: swimbuddz_config::DatabaseSettings {
            url: "mongodb://localhost:27017".to_string(),
            name: "swimbuddz_test".to_string(),
            max_pool_size: Some(5),
            min_pool_size: Some(1),
        },
        backend: swimbuddz_config::BackendSettings {
            base_url: "http://127.0.0.1:8000".to_string(),
            member_path: MEMBER_PATH.to_string(),
            timeout_secs: 5,
        },
        jwt: swimbuddz_config::JwtSettings {
            secret: TEST_JWT_SECRET.to_string(),
            issuer: None,
        },
    }
}
