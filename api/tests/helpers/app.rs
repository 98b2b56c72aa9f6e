use api::{app, auth::generate_jwt, state::AppState};
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use db::{
    models::user::{Model as UserModel, Role},
    test_utils::setup_test_db,
};
use sea_orm::DatabaseConnection;
use serde_json::Value;
use services::test_utils::RecordingMediaHost;
use std::sync::Arc;
use tower::ServiceExt;

pub const TEST_JWT_SECRET: &str = "integration-test-secret";
pub const TEST_MAX_UPLOAD_BYTES: usize = 64 * 1024;

/// The full router over a fresh in-memory database and a recording media host.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub db: DatabaseConnection,
    pub media: Arc<RecordingMediaHost>,
}

pub async fn make_test_app() -> TestApp {
    make_test_app_with(RecordingMediaHost::new()).await
}

pub async fn make_test_app_with(media: RecordingMediaHost) -> TestApp {
    let db = setup_test_db().await;
    let media = Arc::new(media);
    let state = AppState::new(
        db.clone(),
        media.clone(),
        TEST_JWT_SECRET,
        60,
        TEST_MAX_UPLOAD_BYTES,
    );

    TestApp {
        router: app(state.clone()),
        state,
        db,
        media,
    }
}

impl TestApp {
    /// Inserts a user directly and returns it with a valid bearer token.
    pub async fn user(&self, email: &str, role: Role) -> (UserModel, String) {
        let user = UserModel::create(&self.db, "Test User", email, "not-a-real-hash", role, None)
            .await
            .unwrap();
        let token = self.token_for(user.id);
        (user, token)
    }

    pub fn token_for(&self, user_id: i64) -> String {
        generate_jwt(&self.state, user_id).unwrap().token
    }

    pub async fn send(&self, req: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, json)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        let mut req = Request::builder().method("GET").uri(uri);
        if let Some(token) = token {
            req = req.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        self.send(req.body(Body::empty()).unwrap()).await
    }

    pub async fn post_json(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        let mut req = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            req = req.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        self.send(req.body(Body::from(body.to_string())).unwrap()).await
    }
}
