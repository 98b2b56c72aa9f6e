#[cfg(test)]
mod tests {
    use crate::helpers::app::{TEST_JWT_SECRET, make_test_app};
    use api::auth::Claims;
    use axum::http::StatusCode;
    use db::models::user::Role;
    use jsonwebtoken::{EncodingKey, Header, encode};

    fn token_signed_with(secret: &str, sub: i64, exp: usize) -> String {
        encode(
            &Header::default(),
            &Claims { sub, exp },
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn missing_token_is_rejected_with_envelope() {
        let app = make_test_app().await;

        let (status, json) = app.get("/api/fetchAllCourses", None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Missing or invalid Authorization header");
    }

    #[tokio::test]
    async fn token_with_wrong_secret_is_rejected() {
        let app = make_test_app().await;
        let (user, _) = app.user("t@example.com", Role::Teacher).await;
        let far_future = (chrono::Utc::now().timestamp() + 3600) as usize;
        let forged = token_signed_with("some-other-secret", user.id, far_future);

        let (status, json) = app.get("/api/fetchTeacherKPI", Some(&forged)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["message"], "Invalid or expired token");
    }

    #[tokio::test]
    async fn expired_token_is_rejected() {
        let app = make_test_app().await;
        let (user, _) = app.user("t@example.com", Role::Teacher).await;
        let expired = token_signed_with(TEST_JWT_SECRET, user.id, 1_000_000);

        let (status, _) = app.get("/api/fetchTeacherKPI", Some(&expired)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn valid_token_passes_the_guard() {
        let app = make_test_app().await;
        let (_, token) = app.user("t@example.com", Role::Teacher).await;

        let (status, json) = app.get("/api/fetchTeacherKPI", Some(&token)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["success"], true);
    }
}
