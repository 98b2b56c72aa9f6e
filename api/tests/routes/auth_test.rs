#[cfg(test)]
mod tests {
    use crate::helpers::{MultipartBuilder, make_test_app};
    use axum::http::StatusCode;
    use serde_json::json;
    use services::media::MediaKind;
    use services::test_utils::RecordingMediaHost;

    fn sign_up_form(email: &str, role: &str) -> MultipartBuilder {
        MultipartBuilder::new()
            .text("name", "Ada Lovelace")
            .text("email", email)
            .text("password", "correct-horse")
            .text("role", role)
    }

    #[tokio::test]
    async fn sign_up_returns_profile_and_token() {
        let app = make_test_app().await;

        let req = sign_up_form("ada@example.com", "Teacher").into_request("/api/userSignUp", None);
        let (status, json) = app.send(req).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["message"], "User registered successfully");
        assert_eq!(json["data"]["email"], "ada@example.com");
        assert_eq!(json["data"]["role"], "Teacher");
        assert!(json["data"]["token"].as_str().is_some_and(|t| !t.is_empty()));
        assert!(json["data"]["expiresAt"].is_string());
        assert!(json["data"].get("passwordHash").is_none());
    }

    #[tokio::test]
    async fn sign_up_hosts_cv_image() {
        let app = make_test_app().await;

        let req = sign_up_form("ada@example.com", "Student")
            .file("cvImage", "cv.png", "image/png", b"png")
            .into_request("/api/userSignUp", None);
        let (status, json) = app.send(req).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(
            json["data"]["cvImage"],
            RecordingMediaHost::url_for(MediaKind::Image, 1)
        );
    }

    #[tokio::test]
    async fn duplicate_sign_up_conflicts() {
        let app = make_test_app().await;

        let first = sign_up_form("ada@example.com", "Student").into_request("/api/userSignUp", None);
        assert_eq!(app.send(first).await.0, StatusCode::CREATED);

        let second = sign_up_form("Ada@Example.com", "Student").into_request("/api/userSignUp", None);
        let (status, json) = app.send(second).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json["message"], "User already exists");
    }

    #[tokio::test]
    async fn sign_up_with_invalid_email_is_rejected() {
        let app = make_test_app().await;

        let req = sign_up_form("not-an-email", "Student").into_request("/api/userSignUp", None);
        let (status, json) = app.send(req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Invalid email format");
    }

    #[tokio::test]
    async fn login_then_fetch_profile() {
        let app = make_test_app().await;
        let req = sign_up_form("ada@example.com", "Teacher").into_request("/api/userSignUp", None);
        app.send(req).await;

        let (status, json) = app
            .post_json(
                "/api/userLogin",
                None,
                json!({ "email": "ada@example.com", "password": "correct-horse" }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["message"], "Login successful");
        let token = json["data"]["token"].as_str().unwrap().to_owned();

        let (status, json) = app.get("/api/getUserProfile", Some(&token)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["name"], "Ada Lovelace");
        assert_eq!(json["data"]["email"], "ada@example.com");
        assert!(json["data"].get("passwordHash").is_none());
    }

    #[tokio::test]
    async fn login_with_wrong_password_is_unauthorized() {
        let app = make_test_app().await;
        let req = sign_up_form("ada@example.com", "Teacher").into_request("/api/userSignUp", None);
        app.send(req).await;

        let (status, json) = app
            .post_json(
                "/api/userLogin",
                None,
                json!({ "email": "ada@example.com", "password": "wrong-password" }),
            )
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["message"], "Invalid email or password");
    }

    #[tokio::test]
    async fn malformed_login_body_is_bad_request() {
        let app = make_test_app().await;

        let (status, json) = app
            .post_json("/api/userLogin", None, json!({ "email": "ada@example.com" }))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["success"], false);
    }

    #[tokio::test]
    async fn profile_of_unknown_user_is_not_found() {
        let app = make_test_app().await;
        let token = app.token_for(9999);

        let (status, json) = app.get("/api/getUserProfile", Some(&token)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["message"], "User not found");
    }
}
