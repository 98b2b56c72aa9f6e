//! Account routes: sign-up, login and the caller's own profile.
//!
//! - `post.rs`: `POST /userSignUp`, `POST /userLogin` (public)
//! - `get.rs`: `GET /getUserProfile` (bearer token)

pub mod get;
pub mod post;

use crate::auth::guards::allow_authenticated;
use crate::state::AppState;
use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};

use get::get_user_profile;
use post::{user_login, user_sign_up};

pub fn auth_routes(app_state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/userSignUp", post(user_sign_up))
        .route("/userLogin", post(user_login));

    let protected = Router::new()
        .route("/getUserProfile", get(get_user_profile))
        .route_layer(from_fn_with_state(app_state, allow_authenticated));

    public.merge(protected)
}
