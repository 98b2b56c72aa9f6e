use serde::{Deserialize, Serialize};

/// Bearer-token payload: the account id and the expiry as a Unix timestamp.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    pub sub: i64,
    pub exp: usize,
}

/// The authenticated caller, as inserted into request extensions by
/// [`allow_authenticated`](crate::auth::guards::allow_authenticated).
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn id(&self) -> i64 {
        self.0.sub
    }
}
