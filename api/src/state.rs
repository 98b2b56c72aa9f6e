use jsonwebtoken::{DecodingKey, EncodingKey};
use sea_orm::DatabaseConnection;
use services::media::MediaHost;
use std::sync::Arc;
use util::config::AppConfig;

/// Everything a handler needs, built once in `main` and cloned per request.
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
    media: Arc<dyn MediaHost>,
    jwt_encoding_key: EncodingKey,
    jwt_decoding_key: DecodingKey,
    jwt_duration_minutes: i64,
    max_upload_bytes: usize,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        media: Arc<dyn MediaHost>,
        jwt_secret: &str,
        jwt_duration_minutes: i64,
        max_upload_bytes: usize,
    ) -> Self {
        Self {
            db,
            media,
            jwt_encoding_key: EncodingKey::from_secret(jwt_secret.as_bytes()),
            jwt_decoding_key: DecodingKey::from_secret(jwt_secret.as_bytes()),
            jwt_duration_minutes,
            max_upload_bytes,
        }
    }

    pub fn from_config(
        cfg: &AppConfig,
        db: DatabaseConnection,
        media: Arc<dyn MediaHost>,
    ) -> Self {
        Self::new(
            db,
            media,
            &cfg.jwt_secret,
            cfg.jwt_duration_minutes,
            cfg.max_upload_bytes,
        )
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub fn media(&self) -> Arc<dyn MediaHost> {
        self.media.clone()
    }

    pub fn encoding_key(&self) -> &EncodingKey {
        &self.jwt_encoding_key
    }

    pub fn decoding_key(&self) -> &DecodingKey {
        &self.jwt_decoding_key
    }

    pub fn jwt_duration_minutes(&self) -> i64 {
        self.jwt_duration_minutes
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
    }
}
