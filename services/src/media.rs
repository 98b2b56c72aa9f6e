//! Client side of the external media host.
//!
//! Raw upload bytes are sent as self-describing data URIs and the host answers
//! with a durable URL. The host is reached through the [`MediaHost`] trait so
//! the configured client can be swapped for a stub in tests.

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::time::Duration;
use thiserror::Error;
use util::config::AppConfig;

const DEFAULT_IMAGE_TYPE: &str = "image/png";
const DEFAULT_VIDEO_TYPE: &str = "video/mp4";

/// An uploaded multipart file, held in memory.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl UploadedFile {
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// How the host should treat an asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    /// Streaming media; uploaded with `resource_type=video`.
    Video,
}

impl MediaKind {
    pub fn resource_type(self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        }
    }

    fn default_content_type(self) -> &'static str {
        match self {
            MediaKind::Image => DEFAULT_IMAGE_TYPE,
            MediaKind::Video => DEFAULT_VIDEO_TYPE,
        }
    }
}

/// Bytes ready to be sent to the host, tagged with their kind.
#[derive(Debug, Clone)]
pub struct MediaAsset {
    kind: MediaKind,
    content_type: String,
    bytes: Bytes,
}

impl MediaAsset {
    pub fn image(file: &UploadedFile) -> Self {
        Self::new(MediaKind::Image, file)
    }

    pub fn video(file: &UploadedFile) -> Self {
        Self::new(MediaKind::Video, file)
    }

    /// Keeps the part's own content type when it matches `kind`, otherwise
    /// falls back to `image/png` / `video/mp4`.
    fn new(kind: MediaKind, file: &UploadedFile) -> Self {
        let prefix = format!("{}/", kind.resource_type());
        let content_type = file
            .content_type
            .as_deref()
            .map(str::trim)
            .filter(|ct| ct.starts_with(&prefix) && ct.len() > prefix.len())
            .unwrap_or(kind.default_content_type())
            .to_owned();

        Self {
            kind,
            content_type,
            bytes: file.bytes.clone(),
        }
    }

    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// `data:<content-type>;base64,<payload>`
    pub fn data_uri(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.content_type,
            STANDARD.encode(&self.bytes)
        )
    }
}

/// A stored asset as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostedMedia {
    pub url: String,
    pub public_id: String,
    pub kind: MediaKind,
}

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("request to media host failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("media host rejected the request ({status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("media host client could not be built: {0}")]
    Client(String),
}

#[async_trait]
pub trait MediaHost: Send + Sync {
    /// Stores `asset` and returns where it can be retrieved.
    async fn upload(&self, asset: MediaAsset) -> Result<HostedMedia, MediaError>;

    /// Removes a previously stored asset.
    async fn destroy(&self, media: &HostedMedia) -> Result<(), MediaError>;
}

/// Best-effort removal of assets left orphaned by a failed operation.
/// Failures are logged and otherwise ignored.
pub async fn discard(host: &dyn MediaHost, hosted: &[HostedMedia]) {
    for media in hosted {
        if let Err(e) = host.destroy(media).await {
            tracing::warn!(
                public_id = %media.public_id,
                error = %e,
                "Failed to remove orphaned media asset"
            );
        }
    }
}

/// Credentials and limits for [`CloudinaryClient`].
#[derive(Debug, Clone)]
pub struct CloudinarySettings {
    pub base_url: String,
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    pub timeout: Duration,
}

impl From<&AppConfig> for CloudinarySettings {
    fn from(cfg: &AppConfig) -> Self {
        Self {
            base_url: cfg.media_base_url.clone(),
            cloud_name: cfg.media_cloud_name.clone(),
            api_key: cfg.media_api_key.clone(),
            api_secret: cfg.media_api_secret.clone(),
            timeout: Duration::from_secs(cfg.media_timeout_secs),
        }
    }
}

/// Cloudinary-compatible implementation of [`MediaHost`] over `reqwest`.
///
/// Built once at startup; the underlying HTTP client and its connection pool
/// are shared by every request.
pub struct CloudinaryClient {
    http: reqwest::Client,
    settings: CloudinarySettings,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    public_id: String,
    url: String,
    secure_url: Option<String>,
}

impl CloudinaryClient {
    pub fn new(settings: CloudinarySettings) -> Result<Self, MediaError> {
        let http = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| MediaError::Client(e.to_string()))?;

        Ok(Self { http, settings })
    }

    fn endpoint(&self, kind: MediaKind, action: &str) -> String {
        format!(
            "{}/{}/{}/{}",
            self.settings.base_url.trim_end_matches('/'),
            self.settings.cloud_name,
            kind.resource_type(),
            action
        )
    }

    /// Adds `api_key`, `timestamp` and the SHA-256 signature to `params`.
    fn signed_form(&self, mut params: Vec<(&'static str, String)>) -> Vec<(&'static str, String)> {
        params.push(("timestamp", chrono::Utc::now().timestamp().to_string()));
        let signature = sign_params(&params, &self.settings.api_secret);
        params.push(("api_key", self.settings.api_key.clone()));
        params.push(("signature_algorithm", "sha256".to_owned()));
        params.push(("signature", signature));
        params
    }

    async fn post_form(
        &self,
        url: &str,
        form: &[(&'static str, String)],
    ) -> Result<reqwest::Response, MediaError> {
        let response = self.http.post(url).form(form).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MediaError::Rejected {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl MediaHost for CloudinaryClient {
    async fn upload(&self, asset: MediaAsset) -> Result<HostedMedia, MediaError> {
        let url = self.endpoint(asset.kind(), "upload");
        let mut form = self.signed_form(Vec::new());
        form.push(("file", asset.data_uri()));

        tracing::debug!(
            kind = asset.kind().resource_type(),
            content_type = asset.content_type(),
            bytes = asset.len(),
            "Uploading asset to media host"
        );

        let uploaded: UploadResponse = self.post_form(&url, &form).await?.json().await?;

        Ok(HostedMedia {
            url: uploaded.secure_url.unwrap_or(uploaded.url),
            public_id: uploaded.public_id,
            kind: asset.kind(),
        })
    }

    async fn destroy(&self, media: &HostedMedia) -> Result<(), MediaError> {
        let url = self.endpoint(media.kind, "destroy");
        let form = self.signed_form(vec![("public_id", media.public_id.clone())]);
        self.post_form(&url, &form).await?;
        Ok(())
    }
}

/// Signature over the parameters sorted by name, joined as `k=v&k=v`, with
/// the secret appended. `file`, `api_key` and the signature fields are never
/// part of the signed string.
fn sign_params(params: &[(&str, String)], secret: &str) -> String {
    let mut signed: Vec<_> = params
        .iter()
        .filter(|(k, _)| {
            !matches!(
                *k,
                "file" | "api_key" | "signature" | "signature_algorithm" | "resource_type"
            )
        })
        .collect();
    signed.sort_by(|a, b| a.0.cmp(b.0));

    let joined = signed
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha256::new();
    hasher.update(joined.as_bytes());
    hasher.update(secret.as_bytes());
    hex::encode(hasher.finalize())
}
