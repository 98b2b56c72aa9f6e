//! In-process stand-in for the media host, shared by unit and integration tests.

use crate::media::{HostedMedia, MediaAsset, MediaError, MediaHost, MediaKind};
use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Records every call and answers with predictable URLs
/// (`https://media.test/<kind>/<n>`).
///
/// `fail_upload_at(n)` makes the n-th upload (1-based) fail.
#[derive(Default)]
pub struct RecordingMediaHost {
    uploads: Mutex<Vec<MediaAsset>>,
    destroyed: Mutex<Vec<HostedMedia>>,
    counter: AtomicUsize,
    fail_on: Option<usize>,
}

impl RecordingMediaHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_upload_at(n: usize) -> Self {
        Self {
            fail_on: Some(n),
            ..Self::default()
        }
    }

    pub fn uploads(&self) -> Vec<MediaAsset> {
        self.uploads.lock().unwrap().clone()
    }

    pub fn destroyed(&self) -> Vec<HostedMedia> {
        self.destroyed.lock().unwrap().clone()
    }

    pub fn url_for(kind: MediaKind, n: usize) -> String {
        format!("https://media.test/{}/{}", kind.resource_type(), n)
    }
}

#[async_trait]
impl MediaHost for RecordingMediaHost {
    async fn upload(&self, asset: MediaAsset) -> Result<HostedMedia, MediaError> {
        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        let kind = asset.kind();
        self.uploads.lock().unwrap().push(asset);

        if self.fail_on == Some(n) {
            return Err(MediaError::Rejected {
                status: 502,
                body: "stub upload failure".into(),
            });
        }

        Ok(HostedMedia {
            url: Self::url_for(kind, n),
            public_id: format!("asset-{n}"),
            kind,
        })
    }

    async fn destroy(&self, media: &HostedMedia) -> Result<(), MediaError> {
        self.destroyed.lock().unwrap().push(media.clone());
        Ok(())
    }
}
