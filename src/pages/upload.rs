use std::{
    collections::HashMap,
    path::PathBuf,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use log::{debug, info};

use crate::{api::PostApi, media::MediaFile};

use super::Notifier;

pub const CAPTION_LIMIT: usize = 500;

//==============================================================================
// Preview
//==============================================================================

/// Hands out `blob:` references for selected files. Every reference must be
/// revoked once the file it points at is no longer shown.
#[derive(Debug, Clone, Default)]
pub struct PreviewRegistry {
    inner: Arc<Mutex<Previews>>,
}

#[derive(Debug, Default)]
struct Previews {
    next: u64,
    live: HashMap<String, PathBuf>,
    revoked: u64,
}

impl PreviewRegistry {
    fn lock(&self) -> MutexGuard<'_, Previews> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn create(&self, file: &MediaFile) -> String {
        let mut previews = self.lock();
        previews.next += 1;
        let url = format!("blob:instafeed/{}", previews.next);
        previews.live.insert(url.clone(), file.path.clone());
        debug!(
            "Created preview {} for {} ({} live)",
            url,
            file.name,
            previews.live.len()
        );
        url
    }

    pub fn revoke(&self, url: &str) -> bool {
        let mut previews = self.lock();
        let revoked = previews.live.remove(url).is_some();
        if revoked {
            previews.revoked += 1;
            debug!("Revoked preview {} ({} so far)", url, previews.revoked);
        }
        revoked
    }

    #[cfg(test)]
    pub fn resolve(&self, url: &str) -> Option<PathBuf> {
        self.lock().live.get(url).cloned()
    }
    #[cfg(test)]
    pub fn live(&self) -> usize {
        self.lock().live.len()
    }
    #[cfg(test)]
    pub fn created(&self) -> u64 {
        self.lock().next
    }
    #[cfg(test)]
    pub fn revoked(&self) -> u64 {
        self.lock().revoked
    }
}

//==============================================================================
// Form
//==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragEvent {
    Enter,
    Over,
    Leave,
}

/// Draft of a new post. Nothing here is persisted; dropping the form
/// releases its preview.
#[derive(Debug)]
pub struct UploadForm {
    file: Option<MediaFile>,
    preview: Option<String>,
    caption: String,
    loading: bool,
    drag_active: bool,
    previews: PreviewRegistry,
}

impl UploadForm {
    pub fn new(previews: PreviewRegistry) -> Self {
        Self {
            file: None,
            preview: None,
            caption: String::new(),
            loading: false,
            drag_active: false,
            previews,
        }
    }

    pub fn file(&self) -> Option<&MediaFile> {
        self.file.as_ref()
    }
    pub fn preview(&self) -> Option<&str> {
        self.preview.as_deref()
    }
    pub fn caption(&self) -> &str {
        &self.caption
    }
    pub fn is_loading(&self) -> bool {
        self.loading
    }
    pub fn is_drag_active(&self) -> bool {
        self.drag_active
    }

    /// Single entry point for both the picker and drag-and-drop. Files that
    /// are neither image nor video are refused and leave the form untouched.
    pub fn set_file(&mut self, file: Option<MediaFile>) -> bool {
        if let Some(file) = &file {
            if !file.is_accepted() {
                debug!("Rejected {} ({})", file.name, file.mime);
                return false;
            }
        }

        if let Some(url) = self.preview.take() {
            self.previews.revoke(&url);
        }
        self.preview = file.as_ref().map(|file| self.previews.create(file));
        self.file = file;
        true
    }

    /// Manual file picker. Cancelling the picker clears the selection.
    pub fn pick(&mut self, file: Option<MediaFile>) -> bool {
        self.set_file(file)
    }

    pub fn clear_file(&mut self) {
        self.set_file(None);
    }

    pub fn drag(&mut self, event: DragEvent) {
        self.drag_active = match event {
            DragEvent::Enter | DragEvent::Over => true,
            DragEvent::Leave => false,
        };
    }

    /// Only the first dropped file is considered.
    pub fn drop_files(&mut self, files: Vec<MediaFile>) -> bool {
        self.drag_active = false;
        match files.into_iter().next() {
            Some(file) if file.is_accepted() => self.set_file(Some(file)),
            _ => false,
        }
    }

    /// Input past [`CAPTION_LIMIT`] characters is cut off.
    pub fn set_caption(&mut self, caption: &str) {
        self.caption = caption.chars().take(CAPTION_LIMIT).collect();
    }

    pub fn caption_counter(&self) -> String {
        format!("{}/{}", self.caption.chars().count(), CAPTION_LIMIT)
    }

    pub fn can_submit(&self) -> bool {
        !self.loading && self.file.is_some()
    }

    /// Publish the draft. Returns `true` when the post was created, which is
    /// the caller's cue to reload the feed.
    pub async fn submit<A: PostApi, N: Notifier>(&mut self, api: &A, notifier: &N) -> bool {
        if self.loading {
            return false;
        }
        let Some(file) = self.file.clone() else {
            notifier.alert("Select a file first");
            return false;
        };

        self.loading = true;
        let result = api.upload_post(&file, &self.caption).await;
        self.loading = false;

        match result {
            Ok(post) => {
                info!("Published post {}", post.id);
                self.clear_file();
                self.caption.clear();
                true
            }
            Err(e) => {
                notifier.alert(&format!("Error uploading post: {}", e));
                false
            }
        }
    }
}

impl Drop for UploadForm {
    fn drop(&mut self) {
        if let Some(url) = self.preview.take() {
            self.previews.revoke(&url);
        }
    }
}
