use std::future::Future;

use log::info;
use reqwest::{
    multipart::{Form, Part},
    Method,
};
use serde_json::Value;

use crate::{
    error::Result,
    media::MediaFile,
    post::{FeedResponse, Post},
    timed,
};

use super::FeedClient;

/// The feed service as seen by the pages. No retry, caching or validation
/// happens at this level; failures go straight back to the caller.
pub trait PostApi {
    fn upload_post(&self, file: &MediaFile, caption: &str) -> impl Future<Output = Result<Post>>;
    fn get_feed(&self) -> impl Future<Output = Result<Vec<Post>>>;
    /// Returns the server's acknowledgement untouched.
    fn delete_post(&self, post_id: &str) -> impl Future<Output = Result<Value>>;
}

impl PostApi for FeedClient {
    async fn upload_post(&self, file: &MediaFile, caption: &str) -> Result<Post> {
        info!("Uploading {} ({} KB)", file.name, file.size_kb());
        let part = Part::bytes(file.read().await?)
            .file_name(file.name.clone())
            .mime_str(file.mime.as_ref())?;
        let form = Form::new()
            .part("file", part)
            .text("caption", caption.to_string());

        let request = self.request(Method::POST, "upload")?.multipart(form);
        timed!("upload", self.fetch(request).await)
    }

    async fn get_feed(&self) -> Result<Vec<Post>> {
        let request = self.request(Method::GET, "feed")?;
        let feed: FeedResponse = timed!("feed", self.fetch(request).await)?;
        Ok(feed.posts)
    }

    async fn delete_post(&self, post_id: &str) -> Result<Value> {
        let path = format!("posts/{}", urlencoding::encode(post_id));
        let request = self.request(Method::DELETE, &path)?;
        timed!("delete", self.fetch(request).await)
    }
}
