use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::deserialize_timestamp;

//===================================================
// Post
//===================================================
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: String,
    #[serde(default)]
    pub caption: String,
    pub url: String,
    pub file_type: FileType,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub created_at: DateTime<Utc>,
    pub email: String,
    #[serde(default)]
    pub is_owner: bool,
}

impl Post {
    /// Local part of the author's email, shown in front of the caption
    pub fn handle(&self) -> &str {
        self.email.split('@').next().unwrap_or_default()
    }
    pub fn initial(&self) -> char {
        self.email
            .chars()
            .next()
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or('?')
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, Hash, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Image,
    Video,
    #[serde(other)]
    Other,
}

impl FileType {
    pub fn is_image(&self) -> bool {
        *self == Self::Image
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct FeedResponse {
    pub posts: Vec<Post>,
}
