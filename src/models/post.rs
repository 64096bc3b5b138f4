use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A post document as persisted in MongoDB.
///
/// `image`, when set, holds a relative file-store path (`uploads/<name>`).
/// Rewriting to an absolute URL happens only at response time, in
/// [`PostResponse::from_post`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: String,
    pub title: Option<String>,
    pub content: Option<String>,
    pub image: Option<String>,
}

impl PostResponse {
    pub fn from_post(post: Post, base_url: &str) -> Self {
        PostResponse {
            id: post.id.map(|id| id.to_hex()).unwrap_or_default(),
            title: post.title,
            content: post.content,
            image: post.image.map(|image| absolutize(base_url, &image)),
        }
    }
}

/// Prefix a stored relative image path with the request's base URL.
/// Empty values and values that already carry a scheme pass through
/// unchanged, so repeated rewriting never double-prefixes.
pub fn absolutize(base_url: &str, image: &str) -> String {
    if image.is_empty() || image.starts_with("http://") || image.starts_with("https://") {
        image.to_string()
    } else {
        format!("{}/{}", base_url, image)
    }
}
