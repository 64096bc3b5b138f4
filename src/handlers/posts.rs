use axum::{
    extract::{Host, Multipart, Path, State},
    http::HeaderMap,
    response::Json,
};
use futures_util::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::options::ReturnDocument;
use mongodb::Collection;

use crate::errors::{AppError, Result};
use crate::models::post::{Post, PostResponse};
use crate::services::file_store::FileStore;
use crate::state::AppState;

const COLLECTION: &str = "posts";

fn posts_collection(state: &AppState) -> Collection<Post> {
    state.db.collection(COLLECTION)
}

/// Scheme and host of the inbound request, used to absolutize stored image
/// paths at response time. Scheme comes from `x-forwarded-proto` when a
/// proxy supplies it.
fn request_base_url(headers: &HeaderMap, host: &str) -> String {
    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("http");
    format!("{}://{}", scheme, host)
}

/// Text fields and the stored image path extracted from a multipart write
/// request. `image` is `Some` only when a file actually arrived; its bytes
/// are already on disk by the time this returns.
#[derive(Debug, Default)]
struct PostForm {
    title: Option<String>,
    content: Option<String>,
    image: Option<String>,
}

async fn read_form(mut multipart: Multipart, files: &FileStore) -> Result<PostForm> {
    let mut form = PostForm::default();

    while let Some(field) = multipart.next_field().await? {
        match field.name().unwrap_or("") {
            "title" => form.title = Some(field.text().await?),
            "content" => form.content = Some(field.text().await?),
            "image" => {
                let original_name = field.file_name().unwrap_or("upload").to_string();
                let data = field.bytes().await?;
                form.image = Some(files.save(&original_name, &data).await?);
            }
            _ => {}
        }
    }

    Ok(form)
}

/// `$set` document for a partial update: only supplied fields appear, and
/// `image` only when a new file was uploaded.
fn build_update(form: &PostForm) -> Document {
    let mut set = Document::new();
    if let Some(title) = &form.title {
        set.insert("title", title.as_str());
    }
    if let Some(content) = &form.content {
        set.insert("content", content.as_str());
    }
    if let Some(image) = &form.image {
        set.insert("image", image.as_str());
    }
    set
}

fn shape_posts(posts: Vec<Post>, base_url: &str) -> Vec<PostResponse> {
    posts
        .into_iter()
        .map(|post| PostResponse::from_post(post, base_url))
        .collect()
}

pub async fn list_posts(
    State(state): State<AppState>,
    Host(host): Host,
    headers: HeaderMap,
) -> Result<Json<Vec<PostResponse>>> {
    let cursor = posts_collection(&state)
        .find(doc! {})
        .sort(doc! { "_id": -1 })
        .await?;
    let posts: Vec<Post> = cursor.try_collect().await?;

    let base_url = request_base_url(&headers, &host);
    Ok(Json(shape_posts(posts, &base_url)))
}

pub async fn create_post(
    State(state): State<AppState>,
    Host(host): Host,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<Json<PostResponse>> {
    let form = read_form(multipart, &state.files).await?;

    let post = Post {
        id: Some(ObjectId::new()),
        title: form.title,
        content: form.content,
        // The stored value is always the relative path (or empty); the URL
        // form exists only in responses.
        image: Some(form.image.unwrap_or_default()),
    };

    posts_collection(&state).insert_one(&post).await?;

    let base_url = request_base_url(&headers, &host);
    Ok(Json(PostResponse::from_post(post, &base_url)))
}

pub async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Host(host): Host,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<Json<PostResponse>> {
    let object_id = ObjectId::parse_str(&id).map_err(|_| AppError::InvalidId(id))?;
    let filter = doc! { "_id": object_id };

    let form = read_form(multipart, &state.files).await?;
    let set = build_update(&form);

    let collection = posts_collection(&state);
    let updated = if set.is_empty() {
        // Nothing to change; an empty $set is a server-side error.
        collection.find_one(filter).await?
    } else {
        collection
            .find_one_and_update(filter, doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await?
    }
    .ok_or(AppError::PostNotFound)?;

    let base_url = request_base_url(&headers, &host);
    Ok(Json(PostResponse::from_post(updated, &base_url)))
}
