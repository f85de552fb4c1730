//! Photo gallery endpoint handlers.

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::info;
use uuid::Uuid;

use domain::models::gallery_photo::{
    CreateGalleryPhotoRequest, GalleryPhotoResponse, ListGalleryPhotosResponse,
    UpdateGalleryPhotoRequest,
};
use domain::models::GalleryPhoto;

use crate::app::AppState;
use crate::error::ApiError;
use crate::forms::GalleryPhotoForm;
use crate::routes::{sync_error, CollectionFilterQuery, DeleteQuery};
use crate::services::media::{MediaFile, MediaUploader};
use crate::services::mutation::{delete_confirmed, EditSession, EntityForm};

/// Register an already-hosted photo.
///
/// POST /api/v1/admin/gallery
pub async fn create_photo(
    State(state): State<AppState>,
    Json(request): Json<CreateGalleryPhotoRequest>,
) -> Result<(StatusCode, Json<GalleryPhotoResponse>), ApiError> {
    let form = GalleryPhotoForm::new(request.url, request.caption, request.is_featured);
    let mut session = EditSession::create(form);
    let doc = session.submit(state.store.as_ref(), None).await?;
    let photo: GalleryPhoto = doc.decode()?;

    info!(photo_id = %photo.id, url = %photo.url, "Gallery photo registered");
    Ok((StatusCode::CREATED, Json(photo.into())))
}

/// Upload a photo file and register it in one step.
///
/// Multipart fields: `file` (required), `caption`, `isFeatured`.
///
/// POST /api/v1/admin/gallery/upload
pub async fn upload_photo(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<GalleryPhotoResponse>), ApiError> {
    let mut file: Option<MediaFile> = None;
    let mut caption: Option<String> = None;
    let mut is_featured = false;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Validation(format!("Malformed multipart body: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or("upload").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::Validation(format!("Failed to read file: {}", e)))?;
                file = Some(MediaFile {
                    bytes: bytes.to_vec(),
                    filename,
                    content_type,
                });
            }
            "caption" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ApiError::Validation(format!("Failed to read caption: {}", e)))?;
                if !text.is_empty() {
                    caption = Some(text);
                }
            }
            "isFeatured" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ApiError::Validation(format!("Failed to read flag: {}", e)))?;
                is_featured = text == "true" || text == "1";
            }
            _ => {}
        }
    }

    let file = file.ok_or_else(|| ApiError::Validation("A photo file is required".to_string()))?;

    let mut session = EditSession::create(GalleryPhotoForm::new(String::new(), caption, is_featured));
    session.set_upload(file);

    let uploader: &dyn MediaUploader = state.media.as_ref();
    let doc = session
        .submit(state.store.as_ref(), Some(uploader))
        .await?;
    let photo: GalleryPhoto = doc.decode()?;

    info!(photo_id = %photo.id, url = %photo.url, "Gallery photo uploaded");
    Ok((StatusCode::CREATED, Json(photo.into())))
}

/// List gallery photos, newest upload first.
///
/// GET /api/v1/admin/gallery?search=&month=
pub async fn list_photos(
    State(state): State<AppState>,
    Query(query): Query<CollectionFilterQuery>,
) -> Result<Json<ListGalleryPhotosResponse>, ApiError> {
    let sync = &state.collections.gallery;
    let snapshot = sync.current();
    let spec = query.into_spec();

    let mut photos: Vec<GalleryPhoto> = spec.apply(snapshot.as_slice()).into_iter().cloned().collect();
    photos.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at));

    let photos: Vec<GalleryPhotoResponse> =
        photos.into_iter().map(GalleryPhotoResponse::from).collect();

    let total = photos.len();
    Ok(Json(ListGalleryPhotosResponse {
        photos,
        total,
        sync_error: sync_error(&sync.status()),
    }))
}

/// Get a single photo.
///
/// GET /api/v1/admin/gallery/:photo_id
pub async fn get_photo(
    State(state): State<AppState>,
    Path(photo_id): Path<Uuid>,
) -> Result<Json<GalleryPhotoResponse>, ApiError> {
    let photo = state
        .collections
        .gallery
        .find(photo_id)
        .ok_or_else(|| ApiError::NotFound("Photo not found".to_string()))?;
    Ok(Json(photo.into()))
}

/// Update a photo's caption or featured flag.
///
/// PATCH /api/v1/admin/gallery/:photo_id
pub async fn update_photo(
    State(state): State<AppState>,
    Path(photo_id): Path<Uuid>,
    Json(request): Json<UpdateGalleryPhotoRequest>,
) -> Result<Json<GalleryPhotoResponse>, ApiError> {
    let store = state.store.as_ref();
    if store
        .get_document(<UpdateGalleryPhotoRequest as EntityForm>::COLLECTION, photo_id)
        .await?
        .is_none()
    {
        return Err(ApiError::NotFound("Photo not found".to_string()));
    }

    let mut session = EditSession::edit(photo_id, request);
    let doc = session.submit(store, None).await?;
    let photo: GalleryPhoto = doc.decode()?;

    info!(photo_id = %photo.id, "Gallery photo updated");
    Ok(Json(photo.into()))
}

/// Delete a photo, behind a confirmation gate.
///
/// DELETE /api/v1/admin/gallery/:photo_id?confirm=true
pub async fn delete_photo(
    State(state): State<AppState>,
    Path(photo_id): Path<Uuid>,
    Query(query): Query<DeleteQuery>,
) -> Result<StatusCode, ApiError> {
    delete_confirmed(
        state.store.as_ref(),
        <UpdateGalleryPhotoRequest as EntityForm>::COLLECTION,
        photo_id,
        query.confirm,
    )
    .await?;

    info!(%photo_id, "Gallery photo deleted");
    Ok(StatusCode::NO_CONTENT)
}
