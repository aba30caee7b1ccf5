use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::{debug, info};

use crate::{
    adapters::inbound::http::{
        dto::{ApiResponse, DeleteImageDto, ErrorResponseDto, ImageDto, ImageQueryDto},
        router::AppState,
    },
    domain::{
        errors::ImageError,
        models::{ImageType, UploadFile},
        value_objects::ImageId,
    },
};

type HandlerError = (StatusCode, Json<ErrorResponseDto>);

fn image_error(e: ImageError) -> HandlerError {
    (
        StatusCode::from(&e),
        Json(ErrorResponseDto::from_image_error(&e)),
    )
}

fn bad_request(message: &str) -> HandlerError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponseDto::bad_request(message)),
    )
}

fn parse_image_type(value: &str) -> Result<ImageType, HandlerError> {
    value
        .parse::<ImageType>()
        .map_err(|e| image_error(ImageError::from(e)))
}

/// Handle multipart image upload
///
/// Parts: repeated `files`, optional `imagePath` (storage prefix, defaults to
/// the prefix of the image type) and `imageType`.
pub async fn upload_images(
    State(app_state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<Vec<String>>>, HandlerError> {
    let mut files = Vec::new();
    let mut image_path: Option<String> = None;
    let mut image_type: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| bad_request(&format!("Invalid multipart body: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "files" => {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| bad_request(&format!("Failed to read file part: {}", e)))?;

                files.push(
                    UploadFile::builder()
                        .maybe_file_name(file_name)
                        .maybe_content_type(content_type)
                        .data(data)
                        .build(),
                );
            }
            "imagePath" => {
                image_path = Some(field.text().await.map_err(|e| {
                    bad_request(&format!("Failed to read imagePath: {}", e))
                })?);
            }
            "imageType" => {
                image_type = Some(field.text().await.map_err(|e| {
                    bad_request(&format!("Failed to read imageType: {}", e))
                })?);
            }
            other => debug!(field = other, "Ignoring unknown multipart field"),
        }
    }

    let image_type = parse_image_type(
        image_type
            .as_deref()
            .ok_or_else(|| bad_request("Missing imageType"))?,
    )?;
    let path_prefix = image_path
        .filter(|path| !path.trim().is_empty())
        .unwrap_or_else(|| image_type.path_prefix().to_string());

    let urls = app_state
        .image_service
        .upload_images(&files, &path_prefix, image_type)
        .await
        .map_err(image_error)?;

    Ok(Json(ApiResponse::success(urls)))
}

/// Handle image deletion
pub async fn delete_image(
    State(app_state): State<AppState>,
    Json(request): Json<DeleteImageDto>,
) -> Result<StatusCode, HandlerError> {
    info!(
        directory = ?request.image_directory,
        path = %request.image_path,
        "Delete image requested"
    );

    app_state
        .image_service
        .delete_image(Some(&request.image_path), None)
        .await
        .map_err(image_error)?;

    Ok(StatusCode::NO_CONTENT)
}

/// Handle image lookup by path or id
pub async fn get_image(
    State(app_state): State<AppState>,
    Query(query): Query<ImageQueryDto>,
) -> Result<Json<ApiResponse<ImageDto>>, HandlerError> {
    let service = &app_state.image_service;

    let image = match (query.image_id.as_deref(), query.image_path.as_deref()) {
        (Some(id), _) => {
            let id = ImageId::of(id).map_err(|e| image_error(e.into()))?;
            service.get_image_by_id(&id).await
        }
        (None, Some(path)) => service.get_image_by_path(path).await,
        (None, None) => return Err(bad_request("Either imageId or imagePath is required")),
    }
    .map_err(image_error)?;

    Ok(Json(ApiResponse::success(ImageDto::from(&image))))
}

/// Handle listing images of one type
pub async fn list_images_by_type(
    State(app_state): State<AppState>,
    Path(image_type): Path<String>,
) -> Result<Json<ApiResponse<Vec<ImageDto>>>, HandlerError> {
    let image_type = parse_image_type(&image_type)?;

    let images = app_state
        .image_service
        .get_images_by_type(image_type)
        .await
        .map_err(image_error)?;

    Ok(Json(ApiResponse::success(
        images.iter().map(ImageDto::from).collect(),
    )))
}

/// Handle existence check for a stored path
pub async fn image_exists(
    State(app_state): State<AppState>,
    Query(query): Query<ImageQueryDto>,
) -> Result<Json<ApiResponse<bool>>, HandlerError> {
    let path = query
        .image_path
        .ok_or_else(|| bad_request("imagePath is required"))?;

    let exists = app_state
        .image_service
        .exists_by_path(&path)
        .await
        .map_err(image_error)?;

    Ok(Json(ApiResponse::success(exists)))
}

/// Liveness probe
pub async fn health() -> &'static str {
    "ok"
}
