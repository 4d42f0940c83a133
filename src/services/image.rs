//! Company logo upload flow and local file checks.

use crate::domain::image::{ImageInfo, NewImage, UploadedImage};
use crate::repository::ImageStore;
use crate::services::{ServiceError, ServiceResult};

pub const ALLOWED_IMAGE_TYPES: [&str; 5] = [
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/webp",
];

pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Client-side guard mirroring the backend upload limits, run before any
/// bytes leave the machine.
pub fn validate_image(mime_type: &str, size: usize) -> Result<(), &'static str> {
    if !ALLOWED_IMAGE_TYPES.contains(&mime_type) {
        return Err("Only image files are allowed (JPEG, PNG, GIF, WebP)");
    }
    if size > MAX_IMAGE_BYTES {
        return Err("Image size must be less than 5MB");
    }
    Ok(())
}

/// Validates the file and uploads it, returning the served image record.
pub async fn upload_logo<S>(store: &S, image: &NewImage) -> ServiceResult<UploadedImage>
where
    S: ImageStore + ?Sized,
{
    if let Err(message) = validate_image(&image.mime_type, image.size()) {
        return Err(ServiceError::Validation(message.to_string()));
    }
    store.upload_image(image).await.map_err(|err| {
        log::error!("Image upload failed: {err}");
        ServiceError::from(err)
    })
}

pub async fn image_info<S>(store: &S, filename: &str) -> ServiceResult<ImageInfo>
where
    S: ImageStore + ?Sized,
{
    store.image_info(filename).await.map_err(|err| {
        log::error!("Failed to fetch image info for {filename}: {err}");
        ServiceError::from(err)
    })
}

/// Deletes a stored image. `Ok(false)` means it was already gone.
pub async fn delete_image<S>(store: &S, filename: &str) -> ServiceResult<bool>
where
    S: ImageStore + ?Sized,
{
    use crate::repository::errors::RepositoryError;

    match store.delete_image(filename).await {
        Ok(()) => Ok(true),
        Err(RepositoryError::NotFound) => Ok(false),
        Err(err) => {
            log::error!("Failed to delete image {filename}: {err}");
            Err(err.into())
        }
    }
}

/// Extracts the stored filename from a served image URL.
pub fn filename_from_url(url: &str) -> Option<&str> {
    url.split_once("/api/images/")
        .map(|(_, rest)| rest)
        .filter(|rest| !rest.is_empty())
}
