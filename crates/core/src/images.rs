//! Playground image payload limits.
//!
//! Images arrive as data URLs inside the JSON body, so the guard is on the
//! combined encoded size, not on image dimensions.

use crate::error::CoreError;

/// Combined size budget for all images on one playground (16 MiB).
pub const MAX_IMAGE_PAYLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Reject image sets whose combined encoded size exceeds the budget.
pub fn validate_image_payload(images: &[String]) -> Result<(), CoreError> {
    let total: usize = images.iter().map(|image| image.len()).sum();
    if total > MAX_IMAGE_PAYLOAD_BYTES {
        return Err(CoreError::Validation(
            "The total size of the images is too large. Please use smaller images or fewer images"
                .to_string(),
        ));
    }
    Ok(())
}
