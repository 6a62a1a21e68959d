use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use super::Storefront;
use crate::models::ImageUpload;
use crate::traits::IBlobStorage;

/// Top-level folder in the image bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImagePrefix {
    Products,
    CustomOrders,
}

impl ImagePrefix {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Products => "products",
            Self::CustomOrders => "custom-orders",
        }
    }
}

/// `<prefix>/<millis>-<random>.<ext>`. The extension is whatever follows the
/// last `.` of the original name, or the whole name when there is none.
pub fn image_path(prefix: ImagePrefix, file_name: &str, millis: i64, random: &str) -> String {
    let ext = file_name
        .rsplit_once('.')
        .map_or(file_name, |(_, ext)| ext);
    format!("{}/{millis}-{random}.{ext}", prefix.as_str())
}

impl Storefront {
    /// Store one image and return its public URL. Failures are logged and
    /// reported as `None`; callers carry on without the image.
    pub(crate) fn upload_image(&self, prefix: ImagePrefix, image: &ImageUpload) -> Option<String> {
        let random = Uuid::new_v4().simple().to_string();
        let path = image_path(
            prefix,
            &image.file_name,
            Utc::now().timestamp_millis(),
            &random[..12],
        );
        match self.blobs.put(&path, &image.bytes) {
            Ok(url) => {
                info!(path = %path, bytes = image.bytes.len(), "image uploaded");
                Some(url)
            }
            Err(e) => {
                warn!(file = %image.file_name, error = %e, "image upload failed, skipping");
                None
            }
        }
    }

    /// Upload sequentially, skipping failures.
    pub(crate) fn upload_images(&self, prefix: ImagePrefix, images: &[ImageUpload]) -> Vec<String> {
        images
            .iter()
            .filter_map(|image| self.upload_image(prefix, image))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_follows_last_dot() {
        assert_eq!(
            image_path(ImagePrefix::Products, "my.candle.JPG", 1700000000000, "abc"),
            "products/1700000000000-abc.JPG"
        );
    }

    #[test]
    fn dotless_name_is_its_own_extension() {
        assert_eq!(
            image_path(ImagePrefix::CustomOrders, "sketch", 5, "r"),
            "custom-orders/5-r.sketch"
        );
    }
}
