use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::uploads::dtos::get_extension_from_content_type;
use crate::modules::storage::MinioClient;

/// One validated image ready for storage
pub struct ImageUpload {
    pub original_filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// Service for product image uploads
pub struct UploadService {
    minio_client: Arc<MinioClient>,
}

impl UploadService {
    pub fn new(minio_client: Arc<MinioClient>) -> Self {
        Self { minio_client }
    }

    /// Store each image under the public prefix and return the public
    /// URLs in upload order.
    pub async fn upload_images(&self, images: Vec<ImageUpload>) -> Result<Vec<String>> {
        let mut urls = Vec::with_capacity(images.len());

        for image in images {
            let file_id = Uuid::new_v4();
            let extension = match get_extension_from_content_type(&image.content_type) {
                Some(ext) => ext.to_string(),
                None => image
                    .original_filename
                    .rsplit('.')
                    .next()
                    .unwrap_or("bin")
                    .to_lowercase(),
            };

            let key = self
                .minio_client
                .generate_key(&format!("products/{}.{}", file_id, extension));

            self.minio_client
                .upload(&key, image.data, &image.content_type)
                .await?;

            debug!("Image uploaded: key={}", key);

            urls.push(self.minio_client.get_public_url(&key));
        }

        Ok(urls)
    }
}
