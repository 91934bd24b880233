use reqwest::Method;

use super::client::ApiClient;
use crate::error::ApiError;
use crate::models::Image;

impl ApiClient {
    /// Newest image published under `family` in `folder_id`.
    pub async fn get_latest_by_family(&self, folder_id: &str, family: &str) -> Result<Image, ApiError> {
        let url = self.compute_url("/compute/v1/images:latestByFamily");
        let params = [("folderId", folder_id), ("family", family)];
        let image: Image = self.send(Method::GET, &url, Some(&params), None).await?;
        if image.id.is_empty() {
            return Err(ApiError::Decode(format!(
                "no image id returned for family '{}'",
                family
            )));
        }
        tracing::info!(image_id = %image.id, family, "resolved source image");
        Ok(image)
    }
}
