use crate::{Gateway, Result};
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use std::collections::HashMap;
use std::path::PathBuf;

/// Images are paged in fixed windows of 20, matching the backend defaults.
pub const PAGE_SIZE: u32 = 20;

/// Image routes: browsing, search, reactions, and multipart upload.
pub struct Images<'a> {
    pub(crate) gateway: &'a Gateway,
}

impl Images<'_> {
    /// One page of the full image listing. Pages are 1-based.
    pub async fn page(&self, page: u32) -> Result<Value> {
        self.gateway
            .get_query("/images/all", &page_params(page))
            .await
    }

    /// One page of the personalized feed.
    pub async fn feed_page(&self, page: u32) -> Result<Value> {
        self.gateway
            .get_query("/images/feed", &page_params(page))
            .await
    }

    /// Fetch one image. The backend bumps the view counter as a side effect,
    /// so the returned payload already reflects the visit.
    pub async fn detail(&self, image_id: i64) -> Result<Value> {
        self.gateway.get(&format!("/images/{image_id}")).await
    }

    pub async fn search(&self, query: &str) -> Result<Value> {
        let mut params = HashMap::new();
        params.insert("q".to_string(), query.to_string());
        self.gateway.get_query("/images/search/", &params).await
    }

    pub async fn toggle_like(&self, image_id: i64) -> Result<Value> {
        self.gateway
            .post_empty(&format!("/images/{image_id}/like"))
            .await
    }

    pub async fn toggle_bookmark(&self, image_id: i64) -> Result<Value> {
        self.gateway
            .post_empty(&format!("/images/{image_id}/bookmark"))
            .await
    }

    /// Upload one image as a multipart form. Attach a precomputed
    /// [`file_sha256`](crate::hash::file_sha256) digest so the backend can
    /// short-circuit duplicates before storing the bytes.
    pub async fn upload(&self, upload: ImageUpload) -> Result<Value> {
        let form = upload.into_form().await?;
        self.gateway.post_multipart("/images/", form).await
    }
}

fn page_params(page: u32) -> HashMap<String, String> {
    let skip = page.saturating_sub(1) * PAGE_SIZE;
    let mut params = HashMap::new();
    params.insert("skip".to_string(), skip.to_string());
    params.insert("limit".to_string(), PAGE_SIZE.to_string());
    params
}

/// One image upload: the file plus its metadata fields.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub path: PathBuf,
    pub title: String,
    /// SHA-256 dedup hint, precomputed client-side.
    pub file_hash: Option<String>,
    pub description: Option<String>,
    /// Comma-separated tag list, passed through verbatim.
    pub tags: Option<String>,
    pub category_id: Option<i64>,
    pub topic_id: Option<i64>,
}

impl ImageUpload {
    pub fn new(path: impl Into<PathBuf>, title: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            title: title.into(),
            file_hash: None,
            description: None,
            tags: None,
            category_id: None,
            topic_id: None,
        }
    }

    pub fn with_file_hash(mut self, hash: impl Into<String>) -> Self {
        self.file_hash = Some(hash.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = Some(tags.into());
        self
    }

    pub fn with_category(mut self, category_id: i64) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn with_topic(mut self, topic_id: i64) -> Self {
        self.topic_id = Some(topic_id);
        self
    }

    async fn into_form(self) -> Result<Form> {
        let file_name = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        let bytes = tokio::fs::read(&self.path).await?;

        let mut form = Form::new()
            .part("file", Part::bytes(bytes).file_name(file_name))
            .text("title", self.title);
        if let Some(hash) = self.file_hash {
            form = form.text("file_hash", hash);
        }
        if let Some(description) = self.description {
            form = form.text("description", description);
        }
        if let Some(tags) = self.tags {
            form = form.text("tags", tags);
        }
        if let Some(category_id) = self.category_id {
            form = form.text("category_id", category_id.to_string());
        }
        if let Some(topic_id) = self.topic_id {
            form = form.text("topic_id", topic_id.to_string());
        }
        Ok(form)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_params_are_zero_skip_on_first_page() {
        let params = page_params(1);
        assert_eq!(params["skip"], "0");
        assert_eq!(params["limit"], "20");

        let params = page_params(3);
        assert_eq!(params["skip"], "40");
    }

    #[test]
    fn test_upload_builder_collects_optional_fields() {
        let upload = ImageUpload::new("/tmp/cat.jpg", "Cat")
            .with_file_hash("abc123")
            .with_tags("cats,pets")
            .with_category(7);
        assert_eq!(upload.title, "Cat");
        assert_eq!(upload.file_hash.as_deref(), Some("abc123"));
        assert_eq!(upload.category_id, Some(7));
        assert_eq!(upload.topic_id, None);
    }
}
