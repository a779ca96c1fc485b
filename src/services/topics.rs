use crate::{Gateway, Result};
use serde_json::Value;
use std::collections::HashMap;

/// Topic routes: public listing/search plus the admin management surface.
pub struct Topics<'a> {
    pub(crate) gateway: &'a Gateway,
}

impl Topics<'_> {
    pub async fn list(&self, params: Option<&HashMap<String, String>>) -> Result<Value> {
        self.gateway.get_opt("/topics", params).await
    }

    pub async fn count(&self, params: Option<&HashMap<String, String>>) -> Result<Value> {
        self.gateway.get_opt("/topics/count", params).await
    }

    pub async fn search(
        &self,
        query: &str,
        params: Option<&HashMap<String, String>>,
    ) -> Result<Value> {
        let mut params = params.cloned().unwrap_or_default();
        params.insert("q".to_string(), query.to_string());
        self.gateway.get_query("/topics/search", &params).await
    }

    pub async fn detail(&self, topic_id: i64) -> Result<Value> {
        self.gateway.get(&format!("/topics/{topic_id}")).await
    }

    /// Galleries attached to one topic.
    pub async fn galleries(
        &self,
        topic_id: i64,
        params: Option<&HashMap<String, String>>,
    ) -> Result<Value> {
        self.gateway
            .get_opt(&format!("/topics/{topic_id}/galleries"), params)
            .await
    }

    pub async fn by_slug(&self, slug: &str) -> Result<Value> {
        self.gateway.get(&format!("/topics/slug/{slug}")).await
    }

    pub async fn create(&self, payload: &Value) -> Result<Value> {
        self.gateway.post("/topics", payload).await
    }

    pub async fn update(&self, topic_id: i64, payload: &Value) -> Result<Value> {
        self.gateway
            .put(&format!("/topics/{topic_id}"), payload)
            .await
    }

    pub async fn delete(&self, topic_id: i64) -> Result<Value> {
        self.gateway.delete(&format!("/topics/{topic_id}")).await
    }

    /// Unfiltered listing, including unpublished topics.
    pub async fn admin_list(&self, params: Option<&HashMap<String, String>>) -> Result<Value> {
        self.gateway.get_opt("/topics/admin/all", params).await
    }
}
