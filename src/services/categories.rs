use crate::{Gateway, Result};
use serde_json::Value;
use std::collections::HashMap;

/// Category routes. Categories form a tree; the move/delete routes take
/// their targets through the query string rather than a body.
pub struct Categories<'a> {
    pub(crate) gateway: &'a Gateway,
}

impl Categories<'_> {
    pub async fn list(&self, params: Option<&HashMap<String, String>>) -> Result<Value> {
        self.gateway.get_opt("/categories/", params).await
    }

    /// Full tree, optionally truncated below `max_level`.
    pub async fn tree(&self, max_level: Option<u32>) -> Result<Value> {
        match max_level {
            Some(level) => {
                let mut params = HashMap::new();
                params.insert("max_level".to_string(), level.to_string());
                self.gateway.get_query("/categories/tree", &params).await
            }
            None => self.gateway.get("/categories/tree").await,
        }
    }

    pub async fn roots(&self) -> Result<Value> {
        self.gateway.get("/categories/roots").await
    }

    pub async fn children(&self, category_id: i64) -> Result<Value> {
        self.gateway
            .get(&format!("/categories/{category_id}/children"))
            .await
    }

    pub async fn ancestors(&self, category_id: i64) -> Result<Value> {
        self.gateway
            .get(&format!("/categories/{category_id}/ancestors"))
            .await
    }

    pub async fn by_id(&self, category_id: i64) -> Result<Value> {
        self.gateway.get(&format!("/categories/{category_id}")).await
    }

    pub async fn stats(&self) -> Result<Value> {
        self.gateway.get("/categories/stats").await
    }

    pub async fn create(&self, payload: &Value) -> Result<Value> {
        self.gateway.post("/categories/", payload).await
    }

    pub async fn update(&self, category_id: i64, payload: &Value) -> Result<Value> {
        self.gateway
            .put(&format!("/categories/{category_id}"), payload)
            .await
    }

    /// Re-parent a category. `None` moves it to the root level.
    pub async fn move_to(&self, category_id: i64, new_parent_id: Option<i64>) -> Result<Value> {
        let mut params = HashMap::new();
        if let Some(parent) = new_parent_id {
            params.insert("new_parent_id".to_string(), parent.to_string());
        }
        self.gateway
            .put_query(&format!("/categories/{category_id}/move"), &params)
            .await
    }

    /// Delete a category, optionally re-homing its content first.
    pub async fn delete(&self, category_id: i64, move_content_to: Option<i64>) -> Result<Value> {
        let path = format!("/categories/{category_id}");
        match move_content_to {
            Some(target) => {
                let mut params = HashMap::new();
                params.insert("move_content_to".to_string(), target.to_string());
                self.gateway.delete_query(&path, &params).await
            }
            None => self.gateway.delete(&path).await,
        }
    }
}
