use crate::{Gateway, Result};
use serde_json::Value;

/// Department routes (admin management surface).
pub struct Departments<'a> {
    pub(crate) gateway: &'a Gateway,
}

impl Departments<'_> {
    pub async fn list(&self) -> Result<Value> {
        self.gateway.get("/departments/").await
    }

    pub async fn stats(&self) -> Result<Value> {
        self.gateway.get("/departments/stats").await
    }

    pub async fn create(&self, payload: &Value) -> Result<Value> {
        self.gateway.post("/departments/", payload).await
    }

    pub async fn update(&self, department_id: i64, payload: &Value) -> Result<Value> {
        self.gateway
            .put(&format!("/departments/{department_id}"), payload)
            .await
    }

    pub async fn delete(&self, department_id: i64) -> Result<Value> {
        self.gateway
            .delete(&format!("/departments/{department_id}"))
            .await
    }

    /// Whether the department can be deleted, and what blocks it if not.
    pub async fn deletion_check(&self, department_id: i64) -> Result<Value> {
        self.gateway
            .get(&format!("/departments/{department_id}/deletion-check"))
            .await
    }
}
