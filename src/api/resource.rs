//! Resource Calls
//!
//! CRUD for any `Record`: list, create, update, soft delete.

use serde::Serialize;

use super::{ApiClient, ApiError, ListEnvelope, MutationReply};
use crate::models::Record;

/// Body of the soft-delete call
#[derive(Serialize)]
struct SoftDeleteArgs {
    #[serde(rename = "isDeleted")]
    is_deleted: bool,
}

impl ApiClient {
    pub async fn list<R: Record>(&self) -> Result<Vec<R>, ApiError> {
        let url = self.url(&[R::RESOURCE]);
        let envelope: ListEnvelope<R> = self.send_json(self.request(reqwest::Method::GET, &url)).await?;
        let records = envelope.into_vec();
        log::info!("[API] Loaded {} {}", records.len(), R::RESOURCE);
        Ok(records)
    }

    pub async fn create<R: Record>(&self, record: &R) -> Result<MutationReply<R>, ApiError> {
        let url = self.url(&[R::RESOURCE]);
        self.send_mutation(self.request(reqwest::Method::POST, &url).json(record)).await
    }

    pub async fn update<R: Record>(&self, record: &R) -> Result<MutationReply<R>, ApiError> {
        let url = self.url(&[R::RESOURCE, record.id()]);
        self.send_mutation(self.request(reqwest::Method::PUT, &url).json(record)).await
    }

    /// Records are never removed outright; the backend flags them deleted
    pub async fn soft_delete<R: Record>(&self, id: &str) -> Result<MutationReply<R>, ApiError> {
        let url = self.url(&[R::RESOURCE, id, "delete"]);
        let body = SoftDeleteArgs { is_deleted: true };
        self.send_mutation(self.request(reqwest::Method::PATCH, &url).json(&body)).await
    }

    /// Create when `id` is empty, update otherwise
    pub async fn save<R: Record>(&self, record: &R) -> Result<MutationReply<R>, ApiError> {
        if record.id().is_empty() {
            self.create(record).await
        } else {
            self.update(record).await
        }
    }
}
