//! Project Status Calls
//!
//! The board's only backend call: set one project's status.

use async_trait::async_trait;
use serde::Serialize;

use super::{ApiClient, ApiError, MutationReply};
use crate::board::StatusUpdater;
use crate::models::{Project, ProjectStatus, Record};

#[derive(Serialize)]
struct StatusArgs {
    status: ProjectStatus,
}

impl ApiClient {
    /// `PATCH /projects/{id}/status` carrying only the new status
    pub async fn update_project_status(&self, id: &str, status: ProjectStatus) -> Result<MutationReply<Project>, ApiError> {
        let url = self.url(&[Project::RESOURCE, id, "status"]);
        self.send_mutation(self.request(reqwest::Method::PATCH, &url).json(&StatusArgs { status })).await
    }
}

#[async_trait(?Send)]
impl StatusUpdater for ApiClient {
    async fn update_status(&self, project_id: &str, status: ProjectStatus) -> Result<(), ApiError> {
        self.update_project_status(project_id, status).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_body_carries_only_status() {
        let body = serde_json::to_value(StatusArgs { status: ProjectStatus::Complete }).unwrap();
        assert_eq!(body, serde_json::json!({ "status": "Complete" }));
    }
}
