//! Project CRUD.

use dv_core::entities::{Project, ProjectCreate, ProjectUpdate};
use reqwest::Method;

use crate::error::ClientError;
use crate::ApiClient;

impl ApiClient {
    /// Projects owned by the current user.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails or the list is malformed.
    pub async fn list_projects(&self) -> Result<Vec<Project>, ClientError> {
        let resp = self.send(self.request(Method::GET, "/projects")).await?;
        self.checked(resp, "project_list").await
    }

    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails or is rejected.
    pub async fn create_project(&self, project: &ProjectCreate) -> Result<Project, ClientError> {
        let resp = self
            .send(self.request(Method::POST, "/projects").json(project))
            .await?;
        self.checked(resp, "project").await
    }

    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] for an unknown id.
    pub async fn update_project(
        &self,
        id: i64,
        update: &ProjectUpdate,
    ) -> Result<Project, ClientError> {
        let resp = self
            .send(self.request(Method::PUT, &format!("/projects/{id}")).json(update))
            .await?;
        self.checked(resp, "project").await
    }

    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] for an unknown id.
    pub async fn delete_project(&self, id: i64) -> Result<(), ClientError> {
        self.send(self.request(Method::DELETE, &format!("/projects/{id}")))
            .await?;
        Ok(())
    }

    /// Look up one project from the user's list.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] if no project has this id.
    pub async fn project(&self, id: i64) -> Result<Project, ClientError> {
        self.list_projects()
            .await?
            .into_iter()
            .find(|p| p.id == id)
            .ok_or_else(|| ClientError::NotFound(format!("project {id}")))
    }
}
