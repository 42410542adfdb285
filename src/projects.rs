//! Project endpoints.

use crate::client::TickTickClient;
use crate::types::{CreateProjectRequest, Project, ProjectData, UpdateProjectRequest};
use crate::Error;

/// Project operations, borrowed from a [`TickTickClient`].
#[derive(Debug, Clone, Copy)]
pub struct ProjectsService<'a> {
    client: &'a TickTickClient,
}

impl<'a> ProjectsService<'a> {
    pub(crate) fn new(client: &'a TickTickClient) -> Self {
        Self { client }
    }

    /// List all projects of the authenticated user.
    pub async fn list(&self) -> Result<Vec<Project>, Error> {
        self.client.get("/project").await
    }

    /// Get a project by ID.
    pub async fn get(&self, project_id: &str) -> Result<Project, Error> {
        self.client.get(&format!("/project/{}", project_id)).await
    }

    /// Get a project with its undone tasks and kanban columns.
    pub async fn data(&self, project_id: &str) -> Result<ProjectData, Error> {
        self.client
            .get(&format!("/project/{}/data", project_id))
            .await
    }

    /// Create a project.
    pub async fn create(&self, request: &CreateProjectRequest) -> Result<Project, Error> {
        self.client.post("/project", request).await
    }

    /// Update the project identified by `request.id`.
    pub async fn update(&self, request: &UpdateProjectRequest) -> Result<Project, Error> {
        self.client
            .post(&format!("/project/{}", request.id), request)
            .await
    }

    /// Delete a project.
    pub async fn delete(&self, project_id: &str) -> Result<(), Error> {
        self.client
            .delete(&format!("/project/{}", project_id))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ApiErrorKind;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(server: &MockServer) -> TickTickClient {
        TickTickClient::new("test-token")
            .unwrap()
            .with_base_url(&server.uri())
    }

    #[tokio::test]
    async fn test_list_empty_account() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/project"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let projects = client.projects().list().await.unwrap();

        assert!(projects.is_empty());
    }

    #[tokio::test]
    async fn test_list() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/project"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": "p1", "name": "Inbox", "color": "#F18181", "sortOrder": 1},
                {"id": "p2", "name": "Work", "closed": true}
            ])))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let projects = client.projects().list().await.unwrap();

        assert_eq!(projects.len(), 2);
        assert_eq!(projects[0].color.as_deref(), Some("#F18181"));
        assert!(projects[1].closed);
    }

    #[tokio::test]
    async fn test_get() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/project/p1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "p1",
                "name": "Inbox",
                "modifiedTime": "2024-01-02T03:04:05.000+0000"
            })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let project = client.projects().get("p1").await.unwrap();

        assert_eq!(project.id, "p1");
        assert!(project.modified_time.is_some());
    }

    #[tokio::test]
    async fn test_create_sends_name_and_color() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/project"))
            .and(body_json(json!({"name": "Test", "color": "#FF5733"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "new", "name": "Test", "color": "#FF5733"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let request = CreateProjectRequest {
            color: Some("#FF5733".to_string()),
            ..CreateProjectRequest::new("Test")
        };
        let project = client.projects().create(&request).await.unwrap();

        assert_eq!(project.id, "new");
        assert_eq!(project.name, "Test");
    }

    #[tokio::test]
    async fn test_update_posts_to_project_path() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/project/p1"))
            .and(body_json(json!({"id": "p1", "name": "Renamed"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "p1", "name": "Renamed"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let request = UpdateProjectRequest {
            name: Some("Renamed".to_string()),
            ..UpdateProjectRequest::new("p1")
        };
        let project = client.projects().update(&request).await.unwrap();

        assert_eq!(project.name, "Renamed");
    }

    #[tokio::test]
    async fn test_data() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/project/p1/data"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "project": {"id": "p1", "name": "Inbox"},
                "tasks": [{"id": "t1", "projectId": "p1", "title": "A"}],
                "columns": []
            })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let data = client.projects().data("p1").await.unwrap();

        assert_eq!(data.project.unwrap().name, "Inbox");
        assert_eq!(data.tasks[0].id, "t1");
        assert!(data.columns.is_empty());
    }

    #[tokio::test]
    async fn test_create_delete_then_get_is_not_found() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/project"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "abc", "name": "Test", "color": "#FF5733"
            })))
            .mount(&server)
            .await;

        // The first delete succeeds; afterwards the project is gone.
        Mock::given(method("DELETE"))
            .and(path("/project/abc"))
            .respond_with(ResponseTemplate::new(200))
            .up_to_n_times(1)
            .mount(&server)
            .await;

        Mock::given(method("DELETE"))
            .and(path("/project/abc"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/project/abc"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let projects = client.projects();

        let request = CreateProjectRequest {
            color: Some("#FF5733".to_string()),
            ..CreateProjectRequest::new("Test")
        };
        let project = projects.create(&request).await.unwrap();
        projects.delete(&project.id).await.unwrap();

        let err = projects.get(&project.id).await.unwrap_err();
        assert!(err.is_not_found());

        // Deleting again reports the same kind of error both times.
        let first = projects.delete(&project.id).await.unwrap_err();
        let second = projects.delete(&project.id).await.unwrap_err();
        assert_eq!(first.api().map(|e| e.kind()), Some(ApiErrorKind::NotFound));
        assert_eq!(
            first.api().map(|e| e.kind()),
            second.api().map(|e| e.kind())
        );
    }
}
