//! Task endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::{decode, TickTickClient};
use crate::types::{CreateTaskRequest, Task, UpdateTaskRequest};
use crate::Error;

/// Task operations, borrowed from a [`TickTickClient`].
#[derive(Debug, Clone, Copy)]
pub struct TasksService<'a> {
    client: &'a TickTickClient,
}

/// Object form of `GET /project/{id}/data`. Only `tasks` is required here.
#[derive(Deserialize)]
struct TaskListData {
    tasks: Vec<Task>,
}

/// Update body: the request plus the owning project.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateTaskBody<'r> {
    project_id: &'r str,
    #[serde(flatten)]
    request: &'r UpdateTaskRequest,
}

impl<'a> TasksService<'a> {
    pub(crate) fn new(client: &'a TickTickClient) -> Self {
        Self { client }
    }

    /// List the undone tasks of a project.
    pub async fn list(&self, project_id: &str) -> Result<Vec<Task>, Error> {
        let payload: Value = self
            .client
            .get(&format!("/project/{}/data", project_id))
            .await?;

        match payload {
            Value::Array(_) => serde_json::from_value(payload).map_err(Error::Parse),
            Value::Object(_) => serde_json::from_value::<TaskListData>(payload)
                .map(|data| data.tasks)
                .map_err(Error::Parse),
            other => Err(Error::Parse(serde::de::Error::custom(format!(
                "expected a task array or project data object, got {}",
                other
            )))),
        }
    }

    /// Get a task by project and task ID.
    pub async fn get(&self, project_id: &str, task_id: &str) -> Result<Task, Error> {
        self.client
            .get(&format!("/project/{}/task/{}", project_id, task_id))
            .await
    }

    /// Create a task in `request.project_id`.
    pub async fn create(&self, request: &CreateTaskRequest) -> Result<Task, Error> {
        self.client.post("/task", request).await
    }

    /// Update the task identified by `request.id`.
    pub async fn update(
        &self,
        project_id: &str,
        request: &UpdateTaskRequest,
    ) -> Result<Task, Error> {
        let body = UpdateTaskBody {
            project_id,
            request,
        };
        self.client
            .post(
                &format!("/project/{}/task/{}", project_id, request.id),
                &body,
            )
            .await
    }

    /// Mark a task as completed.
    ///
    /// Returns the updated task when the service echoes one back; the service
    /// usually answers with an empty body, giving `None`.
    pub async fn complete(&self, project_id: &str, task_id: &str) -> Result<Option<Task>, Error> {
        let body = self
            .client
            .post_without_body(&format!(
                "/project/{}/task/{}/complete",
                project_id, task_id
            ))
            .await?;

        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        decode(&body).map(Some)
    }

    /// Delete a task.
    pub async fn delete(&self, project_id: &str, task_id: &str) -> Result<(), Error> {
        self.client
            .delete(&format!("/project/{}/task/{}", project_id, task_id))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use serde_json::{json, Value};
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

    fn test_client(server: &MockServer) -> TickTickClient {
        TickTickClient::new("test-token")
            .unwrap()
            .with_base_url(&server.uri())
    }

    /// Echoes the posted task back with a server-assigned id.
    struct EchoTask;

    impl Respond for EchoTask {
        fn respond(&self, request: &Request) -> ResponseTemplate {
            let mut task: Value = serde_json::from_slice(&request.body).unwrap();
            task["id"] = json!("generated");
            ResponseTemplate::new(200).set_body_json(task)
        }
    }

    #[tokio::test]
    async fn test_list_reads_tasks_from_project_data() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/project/p1/data"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "project": {"id": "p1", "name": "Inbox"},
                "tasks": [
                    {"id": "t1", "projectId": "p1", "title": "A", "priority": 3},
                    {"id": "t2", "projectId": "p1", "title": "B"}
                ],
                "columns": [{"id": "c1", "projectId": "p1", "name": "Todo"}]
            })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let tasks = client.tasks().list("p1").await.unwrap();

        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].priority, Task::PRIORITY_MEDIUM);
        assert_eq!(tasks[1].title, "B");
    }

    #[tokio::test]
    async fn test_list_accepts_bare_array() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/project/p1/data"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": "t1", "projectId": "p1", "title": "A"}
            ])))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let tasks = client.tasks().list("p1").await.unwrap();

        assert_eq!(tasks.len(), 1);
    }

    #[tokio::test]
    async fn test_list_empty_project() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/project/p1/data"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "project": {"id": "p1", "name": "Inbox"},
                "tasks": [],
                "columns": []
            })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        assert!(client.tasks().list("p1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_rejects_unexpected_shape() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/project/p1/data"))
            .respond_with(ResponseTemplate::new(200).set_body_string("\"nope\""))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let result = client.tasks().list("p1").await;

        assert!(matches!(result, Err(Error::Parse(_))));
    }

    async fn list_with_body(body: Value) -> Result<Vec<Task>, Error> {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/project/p1/data"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;

        test_client(&server).tasks().list("p1").await
    }

    #[tokio::test]
    async fn test_list_rejects_malformed_task_in_array() {
        let result = list_with_body(json!([
            {"id": "t1", "title": "A", "dueDate": "garbage"}
        ]))
        .await;

        match result {
            Err(Error::Parse(e)) => assert!(e.to_string().contains("garbage"), "{}", e),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_list_rejects_malformed_task_in_project_data() {
        let result = list_with_body(json!({
            "project": {"id": "p1", "name": "Inbox"},
            "tasks": [{"id": "t1", "title": "A", "dueDate": "garbage"}]
        }))
        .await;

        assert!(matches!(result, Err(Error::Parse(_))));
    }

    #[tokio::test]
    async fn test_list_rejects_object_without_tasks() {
        let result = list_with_body(json!({"errorCode": "oops"})).await;

        match result {
            Err(Error::Parse(e)) => assert!(e.to_string().contains("tasks"), "{}", e),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_get() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/project/p1/task/t1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "t1", "projectId": "p1", "title": "A", "status": 2
            })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let task = client.tasks().get("p1", "t1").await.unwrap();

        assert_eq!(task.id, "t1");
        assert!(task.is_completed());
    }

    #[tokio::test]
    async fn test_get_missing_task_is_not_found() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/project/p1/task/nope"))
            .respond_with(ResponseTemplate::new(404).set_body_string("task not found"))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let err = client.tasks().get("p1", "nope").await.unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(err.api().unwrap().message, "task not found");
    }

    #[tokio::test]
    async fn test_create_round_trips_due_date() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/task"))
            .respond_with(EchoTask)
            .expect(1)
            .mount(&server)
            .await;

        let due: DateTime<Utc> = Utc.with_ymd_and_hms(2025, 6, 30, 17, 45, 12).unwrap()
            + chrono::Duration::milliseconds(250);
        let request = CreateTaskRequest {
            due_date: Some(due),
            tags: vec!["example".to_string(), "test".to_string()],
            ..CreateTaskRequest::new("p1", "Example task")
        };

        let client = test_client(&server);
        let task = client.tasks().create(&request).await.unwrap();

        assert_eq!(task.id, "generated");
        assert_eq!(task.project_id, "p1");
        assert_eq!(
            task.due_date.map(|d| d.timestamp()),
            Some(due.timestamp())
        );
        assert_eq!(task.tags, vec!["example", "test"]);
    }

    #[tokio::test]
    async fn test_create_puts_project_in_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/task"))
            .and(body_json(json!({"title": "A", "projectId": "p1"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "t1", "projectId": "p1", "title": "A"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let task = client
            .tasks()
            .create(&CreateTaskRequest::new("p1", "A"))
            .await
            .unwrap();

        assert_eq!(task.id, "t1");
    }

    #[tokio::test]
    async fn test_update_sends_id_and_project() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/project/p1/task/t1"))
            .and(body_json(json!({
                "projectId": "p1",
                "id": "t1",
                "title": "Updated",
                "priority": 5
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "t1", "projectId": "p1", "title": "Updated", "priority": 5
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let request = UpdateTaskRequest {
            title: Some("Updated".to_string()),
            priority: Some(Task::PRIORITY_HIGH),
            ..UpdateTaskRequest::new("t1")
        };
        let task = client.tasks().update("p1", &request).await.unwrap();

        assert_eq!(task.title, "Updated");
        assert_eq!(task.priority, Task::PRIORITY_HIGH);
    }

    #[tokio::test]
    async fn test_complete_with_empty_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/project/p1/task/t1/complete"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let task = client.tasks().complete("p1", "t1").await.unwrap();

        assert!(task.is_none());
    }

    #[tokio::test]
    async fn test_complete_with_echoed_task() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/project/p1/task/t1/complete"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "t1", "projectId": "p1", "title": "A", "status": 2
            })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let task = client.tasks().complete("p1", "t1").await.unwrap().unwrap();

        assert!(task.is_completed());
    }

    #[tokio::test]
    async fn test_delete_twice_is_not_found_both_times() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/project/p1/task/gone"))
            .respond_with(ResponseTemplate::new(404))
            .expect(2)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let tasks = client.tasks();

        let first = tasks.delete("p1", "gone").await.unwrap_err();
        let second = tasks.delete("p1", "gone").await.unwrap_err();

        assert!(first.is_not_found());
        assert!(second.is_not_found());
    }

    #[tokio::test]
    async fn test_identifiers_are_not_escaped() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/project/a/b/task/c"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let err = client.tasks().get("a/b", "c").await.unwrap_err();

        assert!(err.is_not_found());
    }
}
