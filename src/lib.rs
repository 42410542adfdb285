//! TickTick API client library
//!
//! Typed access to the TickTick Open API: the OAuth2 authorization code flow
//! and CRUD operations on projects and tasks. Every operation is a single HTTP
//! round trip; there is no caching, retrying or automatic token refresh.
//!
//! # Example
//!
//! ```rust,no_run
//! use ticktick::{CreateTaskRequest, TickTickClient};
//!
//! # async fn example() -> Result<(), ticktick::Error> {
//! let client = TickTickClient::new("access-token")?;
//!
//! for project in client.projects().list().await? {
//!     println!("{} ({})", project.name, project.id);
//! }
//!
//! let task = client
//!     .tasks()
//!     .create(&CreateTaskRequest::new("project-id", "Write report"))
//!     .await?;
//!
//! match client.tasks().get("project-id", &task.id).await {
//!     Ok(task) => println!("{}", task.title),
//!     Err(e) if e.is_not_found() => println!("gone"),
//!     Err(e) => return Err(e),
//! }
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod datetime;
pub mod error;
pub mod projects;
pub mod tasks;
pub mod types;

// Re-export main types at crate root
pub use auth::{OAuthConfig, TokenResponse};
pub use client::TickTickClient;
pub use error::{ApiError, ApiErrorKind, Error, TokenError};
pub use projects::ProjectsService;
pub use tasks::TasksService;

pub use types::{
    Column, CreateProjectRequest, CreateTaskRequest, Id, Project, ProjectData, Reminder, Task,
    TaskItem, UpdateProjectRequest, UpdateTaskRequest,
};
