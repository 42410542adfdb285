//! CLI definitions and command dispatch.

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use thiserror::Error;

use ticktick::{
    ApiErrorKind, CreateProjectRequest, CreateTaskRequest, OAuthConfig, TickTickClient,
    UpdateProjectRequest, UpdateTaskRequest,
};

const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("BUILD_GIT_SHA"),
    env!("BUILD_GIT_DIRTY"),
    " ",
    env!("BUILD_TIMESTAMP"),
    ")"
);

/// ticktick - command line access to the TickTick Open API
#[derive(Parser, Debug)]
#[command(name = "ticktick", version = VERSION, about = "Command line access to the TickTick Open API")]
pub struct Cli {
    /// OAuth access token used for project and task commands
    #[arg(long, global = true, env = "TICKTICK_ACCESS_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the URL a user visits to authorize this application
    AuthUrl {
        #[command(flatten)]
        oauth: OAuthArgs,

        /// Opaque value echoed back on the redirect
        #[arg(long, default_value = "state")]
        state: String,
    },

    /// Exchange an authorization code for an access token
    Exchange {
        #[command(flatten)]
        oauth: OAuthArgs,

        /// Code received on the redirect URI
        code: String,
    },

    /// Obtain a new access token from a refresh token
    Refresh {
        #[command(flatten)]
        oauth: OAuthArgs,

        refresh_token: String,
    },

    /// Manage projects
    Projects {
        #[command(subcommand)]
        action: ProjectAction,
    },

    /// Manage tasks
    Tasks {
        #[command(subcommand)]
        action: TaskAction,
    },
}

#[derive(Args, Debug)]
pub struct OAuthArgs {
    #[arg(long, env = "TICKTICK_CLIENT_ID")]
    pub client_id: String,

    #[arg(long, env = "TICKTICK_CLIENT_SECRET", hide_env_values = true, default_value = "")]
    pub client_secret: String,

    #[arg(long, env = "TICKTICK_REDIRECT_URI")]
    pub redirect_uri: String,

    /// Space-delimited permissions
    #[arg(long, env = "TICKTICK_SCOPE", default_value = "tasks:read tasks:write")]
    pub scope: String,
}

impl OAuthArgs {
    fn into_config(self) -> OAuthConfig {
        OAuthConfig::new(
            self.client_id,
            self.client_secret,
            self.redirect_uri,
            self.scope,
        )
    }
}

#[derive(Subcommand, Debug)]
pub enum ProjectAction {
    /// List all projects
    List,

    /// Show a project
    Get { id: String },

    /// Show a project with its tasks and columns
    Data { id: String },

    /// Create a project
    Create {
        name: String,

        /// Color such as "#FF5733"
        #[arg(short, long)]
        color: Option<String>,
    },

    /// Update a project
    Update {
        id: String,

        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        color: Option<String>,
    },

    /// Delete a project
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum TaskAction {
    /// List the undone tasks of a project
    List { project_id: String },

    /// Show a task
    Get { project_id: String, task_id: String },

    /// Create a task
    Create {
        project_id: String,

        title: String,

        #[arg(long)]
        content: Option<String>,

        /// Due date, e.g. 2024-03-01T12:00:00Z
        #[arg(long, value_parser = parse_timestamp)]
        due: Option<DateTime<Utc>>,

        /// 0 none, 1 low, 3 medium, 5 high
        #[arg(short, long)]
        priority: Option<i32>,

        #[arg(long = "tag")]
        tags: Vec<String>,
    },

    /// Update a task
    Update {
        project_id: String,

        task_id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        content: Option<String>,

        #[arg(long, value_parser = parse_timestamp)]
        due: Option<DateTime<Utc>>,

        #[arg(short, long)]
        priority: Option<i32>,

        #[arg(long)]
        status: Option<i32>,
    },

    /// Mark a task as completed
    Complete { project_id: String, task_id: String },

    /// Delete a task
    Delete { project_id: String, task_id: String },
}

/// Errors surfaced by the CLI.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("no access token: pass --token or set TICKTICK_ACCESS_TOKEN")]
    MissingToken,

    #[error("{}", describe(.0))]
    TickTick(#[from] ticktick::Error),

    #[error("failed to render output: {0}")]
    Output(#[from] serde_json::Error),
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, String> {
    ticktick::datetime::parse(value).map_err(|e| format!("invalid timestamp: {}", e))
}

/// Prefix API errors with what the status means.
fn describe(error: &ticktick::Error) -> String {
    let hint = match error.api().map(|e| e.kind()) {
        Some(ApiErrorKind::NotFound) => "not found",
        Some(ApiErrorKind::Unauthorized) => "access token rejected",
        Some(ApiErrorKind::Forbidden) => "permission denied",
        Some(ApiErrorKind::RateLimited) => "rate limited, try again later",
        Some(ApiErrorKind::ServerError) => "TickTick server error",
        Some(ApiErrorKind::Other) | None => return error.to_string(),
    };
    format!("{}: {}", hint, error)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Run a parsed command line.
pub async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::AuthUrl { oauth, state } => {
            println!("{}", oauth.into_config().authorization_url(&state));
            Ok(())
        }
        Command::Exchange { oauth, code } => {
            let token = oauth.into_config().exchange_code(&code).await?;
            print_json(&token)
        }
        Command::Refresh {
            oauth,
            refresh_token,
        } => {
            let token = oauth.into_config().refresh_token(&refresh_token).await?;
            print_json(&token)
        }
        Command::Projects { action } => {
            let client = client(cli.token.as_deref())?;
            run_project(&client, action).await
        }
        Command::Tasks { action } => {
            let client = client(cli.token.as_deref())?;
            run_task(&client, action).await
        }
    }
}

fn client(token: Option<&str>) -> Result<TickTickClient, CliError> {
    let token = token.filter(|t| !t.is_empty()).ok_or(CliError::MissingToken)?;
    Ok(TickTickClient::new(token)?)
}

async fn run_project(client: &TickTickClient, action: ProjectAction) -> Result<(), CliError> {
    let projects = client.projects();

    match action {
        ProjectAction::List => print_json(&projects.list().await?),
        ProjectAction::Get { id } => print_json(&projects.get(&id).await?),
        ProjectAction::Data { id } => print_json(&projects.data(&id).await?),
        ProjectAction::Create { name, color } => {
            let request = CreateProjectRequest {
                color,
                ..CreateProjectRequest::new(name)
            };
            print_json(&projects.create(&request).await?)
        }
        ProjectAction::Update { id, name, color } => {
            let request = UpdateProjectRequest {
                name,
                color,
                ..UpdateProjectRequest::new(id)
            };
            print_json(&projects.update(&request).await?)
        }
        ProjectAction::Delete { id } => {
            projects.delete(&id).await?;
            eprintln!("deleted project {}", id);
            Ok(())
        }
    }
}

async fn run_task(client: &TickTickClient, action: TaskAction) -> Result<(), CliError> {
    let tasks = client.tasks();

    match action {
        TaskAction::List { project_id } => print_json(&tasks.list(&project_id).await?),
        TaskAction::Get {
            project_id,
            task_id,
        } => print_json(&tasks.get(&project_id, &task_id).await?),
        TaskAction::Create {
            project_id,
            title,
            content,
            due,
            priority,
            tags,
        } => {
            let request = CreateTaskRequest {
                content,
                due_date: due,
                priority,
                tags,
                ..CreateTaskRequest::new(project_id, title)
            };
            print_json(&tasks.create(&request).await?)
        }
        TaskAction::Update {
            project_id,
            task_id,
            title,
            content,
            due,
            priority,
            status,
        } => {
            let request = UpdateTaskRequest {
                title,
                content,
                due_date: due,
                priority,
                status,
                ..UpdateTaskRequest::new(task_id)
            };
            print_json(&tasks.update(&project_id, &request).await?)
        }
        TaskAction::Complete {
            project_id,
            task_id,
        } => match tasks.complete(&project_id, &task_id).await? {
            Some(task) => print_json(&task),
            None => {
                eprintln!("completed task {}", task_id);
                Ok(())
            }
        },
        TaskAction::Delete {
            project_id,
            task_id,
        } => {
            tasks.delete(&project_id, &task_id).await?;
            eprintln!("deleted task {}", task_id);
            Ok(())
        }
    }
}
