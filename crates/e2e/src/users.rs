//! Authenticated create/update/delete flow against the GoRest user collection
//!
//! A [`UserFlow`] owns the id of the user it created and threads it, together
//! with the bearer token, through the dependent update and delete calls:
//!
//! ```text
//!   Unset ──create──▶ Set(id) ──update──▶ Set(id)
//!                        │
//!                        └──delete (204)──▶ Unset
//! ```
//!
//! Update and delete lazily create a user when none is held, so each of them
//! can run on its own. All operations take `&mut self`; a flow is driven by a
//! single task at a time and sharing one across tasks is not supported.

use tracing::{error, info};

use restprobe_common::{ProbeConfig, UserId, UserPayload};

use crate::client::{ApiClient, ApiResponse};
use crate::error::{E2eError, E2eResult};
use crate::fixtures::{RandomUsers, UserSource};

/// Collection path on the GoRest API
pub const USERS_PATH: &str = "/public/v2/users";

/// The only status accepted from a delete
pub const DELETE_STATUS: u16 = 204;

/// The user currently owned by a flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CreatedUser {
    #[default]
    Unset,
    Set(i64),
}

impl CreatedUser {
    pub fn id(&self) -> Option<i64> {
        match self {
            CreatedUser::Unset => None,
            CreatedUser::Set(id) => Some(*id),
        }
    }
}

/// Create/update/delete controller for one GoRest user at a time
pub struct UserFlow {
    client: ApiClient,
    token: Option<String>,
    users: Box<dyn UserSource>,
    created: CreatedUser,
}

impl UserFlow {
    /// Build a flow from the resolved configuration
    pub fn new(config: &ProbeConfig) -> E2eResult<Self> {
        let client = ApiClient::new(&config.gorest.base_url, config.http.timeout())?;
        Ok(Self::with_client(
            client,
            config.gorest.token().map(str::to_string),
        ))
    }

    /// Build a flow around an existing client
    pub fn with_client(client: ApiClient, token: Option<String>) -> Self {
        Self {
            client,
            token,
            users: Box::new(RandomUsers::new()),
            created: CreatedUser::Unset,
        }
    }

    /// Replace the payload generator
    pub fn with_users(mut self, users: impl UserSource + 'static) -> Self {
        self.users = Box::new(users);
        self
    }

    pub fn created(&self) -> CreatedUser {
        self.created
    }

    pub fn created_id(&self) -> Option<i64> {
        self.created.id()
    }

    /// A fresh payload from the generator
    pub fn next_payload(&mut self) -> UserPayload {
        self.users.next_user()
    }

    fn require_token(&self) -> E2eResult<&str> {
        self.token
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| {
                E2eError::Configuration(format!(
                    "{} is not set",
                    restprobe_common::ACCESS_TOKEN_ENV
                ))
            })
    }

    /// Return the held user id, creating a user first if none is held
    pub async fn ensure_created(&mut self) -> E2eResult<i64> {
        if let CreatedUser::Set(id) = self.created {
            return Ok(id);
        }
        let payload = self.users.next_user();
        self.create_user(&payload).await
    }

    /// POST a new user and hold its id
    pub async fn create_user(&mut self, payload: &UserPayload) -> E2eResult<i64> {
        let token = self.require_token()?;

        let resp = self
            .client
            .post_json(USERS_PATH, payload, Some(token))
            .await;
        let id = parse_user_id(log_failure(resp)?.require_success())?;

        info!("Created User ID: {}", id);
        self.created = CreatedUser::Set(id);
        Ok(id)
    }

    /// PUT `payload` onto the held user, creating one first if needed
    pub async fn update_user(&mut self, payload: &UserPayload) -> E2eResult<i64> {
        let id = self.ensure_created().await?;
        self.update_user_with_id(id, payload).await
    }

    /// PUT `payload` onto user `id` and check the server echoes the same id
    pub async fn update_user_with_id(&mut self, id: i64, payload: &UserPayload) -> E2eResult<i64> {
        let token = self.require_token()?;

        let resp = self
            .client
            .put_json(&user_path(id), payload, Some(token))
            .await;
        let resp = log_failure(resp)?.require_success()?;
        let body = resp.body.clone();
        let echoed = parse_user_id(Ok(resp))?;

        info!("Updated User ID: {}", echoed);
        info!("Updated User Response: {}", body);

        if echoed != id {
            return Err(E2eError::IdMismatch {
                expected: id,
                actual: echoed,
            });
        }
        Ok(echoed)
    }

    /// DELETE the held user, creating one first if needed
    pub async fn delete_user(&mut self) -> E2eResult<()> {
        let id = self.ensure_created().await?;
        self.delete_user_with_id(id).await
    }

    /// DELETE user `id`; anything but 204 is a failure.
    ///
    /// Releases the held id when it is the one deleted, so a later
    /// `ensure_created` makes a new user instead of reusing a dead id.
    pub async fn delete_user_with_id(&mut self, id: i64) -> E2eResult<()> {
        let token = self.require_token()?;

        let resp = self.client.delete(&user_path(id), Some(token)).await;
        let resp = log_failure(resp)?;
        if resp.is_success() && resp.status != DELETE_STATUS {
            error!("Error: {} - {}", resp.status, resp.body);
        }
        resp.require_status(DELETE_STATUS)?;

        info!("User ID: {} deleted successfully.", id);
        if self.created == CreatedUser::Set(id) {
            self.created = CreatedUser::Unset;
        }
        Ok(())
    }
}

fn user_path(id: i64) -> String {
    format!("{USERS_PATH}/{id}")
}

fn log_failure(resp: E2eResult<ApiResponse>) -> E2eResult<ApiResponse> {
    match resp {
        Ok(resp) if !resp.is_success() => {
            error!("Error: {} - {}", resp.status, resp.body);
            Ok(resp)
        }
        Err(e) => {
            error!("Error: {}", e);
            Err(e)
        }
        ok => ok,
    }
}

fn parse_user_id(resp: E2eResult<ApiResponse>) -> E2eResult<i64> {
    let resp = resp?;
    let user: UserId = serde_json::from_str(&resp.body).map_err(|e| {
        E2eError::Parse(format!("no integer id in user response ({e}): {}", resp.body))
    })?;
    Ok(user.id)
}
