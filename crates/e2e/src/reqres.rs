//! Checks against the reqres mock user API

use tracing::info;

use restprobe_common::{JobCreated, JobRequest, ProbeConfig, SingleUser, UserPage};

use crate::client::{ApiClient, ApiResponse};
use crate::error::{E2eError, E2eResult};

/// Emails expected on page 2 of the user list
pub const PAGE_TWO_EMAILS: [&str; 3] = [
    "michael.lawson@reqres.in",
    "tobias.funke@reqres.in",
    "lindsay.ferguson@reqres.in",
];

/// The user the single-user check fetches
pub const KNOWN_USER_ID: i64 = 2;

/// An id reqres does not have
pub const MISSING_USER_ID: i64 = 23;

pub const JOB_NAME: &str = "Test User";
pub const JOB_TITLE: &str = "2024: QA Analyst";

/// Unauthenticated reqres checks
pub struct ReqresChecks {
    client: ApiClient,
}

impl ReqresChecks {
    pub fn new(config: &ProbeConfig) -> E2eResult<Self> {
        let client = ApiClient::new(&config.reqres.base_url, config.http.timeout())?;
        Ok(Self::with_client(client))
    }

    pub fn with_client(client: ApiClient) -> Self {
        Self { client }
    }

    /// `GET /api/users?page=2` lists the known page-two users
    pub async fn list_users_page_two(&self) -> E2eResult<UserPage> {
        let resp = self.client.get("/api/users?page=2").await?.require_success()?;
        log_response(&resp);

        assert_contains(&resp.body, &PAGE_TWO_EMAILS)?;
        resp.json()
    }

    /// `GET /api/users/2` returns Janet Weaver
    pub async fn single_user(&self) -> E2eResult<SingleUser> {
        let resp = self
            .client
            .get(&format!("/api/users/{KNOWN_USER_ID}"))
            .await?
            .require_success()?;
        log_response(&resp);

        assert_contains(&resp.body, &["janet.weaver@reqres.in", "Janet", "Weaver"])?;
        resp.json()
    }

    /// `GET /api/users/23` is a 404
    pub async fn single_user_not_found(&self) -> E2eResult<()> {
        let resp = self
            .client
            .get(&format!("/api/users/{MISSING_USER_ID}"))
            .await?
            .require_status(404)?;
        log_response(&resp);
        Ok(())
    }

    /// `POST /api/users` echoes the submitted name and job
    pub async fn create_user_with_job(&self) -> E2eResult<JobCreated> {
        let request = JobRequest {
            name: JOB_NAME.to_string(),
            job: JOB_TITLE.to_string(),
        };
        let resp = self
            .client
            .post_json("/api/users", &request, None)
            .await?
            .require_success()?;
        log_response(&resp);

        assert_contains(&resp.body, &[JOB_NAME, JOB_TITLE])?;
        resp.json()
    }
}

fn log_response(resp: &ApiResponse) {
    info!("API Response: {}", resp.body);
}

/// Fail unless every needle occurs in `body`
pub fn assert_contains(body: &str, needles: &[&str]) -> E2eResult<()> {
    let missing: Vec<&str> = needles
        .iter()
        .copied()
        .filter(|n| !body.contains(n))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(E2eError::AssertionFailed(format!(
            "response is missing {}",
            missing.join(", ")
        )))
    }
}
