//! Wire types for the reqres and GoRest user APIs

use serde::{Deserialize, Serialize};

/// Gender accepted by the GoRest user collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gender::Male => write!(f, "Male"),
            Gender::Female => write!(f, "Female"),
        }
    }
}

/// Account status of a GoRest user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    Active,
    Inactive,
}

impl UserStatus {
    pub const ALL: [UserStatus; 2] = [UserStatus::Active, UserStatus::Inactive];
}

impl Default for UserStatus {
    fn default() -> Self {
        Self::Active
    }
}

impl std::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserStatus::Active => write!(f, "active"),
            UserStatus::Inactive => write!(f, "inactive"),
        }
    }
}

/// Body of a GoRest create or update request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPayload {
    pub name: String,
    pub gender: Gender,
    pub email: String,
    pub status: UserStatus,
}

impl UserPayload {
    pub fn new(
        name: impl Into<String>,
        gender: Gender,
        email: impl Into<String>,
        status: UserStatus,
    ) -> Self {
        Self {
            name: name.into(),
            gender,
            email: email.into(),
            status,
        }
    }

    /// Same payload with the status replaced
    pub fn with_status(mut self, status: UserStatus) -> Self {
        self.status = status;
        self
    }
}

/// The part of a GoRest user response the checks rely on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserId {
    pub id: i64,
}

/// A user as listed by reqres
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReqresUser {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub avatar: String,
}

/// One page of `GET /api/users`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPage {
    pub page: u32,
    pub per_page: u32,
    pub total: u32,
    pub total_pages: u32,
    pub data: Vec<ReqresUser>,
}

/// Response of `GET /api/users/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SingleUser {
    pub data: ReqresUser,
}

/// Body of `POST /api/users` on reqres
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRequest {
    pub name: String,
    pub job: String,
}

/// Response of `POST /api/users` on reqres
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobCreated {
    pub name: String,
    pub job: String,
    pub id: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_wire_spelling() {
        let payload = UserPayload::new("Jane Doe", Gender::Female, "jane@x.test", UserStatus::Active);
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "Jane Doe",
                "gender": "Female",
                "email": "jane@x.test",
                "status": "active",
            })
        );
    }

    #[test]
    fn test_with_status_keeps_other_fields() {
        let payload = UserPayload::new("Jane Doe", Gender::Female, "jane@x.test", UserStatus::Active)
            .with_status(UserStatus::Inactive);
        assert_eq!(payload.status, UserStatus::Inactive);
        assert_eq!(payload.name, "Jane Doe");
        assert_eq!(payload.email, "jane@x.test");
    }

    #[test]
    fn test_user_id_ignores_extra_fields() {
        let body = r#"{"id":7343213,"name":"Jane","email":"jane@x.test","gender":"female","status":"active"}"#;
        let parsed: UserId = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.id, 7343213);
    }

    #[test]
    fn test_job_created_field_rename() {
        let body = r#"{"name":"Test User","job":"2024: QA Analyst","id":"512","createdAt":"2024-05-01T10:00:00.000Z"}"#;
        let parsed: JobCreated = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.id, "512");
        assert_eq!(parsed.created_at, "2024-05-01T10:00:00.000Z");
    }
}
