use crate::model::{OnCallEntry, OverrideIntent, Schedule, ScheduleId, User, WeekWindow};
use chrono::{DateTime, Utc};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// URL de base de l'API PagerDuty v2.
pub const DEFAULT_API_URL: &str = "https://api.pagerduty.com";

const ACCEPT_HEADER: &str = "application/vnd.pagerduty+json;version=2";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("transport error calling {endpoint}: {source}")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("{endpoint} returned {status}: {body}")]
    Rejected {
        endpoint: &'static str,
        status: StatusCode,
        body: String,
    },
    #[error("decoding {endpoint} response: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },
}

/// Les trois capacités du service de planification, plus la lecture du
/// planning rendu. Les recherches renvoient les candidats bruts du service ;
/// la politique de correspondance exacte appartient au planner.
pub trait ScheduleService {
    /// Identité du porteur du token (`/users/me`).
    fn current_user(&self) -> Result<User, ApiError>;
    /// Recherche d'utilisateurs par nom ou e-mail.
    fn find_users(&self, query: &str) -> Result<Vec<User>, ApiError>;
    /// Recherche de plannings par nom.
    fn find_schedules(&self, query: &str) -> Result<Vec<Schedule>, ApiError>;
    /// Entrées rendues du planning final sur une fenêtre (lecture seule).
    fn oncall_entries(
        &self,
        schedule: &ScheduleId,
        window: WeekWindow,
    ) -> Result<Vec<OnCallEntry>, ApiError>;
    /// Crée un override temporaire. Écriture unique, jamais retentée.
    fn create_override(&self, intent: &OverrideIntent) -> Result<(), ApiError>;
}

/// Client REST bloquant pour l'API PagerDuty.
///
/// Construit une fois par invocation et passé explicitement au planner ;
/// pas de client global.
pub struct PagerDutyClient {
    http: Client,
    base_url: String,
    token: String,
}

impl PagerDutyClient {
    pub fn new<T: Into<String>, U: Into<String>>(token: T, base_url: U) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    fn get<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .get(&url)
            .header("Accept", ACCEPT_HEADER)
            .header("Authorization", format!("Token token={}", self.token))
            .query(query)
            .send()
            .map_err(|source| ApiError::Transport { endpoint, source })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ApiError::Rejected {
                endpoint,
                status,
                body,
            });
        }
        response
            .json()
            .map_err(|source| ApiError::Decode { endpoint, source })
    }

    fn post<B: Serialize>(
        &self,
        endpoint: &'static str,
        path: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .post(&url)
            .header("Accept", ACCEPT_HEADER)
            .header("Authorization", format!("Token token={}", self.token))
            .json(body)
            .send()
            .map_err(|source| ApiError::Transport { endpoint, source })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ApiError::Rejected {
                endpoint,
                status,
                body,
            });
        }
        Ok(())
    }
}

impl ScheduleService for PagerDutyClient {
    fn current_user(&self) -> Result<User, ApiError> {
        let envelope: UserEnvelope = self.get("GET /users/me", "/users/me", &[])?;
        debug!(user = %envelope.user.summary, "current user fetched");
        Ok(envelope.user.into())
    }

    fn find_users(&self, query: &str) -> Result<Vec<User>, ApiError> {
        let envelope: UsersEnvelope = self.get(
            "GET /users",
            "/users",
            &[("query", query.to_string())],
        )?;
        debug!(query, count = envelope.users.len(), "user search done");
        Ok(envelope.users.into_iter().map(User::from).collect())
    }

    fn find_schedules(&self, query: &str) -> Result<Vec<Schedule>, ApiError> {
        let envelope: SchedulesEnvelope = self.get(
            "GET /schedules",
            "/schedules",
            &[("query", query.to_string())],
        )?;
        debug!(query, count = envelope.schedules.len(), "schedule search done");
        Ok(envelope.schedules.into_iter().map(Schedule::from).collect())
    }

    fn oncall_entries(
        &self,
        schedule: &ScheduleId,
        window: WeekWindow,
    ) -> Result<Vec<OnCallEntry>, ApiError> {
        let path = format!("/schedules/{}", schedule.as_str());
        let envelope: ScheduleEnvelope = self.get(
            "GET /schedules/{id}",
            &path,
            &[
                ("since", window.start().to_rfc3339()),
                ("until", window.end().to_rfc3339()),
                ("time_zone", "UTC".to_string()),
            ],
        )?;
        Ok(envelope
            .schedule
            .final_schedule
            .rendered_schedule_entries
            .into_iter()
            .map(OnCallEntry::from)
            .collect())
    }

    fn create_override(&self, intent: &OverrideIntent) -> Result<(), ApiError> {
        let path = format!("/schedules/{}/overrides", intent.schedule.as_str());
        let body = OverrideEnvelope {
            r#override: OverrideBody {
                user: UserReference {
                    id: intent.assigned.as_str().to_string(),
                    r#type: "user_reference",
                },
                start: intent.window.start(),
                end: intent.window.end(),
                r#type: "schedule_override",
            },
        };
        self.post("POST /schedules/{id}/overrides", &path, &body)
    }
}

// Formes de l'API PagerDuty v2 (enveloppes + références).

#[derive(Deserialize)]
struct UserEnvelope {
    user: UserDto,
}

#[derive(Deserialize)]
struct UsersEnvelope {
    users: Vec<UserDto>,
}

#[derive(Deserialize)]
struct UserDto {
    id: String,
    summary: String,
}

impl From<UserDto> for User {
    fn from(dto: UserDto) -> Self {
        User::new(dto.id, dto.summary)
    }
}

#[derive(Deserialize)]
struct SchedulesEnvelope {
    schedules: Vec<ScheduleDto>,
}

#[derive(Deserialize)]
struct ScheduleDto {
    id: String,
    name: String,
}

impl From<ScheduleDto> for Schedule {
    fn from(dto: ScheduleDto) -> Self {
        Schedule::new(dto.id, dto.name)
    }
}

#[derive(Deserialize)]
struct ScheduleEnvelope {
    schedule: ScheduleDetailDto,
}

#[derive(Deserialize)]
struct ScheduleDetailDto {
    final_schedule: FinalScheduleDto,
}

#[derive(Deserialize)]
struct FinalScheduleDto {
    rendered_schedule_entries: Vec<EntryDto>,
}

#[derive(Deserialize)]
struct EntryDto {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    user: UserDto,
}

impl From<EntryDto> for OnCallEntry {
    fn from(dto: EntryDto) -> Self {
        OnCallEntry {
            user: crate::model::UserId::new(&dto.user.id),
            user_name: dto.user.summary,
            start: dto.start,
            end: dto.end,
        }
    }
}

#[derive(Serialize)]
struct OverrideEnvelope {
    r#override: OverrideBody,
}

#[derive(Serialize)]
struct OverrideBody {
    user: UserReference,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    r#type: &'static str,
}

#[derive(Serialize)]
struct UserReference {
    id: String,
    r#type: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn override_body_matches_wire_format() {
        let intent = OverrideIntent {
            schedule: ScheduleId::new("SCHED123"),
            overridden: crate::model::UserId::new("USR001"),
            assigned: crate::model::UserId::new("USR456"),
            window: WeekWindow::from_date(NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()),
        };
        let body = OverrideEnvelope {
            r#override: OverrideBody {
                user: UserReference {
                    id: intent.assigned.as_str().to_string(),
                    r#type: "user_reference",
                },
                start: intent.window.start(),
                end: intent.window.end(),
                r#type: "schedule_override",
            },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["override"]["user"]["id"], "USR456");
        assert_eq!(json["override"]["user"]["type"], "user_reference");
        assert_eq!(json["override"]["type"], "schedule_override");
        assert_eq!(json["override"]["start"], "2024-03-04T00:00:00Z");
        assert_eq!(json["override"]["end"], "2024-03-11T00:00:00Z");
    }

    #[test]
    fn rendered_entries_decode() {
        let raw = r#"{
            "schedule": {
                "final_schedule": {
                    "rendered_schedule_entries": [
                        {
                            "start": "2024-03-04T00:00:00Z",
                            "end": "2024-03-11T00:00:00Z",
                            "user": {"id": "USR001", "summary": "Alice"}
                        }
                    ]
                }
            }
        }"#;
        let envelope: ScheduleEnvelope = serde_json::from_str(raw).unwrap();
        let entries = envelope.schedule.final_schedule.rendered_schedule_entries;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].user.id, "USR001");
    }
}
