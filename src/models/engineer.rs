//! Engineer model. Internal `notes` are never selected.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::user::UserRef;

#[derive(Debug, Clone, FromRow)]
pub struct EngineerRow {
    pub id: Uuid,
    pub name: String,
    pub phone: Option<String>,
    pub specialization: Option<String>,
    pub governorate: Option<String>,
    pub is_verified: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub added_by_name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Engineer {
    pub id: Uuid,
    pub name: String,
    pub phone: Option<String>,
    pub specialization: Option<String>,
    pub governorate: Option<String>,
    pub is_verified: bool,
    pub is_active: bool,
    pub added_by: Option<UserRef>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<EngineerRow> for Engineer {
    fn from(row: EngineerRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            phone: row.phone,
            specialization: row.specialization,
            governorate: row.governorate,
            is_verified: row.is_verified,
            is_active: row.is_active,
            added_by: UserRef::from_joined(row.added_by_name),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
