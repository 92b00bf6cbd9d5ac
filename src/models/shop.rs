//! Shop model. `verification_documents` stays in the database and is never selected.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::user::UserRef;

#[derive(Debug, Clone, FromRow)]
pub struct ShopRow {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub phone: Option<String>,
    pub governorate: Option<String>,
    pub is_verified: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub added_by_name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Shop {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub phone: Option<String>,
    pub governorate: Option<String>,
    pub is_verified: bool,
    pub is_active: bool,
    pub added_by: Option<UserRef>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ShopRow> for Shop {
    fn from(row: ShopRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            phone: row.phone,
            governorate: row.governorate,
            is_verified: row.is_verified,
            is_active: row.is_active,
            added_by: UserRef::from_joined(row.added_by_name),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
