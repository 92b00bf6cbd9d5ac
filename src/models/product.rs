//! Product model: moderation status and the pending-approval list row.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::user::UserContact;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "product_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    Pending,
    Approved,
    Rejected,
}

/// Row fetched for the pending-approvals list, submitter joined from `users`.
#[derive(Debug, Clone, FromRow)]
pub struct PendingProductRow {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub product_type: String,
    pub governorate: String,
    pub price: Option<f64>,
    pub status: ProductStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub submitter_name: Option<String>,
    pub submitter_phone: Option<String>,
    pub submitter_email: Option<String>,
}

/// Product awaiting moderation, as returned to the admin UI.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingProduct {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub product_type: String,
    pub governorate: String,
    pub price: Option<f64>,
    pub status: ProductStatus,
    pub submitted_by: Option<UserContact>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PendingProductRow> for PendingProduct {
    fn from(row: PendingProductRow) -> Self {
        let submitted_by = match (row.submitter_name, row.submitter_email) {
            (Some(name), Some(email)) => Some(UserContact {
                name,
                phone: row.submitter_phone,
                email,
            }),
            _ => None,
        };

        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            product_type: row.product_type,
            governorate: row.governorate,
            price: row.price,
            status: row.status,
            submitted_by,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> PendingProductRow {
        PendingProductRow {
            id: Uuid::nil(),
            name: "Mono panel 450W".to_string(),
            description: None,
            product_type: "Panel".to_string(),
            governorate: "Sanaa".to_string(),
            price: Some(120.0),
            status: ProductStatus::Pending,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            submitter_name: Some("Salem".to_string()),
            submitter_phone: None,
            submitter_email: Some("salem@example.com".to_string()),
        }
    }

    #[test]
    fn status_serialization() {
        let json = serde_json::to_string(&ProductStatus::Rejected).unwrap();
        assert_eq!(json, "\"rejected\"");
    }

    #[test]
    fn pending_product_resolves_submitter() {
        let product: PendingProduct = row().into();
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["type"], "Panel");
        assert_eq!(json["submittedBy"]["name"], "Salem");
        assert_eq!(json["submittedBy"]["email"], "salem@example.com");
        assert!(json["submittedBy"]["phone"].is_null());
        assert!(json.get("productType").is_none());
    }

    #[test]
    fn pending_product_without_submitter() {
        let mut r = row();
        r.submitter_name = None;
        r.submitter_email = None;
        let product: PendingProduct = r.into();
        assert!(product.submitted_by.is_none());
    }
}
