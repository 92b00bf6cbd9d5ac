//! Typed query filters shared by counts and paginated lists.
//!
//! Column names are compile-time constants; only values are bound, so a
//! `Filter` renders to the same `WHERE` clause whether it feeds a `COUNT(*)`
//! or a page query. Keeping both on one filter is what makes a list's
//! `totalItems` equal to the matching headline count.

use chrono::{DateTime, Utc};
use sqlx::{Postgres, QueryBuilder};

use crate::models::product::ProductStatus;

/// Tables the dashboard reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Products,
    Shops,
    Engineers,
    Ads,
    Users,
}

impl Collection {
    pub fn table(self) -> &'static str {
        match self {
            Collection::Products => "products",
            Collection::Shops => "shops",
            Collection::Engineers => "engineers",
            Collection::Ads => "ads",
            Collection::Users => "users",
        }
    }
}

/// Timestamp column a "since" condition applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampField {
    CreatedAt,
    UpdatedAt,
}

impl TimestampField {
    pub fn column(self) -> &'static str {
        match self {
            TimestampField::CreatedAt => "created_at",
            TimestampField::UpdatedAt => "updated_at",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Condition {
    Status(ProductStatus),
    Flag(&'static str, bool),
    Since(TimestampField, DateTime<Utc>),
}

/// Conjunction of equality and lower-bound conditions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<Condition>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Match products in the given moderation state.
    pub fn status(mut self, status: ProductStatus) -> Self {
        self.conditions.push(Condition::Status(status));
        self
    }

    /// Match a boolean column.
    pub fn flag(mut self, column: &'static str, value: bool) -> Self {
        self.conditions.push(Condition::Flag(column, value));
        self
    }

    /// Match rows whose timestamp is at or after `at`.
    pub fn since(mut self, field: TimestampField, at: DateTime<Utc>) -> Self {
        self.conditions.push(Condition::Since(field, at));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Append ` WHERE ...` to the builder, qualifying columns with `alias`
    /// (e.g. `"p."`, or `""` for an unaliased table).
    pub fn push_where(&self, qb: &mut QueryBuilder<'_, Postgres>, alias: &str) {
        for (i, condition) in self.conditions.iter().enumerate() {
            qb.push(if i == 0 { " WHERE " } else { " AND " });
            qb.push(alias);
            match condition {
                Condition::Status(status) => {
                    qb.push("status = ").push_bind(*status);
                }
                Condition::Flag(column, value) => {
                    qb.push(*column).push(" = ").push_bind(*value);
                }
                Condition::Since(field, at) => {
                    qb.push(field.column()).push(" >= ").push_bind(*at);
                }
            }
        }
    }
}
