//! Seed script for development: populates a fresh database with sample data.
//!
//! Usage: `cargo run --bin seed`
//!
//! Requires `DATABASE_URL` and `JWT_SECRET` environment variables (reads .env).
//! Prints a 24h admin access token for calling the admin routes.

use chrono::{Duration, Utc};
use marketdash::models::product::ProductStatus;
use marketdash::models::user::UserRole;
use marketdash::services::auth::generate_access_token;
use sqlx::PgPool;
use uuid::Uuid;

const ADMIN_EMAIL: &str = "admin@marketdash.local";
const TOKEN_EXPIRY_SECS: i64 = 24 * 3600;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let db_url = std::env::var("DATABASE_URL")?;
    let jwt_secret = std::env::var("JWT_SECRET")?;
    let pool = marketdash::db::create_pool(&db_url, 5).await?;

    // Run migrations first
    marketdash::db::run_migrations(&pool).await?;

    println!("=== Marketplace Dashboard Seed Script ===");

    let (admin_id, seller_id) = seed_users(&pool).await?;
    seed_products(&pool, seller_id).await?;
    seed_shops(&pool, admin_id).await?;
    seed_engineers(&pool, admin_id).await?;
    seed_ads(&pool).await?;

    let token = generate_access_token(
        admin_id,
        "Platform Admin",
        UserRole::Admin,
        &jwt_secret,
        TOKEN_EXPIRY_SECS,
    )?;

    println!("\n=== Seed complete! ===");
    println!("Admin token (24h): {token}");

    Ok(())
}

async fn seed_users(pool: &PgPool) -> anyhow::Result<(Uuid, Uuid)> {
    let existing: Option<Uuid> = sqlx::query_scalar("SELECT id FROM users WHERE email = $1")
        .bind(ADMIN_EMAIL)
        .fetch_optional(pool)
        .await?;

    if let Some(admin_id) = existing {
        let seller_id: Uuid =
            sqlx::query_scalar("SELECT id FROM users WHERE role = 'seller' LIMIT 1")
                .fetch_optional(pool)
                .await?
                .unwrap_or(admin_id);
        println!("[skip] Users already exist");
        return Ok((admin_id, seller_id));
    }

    let users = [
        ("Platform Admin", ADMIN_EMAIL, "777000001", UserRole::Admin),
        ("Salem Ahmed", "salem@marketdash.local", "777000002", UserRole::Seller),
        ("Huda Saleh", "huda@marketdash.local", "777000003", UserRole::User),
    ];

    let mut ids = Vec::with_capacity(users.len());
    for (name, email, phone, role) in users {
        let id = Uuid::now_v7();
        sqlx::query(
            "INSERT INTO users (id, name, email, phone, role) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(id)
        .bind(name)
        .bind(email)
        .bind(phone)
        .bind(role)
        .execute(pool)
        .await?;
        ids.push(id);
    }

    println!("[done] Created {} users", ids.len());
    Ok((ids[0], ids[1]))
}

async fn seed_products(pool: &PgPool, seller_id: Uuid) -> anyhow::Result<()> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
        .fetch_one(pool)
        .await?;

    if count > 0 {
        println!("[skip] Products already exist ({count})");
        return Ok(());
    }

    let products = [
        ("Mono panel 450W", "Panel", "Sanaa", 120.0, ProductStatus::Pending, 0),
        ("Mono panel 550W", "Panel", "Aden", 160.0, ProductStatus::Approved, 2),
        ("Poly panel 330W", "Panel", "Taiz", 85.0, ProductStatus::Approved, 5),
        ("Lithium 5kWh", "Battery", "Sanaa", 900.0, ProductStatus::Rejected, 1),
        ("Gel 200Ah", "Battery", "Hadramaut", 210.0, ProductStatus::Pending, 0),
        ("Hybrid 5kW", "Inverter", "Aden", 640.0, ProductStatus::Approved, 9),
        ("Off-grid 3kW", "Inverter", "Ibb", 380.0, ProductStatus::Pending, 3),
        ("MPPT 60A", "Controller", "Sanaa", 95.0, ProductStatus::Approved, 12),
        ("DC cable 6mm", "Cable", "Hodeidah", 1.5, ProductStatus::Pending, 0),
    ];

    for (name, product_type, governorate, price, status, days_ago) in products {
        let created_at = Utc::now() - Duration::days(days_ago);
        sqlx::query(
            "INSERT INTO products (id, name, description, product_type, governorate, price,
             status, user_id, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $9)",
        )
        .bind(Uuid::now_v7())
        .bind(name)
        .bind(format!("{name} listed by a sample seller"))
        .bind(product_type)
        .bind(governorate)
        .bind(price)
        .bind(status)
        .bind(seller_id)
        .bind(created_at)
        .execute(pool)
        .await?;
    }

    println!("[done] Created {} products", products.len());
    Ok(())
}

async fn seed_shops(pool: &PgPool, admin_id: Uuid) -> anyhow::Result<()> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM shops")
        .fetch_one(pool)
        .await?;

    if count > 0 {
        println!("[skip] Shops already exist ({count})");
        return Ok(());
    }

    let shops = [
        ("Sun Power Store", "Aden", true, true),
        ("Al-Noor Solar", "Sanaa", true, true),
        ("Bright Energy", "Taiz", false, true),
        ("Old Market Solar", "Ibb", true, false),
    ];

    for (name, governorate, is_verified, is_active) in shops {
        sqlx::query(
            "INSERT INTO shops (id, name, governorate, is_verified, is_active,
             verification_documents, added_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(Uuid::now_v7())
        .bind(name)
        .bind(governorate)
        .bind(is_verified)
        .bind(is_active)
        .bind(serde_json::json!(["commercial-register.pdf"]))
        .bind(admin_id)
        .execute(pool)
        .await?;
    }

    println!("[done] Created {} shops", shops.len());
    Ok(())
}

async fn seed_engineers(pool: &PgPool, admin_id: Uuid) -> anyhow::Result<()> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM engineers")
        .fetch_one(pool)
        .await?;

    if count > 0 {
        println!("[skip] Engineers already exist ({count})");
        return Ok(());
    }

    let engineers = [
        ("Eng. Khaled", "Installation", "Sanaa", true, true),
        ("Eng. Maryam", "System design", "Aden", true, true),
        ("Eng. Fuad", "Maintenance", "Taiz", false, true),
    ];

    for (name, specialization, governorate, is_verified, is_active) in engineers {
        sqlx::query(
            "INSERT INTO engineers (id, name, specialization, governorate, is_verified,
             is_active, notes, added_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(Uuid::now_v7())
        .bind(name)
        .bind(specialization)
        .bind(governorate)
        .bind(is_verified)
        .bind(is_active)
        .bind("Internal review notes")
        .bind(admin_id)
        .execute(pool)
        .await?;
    }

    println!("[done] Created {} engineers", engineers.len());
    Ok(())
}

async fn seed_ads(pool: &PgPool) -> anyhow::Result<()> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM ads")
        .fetch_one(pool)
        .await?;

    if count > 0 {
        println!("[skip] Ads already exist ({count})");
        return Ok(());
    }

    let ads = [
        ("Summer panel discounts", true),
        ("Free installation week", true),
        ("Ramadan offers", false),
    ];

    for (title, active) in ads {
        sqlx::query("INSERT INTO ads (id, title, active) VALUES ($1, $2, $3)")
            .bind(Uuid::now_v7())
            .bind(title)
            .bind(active)
            .execute(pool)
            .await?;
    }

    println!("[done] Created {} ads", ads.len());
    Ok(())
}
