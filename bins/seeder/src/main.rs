//! Database seeder for Quill development and testing.
//!
//! Seeds a development user and a small chart of accounts beneath the
//! fixed main accounts (which the initial migration already provides).
//!
//! Usage: cargo run --bin seeder

use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use quill_core::chart::MainAccountKind;
use quill_db::entities::user;
use quill_db::repositories::ChartRepository;
use quill_shared::AppConfig;

/// Development user ID (consistent for all seeds)
const DEV_USER_ID: &str = "00000000-0000-0000-0000-000000000002";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quill=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // DATABASE_URL wins over the layered configuration for local runs.
    let database_url = std::env::var("DATABASE_URL").unwrap_or_else(|_| {
        let config = AppConfig::load().expect("Failed to load configuration");
        config.database.url
    });

    info!("Connecting to database...");
    let db = quill_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    seed_dev_user(&db).await;
    seed_chart(&db).await;

    info!("Seeding complete");
}

fn dev_user_id() -> Uuid {
    Uuid::parse_str(DEV_USER_ID).expect("constant UUID parses")
}

/// Seeds a development user to issue transactions as.
async fn seed_dev_user(db: &DatabaseConnection) {
    if user::Entity::find_by_id(dev_user_id())
        .one(db)
        .await
        .ok()
        .flatten()
        .is_some()
    {
        info!("Development user already exists, skipping");
        return;
    }

    user::ActiveModel {
        id: Set(dev_user_id()),
        name: Set("Development Clerk".to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to seed user");

    info!("Development user seeded");
}

/// Seeds a starter chart: one sub-account, category, and a handful of
/// leaf accounts under each main account.
async fn seed_chart(db: &DatabaseConnection) {
    let chart = ChartRepository::new(db.clone());

    let existing = chart
        .chart_of_accounts()
        .await
        .expect("Failed to read chart");
    if !existing.is_empty() {
        info!("Chart already seeded, skipping");
        return;
    }

    let sections: [(MainAccountKind, i32, &str, &[(i32, &str, &[(i32, &str)])]); 6] = [
        (
            MainAccountKind::Assets,
            110,
            "Current Assets",
            &[(1110, "Cash & Equivalents", &[(11110, "Cash"), (11120, "Bank")])],
        ),
        (
            MainAccountKind::Liabilities,
            210,
            "Current Liabilities",
            &[(2110, "Accounts Payable", &[(21110, "Trade Creditors")])],
        ),
        (
            MainAccountKind::Equity,
            310,
            "Owner Equity",
            &[(3110, "Capital", &[(31110, "Owner Capital")])],
        ),
        (
            MainAccountKind::Expenses,
            410,
            "Operating Expenses",
            &[(4110, "Occupancy", &[(41110, "Rent"), (41120, "Utilities")])],
        ),
        (
            MainAccountKind::Revenue,
            510,
            "Operating Revenue",
            &[(5110, "Sales", &[(51110, "Sales")])],
        ),
        (
            MainAccountKind::OtherRevenue,
            610,
            "Non-operating Revenue",
            &[(6110, "Sundry Income", &[(61110, "Interest Income")])],
        ),
    ];

    for (main, sub_code, sub_name, categories) in sections {
        let sub_id = chart
            .create_sub_account(main, sub_code, sub_name)
            .await
            .expect("Failed to seed sub account");

        for (category_code, category_name, accounts) in categories {
            let category_id = chart
                .create_category(sub_id, *category_code, category_name)
                .await
                .expect("Failed to seed category");

            for (account_code, account_name) in *accounts {
                chart
                    .create_account(category_id, *account_code, account_name)
                    .await
                    .expect("Failed to seed account");
            }
        }
    }

    info!("Chart of accounts seeded");
}
