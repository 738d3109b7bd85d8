use anyhow::{Context, Result};
use contracts::domain::a001_branch::Branch;
use contracts::domain::a004_courier::Courier;
use contracts::domain::a005_product::{Product, ProductCategory};
use contracts::domain::common::{AggregateRoot, Record};
use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, Statement};

use crate::shared::data::{db::get_connection, record_store};

/// Schema of the application, applied at every start
const SCHEMA_SQL: &str = r#"
-- generic record store
CREATE TABLE IF NOT EXISTS records (
    id TEXT PRIMARY KEY NOT NULL,
    collection TEXT NOT NULL,
    data TEXT NOT NULL,
    created_by TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    version INTEGER NOT NULL DEFAULT 0,
    is_deleted INTEGER NOT NULL DEFAULT 0
);
CREATE INDEX IF NOT EXISTS idx_records_collection ON records (collection, is_deleted);
CREATE TABLE IF NOT EXISTS record_keys (
    collection TEXT NOT NULL,
    field TEXT NOT NULL,
    value TEXT NOT NULL,
    record_id TEXT NOT NULL,
    UNIQUE (collection, field, value)
);
CREATE INDEX IF NOT EXISTS idx_record_keys_record ON record_keys (record_id);

-- users and sessions
CREATE TABLE IF NOT EXISTS sys_users (
    id TEXT PRIMARY KEY NOT NULL,
    username TEXT NOT NULL UNIQUE,
    email TEXT,
    password_hash TEXT NOT NULL,
    full_name TEXT,
    is_active INTEGER NOT NULL DEFAULT 1,
    is_admin INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    last_login_at TEXT,
    created_by TEXT
);
CREATE TABLE IF NOT EXISTS sys_refresh_tokens (
    id TEXT PRIMARY KEY NOT NULL,
    user_id TEXT NOT NULL,
    token_hash TEXT NOT NULL,
    expires_at TEXT NOT NULL,
    created_at TEXT NOT NULL,
    revoked_at TEXT
);
CREATE INDEX IF NOT EXISTS idx_refresh_tokens_hash ON sys_refresh_tokens (token_hash);
CREATE TABLE IF NOT EXISTS sys_settings (
    key TEXT PRIMARY KEY NOT NULL,
    value TEXT NOT NULL,
    description TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

-- per-user rights, flags are '1', '0' or NULL
CREATE TABLE IF NOT EXISTS sys_user_rights (
    user_id TEXT NOT NULL,
    route TEXT NOT NULL,
    can_view TEXT,
    can_create TEXT,
    can_edit TEXT,
    can_delete TEXT,
    PRIMARY KEY (user_id, route)
);

-- products an API user may sell
CREATE TABLE IF NOT EXISTS api_user_products (
    api_user_id TEXT NOT NULL,
    product_id TEXT NOT NULL,
    assigned_at TEXT NOT NULL,
    PRIMARY KEY (api_user_id, product_id)
);
"#;

/// Split a SQL script into statements, dropping comment lines
pub fn split_statements(sql: &str) -> Vec<String> {
    sql.split(';')
        .map(|statement| {
            statement
                .lines()
                .filter(|line| {
                    let trimmed_line = line.trim();
                    !trimmed_line.is_empty() && !trimmed_line.starts_with("--")
                })
                .collect::<Vec<_>>()
                .join("\n")
        })
        .filter(|s| !s.trim().is_empty())
        .collect()
}

/// Create missing tables
pub async fn apply_schema() -> Result<()> {
    apply_schema_on(get_connection()).await
}

pub async fn apply_schema_on(conn: &DatabaseConnection) -> Result<()> {
    // Execute each statement separately (SQLite doesn't support execute_batch in sea-orm)
    for (idx, statement) in split_statements(SCHEMA_SQL).into_iter().enumerate() {
        let preview = statement
            .chars()
            .take(60)
            .collect::<String>()
            .replace('\n', " ");
        tracing::debug!("Executing schema statement #{}: {}...", idx, preview);

        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            format!("{};", statement),
        ))
        .await
        .with_context(|| format!("Failed to execute schema statement #{}: {}", idx, preview))?;
    }

    tracing::info!("Database schema is up to date");
    Ok(())
}

/// Ensure admin user exists (create if table is empty)
pub async fn ensure_admin_user_exists() -> Result<()> {
    use crate::system::users::{repository, service};
    use contracts::system::users::CreateUserDto;

    let count = repository::count_users().await?;

    if count == 0 {
        tracing::info!("No users found. Creating default admin user...");

        let admin_dto = CreateUserDto {
            username: "admin".to_string(),
            password: "admin123".to_string(),
            email: None,
            full_name: Some("Administrator".to_string()),
            is_admin: true,
        };

        let admin_id = service::create(admin_dto, None)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create admin user: {}", e))?;

        tracing::warn!("Default admin user created (id {})", admin_id);
        tracing::warn!("Username: admin, password: admin123. Change it after the first sign-in.");
    }

    Ok(())
}

async fn seed<A: AggregateRoot>(items: Vec<A>) -> Result<()> {
    for item in items {
        let record = Record::new(uuid::Uuid::new_v4().to_string(), item, Some("system".into()));
        record_store::insert(&record).await?;
    }
    tracing::info!("Seeded {}", A::list_name());
    Ok(())
}

/// Insert reference data into an empty database so the screens have
/// something to show
pub async fn seed_demo_data() -> Result<()> {
    if record_store::count(Branch::collection_name()).await? > 0 {
        return Ok(());
    }

    seed(vec![
        Branch {
            name: "Gulberg".into(),
            igis_code: "IGLHR001".into(),
            takaful_code: "TKLHR001".into(),
            city: "Lahore".into(),
            phone: "0421234567".into(),
            monthly_target: 2_500_000.0,
            max_agents: 15,
            manager_user_id: None,
        },
        Branch {
            name: "Clifton".into(),
            igis_code: "IGKHI001".into(),
            takaful_code: "TKKHI001".into(),
            city: "Karachi".into(),
            phone: "0215550101".into(),
            monthly_target: 3_000_000.0,
            max_agents: 20,
            manager_user_id: None,
        },
    ])
    .await?;

    seed(vec![
        Product {
            name: "Motor Comprehensive".into(),
            code: "MTR-COMP".into(),
            category: ProductCategory::Motor,
            is_active: true,
        },
        Product {
            name: "Family Health".into(),
            code: "HLT-FAM".into(),
            category: ProductCategory::Health,
            is_active: true,
        },
        Product {
            name: "Travel Shield".into(),
            code: "TRV-SHLD".into(),
            category: ProductCategory::Travel,
            is_active: false,
        },
    ])
    .await?;

    seed(vec![
        Courier {
            name: "TCS".into(),
            code: "TCS".into(),
            tracking_url: Some("https://www.tcsexpress.com/track".into()),
            is_active: true,
        },
        Courier {
            name: "Leopards".into(),
            code: "LCS".into(),
            tracking_url: None,
            is_active: true,
        },
    ])
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_splits_into_statements() {
        let statements = split_statements(SCHEMA_SQL);
        assert_eq!(statements.len(), 10);
        assert!(statements.iter().all(|s| !s.contains("--")));
        assert!(statements[0].starts_with("CREATE TABLE IF NOT EXISTS records"));
    }
}
