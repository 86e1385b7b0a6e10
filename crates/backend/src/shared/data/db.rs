use once_cell::sync::OnceCell;
use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};
use std::path::Path;

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

/// Схема БД (минимальный bootstrap, идемпотентный)
const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS a002_recycling_item (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        image TEXT NOT NULL
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS a001_collection_point (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        image TEXT NOT NULL,
        name TEXT NOT NULL,
        email TEXT NOT NULL,
        whatsapp TEXT NOT NULL,
        latitude REAL NOT NULL,
        longitude REAL NOT NULL,
        city TEXT NOT NULL,
        uf TEXT NOT NULL,
        created_at TEXT NOT NULL
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS a001_collection_point_item (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        point_id INTEGER NOT NULL REFERENCES a001_collection_point(id),
        item_id INTEGER NOT NULL REFERENCES a002_recycling_item(id)
    );
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS idx_a001_point_item_point
        ON a001_collection_point_item(point_id);
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS idx_a001_point_city_uf
        ON a001_collection_point(uf, city);
    "#,
];

/// Open (creating if needed) the SQLite file at `db_file` and apply the schema.
pub async fn connect(db_file: &Path) -> anyhow::Result<DatabaseConnection> {
    if let Some(parent) = db_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if db_file.is_absolute() {
        db_file.to_path_buf()
    } else {
        std::env::current_dir()?.join(db_file)
    };
    // Normalize path separators and ensure proper URL form on Windows
    let normalized = absolute_path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    let db_url = format!("sqlite://{}{}?mode=rwc", prefix, normalized);

    let conn = Database::connect(&db_url).await?;
    for sql in SCHEMA {
        conn.execute(Statement::from_string(DatabaseBackend::Sqlite, sql.to_string()))
            .await?;
    }
    Ok(conn)
}

pub async fn initialize_database(db_file: &Path) -> anyhow::Result<()> {
    tracing::info!("Opening database {}", db_file.display());
    let conn = connect(db_file).await?;
    DB_CONN
        .set(conn)
        .map_err(|_| anyhow::anyhow!("Failed to set DB_CONN"))?;
    Ok(())
}

pub fn get_connection() -> &'static DatabaseConnection {
    DB_CONN
        .get()
        .expect("Database connection has not been initialized")
}

#[cfg(test)]
pub mod test_support {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static NEXT_DB: AtomicUsize = AtomicUsize::new(0);

    /// Fresh database file per test
    pub async fn fresh_connection() -> DatabaseConnection {
        let n = NEXT_DB.fetch_add(1, Ordering::SeqCst);
        let path = std::env::temp_dir().join(format!(
            "ecoleta-test-{}-{}.db",
            std::process::id(),
            n
        ));
        let _ = std::fs::remove_file(&path);
        connect(&path).await.expect("test database")
    }
}
