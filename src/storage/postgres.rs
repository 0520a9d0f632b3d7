use log::{debug, info};
use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::Connection;
use tokio::runtime::{Builder, Runtime};

use crate::config::DatabaseConfig;
use crate::storage::{IdCardRow, RecordSink};
use crate::utils::PersistError;

pub const CREATE_TABLE_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS id_card_data (
    id              SERIAL PRIMARY KEY,
    type            TEXT NOT NULL,
    name            TEXT,
    father_name     TEXT,
    gender          TEXT,
    dob             DATE,
    pan_number      TEXT,
    aadhaar_number  TEXT,
    uploaded_at     TIMESTAMP NOT NULL
)
"#;

pub const INSERT_SQL: &str = r#"
INSERT INTO id_card_data (type, name, father_name, gender, dob, pan_number, aadhaar_number, uploaded_at)
VALUES ($1, $2, $3, $4, $5, $6, $7, LOCALTIMESTAMP)
"#;

const PROBE_SQL: &str = "SELECT 1 FROM id_card_data LIMIT 1";

/// PostgreSQL store for extracted records.
///
/// Every call opens its own connection and closes it before returning; there
/// is no pool. Calls block on a private single-threaded runtime.
pub struct PgRecordStore {
    options: PgConnectOptions,
    target: String,
    runtime: Runtime,
}

impl PgRecordStore {
    pub fn new(config: &DatabaseConfig) -> Result<Self, PersistError> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(PersistError::Runtime)?;

        let options = PgConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.user)
            .password(&config.password)
            .database(&config.database);

        Ok(PgRecordStore {
            options,
            target: config.to_string(),
            runtime,
        })
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Connect and touch the table once, so bad credentials or a missing
    /// table surface at startup.
    pub fn check_connection(&self) -> Result<(), PersistError> {
        self.runtime.block_on(async {
            let mut conn = self.connect().await?;
            let result = sqlx::query(PROBE_SQL).fetch_optional(&mut conn).await;
            Self::release(conn).await;
            result?;
            Ok::<(), PersistError>(())
        })
    }

    pub fn ensure_schema(&self) -> Result<(), PersistError> {
        self.runtime.block_on(async {
            let mut conn = self.connect().await?;
            let result = sqlx::query(CREATE_TABLE_SQL).execute(&mut conn).await;
            Self::release(conn).await;
            result?;
            info!("Table id_card_data is ready on {}", self.target);
            Ok::<(), PersistError>(())
        })
    }

    async fn connect(&self) -> Result<PgConnection, PersistError> {
        debug!("Connecting to {}", self.target);
        Ok(PgConnection::connect_with(&self.options).await?)
    }

    async fn insert(conn: &mut PgConnection, row: &IdCardRow) -> Result<(), PersistError> {
        let mut tx = conn.begin().await?;

        sqlx::query(INSERT_SQL)
            .bind(row.kind.as_str())
            .bind(row.name.as_str())
            .bind(row.father_name.as_deref())
            .bind(row.gender.as_deref())
            .bind(row.dob)
            .bind(row.pan_number.as_deref())
            .bind(row.aadhaar_number.as_deref())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn release(conn: PgConnection) {
        if let Err(e) = conn.close().await {
            debug!("Error while closing database connection: {}", e);
        }
    }
}

impl RecordSink for PgRecordStore {
    fn store(&self, row: &IdCardRow) -> Result<(), PersistError> {
        self.runtime.block_on(async {
            let mut conn = self.connect().await?;
            let result = Self::insert(&mut conn, row).await;
            Self::release(conn).await;
            result
        })?;

        debug!("Stored {} record for {}", row.kind, row.name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DocumentKind;

    fn unreachable_config() -> DatabaseConfig {
        // Nothing listens on port 1 locally
        DatabaseConfig {
            host: "127.0.0.1".to_string(),
            port: 1,
            ..DatabaseConfig::default()
        }
    }

    #[test]
    fn test_new_does_not_connect() {
        let store = PgRecordStore::new(&unreachable_config()).unwrap();
        assert_eq!(store.target(), "postgres@127.0.0.1:1/ocr_data");
    }

    #[test]
    fn test_unreachable_server_is_a_connection_error() {
        let store = PgRecordStore::new(&unreachable_config()).unwrap();
        let row = IdCardRow {
            kind: DocumentKind::TaxId,
            name: "JOHN SMITH".to_string(),
            father_name: Some("ROBERT SMITH".to_string()),
            gender: None,
            dob: None,
            pan_number: Some("ABCDE1234F".to_string()),
            aadhaar_number: None,
        };

        let err = store.store(&row).unwrap_err();
        assert!(matches!(err, PersistError::Connection(_)), "got {:?}", err);
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_insert_covers_every_column() {
        for column in [
            "type",
            "name",
            "father_name",
            "gender",
            "dob",
            "pan_number",
            "aadhaar_number",
            "uploaded_at",
        ] {
            assert!(INSERT_SQL.contains(column));
            assert!(CREATE_TABLE_SQL.contains(column));
        }
        assert!(INSERT_SQL.contains("$7"));
    }
}
