use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use gcloud_gax::grpc::{Code, Status};
use gcloud_googleapis::spanner::admin::database::v1::{
    CreateDatabaseRequest, GetDatabaseDdlRequest, GetDatabaseRequest, UpdateDatabaseDdlRequest,
};
use gcloud_googleapis::spanner::admin::instance::v1::{
    CreateInstanceRequest, GetInstanceRequest, Instance,
};
use gcloud_spanner::admin::client::Client as AdminClient;
use gcloud_spanner::admin::AdminClientConfig;
use gcloud_spanner::client::{Client, ClientConfig};
use gcloud_spanner::key::Key;
use gcloud_spanner::mutation::{delete, insert_or_update};
use gcloud_spanner::statement::Statement;
use gcloud_spanner::value::CommitTimestamp;
use serde_json::Value as JsonValue;
use std::sync::Arc;

use super::KvStore;
use crate::config::SpannerConfig;

const TABLE: &str = "kv_store";

const CREATE_TABLE_DDL: &str = r#"
CREATE TABLE kv_store (
    id STRING(MAX) NOT NULL,
    data STRING(MAX) NOT NULL,
    created_at TIMESTAMP NOT NULL OPTIONS (allow_commit_timestamp=true),
    updated_at TIMESTAMP NOT NULL OPTIONS (allow_commit_timestamp=true),
) PRIMARY KEY (id)
"#;

/// Key-value store backed by a single Cloud Spanner table
///
/// Rows carry commit timestamps for creation and last update; only the key
/// and the JSON document are exposed through [`KvStore`].
#[derive(Clone)]
pub struct SpannerStore {
    inner: Arc<Client>,
}

impl SpannerStore {
    /// Connect to Spanner, provisioning the instance, database and table
    /// when they don't exist yet.
    ///
    /// The gcloud-spanner library detects `SPANNER_EMULATOR_HOST` and
    /// connects to the emulator when it is set.
    pub async fn from_config(config: &SpannerConfig) -> Result<Self> {
        auto_provision(config).await?;

        let database_path = config.database_path();

        match &config.emulator_host {
            Some(host) => tracing::info!("Connecting to Spanner emulator at: {}", host),
            None => tracing::info!("Connecting to production Spanner"),
        }

        let client = Client::new(&database_path, ClientConfig::default())
            .await
            .context("Failed to create Spanner client")?;

        tracing::info!(
            "Successfully connected to Spanner database: {}",
            database_path
        );

        Ok(Self {
            inner: Arc::new(client),
        })
    }
}

#[async_trait]
impl KvStore for SpannerStore {
    async fn get(&self, key: &str) -> Result<Option<JsonValue>> {
        let id = key.to_string();
        let mut statement = Statement::new(
            "SELECT data FROM kv_store WHERE id = @id"
        );
        statement.add_param("id", &id);

        let mut tx = self.inner
            .single()
            .await
            .context("Failed to create read transaction")?;

        let mut result_set = tx
            .query(statement)
            .await
            .context("Failed to query data from Spanner")?;

        if let Some(row) = result_set.next().await? {
            let data_str: String = row.column_by_name("data")?;
            let data: JsonValue = serde_json::from_str(&data_str)
                .context("Failed to deserialize JSON data")?;

            tracing::debug!("Read key: {}", key);
            Ok(Some(data))
        } else {
            tracing::debug!("Key not found: {}", key);
            Ok(None)
        }
    }

    async fn set(&self, key: &str, value: JsonValue) -> Result<()> {
        let id = key.to_string();
        let data_str = serde_json::to_string(&value)
            .context("Failed to serialize JSON data")?;

        // created_at is rewritten on every upsert; a mutation can't keep the old value
        let mutation = insert_or_update(
            TABLE,
            &["id", "data", "created_at", "updated_at"],
            &[&id, &data_str, &CommitTimestamp::new(), &CommitTimestamp::new()],
        );

        self.inner
            .apply(vec![mutation])
            .await
            .context("Failed to upsert data to Spanner")?;

        tracing::debug!("Upserted key: {}", key);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let id = key.to_string();
        let mutation = delete(TABLE, Key::new(&id));

        self.inner
            .apply(vec![mutation])
            .await
            .context("Failed to delete data from Spanner")?;

        tracing::debug!("Deleted key: {}", key);
        Ok(())
    }

    async fn scan_prefix(&self, prefix: &str) -> Result<Vec<(String, JsonValue)>> {
        let prefix_param = prefix.to_string();
        let mut statement = Statement::new(
            "SELECT id, data FROM kv_store WHERE STARTS_WITH(id, @prefix) ORDER BY id ASC"
        );
        statement.add_param("prefix", &prefix_param);

        let mut tx = self.inner
            .single()
            .await
            .context("Failed to create read transaction for scan")?;

        let mut result_set = tx
            .query(statement)
            .await
            .context("Failed to execute scan query")?;

        let mut entries = Vec::new();
        while let Some(row) = result_set.next().await? {
            let key: String = row.column_by_name("id")?;
            let data_str: String = row.column_by_name("data")?;
            let value: JsonValue = serde_json::from_str(&data_str)
                .context("Failed to deserialize JSON data")?;
            entries.push((key, value));
        }

        tracing::debug!("Scanned {} entries with prefix: {}", entries.len(), prefix);
        Ok(entries)
    }

    /// Executes `SELECT 1` to confirm the session is alive
    async fn health_check(&self) -> Result<()> {
        let statement = Statement::new("SELECT 1");

        let mut tx = self.inner
            .single()
            .await
            .context("Failed to create health check transaction")?;

        let mut result_set = tx
            .query(statement)
            .await
            .context("Failed to execute health check query")?;

        if result_set.next().await?.is_some() {
            tracing::debug!("Health check query succeeded");
            Ok(())
        } else {
            Err(anyhow::anyhow!("Health check query returned no results"))
        }
    }
}

/// Create the configured instance, database and table if they are missing
///
/// Enables zero-setup local development against the emulator.
async fn auto_provision(config: &SpannerConfig) -> Result<()> {
    tracing::info!("Starting auto-provisioning checks...");

    let admin_client = AdminClient::new(AdminClientConfig::default())
        .await
        .context("Failed to create Spanner admin client")?;

    ensure_instance_exists(&admin_client, config).await?;
    ensure_database_exists(&admin_client, config).await?;
    ensure_table_exists(&admin_client, &config.database_path()).await?;

    tracing::info!("Auto-provisioning complete");
    Ok(())
}

/// `Ok(true)` if the lookup succeeded, `Ok(false)` on NOT_FOUND
fn found<T>(lookup: std::result::Result<T, Status>, what: &str) -> Result<bool> {
    match lookup {
        Ok(_) => Ok(true),
        Err(status) if status.code() == Code::NotFound => Ok(false),
        Err(status) => bail!("Failed to check {} existence: {}", what, status.message()),
    }
}

async fn ensure_instance_exists(admin_client: &AdminClient, config: &SpannerConfig) -> Result<()> {
    let project_path = format!("projects/{}", config.project);
    let instance_path = format!("{}/instances/{}", project_path, config.instance);

    let lookup = admin_client
        .instance()
        .get_instance(
            GetInstanceRequest {
                name: instance_path.clone(),
                field_mask: None,
            },
            None,
        )
        .await;
    if found(lookup, "instance")? {
        tracing::info!("Instance already exists: {}", instance_path);
        return Ok(());
    }

    tracing::info!("Instance not found, creating: {}", instance_path);

    let instance_config = match config.emulator_host {
        Some(_) => format!("{}/instanceConfigs/emulator-config", project_path),
        None => format!("{}/instanceConfigs/regional-us-central1", project_path),
    };

    let create_request = CreateInstanceRequest {
        parent: project_path,
        instance_id: config.instance.clone(),
        instance: Some(Instance {
            name: instance_path.clone(),
            config: instance_config,
            display_name: format!("{} instance", config.instance),
            node_count: 1,
            ..Default::default()
        }),
    };

    admin_client
        .instance()
        .create_instance(create_request, None)
        .await
        .context("Failed to start instance creation")?
        .wait(None)
        .await
        .context("Failed to create instance")?;

    tracing::info!("Instance created successfully: {}", instance_path);
    Ok(())
}

async fn ensure_database_exists(admin_client: &AdminClient, config: &SpannerConfig) -> Result<()> {
    let database_path = config.database_path();

    let lookup = admin_client
        .database()
        .get_database(
            GetDatabaseRequest {
                name: database_path.clone(),
            },
            None,
        )
        .await;
    if found(lookup, "database")? {
        tracing::info!("Database already exists: {}", database_path);
        return Ok(());
    }

    tracing::info!("Database not found, creating: {}", database_path);

    let create_request = CreateDatabaseRequest {
        parent: format!("projects/{}/instances/{}", config.project, config.instance),
        create_statement: format!("CREATE DATABASE `{}`", config.database),
        extra_statements: vec![],
        encryption_config: None,
        database_dialect: 1, // Google Standard SQL
        proto_descriptors: vec![],
    };

    admin_client
        .database()
        .create_database(create_request, None)
        .await
        .context("Failed to start database creation")?
        .wait(None)
        .await
        .context("Failed to create database")?;

    tracing::info!("Database created successfully: {}", database_path);
    Ok(())
}

async fn ensure_table_exists(admin_client: &AdminClient, database_path: &str) -> Result<()> {
    let ddl = admin_client
        .database()
        .get_database_ddl(
            GetDatabaseDdlRequest {
                database: database_path.to_string(),
            },
            None,
        )
        .await
        .context("Failed to get database DDL")?
        .into_inner();

    let table_exists = ddl.statements.iter().any(|stmt| {
        stmt.contains(&format!("CREATE TABLE {} ", TABLE))
            || stmt.contains(&format!("CREATE TABLE `{}`", TABLE))
    });
    if table_exists {
        tracing::info!("Table '{}' already exists", TABLE);
        return Ok(());
    }

    tracing::info!("Table '{}' not found, creating...", TABLE);

    let update_request = UpdateDatabaseDdlRequest {
        database: database_path.to_string(),
        statements: vec![CREATE_TABLE_DDL.trim().to_string()],
        operation_id: String::new(),
        proto_descriptors: vec![],
        throughput_mode: false,
    };

    admin_client
        .database()
        .update_database_ddl(update_request, None)
        .await
        .context("Failed to start table creation")?
        .wait(None)
        .await
        .context("Failed to create table")?;

    tracing::info!("Table '{}' created successfully", TABLE);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use uuid::Uuid;

    fn emulator_config(name: &str) -> SpannerConfig {
        unsafe {
            std::env::set_var("SPANNER_EMULATOR_HOST", "localhost:9010");
        }

        SpannerConfig {
            emulator_host: Some("localhost:9010".to_string()),
            project: "test-project".to_string(),
            instance: format!("{}-instance", name),
            database: format!("{}-db", name),
        }
    }

    #[test]
    fn test_store_is_clonable() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<SpannerStore>();
    }

    #[test]
    fn test_store_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SpannerStore>();
    }

    #[tokio::test]
    #[ignore = "requires a running Spanner emulator"]
    async fn test_auto_provisioning_idempotent() {
        let config = emulator_config("idempotent-test");

        SpannerStore::from_config(&config)
            .await
            .expect("First provisioning should succeed");
        SpannerStore::from_config(&config)
            .await
            .expect("Second provisioning should succeed");
    }

    #[tokio::test]
    #[ignore = "requires a running Spanner emulator"]
    async fn test_set_get_delete() {
        let store = SpannerStore::from_config(&emulator_config("crud-test"))
            .await
            .expect("Failed to create Spanner store");

        let key = format!("todo:{}", Uuid::new_v4());
        let value = json!({"title": "buy milk", "completed": false});

        store.set(&key, value.clone()).await.unwrap();
        assert_eq!(store.get(&key).await.unwrap(), Some(value));

        let updated = json!({"title": "buy milk", "completed": true});
        store.set(&key, updated.clone()).await.unwrap();
        assert_eq!(store.get(&key).await.unwrap(), Some(updated));

        store.delete(&key).await.unwrap();
        assert_eq!(store.get(&key).await.unwrap(), None);

        // deleting again is a no-op
        store.delete(&key).await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires a running Spanner emulator"]
    async fn test_scan_prefix() {
        let store = SpannerStore::from_config(&emulator_config("scan-test"))
            .await
            .expect("Failed to create Spanner store");

        let prefix = format!("{}:", Uuid::new_v4());
        store.set(&format!("{}b", prefix), json!(2)).await.unwrap();
        store.set(&format!("{}a", prefix), json!(1)).await.unwrap();
        store.set("unrelated", json!(0)).await.unwrap();

        let entries = store.scan_prefix(&prefix).await.unwrap();
        assert_eq!(
            entries,
            vec![
                (format!("{}a", prefix), json!(1)),
                (format!("{}b", prefix), json!(2)),
            ]
        );
    }

    #[tokio::test]
    #[ignore = "requires a running Spanner emulator"]
    async fn test_health_check() {
        let store = SpannerStore::from_config(&emulator_config("health-test"))
            .await
            .expect("Failed to create Spanner store");

        assert!(store.health_check().await.is_ok());
    }
}
