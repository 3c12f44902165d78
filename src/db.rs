use crate::config::Config;
use crate::snapshot::Snapshot;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use surrealdb::engine::any::{self, Any};
use surrealdb::opt::auth::Root;
use surrealdb::sql::Thing;
use surrealdb::Surreal;
use tracing::{info, warn};

pub type DbConn = Surreal<Any>;

#[derive(Debug, Deserialize)]
struct NamespaceInfo {
    #[serde(default)]
    databases: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct InsertedRecord {
    id: Thing,
}

/// Open the document store, bounded by the configured connect timeout
pub async fn connect(config: &Config) -> Result<DbConn> {
    let endpoint = config.db_endpoint.as_str();
    let db = tokio::time::timeout(config.db_connect_timeout(), any::connect(endpoint))
        .await
        .with_context(|| format!("Timed out connecting to document store at {}", endpoint))?
        .with_context(|| format!("Failed to connect to document store at {}", endpoint))?;

    if let Some((username, password)) = config.db_credentials() {
        db.signin(Root { username, password })
            .await
            .context("Document store sign-in failed")?;
    }

    db.use_ns(config.db_namespace.as_str())
        .use_db(config.db_database.as_str())
        .await?;
    Ok(db)
}

/// Names of the databases defined in the current namespace
pub async fn list_databases(db: &DbConn) -> Result<Vec<String>> {
    let info: Option<NamespaceInfo> = db.query("INFO FOR NS").await?.take(0)?;
    Ok(info
        .map(|info| info.databases.into_keys().collect())
        .unwrap_or_default())
}

/// Insert the whole snapshot as one document and return its record id
pub async fn insert_snapshot(db: &DbConn, collection: &str, snapshot: &Snapshot) -> Result<Thing> {
    let created: Option<InsertedRecord> = db
        .create(collection)
        .content(snapshot.document().clone())
        .await
        .with_context(|| format!("Failed to insert snapshot into {}", collection))?;

    created
        .map(|record| record.id)
        .context("Document store returned no record for the inserted snapshot")
}

/// One-shot persistence run at startup. The returned handle should be kept
/// until shutdown.
pub async fn persist(config: &Config, snapshot: &Snapshot) -> Result<DbConn> {
    let db = connect(config).await?;
    info!("Connected to document store at {}", config.db_endpoint);

    match list_databases(&db).await {
        Ok(names) => info!("Databases in namespace {}: {:?}", config.db_namespace, names),
        Err(e) => warn!("Could not list databases: {:#}", e),
    }

    let id = insert_snapshot(&db, &config.db_collection, snapshot).await?;
    info!("Snapshot stored as {}", id);

    Ok(db)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FeedResponse;
    use crate::snapshot::sample_feed;
    use clap::Parser;

    fn mem_config() -> Config {
        Config::try_parse_from(["covid_gateway", "--db-endpoint", "mem://"]).unwrap()
    }

    #[tokio::test]
    async fn test_persist_inserts_one_document() {
        let config = mem_config();
        let snapshot = Snapshot::new(sample_feed());

        let db = persist(&config, &snapshot).await.unwrap();

        let docs: Vec<FeedResponse> = db.select(config.db_collection.as_str()).await.unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0], sample_feed());
    }

    #[tokio::test]
    async fn test_insert_returns_record_in_collection() {
        let config = mem_config();
        let db = connect(&config).await.unwrap();

        let id = insert_snapshot(&db, "Snapshots", &Snapshot::new(sample_feed()))
            .await
            .unwrap();
        assert_eq!(id.tb, "Snapshots");
    }

    #[tokio::test]
    async fn test_list_databases_sees_inserted_database() {
        let config = mem_config();
        let db = connect(&config).await.unwrap();
        assert!(list_databases(&db).await.unwrap().is_empty());

        insert_snapshot(&db, &config.db_collection, &Snapshot::new(sample_feed()))
            .await
            .unwrap();
        assert_eq!(list_databases(&db).await.unwrap(), vec!["CoronaApp".to_string()]);
    }

    #[tokio::test]
    async fn test_unreachable_store() {
        let config = Config::try_parse_from([
            "covid_gateway",
            "--db-endpoint",
            "ws://127.0.0.1:1",
            "--db-connect-timeout-secs",
            "2",
        ])
        .unwrap();
        assert!(connect(&config).await.is_err());
    }
}
