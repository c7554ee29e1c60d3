//! Publication store gateway
//!
//! The only place that talks to the store. Every operation returns an
//! explicit `Result`, including the list path.

use crate::db::models::*;
use crate::db::DbPool;
use crate::errors::{AppError, Result};
use crate::metrics::{self, StoreTimer};
use chrono::{Datelike, Utc};
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder};
use uuid::Uuid;

/// Repository for publication records
#[derive(Clone)]
pub struct Repository {
    pool: DbPool,
}

impl Repository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> &DatabaseConnection {
        self.pool.conn()
    }

    /// Ping the database
    pub async fn ping(&self) -> Result<()> {
        self.pool.ping().await
    }

    /// All publications, newest first
    pub async fn list_publications(&self) -> Result<Vec<Publication>> {
        let timer = StoreTimer::start("list");

        let result = PublicationEntity::find()
            .order_by_desc(PublicationColumn::CreatedAt)
            .all(self.conn())
            .await;

        timer.finish(result.is_ok());
        result.map_err(AppError::StoreRead)
    }

    /// Persist a client-supplied publication
    pub async fn create_publication(&self, input: PublicationInput) -> Result<Publication> {
        let publication = self.insert(input, "create").await.map_err(AppError::StoreWrite)?;

        metrics::record_created();
        tracing::info!(
            publication_id = %publication.id,
            "Publication created"
        );

        Ok(publication)
    }

    /// Remove a publication by id.
    ///
    /// Returns whether a record was removed; a missing record is not an
    /// error. Only a malformed id or a store fault fails.
    pub async fn delete_publication(&self, id: &str) -> Result<bool> {
        let id = Uuid::parse_str(id).map_err(|_| AppError::InvalidId { id: id.to_string() })?;

        let timer = StoreTimer::start("delete");
        let result = PublicationEntity::delete_by_id(id).exec(self.conn()).await;
        timer.finish(result.is_ok());

        let removed = result.map_err(AppError::StoreDelete)?.rows_affected > 0;

        if removed {
            metrics::record_deleted();
        }
        tracing::info!(
            publication_id = %id,
            removed,
            "Publication delete processed"
        );

        Ok(removed)
    }

    /// Persist placeholder metadata for a DOI.
    ///
    /// No external resolution is performed; the record depends only on the
    /// DOI string and the current year.
    pub async fn import_by_doi(&self, doi: Option<&str>) -> Result<Publication> {
        let doi = match doi {
            Some(doi) if !doi.is_empty() => doi,
            _ => {
                return Err(AppError::MissingParameter {
                    field: "doi".to_string(),
                })
            }
        };

        let input = PublicationInput::placeholder_for_doi(doi, Utc::now().year());
        let publication = self.insert(input, "import").await.map_err(AppError::ImportWrite)?;

        metrics::record_imported();
        tracing::info!(
            publication_id = %publication.id,
            doi = %doi,
            "Publication imported from DOI"
        );

        Ok(publication)
    }

    async fn insert(
        &self,
        input: PublicationInput,
        operation: &'static str,
    ) -> std::result::Result<Publication, DbErr> {
        let timer = StoreTimer::start(operation);

        let result = input
            .into_record(Uuid::new_v4(), Utc::now())
            .insert(self.conn())
            .await;

        timer.finish(result.is_ok());
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory_pool;
    use chrono::TimeZone;
    use sea_orm::ConnectionTrait;

    fn study() -> PublicationInput {
        PublicationInput {
            title: Some("A Study".into()),
            authors: Some("X".into()),
            year: Some("2023".into()),
            kind: Some("Journal".into()),
            doi: Some("10.1/a".into()),
            summary: None,
        }
    }

    #[tokio::test]
    async fn test_create_then_list_round_trip() {
        let repo = Repository::new(memory_pool().await);

        let created = repo.create_publication(study()).await.unwrap();
        assert_eq!(created.title.as_deref(), Some("A Study"));
        assert_eq!(created.doi.as_deref(), Some("10.1/a"));
        assert!(created.summary.is_none());

        let all = repo.list_publications().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0], created);
    }

    #[tokio::test]
    async fn test_list_empty() {
        let repo = Repository::new(memory_pool().await);
        assert!(repo.list_publications().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let repo = Repository::new(memory_pool().await);
        let at = |day| Utc.with_ymd_and_hms(2024, 1, day, 12, 0, 0).unwrap();

        for (day, title) in [(2, "B"), (1, "A"), (3, "C")] {
            PublicationInput { title: Some(title.into()), ..Default::default() }
                .into_record(Uuid::new_v4(), at(day))
                .insert(repo.conn())
                .await
                .unwrap();
        }

        let titles: Vec<_> = repo
            .list_publications()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.title.unwrap())
            .collect();
        assert_eq!(titles, ["C", "B", "A"]);
    }

    #[tokio::test]
    async fn test_delete_existing_and_missing() {
        let repo = Repository::new(memory_pool().await);
        let created = repo.create_publication(study()).await.unwrap();

        assert!(repo.delete_publication(&created.id.to_string()).await.unwrap());
        assert!(repo.list_publications().await.unwrap().is_empty());

        // Second delete of the same id still succeeds
        assert!(!repo.delete_publication(&created.id.to_string()).await.unwrap());
        assert!(!repo.delete_publication(&Uuid::new_v4().to_string()).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_malformed_id() {
        let repo = Repository::new(memory_pool().await);
        let err = repo.delete_publication("not-a-uuid").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidId { .. }));
    }

    #[tokio::test]
    async fn test_import_by_doi() {
        let repo = Repository::new(memory_pool().await);

        let imported = repo.import_by_doi(Some("10.1/xyz")).await.unwrap();
        assert_eq!(imported.doi.as_deref(), Some("10.1/xyz"));
        assert_eq!(imported.kind.as_deref(), Some(PLACEHOLDER_TYPE));
        assert_eq!(imported.year, Some(Utc::now().year().to_string()));
        assert!(imported.title.as_deref().unwrap().contains("10.1/xyz"));

        let all = repo.list_publications().await.unwrap();
        assert_eq!(all, vec![imported]);
    }

    #[tokio::test]
    async fn test_import_without_doi_persists_nothing() {
        let repo = Repository::new(memory_pool().await);

        let err = repo.import_by_doi(None).await.unwrap_err();
        assert!(matches!(err, AppError::MissingParameter { .. }));
        let err = repo.import_by_doi(Some("")).await.unwrap_err();
        assert!(matches!(err, AppError::MissingParameter { .. }));

        assert!(repo.list_publications().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_store_faults_are_explicit() {
        let pool = memory_pool().await;
        pool.conn()
            .execute_unprepared("DROP TABLE publications")
            .await
            .unwrap();
        let repo = Repository::new(pool);

        assert!(matches!(repo.list_publications().await, Err(AppError::StoreRead(_))));
        assert!(matches!(repo.create_publication(study()).await, Err(AppError::StoreWrite(_))));
        assert!(matches!(
            repo.import_by_doi(Some("10.1/a")).await,
            Err(AppError::ImportWrite(_))
        ));
        assert!(matches!(
            repo.delete_publication(&Uuid::new_v4().to_string()).await,
            Err(AppError::StoreDelete(_))
        ));
    }
}
