use std::sync::Arc;

use sqlx::PgPool;

use crate::core::error::{map_db_error, AppError, Result};
use crate::features::provincias::dtos::{
    ProvinciaDocumentDto, ProvinciaRequestDto, ProvinciaResponseDto,
};
use crate::features::provincias::models::{Provincia, ProvinciaWithCount};
use crate::features::stakeholders::dtos::StakeholderResponseDto;
use crate::features::stakeholders::services::{insert_stakeholder, replace_tags};
use crate::features::stakeholders::StakeholderService;
use crate::features::tags::services::find_or_create_by_names;

const PROVINCIA_NAME_TAKEN: &str = "Provincia already exists";

/// Service for provincia operations, including JSON export and import
pub struct ProvinciaService {
    pool: PgPool,
    stakeholders: Arc<StakeholderService>,
}

impl ProvinciaService {
    pub fn new(pool: PgPool, stakeholders: Arc<StakeholderService>) -> Self {
        Self { pool, stakeholders }
    }

    /// List all provincias with stakeholder counts, ordered by name
    pub async fn list(&self) -> Result<Vec<ProvinciaResponseDto>> {
        let provincias = sqlx::query_as::<_, ProvinciaWithCount>(
            r#"
            SELECT p.id, p.name, p.created_at, p.updated_at,
                   COUNT(s.id) AS stakeholder_count
            FROM provincias p
            LEFT JOIN stakeholders s ON s.provincia_id = p.id
            GROUP BY p.id
            ORDER BY p.name, p.id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list provincias: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(provincias.into_iter().map(Into::into).collect())
    }

    pub async fn get(&self, id: i32) -> Result<ProvinciaResponseDto> {
        let provincia = sqlx::query_as::<_, ProvinciaWithCount>(
            r#"
            SELECT p.id, p.name, p.created_at, p.updated_at,
                   (SELECT COUNT(*) FROM stakeholders WHERE provincia_id = p.id) AS stakeholder_count
            FROM provincias p
            WHERE p.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?
        .ok_or_else(|| not_found(id))?;

        Ok(provincia.into())
    }

    pub async fn create(&self, dto: ProvinciaRequestDto) -> Result<ProvinciaResponseDto> {
        let provincia = sqlx::query_as::<_, Provincia>(
            r#"
            INSERT INTO provincias (name)
            VALUES ($1)
            RETURNING id, name, created_at, updated_at
            "#,
        )
        .bind(dto.name.trim())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_db_error(e, PROVINCIA_NAME_TAKEN))?;

        tracing::info!("Created provincia {} ({})", provincia.id, provincia.name);
        Ok(provincia.into())
    }

    /// Rename a provincia
    pub async fn update(&self, id: i32, dto: ProvinciaRequestDto) -> Result<ProvinciaResponseDto> {
        let result = sqlx::query(
            r#"
            UPDATE provincias
            SET name = $1, updated_at = NOW()
            WHERE id = $2
            "#,
        )
        .bind(dto.name.trim())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| map_db_error(e, PROVINCIA_NAME_TAKEN))?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        self.get(id).await
    }

    /// Delete a provincia; its stakeholders and their tag assignments cascade
    pub async fn delete(&self, id: i32) -> Result<()> {
        let result = sqlx::query("DELETE FROM provincias WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        tracing::info!("Deleted provincia {}", id);
        Ok(())
    }

    /// Stakeholders of a provincia with their tags
    pub async fn stakeholders(&self, id: i32) -> Result<Vec<StakeholderResponseDto>> {
        self.stakeholders.list_by_provincia(id).await
    }

    /// Build the portable export document of a provincia
    pub async fn export(&self, id: i32) -> Result<ProvinciaDocumentDto> {
        let provincia = self.get(id).await?;
        let stakeholders = self.stakeholders.list_by_provincia(id).await?;

        tracing::info!(
            "Exporting provincia {} with {} stakeholders",
            id,
            stakeholders.len()
        );
        Ok(ProvinciaDocumentDto::new(provincia.name, stakeholders))
    }

    /// Import an export document as a new provincia.
    ///
    /// All rows are written in one transaction: a document that fails
    /// halfway leaves nothing behind. Tags are matched by name and created
    /// when missing.
    pub async fn import(&self, doc: ProvinciaDocumentDto) -> Result<ProvinciaResponseDto> {
        doc.ensure_supported_version()?;

        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let provincia_id = sqlx::query_scalar::<_, i32>(
            "INSERT INTO provincias (name) VALUES ($1) RETURNING id",
        )
        .bind(doc.provincia.name.trim())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_db_error(e, PROVINCIA_NAME_TAKEN))?;

        for exported in &doc.stakeholders {
            let request = exported.to_request(provincia_id);
            let stakeholder_id = insert_stakeholder(&mut tx, &request).await?;

            if !exported.tags.is_empty() {
                let tag_ids = find_or_create_by_names(&mut tx, &exported.tags).await?;
                replace_tags(&mut tx, stakeholder_id, &tag_ids).await?;
            }
        }

        tx.commit().await.map_err(AppError::Database)?;
        tracing::info!(
            "Imported provincia {} with {} stakeholders",
            provincia_id,
            doc.stakeholders.len()
        );

        self.get(provincia_id).await
    }
}

fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Provincia with id {} not found", id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::provincias::dtos::{ExportedProvinciaDto, ExportedStakeholderDto};
    use crate::features::stakeholders::models::{ContactInfo, LinkedinProfile};

    fn service(pool: PgPool) -> ProvinciaService {
        let stakeholders = Arc::new(StakeholderService::new(pool.clone()));
        ProvinciaService::new(pool, stakeholders)
    }

    fn request(name: &str) -> ProvinciaRequestDto {
        ProvinciaRequestDto {
            name: name.to_string(),
        }
    }

    fn exported(name: &str, tags: &[&str]) -> ExportedStakeholderDto {
        ExportedStakeholderDto {
            name: name.to_string(),
            contact: ContactInfo {
                phone: Some("+593 7 000 000".to_string()),
                ..Default::default()
            },
            objectives: None,
            interests: None,
            resources: None,
            communication_expectations: None,
            relations: None,
            risks: None,
            linkedin_profile: LinkedinProfile::default(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_list_is_ordered_with_counts(pool: PgPool) {
        let service = service(pool.clone());
        let loja = service.create(request("Loja")).await.unwrap();
        service.create(request("Azuay")).await.unwrap();

        sqlx::query("INSERT INTO stakeholders (provincia_id, name) VALUES ($1, 'Ana')")
            .bind(loja.id)
            .execute(&pool)
            .await
            .unwrap();

        let list = service.list().await.unwrap();
        assert_eq!(
            list.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
            vec!["Azuay", "Loja"]
        );
        assert_eq!(list[1].stakeholder_count, 1);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_delete_cascades_to_stakeholders(pool: PgPool) {
        let service = service(pool.clone());
        let provincia = service.create(request("Cañar")).await.unwrap();
        let tag_id: i32 = sqlx::query_scalar("INSERT INTO tags (name) VALUES ('t') RETURNING id")
            .fetch_one(&pool)
            .await
            .unwrap();
        let stakeholder_id: i32 = sqlx::query_scalar(
            "INSERT INTO stakeholders (provincia_id, name) VALUES ($1, 'Ana') RETURNING id",
        )
        .bind(provincia.id)
        .fetch_one(&pool)
        .await
        .unwrap();
        sqlx::query("INSERT INTO stakeholder_tags (stakeholder_id, tag_id) VALUES ($1, $2)")
            .bind(stakeholder_id)
            .bind(tag_id)
            .execute(&pool)
            .await
            .unwrap();

        service.delete(provincia.id).await.unwrap();

        let stakeholders: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM stakeholders")
            .fetch_one(&pool)
            .await
            .unwrap();
        let assignments: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM stakeholder_tags")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!((stakeholders, assignments), (0, 0));
        assert!(matches!(
            service.delete(provincia.id).await.unwrap_err(),
            AppError::NotFound(_)
        ));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_import_creates_provincia_stakeholders_and_tags(pool: PgPool) {
        let service = service(pool.clone());
        sqlx::query("INSERT INTO tags (name) VALUES ('prensa')")
            .execute(&pool)
            .await
            .unwrap();

        let doc = ProvinciaDocumentDto {
            version: 1,
            exported_at: chrono::Utc::now(),
            provincia: ExportedProvinciaDto {
                name: "El Oro".to_string(),
            },
            stakeholders: vec![
                exported("Radio Local", &["prensa", "medios"]),
                exported("Gremio", &[]),
            ],
        };

        let imported = service.import(doc).await.unwrap();
        assert_eq!(imported.name, "El Oro");
        assert_eq!(imported.stakeholder_count, 2);

        let tags: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tags")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(tags, 2);

        let exported = service.export(imported.id).await.unwrap();
        let radio = exported
            .stakeholders
            .iter()
            .find(|s| s.name == "Radio Local")
            .unwrap();
        assert_eq!(radio.tags, vec!["medios", "prensa"]);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_import_rejects_unsupported_version(pool: PgPool) {
        let service = service(pool.clone());
        let doc = ProvinciaDocumentDto {
            version: 99,
            exported_at: chrono::Utc::now(),
            provincia: ExportedProvinciaDto {
                name: "Napo".to_string(),
            },
            stakeholders: vec![],
        };

        assert!(matches!(
            service.import(doc).await.unwrap_err(),
            AppError::BadRequest(_)
        ));
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM provincias")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_stakeholders_of_missing_provincia_is_not_found(pool: PgPool) {
        let service = service(pool);
        assert!(matches!(
            service.stakeholders(404).await.unwrap_err(),
            AppError::NotFound(_)
        ));
        assert!(matches!(
            service.export(404).await.unwrap_err(),
            AppError::NotFound(_)
        ));
    }
}
