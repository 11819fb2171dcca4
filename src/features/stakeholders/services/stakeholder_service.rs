use std::collections::HashMap;

use sqlx::types::Json;
use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};

use crate::core::error::{map_db_error, AppError, Result};
use crate::features::stakeholders::dtos::{
    StakeholderExportRowDto, StakeholderQueryParams, StakeholderRequestDto,
    StakeholderResponseDto,
};
use crate::features::stakeholders::models::{Stakeholder, StakeholderExportRow};
use crate::features::tags::dtos::TagRefDto;
use crate::features::tags::models::StakeholderTagRow;

const STAKEHOLDER_COLUMNS: &str = r#"
    s.id, s.provincia_id, s.name, s.contact, s.objectives, s.interests, s.resources,
    s.communication_expectations, s.relations, s.risks, s.linkedin_profile,
    s.created_at, s.updated_at
"#;

/// Service for stakeholder operations
pub struct StakeholderService {
    pool: PgPool,
}

impl StakeholderService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List stakeholders with their tags, ordered by name
    pub async fn list(
        &self,
        params: &StakeholderQueryParams,
    ) -> Result<Vec<StakeholderResponseDto>> {
        let tag_ids = params.tag_ids()?;

        let mut query: QueryBuilder<Postgres> = QueryBuilder::new("SELECT ");
        query.push(STAKEHOLDER_COLUMNS);
        query.push(" FROM stakeholders s WHERE TRUE");

        if let Some(provincia_id) = params.provincia_id {
            query.push(" AND s.provincia_id = ").push_bind(provincia_id);
        }

        if let Some(pattern) = params.search_pattern() {
            query
                .push(" AND LOWER(s.name) LIKE ")
                .push_bind(pattern)
                .push(" ESCAPE '\\'");
        }

        if !tag_ids.is_empty() {
            query
                .push(" AND s.id IN (SELECT stakeholder_id FROM stakeholder_tags")
                .push(" WHERE tag_id = ANY(")
                .push_bind(tag_ids)
                .push("))");
        }

        query.push(" ORDER BY s.name, s.id");

        let stakeholders = query
            .build_query_as::<Stakeholder>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list stakeholders: {:?}", e);
                AppError::Database(e)
            })?;

        self.with_tags(stakeholders).await
    }

    /// List the stakeholders of one provincia; 404 when the provincia is missing
    pub async fn list_by_provincia(
        &self,
        provincia_id: i32,
    ) -> Result<Vec<StakeholderResponseDto>> {
        let mut conn = self.pool.acquire().await.map_err(AppError::Database)?;
        if !provincia_exists(&mut conn, provincia_id).await? {
            return Err(AppError::NotFound(format!(
                "Provincia with id {} not found",
                provincia_id
            )));
        }
        drop(conn);

        let params = StakeholderQueryParams {
            provincia_id: Some(provincia_id),
            ..Default::default()
        };
        self.list(&params).await
    }

    pub async fn get(&self, id: i32) -> Result<StakeholderResponseDto> {
        let query = format!(
            "SELECT {} FROM stakeholders s WHERE s.id = $1",
            STAKEHOLDER_COLUMNS
        );
        let stakeholder = sqlx::query_as::<_, Stakeholder>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?
            .ok_or_else(|| not_found(id))?;

        let mut result = self.with_tags(vec![stakeholder]).await?;
        result.pop().ok_or_else(|| not_found(id))
    }

    /// Create a stakeholder, optionally with an initial tag set
    pub async fn create(&self, dto: StakeholderRequestDto) -> Result<StakeholderResponseDto> {
        let dto = dto.normalized();
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let id = insert_stakeholder(&mut tx, &dto).await?;
        if let Some(tag_ids) = dto.tag_ids.as_deref() {
            replace_tags(&mut tx, id, tag_ids).await?;
        }

        tx.commit().await.map_err(AppError::Database)?;
        tracing::info!("Created stakeholder {} in provincia {}", id, dto.provincia_id);

        self.get(id).await
    }

    /// Overwrite every field of a stakeholder. `tag_ids`, when present,
    /// replaces the tag set; when absent, tags are left alone.
    pub async fn update(
        &self,
        id: i32,
        dto: StakeholderRequestDto,
    ) -> Result<StakeholderResponseDto> {
        let dto = dto.normalized();
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        ensure_provincia(&mut tx, dto.provincia_id).await?;

        let result = sqlx::query(
            r#"
            UPDATE stakeholders
            SET provincia_id = $1,
                name = $2,
                contact = $3,
                objectives = $4,
                interests = $5,
                resources = $6,
                communication_expectations = $7,
                relations = $8,
                risks = $9,
                linkedin_profile = $10,
                updated_at = NOW()
            WHERE id = $11
            "#,
        )
        .bind(dto.provincia_id)
        .bind(&dto.name)
        .bind(Json(&dto.contact))
        .bind(&dto.objectives)
        .bind(&dto.interests)
        .bind(&dto.resources)
        .bind(&dto.communication_expectations)
        .bind(&dto.relations)
        .bind(&dto.risks)
        .bind(Json(&dto.linkedin_profile))
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_db_error(e, "Stakeholder already exists"))?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        if let Some(tag_ids) = dto.tag_ids.as_deref() {
            replace_tags(&mut tx, id, tag_ids).await?;
        }

        tx.commit().await.map_err(AppError::Database)?;
        self.get(id).await
    }

    /// Delete a stakeholder; its tag assignments cascade
    pub async fn delete(&self, id: i32) -> Result<()> {
        let result = sqlx::query("DELETE FROM stakeholders WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        tracing::info!("Deleted stakeholder {}", id);
        Ok(())
    }

    /// Replace the tag set of a stakeholder
    pub async fn set_tags(&self, id: i32, tag_ids: &[i32]) -> Result<StakeholderResponseDto> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let exists =
            sqlx::query_scalar::<_, i32>("SELECT id FROM stakeholders WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(AppError::Database)?;
        if exists.is_none() {
            return Err(not_found(id));
        }

        replace_tags(&mut tx, id, tag_ids).await?;
        tx.commit().await.map_err(AppError::Database)?;

        self.get(id).await
    }

    /// Flat contact rows of the selected stakeholders, for spreadsheet export.
    /// Unknown ids are ignored.
    pub async fn export_rows(&self, ids: &[i32]) -> Result<Vec<StakeholderExportRowDto>> {
        let rows = sqlx::query_as::<_, StakeholderExportRow>(
            r#"
            SELECT s.id, s.name, p.name AS provincia, s.contact,
                   (SELECT STRING_AGG(t.name, ', ' ORDER BY t.name)
                    FROM stakeholder_tags st JOIN tags t ON t.id = st.tag_id
                    WHERE st.stakeholder_id = s.id) AS tags
            FROM stakeholders s
            JOIN provincias p ON p.id = s.provincia_id
            WHERE s.id = ANY($1)
            ORDER BY p.name, s.name, s.id
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to export stakeholders: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Attach tags to each stakeholder with a single join query
    async fn with_tags(
        &self,
        stakeholders: Vec<Stakeholder>,
    ) -> Result<Vec<StakeholderResponseDto>> {
        let ids: Vec<i32> = stakeholders.iter().map(|s| s.id).collect();
        let mut tags = load_tags(&self.pool, &ids).await?;

        Ok(stakeholders
            .into_iter()
            .map(|s| {
                let stakeholder_tags = tags.remove(&s.id).unwrap_or_default();
                StakeholderResponseDto::from_model(s, stakeholder_tags)
            })
            .collect())
    }
}

fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Stakeholder with id {} not found", id))
}

/// Tags of the given stakeholders keyed by stakeholder id, each list ordered by name
async fn load_tags(pool: &PgPool, stakeholder_ids: &[i32]) -> Result<HashMap<i32, Vec<TagRefDto>>> {
    if stakeholder_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = sqlx::query_as::<_, StakeholderTagRow>(
        r#"
        SELECT st.stakeholder_id, st.tag_id, t.name
        FROM stakeholder_tags st
        JOIN tags t ON t.id = st.tag_id
        WHERE st.stakeholder_id = ANY($1)
        ORDER BY t.name
        "#,
    )
    .bind(stakeholder_ids)
    .fetch_all(pool)
    .await
    .map_err(AppError::Database)?;

    let mut grouped: HashMap<i32, Vec<TagRefDto>> = HashMap::new();
    for row in rows {
        grouped
            .entry(row.stakeholder_id)
            .or_default()
            .push(row.into());
    }
    Ok(grouped)
}

async fn provincia_exists(conn: &mut PgConnection, provincia_id: i32) -> Result<bool> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM provincias WHERE id = $1)")
        .bind(provincia_id)
        .fetch_one(conn)
        .await
        .map_err(AppError::Database)
}

async fn ensure_provincia(conn: &mut PgConnection, provincia_id: i32) -> Result<()> {
    if provincia_exists(conn, provincia_id).await? {
        Ok(())
    } else {
        Err(AppError::BadRequest(format!(
            "Provincia with id {} does not exist",
            provincia_id
        )))
    }
}

/// Insert a stakeholder row on the caller's connection, returning its id.
/// The stakeholder must reference an existing provincia.
pub async fn insert_stakeholder(
    conn: &mut PgConnection,
    dto: &StakeholderRequestDto,
) -> Result<i32> {
    ensure_provincia(conn, dto.provincia_id).await?;

    sqlx::query_scalar::<_, i32>(
        r#"
        INSERT INTO stakeholders (
            provincia_id, name, contact, objectives, interests, resources,
            communication_expectations, relations, risks, linkedin_profile
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING id
        "#,
    )
    .bind(dto.provincia_id)
    .bind(&dto.name)
    .bind(Json(&dto.contact))
    .bind(&dto.objectives)
    .bind(&dto.interests)
    .bind(&dto.resources)
    .bind(&dto.communication_expectations)
    .bind(&dto.relations)
    .bind(&dto.risks)
    .bind(Json(&dto.linkedin_profile))
    .fetch_one(conn)
    .await
    .map_err(|e| map_db_error(e, "Stakeholder already exists"))
}

/// Replace a stakeholder's tag set on the caller's connection.
///
/// Every id must name an existing tag; duplicates are collapsed.
pub async fn replace_tags(
    conn: &mut PgConnection,
    stakeholder_id: i32,
    tag_ids: &[i32],
) -> Result<()> {
    let mut unique: Vec<i32> = tag_ids.to_vec();
    unique.sort_unstable();
    unique.dedup();

    if !unique.is_empty() {
        let known = sqlx::query_scalar::<_, i32>("SELECT id FROM tags WHERE id = ANY($1)")
            .bind(&unique)
            .fetch_all(&mut *conn)
            .await
            .map_err(AppError::Database)?;

        let missing: Vec<String> = unique
            .iter()
            .filter(|id| !known.contains(id))
            .map(|id| id.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(AppError::BadRequest(format!(
                "Unknown tag id(s): {}",
                missing.join(", ")
            )));
        }
    }

    sqlx::query("DELETE FROM stakeholder_tags WHERE stakeholder_id = $1")
        .bind(stakeholder_id)
        .execute(&mut *conn)
        .await
        .map_err(AppError::Database)?;

    if !unique.is_empty() {
        sqlx::query(
            r#"
            INSERT INTO stakeholder_tags (stakeholder_id, tag_id)
            SELECT $1, UNNEST($2::int4[])
            "#,
        )
        .bind(stakeholder_id)
        .bind(&unique)
        .execute(&mut *conn)
        .await
        .map_err(AppError::Database)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::stakeholders::models::{ContactInfo, LinkedinProfile};

    async fn seed_provincia(pool: &PgPool, name: &str) -> i32 {
        sqlx::query_scalar::<_, i32>("INSERT INTO provincias (name) VALUES ($1) RETURNING id")
            .bind(name)
            .fetch_one(pool)
            .await
            .unwrap()
    }

    async fn seed_tag(pool: &PgPool, name: &str) -> i32 {
        sqlx::query_scalar::<_, i32>("INSERT INTO tags (name) VALUES ($1) RETURNING id")
            .bind(name)
            .fetch_one(pool)
            .await
            .unwrap()
    }

    fn request(provincia_id: i32, name: &str, tag_ids: Option<Vec<i32>>) -> StakeholderRequestDto {
        StakeholderRequestDto {
            provincia_id,
            name: name.to_string(),
            contact: ContactInfo {
                email: Some(format!("{}@example.org", name.to_lowercase())),
                ..Default::default()
            },
            objectives: Some("Coordinate".to_string()),
            interests: None,
            resources: None,
            communication_expectations: None,
            relations: None,
            risks: None,
            linkedin_profile: LinkedinProfile::default(),
            tag_ids,
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_create_returns_persisted_row(pool: PgPool) {
        let provincia = seed_provincia(&pool, "Azuay").await;
        let tag = seed_tag(&pool, "prensa").await;
        let service = StakeholderService::new(pool);

        let created = service
            .create(request(provincia, "Ana", Some(vec![tag, tag])))
            .await
            .unwrap();

        assert!(created.id > 0);
        assert_eq!(created.provincia_id, provincia);
        assert_eq!(created.tags, vec![TagRefDto { id: tag, name: "prensa".to_string() }]);
        assert_eq!(created.contact.email.as_deref(), Some("ana@example.org"));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_search_treats_wildcards_literally(pool: PgPool) {
        let provincia = seed_provincia(&pool, "Azuay").await;
        let service = StakeholderService::new(pool);
        service
            .create(request(provincia, "Fondo 50%", None))
            .await
            .unwrap();
        service
            .create(request(provincia, "Fondo 500", None))
            .await
            .unwrap();
        service
            .create(request(provincia, "Red_Norte", None))
            .await
            .unwrap();
        service
            .create(request(provincia, "RedXNorte", None))
            .await
            .unwrap();

        let search = |text: &str| StakeholderQueryParams {
            search: Some(text.to_string()),
            ..Default::default()
        };

        let percent = service.list(&search("50%")).await.unwrap();
        assert_eq!(percent.len(), 1);
        assert_eq!(percent[0].name, "Fondo 50%");

        let underscore = service.list(&search("red_")).await.unwrap();
        assert_eq!(underscore.len(), 1);
        assert_eq!(underscore[0].name, "Red_Norte");
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_create_requires_existing_provincia(pool: PgPool) {
        let service = StakeholderService::new(pool);
        let err = service.create(request(999, "Ana", None)).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_update_is_idempotent(pool: PgPool) {
        let provincia = seed_provincia(&pool, "Loja").await;
        let service = StakeholderService::new(pool);
        let created = service.create(request(provincia, "Luis", None)).await.unwrap();

        let first = service
            .update(created.id, request(provincia, "Luis M", None))
            .await
            .unwrap();
        let second = service
            .update(created.id, request(provincia, "Luis M", None))
            .await
            .unwrap();

        assert_eq!(first.name, second.name);
        assert_eq!(first.contact, second.contact);
        assert_eq!(first.tags, second.tags);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_set_tags_rejects_unknown_and_replaces(pool: PgPool) {
        let provincia = seed_provincia(&pool, "Manabí").await;
        let a = seed_tag(&pool, "a").await;
        let b = seed_tag(&pool, "b").await;
        let service = StakeholderService::new(pool);
        let created = service
            .create(request(provincia, "Eva", Some(vec![a])))
            .await
            .unwrap();

        let err = service.set_tags(created.id, &[b, 9999]).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
        // Failed replacement leaves the previous set untouched
        assert_eq!(service.get(created.id).await.unwrap().tags.len(), 1);

        let updated = service.set_tags(created.id, &[b]).await.unwrap();
        assert_eq!(updated.tags.iter().map(|t| t.id).collect::<Vec<_>>(), vec![b]);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_tag_filter_matches_any(pool: PgPool) {
        let provincia = seed_provincia(&pool, "Guayas").await;
        let a = seed_tag(&pool, "a").await;
        let b = seed_tag(&pool, "b").await;
        let service = StakeholderService::new(pool);
        service.create(request(provincia, "Uno", Some(vec![a]))).await.unwrap();
        service.create(request(provincia, "Dos", Some(vec![b]))).await.unwrap();
        service.create(request(provincia, "Tres", None)).await.unwrap();

        let params = StakeholderQueryParams {
            tags: Some(format!("{},{}", a, b)),
            ..Default::default()
        };
        let names: Vec<String> = service
            .list(&params)
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["Dos".to_string(), "Uno".to_string()]);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_delete_removes_tag_assignments(pool: PgPool) {
        let provincia = seed_provincia(&pool, "Pichincha").await;
        let tag = seed_tag(&pool, "x").await;
        let service = StakeholderService::new(pool.clone());
        let created = service
            .create(request(provincia, "Sol", Some(vec![tag])))
            .await
            .unwrap();

        service.delete(created.id).await.unwrap();
        let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM stakeholder_tags")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(remaining, 0);
        assert!(matches!(service.delete(created.id).await.unwrap_err(), AppError::NotFound(_)));
    }
}
