use sqlx::{PgConnection, PgPool};

use crate::core::error::{map_db_error, AppError, Result};
use crate::features::tags::dtos::{TagRequestDto, TagResponseDto};
use crate::features::tags::models::{Tag, TagWithUsage};

const TAG_NAME_TAKEN: &str = "Tag name already exists";

/// Service for tag operations
pub struct TagService {
    pool: PgPool,
}

impl TagService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List all tags with usage counts, ordered by name
    pub async fn list(&self) -> Result<Vec<TagResponseDto>> {
        let tags = sqlx::query_as::<_, TagWithUsage>(
            r#"
            SELECT t.id, t.name, t.created_at, COUNT(st.stakeholder_id) AS stakeholder_count
            FROM tags t
            LEFT JOIN stakeholder_tags st ON st.tag_id = t.id
            GROUP BY t.id
            ORDER BY t.name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list tags: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(tags.into_iter().map(Into::into).collect())
    }

    pub async fn create(&self, dto: TagRequestDto) -> Result<TagResponseDto> {
        let tag = sqlx::query_as::<_, Tag>(
            r#"
            INSERT INTO tags (name)
            VALUES ($1)
            RETURNING id, name, created_at
            "#,
        )
        .bind(dto.name.trim())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_db_error(e, TAG_NAME_TAKEN))?;

        tracing::info!("Created tag {} ({})", tag.id, tag.name);
        Ok(tag.into())
    }

    /// Rename a tag
    pub async fn update(&self, id: i32, dto: TagRequestDto) -> Result<TagResponseDto> {
        let tag = sqlx::query_as::<_, TagWithUsage>(
            r#"
            UPDATE tags
            SET name = $1
            WHERE id = $2
            RETURNING id, name, created_at,
                      (SELECT COUNT(*) FROM stakeholder_tags WHERE tag_id = $2) AS stakeholder_count
            "#,
        )
        .bind(dto.name.trim())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_error(e, TAG_NAME_TAKEN))?
        .ok_or_else(|| AppError::NotFound(format!("Tag with id {} not found", id)))?;

        Ok(tag.into())
    }

    /// Delete a tag; its stakeholder assignments cascade
    pub async fn delete(&self, id: i32) -> Result<()> {
        let result = sqlx::query("DELETE FROM tags WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Tag with id {} not found", id)));
        }

        tracing::info!("Deleted tag {}", id);
        Ok(())
    }
}

/// Resolve tag names to ids, creating the missing ones.
///
/// Runs on the caller's connection so it can take part in a transaction.
/// Blank names are skipped and duplicates collapse to one id.
pub async fn find_or_create_by_names(
    conn: &mut PgConnection,
    names: &[String],
) -> Result<Vec<i32>> {
    let mut ids = Vec::with_capacity(names.len());

    for name in names.iter().map(|n| n.trim()).filter(|n| !n.is_empty()) {
        // The no-op update makes RETURNING yield the existing row on conflict
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO tags (name)
            VALUES ($1)
            ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
            RETURNING id
            "#,
        )
        .bind(name)
        .fetch_one(&mut *conn)
        .await
        .map_err(AppError::Database)?;

        if !ids.contains(&id) {
            ids.push(id);
        }
    }

    Ok(ids)
}
