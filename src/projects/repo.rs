use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// Portfolio project record. Serialized directly to clients; the wire names
/// follow the public API (`isFeatured`, `createdAt`, `updatedAt`).
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Project {
    pub id: Uuid,
    pub image_url: String,
    pub title: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub demo_url: String,
    pub repo_url: String,
    #[serde(rename = "isFeatured")]
    pub is_featured: bool,
    #[serde(rename = "createdAt", with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(rename = "updatedAt", with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// The writable fields, already validated by the handler.
#[derive(Debug)]
pub struct ProjectFields<'a> {
    pub image_url: &'a str,
    pub title: &'a str,
    pub description: &'a str,
    pub technologies: &'a [String],
}

const COLUMNS: &str = "id, image_url, title, description, technologies, \
                       demo_url, repo_url, is_featured, created_at, updated_at";

/// All projects, newest first.
pub async fn list(db: &PgPool) -> anyhow::Result<Vec<Project>> {
    let rows = sqlx::query_as::<_, Project>(&format!(
        "SELECT {COLUMNS} FROM projects ORDER BY created_at DESC"
    ))
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn get(db: &PgPool, id: Uuid) -> anyhow::Result<Option<Project>> {
    let row = sqlx::query_as::<_, Project>(&format!(
        "SELECT {COLUMNS} FROM projects WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

pub async fn create(db: &PgPool, fields: &ProjectFields<'_>) -> anyhow::Result<Project> {
    let row = sqlx::query_as::<_, Project>(&format!(
        r#"
        INSERT INTO projects (image_url, title, description, technologies)
        VALUES ($1, $2, $3, $4)
        RETURNING {COLUMNS}
        "#
    ))
    .bind(fields.image_url)
    .bind(fields.title)
    .bind(fields.description)
    .bind(fields.technologies)
    .fetch_one(db)
    .await?;
    Ok(row)
}

/// Atomic find-and-update; `None` means no such project. "Absent" and
/// "updated" are mutually exclusive outcomes even under concurrent deletes.
pub async fn update(
    db: &PgPool,
    id: Uuid,
    fields: &ProjectFields<'_>,
) -> anyhow::Result<Option<Project>> {
    let row = sqlx::query_as::<_, Project>(&format!(
        r#"
        UPDATE projects
        SET image_url = $2, title = $3, description = $4, technologies = $5,
            updated_at = now()
        WHERE id = $1
        RETURNING {COLUMNS}
        "#
    ))
    .bind(id)
    .bind(fields.image_url)
    .bind(fields.title)
    .bind(fields.description)
    .bind(fields.technologies)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

/// Atomic find-and-delete; false means no such project.
pub async fn delete(db: &PgPool, id: Uuid) -> anyhow::Result<bool> {
    let result = sqlx::query("DELETE FROM projects WHERE id = $1")
        .bind(id)
        .execute(db)
        .await?;
    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_wire_names() {
        let project = Project {
            id: Uuid::new_v4(),
            image_url: "https://img.example/p.png".into(),
            title: "Portfolio".into(),
            description: "My site".into(),
            technologies: vec!["rust".into(), "axum".into()],
            demo_url: String::new(),
            repo_url: String::new(),
            is_featured: false,
            created_at: OffsetDateTime::UNIX_EPOCH,
            updated_at: OffsetDateTime::UNIX_EPOCH,
        };
        let json = serde_json::to_string(&project).unwrap();
        assert!(json.contains("\"isFeatured\":false"));
        assert!(json.contains("\"createdAt\":"));
        assert!(json.contains("\"updatedAt\":"));
        assert!(json.contains("\"technologies\":[\"rust\",\"axum\"]"));
    }
}
