use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{postgres::PgRow, PgPool, Postgres, Row, Transaction};

use crate::{
    domain::{
        errors::{ImageError, ImageResult},
        models::{Image, ImageMetadata, ImageStatus, ImageType},
        value_objects::{ImageId, ImagePath},
    },
    ports::repositories::ImageRepository,
};

/// SQL-based implementation of ImageRepository using PostgreSQL
#[derive(Clone)]
pub struct SqlImageRepository {
    pool: PgPool,
}

impl SqlImageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Initialize database tables
    pub async fn migrate(&self) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS images (
                id TEXT PRIMARY KEY,
                path TEXT NOT NULL UNIQUE,
                image_type TEXT NOT NULL,
                status TEXT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL,
                updated_at TIMESTAMPTZ NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_images_image_type ON images(image_type)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn write(tx: &mut Transaction<'_, Postgres>, image: &Image) -> ImageResult<Image> {
        let stored = match image.id() {
            Some(_) => image.clone(),
            None => image.clone().with_id(ImageId::generate()),
        };
        let metadata = stored.metadata();

        // An id without a row is inserted, matching the in-memory repository
        sqlx::query(
            r#"
            INSERT INTO images (id, path, image_type, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id) DO UPDATE
            SET path = EXCLUDED.path, status = EXCLUDED.status, updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(stored.id().map(ImageId::as_str))
        .bind(stored.path().as_str())
        .bind(metadata.image_type.as_str())
        .bind(stored.status().as_str())
        .bind(metadata.created_at)
        .bind(metadata.updated_at)
        .execute(&mut **tx)
        .await
        .map_err(|e| db_error("saving image", e))?;

        Ok(stored)
    }
}

fn db_error(action: &str, err: sqlx::Error) -> ImageError {
    ImageError::Persistence {
        message: format!("Database error {}: {}", action, err),
    }
}

/// Map a row of the `images` table back to the aggregate
fn image_from_row(row: &PgRow) -> ImageResult<Image> {
    let id: String = row.get("id");
    let path: String = row.get("path");
    let image_type: String = row.get("image_type");
    let status: String = row.get("status");
    let created_at: DateTime<Utc> = row.get("created_at");
    let updated_at: DateTime<Utc> = row.get("updated_at");

    let image_type: ImageType = image_type.parse()?;
    Ok(Image::restore(
        ImageId::of(id)?,
        ImagePath::of(path)?,
        ImageMetadata::restore(image_type, created_at, updated_at),
        status.parse::<ImageStatus>()?,
    ))
}

const SELECT_IMAGES: &str =
    "SELECT id, path, image_type, status, created_at, updated_at FROM images";

#[async_trait]
impl ImageRepository for SqlImageRepository {
    async fn save(&self, image: &Image) -> ImageResult<Image> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("opening transaction", e))?;
        let stored = Self::write(&mut tx, image).await?;
        tx.commit()
            .await
            .map_err(|e| db_error("committing transaction", e))?;
        Ok(stored)
    }

    async fn save_all(&self, images: &[Image]) -> ImageResult<Vec<Image>> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("opening transaction", e))?;

        let mut stored = Vec::with_capacity(images.len());
        for image in images {
            // Dropping `tx` on error rolls the batch back
            stored.push(Self::write(&mut tx, image).await?);
        }

        tx.commit()
            .await
            .map_err(|e| db_error("committing transaction", e))?;
        Ok(stored)
    }

    async fn find_by_path(&self, path: &str) -> ImageResult<Option<Image>> {
        let row = sqlx::query(&format!("{} WHERE path = $1", SELECT_IMAGES))
            .bind(path)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("retrieving image", e))?;

        row.as_ref().map(image_from_row).transpose()
    }

    async fn find_by_id(&self, id: &ImageId) -> ImageResult<Option<Image>> {
        let row = sqlx::query(&format!("{} WHERE id = $1", SELECT_IMAGES))
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("retrieving image", e))?;

        row.as_ref().map(image_from_row).transpose()
    }

    async fn find_by_type(&self, image_type: ImageType) -> ImageResult<Vec<Image>> {
        let rows = sqlx::query(&format!(
            "{} WHERE image_type = $1 ORDER BY created_at",
            SELECT_IMAGES
        ))
        .bind(image_type.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("listing images", e))?;

        rows.iter().map(image_from_row).collect()
    }

    async fn exists_by_path(&self, path: &str) -> ImageResult<bool> {
        let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM images WHERE path = $1) AS found")
            .bind(path)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("checking image", e))?;

        Ok(row.get("found"))
    }
}
