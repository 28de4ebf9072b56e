use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::user::models::AssetUrl;
use crate::domain::user::models::UserId;
use crate::domain::video::errors::VideoError;
use crate::domain::video::models::Video;
use crate::domain::video::models::VideoDuration;
use crate::domain::video::models::VideoId;
use crate::domain::video::models::VideoTitle;
use crate::domain::video::ports::VideoRepository;

pub struct PostgresVideoRepository {
    pool: PgPool,
}

impl PostgresVideoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn database_error(e: sqlx::Error) -> VideoError {
    VideoError::DatabaseError(e.to_string())
}

fn video_from_row(row: &PgRow) -> Result<Video, VideoError> {
    let views: i64 = row.try_get("views").map_err(database_error)?;

    Ok(Video {
        id: VideoId(row.try_get("id").map_err(database_error)?),
        video_file: AssetUrl::new(row.try_get("video_file").map_err(database_error)?)?,
        thumbnail: AssetUrl::new(row.try_get("thumbnail").map_err(database_error)?)?,
        title: VideoTitle::new(row.try_get("title").map_err(database_error)?)?,
        description: row.try_get("description").map_err(database_error)?,
        views: views.max(0) as u64,
        is_published: row.try_get("is_published").map_err(database_error)?,
        duration: VideoDuration::from_secs(row.try_get("duration").map_err(database_error)?)?,
        owner: UserId(row.try_get("owner_id").map_err(database_error)?),
        created_at: row.try_get("created_at").map_err(database_error)?,
        updated_at: row.try_get("updated_at").map_err(database_error)?,
    })
}

#[async_trait]
impl VideoRepository for PostgresVideoRepository {
    async fn create(&self, video: Video) -> Result<Video, VideoError> {
        sqlx::query(
            r#"
            INSERT INTO videos (id, video_file, thumbnail, title, description, views,
                                is_published, duration, owner_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(video.id.0)
        .bind(video.video_file.as_str())
        .bind(video.thumbnail.as_str())
        .bind(video.title.as_str())
        .bind(&video.description)
        .bind(video.views as i64)
        .bind(video.is_published)
        .bind(video.duration.as_secs())
        .bind(video.owner.0)
        .bind(video.created_at)
        .bind(video.updated_at)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(video)
    }

    async fn find_by_id(&self, id: &VideoId) -> Result<Option<Video>, VideoError> {
        let row = sqlx::query(
            r#"
            SELECT id, video_file, thumbnail, title, description, views,
                   is_published, duration, owner_id, created_at, updated_at
            FROM videos
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.as_ref().map(video_from_row).transpose()
    }

    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Video>, VideoError> {
        let rows = sqlx::query(
            r#"
            SELECT id, video_file, thumbnail, title, description, views,
                   is_published, duration, owner_id, created_at, updated_at
            FROM videos
            WHERE owner_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner.0)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        rows.iter().map(video_from_row).collect()
    }

    async fn update(&self, video: Video) -> Result<Video, VideoError> {
        let result = sqlx::query(
            r#"
            UPDATE videos
            SET video_file = $2, thumbnail = $3, title = $4, description = $5,
                is_published = $6, duration = $7, updated_at = $8
            WHERE id = $1
            "#,
        )
        .bind(video.id.0)
        .bind(video.video_file.as_str())
        .bind(video.thumbnail.as_str())
        .bind(video.title.as_str())
        .bind(&video.description)
        .bind(video.is_published)
        .bind(video.duration.as_secs())
        .bind(video.updated_at)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(VideoError::NotFound(video.id.to_string()));
        }

        Ok(video)
    }

    async fn delete(&self, id: &VideoId) -> Result<(), VideoError> {
        let result = sqlx::query(
            r#"
            DELETE FROM videos
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(VideoError::NotFound(id.to_string()));
        }

        Ok(())
    }

    async fn increment_views(&self, id: &VideoId) -> Result<u64, VideoError> {
        let row = sqlx::query(
            r#"
            UPDATE videos
            SET views = views + 1
            WHERE id = $1
            RETURNING views
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?
        .ok_or(VideoError::NotFound(id.to_string()))?;

        let views: i64 = row.try_get("views").map_err(database_error)?;

        Ok(views.max(0) as u64)
    }
}
