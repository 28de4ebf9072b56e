use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;
use uuid::Uuid;

use crate::domain::user::models::AssetUrl;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::FullName;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;
use crate::domain::video::models::VideoId;
use crate::user::errors::UserError;

const SELECT_USER: &str = r#"
    SELECT u.id, u.username, u.email, u.fullname, u.avatar, u.cover_image,
           u.password_hash, u.refresh_token, u.created_at, u.updated_at,
           ARRAY(
               SELECT h.video_id FROM user_watch_history h
               WHERE h.user_id = u.id
               ORDER BY h.id
           ) AS watch_history
    FROM users u
"#;

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_one(
        &self,
        filter: &str,
        value: QueryValue<'_>,
    ) -> Result<Option<User>, UserError> {
        let sql = format!("{} WHERE {} = $1", SELECT_USER, filter);
        let query = sqlx::query(&sql);
        let query = match value {
            QueryValue::Id(id) => query.bind(id),
            QueryValue::Text(text) => query.bind(text),
        };

        let row = query
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        row.as_ref().map(user_from_row).transpose()
    }
}

enum QueryValue<'a> {
    Id(Uuid),
    Text(&'a str),
}

fn user_from_row(row: &PgRow) -> Result<User, UserError> {
    let column_error = |e: sqlx::Error| UserError::DatabaseError(e.to_string());

    let cover_image: Option<String> = row.try_get("cover_image").map_err(column_error)?;
    let watch_history: Vec<Uuid> = row.try_get("watch_history").map_err(column_error)?;

    Ok(User {
        id: UserId(row.try_get("id").map_err(column_error)?),
        username: Username::new(row.try_get("username").map_err(column_error)?)?,
        email: EmailAddress::new(row.try_get("email").map_err(column_error)?)?,
        fullname: FullName::new(row.try_get("fullname").map_err(column_error)?)?,
        avatar: AssetUrl::new(row.try_get("avatar").map_err(column_error)?)?,
        cover_image: cover_image.map(AssetUrl::new).transpose()?,
        watch_history: watch_history.into_iter().map(VideoId).collect(),
        password_hash: row.try_get("password_hash").map_err(column_error)?,
        refresh_token: row.try_get("refresh_token").map_err(column_error)?,
        created_at: row.try_get("created_at").map_err(column_error)?,
        updated_at: row.try_get("updated_at").map_err(column_error)?,
    })
}

fn write_error(e: sqlx::Error, user: &User) -> UserError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            if db_err.constraint() == Some("users_username_key") {
                return UserError::UsernameAlreadyExists(user.username.as_str().to_string());
            }
            if db_err.constraint() == Some("users_email_key") {
                return UserError::EmailAlreadyExists(user.email.as_str().to_string());
            }
        }
    }
    UserError::DatabaseError(e.to_string())
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, username, email, fullname, avatar, cover_image,
                               password_hash, refresh_token, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(user.id.0)
        .bind(user.username.as_str())
        .bind(user.email.as_str())
        .bind(user.fullname.as_str())
        .bind(user.avatar.as_str())
        .bind(user.cover_image.as_ref().map(|c| c.as_str()))
        .bind(&user.password_hash)
        .bind(user.refresh_token.as_deref())
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(e, &user))?;

        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        self.find_one("u.id", QueryValue::Id(id.0)).await
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError> {
        self.find_one("u.username", QueryValue::Text(username.as_str())).await
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        self.find_one("u.email", QueryValue::Text(email.as_str())).await
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET username = $2, email = $3, fullname = $4, avatar = $5, cover_image = $6,
                password_hash = $7, refresh_token = $8, updated_at = $9
            WHERE id = $1
            "#,
        )
        .bind(user.id.0)
        .bind(user.username.as_str())
        .bind(user.email.as_str())
        .bind(user.fullname.as_str())
        .bind(user.avatar.as_str())
        .bind(user.cover_image.as_ref().map(|c| c.as_str()))
        .bind(&user.password_hash)
        .bind(user.refresh_token.as_deref())
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(e, &user))?;

        if result.rows_affected() == 0 {
            return Err(UserError::NotFound(user.id.to_string()));
        }

        Ok(user)
    }

    async fn set_refresh_token(
        &self,
        id: &UserId,
        refresh_token: Option<String>,
    ) -> Result<(), UserError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET refresh_token = $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .bind(refresh_token)
        .execute(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(UserError::NotFound(id.to_string()));
        }

        Ok(())
    }

    async fn rotate_refresh_token(
        &self,
        id: &UserId,
        current: &str,
        next: String,
    ) -> Result<(), UserError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET refresh_token = $3, updated_at = NOW()
            WHERE id = $1 AND refresh_token = $2
            "#,
        )
        .bind(id.0)
        .bind(current)
        .bind(next)
        .execute(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(UserError::RefreshTokenRevoked);
        }

        Ok(())
    }

    async fn push_watch_history(&self, id: &UserId, video_id: &VideoId) -> Result<(), UserError> {
        sqlx::query(
            r#"
            INSERT INTO user_watch_history (user_id, video_id)
            VALUES ($1, $2)
            "#,
        )
        .bind(id.0)
        .bind(video_id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| match e.as_database_error() {
            Some(db_err) if db_err.is_foreign_key_violation() => {
                if db_err.constraint() == Some("user_watch_history_video_id_fkey") {
                    UserError::VideoNotFound(video_id.to_string())
                } else {
                    UserError::NotFound(id.to_string())
                }
            }
            _ => UserError::DatabaseError(e.to_string()),
        })?;

        Ok(())
    }
}
