mod common;

use chrono::Duration;
use chrono::Utc;
use common::TestDb;
use videotube::domain::user::errors::UserError;
use videotube::domain::user::models::AssetUrl;
use videotube::domain::user::models::EmailAddress;
use videotube::domain::user::models::FullName;
use videotube::domain::user::models::User;
use videotube::domain::user::models::UserId;
use videotube::domain::user::models::Username;
use videotube::domain::user::ports::UserRepository;
use videotube::domain::video::errors::VideoError;
use videotube::domain::video::models::Video;
use videotube::domain::video::models::VideoDuration;
use videotube::domain::video::models::VideoId;
use videotube::domain::video::models::VideoTitle;
use videotube::domain::video::ports::VideoRepository;
use videotube::outbound::repositories::PostgresUserRepository;
use videotube::outbound::repositories::PostgresVideoRepository;

fn user(username: &str) -> User {
    let now = Utc::now();
    User {
        id: UserId::new(),
        username: Username::new(username.to_string()).expect("Invalid username"),
        email: EmailAddress::new(format!("{}@example.com", username)).expect("Invalid email"),
        fullname: FullName::new("Test User".to_string()).expect("Invalid full name"),
        avatar: AssetUrl::new("https://cdn.example.com/avatar.png".to_string())
            .expect("Invalid avatar"),
        cover_image: None,
        watch_history: Vec::new(),
        password_hash: "$argon2id$v=19$m=1024,t=1,p=1$c2FsdHNhbHQ$aGFzaGhhc2g".to_string(),
        refresh_token: None,
        created_at: now,
        updated_at: now,
    }
}

fn video(owner: UserId, title: &str, age_minutes: i64) -> Video {
    let created_at = Utc::now() - Duration::minutes(age_minutes);
    Video {
        id: VideoId::new(),
        video_file: AssetUrl::new("https://cdn.example.com/video.mp4".to_string())
            .expect("Invalid video file"),
        thumbnail: AssetUrl::new("https://cdn.example.com/thumb.jpg".to_string())
            .expect("Invalid thumbnail"),
        title: VideoTitle::new(title.to_string()).expect("Invalid title"),
        description: "A video about things".to_string(),
        views: 0,
        is_published: true,
        duration: VideoDuration::from_secs(93.5).expect("Invalid duration"),
        owner,
        created_at,
        updated_at: created_at,
    }
}

#[tokio::test]
async fn test_create_and_find_user() {
    let test_database = TestDb::new().await;
    let users = PostgresUserRepository::new(test_database.pool.clone());

    let created = users
        .create(user("john_doe"))
        .await
        .expect("Failed to create user");

    let by_id = users
        .find_by_id(&created.id)
        .await
        .expect("Failed to get user")
        .expect("User not found");
    assert_eq!(by_id.username.as_str(), "john_doe");
    assert_eq!(by_id.password_hash, created.password_hash);
    assert!(by_id.watch_history.is_empty());
    assert!(by_id.refresh_token.is_none());

    let by_username = users
        .find_by_username(&created.username)
        .await
        .expect("Failed to get user");
    assert_eq!(by_username.map(|u| u.id), Some(created.id));

    let by_email = users
        .find_by_email(&created.email)
        .await
        .expect("Failed to get user");
    assert_eq!(by_email.map(|u| u.id), Some(created.id));

    let missing = users
        .find_by_id(&UserId::new())
        .await
        .expect("Failed to query user");
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_unique_constraints_map_to_conflicts() {
    let test_database = TestDb::new().await;
    let users = PostgresUserRepository::new(test_database.pool.clone());

    users
        .create(user("john_doe"))
        .await
        .expect("Failed to create user");

    let mut same_username = user("john_doe");
    same_username.email = EmailAddress::new("other@example.com".to_string()).unwrap();
    let result = users.create(same_username).await;
    assert!(
        matches!(result, Err(UserError::UsernameAlreadyExists(_))),
        "Unexpected result: {:?}",
        result
    );

    let mut same_email = user("jane_doe");
    same_email.email = EmailAddress::new("john_doe@example.com".to_string()).unwrap();
    let result = users.create(same_email).await;
    assert!(
        matches!(result, Err(UserError::EmailAlreadyExists(_))),
        "Unexpected result: {:?}",
        result
    );
}

#[tokio::test]
async fn test_update_user() {
    let test_database = TestDb::new().await;
    let users = PostgresUserRepository::new(test_database.pool.clone());

    let mut created = users
        .create(user("john_doe"))
        .await
        .expect("Failed to create user");

    created.fullname = FullName::new("John Updated".to_string()).unwrap();
    created.refresh_token = Some("stored-token".to_string());
    users
        .update(created.clone())
        .await
        .expect("Failed to update user");

    let retrieved = users
        .find_by_id(&created.id)
        .await
        .expect("Failed to get user")
        .expect("User not found");
    assert_eq!(retrieved.fullname.as_str(), "John Updated");
    assert_eq!(retrieved.refresh_token.as_deref(), Some("stored-token"));

    let result = users.update(user("ghost")).await;
    assert!(matches!(result, Err(UserError::NotFound(_))));
}

#[tokio::test]
async fn test_rotate_refresh_token_only_from_current() {
    let test_database = TestDb::new().await;
    let users = PostgresUserRepository::new(test_database.pool.clone());

    let created = users
        .create(user("john_doe"))
        .await
        .expect("Failed to create user");
    users
        .set_refresh_token(&created.id, Some("first".to_string()))
        .await
        .expect("Failed to store refresh token");

    users
        .rotate_refresh_token(&created.id, "first", "second".to_string())
        .await
        .expect("Rotation from the current token should succeed");

    // The superseded token cannot rotate again
    let result = users
        .rotate_refresh_token(&created.id, "first", "third".to_string())
        .await;
    assert!(matches!(result, Err(UserError::RefreshTokenRevoked)));

    let stored = users
        .find_by_id(&created.id)
        .await
        .expect("Failed to get user")
        .expect("User not found");
    assert_eq!(stored.refresh_token.as_deref(), Some("second"));

    // Nothing to rotate after logout
    users
        .set_refresh_token(&created.id, None)
        .await
        .expect("Failed to clear refresh token");
    let result = users
        .rotate_refresh_token(&created.id, "second", "fourth".to_string())
        .await;
    assert!(matches!(result, Err(UserError::RefreshTokenRevoked)));

    let result = users.set_refresh_token(&UserId::new(), None).await;
    assert!(matches!(result, Err(UserError::NotFound(_))));
}

#[tokio::test]
async fn test_watch_history_keeps_viewing_order() {
    let test_database = TestDb::new().await;
    let users = PostgresUserRepository::new(test_database.pool.clone());
    let videos = PostgresVideoRepository::new(test_database.pool.clone());

    let owner = users.create(user("creator")).await.unwrap();
    let viewer = users.create(user("viewer")).await.unwrap();
    let first = videos.create(video(owner.id, "First", 2)).await.unwrap();
    let second = videos.create(video(owner.id, "Second", 1)).await.unwrap();

    for id in [second.id, first.id, second.id] {
        users
            .push_watch_history(&viewer.id, &id)
            .await
            .expect("Failed to record history");
    }

    let retrieved = users
        .find_by_id(&viewer.id)
        .await
        .expect("Failed to get user")
        .expect("User not found");
    assert_eq!(retrieved.watch_history, vec![second.id, first.id, second.id]);
}

#[tokio::test]
async fn test_watch_history_reports_missing_entity() {
    let test_database = TestDb::new().await;
    let users = PostgresUserRepository::new(test_database.pool.clone());
    let videos = PostgresVideoRepository::new(test_database.pool.clone());

    let owner = users.create(user("creator")).await.unwrap();
    let clip = videos.create(video(owner.id, "Clip", 0)).await.unwrap();

    let result = users.push_watch_history(&owner.id, &VideoId::new()).await;
    assert!(
        matches!(result, Err(UserError::VideoNotFound(_))),
        "Unexpected result: {:?}",
        result
    );

    let result = users.push_watch_history(&UserId::new(), &clip.id).await;
    assert!(
        matches!(result, Err(UserError::NotFound(_))),
        "Unexpected result: {:?}",
        result
    );
}

#[tokio::test]
async fn test_video_crud() {
    let test_database = TestDb::new().await;
    let users = PostgresUserRepository::new(test_database.pool.clone());
    let videos = PostgresVideoRepository::new(test_database.pool.clone());

    let owner = users.create(user("creator")).await.unwrap();
    let mut created = videos
        .create(video(owner.id, "Original", 0))
        .await
        .expect("Failed to create video");

    let retrieved = videos
        .find_by_id(&created.id)
        .await
        .expect("Failed to get video")
        .expect("Video not found");
    assert_eq!(retrieved.title.as_str(), "Original");
    assert_eq!(retrieved.duration.as_secs(), 93.5);
    assert_eq!(retrieved.owner, owner.id);
    assert!(retrieved.is_published);

    created.is_published = false;
    videos
        .update(created.clone())
        .await
        .expect("Failed to update video");
    let retrieved = videos.find_by_id(&created.id).await.unwrap().unwrap();
    assert!(!retrieved.is_published);

    videos
        .delete(&created.id)
        .await
        .expect("Failed to delete video");
    assert!(videos.find_by_id(&created.id).await.unwrap().is_none());

    let result = videos.delete(&created.id).await;
    assert!(matches!(result, Err(VideoError::NotFound(_))));

    let result = videos.update(created).await;
    assert!(matches!(result, Err(VideoError::NotFound(_))));
}

#[tokio::test]
async fn test_list_by_owner_newest_first() {
    let test_database = TestDb::new().await;
    let users = PostgresUserRepository::new(test_database.pool.clone());
    let videos = PostgresVideoRepository::new(test_database.pool.clone());

    let owner = users.create(user("creator")).await.unwrap();
    let other = users.create(user("someone")).await.unwrap();

    videos.create(video(owner.id, "Oldest", 30)).await.unwrap();
    videos.create(video(owner.id, "Newest", 1)).await.unwrap();
    videos.create(video(owner.id, "Middle", 10)).await.unwrap();
    videos.create(video(other.id, "Not mine", 5)).await.unwrap();

    let listed = videos
        .list_by_owner(&owner.id)
        .await
        .expect("Failed to list videos");
    let titles: Vec<&str> = listed.iter().map(|v| v.title.as_str()).collect();
    assert_eq!(titles, vec!["Newest", "Middle", "Oldest"]);
}

#[tokio::test]
async fn test_increment_views() {
    let test_database = TestDb::new().await;
    let users = PostgresUserRepository::new(test_database.pool.clone());
    let videos = PostgresVideoRepository::new(test_database.pool.clone());

    let owner = users.create(user("creator")).await.unwrap();
    let clip = videos.create(video(owner.id, "Clip", 0)).await.unwrap();

    assert_eq!(videos.increment_views(&clip.id).await.unwrap(), 1);
    assert_eq!(videos.increment_views(&clip.id).await.unwrap(), 2);

    let retrieved = videos.find_by_id(&clip.id).await.unwrap().unwrap();
    assert_eq!(retrieved.views, 2);

    let result = videos.increment_views(&VideoId::new()).await;
    assert!(matches!(result, Err(VideoError::NotFound(_))));
}
