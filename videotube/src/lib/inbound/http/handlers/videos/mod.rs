pub mod delete_video;
pub mod get_video;
pub mod list_owner_videos;
pub mod publish_video;
pub mod record_view;
pub mod toggle_publish;

pub use delete_video::delete_video;
pub use get_video::get_video;
pub use list_owner_videos::list_owner_videos;
pub use publish_video::publish_video;
pub use record_view::record_view;
pub use toggle_publish::toggle_publish;

use crate::domain::video::models::VideoId;
use crate::inbound::http::handlers::ApiError;

fn parse_video_id(raw: &str) -> Result<VideoId, ApiError> {
    VideoId::from_string(raw).map_err(|e| ApiError::BadRequest(e.to_string()))
}
