//! Data models mirrored from the backend.

mod message;
mod post;
mod report;
mod user;

pub use message::{ChatMessage, Conversation, DirectMessage, Participant, SendDirectMessage};
pub use post::{Comment, LikeRequest, Post, RetruthRequest};
pub use report::{Notification, NotificationActor, NotificationKind, Report, ReportKind};
pub use user::{
    FollowRequest, ImageUpload, LoginResponse, LoginUser, ProfileUpdate, RankedUser, User,
};
