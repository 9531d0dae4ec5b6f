//! Content module - post view models and the logic shaping them

pub mod adjacent;
mod mapper;
mod post;
pub mod reading;

pub use adjacent::AdjacentPosts;
pub use post::{AdjacentPostRef, BodyFragment, ContentBlock, PostDetail, PostSummary};
pub use reading::estimate_minutes;
