//! Configuration module

mod site;

pub use site::CmsConfig;
pub use site::CommentConfig;
pub use site::ServerConfig;
pub use site::SiteConfig;
pub use site::ACCESS_TOKEN_ENV;
