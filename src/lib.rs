pub mod classify;
pub mod config;
pub mod environment;
pub mod error;
pub mod export;
pub mod highlight;
pub mod keywords;
pub mod logging;
pub mod matching;
pub mod pipeline;
pub mod sentiment;
pub mod sources;

pub const TARGET_WEB_REQUEST: &str = "web_request";
pub const TARGET_CLASSIFIER: &str = "classifier";
pub const TARGET_PIPELINE: &str = "pipeline";
