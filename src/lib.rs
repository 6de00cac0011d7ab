// Library for tests to access modules

pub mod chart_config;
pub mod client;
pub mod config;
pub mod console;
pub mod dashboard;
pub mod descriptors;
pub mod error;
pub mod models;
pub mod page;
pub mod pipeline;
pub mod registry;
pub mod scheduler;
pub mod theme_sync;
pub mod version;
pub mod visibility;
