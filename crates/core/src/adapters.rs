pub mod config;
pub mod dry_run;
#[cfg(any(test, feature = "test-support"))]
pub mod recording;
pub mod repository_factory;
pub mod sheets;
