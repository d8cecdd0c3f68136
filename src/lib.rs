#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod config;
pub mod locator;
pub mod metadata;
pub mod models;
pub mod naming;
pub mod store;

pub use config::LocatorConfig;
pub use locator::{LocateError, PageLocator};
pub use models::{AlternatePage, ResolvedPage};
pub use naming::{DefaultPathGuard, PathGuard};
pub use store::{DirectoryStore, FileInfo, FileStore, StoreError};
