// lib.rs
// 资源下载与数据整理模块入口，声明并导出各子模块。
pub mod arrange;
pub mod config;
pub mod error;
pub mod http;
pub mod logging;
pub mod manifest;
pub mod organizer;
pub mod snapshot;
pub mod standardizer;
pub mod summary;
pub mod types;

pub use arrange::{ArrangeSummary, DatasetArranger};
pub use error::{Error, Result};
pub use hf_hub::RepoType;
pub use types::{Split, TargetLayout};
