// arrange.rs
// 数据集整理流程：移动音视频、标准化文件名、放置清单，汇总为一份 ArrangeSummary。
use crate::config::LayoutConfig;
use crate::error::Result;
use crate::manifest::{place_manifest, ManifestPlacement};
use crate::organizer::{LayoutOrganizer, MoveReport};
use crate::standardizer::{standardize_dir, RenameOutcome};
use crate::types::{Split, TargetLayout};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// 一次整理的汇总结果
#[derive(Debug, Clone, Serialize)]
pub struct ArrangeSummary {
    pub split: Split,
    pub moves: MoveReport,
    pub audio_renames: Vec<RenameOutcome>,
    pub video_renames: Vec<RenameOutcome>,
    pub manifest: ManifestPlacement,
    pub audio_dir: PathBuf,
    pub video_dir: PathBuf,
    pub manifest_path: PathBuf,
}

impl ArrangeSummary {
    fn renames(&self) -> impl Iterator<Item = &RenameOutcome> {
        self.audio_renames.iter().chain(self.video_renames.iter())
    }

    pub fn renamed_count(&self) -> usize {
        self.renames().filter(|o| o.is_renamed()).count()
    }

    /// 未能标准化而保留原名的文件
    pub fn skipped(&self) -> Vec<&RenameOutcome> {
        self.renames().filter(|o| o.is_skipped()).collect()
    }

    /// 清单已放置且没有被跳过或冲突的文件
    pub fn is_clean(&self) -> bool {
        self.manifest.is_placed() && self.skipped().is_empty() && self.moves.conflicts.is_empty()
    }
}

/// 数据集整理器
pub struct DatasetArranger {
    config: LayoutConfig,
}

impl DatasetArranger {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    /// 把 `snapshot_root` 中的文件整理成 `layout` 描述的训练目录结构
    pub fn arrange(&self, snapshot_root: &Path, layout: &TargetLayout) -> Result<ArrangeSummary> {
        let organizer = LayoutOrganizer::new(self.config.clone());
        let moves = organizer.organize(snapshot_root, &layout.split_dir())?;
        info!(
            audio = moves.audio_moved,
            video = moves.video_moved,
            conflicts = moves.conflicts.len(),
            "音视频文件移动完成"
        );

        let audio_dir = layout.audio_dir();
        let video_dir = layout.video_dir();
        let audio_renames = standardize_dir(&audio_dir, &self.config.standardized_extensions)?;
        let video_renames = standardize_dir(&video_dir, &self.config.standardized_extensions)?;

        let manifest_path = layout.manifest_path();
        let manifest = place_manifest(snapshot_root, &manifest_path, layout.split)?;

        Ok(ArrangeSummary {
            split: layout.split,
            moves,
            audio_renames,
            video_renames,
            manifest,
            audio_dir,
            video_dir,
            manifest_path,
        })
    }
}

impl Default for DatasetArranger {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}
