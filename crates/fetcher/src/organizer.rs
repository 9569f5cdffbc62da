// organizer.rs
// 目录整理器：扫描快照目录中的音视频文件，按类别移动到 <split>/audio 与 <split>/video。
use crate::config::LayoutConfig;
use crate::error::Result;
use crate::standardizer::standardized_name;
use crate::types::{Asset, MediaKind};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// 一次整理的移动统计
#[derive(Debug, Clone, Default, Serialize)]
pub struct MoveReport {
    /// 移动的音频文件数
    pub audio_moved: usize,
    /// 移动的视频文件数
    pub video_moved: usize,
    /// 已经位于目标目录中的文件数（重复运行时出现）
    pub already_in_place: usize,
    /// 标准化后的同名文件已在目标目录中，原始文件保留在快照里（重新下载后出现）
    pub already_arranged: usize,
    /// 因目标目录已有同名文件而保留原位的文件
    pub conflicts: Vec<PathBuf>,
}

/// 目录整理器
pub struct LayoutOrganizer {
    config: LayoutConfig,
}

impl LayoutOrganizer {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    /// 递归收集快照目录下的所有音视频文件，按文件名排序保证“先见者优先”的顺序稳定
    pub fn scan(&self, snapshot_root: &Path) -> Result<Vec<Asset>> {
        let mut assets = Vec::new();
        for entry in WalkDir::new(snapshot_root).sort_by_file_name() {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let asset = Asset::new(entry.into_path(), &self.config);
            if matches!(asset.kind, MediaKind::Audio | MediaKind::Video) {
                assets.push(asset);
            }
        }
        Ok(assets)
    }

    /// 创建 audio/ 与 video/ 目录（已存在不报错），并把音视频文件移入。
    ///
    /// 目标位置已有同名文件时不覆盖，源文件留在原处且不计入移动数。
    pub fn organize(&self, snapshot_root: &Path, split_dir: &Path) -> Result<MoveReport> {
        let audio_dir = split_dir.join("audio");
        let video_dir = split_dir.join("video");
        fs::create_dir_all(&audio_dir)?;
        fs::create_dir_all(&video_dir)?;

        // 先收集再移动，避免边遍历边修改目录树
        let assets = self.scan(snapshot_root)?;
        let mut report = MoveReport::default();

        for asset in assets {
            let dest_dir = match asset.kind {
                MediaKind::Audio => &audio_dir,
                MediaKind::Video => &video_dir,
                _ => continue,
            };
            let name = match asset.file_name() {
                Some(name) => name,
                None => continue,
            };
            let dest = dest_dir.join(name);

            if dest.exists() {
                if same_file(&asset.path, &dest)? {
                    report.already_in_place += 1;
                } else {
                    warn!(source = %asset.path.display(), dest = %dest.display(), "目标位置已有同名文件，保留原文件");
                    report.conflicts.push(asset.path);
                }
                continue;
            }
            if let Some(twin) = self.standardized_twin(dest_dir, &asset) {
                debug!(source = %asset.path.display(), twin = %twin.display(), "已整理过，保留原文件");
                report.already_arranged += 1;
                continue;
            }

            move_file(&asset.path, &dest)?;
            debug!("移动: {} -> {}", asset.path.display(), dest.display());
            match asset.kind {
                MediaKind::Audio => report.audio_moved += 1,
                MediaKind::Video => report.video_moved += 1,
                _ => {}
            }
        }

        Ok(report)
    }

    /// 原始文件名对应的标准化文件若已在目标目录中，返回其路径
    fn standardized_twin(&self, dest_dir: &Path, asset: &Asset) -> Option<PathBuf> {
        let name = asset.file_name()?.to_str()?;
        let ext = asset.path.extension()?.to_str()?;
        if !self.config.standardized_extensions.iter().any(|e| e == ext) {
            return None;
        }
        let twin = dest_dir.join(standardized_name(name).ok()?);
        twin.exists().then_some(twin)
    }
}

/// 移动文件：优先 rename，失败时（如跨文件系统）退化为复制后删除
pub fn move_file(src: &Path, dest: &Path) -> Result<()> {
    if let Err(e) = fs::rename(src, dest) {
        debug!("rename 失败（{}），改用复制: {}", e, src.display());
        fs::copy(src, dest)?;
        fs::remove_file(src)?;
    }
    Ok(())
}

/// 判断两个路径是否指向同一个文件
pub fn same_file(a: &Path, b: &Path) -> Result<bool> {
    Ok(fs::canonicalize(a)? == fs::canonicalize(b)?)
}
