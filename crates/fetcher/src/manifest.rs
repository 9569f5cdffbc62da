// manifest.rs
// 清单放置：在快照中查找划分对应的 JSON 清单，复制为 <target-root>/<split>.json。
use crate::error::Result;
use crate::organizer::same_file;
use crate::types::Split;
use serde::Serialize;
use std::fs::{self, File, FileTimes};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

/// 清单放置结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "placement", content = "source", rename_all = "snake_case")]
pub enum ManifestPlacement {
    /// 找到与划分同名的清单
    Exact(PathBuf),
    /// 没有同名清单，退而使用找到的第一个 JSON
    Fallback(PathBuf),
    /// 快照中没有任何 JSON
    NotPlaced,
}

impl ManifestPlacement {
    pub fn is_placed(&self) -> bool {
        !matches!(self, ManifestPlacement::NotPlaced)
    }
}

/// 递归查找所有 .json 文件（按文件名排序）
pub fn find_json_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file()
            && entry.path().extension().and_then(|e| e.to_str()) == Some("json")
        {
            found.push(entry.into_path());
        }
    }
    Ok(found)
}

/// 是否是该划分的清单：`<split>.json` 或 `<split>_split.json`，不区分大小写
fn matches_split(path: &Path, split: Split) -> bool {
    let name = match path.file_name().and_then(|n| n.to_str()) {
        Some(n) => n.to_lowercase(),
        None => return false,
    };
    name == format!("{}.json", split) || name == format!("{}_split.json", split)
}

/// 查找并放置清单到 `dest`。没有 JSON 时返回 `NotPlaced`，不视为错误。
pub fn place_manifest(snapshot_root: &Path, dest: &Path, split: Split) -> Result<ManifestPlacement> {
    let candidates = find_json_files(snapshot_root)?;

    if let Some(exact) = candidates.iter().find(|p| matches_split(p, split)) {
        copy_preserving(exact, dest)?;
        info!("清单已放置: {} -> {}", exact.display(), dest.display());
        return Ok(ManifestPlacement::Exact(exact.clone()));
    }

    match candidates.into_iter().next() {
        Some(first) => {
            copy_preserving(&first, dest)?;
            info!("未找到 {} 清单，使用 {} 代替", split.manifest_name(), first.display());
            Ok(ManifestPlacement::Fallback(first))
        }
        None => Ok(ManifestPlacement::NotPlaced),
    }
}

/// 复制文件并保留权限与时间戳；源与目标是同一文件时不做任何事
pub fn copy_preserving(src: &Path, dest: &Path) -> Result<()> {
    if dest.exists() && same_file(src, dest)? {
        debug!("清单已在目标位置: {}", dest.display());
        return Ok(());
    }
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }

    // fs::copy 会一并复制权限位
    fs::copy(src, dest)?;

    let meta = fs::metadata(src)?;
    let mut times = FileTimes::new().set_modified(meta.modified()?);
    if let Ok(accessed) = meta.accessed() {
        times = times.set_accessed(accessed);
    }
    File::options().write(true).open(dest)?.set_times(times)?;
    Ok(())
}
