// types.rs
// 定义通用类型：数据集划分、媒体类别、本地资源文件以及目标目录布局。
use crate::config::LayoutConfig;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::fmt;
use std::path::{Path, PathBuf};

/// 数据集划分，决定子目录名和清单文件名
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
#[value(rename_all = "lower")]
pub enum Split {
    Train,
    Test,
    Validation,
    Dev,
    Val,
}

impl Split {
    pub fn as_str(&self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Test => "test",
            Split::Validation => "validation",
            Split::Dev => "dev",
            Split::Val => "val",
        }
    }

    /// 清单文件名，如 train.json
    pub fn manifest_name(&self) -> String {
        format!("{}.json", self.as_str())
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 媒体类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Audio,
    Video,
    Manifest,
    Other,
}

impl MediaKind {
    /// 按扩展名推断类别，大小写敏感，与训练端的 glob 规则一致
    pub fn from_path(path: &Path, config: &LayoutConfig) -> Self {
        let ext = match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => ext,
            None => return MediaKind::Other,
        };
        if config.audio_extensions.iter().any(|a| a == ext) {
            MediaKind::Audio
        } else if config.video_extensions.iter().any(|v| v == ext) {
            MediaKind::Video
        } else if ext == "json" {
            MediaKind::Manifest
        } else {
            MediaKind::Other
        }
    }
}

/// 下载到本地的单个资源文件
#[derive(Debug, Clone)]
pub struct Asset {
    pub path: PathBuf,
    pub kind: MediaKind,
}

impl Asset {
    pub fn new(path: PathBuf, config: &LayoutConfig) -> Self {
        let kind = MediaKind::from_path(&path, config);
        Self { path, kind }
    }

    /// 原始文件名，保留非UTF-8字节
    pub fn file_name(&self) -> Option<&OsStr> {
        self.path.file_name()
    }
}

/// 训练端期望的目标目录布局：
/// `<root>/<split>/audio/`、`<root>/<split>/video/`、`<root>/<split>.json`
#[derive(Debug, Clone)]
pub struct TargetLayout {
    pub root: PathBuf,
    pub split: Split,
}

impl TargetLayout {
    pub fn new(root: impl Into<PathBuf>, split: Split) -> Self {
        Self {
            root: root.into(),
            split,
        }
    }

    pub fn split_dir(&self) -> PathBuf {
        self.root.join(self.split.as_str())
    }

    pub fn audio_dir(&self) -> PathBuf {
        self.split_dir().join("audio")
    }

    pub fn video_dir(&self) -> PathBuf {
        self.split_dir().join("video")
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(self.split.manifest_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_kind_from_extension() {
        let config = LayoutConfig::default();
        assert_eq!(MediaKind::from_path(Path::new("a/dia1utt1.wav"), &config), MediaKind::Audio);
        assert_eq!(MediaKind::from_path(Path::new("x.flac"), &config), MediaKind::Audio);
        assert_eq!(MediaKind::from_path(Path::new("x.mov"), &config), MediaKind::Video);
        assert_eq!(MediaKind::from_path(Path::new("train.json"), &config), MediaKind::Manifest);
        assert_eq!(MediaKind::from_path(Path::new("README"), &config), MediaKind::Other);
        // 扩展名大小写敏感
        assert_eq!(MediaKind::from_path(Path::new("x.WAV"), &config), MediaKind::Other);
    }

    #[test]
    fn test_target_layout_paths() {
        let layout = TargetLayout::new("merg_data", Split::Validation);
        assert_eq!(layout.audio_dir(), PathBuf::from("merg_data/validation/audio"));
        assert_eq!(layout.video_dir(), PathBuf::from("merg_data/validation/video"));
        assert_eq!(layout.manifest_path(), PathBuf::from("merg_data/validation.json"));
    }
}
