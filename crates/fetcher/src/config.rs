// config.rs
// 默认参数与整理规则配置：数据集/模型的默认仓库与目录、媒体扩展名集合、Hub下载选项。
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 默认数据集仓库
pub const DEFAULT_DATASET_REPO: &str = "ZhangHanXD/AvaMERG";
/// 数据集默认整理目录
pub const DEFAULT_DATASET_DIR: &str = "merg_data";
/// ImageBind 权重默认地址
pub const DEFAULT_IMAGEBIND_URL: &str =
    "https://dl.fbaipublicfiles.com/imagebind/imagebind_huge.pth";
/// ImageBind 权重默认保存目录
pub const DEFAULT_IMAGEBIND_DIR: &str = "ckpt/pretrained_ckpt/imagebind_ckpt/huge";
/// 默认LLM仓库
pub const DEFAULT_LLM_REPO: &str = "mistralai/Mistral-7B-v0.1";
/// LLM 默认保存目录
pub const DEFAULT_LLM_DIR: &str = "ckpt/pretrained_ckpt/llm_ckpt/Mistral-7B-v0.1";

/// 官方Hub地址
pub const HUB_ENDPOINT: &str = "https://huggingface.co";
/// 国内镜像地址
pub const MIRROR_ENDPOINT: &str = "https://hf-mirror.com";
/// 默认版本
pub const DEFAULT_REVISION: &str = "main";

/// 流式下载的分块大小（字节）
pub const DOWNLOAD_CHUNK_SIZE: usize = 8192;

/// 数据整理规则：哪些扩展名归为音频/视频，哪些需要文件名标准化
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// 音频扩展名（不含点）
    pub audio_extensions: Vec<String>,
    /// 视频扩展名（不含点）
    pub video_extensions: Vec<String>,
    /// 需要做 dia/utt 标准化的扩展名，训练加载器只认 wav 和 mp4
    pub standardized_extensions: Vec<String>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            audio_extensions: vec!["wav".into(), "flac".into(), "mp3".into()],
            video_extensions: vec!["mp4".into(), "avi".into(), "mov".into()],
            standardized_extensions: vec!["wav".into(), "mp4".into()],
        }
    }
}

/// Hub 下载选项
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HubOptions {
    /// 仓库版本（分支、标签或提交）
    pub revision: String,
    /// 访问令牌，私有仓库需要
    #[serde(skip_serializing)]
    pub token: Option<String>,
    /// 是否使用镜像源
    pub use_mirror: bool,
    /// 自定义Hub地址，None 时使用官方地址
    pub endpoint: Option<String>,
    /// Hub 缓存目录，None 时使用 hf-hub 默认位置（受 HF_HOME 影响）
    pub cache_dir: Option<PathBuf>,
    /// 是否显示下载进度条
    pub progress: bool,
}

impl Default for HubOptions {
    /// 默认配置：main 分支，无令牌，不用镜像，默认缓存，显示进度
    fn default() -> Self {
        Self {
            revision: DEFAULT_REVISION.to_string(),
            token: None,
            use_mirror: false,
            endpoint: None,
            cache_dir: None,
            progress: true,
        }
    }
}

impl HubOptions {
    /// 实际使用的Hub地址：镜像开关优先，其次自定义地址，最后官方地址
    pub fn resolved_endpoint(&self) -> String {
        if self.use_mirror {
            return MIRROR_ENDPOINT.to_string();
        }
        self.endpoint
            .clone()
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| HUB_ENDPOINT.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_resolution() {
        let mut options = HubOptions::default();
        assert_eq!(options.resolved_endpoint(), HUB_ENDPOINT);

        options.endpoint = Some("http://127.0.0.1:9".to_string());
        assert_eq!(options.resolved_endpoint(), "http://127.0.0.1:9");

        options.use_mirror = true;
        assert_eq!(options.resolved_endpoint(), MIRROR_ENDPOINT);
    }

    #[test]
    fn test_default_layout_sets() {
        let config = LayoutConfig::default();
        assert_eq!(config.audio_extensions, ["wav", "flac", "mp3"]);
        assert_eq!(config.video_extensions, ["mp4", "avi", "mov"]);
        assert_eq!(config.standardized_extensions, ["wav", "mp4"]);
    }
}
