// snapshot.rs
// 快照下载器：从 Hugging Face Hub 拉取整个数据集/模型仓库，并以真实文件形式落到本地目录。
use crate::config::HubOptions;
use crate::error::{Error, Result};
use hf_hub::api::sync::{ApiBuilder, ApiRepo};
use hf_hub::{Repo, RepoType};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// 快照下载器，支持镜像源、令牌和指定版本
pub struct SnapshotFetcher {
    options: HubOptions,
}

impl SnapshotFetcher {
    /// 创建新的快照下载器
    pub fn new(options: HubOptions) -> Self {
        Self { options }
    }

    /// 设置是否使用镜像源
    pub fn use_mirror(&mut self, use_mirror: bool) {
        self.options.use_mirror = use_mirror;
    }

    fn open_repo(&self, repo_id: &str, repo_type: RepoType) -> Result<ApiRepo> {
        let mut builder = ApiBuilder::new()
            .with_endpoint(self.options.resolved_endpoint())
            .with_token(self.options.token.clone())
            .with_progress(self.options.progress);
        if let Some(dir) = &self.options.cache_dir {
            builder = builder.with_cache_dir(dir.clone());
        }
        let api = builder.build()?;
        Ok(api.repo(Repo::with_revision(
            repo_id.to_string(),
            repo_type,
            self.options.revision.clone(),
        )))
    }

    /// 下载仓库快照到 `local_dir`，返回快照根目录。
    ///
    /// 文件先进入 Hub 缓存，再以硬链接（失败则复制）放到 `local_dir` 下的相对路径，
    /// 本地已存在的文件不会重复放置。
    pub fn download_snapshot(
        &self,
        repo_id: &str,
        repo_type: RepoType,
        local_dir: &Path,
    ) -> Result<PathBuf> {
        info!(
            repo = repo_id,
            revision = %self.options.revision,
            endpoint = %self.options.resolved_endpoint(),
            "开始下载快照"
        );
        fs::create_dir_all(local_dir)?;

        let repo = self.open_repo(repo_id, repo_type)?;
        let siblings = repo.info()?.siblings;
        info!("仓库 {} 共有 {} 个文件", repo_id, siblings.len());

        for sibling in siblings {
            let remote = sibling.rfilename;
            let local = local_path_for(local_dir, &remote)?;
            if local.exists() {
                debug!("已存在，跳过: {}", local.display());
                continue;
            }
            let cached = repo.get(&remote)?;
            materialize(&cached, &local)?;
            debug!("已放置: {}", local.display());
        }

        Ok(local_dir.to_path_buf())
    }
}

/// 仓库内相对路径映射到本地路径，拒绝越出本地目录的路径
fn local_path_for(local_dir: &Path, remote: &str) -> Result<PathBuf> {
    let relative = Path::new(remote);
    let escapes = relative.components().any(|c| {
        !matches!(c, std::path::Component::Normal(_) | std::path::Component::CurDir)
    });
    if escapes {
        return Err(Error::Other(format!("仓库文件路径不合法: {}", remote)));
    }
    Ok(local_dir.join(relative))
}

/// 把缓存中的文件落成真实文件：先解析符号链接，再尝试硬链接，不行就复制
fn materialize(cached: &Path, local: &Path) -> Result<()> {
    if let Some(parent) = local.parent() {
        fs::create_dir_all(parent)?;
    }
    let blob = fs::canonicalize(cached)?;
    if fs::hard_link(&blob, local).is_err() {
        fs::copy(&blob, local)?;
    }
    Ok(())
}
