// http.rs
// 单文件下载器：按URL流式下载到目标目录，文件名取URL路径的最后一段。
use crate::config::DOWNLOAD_CHUNK_SIZE;
use crate::error::{Error, Result};
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::blocking::Client;
use reqwest::Url;
use std::fs::{self, File};
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use uuid::Uuid;

/// 单文件下载器
pub struct FileDownloader {
    client: Client,
    progress: bool,
}

impl FileDownloader {
    /// 创建下载器；HTTP客户端初始化失败（如TLS后端不可用）时返回错误
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("merg-fetcher/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            progress: true,
        })
    }

    /// 设置是否显示进度条
    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    /// 下载 `url` 到 `target_dir/<文件名>`，返回最终路径。
    ///
    /// 数据先写入同目录下的临时 `.part` 文件，完成后再改名；失败时删除临时文件。
    pub fn download(&self, url: &str, target_dir: &Path) -> Result<PathBuf> {
        let file_name = file_name_from_url(url)?;
        let target_path = target_dir.join(&file_name);
        fs::create_dir_all(target_dir)?;

        let part_path = target_dir.join(format!(".{}.{}.part", file_name, Uuid::new_v4()));
        info!("下载 {} -> {}", url, target_path.display());

        match self.stream_to(url, &part_path) {
            Ok(bytes) => {
                fs::rename(&part_path, &target_path)?;
                debug!("写入 {} 字节", bytes);
                Ok(target_path)
            }
            Err(e) => {
                let _ = fs::remove_file(&part_path);
                Err(e)
            }
        }
    }

    fn stream_to(&self, url: &str, path: &Path) -> Result<u64> {
        let mut response = self.client.get(url).send()?.error_for_status()?;
        let total = response.content_length();

        let bar = if !self.progress {
            ProgressBar::hidden()
        } else if let Some(total) = total {
            let bar = ProgressBar::new(total);
            bar.set_style(
                ProgressStyle::with_template(
                    "{spinner} [{elapsed_precise}] [{bar:40}] {bytes}/{total_bytes} ({bytes_per_sec}, {eta})",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=> "),
            );
            bar
        } else {
            ProgressBar::new_spinner()
        };

        let mut writer = BufWriter::new(File::create(path)?);
        let mut buf = vec![0u8; DOWNLOAD_CHUNK_SIZE];
        let mut written = 0u64;
        loop {
            let n = response.read(&mut buf)?;
            if n == 0 {
                break;
            }
            writer.write_all(&buf[..n])?;
            written += n as u64;
            bar.set_position(written);
        }
        writer.flush()?;
        bar.finish_and_clear();

        if let Some(total) = total {
            if written != total {
                return Err(Error::Other(format!(
                    "下载不完整: 期望 {} 字节，实际 {} 字节",
                    total, written
                )));
            }
        }
        Ok(written)
    }
}

/// 取URL路径的最后一个非空片段作为文件名
pub fn file_name_from_url(url: &str) -> Result<String> {
    let parsed = Url::parse(url).map_err(|e| Error::InvalidUrl(format!("{}: {}", url, e)))?;
    parsed
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .ok_or_else(|| Error::InvalidUrl(format!("URL中没有文件名: {}", url)))
}
