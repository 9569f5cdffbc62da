// error.rs
// 定义下载与整理流程的通用错误类型（IO、HTTP、Hub、URL、目录遍历等）和Result类型。
use std::fmt;
use std::io;

/// 项目通用错误类型，涵盖IO、HTTP下载、Hugging Face Hub、URL解析、目录遍历等错误
#[derive(Debug)]
pub enum Error {
    /// IO错误
    Io(io::Error),
    /// HTTP请求或响应错误
    Http(reqwest::Error),
    /// Hugging Face Hub 接口错误
    Hub(hf_hub::api::sync::ApiError),
    /// URL 无法解析或缺少文件名
    InvalidUrl(String),
    /// 目录遍历错误
    Walk(walkdir::Error),
    /// 其他类型错误
    Other(String),
}

/// 通用结果类型
pub type Result<T> = std::result::Result<T, Error>;

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Http(e)
    }
}

impl From<hf_hub::api::sync::ApiError> for Error {
    fn from(e: hf_hub::api::sync::ApiError) -> Self {
        Error::Hub(e)
    }
}

impl From<walkdir::Error> for Error {
    fn from(e: walkdir::Error) -> Self {
        Error::Walk(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Other(format!("JSON序列化失败: {}", e))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "IO错误: {}", e),
            Error::Http(e) => write!(f, "HTTP错误: {}", e),
            Error::Hub(e) => write!(f, "Hub错误: {}", e),
            Error::InvalidUrl(msg) => write!(f, "URL错误: {}", msg),
            Error::Walk(e) => write!(f, "目录遍历错误: {}", e),
            Error::Other(msg) => write!(f, "其他错误: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Http(e) => Some(e),
            Error::Hub(e) => Some(e),
            Error::Walk(e) => Some(e),
            Error::InvalidUrl(_) | Error::Other(_) => None,
        }
    }
}
