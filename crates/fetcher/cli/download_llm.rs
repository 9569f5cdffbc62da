// download_llm.rs
// 从 Hugging Face Hub 下载 LLM 权重快照。
use clap::Parser;
use fetcher::config::{HubOptions, DEFAULT_LLM_DIR, DEFAULT_LLM_REPO, DEFAULT_REVISION};
use fetcher::logging::init_logging;
use fetcher::snapshot::SnapshotFetcher;
use fetcher::RepoType;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(version, about = "从 Hugging Face Hub 下载 LLM 模型")]
struct Args {
    /// 模型仓库ID
    #[arg(long, default_value = DEFAULT_LLM_REPO)]
    repo_id: String,

    /// 本地保存目录
    #[arg(long, default_value = DEFAULT_LLM_DIR)]
    target_dir: PathBuf,

    /// 仓库版本（分支、标签或提交）
    #[arg(long, default_value = DEFAULT_REVISION)]
    revision: String,

    /// 访问令牌（未设置时读取 HF_TOKEN）
    #[arg(long, env = "HF_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// 自定义Hub地址
    #[arg(long, env = "HF_ENDPOINT")]
    endpoint: Option<String>,

    /// 使用 hf-mirror.com 镜像
    #[arg(long, default_value_t = false)]
    mirror: bool,

    /// 下载失败时以退出码 1 结束
    #[arg(long, default_value_t = false)]
    strict: bool,
}

fn main() -> ExitCode {
    init_logging();
    let args = Args::parse();

    println!(
        "[!] 正在下载模型 '{}' 到 '{}' ...",
        args.repo_id,
        args.target_dir.display()
    );
    let options = HubOptions {
        revision: args.revision.clone(),
        token: args.token.clone(),
        endpoint: args.endpoint.clone(),
        ..HubOptions::default()
    };
    let mut fetcher = SnapshotFetcher::new(options);
    fetcher.use_mirror(args.mirror);

    match fetcher.download_snapshot(&args.repo_id, RepoType::Model, &args.target_dir) {
        Ok(dir) => {
            println!("[!] 模型 '{}' 已下载到 '{}'。", args.repo_id, dir.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("[!] 下载模型 '{}' 出错: {}", args.repo_id, e);
            eprintln!("[!] 请确认 repo_id 正确且网络可用。");
            eprintln!("[!] 私有模型需要通过 --token 或 HF_TOKEN 提供访问令牌。");
            if args.strict {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
    }
}
