// download_avamerge.rs
// 下载 AvaMERG 数据集快照，并整理成训练端期望的 <split>/audio、<split>/video、<split>.json 结构。
use anyhow::{Context, Result};
use clap::Parser;
use fetcher::config::{HubOptions, DEFAULT_DATASET_DIR, DEFAULT_DATASET_REPO, DEFAULT_REVISION};
use fetcher::logging::init_logging;
use fetcher::snapshot::SnapshotFetcher;
use fetcher::summary::{print_summary, write_report};
use fetcher::{DatasetArranger, RepoType, Split, TargetLayout};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    version,
    about = "下载 ZhangHanXD/AvaMERG 数据集并整理为训练目录结构"
)]
struct Args {
    /// Hugging Face 数据集仓库ID
    #[arg(long, default_value = DEFAULT_DATASET_REPO)]
    repo_id: String,

    /// 整理后的数据存放目录
    #[arg(long, default_value = DEFAULT_DATASET_DIR)]
    target_dir: PathBuf,

    /// 要整理的数据集划分
    #[arg(long, value_enum, default_value_t = Split::Train)]
    split: Split,

    /// 只保留快照原始结构，不做整理
    #[arg(long, default_value_t = false)]
    use_cli_layout: bool,

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

    /// 跳过下载，直接整理 --target-dir 中已有的快照
    #[arg(long, default_value_t = false)]
    offline: bool,

    /// 把整理汇总写成 JSON 报告
    #[arg(long, value_name = "PATH")]
    report: Option<PathBuf>,

    /// 清单未放置或有文件被跳过时以退出码 2 结束
    #[arg(long, default_value_t = false)]
    strict: bool,
}

fn main() -> Result<ExitCode> {
    init_logging();
    let args = Args::parse();
    let target_dir = args.target_dir.clone();

    let snapshot_dir = if args.offline {
        println!("--offline 已指定，跳过下载，直接使用 {}", target_dir.display());
        target_dir.clone()
    } else {
        println!("正在下载数据集 {} (repo_type=dataset) ...", args.repo_id);
        let options = HubOptions {
            revision: args.revision.clone(),
            token: args.token.clone(),
            endpoint: args.endpoint.clone(),
            ..HubOptions::default()
        };
        let mut fetcher = SnapshotFetcher::new(options);
        fetcher.use_mirror(args.mirror);
        // 数据集下载失败直接返回错误，进程以非零退出码结束
        fetcher
            .download_snapshot(&args.repo_id, RepoType::Dataset, &target_dir)
            .with_context(|| format!("下载数据集 {} 失败", args.repo_id))?
    };
    println!("快照位置: {}", snapshot_dir.display());

    if args.use_cli_layout {
        println!("--use-cli-layout 已指定，跳过文件整理。");
        return Ok(ExitCode::SUCCESS);
    }

    let layout = TargetLayout::new(&target_dir, args.split);
    let summary = DatasetArranger::default()
        .arrange(&snapshot_dir, &layout)
        .context("整理数据集失败")?;
    print_summary(&summary);

    if let Some(report) = &args.report {
        write_report(&summary, report)
            .with_context(|| format!("写入报告 {} 失败", report.display()))?;
        println!("\n报告已写入: {}", report.display());
    }

    if args.strict && !summary.is_clean() {
        eprintln!("整理未完全成功（--strict）。");
        return Ok(ExitCode::from(2));
    }
    Ok(ExitCode::SUCCESS)
}
