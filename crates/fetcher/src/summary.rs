// summary.rs
// 整理结果的输出：控制台表格与 JSON 报告。
use crate::arrange::ArrangeSummary;
use crate::error::Result;
use crate::manifest::ManifestPlacement;
use crate::standardizer::RenameOutcome;
use prettytable::{cell, row, Table};
use std::fs;
use std::path::Path;

/// 训练命令示例，整理完成后提示给用户
pub const TRAIN_COMMAND_HINT: &str = "deepspeed --include localhost:0 --master_addr 127.0.0.1 --master_port 28459 \
merg_code/train.py --mode train --audio_path merg_data/train/audio \
--video_path merg_data/train/video --save_path ckpt/merg_ckpt --log_path ./logs --max_length 512";

fn placement_text(summary: &ArrangeSummary) -> String {
    let target = summary.manifest_path.display();
    match &summary.manifest {
        ManifestPlacement::Exact(src) => format!("是 -> {} (来源 {})", target, src.display()),
        ManifestPlacement::Fallback(src) => {
            format!("是(替代) -> {} (来源 {})", target, src.display())
        }
        ManifestPlacement::NotPlaced => format!("否 -> {}", target),
    }
}

/// 构建汇总表格
pub fn summary_table(summary: &ArrangeSummary) -> Table {
    let mut table = Table::new();
    table.add_row(row!["项目", "结果"]);
    table.add_row(row!["划分", summary.split]);
    table.add_row(row!["移动的音频文件", summary.moves.audio_moved]);
    table.add_row(row!["移动的视频文件", summary.moves.video_moved]);
    table.add_row(row!["已在目标位置", summary.moves.already_in_place]);
    table.add_row(row!["已整理(保留原文件)", summary.moves.already_arranged]);
    table.add_row(row!["同名冲突(保留原位)", summary.moves.conflicts.len()]);
    table.add_row(row!["标准化重命名", summary.renamed_count()]);
    table.add_row(row!["未能标准化", summary.skipped().len()]);
    table.add_row(row!["JSON清单", placement_text(summary)]);
    table.add_row(row!["audio_path", summary.audio_dir.display()]);
    table.add_row(row!["video_path", summary.video_dir.display()]);
    table
}

/// 打印汇总、被跳过的文件以及训练命令提示
pub fn print_summary(summary: &ArrangeSummary) {
    println!("\n下载与整理汇总:");
    summary_table(summary).printstd();

    let skipped = summary.skipped();
    if !skipped.is_empty() {
        println!("\n以下文件名不符合 dia<ID>utt<序号> 约定，保留原名:");
        for outcome in skipped {
            if let RenameOutcome::Skipped { name, reason } = outcome {
                println!("  - {} ({})", name, reason);
            }
        }
    }
    for conflict in &summary.moves.conflicts {
        println!("  ! 目标已有同名文件，未移动: {}", conflict.display());
    }

    println!("\n现在可以开始训练，例如:");
    println!("{}", TRAIN_COMMAND_HINT);
}

/// 把汇总写成 JSON 报告
pub fn write_report(summary: &ArrangeSummary, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(summary)?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::organizer::MoveReport;
    use crate::standardizer::SkipReason;
    use crate::types::Split;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn sample() -> ArrangeSummary {
        ArrangeSummary {
            split: Split::Train,
            moves: MoveReport {
                audio_moved: 2,
                video_moved: 1,
                already_in_place: 0,
                already_arranged: 0,
                conflicts: vec![],
            },
            audio_renames: vec![
                RenameOutcome::Renamed {
                    from: "dia00001utt0.wav".into(),
                    to: "dia1utt1.wav".into(),
                },
                RenameOutcome::Skipped {
                    name: "bad.wav".into(),
                    reason: SkipReason::TooShort,
                },
            ],
            video_renames: vec![],
            manifest: ManifestPlacement::NotPlaced,
            audio_dir: PathBuf::from("merg_data/train/audio"),
            video_dir: PathBuf::from("merg_data/train/video"),
            manifest_path: PathBuf::from("merg_data/train.json"),
        }
    }

    #[test]
    fn test_summary_table_rows() {
        let table = summary_table(&sample());
        let text = table.to_string();
        assert!(text.contains("移动的音频文件"));
        assert!(text.contains("否 -> merg_data/train.json"));
        assert!(text.contains("merg_data/train/video"));
        assert_eq!(table.len(), 12);
    }

    #[test]
    fn test_write_report_json() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("reports/train.json");
        write_report(&sample(), &path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["split"], "train");
        assert_eq!(value["moves"]["audio_moved"], 2);
        assert_eq!(value["manifest"]["placement"], "not_placed");
        assert_eq!(value["audio_renames"][1]["outcome"], "skipped");
        assert_eq!(value["audio_renames"][1]["reason"], "too_short");
    }
}
