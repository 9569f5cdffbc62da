// standardizer.rs
// 文件名标准化：把原始的 dia<对话ID>utt<语句序号>.<ext> 改写为训练加载器使用的
// dia<去前导零的ID>utt<序号+1>.<ext>。
use crate::error::Result;
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// 对话ID在文件名中的字节区间 [3, 8)
const DIALOGUE_ID_RANGE: std::ops::Range<usize> = 3..8;
/// 语句序号所在的字节位置
const UTTERANCE_OFFSET: usize = 11;
/// 固定前缀与分隔符
const DIALOGUE_PREFIX: &[u8] = b"dia";
const UTTERANCE_MARKER: &[u8] = b"utt";
/// 标准化后唯一可能的两位语句序号（9 + 1）
const STANDARDIZED_TWO_DIGIT: &[u8] = b"10";

/// 跳过某个文件的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// 文件名不足12个字节
    TooShort,
    /// 对话ID位置上出现非数字字符
    NonNumericDialogueId,
    /// 语句序号位置上不是数字
    NonNumericUtterance,
    /// 缺少 dia/utt 标记，或语句序号字段不是一到两位数字
    UnexpectedLayout,
    /// 无法区分原始名与已标准化的名字（对话ID没有前导零）
    AmbiguousStandardized,
    /// 文件名不是合法的UTF-8
    NonUtf8Name,
    /// 目标文件名已被占用
    TargetExists,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SkipReason::TooShort => "文件名过短",
            SkipReason::NonNumericDialogueId => "对话ID不是数字",
            SkipReason::NonNumericUtterance => "语句序号不是数字",
            SkipReason::UnexpectedLayout => "不符合 dia<ID>utt<序号> 布局",
            SkipReason::AmbiguousStandardized => "可能已是标准化后的名字",
            SkipReason::NonUtf8Name => "文件名不是UTF-8",
            SkipReason::TargetExists => "目标文件已存在",
        };
        f.write_str(text)
    }
}

/// 单个文件的处理结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RenameOutcome {
    Renamed { from: String, to: String },
    Unchanged { name: String },
    Skipped { name: String, reason: SkipReason },
}

impl RenameOutcome {
    pub fn is_renamed(&self) -> bool {
        matches!(self, RenameOutcome::Renamed { .. })
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, RenameOutcome::Skipped { .. })
    }
}

/// 计算标准化后的文件名。
///
/// 偏移量是与上游命名约定的兼容契约：第3到7个字节为补零的对话ID，
/// 第11个字节为从0开始的语句序号。扩展名沿用原文件最后一个点之后的部分。
///
/// 只接受原始形态：`dia` 前缀、第8到10字节为 `utt`，语句序号字段（`utt` 到扩展名之间）
/// 为两位数字，或对话ID带前导零时的一位数字。标准化后的名字对话ID没有前导零、
/// 序号为 1 到 10，与原始形态重叠的部分记为 `AmbiguousStandardized`，保证重复执行不会再改名。
///
/// ```
/// use fetcher::standardizer::standardized_name;
/// assert_eq!(standardized_name("dia00001utt00.wav").unwrap(), "dia1utt1.wav");
/// ```
pub fn standardized_name(name: &str) -> std::result::Result<String, SkipReason> {
    let bytes = name.as_bytes();
    if bytes.len() <= UTTERANCE_OFFSET {
        return Err(SkipReason::TooShort);
    }

    let id_bytes = &bytes[DIALOGUE_ID_RANGE];
    if !id_bytes.iter().all(u8::is_ascii_digit) {
        return Err(SkipReason::NonNumericDialogueId);
    }
    let utterance = bytes[UTTERANCE_OFFSET];
    if !utterance.is_ascii_digit() {
        return Err(SkipReason::NonNumericUtterance);
    }
    if !bytes.starts_with(DIALOGUE_PREFIX) || &bytes[8..UTTERANCE_OFFSET] != UTTERANCE_MARKER {
        return Err(SkipReason::UnexpectedLayout);
    }

    let dot = name
        .rfind('.')
        .filter(|&i| i > UTTERANCE_OFFSET)
        .unwrap_or(bytes.len());
    let field = &bytes[UTTERANCE_OFFSET..dot];
    if !field.iter().all(u8::is_ascii_digit) || field.len() > 2 {
        return Err(SkipReason::UnexpectedLayout);
    }
    let zero_padded = bytes[DIALOGUE_ID_RANGE.start] == b'0';
    if !zero_padded && (field.len() == 1 || field == STANDARDIZED_TWO_DIGIT) {
        return Err(SkipReason::AmbiguousStandardized);
    }

    // 全为数字，按字节切片一定落在字符边界上
    let raw_id = &name[DIALOGUE_ID_RANGE];
    let mut dialogue_id = raw_id.trim_start_matches('0');
    if dialogue_id.is_empty() {
        dialogue_id = "0";
    }
    let utterance_number = u32::from(utterance - b'0') + 1;
    let extension = &name[dot..];

    Ok(format!("dia{}utt{}{}", dialogue_id, utterance_number, extension))
}

/// 对目录下（不递归）指定扩展名的文件做标准化重命名，返回每个文件的结果。
///
/// 解析失败的文件保持原样并记为 `Skipped`，不会中断整个流程。
pub fn standardize_dir(dir: &Path, extensions: &[String]) -> Result<Vec<RenameOutcome>> {
    let mut files: Vec<PathBuf> = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();

    let mut outcomes = Vec::new();
    for path in files {
        let os_name = match path.file_name() {
            Some(n) => n,
            None => continue,
        };
        // 有损转换不会改变 ASCII 后缀，足够判断扩展名
        let lossy = os_name.to_string_lossy();
        let wanted = extensions
            .iter()
            .any(|ext| lossy.ends_with(&format!(".{}", ext)));
        if !wanted {
            continue;
        }
        match os_name.to_str() {
            Some(name) => outcomes.push(standardize_file(&path, name)?),
            None => {
                warn!(file = %path.display(), "文件名不是UTF-8，跳过");
                outcomes.push(RenameOutcome::Skipped {
                    name: lossy.to_string(),
                    reason: SkipReason::NonUtf8Name,
                });
            }
        }
    }
    Ok(outcomes)
}

fn standardize_file(path: &Path, name: &str) -> Result<RenameOutcome> {
    let new_name = match standardized_name(name) {
        Ok(n) => n,
        Err(reason) => {
            warn!(file = %path.display(), %reason, "文件名不符合 dia/utt 约定，跳过");
            return Ok(RenameOutcome::Skipped {
                name: name.to_string(),
                reason,
            });
        }
    };

    if new_name == name {
        return Ok(RenameOutcome::Unchanged {
            name: name.to_string(),
        });
    }

    let new_path = path.with_file_name(&new_name);
    if new_path.exists() {
        warn!(file = %path.display(), target = %new_name, "目标文件名已存在，跳过");
        return Ok(RenameOutcome::Skipped {
            name: name.to_string(),
            reason: SkipReason::TargetExists,
        });
    }

    fs::rename(path, &new_path)?;
    debug!("重命名: {} -> {}", name, new_name);
    Ok(RenameOutcome::Renamed {
        from: name.to_string(),
        to: new_name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn exts() -> Vec<String> {
        vec!["wav".to_string(), "mp4".to_string()]
    }

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"x").unwrap();
    }

    #[test]
    fn test_standardized_name_strips_zeros_and_shifts_utterance() {
        assert_eq!(standardized_name("dia00001utt00.wav").unwrap(), "dia1utt1.wav");
        assert_eq!(standardized_name("dia00123utt4.mp4").unwrap(), "dia123utt5.mp4");
        assert_eq!(standardized_name("dia10020utt09.wav").unwrap(), "dia10020utt1.wav");
        assert_eq!(standardized_name("dia00042utt19.mp4").unwrap(), "dia42utt2.mp4");
    }

    #[test]
    fn test_standardized_name_all_zero_id() {
        assert_eq!(standardized_name("dia00000utt3.wav").unwrap(), "dia0utt4.wav");
    }

    #[test]
    fn test_standardized_name_rejects_bad_names() {
        assert_eq!(standardized_name("short.wav"), Err(SkipReason::TooShort));
        assert_eq!(standardized_name("dia0001.wav"), Err(SkipReason::TooShort));
        assert_eq!(
            standardized_name("diaabcdeutt0.wav"),
            Err(SkipReason::NonNumericDialogueId)
        );
        assert_eq!(
            standardized_name("dia00001uttx.wav"),
            Err(SkipReason::NonNumericUtterance)
        );
        // 已标准化的名字无法再次解析
        assert_eq!(
            standardized_name("dia1utt1.wav"),
            Err(SkipReason::NonNumericDialogueId)
        );
        assert_eq!(
            standardized_name("dia10020utt9x.wav"),
            Err(SkipReason::UnexpectedLayout)
        );
        assert_eq!(
            standardized_name("xyz00001utt00.wav"),
            Err(SkipReason::UnexpectedLayout)
        );
        assert_eq!(
            standardized_name("dia00001abc00.wav"),
            Err(SkipReason::UnexpectedLayout)
        );
        assert_eq!(
            standardized_name("dia00001utt000.wav"),
            Err(SkipReason::UnexpectedLayout)
        );
    }

    #[test]
    fn test_standardized_name_five_digit_id_outputs_not_reparsed() {
        // 对话ID >= 10000 时，标准化结果仍是数字布局，必须识别出来
        assert_eq!(standardized_name("dia12345utt00.wav").unwrap(), "dia12345utt1.wav");
        assert_eq!(
            standardized_name("dia12345utt1.wav"),
            Err(SkipReason::AmbiguousStandardized)
        );
        assert_eq!(standardized_name("dia12345utt90.wav").unwrap(), "dia12345utt10.wav");
        assert_eq!(
            standardized_name("dia12345utt10.wav"),
            Err(SkipReason::AmbiguousStandardized)
        );
    }

    #[test]
    fn test_standardized_name_non_ascii_does_not_panic() {
        assert!(standardized_name("对话00001utt0.wav").is_err());
    }

    #[test]
    fn test_standardize_dir_renames_and_skips() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "dia00001utt00.wav");
        touch(tmp.path(), "dia00002utt1.mp4");
        touch(tmp.path(), "bad.wav");
        touch(tmp.path(), "dia00003utt0.mp3");

        let outcomes = standardize_dir(tmp.path(), &exts()).unwrap();
        assert_eq!(outcomes.iter().filter(|o| o.is_renamed()).count(), 2);
        assert_eq!(outcomes.iter().filter(|o| o.is_skipped()).count(), 1);

        assert!(tmp.path().join("dia1utt1.wav").exists());
        assert!(tmp.path().join("dia2utt2.mp4").exists());
        assert!(tmp.path().join("bad.wav").exists());
        // mp3 不参与标准化
        assert!(tmp.path().join("dia00003utt0.mp3").exists());
    }

    #[test]
    fn test_standardize_dir_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "dia00001utt00.wav");
        touch(tmp.path(), "dia00007utt2.wav");

        let first = standardize_dir(tmp.path(), &exts()).unwrap();
        assert_eq!(first.iter().filter(|o| o.is_renamed()).count(), 2);

        let second = standardize_dir(tmp.path(), &exts()).unwrap();
        assert_eq!(second.iter().filter(|o| o.is_renamed()).count(), 0);
        assert!(tmp.path().join("dia1utt1.wav").exists());
        assert!(tmp.path().join("dia7utt3.wav").exists());
    }

    #[test]
    fn test_standardize_dir_twice_with_five_digit_id() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "dia12345utt00.wav");
        touch(tmp.path(), "dia12345utt91.mp4");

        let first = standardize_dir(tmp.path(), &exts()).unwrap();
        assert_eq!(first.iter().filter(|o| o.is_renamed()).count(), 2);

        let second = standardize_dir(tmp.path(), &exts()).unwrap();
        assert_eq!(second.iter().filter(|o| o.is_renamed()).count(), 0);
        let third = standardize_dir(tmp.path(), &exts()).unwrap();
        assert_eq!(third.iter().filter(|o| o.is_renamed()).count(), 0);

        assert!(tmp.path().join("dia12345utt1.wav").exists());
        assert!(tmp.path().join("dia12345utt10.mp4").exists());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_standardize_dir_flags_non_utf8_names() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let tmp = TempDir::new().unwrap();
        let raw = OsStr::from_bytes(b"dia\xff0001utt00.wav");
        fs::write(tmp.path().join(raw), b"x").unwrap();

        let outcomes = standardize_dir(tmp.path(), &exts()).unwrap();
        assert_eq!(outcomes.len(), 1);
        assert!(matches!(
            &outcomes[0],
            RenameOutcome::Skipped { reason: SkipReason::NonUtf8Name, .. }
        ));
        assert!(tmp.path().join(raw).exists());
    }

    #[test]
    fn test_standardize_dir_does_not_overwrite_existing_target() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "dia00001utt00.wav");
        fs::write(tmp.path().join("dia1utt1.wav"), b"keep").unwrap();

        let outcomes = standardize_dir(tmp.path(), &exts()).unwrap();
        assert!(outcomes.contains(&RenameOutcome::Skipped {
            name: "dia00001utt00.wav".to_string(),
            reason: SkipReason::TargetExists,
        }));
        assert_eq!(fs::read(tmp.path().join("dia1utt1.wav")).unwrap(), b"keep");
        assert!(tmp.path().join("dia00001utt00.wav").exists());
    }
}
