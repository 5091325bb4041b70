//! 数据加载模块
//!
//! 读取两列 `X,Y` 文本/CSV 文件，得到对齐的两个序列。核心算法只使用 `Y`，
//! `X` 仅用于把返回的索引映射回保留时间/频率等物理位置。
//!
//! 支持格式：
//! - 逗号、分号、制表符或空白分隔
//! - 空行和 `#` / `//` 注释行被跳过
//! - 首个数据行无法解析为数字时视为表头并跳过
//! - 单列文件：视为 `Y`，`X` 取样本索引

use super::constants::loader::{COMMENT_PREFIXES, FIELD_SEPARATORS};
use crate::error::{PeakError, PeakResult, format_error};
use std::fs;
use std::path::Path;

/// 加载得到的信号数据
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SignalData {
    /// 横轴位置（保留时间、频率等）
    pub x: Vec<f64>,
    /// 信号值
    pub y: Vec<f64>,
}

impl SignalData {
    /// 用信号值创建数据，横轴取样本索引
    pub fn from_values(y: Vec<f64>) -> Self {
        let x = (0..y.len()).map(|i| i as f64).collect();
        Self { x, y }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.y.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }

    /// 把样本索引映射为横轴位置
    #[inline]
    pub fn x_at(&self, index: usize) -> Option<f64> {
        self.x.get(index).copied()
    }
}

/// 从文件加载信号
pub fn load_signal(path: &Path) -> PeakResult<SignalData> {
    let content = fs::read_to_string(path)?;
    parse_signal(&content)
}

/// 从文本内容解析信号
pub fn parse_signal(content: &str) -> PeakResult<SignalData> {
    let mut data = SignalData::default();
    let mut single_column = None;
    let mut seen_data_line = false;

    for (line_index, raw_line) in content.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || COMMENT_PREFIXES.iter().any(|p| line.starts_with(p)) {
            continue;
        }

        let fields = split_fields(line);
        let parsed: Result<Vec<f64>, _> = fields.iter().map(|f| f.parse::<f64>()).collect();

        let values = match parsed {
            Ok(values) => values,
            // 首个数据行无法解析：表头
            Err(_) if !seen_data_line => {
                seen_data_line = true;
                continue;
            }
            Err(e) => {
                return Err(format_error(&format!("第 {} 行无法解析", line_index + 1), e));
            }
        };
        seen_data_line = true;

        let is_single = values.len() == 1;
        match single_column {
            None => single_column = Some(is_single),
            Some(expected) if expected != is_single => {
                return Err(PeakError::FormatError(format!(
                    "第 {} 行列数与前面的数据行不一致",
                    line_index + 1
                )));
            }
            Some(_) => {}
        }

        if is_single {
            data.x.push(data.y.len() as f64);
            data.y.push(values[0]);
        } else {
            data.x.push(values[0]);
            data.y.push(values[1]);
        }
    }

    if data.is_empty() {
        return Err(PeakError::EmptyInput);
    }

    Ok(data)
}

/// 拆分字段：优先使用显式分隔符，否则按空白拆分
fn split_fields(line: &str) -> Vec<&str> {
    if line.contains(FIELD_SEPARATORS) {
        line.split(FIELD_SEPARATORS)
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .collect()
    } else {
        line.split_whitespace().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_comma_separated() {
        let data = parse_signal("0.5,1\n1.0,2\n1.5,3\n").unwrap();
        assert_eq!(data.x, vec![0.5, 1.0, 1.5]);
        assert_eq!(data.y, vec![1.0, 2.0, 3.0]);
        assert_eq!(data.x_at(2), Some(1.5));
        assert_eq!(data.x_at(3), None);
    }

    #[test]
    fn test_parse_header_comments_and_whitespace() {
        let content = "# chromatogram\nrt intensity\n\n1 10\n2\t20\n// trailing comment\n3;30\n";
        let data = parse_signal(content).unwrap();
        assert_eq!(data.x, vec![1.0, 2.0, 3.0]);
        assert_eq!(data.y, vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn test_parse_single_column_uses_index() {
        let data = parse_signal("4\n5\n6\n").unwrap();
        assert_eq!(data.x, vec![0.0, 1.0, 2.0]);
        assert_eq!(data.y, vec![4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(parse_signal(""), Err(PeakError::EmptyInput)));
        assert!(matches!(
            parse_signal("x,y\n"),
            Err(PeakError::EmptyInput)
        ));

        match parse_signal("1,2\n2,abc\n") {
            Err(PeakError::FormatError(msg)) => assert!(msg.contains("第 2 行")),
            other => panic!("应返回格式错误，实际: {other:?}"),
        }

        assert!(matches!(
            parse_signal("1,2\n3\n"),
            Err(PeakError::FormatError(_))
        ));
    }

    #[test]
    fn test_from_values() {
        let data = SignalData::from_values(vec![1.0, 2.0]);
        assert_eq!(data.x, vec![0.0, 1.0]);
        assert_eq!(data.len(), 2);
    }
}
