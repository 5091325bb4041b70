//! 统一错误处理框架
//!
//! 峰检测核心与工具层共用的错误类型定义。

use std::fmt;
use std::io;

/// 峰分析相关的统一错误类型
#[derive(Debug)]
pub enum PeakError {
    /// 参数配置错误（dx、角度阈值、高度阈值、边界等）
    InvalidConfig(String),

    /// 输入信号为空
    EmptyInput,

    /// 信号中存在NaN或无穷值
    NonFiniteSample { index: usize },

    /// 文件I/O错误（仅工具层）
    IoError(io::Error),

    /// 数据文件格式错误（仅工具层）
    FormatError(String),
}

impl fmt::Display for PeakError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeakError::InvalidConfig(msg) => write!(f, "参数配置错误: {msg}"),
            PeakError::EmptyInput => write!(f, "输入信号为空"),
            PeakError::NonFiniteSample { index } => {
                write!(f, "信号在索引 {index} 处包含非有限值(NaN/Inf)")
            }
            PeakError::IoError(err) => write!(f, "文件I/O错误: {err}"),
            PeakError::FormatError(msg) => write!(f, "数据格式错误: {msg}"),
        }
    }
}

impl std::error::Error for PeakError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PeakError::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for PeakError {
    fn from(err: io::Error) -> Self {
        PeakError::IoError(err)
    }
}

/// 峰分析操作的标准Result类型
pub type PeakResult<T> = Result<T, PeakError>;

// ==================== 错误转换Helper函数 ====================

/// 创建配置错误的helper函数
#[inline]
pub fn config_error(msg: impl Into<String>) -> PeakError {
    PeakError::InvalidConfig(msg.into())
}

/// 创建格式错误的helper函数
#[inline]
pub fn format_error<E: fmt::Display>(context: &str, err: E) -> PeakError {
    PeakError::FormatError(format!("{context}: {err}"))
}

// ==================== 错误分类系统 ====================

/// 错误类别枚举（用于CLI退出码和建议文本）
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum ErrorCategory {
    /// 参数相关错误
    Config,
    /// 数据相关错误（空信号、非有限值、文件格式）
    Data,
    /// I/O相关错误（文件不存在、权限不足等）
    Io,
}

impl ErrorCategory {
    /// 从PeakError提取错误类别
    pub fn from_peak_error(e: &PeakError) -> Self {
        match e {
            PeakError::InvalidConfig(_) => Self::Config,
            PeakError::EmptyInput
            | PeakError::NonFiniteSample { .. }
            | PeakError::FormatError(_) => Self::Data,
            PeakError::IoError(_) => Self::Io,
        }
    }

    /// 获取错误类别的显示名称
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Config => "参数错误",
            Self::Data => "数据错误",
            Self::Io => "I/O错误",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = config_error("dx 必须大于 0");
        assert_eq!(err.to_string(), "参数配置错误: dx 必须大于 0");

        let err = PeakError::NonFiniteSample { index: 7 };
        assert!(err.to_string().contains('7'));
    }

    #[test]
    fn test_error_category() {
        assert_eq!(
            ErrorCategory::from_peak_error(&PeakError::EmptyInput),
            ErrorCategory::Data
        );
        assert_eq!(
            ErrorCategory::from_peak_error(&config_error("x")),
            ErrorCategory::Config
        );
        let io_err = PeakError::from(io::Error::new(io::ErrorKind::NotFound, "missing"));
        assert_eq!(ErrorCategory::from_peak_error(&io_err), ErrorCategory::Io);
        assert!(std::error::Error::source(&io_err).is_some());
    }
}
