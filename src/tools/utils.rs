//! 工具函数模块
//!
//! 提供文件路径处理和数值显示等通用工具函数。

/// 文件路径处理工具函数
pub mod path {
    use std::path::Path;

    /// 提取文件名（统一处理路径提取逻辑）
    #[inline]
    pub fn extract_filename(path: &Path) -> &str {
        path.file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("Unknown")
    }

    /// 提取文件名（返回String，用于日志显示）
    #[inline]
    pub fn extract_filename_lossy(path: &Path) -> String {
        path.file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string()
    }
}

/// 数值显示工具函数
pub mod display {
    /// 横轴位置显示：整数值不带小数，其余保留最多6位有效小数
    pub fn format_position(value: f64) -> String {
        if value.fract() == 0.0 && value.abs() < 1e15 {
            format!("{value:.0}")
        } else {
            let text = format!("{value:.6}");
            text.trim_end_matches('0').trim_end_matches('.').to_string()
        }
    }
}

// 重新导出为平级函数
pub use display::format_position;
pub use path::{extract_filename, extract_filename_lossy};
