//! 常量和默认配置集中管理
//!
//! 将所有重要常量集中定义，避免"默认值漂移"和重复定义

/// 默认检测参数
///
/// 适用于典型色谱样本
pub mod defaults {
    /// 默认分析窗口宽度（样本数）
    pub const DX: usize = 15;

    /// 默认平滑半径
    pub const SMOOTHNESS: usize = 5;

    /// 默认生长角（度）
    pub const GROWTH_ANGLE: f64 = 15.0;

    /// 默认衰减角（度）
    pub const ABATE_ANGLE: f64 = -15.0;

    /// 默认峰高阈值
    pub const HEIGHT_THRES: f64 = 40.0;
}

/// 数据文件解析常量
pub mod loader {
    /// 注释行前缀
    pub const COMMENT_PREFIXES: &[&str] = &["#", "//"];

    /// 支持的列分隔符（空白字符另行处理）
    pub const FIELD_SEPARATORS: &[char] = &[',', ';', '\t'];
}

/// 应用信息
pub mod app_info {
    /// 报告标题行
    pub fn format_output_header(version: &str) -> String {
        format!("Peaks Analysis Tool v{version} / Peak detection and characterization")
    }

    /// 报告分隔线长度
    pub const SEPARATOR_WIDTH: usize = 80;
}
