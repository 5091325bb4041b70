//! Peaks Analysis Tool
//!
//! 一维信号（直方图、光谱、色谱）的峰检测与峰统计工具。
//!
//! ## 核心特性
//! - 基于窗口斜率角的生长/衰减分段自动检测：`find_in_histogram`
//! - 手动指定边界的峰统计：`compute_peak_statistics`
//! - 两种途径共用同一套峰顶、基线、峰高、梯形面积规则，结果逐位一致
//! - 纯计算、无共享状态，可在多线程中并发调用

pub mod core;
pub mod error;
pub mod tools;

// 重新导出核心类型
pub use core::{DetectionParams, PeakInfo, compute_peak_statistics, find_in_histogram, find_peaks};
pub use error::{PeakError, PeakResult};
