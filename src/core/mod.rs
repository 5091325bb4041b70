//! 核心算法模块
//!
//! 包含峰检测的核心数据结构和算法实现。

pub mod detector;
pub mod peak_info;
pub mod smoother;
pub mod statistics;

// 重新导出公共接口
pub use detector::{DetectionParams, find_in_histogram, find_peaks};
pub use peak_info::PeakInfo;
pub use smoother::{SlopeEstimator, slope_angle, smoothed_value};
pub use statistics::compute_peak_statistics;
