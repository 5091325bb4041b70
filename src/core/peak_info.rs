//! 峰描述符
//!
//! 自动检测与手动统计共用的结果类型。

use serde::Serialize;
use std::fmt;

/// 单个峰的描述信息
///
/// 不变式：`lower_bound <= height_index <= upper_bound < 信号长度`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PeakInfo {
    /// 峰区域起点索引
    pub lower_bound: usize,

    /// 峰区域终点索引（包含）
    pub upper_bound: usize,

    /// 峰顶索引（区域内最大值，并列时取最左侧）
    pub height_index: usize,

    /// 峰高：峰顶值减去基线
    pub peak_height: f64,

    /// 峰面积：基线以上部分的梯形积分
    pub peak_area: f64,
}

impl PeakInfo {
    /// 区域包含的样本数
    #[inline]
    pub fn width(&self) -> usize {
        self.upper_bound - self.lower_bound + 1
    }

    /// 判断两个峰区域是否重叠
    #[inline]
    pub fn overlaps(&self, other: &PeakInfo) -> bool {
        self.lower_bound <= other.upper_bound && other.lower_bound <= self.upper_bound
    }

    /// 转换为 `(lb, ub, hi, ph, pa)` 五元组
    #[inline]
    pub fn as_tuple(&self) -> (usize, usize, usize, f64, f64) {
        (
            self.lower_bound,
            self.upper_bound,
            self.height_index,
            self.peak_height,
            self.peak_area,
        )
    }
}

impl fmt::Display for PeakInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(lb={}, ub={}, hi={}, ph={}, pa={})",
            self.lower_bound, self.upper_bound, self.height_index, self.peak_height, self.peak_area
        )
    }
}
