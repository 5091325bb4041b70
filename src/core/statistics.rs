//! 峰统计计算
//!
//! 对给定区域计算峰顶、峰高和峰面积。自动检测和手动指定边界共用同一套规则，
//! 因此相同边界下两种途径的结果逐位一致。
//!
//! ## 规则
//! - 峰顶：区域内原始样本最大值的索引，并列时取最左侧
//! - 基线：`min(signal[lb], signal[ub])`
//! - 峰高：`signal[hi] - 基线`
//! - 峰面积：对 `max(signal[k] - 基线, 0)` 做单位间距梯形积分，单点区域面积为 0

use super::peak_info::PeakInfo;
use crate::error::{PeakError, PeakResult, config_error};

/// 计算手动指定区域 `[lower_bound, upper_bound]` 的峰统计
///
/// 不做生长/衰减分段，边界越界或颠倒时返回配置错误（不会静默截断）。
///
/// # 示例
///
/// ```
/// use peaks_analysis_tool::compute_peak_statistics;
///
/// let signal = [0.0, 1.0, 3.0, 1.0, 0.0];
/// let peak = compute_peak_statistics(&signal, 0, 4).unwrap();
/// assert_eq!(peak.height_index, 2);
/// assert_eq!(peak.peak_height, 3.0);
/// assert_eq!(peak.peak_area, 5.0);
/// ```
pub fn compute_peak_statistics(
    signal: &[f64],
    lower_bound: usize,
    upper_bound: usize,
) -> PeakResult<PeakInfo> {
    validate_signal(signal)?;

    if lower_bound > upper_bound {
        return Err(config_error(format!(
            "边界颠倒: lower_bound={lower_bound} > upper_bound={upper_bound}"
        )));
    }
    if upper_bound >= signal.len() {
        return Err(config_error(format!(
            "边界越界: upper_bound={upper_bound}，信号长度为 {}",
            signal.len()
        )));
    }

    Ok(region_statistics(signal, lower_bound, upper_bound))
}

/// 校验信号非空且所有样本有限
pub(crate) fn validate_signal(signal: &[f64]) -> PeakResult<()> {
    if signal.is_empty() {
        return Err(PeakError::EmptyInput);
    }
    if let Some(index) = signal.iter().position(|v| !v.is_finite()) {
        return Err(PeakError::NonFiniteSample { index });
    }
    Ok(())
}

/// 区域统计（调用方保证边界合法）
pub(crate) fn region_statistics(signal: &[f64], lower_bound: usize, upper_bound: usize) -> PeakInfo {
    debug_assert!(lower_bound <= upper_bound && upper_bound < signal.len());

    let region = &signal[lower_bound..=upper_bound];
    let baseline = baseline(signal, lower_bound, upper_bound);

    let mut apex_offset = 0;
    for (offset, &value) in region.iter().enumerate() {
        if value > region[apex_offset] {
            apex_offset = offset;
        }
    }
    let height_index = lower_bound + apex_offset;

    PeakInfo {
        lower_bound,
        upper_bound,
        height_index,
        peak_height: signal[height_index] - baseline,
        peak_area: trapezoid_area(region, baseline),
    }
}

/// 基线：两端样本的较小值
#[inline]
pub fn baseline(signal: &[f64], lower_bound: usize, upper_bound: usize) -> f64 {
    signal[lower_bound].min(signal[upper_bound])
}

/// 基线以上部分的梯形积分（单位采样间距，负贡献截断为 0）
pub fn trapezoid_area(region: &[f64], baseline: f64) -> f64 {
    region
        .windows(2)
        .map(|pair| {
            let left = (pair[0] - baseline).max(0.0);
            let right = (pair[1] - baseline).max(0.0);
            (left + right) * 0.5
        })
        .sum()
}
