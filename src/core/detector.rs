//! 峰自动检测器
//!
//! 以 `dx` 为步长扫描信号，按窗口斜率角把信号切分为"生长段"和"衰减段"，
//! 一个生长段紧接一个衰减段构成一个候选峰区域。
//!
//! ## 三态状态机
//! - **Idle**: 等待斜率角 ≥ `growth_angle` 的窗口开启生长段
//! - **Growing**: 生长段，容忍平坦窗口（峰顶平台）；遇到衰减窗口转入 Abating
//! - **Abating**: 衰减段，每个衰减窗口把上界延伸到窗口终点；
//!   遇到非衰减窗口或信号结束时闭合候选区域
//!
//! 闭合衰减段的窗口若为生长窗口，则立即开启下一个生长段，其下界从上一个
//! 上界之后的样本开始（共享的谷底样本归属前一个峰），保证区域互不重叠。
//!
//! 候选区域的统计由 [`super::statistics`] 计算，再按 `height_thres` 过滤。
//!
//! ## 窗口对齐
//! 窗口 `[p, p+dx]` 首尾相接、互不重叠。`dx` 不超过峰上升沿的样本数时，
//! 峰总会被检测到；`dx` 更大时，若某个窗口恰好跨过峰顶且两端等高，
//! 上升与下降相互抵消为平坦窗口，该峰会被漏检（结果依赖峰相对扫描网格的位置）。

use super::peak_info::PeakInfo;
use super::smoother::SlopeEstimator;
use super::statistics::{region_statistics, validate_signal};
use crate::error::{PeakResult, config_error};
use crate::tools::constants::defaults;
use serde::Serialize;

/// 自动检测参数
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DetectionParams {
    /// 分析窗口宽度（样本数），同时作为扫描步长
    pub dx: usize,
    /// 平滑半径：斜率计算前对每个端点做 `2*smoothness+1` 点平均
    pub smoothness: usize,
    /// 生长角（度）：斜率角不小于该值视为"真正上升"
    pub growth_angle: f64,
    /// 衰减角（度）：斜率角不大于该值视为"真正下降"
    pub abate_angle: f64,
    /// 峰高阈值：低于该高度的候选峰被丢弃
    pub height_thres: f64,
}

impl Default for DetectionParams {
    fn default() -> Self {
        Self {
            dx: defaults::DX,
            smoothness: defaults::SMOOTHNESS,
            growth_angle: defaults::GROWTH_ANGLE,
            abate_angle: defaults::ABATE_ANGLE,
            height_thres: defaults::HEIGHT_THRES,
        }
    }
}

impl DetectionParams {
    /// 创建检测参数
    pub fn new(
        dx: usize,
        smoothness: usize,
        growth_angle: f64,
        abate_angle: f64,
        height_thres: f64,
    ) -> Self {
        Self {
            dx,
            smoothness,
            growth_angle,
            abate_angle,
            height_thres,
        }
    }

    pub fn with_dx(mut self, dx: usize) -> Self {
        self.dx = dx;
        self
    }

    pub fn with_smoothness(mut self, smoothness: usize) -> Self {
        self.smoothness = smoothness;
        self
    }

    pub fn with_angles(mut self, growth_angle: f64, abate_angle: f64) -> Self {
        self.growth_angle = growth_angle;
        self.abate_angle = abate_angle;
        self
    }

    pub fn with_height_thres(mut self, height_thres: f64) -> Self {
        self.height_thres = height_thres;
        self
    }

    /// 参数校验
    ///
    /// 角度必须有限且位于 `(-90, 90)` 开区间（斜率角取不到 ±90°），
    /// 且 `growth_angle > abate_angle`；`height_thres` 必须为非负数。
    pub fn validate(&self) -> PeakResult<()> {
        if self.dx == 0 {
            return Err(config_error("dx 必须大于 0"));
        }

        for (name, angle) in [
            ("growth_angle", self.growth_angle),
            ("abate_angle", self.abate_angle),
        ] {
            if !angle.is_finite() || angle.abs() >= 90.0 {
                return Err(config_error(format!(
                    "{name}={angle} 超出有效范围 (-90°, 90°)"
                )));
            }
        }

        if self.growth_angle <= self.abate_angle {
            return Err(config_error(format!(
                "growth_angle={} 必须大于 abate_angle={}",
                self.growth_angle, self.abate_angle
            )));
        }

        // `!(x >= 0.0)` 同时拒绝 NaN
        if !(self.height_thres >= 0.0) {
            return Err(config_error(format!(
                "height_thres={} 必须为非负数",
                self.height_thres
            )));
        }

        Ok(())
    }
}

/// 窗口分类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Trend {
    Growing,
    Abating,
    Flat,
}

/// 扫描状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Idle,
    Growing { start: usize },
    Abating { start: usize, end: usize },
}

/// 在信号中自动检测峰
///
/// 参数含义见 [`DetectionParams`]。返回的峰按 `lower_bound` 升序排列且互不重叠；
/// 找不到峰时返回空序列（成功结果，而非错误）。
///
/// # 错误
/// - [`PeakError::EmptyInput`](crate::error::PeakError::EmptyInput)：空信号
/// - [`PeakError::NonFiniteSample`](crate::error::PeakError::NonFiniteSample)：含 NaN/Inf
/// - [`PeakError::InvalidConfig`](crate::error::PeakError::InvalidConfig)：参数非法
pub fn find_in_histogram(
    signal: &[f64],
    dx: usize,
    smoothness: usize,
    growth_angle: f64,
    abate_angle: f64,
    height_thres: f64,
) -> PeakResult<Vec<PeakInfo>> {
    let params = DetectionParams::new(dx, smoothness, growth_angle, abate_angle, height_thres);
    find_peaks(signal, &params)
}

/// 使用参数结构体的检测入口
pub fn find_peaks(signal: &[f64], params: &DetectionParams) -> PeakResult<Vec<PeakInfo>> {
    validate_signal(signal)?;
    params.validate()?;

    let regions = segment_regions(signal, params);

    let peaks: Vec<PeakInfo> = regions
        .into_iter()
        .map(|(lb, ub)| region_statistics(signal, lb, ub))
        .filter(|peak| peak.peak_height >= params.height_thres)
        .collect();

    debug_assert!(peaks.windows(2).all(|pair| !pair[0].overlaps(&pair[1])));
    Ok(peaks)
}

/// 生长/衰减分段，返回闭合的候选区域 `(lower_bound, upper_bound)`
fn segment_regions(signal: &[f64], params: &DetectionParams) -> Vec<(usize, usize)> {
    let estimator = SlopeEstimator::new(signal, params.dx, params.smoothness);
    let classify = |angle: f64| {
        if angle >= params.growth_angle {
            Trend::Growing
        } else if angle <= params.abate_angle {
            Trend::Abating
        } else {
            Trend::Flat
        }
    };

    let last = signal.len() - 1;
    let mut regions = Vec::new();
    let mut state = ScanState::Idle;
    let mut position = 0;

    loop {
        let window_end = estimator.window_end(position);
        let trend = classify(estimator.slope_angle(position));

        state = match (state, trend) {
            (ScanState::Idle, Trend::Growing) => ScanState::Growing { start: position },
            (ScanState::Idle, _) => ScanState::Idle,

            (ScanState::Growing { start }, Trend::Abating) => ScanState::Abating {
                start,
                end: window_end,
            },
            (ScanState::Growing { start }, _) => ScanState::Growing { start },

            (ScanState::Abating { start, .. }, Trend::Abating) => ScanState::Abating {
                start,
                end: window_end,
            },
            (ScanState::Abating { start, end }, Trend::Growing) => {
                regions.push((start, end));
                // 谷底样本归属前一个峰
                ScanState::Growing {
                    start: (end + 1).max(position),
                }
            }
            (ScanState::Abating { start, end }, Trend::Flat) => {
                regions.push((start, end));
                ScanState::Idle
            }
        };

        position = position.saturating_add(params.dx);
        if position >= last {
            break;
        }
    }

    // 衰减段延续到信号末尾：区域完整
    if let ScanState::Abating { start, end } = state {
        regions.push((start, end));
    }

    regions
}
