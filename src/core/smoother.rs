//! 平滑与斜率估计
//!
//! 为峰检测提供局部平滑值和以角度表示的局部斜率。
//!
//! ## 定义
//! - 平滑值：`signal[i-s ..= i+s]` 的算术平均（窗口截断到 `[0, n-1]`）
//! - 斜率角：`atan(Δy / Δx)` 转换为角度，`Δy` 为窗口两端平滑值之差，
//!   `Δx` 为窗口实际跨度（仅在信号末尾被截断时小于 `dx`）
//!
//! 所有函数都是纯函数，永远不会越界读取。

/// 计算位置 `i` 处的平滑值
///
/// `smoothness = 0` 时直接返回原始样本值。
///
/// # Panics
///
/// 当 `i` 超出信号范围时 panic（调用方负责传入合法位置）。
pub fn smoothed_value(signal: &[f64], i: usize, smoothness: usize) -> f64 {
    if smoothness == 0 {
        return signal[i];
    }

    let start = i.saturating_sub(smoothness);
    let end = i.saturating_add(smoothness).min(signal.len() - 1);
    let window = &signal[start..=end];

    window.iter().sum::<f64>() / window.len() as f64
}

/// 计算从位置 `i` 开始、宽度为 `dx` 的窗口的斜率角（度）
///
/// 返回值位于 `(-90, 90)` 区间；窗口退化为单点时返回 0。
pub fn slope_angle(signal: &[f64], i: usize, dx: usize, smoothness: usize) -> f64 {
    let j = window_end(signal.len(), i, dx);
    if j == i {
        return 0.0;
    }

    let rise = smoothed_value(signal, j, smoothness) - smoothed_value(signal, i, smoothness);
    let run = (j - i) as f64;

    (rise / run).atan().to_degrees()
}

/// 窗口终点（截断到最后一个样本）
#[inline]
fn window_end(len: usize, i: usize, dx: usize) -> usize {
    i.saturating_add(dx).min(len.saturating_sub(1))
}

/// 绑定信号与窗口参数的斜率估计器（供扫描循环使用）
#[derive(Debug, Clone, Copy)]
pub struct SlopeEstimator<'a> {
    signal: &'a [f64],
    dx: usize,
    smoothness: usize,
}

impl<'a> SlopeEstimator<'a> {
    /// 创建斜率估计器
    pub fn new(signal: &'a [f64], dx: usize, smoothness: usize) -> Self {
        Self {
            signal,
            dx,
            smoothness,
        }
    }

    /// 从位置 `i` 开始的窗口斜率角（度）
    #[inline]
    pub fn slope_angle(&self, i: usize) -> f64 {
        slope_angle(self.signal, i, self.dx, self.smoothness)
    }

    /// 从位置 `i` 开始的窗口终点
    #[inline]
    pub fn window_end(&self, i: usize) -> usize {
        window_end(self.signal.len(), i, self.dx)
    }
}
