//! 边界条件测试
//!
//! 极短信号、超大窗口、退化区域等边界输入下的行为。


use peaks_analysis_tool::core::{SlopeEstimator, slope_angle, smoothed_value};
use peaks_analysis_tool::{PeakError, compute_peak_statistics, find_in_histogram};
use signal_test_fixtures::{log, triangle_bumps};

// ============================================================================
// 极短信号
// ============================================================================

/// 单样本信号：没有可扫描的窗口，不报错也不返回峰
#[test]
fn test_single_sample_signal() {
    let peaks = find_in_histogram(&[5.0], 1, 0, 15.0, -15.0, 0.0).unwrap();
    assert!(peaks.is_empty());

    // 单样本的手动统计是退化区域
    let peak = compute_peak_statistics(&[5.0], 0, 0).unwrap();
    assert_eq!(peak.as_tuple(), (0, 0, 0, 0.0, 0.0));
    log("单样本信号处理正确", "Single-sample signal handled");
}

/// 只有上升的两点信号不构成峰
#[test]
fn test_two_sample_rise() {
    let peaks = find_in_histogram(&[0.0, 5.0], 1, 0, 15.0, -15.0, 0.0).unwrap();
    assert!(peaks.is_empty());
}

/// 最短的完整峰：上升后立即下降
#[test]
fn test_minimal_three_sample_peak() {
    let peaks = find_in_histogram(&[0.0, 5.0, 0.0], 1, 0, 15.0, -15.0, 0.0).unwrap();

    assert_eq!(peaks.len(), 1);
    assert_eq!(peaks[0].as_tuple(), (0, 2, 1, 5.0, 5.0));
}

// ============================================================================
// 窗口参数
// ============================================================================

/// dx 超过信号长度：只有一个截断到末尾的窗口，无法形成完整峰
#[test]
fn test_dx_larger_than_signal() {
    let signal = triangle_bumps(30, &[10]);
    let peaks = find_in_histogram(&signal, 100, 0, 15.0, -15.0, 0.0).unwrap();

    assert!(peaks.is_empty());
    log("dx 大于信号长度时无峰", "No peaks when dx exceeds signal length");
}

/// 平滑半径超过信号长度：平滑值退化为全局均值，斜率全为 0
#[test]
fn test_smoothness_larger_than_signal() {
    let signal = triangle_bumps(30, &[10]);
    let mean = signal.iter().sum::<f64>() / signal.len() as f64;

    assert!((smoothed_value(&signal, 0, 1000) - mean).abs() < 1e-12);
    assert!((smoothed_value(&signal, 29, 1000) - mean).abs() < 1e-12);
    assert_eq!(slope_angle(&signal, 5, 4, 1000), 0.0);

    let peaks = find_in_histogram(&signal, 2, 1000, 15.0, -15.0, 0.0).unwrap();
    assert!(peaks.is_empty());
}

/// 极大的 dx / smoothness：窗口截断到信号末尾，不会整数溢出
#[test]
fn test_max_window_parameters_saturate() {
    let signal = [0.0, 1.0, 0.0, 3.0];

    assert_eq!(smoothed_value(&signal, 1, usize::MAX), 1.0);
    assert_eq!(slope_angle(&signal, 1, usize::MAX, usize::MAX), 0.0);
    assert!((slope_angle(&signal, 1, usize::MAX, 0) - 45.0).abs() < 1e-12);
    assert_eq!(SlopeEstimator::new(&signal, usize::MAX, 0).window_end(2), 3);

    let bump = [0.0, 1.0, 0.0];
    assert!(
        find_in_histogram(&bump, 1, usize::MAX, 15.0, -15.0, 0.0)
            .unwrap()
            .is_empty()
    );
    assert!(
        find_in_histogram(&bump, usize::MAX, 0, 15.0, -15.0, 0.0)
            .unwrap()
            .is_empty()
    );
    assert!(
        find_in_histogram(&bump, usize::MAX, usize::MAX, 15.0, -15.0, 0.0)
            .unwrap()
            .is_empty()
    );
    log("极大窗口参数不溢出", "Huge window parameters saturate");
}

/// 最后一个窗口被截断时 Δx 取实际跨度，估计器从不越界
#[test]
fn test_estimator_tail_windows_stay_in_bounds() {
    let signal: Vec<f64> = (0..17).map(|i| i as f64).collect();
    let estimator = SlopeEstimator::new(&signal, 5, 2);

    for i in 0..signal.len() {
        let end = estimator.window_end(i);
        assert!(end < signal.len());
        assert!(end >= i);
        let angle = estimator.slope_angle(i);
        assert!(angle > -90.0 && angle < 90.0);
    }
    assert_eq!(estimator.window_end(15), 16);
    assert_eq!(estimator.slope_angle(16), 0.0);
}

/// 峰位于信号开头：区域下界为 0
#[test]
fn test_peak_at_signal_start() {
    let mut signal = vec![0.0; 20];
    signal[..4].copy_from_slice(&[1.0, 3.0, 2.0, 1.0]);
    let peaks = find_in_histogram(&signal, 1, 0, 15.0, -15.0, 0.0).unwrap();

    assert_eq!(peaks.len(), 1);
    assert_eq!(peaks[0].lower_bound, 0);
    assert_eq!(peaks[0].height_index, 1);
}

/// 衰减持续到信号末尾：区域在最后一个样本闭合
#[test]
fn test_abate_run_reaching_signal_end() {
    let signal = [0.0, 0.0, 2.0, 4.0, 6.0, 3.0, 0.0];
    let peaks = find_in_histogram(&signal, 1, 0, 15.0, -15.0, 0.0).unwrap();

    assert_eq!(peaks.len(), 1);
    assert_eq!(peaks[0].upper_bound, signal.len() - 1);
    assert_eq!(peaks[0].height_index, 4);
}

// ============================================================================
// 手动边界
// ============================================================================

/// lb == ub：峰顶即该点，高度与面积为 0
#[test]
fn test_degenerate_statistics_region() {
    let signal = triangle_bumps(30, &[10]);
    let peak = compute_peak_statistics(&signal, 12, 12).unwrap();

    assert_eq!(peak.as_tuple(), (12, 12, 12, 0.0, 0.0));
    assert_eq!(peak.width(), 1);
}

/// 完整信号作为区域
#[test]
fn test_statistics_over_whole_signal() {
    let signal = triangle_bumps(30, &[10]);
    let peak = compute_peak_statistics(&signal, 0, signal.len() - 1).unwrap();

    assert_eq!(peak.height_index, 12);
    assert_eq!(peak.peak_height, 3.0);
    assert_eq!(peak.peak_area, 9.0);
}

/// 越界或颠倒的边界返回配置错误，而不是截断
#[test]
fn test_out_of_range_bounds_rejected() {
    let signal = triangle_bumps(30, &[10]);

    for (lb, ub) in [(0, 30), (29, 100), (20, 10), (usize::MAX, 0)] {
        let result = compute_peak_statistics(&signal, lb, ub);
        assert!(
            matches!(result, Err(PeakError::InvalidConfig(_))),
            "lb={lb}, ub={ub}: {result:?}"
        );
    }
}

/// 区域端点不是最低点时，基线以下的部分不计入面积
#[test]
fn test_negative_contributions_clamped() {
    let signal = [5.0, 0.0, 10.0, 0.0, 3.0];
    let peak = compute_peak_statistics(&signal, 0, 4).unwrap();

    // 基线 3，贡献: 2, 0, 7, 0, 0
    assert_eq!(peak.height_index, 2);
    assert_eq!(peak.peak_height, 7.0);
    assert_eq!(peak.peak_area, 1.0 + 3.5 + 3.5);
}
