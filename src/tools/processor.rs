//! 分析处理模块
//!
//! 负责加载数据文件、调用核心算法并输出结果。

use super::cli::{AnalysisMode, AppConfig};
use super::loader::{self, SignalData};
use super::{formatter, utils};
use crate::core::{DetectionParams, PeakInfo, compute_peak_statistics, find_peaks};
use crate::error::PeakResult;

/// 分析结果
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    /// 自动检测：使用的参数与检测到的峰
    Detected {
        params: DetectionParams,
        peaks: Vec<PeakInfo>,
    },
    /// 手动边界统计
    Statistics(PeakInfo),
}

impl AnalysisOutcome {
    /// 结果中的峰
    pub fn peaks(&self) -> &[PeakInfo] {
        match self {
            Self::Detected { peaks, .. } => peaks,
            Self::Statistics(peak) => std::slice::from_ref(peak),
        }
    }
}

/// 对已加载的信号执行分析
pub fn analyze_signal(data: &SignalData, mode: &AnalysisMode) -> PeakResult<AnalysisOutcome> {
    match *mode {
        AnalysisMode::Detect(params) => Ok(AnalysisOutcome::Detected {
            params,
            peaks: find_peaks(&data.y, &params)?,
        }),
        AnalysisMode::Statistics {
            lower_bound,
            upper_bound,
        } => compute_peak_statistics(&data.y, lower_bound, upper_bound)
            .map(AnalysisOutcome::Statistics),
    }
}

/// 加载并分析输入文件
pub fn process_input_file(config: &AppConfig) -> PeakResult<(SignalData, AnalysisOutcome)> {
    if config.verbose {
        eprintln!(
            "[INFO] 加载数据文件 / Loading data file: {}",
            config.input_path.display()
        );
    }

    let data = loader::load_signal(&config.input_path)?;

    if config.verbose {
        eprintln!(
            "[INFO] 已加载 {} 个样本 / Loaded {} samples from {}",
            data.len(),
            data.len(),
            utils::extract_filename_lossy(&config.input_path)
        );
        match &config.mode {
            AnalysisMode::Detect(params) => eprintln!(
                "[INFO] 自动检测 / Auto detection: dx={}, smooth={}, growth={}, abate={}, height_thres={}",
                params.dx,
                params.smoothness,
                params.growth_angle,
                params.abate_angle,
                params.height_thres
            ),
            AnalysisMode::Statistics {
                lower_bound,
                upper_bound,
            } => eprintln!(
                "[INFO] 手动边界统计 / Manual bounds: lb={lower_bound}, ub={upper_bound}"
            ),
        }
    }

    let outcome = analyze_signal(&data, &config.mode)?;

    if config.verbose {
        eprintln!(
            "[INFO] 分析完成，共 {} 个峰 / Analysis finished, {} peak(s)",
            outcome.peaks().len(),
            outcome.peaks().len()
        );
    }

    Ok((data, outcome))
}

/// 渲染并写出分析结果
pub fn output_results(
    config: &AppConfig,
    data: &SignalData,
    outcome: &AnalysisOutcome,
) -> PeakResult<()> {
    let output = formatter::render_report(config, data, outcome)?;
    formatter::write_output(&output, config)
}
