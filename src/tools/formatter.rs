//! 输出格式化模块
//!
//! 负责峰分析结果的文本报告与JSON报告输出。索引通过横轴 `X` 映射为物理位置，
//! 原始索引同时保留以便回查。

use super::cli::{AppConfig, OutputFormat};
use super::constants::app_info;
use super::loader::SignalData;
use super::processor::AnalysisOutcome;
use super::utils;
use crate::core::{DetectionParams, PeakInfo};
use crate::error::{PeakError, PeakResult, format_error};
use serde::Serialize;

/// 应用程序版本信息
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// JSON报告中的单个峰
#[derive(Debug, Serialize)]
pub struct PeakRecord {
    #[serde(flatten)]
    pub info: PeakInfo,
    /// 起点的横轴位置
    pub lower_x: f64,
    /// 终点的横轴位置
    pub upper_x: f64,
    /// 峰顶的横轴位置
    pub apex_x: f64,
    /// 区域样本数
    pub width: usize,
}

/// JSON报告
#[derive(Debug, Serialize)]
pub struct JsonReport {
    pub tool_version: &'static str,
    pub mode: &'static str,
    pub input: String,
    pub samples: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<DetectionParams>,
    pub peaks: Vec<PeakRecord>,
}

/// 把峰描述符与横轴位置组合
pub fn to_record(data: &SignalData, info: &PeakInfo) -> PeakResult<PeakRecord> {
    let position = |index: usize| {
        data.x_at(index).ok_or_else(|| {
            PeakError::InvalidConfig(format!("索引 {index} 超出横轴范围 ({})", data.x.len()))
        })
    };

    Ok(PeakRecord {
        info: *info,
        lower_x: position(info.lower_bound)?,
        upper_x: position(info.upper_bound)?,
        apex_x: position(info.height_index)?,
        width: info.width(),
    })
}

/// 分隔线
fn separator(ch: char) -> String {
    let mut line = ch.to_string().repeat(app_info::SEPARATOR_WIDTH);
    line.push('\n');
    line
}

/// 创建输出头部信息
pub fn create_output_header(config: &AppConfig, data: &SignalData) -> String {
    let mut output = String::new();

    output.push_str(&app_info::format_output_header(VERSION));
    output.push('\n');
    let now = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
    output.push_str(&format!("log date: {now}\n\n"));

    output.push_str(&separator('-'));
    let file_name = utils::extract_filename(&config.input_path);
    output.push_str(&format!("Statistics for: {file_name}\n"));
    output.push_str(&format!("Number of samples: {}\n", data.len()));
    output.push_str(&separator('-'));
    output.push('\n');

    output
}

/// 格式化单个峰（位置使用横轴值，原始索引附在行尾）
fn format_peak_line(data: &SignalData, info: &PeakInfo) -> PeakResult<String> {
    let record = to_record(data, info)?;
    Ok(format!(
        "(lb={}, ub={}, hi={}, ph={}, pa={})   [index {}..{} @ {}]",
        utils::format_position(record.lower_x),
        utils::format_position(record.upper_x),
        utils::format_position(record.apex_x),
        info.peak_height,
        info.peak_area,
        info.lower_bound,
        info.upper_bound,
        info.height_index
    ))
}

/// 格式化自动检测结果
pub fn format_detection_results(
    data: &SignalData,
    params: &DetectionParams,
    peaks: &[PeakInfo],
) -> PeakResult<String> {
    let mut output = String::new();

    output.push_str(&format!(
        "Detection parameters: (dx={}, smooth={}, growth={}, abate={}, height_thres={})\n\n",
        params.dx, params.smoothness, params.growth_angle, params.abate_angle, params.height_thres
    ));

    if peaks.is_empty() {
        output.push_str("No peaks found / 未检测到峰\n");
        return Ok(output);
    }

    for (i, peak) in peaks.iter().enumerate() {
        output.push_str(&format!("{:>3} - {}\n", i + 1, format_peak_line(data, peak)?));
    }
    output.push('\n');
    output.push_str(&format!("Peaks found: {}\n", peaks.len()));

    Ok(output)
}

/// 格式化手动边界统计结果
pub fn format_statistics_result(data: &SignalData, peak: &PeakInfo) -> PeakResult<String> {
    Ok(format!(
        "Peak characterization / 峰统计:\n{}\n",
        format_peak_line(data, peak)?
    ))
}

/// 构建JSON报告
pub fn build_json_report(
    config: &AppConfig,
    data: &SignalData,
    outcome: &AnalysisOutcome,
) -> PeakResult<JsonReport> {
    let (mode, params, peaks) = match outcome {
        AnalysisOutcome::Detected { params, peaks } => ("detect", Some(*params), peaks.as_slice()),
        AnalysisOutcome::Statistics(peak) => ("statistics", None, std::slice::from_ref(peak)),
    };

    let peaks = peaks
        .iter()
        .map(|peak| to_record(data, peak))
        .collect::<PeakResult<Vec<_>>>()?;

    Ok(JsonReport {
        tool_version: VERSION,
        mode,
        input: utils::extract_filename_lossy(&config.input_path),
        samples: data.len(),
        params,
        peaks,
    })
}

/// 根据输出格式组装完整报告
pub fn render_report(
    config: &AppConfig,
    data: &SignalData,
    outcome: &AnalysisOutcome,
) -> PeakResult<String> {
    match config.output_format {
        OutputFormat::Json => {
            let report = build_json_report(config, data, outcome)?;
            let mut json = serde_json::to_string_pretty(&report)
                .map_err(|e| format_error("JSON序列化失败", e))?;
            json.push('\n');
            Ok(json)
        }
        OutputFormat::Text => {
            let mut output = create_output_header(config, data);
            match outcome {
                AnalysisOutcome::Detected { params, peaks } => {
                    output.push_str(&format_detection_results(data, params, peaks)?);
                }
                AnalysisOutcome::Statistics(peak) => {
                    output.push_str(&format_statistics_result(data, peak)?);
                }
            }
            output.push_str(&separator('='));
            Ok(output)
        }
    }
}

/// 处理输出写入（文件或控制台）
pub fn write_output(output: &str, config: &AppConfig) -> PeakResult<()> {
    match &config.output_path {
        Some(output_path) => {
            std::fs::write(output_path, output)?;
            if config.verbose {
                eprintln!(
                    "[INFO] 结果已保存到 / Results saved to: {}",
                    output_path.display()
                );
            }
        }
        None => print!("{output}"),
    }
    Ok(())
}
