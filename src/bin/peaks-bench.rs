//! peaks-bench - 峰检测性能基准工具
//!
//! 在合成信号或数据文件上重复运行自动检测，统计耗时分布。

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use chrono::Local;
use clap::Parser;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table, presets::UTF8_FULL};
use peaks_analysis_tool::tools::constants::defaults;
use peaks_analysis_tool::tools::load_signal;
use peaks_analysis_tool::{DetectionParams, find_peaks};
use serde::Serialize;

// ============================================================================
// 常量定义
// ============================================================================

// 默认运行次数
const DEFAULT_RUNS: usize = 10;

// 默认合成信号长度
const DEFAULT_SAMPLES: usize = 1_000_000;

// 默认合成峰数量
const DEFAULT_PEAKS: usize = 50;

// ============================================================================
// CLI 定义
// ============================================================================

#[derive(Parser)]
#[command(name = "peaks-bench")]
#[command(about = "峰检测性能基准工具 / Peak detection benchmark tool")]
#[command(version)]
struct Cli {
    /// 数据文件（不指定时使用合成信号）
    /// Data file (synthetic signal when omitted)
    #[arg(long, short = 'p')]
    path: Option<PathBuf>,

    /// 合成信号长度
    /// Synthetic signal length
    #[arg(long, default_value_t = DEFAULT_SAMPLES)]
    samples: usize,

    /// 合成峰数量
    /// Number of synthetic peaks
    #[arg(long, default_value_t = DEFAULT_PEAKS)]
    peaks: usize,

    /// 运行次数（默认10）
    /// Number of runs (default: 10)
    #[arg(long, short = 'n', default_value_t = DEFAULT_RUNS)]
    runs: usize,

    #[arg(long, default_value_t = defaults::DX)]
    dx: usize,

    #[arg(long, default_value_t = defaults::SMOOTHNESS)]
    smoothness: usize,

    #[arg(long, default_value_t = defaults::GROWTH_ANGLE, allow_negative_numbers = true)]
    growth_angle: f64,

    #[arg(long, default_value_t = defaults::ABATE_ANGLE, allow_negative_numbers = true)]
    abate_angle: f64,

    #[arg(long, default_value_t = defaults::HEIGHT_THRES)]
    height_thres: f64,

    /// JSON报告输出路径
    /// JSON report output path
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,
}

// ============================================================================
// 数据结构
// ============================================================================

/// 单项指标的耗时分布
#[derive(Clone, Debug, Serialize)]
struct Summary {
    median: f64,
    average: f64,
    stddev: f64,
    min: f64,
    max: f64,
}

impl Summary {
    /// 汇总一组测量值（至少一个）
    fn from_samples(samples: &[f64]) -> Option<Self> {
        let mut sorted = samples.to_vec();
        sorted.sort_by(f64::total_cmp);
        let (&min, &max) = (sorted.first()?, sorted.last()?);

        let count = sorted.len();
        let average = sorted.iter().sum::<f64>() / count as f64;
        let spread = sorted.iter().map(|v| (v - average) * (v - average)).sum::<f64>();
        let stddev = (spread / count.saturating_sub(1).max(1) as f64).sqrt();

        let upper_mid = sorted[count / 2];
        let median = if count % 2 == 0 {
            (sorted[count / 2 - 1] + upper_mid) / 2.0
        } else {
            upper_mid
        };

        Some(Self {
            median,
            average,
            stddev,
            min,
            max,
        })
    }

    /// 按表格列顺序排列的数值
    fn columns(&self) -> [f64; 5] {
        [self.median, self.average, self.stddev, self.min, self.max]
    }
}

/// 完整报告
#[derive(Clone, Debug, Serialize)]
struct BenchmarkReport {
    source: String,
    samples: usize,
    runs: usize,
    peaks_found: usize,
    timestamp: String,
    params: DetectionParams,
    time_ms: Summary,
    throughput_msamples_per_sec: Summary,
}

// ============================================================================
// 合成信号
// ============================================================================

/// 生成均匀分布的高斯峰叠加确定性噪声（线性同余发生器，保证可复现）
fn synthetic_signal(len: usize, peak_count: usize) -> Vec<f64> {
    let mut signal = vec![0.0; len];
    if len == 0 {
        return signal;
    }

    let spacing = len as f64 / (peak_count.max(1) as f64 + 1.0);
    let sigma = (spacing / 10.0).max(1.0);

    for k in 1..=peak_count {
        let center = spacing * k as f64;
        let amplitude = 500.0 + 100.0 * (k % 5) as f64;
        let start = (center - 5.0 * sigma).max(0.0) as usize;
        let end = ((center + 5.0 * sigma) as usize).min(len - 1);
        for (i, value) in signal.iter_mut().enumerate().take(end + 1).skip(start) {
            let z = (i as f64 - center) / sigma;
            *value += amplitude * (-0.5 * z * z).exp();
        }
    }

    let mut state: u64 = 0x2545_F491_4F6C_DD1D;
    for value in signal.iter_mut() {
        state = state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        let unit = (state >> 11) as f64 / (1u64 << 53) as f64;
        *value += (unit - 0.5) * 4.0;
    }

    signal
}

// ============================================================================
// 报告
// ============================================================================

fn print_table(report: &BenchmarkReport) {
    println!(
        "Source / 数据源: {}  ({} samples, {} runs, {} peaks)",
        report.source, report.samples, report.runs, report.peaks_found
    );

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "Metric / 指标",
        "Median / 中位数",
        "Average / 平均值",
        "StdDev / 标准差",
        "Min / 最小",
        "Max / 最大",
    ]);

    for (name, summary, precision) in [
        ("Time (ms) / 时间", &report.time_ms, 3),
        (
            "Throughput (MS/s) / 吞吐量",
            &report.throughput_msamples_per_sec,
            2,
        ),
    ] {
        let mut row = vec![Cell::new(name)];
        row.extend(summary.columns().iter().map(|value| {
            Cell::new(format!("{value:.precision$}")).set_alignment(CellAlignment::Right)
        }));
        table.add_row(row);
    }

    println!("{table}");
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.runs == 0 {
        bail!("--runs 必须大于 0 / --runs must be greater than 0");
    }

    let params = DetectionParams::new(
        cli.dx,
        cli.smoothness,
        cli.growth_angle,
        cli.abate_angle,
        cli.height_thres,
    );

    let (source, signal) = match &cli.path {
        Some(path) => {
            let data = load_signal(path)
                .with_context(|| format!("Failed to load / 加载失败: {}", path.display()))?;
            (path.display().to_string(), data.y)
        }
        None => (
            format!("synthetic ({} peaks)", cli.peaks),
            synthetic_signal(cli.samples, cli.peaks),
        ),
    };

    eprintln!("Running / 运行中: {} runs on {source}...", cli.runs);

    let mut times_ms = Vec::with_capacity(cli.runs);
    let mut peaks_found = 0;
    for _ in 0..cli.runs {
        let start = Instant::now();
        let peaks = find_peaks(&signal, &params).context("Detection failed / 检测失败")?;
        times_ms.push(start.elapsed().as_secs_f64() * 1000.0);
        peaks_found = peaks.len();
    }

    let throughput: Vec<f64> = times_ms
        .iter()
        .map(|ms| signal.len() as f64 / 1e6 / (ms / 1000.0).max(f64::EPSILON))
        .collect();

    let report = BenchmarkReport {
        source,
        samples: signal.len(),
        runs: cli.runs,
        peaks_found,
        timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        params,
        time_ms: Summary::from_samples(&times_ms).context("No timing samples / 没有计时数据")?,
        throughput_msamples_per_sec: Summary::from_samples(&throughput)
            .context("No throughput samples / 没有吞吐量数据")?,
    };

    print_table(&report);

    if let Some(output) = &cli.output {
        let json = serde_json::to_string_pretty(&report).context("Serialize failed / 序列化失败")?;
        fs::write(output, json)
            .with_context(|| format!("Failed to write / 写入失败: {}", output.display()))?;
        eprintln!("Report saved / 报告已保存: {}", output.display());
    }

    Ok(())
}
