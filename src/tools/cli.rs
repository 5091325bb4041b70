//! 命令行接口模块
//!
//! 负责命令行参数解析、配置管理和程序信息展示。

use super::constants::defaults;
use crate::core::DetectionParams;
use clap::{Arg, ArgMatches, Command, value_parser};
use std::ffi::OsString;
use std::path::PathBuf;

/// 应用程序版本信息
const VERSION: &str = env!("CARGO_PKG_VERSION");
const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// 输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// 文本报告
    #[default]
    Text,
    /// JSON报告
    Json,
}

/// 分析模式
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnalysisMode {
    /// 自动检测
    Detect(DetectionParams),
    /// 手动边界统计
    Statistics { lower_bound: usize, upper_bound: usize },
}

/// 应用程序配置
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// 输入数据文件
    pub input_path: PathBuf,

    /// 是否显示详细信息
    pub verbose: bool,

    /// 输出文件路径（可选，不指定时输出到控制台）
    pub output_path: Option<PathBuf>,

    /// 输出格式
    pub output_format: OutputFormat,

    /// 分析模式
    pub mode: AnalysisMode,
}

impl AppConfig {
    /// 是否为手动边界统计模式
    #[inline]
    pub fn is_statistics_mode(&self) -> bool {
        matches!(self.mode, AnalysisMode::Statistics { .. })
    }
}

/// 仅自动检测模式使用的参数，与手动边界互斥
const DETECTION_ARGS: [&str; 5] = [
    "dx",
    "smoothness",
    "growth-angle",
    "abate-angle",
    "height-thres",
];

/// 构建命令行定义
pub fn build_command() -> Command {
    Command::new("peaks-analysis")
        .version(VERSION)
        .about(DESCRIPTION)
        .author("Peaks Analysis Team")
        .arg(
            Arg::new("INPUT")
                .help("数据文件路径（两列 X,Y 或单列 Y，支持逗号/分号/制表符/空白分隔）")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("dx")
                .long("dx")
                .help("分析窗口宽度（样本数，同时作为扫描步长），默认 15")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("smoothness")
                .long("smoothness")
                .short('s')
                .help("平滑半径（0 表示不平滑），默认 5")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("growth-angle")
                .long("growth-angle")
                .help("生长角（度），斜率角不小于该值视为上升，默认 15")
                .value_parser(value_parser!(f64))
                .allow_negative_numbers(true),
        )
        .arg(
            Arg::new("abate-angle")
                .long("abate-angle")
                .help("衰减角（度），斜率角不大于该值视为下降，默认 -15")
                .value_parser(value_parser!(f64))
                .allow_negative_numbers(true),
        )
        .arg(
            Arg::new("height-thres")
                .long("height-thres")
                .short('t')
                .help("峰高阈值，低于该高度的峰被过滤，默认 40")
                .value_parser(value_parser!(f64))
                .allow_negative_numbers(true),
        )
        .arg(
            Arg::new("lb")
                .long("lb")
                .help("手动指定峰起点索引（需同时指定 --ub，启用统计模式）")
                .value_parser(value_parser!(usize))
                .requires("ub")
                .conflicts_with_all(DETECTION_ARGS),
        )
        .arg(
            Arg::new("ub")
                .long("ub")
                .help("手动指定峰终点索引（需同时指定 --lb）")
                .value_parser(value_parser!(usize))
                .requires("lb")
                .conflicts_with_all(DETECTION_ARGS),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("输出格式")
                .value_parser(["text", "json"])
                .default_value("text"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("显示详细处理信息")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .help("输出结果到文件")
                .value_name("FILE"),
        )
}

/// 解析命令行参数并创建配置
pub fn parse_args() -> AppConfig {
    config_from_matches(&build_command().get_matches())
}

/// 从给定参数解析配置（便于测试）
pub fn try_parse_args_from<I, T>(args: I) -> Result<AppConfig, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = build_command().try_get_matches_from(args)?;
    Ok(config_from_matches(&matches))
}

fn config_from_matches(matches: &ArgMatches) -> AppConfig {
    let usize_arg =
        |id: &str, default: usize| matches.get_one::<usize>(id).copied().unwrap_or(default);
    let f64_arg = |id: &str, default: f64| matches.get_one::<f64>(id).copied().unwrap_or(default);

    let mode = match (
        matches.get_one::<usize>("lb").copied(),
        matches.get_one::<usize>("ub").copied(),
    ) {
        (Some(lower_bound), Some(upper_bound)) => AnalysisMode::Statistics {
            lower_bound,
            upper_bound,
        },
        _ => AnalysisMode::Detect(DetectionParams::new(
            usize_arg("dx", defaults::DX),
            usize_arg("smoothness", defaults::SMOOTHNESS),
            f64_arg("growth-angle", defaults::GROWTH_ANGLE),
            f64_arg("abate-angle", defaults::ABATE_ANGLE),
            f64_arg("height-thres", defaults::HEIGHT_THRES),
        )),
    };

    let output_format = match matches.get_one::<String>("format").map(String::as_str) {
        Some("json") => OutputFormat::Json,
        _ => OutputFormat::Text,
    };

    AppConfig {
        input_path: matches
            .get_one::<String>("INPUT")
            .map(PathBuf::from)
            .unwrap_or_default(),
        verbose: matches.get_flag("verbose"),
        output_path: matches.get_one::<String>("output").map(PathBuf::from),
        output_format,
        mode,
    }
}

/// 显示程序启动信息
pub fn show_startup_info(config: &AppConfig) {
    if config.output_format == OutputFormat::Json && config.output_path.is_none() {
        // JSON输出到控制台时保持stdout纯净
        return;
    }
    println!("Peaks Analysis Tool v{VERSION}");
    if config.verbose {
        println!("{DESCRIPTION}");
        if config.is_statistics_mode() {
            println!("模式 / Mode: 手动边界统计 / manual bounds statistics");
        } else {
            println!("模式 / Mode: 自动检测 / automatic detection");
        }
    }
    println!();
}

/// 显示程序完成信息
pub fn show_completion_info(config: &AppConfig) {
    if config.verbose {
        eprintln!("[INFO] 所有任务处理完成 / All tasks completed");
    }
}
