//! Peaks Analysis Tool - 主程序入口
//!
//! 纯流程控制器，负责协调各个工具模块完成峰分析任务。

use peaks_analysis_tool::{
    error::{ErrorCategory, PeakError},
    tools,
};
use std::process;

/// 错误退出码定义
mod exit_codes {
    /// 通用错误（I/O等）
    pub const GENERAL_ERROR: i32 = 1;
    /// 参数/格式错误
    pub const CONFIG_ERROR: i32 = 2;
    /// 数据错误（空信号、非有限值）
    pub const DATA_ERROR: i32 = 4;
}

/// 获取错误建议文本
fn get_error_suggestion(error: &PeakError) -> &'static str {
    match error {
        PeakError::EmptyInput => {
            "数据文件中没有可用的数据行 / The data file contains no usable rows"
        }
        PeakError::NonFiniteSample { .. } => {
            "请清理信号中的 NaN/Inf 值后重试 / Remove NaN/Inf values from the signal and retry"
        }
        PeakError::FormatError(_) => {
            "确保文件为两列 X,Y 或单列 Y 的数值数据 / Ensure the file holds numeric X,Y or Y columns"
        }
        _ => match ErrorCategory::from_peak_error(error) {
            ErrorCategory::Config => {
                "检查命令行参数是否正确，使用 --help 查看完整用法 / Check command-line arguments, use --help to see full usage"
            }
            ErrorCategory::Io => {
                "检查文件路径是否正确，文件是否存在且可读 / Check that the file path exists and is readable"
            }
            ErrorCategory::Data => "请检查输入数据 / Please check the input data",
        },
    }
}

/// 错误处理和建议
fn handle_error(error: PeakError) -> ! {
    eprintln!("[ERROR] 错误 / Error: {error}");
    eprintln!("[INFO] 建议 / Suggestion: {}", get_error_suggestion(&error));

    let exit_code = match &error {
        PeakError::FormatError(_) => exit_codes::CONFIG_ERROR,
        _ => match ErrorCategory::from_peak_error(&error) {
            ErrorCategory::Config => exit_codes::CONFIG_ERROR,
            ErrorCategory::Data => exit_codes::DATA_ERROR,
            ErrorCategory::Io => exit_codes::GENERAL_ERROR,
        },
    };

    process::exit(exit_code);
}

/// 应用程序主逻辑（便于测试和复用）
fn run() -> Result<(), PeakError> {
    // 1. 解析命令行参数
    let config = tools::parse_args();

    // 2. 显示启动信息
    tools::show_startup_info(&config);

    // 3. 加载数据并分析
    let (data, outcome) = tools::process_input_file(&config)?;

    // 4. 输出结果
    tools::output_results(&config, &data, &outcome)?;

    tools::show_completion_info(&config);
    Ok(())
}

fn main() {
    // 可选：CPU火焰图分析（需开启 feature: flame-prof 且设置 PEAKS_FLAME=1）
    #[cfg(feature = "flame-prof")]
    let _guard = {
        let enabled = std::env::var("PEAKS_FLAME")
            .map(|v| v == "1")
            .unwrap_or(false);
        if enabled {
            match pprof::ProfilerGuard::new(250) {
                Ok(g) => Some(g),
                Err(e) => {
                    eprintln!(
                        "[WARNING] 启用火焰图采样失败 / Failed to enable flame graph sampling: {e}"
                    );
                    None
                }
            }
        } else {
            None
        }
    };

    let result = run();

    // 在退出前生成火焰图（仅在启用时）
    #[cfg(feature = "flame-prof")]
    if let Some(guard) = _guard
        && let Ok(report) = guard.report().build()
    {
        let out_path =
            std::env::var("PEAKS_FLAME_FILE").unwrap_or_else(|_| "flamegraph.svg".to_string());
        if let Ok(file) = std::fs::File::create(&out_path)
            && report.flamegraph(file).is_ok()
        {
            eprintln!("FlameGraph generated successfully / 生成成功: {out_path}");
        }
    }

    if let Err(error) = result {
        handle_error(error);
    }
}
