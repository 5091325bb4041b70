//! 工具模块集合
//!
//! 包含CLI、数据加载、格式化等工具模块，支持main.rs的流程控制。
//! 核心算法（`crate::core`）不依赖本模块中除常量以外的任何内容。

pub mod cli;
pub mod constants;
pub mod formatter;
pub mod loader;
pub mod processor;
pub mod utils;

// 重新导出主要的公共接口
pub use cli::{
    AnalysisMode, AppConfig, OutputFormat, parse_args, show_completion_info, show_startup_info,
};
pub use formatter::{render_report, write_output};
pub use loader::{SignalData, load_signal};
pub use processor::{AnalysisOutcome, analyze_signal, output_results, process_input_file};
