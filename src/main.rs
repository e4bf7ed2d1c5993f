//! # mmdbatch - Mermaid 批量 PNG 转换器
//!
//! 扫描目录中的 Mermaid 源文件 (.mmd)，调用外部渲染器 `mmdc`
//! 生成高分辨率 PNG。布局与光栅化全部交给渲染器完成。
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── batch/   (文件收集与批量执行)
//!   │     └── render/  (渲染配置、临时文件、mmdc 调用)
//!   ├── utils/      (输出、进度条、日志)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod error;
mod render;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();
    utils::logging::init(cli.verbose);

    if let Err(e) = commands::run(cli) {
        utils::output::print_error(&error::error_chain(&e));
        std::process::exit(1);
    }
}
