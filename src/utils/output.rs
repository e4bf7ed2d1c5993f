//! # 美化输出工具
//!
//! 提供统一的终端输出样式。单文件结果写到标准输出，致命错误写到标准错误。
//!
//! ## 依赖关系
//! - 被 `commands/` 和 `batch/` 模块使用
//! - 使用 `colored` crate

use colored::{ColoredString, Colorize};

/// 标题分隔线宽度
const RULE_WIDTH: usize = 60;

/// 带标签的一行输出
fn tagged(tag: ColoredString, msg: &str) -> String {
    format!("{} {}", tag, msg)
}

/// 分隔线
pub fn rule() -> String {
    "─".repeat(RULE_WIDTH)
}

/// 打印成功消息
pub fn print_success(msg: &str) {
    println!("{}", tagged("[OK]".green().bold(), msg));
}

/// 打印单文件失败消息（不中断批处理）
pub fn print_failure(msg: &str) {
    println!("{}", tagged("[FAIL]".red().bold(), msg));
}

/// 打印致命错误（标准错误）
pub fn print_error(msg: &str) {
    eprintln!("{}", tagged("[ERR]".red().bold(), msg));
}

pub fn print_warning(msg: &str) {
    println!("{}", tagged("[WARN]".yellow().bold(), msg));
}

pub fn print_info(msg: &str) {
    println!("{}", tagged("[*]".blue().bold(), msg));
}

/// 打印批处理汇总行
pub fn print_done(msg: &str) {
    println!("{}", tagged("[DONE]".green().bold(), msg));
}

/// 打印标题栏（上下各一条分隔线）
pub fn print_header(title: &str) {
    println!("\n{}", rule().dimmed());
    println!("  {}", title.bold());
    println!("{}\n", rule().dimmed());
}

/// 打印分隔线
pub fn print_separator() {
    println!("{}", rule().dimmed());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_width() {
        assert_eq!(rule().chars().count(), RULE_WIDTH);
    }

    #[test]
    fn test_tagged_keeps_message() {
        let line = tagged("[FAIL]".normal(), "Error converting b.mmd: parse error");
        assert!(line.contains("[FAIL]"));
        assert!(line.ends_with(" Error converting b.mmd: parse error"));
    }
}
