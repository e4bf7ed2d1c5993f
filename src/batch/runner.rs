//! # 批量执行器
//!
//! 逐个（或并行）执行转换任务，并在每个任务完成时立即输出结果。
//!
//! ## 功能
//! - `jobs = 1` 时在当前线程按顺序执行
//! - `jobs > 1` 时使用独立的 rayon 线程池
//! - 进度条显示，结果行通过 `suspend` 输出
//! - 错误收集与汇总报告
//!
//! ## 依赖关系
//! - 被 `commands/convert.rs` 调用
//! - 使用 `utils/progress.rs` 创建进度条, `utils/output.rs` 输出结果
//! - 使用 `rayon` 进行并行处理

use crate::error::{MmdBatchError, Result};
use crate::utils::{output, progress};

use rayon::prelude::*;
use std::path::PathBuf;
use tabled::{Table, Tabled};

/// 单个文件处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessResult {
    /// 渲染成功
    Converted(String),
    /// 渲染器非零退出 (文件名, stderr)
    RenderFailed(String, String),
    /// 本地处理出错 (文件名, 错误信息)
    Errored(String, String),
}

impl ProcessResult {
    /// 是否成功
    pub fn is_success(&self) -> bool {
        matches!(self, ProcessResult::Converted(_))
    }

    /// 控制台结果行（不含标签）
    pub fn message(&self) -> String {
        match self {
            ProcessResult::Converted(name) => {
                format!("Successfully converted {} to high-res PNG", name)
            }
            ProcessResult::RenderFailed(name, stderr) => {
                format!("Error converting {}: {}", name, stderr)
            }
            ProcessResult::Errored(name, message) => {
                format!("Error processing {}: {}", name, message)
            }
        }
    }

    /// 输出到控制台
    pub fn report(&self) {
        if self.is_success() {
            output::print_success(&self.message());
        } else {
            output::print_failure(&self.message());
        }
    }
}

/// 失败汇总表行
#[derive(Debug, Clone, Tabled)]
struct FailureRow {
    #[tabled(rename = "File")]
    file: String,
    #[tabled(rename = "Stage")]
    stage: &'static str,
    #[tabled(rename = "Reason")]
    reason: String,
}

/// 批量处理结果统计
#[derive(Debug, Default)]
pub struct BatchResult {
    /// 成功数量
    pub converted: usize,
    /// 失败详情（按完成顺序）
    pub failures: Vec<ProcessResult>,
}

impl BatchResult {
    /// 合并处理结果
    pub fn merge(&mut self, result: ProcessResult) {
        match result {
            ProcessResult::Converted(_) => self.converted += 1,
            failed => self.failures.push(failed),
        }
    }

    /// 失败数量
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// 总处理数量
    pub fn total(&self) -> usize {
        self.converted + self.failed()
    }

    /// 打印失败汇总表（无失败时不输出）
    pub fn print_failures(&self) {
        if self.failures.is_empty() {
            return;
        }

        let rows: Vec<FailureRow> = self
            .failures
            .iter()
            .filter_map(|f| match f {
                ProcessResult::RenderFailed(name, stderr) => Some(FailureRow {
                    file: name.clone(),
                    stage: "render",
                    reason: first_line(stderr),
                }),
                ProcessResult::Errored(name, message) => Some(FailureRow {
                    file: name.clone(),
                    stage: "prepare",
                    reason: first_line(message),
                }),
                ProcessResult::Converted(_) => None,
            })
            .collect();

        output::print_header(&format!("{} file(s) failed", rows.len()));
        println!("{}", Table::new(&rows));
        output::print_separator();
    }
}

fn first_line(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or("(no output)")
        .to_string()
}

/// 批量执行器
pub struct BatchRunner {
    /// 并行作业数
    jobs: usize,
}

impl BatchRunner {
    /// 创建新的批量执行器（0 表示按 CPU 数自动选择）
    pub fn new(jobs: usize) -> Self {
        let jobs = if jobs == 0 { num_cpus::get() } else { jobs };
        Self { jobs }
    }

    pub fn jobs(&self) -> usize {
        self.jobs
    }

    /// 处理文件列表，每个结果产生后立即输出
    pub fn run<F>(&self, files: &[PathBuf], processor: F) -> Result<BatchResult>
    where
        F: Fn(&PathBuf) -> ProcessResult + Sync + Send,
    {
        let pb = progress::create_progress_bar(files.len() as u64, "Rendering");

        let handle = |file: &PathBuf| {
            let result = processor(file);
            pb.suspend(|| result.report());
            pb.inc(1);
            result
        };

        let results: Vec<ProcessResult> = if self.jobs <= 1 {
            files.iter().map(handle).collect()
        } else {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.jobs)
                .build()
                .map_err(|e| {
                    MmdBatchError::InvalidArgument(format!(
                        "Cannot start {} worker threads: {}",
                        self.jobs, e
                    ))
                })?;
            pool.install(|| files.par_iter().map(handle).collect())
        };

        pb.finish_and_clear();

        let mut batch_result = BatchResult::default();
        for result in results {
            batch_result.merge(result);
        }

        Ok(batch_result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn name_of(path: &PathBuf) -> String {
        path.file_name().unwrap().to_string_lossy().into_owned()
    }

    #[test]
    fn test_result_messages() {
        assert_eq!(
            ProcessResult::Converted("a.mmd".into()).message(),
            "Successfully converted a.mmd to high-res PNG"
        );
        assert_eq!(
            ProcessResult::RenderFailed("b.mmd".into(), "parse error".into()).message(),
            "Error converting b.mmd: parse error"
        );
        assert_eq!(
            ProcessResult::Errored("c.mmd".into(), "Failed to read file: c.mmd".into()).message(),
            "Error processing c.mmd: Failed to read file: c.mmd"
        );
    }

    #[test]
    fn test_is_success() {
        assert!(ProcessResult::Converted("a.mmd".into()).is_success());
        assert!(!ProcessResult::RenderFailed("b.mmd".into(), String::new()).is_success());
        assert!(!ProcessResult::Errored("c.mmd".into(), String::new()).is_success());
    }

    #[test]
    fn test_batch_result_merge() {
        let mut result = BatchResult::default();
        result.merge(ProcessResult::Converted("a.mmd".into()));
        result.merge(ProcessResult::RenderFailed("b.mmd".into(), "parse error".into()));
        result.merge(ProcessResult::Errored("c.mmd".into(), "denied".into()));

        assert_eq!(result.converted, 1);
        assert_eq!(result.failed(), 2);
        assert_eq!(result.total(), 3);
    }

    #[test]
    fn test_failure_does_not_stop_batch() {
        let files: Vec<PathBuf> = ["a.mmd", "b.mmd", "c.mmd", "d.mmd"]
            .iter()
            .map(PathBuf::from)
            .collect();
        let attempted = AtomicUsize::new(0);

        let result = BatchRunner::new(1)
            .run(&files, |file| {
                attempted.fetch_add(1, Ordering::SeqCst);
                let name = name_of(file);
                if name == "b.mmd" {
                    ProcessResult::RenderFailed(name, "parse error".into())
                } else {
                    ProcessResult::Converted(name)
                }
            })
            .unwrap();

        assert_eq!(attempted.load(Ordering::SeqCst), 4);
        assert_eq!(result.converted, 3);
        assert_eq!(
            result.failures,
            vec![ProcessResult::RenderFailed(
                "b.mmd".into(),
                "parse error".into()
            )]
        );
    }

    #[test]
    fn test_sequential_preserves_order() {
        let files: Vec<PathBuf> = ["a.mmd", "b.mmd", "c.mmd"]
            .iter()
            .map(PathBuf::from)
            .collect();
        let seen = std::sync::Mutex::new(Vec::new());

        BatchRunner::new(1)
            .run(&files, |file| {
                seen.lock().unwrap().push(name_of(file));
                ProcessResult::Converted(name_of(file))
            })
            .unwrap();

        assert_eq!(*seen.lock().unwrap(), vec!["a.mmd", "b.mmd", "c.mmd"]);
    }

    #[test]
    fn test_parallel_runs_every_file() {
        let files: Vec<PathBuf> = (0..16).map(|i| PathBuf::from(format!("{i}.mmd"))).collect();

        let result = BatchRunner::new(4)
            .run(&files, |file| ProcessResult::Errored(name_of(file), "boom".into()))
            .unwrap();

        assert_eq!(result.converted, 0);
        assert_eq!(result.failed(), 16);
    }

    #[test]
    fn test_auto_jobs() {
        assert!(BatchRunner::new(0).jobs() >= 1);
        assert_eq!(BatchRunner::new(3).jobs(), 3);
    }

    #[test]
    fn test_first_line() {
        assert_eq!(first_line("\n  Parse error on line 2\nmore"), "Parse error on line 2");
        assert_eq!(first_line(""), "(no output)");
    }
}
