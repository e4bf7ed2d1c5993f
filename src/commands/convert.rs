//! # convert 命令实现
//!
//! 批量将 Mermaid 源文件渲染为高分辨率 PNG。
//!
//! ## 流程
//! 1. 创建输出目录（含父目录）
//! 2. 收集输入目录顶层的 `*.mmd` 文件
//! 3. 生成共享渲染配置并写入临时 JSON 文件
//! 4. 逐个文件：加主题指令 -> 写临时文件 -> 调用 `mmdc` -> 输出结果
//! 5. 临时文件随作用域结束删除，无论成功失败
//!
//! ## 依赖关系
//! - 使用 `cli/convert.rs` 定义的参数
//! - 使用 `batch/`, `render/`
//! - 使用 `utils/output.rs`

use crate::batch::{BatchResult, BatchRunner, FileCollector, ProcessResult};
use crate::cli::convert::{ConvertArgs, Theme};
use crate::error::{error_chain, MmdBatchError, Result};
use crate::render::{ConversionJob, Dimensions, RenderConfig, RenderOutcome, Renderer};
use crate::utils::output;

use std::fs;
use std::path::Path;
use tracing::debug;

/// 执行 convert 命令
pub fn execute(args: ConvertArgs) -> Result<()> {
    output::print_header(&format!(
        "Rendering Mermaid diagrams at {}x scale",
        args.scale
    ));

    let result = convert(&args)?;

    if result.total() == 0 {
        return Ok(());
    }

    result.print_failures();
    output::print_done(&format!(
        "Converted {} of {} file(s) into '{}' ({} failed)",
        result.converted,
        result.total(),
        args.output.display(),
        result.failed()
    ));

    Ok(())
}

/// 转换输入目录中的全部 .mmd 文件
///
/// 单个文件的失败只记录在返回的 `BatchResult` 中；只有准备阶段
/// （输出目录、输入目录、配置文件）的错误会以 `Err` 返回。
pub fn convert(args: &ConvertArgs) -> Result<BatchResult> {
    fs::create_dir_all(&args.output).map_err(|e| MmdBatchError::FileWriteError {
        path: args.output.display().to_string(),
        source: e,
    })?;

    let files = FileCollector::new(args.input.clone()).collect()?;
    if files.is_empty() {
        output::print_warning(&format!(
            "No .mmd files found in {}",
            args.input.display()
        ));
        return Ok(BatchResult::default());
    }

    output::print_info(&format!("Found {} diagram file(s)", files.len()));

    let config = RenderConfig::new(args.scale);
    let dims = config.dimensions();
    let config_file = config.persist(args.temp_dir.as_deref())?;
    debug!(
        config = %config_file.path().display(),
        dimensions = %dims,
        "Render config written"
    );

    let renderer = Renderer::new(&args.renderer);
    let runner = BatchRunner::new(args.jobs);
    debug!(jobs = runner.jobs(), renderer = %args.renderer.display(), "Starting batch");

    // config_file 在 run 返回后才 drop
    let result = runner.run(&files, |source| {
        let job = ConversionJob::new(source, &args.output);
        convert_one(
            &job,
            &renderer,
            config_file.path(),
            dims,
            args.theme,
            args.temp_dir.as_deref(),
        )
    });

    drop(config_file);
    result
}

/// 转换单个文件；临时源文件在函数返回时删除
fn convert_one(
    job: &ConversionJob,
    renderer: &Renderer,
    config_path: &Path,
    dims: Dimensions,
    theme: Theme,
    temp_dir: Option<&Path>,
) -> ProcessResult {
    let name = job.name();

    let outcome = job
        .prepare(theme, temp_dir)
        .and_then(|temp| renderer.render(temp.path(), &job.output, config_path, dims));

    match outcome {
        Ok(RenderOutcome::Success) => ProcessResult::Converted(name),
        Ok(RenderOutcome::Failed { stderr, exit_code }) if stderr.is_empty() => {
            let status = exit_code
                .map(|c| c.to_string())
                .unwrap_or_else(|| "signal".to_string());
            ProcessResult::RenderFailed(name, format!("renderer exited with status {}", status))
        }
        Ok(RenderOutcome::Failed { stderr, .. }) => ProcessResult::RenderFailed(name, stderr),
        Err(e) => ProcessResult::Errored(name, error_chain(&e)),
    }
}
