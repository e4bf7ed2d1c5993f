//! # 外部渲染器调用
//!
//! 封装 Mermaid CLI (`mmdc`) 的命令行构造和同步调用。
//!
//! ## 命令格式
//! ```text
//! mmdc -i <input> -o <output.png> -b transparent -c <config.json> -w <width> -H <height>
//! ```
//!
//! ## 依赖关系
//! - 被 `commands/convert.rs` 使用
//! - 使用 `render/config.rs`, `render/job.rs`

use crate::error::{MmdBatchError, Result};
use crate::render::config::{Dimensions, TRANSPARENT};

use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::Instant;
use tracing::{debug, info, warn};

/// 单次渲染结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    /// 渲染器退出码为 0
    Success,
    /// 渲染器非零退出
    Failed {
        exit_code: Option<i32>,
        stderr: String,
    },
}

/// 外部渲染器
#[derive(Debug, Clone)]
pub struct Renderer {
    program: PathBuf,
}

impl Renderer {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// 构造渲染器参数列表
    pub fn args(input: &Path, output: &Path, config: &Path, dims: Dimensions) -> Vec<OsString> {
        vec![
            "-i".into(),
            input.as_os_str().to_owned(),
            "-o".into(),
            output.as_os_str().to_owned(),
            "-b".into(),
            TRANSPARENT.into(),
            "-c".into(),
            config.as_os_str().to_owned(),
            "-w".into(),
            dims.width.to_string().into(),
            "-H".into(),
            dims.height.to_string().into(),
        ]
    }

    /// 同步调用渲染器，阻塞直到进程退出
    pub fn render(
        &self,
        input: &Path,
        output: &Path,
        config: &Path,
        dims: Dimensions,
    ) -> Result<RenderOutcome> {
        let started_at = Instant::now();
        let args = Self::args(input, output, config, dims);
        debug!(
            program = %self.program.display(),
            args = ?args,
            "Invoking renderer"
        );

        let result = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| {
                warn!(
                    program = %self.program.display(),
                    error = %e,
                    "Failed to spawn renderer"
                );
                if e.kind() == ErrorKind::NotFound {
                    MmdBatchError::CommandNotFound {
                        command: self.program.display().to_string(),
                    }
                } else {
                    MmdBatchError::CommandFailed {
                        command: self.program.display().to_string(),
                        stderr: e.to_string(),
                    }
                }
            })?;

        let elapsed_ms = started_at.elapsed().as_millis() as u64;
        if result.status.success() {
            info!(
                output = %output.display(),
                elapsed_ms,
                "Renderer finished"
            );
            Ok(RenderOutcome::Success)
        } else {
            let exit_code = result.status.code();
            let stderr = String::from_utf8_lossy(&result.stderr).trim_end().to_string();
            warn!(
                output = %output.display(),
                elapsed_ms,
                exit_code = exit_code.map(i64::from).unwrap_or(-1),
                stderr = %stderr,
                "Renderer failed"
            );
            Ok(RenderOutcome::Failed { exit_code, stderr })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_layout() {
        let args = Renderer::args(
            Path::new("/tmp/in.mmd"),
            Path::new("out/flow.png"),
            Path::new("/tmp/config.json"),
            Dimensions::from_scale(6.0),
        );
        let args: Vec<String> = args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            args,
            vec![
                "-i",
                "/tmp/in.mmd",
                "-o",
                "out/flow.png",
                "-b",
                "transparent",
                "-c",
                "/tmp/config.json",
                "-w",
                "2048",
                "-H",
                "1536",
            ]
        );
    }

    #[test]
    fn test_missing_program() {
        let renderer = Renderer::new("mmdbatch-no-such-renderer");
        let err = renderer
            .render(
                Path::new("in.mmd"),
                Path::new("out.png"),
                Path::new("config.json"),
                Dimensions::from_scale(3.0),
            )
            .unwrap_err();
        assert!(matches!(err, MmdBatchError::CommandNotFound { .. }));
    }
}
