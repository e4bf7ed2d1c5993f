//! # 单文件转换任务
//!
//! 一个 .mmd 源文件对应一个 `ConversionJob`：推导输出路径，
//! 为源文本加上主题指令并写入临时文件。
//!
//! ## 依赖关系
//! - 被 `commands/convert.rs` 和 `render/renderer.rs` 使用
//! - 使用 `tempfile` 创建作用域临时文件

use crate::cli::convert::Theme;
use crate::error::{MmdBatchError, Result};

use std::ffi::{OsStr, OsString};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// 转换任务
#[derive(Debug, Clone)]
pub struct ConversionJob {
    /// 源文件路径
    pub source: PathBuf,
    /// 输出 PNG 路径 (`<output_dir>/<stem>.png`)
    pub output: PathBuf,
}

impl ConversionJob {
    pub fn new(source: &Path, output_dir: &Path) -> Self {
        // 按 OsStr 拼接: `arch.v2.mmd` -> `arch.v2.png`，非 UTF-8 字节原样保留
        let mut file_name = source
            .file_stem()
            .map(OsStr::to_os_string)
            .unwrap_or_else(|| OsString::from("diagram"));
        file_name.push(".png");

        Self {
            source: source.to_path_buf(),
            output: output_dir.join(file_name),
        }
    }

    /// 源文件名，用于控制台输出
    pub fn name(&self) -> String {
        self.source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.source.display().to_string())
    }

    /// 读取源文件并写入带主题指令的临时 .mmd 文件
    ///
    /// 返回的 `NamedTempFile` drop 时删除磁盘文件。
    pub fn prepare(&self, theme: Theme, temp_dir: Option<&Path>) -> Result<NamedTempFile> {
        let content = fs::read_to_string(&self.source).map_err(|e| MmdBatchError::FileReadError {
            path: self.source.display().to_string(),
            source: e,
        })?;

        let mut builder = tempfile::Builder::new();
        builder.prefix("mmdbatch-").suffix(".mmd");
        let mut file = match temp_dir {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        }
        .map_err(|e| MmdBatchError::TempFileError {
            purpose: "diagram".to_string(),
            source: e,
        })?;

        let path = file.path().display().to_string();
        file.write_all(with_init_directive(&content, theme).as_bytes())
            .and_then(|_| file.flush())
            .map_err(|e| MmdBatchError::FileWriteError { path, source: e })?;

        Ok(file)
    }
}

/// 在图表源文本前加一行 init 指令选择主题
pub fn with_init_directive(content: &str, theme: Theme) -> String {
    format!("%%{{ init: {{ 'theme': '{}' }} }}%%\n{}", theme, content)
}
