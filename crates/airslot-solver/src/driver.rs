//! 外部求解器驅動
//!
//! 寫出四行批次指令檔，以子行程啟動求解器並等待結束。結束碼不視為失敗依據，
//! 求解器可能只在日誌中回報無解，因此只要日誌存在就交給解析器判斷。

use airslot_core::{AirslotError, Result, SolverSettings};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// 單次求解使用的檔案路徑
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverArtifacts {
    /// 工作目錄（亦為求解器的執行目錄）
    pub work_dir: PathBuf,

    /// 模型檔名（批次指令中以相對路徑引用）
    pub model_file_name: String,

    /// 批次指令檔名
    pub script_file_name: String,

    /// 日誌檔名
    pub log_file_name: String,
}

impl SolverArtifacts {
    /// 由設定解析路徑
    pub fn from_settings(settings: &SolverSettings) -> Result<Self> {
        Ok(Self {
            work_dir: settings.resolve_work_dir()?,
            model_file_name: settings.model_file_name.clone(),
            script_file_name: settings.script_file_name.clone(),
            log_file_name: settings.log_file_name.clone(),
        })
    }

    pub fn model_path(&self) -> PathBuf {
        self.work_dir.join(&self.model_file_name)
    }

    pub fn script_path(&self) -> PathBuf {
        self.work_dir.join(&self.script_file_name)
    }

    pub fn log_path(&self) -> PathBuf {
        self.work_dir.join(&self.log_file_name)
    }

    /// 確保工作目錄存在
    pub fn prepare(&self) -> Result<()> {
        fs::create_dir_all(&self.work_dir)?;
        Ok(())
    }
}

/// 批次指令內容：讀入模型、求解、顯示解、結束
pub fn batch_script(model_file_name: &str) -> String {
    format!(
        "read {}\noptimize\ndisplay solution\nquit\n",
        model_file_name
    )
}

/// 求解器驅動
pub struct SolverDriver<'a> {
    settings: &'a SolverSettings,
}

impl<'a> SolverDriver<'a> {
    pub fn new(settings: &'a SolverSettings) -> Self {
        Self { settings }
    }

    /// 寫出批次指令檔（覆寫）
    pub fn write_script(&self, artifacts: &SolverArtifacts) -> Result<()> {
        let path = artifacts.script_path();
        fs::write(&path, batch_script(&artifacts.model_file_name))?;
        tracing::debug!("批次指令檔: {}", path.display());
        Ok(())
    }

    /// 啟動求解器並等待結束，回傳日誌路徑
    pub fn invoke(&self, artifacts: &SolverArtifacts) -> Result<PathBuf> {
        let solver = self.settings.validate_solver_path()?;

        let log_path = artifacts.log_path();
        remove_stale_log(&log_path)?;

        tracing::info!(
            "啟動求解器: {} -b {} -l {}",
            solver.display(),
            artifacts.script_file_name,
            artifacts.log_file_name
        );

        let output = Command::new(&solver)
            .arg("-b")
            .arg(&artifacts.script_file_name)
            .arg("-l")
            .arg(&artifacts.log_file_name)
            .current_dir(&artifacts.work_dir)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| {
                AirslotError::SolverInvocation(format!(
                    "無法啟動 {}: {}",
                    solver.display(),
                    e
                ))
            })?;

        if !output.status.success() {
            tracing::warn!(
                "求解器結束碼異常: {}，stderr: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        if !log_path.is_file() {
            return Err(AirslotError::SolverInvocation(format!(
                "求解器未產生日誌（{}）: {}",
                output.status,
                log_path.display()
            )));
        }

        Ok(log_path)
    }
}

/// 刪除上次殘留的日誌，避免誤讀舊結果
fn remove_stale_log(path: &Path) -> Result<()> {
    if path.exists() {
        tracing::debug!("刪除舊日誌: {}", path.display());
        fs::remove_file(path)?;
    }
    Ok(())
}
