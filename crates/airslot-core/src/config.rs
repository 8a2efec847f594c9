//! 求解設定與模型參數

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::item::ItemType;
use crate::vessel::SLOTS_PER_VESSEL;
use crate::{AirslotError, Result};

/// 預設模型檔名
pub const DEFAULT_MODEL_FILE: &str = "slot.lp";

/// 預設批次指令檔名
pub const DEFAULT_SCRIPT_FILE: &str = "solve.txt";

/// 預設求解器日誌檔名
pub const DEFAULT_LOG_FILE: &str = "result.log";

/// 持久化的求解設定
///
/// 取代舊版的全域設定，於呼叫時明確傳入建模器與驅動器。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverSettings {
    /// 外部求解器執行檔路徑
    pub solver_path: Option<PathBuf>,

    /// 工作目錄（None 表示執行檔所在目錄）
    pub work_dir: Option<PathBuf>,

    /// 模型檔名
    pub model_file_name: String,

    /// 批次指令檔名
    pub script_file_name: String,

    /// 日誌檔名
    pub log_file_name: String,

    /// 各裝備的持有上限（依名稱）
    pub inventory_caps: BTreeMap<String, u32>,

    /// 巡洋艦可使用的搭載欄數（其餘須為空槽）
    pub cruiser_slot_quota: u8,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            solver_path: None,
            work_dir: None,
            model_file_name: DEFAULT_MODEL_FILE.to_string(),
            script_file_name: DEFAULT_SCRIPT_FILE.to_string(),
            log_file_name: DEFAULT_LOG_FILE.to_string(),
            inventory_caps: BTreeMap::new(),
            cruiser_slot_quota: 1,
        }
    }
}

impl SolverSettings {
    /// 創建預設設定
    pub fn new() -> Self {
        Self::default()
    }

    /// 建構器模式：設置求解器路徑
    pub fn with_solver_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.solver_path = Some(path.into());
        self
    }

    /// 建構器模式：設置工作目錄
    pub fn with_work_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.work_dir = Some(dir.into());
        self
    }

    /// 建構器模式：設置單一裝備的持有上限
    pub fn with_inventory_cap(mut self, item_name: impl Into<String>, cap: u32) -> Self {
        self.inventory_caps.insert(item_name.into(), cap);
        self
    }

    /// 建構器模式：設置巡洋艦可用搭載欄數
    pub fn with_cruiser_slot_quota(mut self, quota: u8) -> Self {
        self.cruiser_slot_quota = quota;
        self
    }

    /// 檢查並解析求解器路徑
    ///
    /// 單獨的執行檔名（如 `scip`）依 `PATH` 搜尋；其餘相對路徑以目前目錄為準
    /// 轉為絕對路徑（求解器在工作目錄下啟動）。
    pub fn validate_solver_path(&self) -> Result<PathBuf> {
        let path = self
            .solver_path
            .as_deref()
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or_else(|| AirslotError::Configuration("未設定求解器路徑".to_string()))?;

        if is_bare_name(path) {
            return find_in_path(path).ok_or_else(|| {
                AirslotError::Configuration(format!(
                    "在 PATH 中找不到求解器: {}",
                    path.display()
                ))
            });
        }

        let resolved = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()?.join(path)
        };

        if !resolved.is_file() {
            return Err(AirslotError::Configuration(format!(
                "求解器不存在或不是檔案: {}",
                resolved.display()
            )));
        }

        Ok(resolved)
    }

    /// 解析工作目錄
    pub fn resolve_work_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.work_dir {
            return Ok(dir.clone());
        }

        let exe = std::env::current_exe()?;
        exe.parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| AirslotError::Configuration("無法取得執行檔所在目錄".to_string()))
    }

    /// 從 JSON 檔讀取設定
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// 寫入 JSON 檔
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text)?;
        Ok(())
    }

    /// 讀取設定；檔案不存在時寫出預設設定並回傳
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            return Self::load(path);
        }

        tracing::info!("設定檔不存在，建立預設設定: {}", path.display());
        let settings = Self::default();
        settings.save(path)?;
        Ok(settings)
    }
}

/// 只有單一檔名、不含目錄分隔符的路徑
fn is_bare_name(path: &Path) -> bool {
    let mut components = path.components();
    matches!(
        (components.next(), components.next()),
        (Some(std::path::Component::Normal(_)), None)
    )
}

/// 依 `PATH` 環境變數尋找執行檔
fn find_in_path(name: &Path) -> Option<PathBuf> {
    let paths = std::env::var_os("PATH")?;
    std::env::split_paths(&paths).find_map(|dir| {
        let candidate = dir.join(name);
        if candidate.is_file() {
            return Some(candidate);
        }
        if cfg!(windows) {
            let candidate = candidate.with_extension("exe");
            if candidate.is_file() {
                return Some(candidate);
            }
        }
        None
    })
}

/// 單次求解的模型參數
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelParams {
    /// 制空值下限
    pub air_superiority_threshold: Decimal,

    /// 巡洋艦可使用的搭載欄數（0–4）
    pub cruiser_slot_quota: u8,

    /// 各裝備的持有上限（依名稱，優先於目錄中的上限）
    pub inventory_caps: BTreeMap<String, u32>,
}

impl ModelParams {
    /// 創建新的模型參數
    pub fn new(air_superiority_threshold: Decimal) -> Self {
        Self {
            air_superiority_threshold,
            cruiser_slot_quota: 1,
            inventory_caps: BTreeMap::new(),
        }
    }

    /// 由持久化設定與制空值下限組成
    pub fn from_settings(settings: &SolverSettings, air_superiority_threshold: Decimal) -> Self {
        Self {
            air_superiority_threshold,
            cruiser_slot_quota: settings.cruiser_slot_quota,
            inventory_caps: settings.inventory_caps.clone(),
        }
    }

    /// 建構器模式：設置巡洋艦可用搭載欄數
    pub fn with_cruiser_slot_quota(mut self, quota: u8) -> Self {
        self.cruiser_slot_quota = quota;
        self
    }

    /// 建構器模式：設置單一裝備的持有上限
    pub fn with_inventory_cap(mut self, item_name: impl Into<String>, cap: u32) -> Self {
        self.inventory_caps.insert(item_name.into(), cap);
        self
    }

    /// 檢查參數範圍
    pub fn validate(&self) -> Result<()> {
        if self.air_superiority_threshold < Decimal::ZERO {
            return Err(AirslotError::InvalidParameter(format!(
                "制空值下限不可為負: {}",
                self.air_superiority_threshold
            )));
        }

        if usize::from(self.cruiser_slot_quota) > SLOTS_PER_VESSEL {
            return Err(AirslotError::InvalidParameter(format!(
                "巡洋艦可用搭載欄數必須在 0 到 {} 之間: {}",
                SLOTS_PER_VESSEL, self.cruiser_slot_quota
            )));
        }

        Ok(())
    }

    /// 巡洋艦每艘至少須保留的空槽數
    pub fn cruiser_min_empty_slots(&self) -> u32 {
        (SLOTS_PER_VESSEL as u32).saturating_sub(u32::from(self.cruiser_slot_quota))
    }

    /// 裝備的實際持有上限：設定值優先，其次為目錄中的上限
    pub fn effective_cap(&self, item: &ItemType) -> Option<u32> {
        if item.is_empty_item() {
            return None;
        }

        self.inventory_caps
            .get(&item.name)
            .copied()
            .or(item.inventory_cap)
    }
}
