//! # Airslot Core
//!
//! 核心資料模型與類型定義

pub mod config;
pub mod item;
pub mod loadout;
pub mod vessel;

// Re-export 主要類型
pub use config::{ModelParams, SolverSettings};
pub use item::{Catalogue, ItemCategory, ItemType, EMPTY_ITEM_NAME};
pub use loadout::{FleetLoadout, VesselLoadout};
pub use vessel::{validate_roster, VesselCategory, VesselConfig, SLOTS_PER_VESSEL};

/// Airslot 錯誤類型
///
/// 前四種對應求解請求可能的失敗原因，各自提供可區分的訊息。
#[derive(Debug, thiserror::Error)]
pub enum AirslotError {
    #[error("求解器設定錯誤: {0}")]
    Configuration(String),

    #[error("求解器執行失敗: {0}")]
    SolverInvocation(String),

    #[error("沒有滿足所有約束（含制空值下限）的解")]
    Infeasible,

    #[error("求解結果與模型不一致: {0}")]
    DecodeMismatch(String),

    #[error("無效的變數識別碼: {0}")]
    InvalidVariableId(String),

    #[error("找不到艦名: {0}")]
    VesselNotFound(String),

    #[error("無效的參數: {0}")]
    InvalidParameter(String),

    #[error("檔案讀寫錯誤: {0}")]
    Io(#[from] std::io::Error),

    #[error("設定檔格式錯誤: {0}")]
    Settings(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AirslotError>;
