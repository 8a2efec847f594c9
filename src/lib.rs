//! # Airslot
//!
//! 艦載機搭載最佳化：以二元整數規劃在制空值下限內最大化攻擊火力。
//!
//! - [`core`]：艦船、裝備目錄、設定與錯誤類型
//! - [`model`]：決策變數展開、約束建立、LP 輸出
//! - [`solver`]：外部求解器驅動與結果解析

pub use airslot_core as core;
pub use airslot_model as model;
pub use airslot_solver as solver;

pub use airslot_core::{
    AirslotError, Catalogue, FleetLoadout, ItemCategory, ItemType, ModelParams, Result,
    SolverSettings, VesselCategory, VesselConfig,
};
pub use airslot_model::{Contribution, SlotScorer, StandardScorer};
pub use airslot_solver::{SlotSolver, SolveOutcome, SolveRequest};
pub use rust_decimal::Decimal;
