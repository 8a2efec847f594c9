//! 求解請求主流程

use airslot_core::{
    validate_roster, Catalogue, FleetLoadout, ModelParams, Result, SolverSettings, VesselConfig,
};
use airslot_model::{EmitOptions, LpWriter, ModelBuilder, SlotScorer, VariableSpace};
use uuid::Uuid;

use crate::driver::{SolverArtifacts, SolverDriver};
use crate::mapper::{Selection, SolutionMapper};

/// 單次求解請求
///
/// 編成與目錄在求解期間唯讀。
#[derive(Debug, Clone)]
pub struct SolveRequest<'a> {
    /// 選定的艦隊編成（依序）
    pub roster: &'a [VesselConfig],

    /// 裝備目錄（已附加空槽哨兵）
    pub catalogue: &'a Catalogue,

    /// 模型參數
    pub params: ModelParams,
}

impl<'a> SolveRequest<'a> {
    pub fn new(roster: &'a [VesselConfig], catalogue: &'a Catalogue, params: ModelParams) -> Self {
        Self {
            roster,
            catalogue,
            params,
        }
    }
}

/// 求解結果
#[derive(Debug, Clone)]
pub struct SolveOutcome {
    /// 請求識別碼
    pub request_id: Uuid,

    /// 被選中的變數
    pub selections: Vec<Selection>,

    /// 填好的編成表
    pub loadout: FleetLoadout,

    /// 變數數量
    pub num_variables: usize,

    /// 約束數量
    pub num_constraints: usize,

    /// 耗時（毫秒）
    pub elapsed_ms: u128,
}

/// 搭載求解器：展開 → 建模 → 輸出 → 呼叫求解器 → 解析結果
pub struct SlotSolver<S> {
    settings: SolverSettings,
    scorer: S,
    emit_options: EmitOptions,
}

impl<S: SlotScorer> SlotSolver<S> {
    pub fn new(settings: SolverSettings, scorer: S) -> Self {
        Self {
            settings,
            scorer,
            emit_options: EmitOptions::default(),
        }
    }

    /// 建構器模式：設置 LP 輸出選項
    pub fn with_emit_options(mut self, options: EmitOptions) -> Self {
        self.emit_options = options;
        self
    }

    pub fn settings(&self) -> &SolverSettings {
        &self.settings
    }

    /// 只建模並寫出模型檔，不呼叫求解器
    pub fn write_model(&self, request: &SolveRequest<'_>) -> Result<SolverArtifacts> {
        validate_roster(request.roster)?;

        let space = VariableSpace::new(request.roster, request.catalogue, &self.scorer);
        let model = ModelBuilder::new(&space, &request.params).build()?;

        let artifacts = SolverArtifacts::from_settings(&self.settings)?;
        artifacts.prepare()?;
        LpWriter::new(self.emit_options).write_file(&model, artifacts.model_path())?;

        Ok(artifacts)
    }

    /// 執行一次完整求解
    pub fn solve(&self, request: &SolveRequest<'_>) -> Result<SolveOutcome> {
        let request_id = Uuid::new_v4();
        let start_time = std::time::Instant::now();

        tracing::info!(
            "開始求解 {}：艦 {} 艘，裝備 {} 種，制空值下限 {}",
            request_id,
            request.roster.len(),
            request.catalogue.real_len(),
            request.params.air_superiority_threshold
        );

        // 先檢查設定，避免無謂地建模
        self.settings.validate_solver_path()?;
        validate_roster(request.roster)?;
        request.params.validate()?;

        tracing::debug!("Step 1: 展開決策變數");
        let space = VariableSpace::new(request.roster, request.catalogue, &self.scorer);

        tracing::debug!("Step 2: 建立模型");
        let model = ModelBuilder::new(&space, &request.params).build()?;

        tracing::debug!("Step 3: 寫出模型與批次指令");
        let artifacts = SolverArtifacts::from_settings(&self.settings)?;
        artifacts.prepare()?;
        LpWriter::new(self.emit_options).write_file(&model, artifacts.model_path())?;

        let driver = SolverDriver::new(&self.settings);
        driver.write_script(&artifacts)?;

        tracing::debug!("Step 4: 呼叫求解器");
        let log_path = driver.invoke(&artifacts)?;

        tracing::debug!("Step 5: 解析求解結果");
        let mapper = SolutionMapper::new(&space)?;
        let selections = mapper.map_log(&log_path)?;

        let mut loadout = FleetLoadout::from_roster(request.roster);
        mapper.apply(&selections, &mut loadout)?;

        let outcome = SolveOutcome {
            request_id,
            selections,
            loadout,
            num_variables: model.num_variables(),
            num_constraints: model.num_constraints(),
            elapsed_ms: start_time.elapsed().as_millis(),
        };

        tracing::info!(
            "求解 {} 完成，耗時 {:?}，選中 {} 個變數",
            request_id,
            start_time.elapsed(),
            outcome.selections.len()
        );

        Ok(outcome)
    }
}
