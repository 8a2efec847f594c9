//! 艦載機搭載求解示例
//!
//! 用法：
//!   cargo run --example solve_fleet -- <設定檔路徑> [制空值下限]
//!
//! 設定檔不存在時會寫出預設值；請在其中填入 `solver_path` 後再執行。

use airslot::model::{LpWriter, ModelBuilder, VariableSpace};
use airslot::*;
use rust_decimal::Decimal;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let mut args = std::env::args().skip(1);
    let settings_path = args.next().unwrap_or_else(|| "airslot.json".to_string());
    let threshold: Decimal = args.next().as_deref().unwrap_or("200").parse()?;

    let settings = SolverSettings::load_or_default(&settings_path)?;

    let roster = vec![
        VesselConfig::new("Akagi", VesselCategory::Carrier, [18, 18, 27, 10]),
        VesselConfig::new("Kaga", VesselCategory::Carrier, [18, 18, 45, 12]),
        VesselConfig::new("Tone", VesselCategory::Cruiser, [2, 2, 9, 5]),
    ];
    let catalogue = Catalogue::new(vec![
        ItemType::new("Reppuu", ItemCategory::CarrierFighter)
            .with_anti_air(10)
            .with_evasion(2)
            .with_inventory_cap(4),
        ItemType::new("Suisei", ItemCategory::CarrierBomber)
            .with_bomber(11)
            .with_inventory_cap(2),
        ItemType::new("Ryuusei", ItemCategory::CarrierAttacker)
            .with_torpedo(13)
            .with_inventory_cap(3),
        ItemType::new("Zuiun", ItemCategory::SeaplaneBomber)
            .with_anti_air(2)
            .with_bomber(4),
    ])?;

    let params = ModelParams::from_settings(&settings, threshold);

    println!("=== 艦載機搭載求解示例 ===\n");

    if settings.solver_path.is_none() {
        // 沒有求解器時只輸出模型
        let space = VariableSpace::new(&roster, &catalogue, &StandardScorer);
        let model = ModelBuilder::new(&space, &params).build()?;
        println!("未設定求解器，僅輸出模型（{} 個變數）:\n", model.num_variables());
        print!("{}", LpWriter::default().render(&model));
        return Ok(());
    }

    let request = SolveRequest::new(&roster, &catalogue, params);
    let solver = SlotSolver::new(settings, StandardScorer);

    match solver.solve(&request) {
        Ok(outcome) => {
            println!("求解完成（{} ms）:", outcome.elapsed_ms);
            for row in outcome.loadout.rows() {
                println!("  - {}:", row.vessel_name);
                for (capacity, slot) in row.capacities.iter().zip(&row.slots) {
                    let name = if slot.is_empty() { "-" } else { slot.as_str() };
                    println!("      [{:>2}] {}", capacity, name);
                }
            }
        }
        Err(AirslotError::Infeasible) => println!("制空值 {} 下沒有可行解", threshold),
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
