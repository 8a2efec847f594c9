//! 編成表（每艘艦的搭載結果顯示）

use serde::{Deserialize, Serialize};

use crate::vessel::{VesselConfig, SLOTS_PER_VESSEL};
use crate::{AirslotError, Result};

/// 單艘艦的搭載結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VesselLoadout {
    /// 艦名
    pub vessel_name: String,

    /// 搭載數
    pub capacities: [u32; SLOTS_PER_VESSEL],

    /// 各搭載欄顯示的裝備名（空字串表示未裝備）
    pub slots: [String; SLOTS_PER_VESSEL],
}

/// 艦隊編成表
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FleetLoadout {
    rows: Vec<VesselLoadout>,
}

impl FleetLoadout {
    /// 由艦隊編成建立空白的編成表
    pub fn from_roster(roster: &[VesselConfig]) -> Self {
        let rows = roster
            .iter()
            .map(|vessel| VesselLoadout {
                vessel_name: vessel.name.clone(),
                capacities: vessel.capacities,
                slots: Default::default(),
            })
            .collect();
        Self { rows }
    }

    /// 清空所有搭載欄
    pub fn clear(&mut self) {
        for row in &mut self.rows {
            row.slots = Default::default();
        }
    }

    /// 依艦名查找行
    pub fn row(&self, vessel_name: &str) -> Option<&VesselLoadout> {
        self.rows.iter().find(|row| row.vessel_name == vessel_name)
    }

    /// 設置指定艦、指定搭載欄的顯示值
    pub fn set_slot(&mut self, vessel_name: &str, slot: usize, value: &str) -> Result<()> {
        if slot >= SLOTS_PER_VESSEL {
            return Err(AirslotError::DecodeMismatch(format!(
                "搭載欄索引超出範圍: {}",
                slot
            )));
        }

        let row = self
            .rows
            .iter_mut()
            .find(|row| row.vessel_name == vessel_name)
            .ok_or_else(|| AirslotError::VesselNotFound(vessel_name.to_string()))?;

        row.slots[slot] = value.to_string();
        Ok(())
    }

    pub fn rows(&self) -> &[VesselLoadout] {
        &self.rows
    }

    /// 是否所有搭載欄皆為空白
    pub fn is_blank(&self) -> bool {
        self.rows
            .iter()
            .all(|row| row.slots.iter().all(|slot| slot.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vessel::VesselCategory;

    fn roster() -> Vec<VesselConfig> {
        vec![
            VesselConfig::new("Akagi", VesselCategory::Carrier, [18, 18, 27, 10]),
            VesselConfig::new("Tone", VesselCategory::Cruiser, [2, 2, 9, 5]),
        ]
    }

    #[test]
    fn test_from_roster_is_blank() {
        let loadout = FleetLoadout::from_roster(&roster());

        assert_eq!(loadout.rows().len(), 2);
        assert!(loadout.is_blank());
        assert_eq!(loadout.row("Tone").unwrap().capacities, [2, 2, 9, 5]);
    }

    #[test]
    fn test_set_slot_and_clear() {
        let mut loadout = FleetLoadout::from_roster(&roster());

        loadout.set_slot("Akagi", 2, "Ryuusei").unwrap();
        assert_eq!(loadout.row("Akagi").unwrap().slots[2], "Ryuusei");
        assert!(!loadout.is_blank());

        loadout.clear();
        assert!(loadout.is_blank());
    }

    #[test]
    fn test_set_slot_unknown_vessel() {
        let mut loadout = FleetLoadout::from_roster(&roster());

        let err = loadout.set_slot("Kaga", 0, "Reppuu").unwrap_err();
        assert!(matches!(err, AirslotError::VesselNotFound(name) if name == "Kaga"));
    }

    #[test]
    fn test_set_slot_out_of_range() {
        let mut loadout = FleetLoadout::from_roster(&roster());
        assert!(loadout.set_slot("Akagi", 4, "Reppuu").is_err());
    }
}
