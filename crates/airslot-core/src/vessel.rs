//! 艦船搭載欄配置模型

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::{AirslotError, Result};

/// 每艘艦船的搭載欄數
pub const SLOTS_PER_VESSEL: usize = 4;

/// 艦種
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VesselCategory {
    /// 空母
    Carrier,
    /// 巡洋艦
    Cruiser,
    /// 其他
    Other,
}

/// 艦船搭載欄配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VesselConfig {
    /// 艦名（唯一鍵）
    pub name: String,

    /// 艦種
    pub category: VesselCategory,

    /// 四個搭載欄的搭載數（可為 0）
    pub capacities: [u32; SLOTS_PER_VESSEL],
}

impl VesselConfig {
    /// 創建新的艦船配置
    pub fn new(
        name: impl Into<String>,
        category: VesselCategory,
        capacities: [u32; SLOTS_PER_VESSEL],
    ) -> Self {
        Self {
            name: name.into(),
            category,
            capacities,
        }
    }

    /// 指定搭載欄的搭載數
    pub fn capacity(&self, slot: usize) -> Option<u32> {
        self.capacities.get(slot).copied()
    }

    pub fn is_carrier(&self) -> bool {
        self.category == VesselCategory::Carrier
    }

    pub fn is_cruiser(&self) -> bool {
        self.category == VesselCategory::Cruiser
    }

    /// 總搭載數
    pub fn total_capacity(&self) -> u32 {
        self.capacities.iter().sum()
    }
}

/// 檢查艦隊編成：至少一艘，艦名不可重複
pub fn validate_roster(roster: &[VesselConfig]) -> Result<()> {
    if roster.is_empty() {
        return Err(AirslotError::InvalidParameter("艦隊編成為空".to_string()));
    }

    let mut seen = HashSet::new();
    for vessel in roster {
        if !seen.insert(vessel.name.as_str()) {
            return Err(AirslotError::InvalidParameter(format!(
                "艦名重複: {}",
                vessel.name
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_vessel() {
        let vessel = VesselConfig::new("Akagi", VesselCategory::Carrier, [18, 18, 27, 10]);

        assert_eq!(vessel.name, "Akagi");
        assert!(vessel.is_carrier());
        assert!(!vessel.is_cruiser());
        assert_eq!(vessel.capacity(2), Some(27));
        assert_eq!(vessel.capacity(4), None);
        assert_eq!(vessel.total_capacity(), 73);
    }

    #[test]
    fn test_validate_roster() {
        let roster = vec![
            VesselConfig::new("Akagi", VesselCategory::Carrier, [18, 18, 27, 10]),
            VesselConfig::new("Tone", VesselCategory::Cruiser, [2, 2, 9, 5]),
        ];
        assert!(validate_roster(&roster).is_ok());

        let duplicated = vec![roster[0].clone(), roster[0].clone()];
        assert!(matches!(
            validate_roster(&duplicated),
            Err(AirslotError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_empty_roster_rejected() {
        assert!(matches!(
            validate_roster(&[]),
            Err(AirslotError::InvalidParameter(_))
        ));
    }
}
