//! 係數計算介面
//!
//! 建模器只透過 [`SlotScorer`] 取得每個 (裝備, 搭載數) 的制空貢獻與火力貢獻，
//! 不假設任何特定公式；實作必須是確定性且無副作用的。

use airslot_core::{ItemCategory, ItemType};
use rust_decimal::Decimal;

/// 單一決策變數的兩個係數
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Contribution {
    /// 制空貢獻
    pub air_superiority: Decimal,
    /// 火力貢獻
    pub power: Decimal,
}

impl Contribution {
    pub fn new(air_superiority: Decimal, power: Decimal) -> Self {
        Self {
            air_superiority,
            power,
        }
    }

    pub fn zero() -> Self {
        Self::default()
    }
}

/// 係數計算函數
pub trait SlotScorer {
    fn score(&self, item: &ItemType, capacity: u32) -> Contribution;
}

impl<F> SlotScorer for F
where
    F: Fn(&ItemType, u32) -> Contribution,
{
    fn score(&self, item: &ItemType, capacity: u32) -> Contribution {
        self(item, capacity)
    }
}

/// 預設的係數計算
///
/// - 制空：⌊對空 × √搭載數⌋（僅限艦載機與水上機）
/// - 火力：⌊(爆裝 + 雷裝) × √搭載數⌋ + 25（僅限攻擊類別且搭載數大於 0）
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardScorer;

/// 火力公式的基本加值
const STRIKE_BASE_POWER: i64 = 25;

impl SlotScorer for StandardScorer {
    fn score(&self, item: &ItemType, capacity: u32) -> Contribution {
        if capacity == 0 || item.is_empty_item() {
            return Contribution::zero();
        }

        let root = f64::from(capacity).sqrt();

        let air_superiority = match item.category {
            ItemCategory::CarrierFighter
            | ItemCategory::CarrierBomber
            | ItemCategory::CarrierAttacker
            | ItemCategory::SeaplaneBomber
            | ItemCategory::SeaplaneFighter => floor_scaled(item.anti_air, root),
            ItemCategory::Other | ItemCategory::Empty => 0,
        };

        let power = if item.category.is_strike() {
            floor_scaled(item.bomber + item.torpedo, root) + STRIKE_BASE_POWER
        } else {
            0
        };

        Contribution::new(Decimal::from(air_superiority), Decimal::from(power))
    }
}

fn floor_scaled(stat: i32, root: f64) -> i64 {
    (f64::from(stat) * root).floor() as i64
}
