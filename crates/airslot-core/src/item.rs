//! 裝備目錄模型

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::{AirslotError, Result};

/// 空槽哨兵的名稱（不會出現在顯示結果中）
pub const EMPTY_ITEM_NAME: &str = "(empty)";

/// 裝備類別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemCategory {
    /// 艦戰
    CarrierFighter,
    /// 艦爆
    CarrierBomber,
    /// 艦攻
    CarrierAttacker,
    /// 水爆
    SeaplaneBomber,
    /// 水戰
    SeaplaneFighter,
    /// 其他（偵察機等）
    Other,
    /// 空槽哨兵專用，不觸發任何類別限制
    Empty,
}

impl ItemCategory {
    /// 是否屬於攻擊類別（計入目標函數）
    pub fn is_strike(self) -> bool {
        matches!(self, ItemCategory::CarrierBomber | ItemCategory::CarrierAttacker)
    }

    /// 是否為艦載機（巡洋艦不可搭載）
    pub fn is_carrier_borne(self) -> bool {
        matches!(
            self,
            ItemCategory::CarrierFighter | ItemCategory::CarrierBomber | ItemCategory::CarrierAttacker
        )
    }

    /// 是否為水上機（空母不可搭載）
    pub fn is_seaplane(self) -> bool {
        matches!(self, ItemCategory::SeaplaneBomber | ItemCategory::SeaplaneFighter)
    }
}

/// 裝備類型
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemType {
    /// 名稱（唯一鍵）
    pub name: String,

    /// 類別
    pub category: ItemCategory,

    /// 對空
    pub anti_air: i32,

    /// 火力
    pub firepower: i32,

    /// 爆裝
    pub bomber: i32,

    /// 雷裝
    pub torpedo: i32,

    /// 迴避
    pub evasion: i32,

    /// 命中
    pub accuracy: i32,

    /// 持有上限（None 表示不限）
    pub inventory_cap: Option<u32>,
}

impl ItemType {
    /// 創建屬性全為零的裝備
    pub fn new(name: impl Into<String>, category: ItemCategory) -> Self {
        Self {
            name: name.into(),
            category,
            anti_air: 0,
            firepower: 0,
            bomber: 0,
            torpedo: 0,
            evasion: 0,
            accuracy: 0,
            inventory_cap: None,
        }
    }

    /// 空槽哨兵
    pub fn empty() -> Self {
        Self::new(EMPTY_ITEM_NAME, ItemCategory::Empty)
    }

    /// 建構器模式：設置對空
    pub fn with_anti_air(mut self, value: i32) -> Self {
        self.anti_air = value;
        self
    }

    /// 建構器模式：設置火力
    pub fn with_firepower(mut self, value: i32) -> Self {
        self.firepower = value;
        self
    }

    /// 建構器模式：設置爆裝
    pub fn with_bomber(mut self, value: i32) -> Self {
        self.bomber = value;
        self
    }

    /// 建構器模式：設置雷裝
    pub fn with_torpedo(mut self, value: i32) -> Self {
        self.torpedo = value;
        self
    }

    /// 建構器模式：設置迴避
    pub fn with_evasion(mut self, value: i32) -> Self {
        self.evasion = value;
        self
    }

    /// 建構器模式：設置命中
    pub fn with_accuracy(mut self, value: i32) -> Self {
        self.accuracy = value;
        self
    }

    /// 建構器模式：設置持有上限
    pub fn with_inventory_cap(mut self, cap: u32) -> Self {
        self.inventory_cap = Some(cap);
        self
    }

    /// 是否為空槽哨兵
    pub fn is_empty_item(&self) -> bool {
        self.category == ItemCategory::Empty
    }
}

/// 裝備目錄（末尾固定附加空槽哨兵）
///
/// 索引即為決策變數中的 itemIndex，空槽哨兵的索引等於實際裝備數。
#[derive(Debug, Clone)]
pub struct Catalogue {
    items: Vec<ItemType>,
}

impl Catalogue {
    /// 由實際裝備清單建立目錄
    ///
    /// 名稱重複或清單中夾帶哨兵時回傳錯誤。
    pub fn new(items: Vec<ItemType>) -> Result<Self> {
        let mut seen = HashSet::new();
        for item in &items {
            if item.is_empty_item() {
                return Err(AirslotError::InvalidParameter(format!(
                    "目錄不可包含空槽類別的裝備: {}",
                    item.name
                )));
            }
            if !seen.insert(item.name.as_str()) {
                return Err(AirslotError::InvalidParameter(format!(
                    "裝備名稱重複: {}",
                    item.name
                )));
            }
        }

        let mut items = items;
        items.push(ItemType::empty());
        Ok(Self { items })
    }

    /// 含哨兵的裝備數
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// 目錄永遠至少包含哨兵
    pub fn is_empty(&self) -> bool {
        false
    }

    /// 實際裝備數（不含哨兵）
    pub fn real_len(&self) -> usize {
        self.items.len() - 1
    }

    /// 哨兵的索引
    pub fn empty_index(&self) -> usize {
        self.real_len()
    }

    pub fn get(&self, index: usize) -> Option<&ItemType> {
        self.items.get(index)
    }

    /// 依名稱查找實際裝備的索引
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.real_items().iter().position(|item| item.name == name)
    }

    /// 含哨兵的全部裝備
    pub fn items(&self) -> &[ItemType] {
        &self.items
    }

    /// 不含哨兵的實際裝備
    pub fn real_items(&self) -> &[ItemType] {
        &self.items[..self.real_len()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &ItemType> {
        self.items.iter()
    }
}
