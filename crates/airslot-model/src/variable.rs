//! 決策變數空間
//!
//! 每個 (艦, 搭載欄, 裝備) 組合對應一個 0/1 決策變數，識別碼格式為
//! `slot_<艦索引>_<搭載欄索引>_<裝備索引>`。這裡不做任何篩選，
//! 艦種限制一律在建模階段以約束表達，讓不可行的情況能被明確回報。
//!
//! 變數的排列順序固定為「艦 → 搭載欄 → 裝備」，因此可由索引直接算出位置，
//! 解析求解結果時只需以相同的編成與目錄重建空間即可。

use airslot_core::{
    AirslotError, Catalogue, ItemType, Result, VesselConfig, SLOTS_PER_VESSEL,
};
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

use crate::scoring::SlotScorer;

/// 識別碼前綴
pub const VAR_PREFIX: &str = "slot_";

/// 決策變數識別碼
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarId {
    /// 艦在編成中的索引
    pub vessel: usize,
    /// 搭載欄索引（0–3）
    pub slot: usize,
    /// 裝備在目錄（含哨兵）中的索引
    pub item: usize,
}

impl VarId {
    pub fn new(vessel: usize, slot: usize, item: usize) -> Self {
        Self { vessel, slot, item }
    }
}

impl fmt::Display for VarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}_{}_{}", VAR_PREFIX, self.vessel, self.slot, self.item)
    }
}

impl FromStr for VarId {
    type Err = AirslotError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || AirslotError::InvalidVariableId(s.to_string());

        let body = s.strip_prefix(VAR_PREFIX).ok_or_else(invalid)?;
        let mut parts = body.split('_');
        let (vessel, slot, item) = match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(v), Some(s), Some(i), None) => (v, s, i),
            _ => return Err(invalid()),
        };

        if slot.len() != 1 {
            return Err(invalid());
        }

        Ok(Self {
            vessel: parse_index(vessel).ok_or_else(invalid)?,
            slot: parse_index(slot).ok_or_else(invalid)?,
            item: parse_index(item).ok_or_else(invalid)?,
        })
    }
}

fn parse_index(text: &str) -> Option<usize> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// 決策變數
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecisionVariable {
    pub id: VarId,
    /// 制空貢獻
    pub air_superiority: Decimal,
    /// 火力貢獻
    pub power: Decimal,
}

/// 依序產生全部決策變數
///
/// 可重複呼叫，相同輸入永遠得到相同順序。
pub fn enumerate<'a, S>(
    roster: &'a [VesselConfig],
    catalogue: &'a Catalogue,
    scorer: &'a S,
) -> impl Iterator<Item = DecisionVariable> + 'a
where
    S: SlotScorer + ?Sized + 'a,
{
    roster.iter().enumerate().flat_map(move |(v, vessel)| {
        vessel
            .capacities
            .iter()
            .enumerate()
            .flat_map(move |(s, &capacity)| {
                catalogue.iter().enumerate().map(move |(i, item)| {
                    let contribution = scorer.score(item, capacity);
                    DecisionVariable {
                        id: VarId::new(v, s, i),
                        air_superiority: contribution.air_superiority,
                        power: contribution.power,
                    }
                })
            })
    })
}

/// 展開後的決策變數空間
#[derive(Debug, Clone)]
pub struct VariableSpace<'a> {
    roster: &'a [VesselConfig],
    catalogue: &'a Catalogue,
    variables: Vec<DecisionVariable>,
}

impl<'a> VariableSpace<'a> {
    /// 展開 艦 × 搭載欄 × 裝備 的笛卡兒積
    pub fn new<S>(roster: &'a [VesselConfig], catalogue: &'a Catalogue, scorer: &S) -> Self
    where
        S: SlotScorer + ?Sized,
    {
        let variables: Vec<_> = enumerate(roster, catalogue, scorer).collect();

        tracing::debug!(
            "變數空間：艦 {} 艘 × 搭載欄 {} × 裝備 {} 種 = {} 個變數",
            roster.len(),
            SLOTS_PER_VESSEL,
            catalogue.len(),
            variables.len()
        );

        Self {
            roster,
            catalogue,
            variables,
        }
    }

    pub fn roster(&self) -> &'a [VesselConfig] {
        self.roster
    }

    pub fn catalogue(&self) -> &'a Catalogue {
        self.catalogue
    }

    pub fn variables(&self) -> &[DecisionVariable] {
        &self.variables
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// 變數在展開順序中的位置；超出範圍時回傳 None
    pub fn position(&self, id: VarId) -> Option<usize> {
        if id.vessel >= self.roster.len()
            || id.slot >= SLOTS_PER_VESSEL
            || id.item >= self.catalogue.len()
        {
            return None;
        }
        Some((id.vessel * SLOTS_PER_VESSEL + id.slot) * self.catalogue.len() + id.item)
    }

    pub fn get(&self, id: VarId) -> Option<&DecisionVariable> {
        self.position(id).and_then(|index| self.variables.get(index))
    }

    /// 同一 (艦, 搭載欄) 的全部變數
    pub fn slot_variables(&self, vessel: usize, slot: usize) -> &[DecisionVariable] {
        let width = self.catalogue.len();
        let start = (vessel * SLOTS_PER_VESSEL + slot) * width;
        self.variables.get(start..start + width).unwrap_or(&[])
    }

    /// 變數對應的艦
    pub fn vessel_of(&self, id: VarId) -> Option<&'a VesselConfig> {
        self.roster.get(id.vessel)
    }

    /// 變數對應的裝備
    pub fn item_of(&self, id: VarId) -> Option<&'a ItemType> {
        self.catalogue.get(id.item)
    }

    /// 解析識別碼並檢查是否落在目前的編成與目錄範圍內
    pub fn decode(&self, token: &str) -> Result<VarId> {
        let id: VarId = token.parse()?;
        if self.position(id).is_none() {
            return Err(AirslotError::DecodeMismatch(format!(
                "{} 超出範圍（艦 {} 艘、裝備 {} 種）",
                token,
                self.roster.len(),
                self.catalogue.len()
            )));
        }
        Ok(id)
    }
}
