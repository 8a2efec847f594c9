//! 求解結果解析
//!
//! 逐行掃描求解器日誌，取每行第一個 `slot_<艦>_<欄>_<裝備>` 識別碼，
//! 以建模時相同的變數空間解碼後填入編成表。

use airslot_core::{AirslotError, FleetLoadout, Result};
use airslot_model::{VarId, VariableSpace};
use regex::Regex;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// 日誌行的比對樣式
///
/// 識別碼之後必須是字邊界且至少還有一個字元（例如數值欄），
/// 行尾單獨出現的識別碼不算被選中。
pub const SLOT_PATTERN: &str = r"(?P<slot>slot_\d+_\d_\d+)\b.+";

/// 已解碼的選擇結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub id: VarId,
    /// 艦名
    pub vessel_name: String,
    /// 搭載欄索引
    pub slot: usize,
    /// 裝備名（空槽為空字串）
    pub item_name: String,
}

/// 求解結果解析器
pub struct SolutionMapper<'s, 'a> {
    space: &'s VariableSpace<'a>,
    pattern: Regex,
}

impl<'s, 'a> SolutionMapper<'s, 'a> {
    pub fn new(space: &'s VariableSpace<'a>) -> Result<Self> {
        let pattern = Regex::new(SLOT_PATTERN)
            .map_err(|e| AirslotError::InvalidParameter(format!("日誌比對樣式無效: {}", e)))?;
        Ok(Self { space, pattern })
    }

    /// 取出日誌中的識別碼（每行最多一個，重複者只保留第一次出現）
    pub fn extract_tokens<R: BufRead>(&self, mut reader: R) -> Result<Vec<String>> {
        let mut tokens = Vec::new();
        let mut seen = HashSet::new();
        let mut buf = Vec::new();

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }

            let line = String::from_utf8_lossy(&buf);
            let line = line.trim_end_matches(['\r', '\n']);
            if let Some(caps) = self.pattern.captures(line) {
                let token = caps["slot"].to_string();
                if seen.insert(token.clone()) {
                    tokens.push(token);
                }
            }
        }

        Ok(tokens)
    }

    /// 解碼識別碼；沒有任何識別碼即為無解
    pub fn decode(&self, tokens: &[String]) -> Result<Vec<Selection>> {
        if tokens.is_empty() {
            return Err(AirslotError::Infeasible);
        }

        tokens
            .iter()
            .map(|token| {
                let id = self.space.decode(token)?;
                let vessel = self.space.vessel_of(id).ok_or_else(|| mismatch(token))?;
                let item = self.space.item_of(id).ok_or_else(|| mismatch(token))?;

                Ok(Selection {
                    id,
                    vessel_name: vessel.name.clone(),
                    slot: id.slot,
                    item_name: if item.is_empty_item() {
                        String::new()
                    } else {
                        item.name.clone()
                    },
                })
            })
            .collect()
    }

    /// 解析日誌內容
    pub fn map_reader<R: BufRead>(&self, reader: R) -> Result<Vec<Selection>> {
        let tokens = self.extract_tokens(reader)?;
        tracing::debug!("日誌中找到 {} 個識別碼", tokens.len());
        self.decode(&tokens)
    }

    /// 解析日誌檔
    pub fn map_log(&self, path: impl AsRef<Path>) -> Result<Vec<Selection>> {
        let file = File::open(path)?;
        self.map_reader(BufReader::new(file))
    }

    /// 將選擇結果填入編成表
    ///
    /// 先確認所有艦名都存在，避免只填入一部分。
    pub fn apply(&self, selections: &[Selection], loadout: &mut FleetLoadout) -> Result<()> {
        if let Some(missing) = selections
            .iter()
            .find(|s| loadout.row(&s.vessel_name).is_none())
        {
            return Err(AirslotError::VesselNotFound(missing.vessel_name.clone()));
        }

        for selection in selections {
            loadout.set_slot(&selection.vessel_name, selection.slot, &selection.item_name)?;
        }
        Ok(())
    }
}

fn mismatch(token: &str) -> AirslotError {
    AirslotError::DecodeMismatch(token.to_string())
}
