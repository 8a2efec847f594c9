//! 整數規劃模型

use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::variable::VarId;

/// 線性項：係數 × 變數
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Term {
    pub coefficient: Decimal,
    pub variable: VarId,
}

impl Term {
    pub fn new(coefficient: Decimal, variable: VarId) -> Self {
        Self {
            coefficient,
            variable,
        }
    }

    /// 係數為 1 的項
    pub fn unit(variable: VarId) -> Self {
        Self::new(Decimal::ONE, variable)
    }
}

/// 約束方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    Le,
    Ge,
    Eq,
}

impl Sense {
    pub fn as_str(self) -> &'static str {
        match self {
            Sense::Le => "<=",
            Sense::Ge => ">=",
            Sense::Eq => "=",
        }
    }
}

/// 約束的來源規則
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    /// 制空值下限
    AirSuperiority,
    /// 每個搭載欄恰好選一種裝備
    SlotUniqueness { vessel: usize, slot: usize },
    /// 持有上限
    Inventory { item: usize },
    /// 空母不可搭載水上機
    CarrierExclusion,
    /// 巡洋艦不可搭載艦載機
    CruiserExclusion,
    /// 單艘巡洋艦的空槽下限
    CruiserEmptyQuota { vessel: usize },
}

/// 線性約束
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    pub kind: ConstraintKind,
    pub terms: Vec<Term>,
    pub sense: Sense,
    pub rhs: Decimal,
}

impl Constraint {
    pub fn new(kind: ConstraintKind, terms: Vec<Term>, sense: Sense, rhs: Decimal) -> Self {
        Self {
            kind,
            terms,
            sense,
            rhs,
        }
    }

    /// 約束涉及的變數
    pub fn variables(&self) -> impl Iterator<Item = VarId> + '_ {
        self.terms.iter().map(|term| term.variable)
    }
}

/// 二元整數規劃模型（最大化）
///
/// 每次求解重新建立，輸出後即丟棄。
#[derive(Debug, Clone, Default)]
pub struct Model {
    /// 全部變數（展開順序）
    pub variables: Vec<VarId>,

    /// 目標函數（最大化）
    pub objective: Vec<Term>,

    /// 約束（依建立順序）
    pub constraints: Vec<Constraint>,

    /// 變數說明（艦名、搭載數、裝備名），僅供註解輸出
    pub labels: HashMap<VarId, String>,
}

impl Model {
    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// 篩選指定規則產生的約束
    pub fn constraints_where<'m>(
        &'m self,
        predicate: impl Fn(&ConstraintKind) -> bool + 'm,
    ) -> impl Iterator<Item = &'m Constraint> + 'm {
        self.constraints
            .iter()
            .filter(move |constraint| predicate(&constraint.kind))
    }

    pub fn label(&self, id: &VarId) -> Option<&str> {
        self.labels.get(id).map(String::as_str)
    }
}
