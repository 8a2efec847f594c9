//! 目標函數與約束建立器

use airslot_core::{validate_roster, ModelParams, Result, SLOTS_PER_VESSEL};
use rust_decimal::Decimal;

use crate::model::{Constraint, ConstraintKind, Model, Sense, Term};
use crate::variable::{DecisionVariable, VarId, VariableSpace};

/// 由變數空間與參數建立二元整數規劃模型
pub struct ModelBuilder<'s, 'a> {
    space: &'s VariableSpace<'a>,
    params: &'s ModelParams,
}

impl<'s, 'a> ModelBuilder<'s, 'a> {
    pub fn new(space: &'s VariableSpace<'a>, params: &'s ModelParams) -> Self {
        Self { space, params }
    }

    /// 建立完整模型
    ///
    /// 約束順序：制空值下限、搭載欄唯一性、持有上限、空母限制、巡洋艦限制、
    /// 巡洋艦空槽下限。順序固定，輸出結果可重現。
    pub fn build(&self) -> Result<Model> {
        validate_roster(self.space.roster())?;
        self.params.validate()?;

        tracing::debug!("Step 1: 目標函數");
        let objective = self.objective();

        tracing::debug!("Step 2: 約束");
        let mut constraints = Vec::new();
        constraints.push(self.air_superiority_constraint());
        constraints.extend(self.slot_uniqueness_constraints());
        constraints.extend(self.inventory_constraints());
        constraints.extend(self.carrier_exclusion_constraint());
        constraints.extend(self.cruiser_exclusion_constraint());
        constraints.extend(self.cruiser_empty_quota_constraints());

        let model = Model {
            variables: self.space.variables().iter().map(|v| v.id).collect(),
            objective,
            constraints,
            labels: self.labels(),
        };

        tracing::debug!(
            "模型建立完成：變數 {} 個，約束 {} 條，目標項 {} 個",
            model.num_variables(),
            model.num_constraints(),
            model.objective.len()
        );

        Ok(model)
    }

    /// 最大化攻擊類別裝備的火力貢獻
    fn objective(&self) -> Vec<Term> {
        self.space
            .variables()
            .iter()
            .filter(|v| self.item_matches(v.id, |item| item.category.is_strike()))
            .map(|v| Term::new(v.power, v.id))
            .collect()
    }

    /// 全部變數的制空貢獻總和 ≥ 下限
    fn air_superiority_constraint(&self) -> Constraint {
        let terms = self
            .space
            .variables()
            .iter()
            .map(|v| Term::new(v.air_superiority, v.id))
            .collect();

        Constraint::new(
            ConstraintKind::AirSuperiority,
            terms,
            Sense::Ge,
            self.params.air_superiority_threshold,
        )
    }

    /// 每個 (艦, 搭載欄) 恰好選一種裝備（含空槽）
    fn slot_uniqueness_constraints(&self) -> Vec<Constraint> {
        let mut constraints = Vec::with_capacity(self.space.roster().len() * SLOTS_PER_VESSEL);

        for vessel in 0..self.space.roster().len() {
            for slot in 0..SLOTS_PER_VESSEL {
                let terms = self
                    .space
                    .slot_variables(vessel, slot)
                    .iter()
                    .map(|v| Term::unit(v.id))
                    .collect();

                constraints.push(Constraint::new(
                    ConstraintKind::SlotUniqueness { vessel, slot },
                    terms,
                    Sense::Eq,
                    Decimal::ONE,
                ));
            }
        }

        constraints
    }

    /// 有上限的裝備：所有艦、所有搭載欄的使用數 ≤ 上限
    fn inventory_constraints(&self) -> Vec<Constraint> {
        let catalogue = self.space.catalogue();

        for name in self.params.inventory_caps.keys() {
            if catalogue.index_of(name).is_none() {
                tracing::warn!("持有上限設定的裝備不在目錄中，忽略: {}", name);
            }
        }

        catalogue
            .real_items()
            .iter()
            .enumerate()
            .filter_map(|(index, item)| {
                let cap = self.params.effective_cap(item)?;
                let terms = self
                    .space
                    .variables()
                    .iter()
                    .filter(|v| v.id.item == index)
                    .map(|v| Term::unit(v.id))
                    .collect();

                Some(Constraint::new(
                    ConstraintKind::Inventory { item: index },
                    terms,
                    Sense::Le,
                    Decimal::from(cap),
                ))
            })
            .collect()
    }

    /// 空母不可搭載水上機
    fn carrier_exclusion_constraint(&self) -> Option<Constraint> {
        if !self.space.roster().iter().any(|vessel| vessel.is_carrier()) {
            return None;
        }

        let terms = self.forbidden_terms(
            |v| self.vessel_matches(v.id, |vessel| vessel.is_carrier()),
            |v| self.item_matches(v.id, |item| item.category.is_seaplane()),
        );

        Self::exclusion(ConstraintKind::CarrierExclusion, terms)
    }

    /// 巡洋艦不可搭載艦載機
    fn cruiser_exclusion_constraint(&self) -> Option<Constraint> {
        if !self.has_cruiser() {
            return None;
        }

        let terms = self.forbidden_terms(
            |v| self.vessel_matches(v.id, |vessel| vessel.is_cruiser()),
            |v| self.item_matches(v.id, |item| item.category.is_carrier_borne()),
        );

        Self::exclusion(ConstraintKind::CruiserExclusion, terms)
    }

    /// 每艘巡洋艦的空槽數 ≥ 4 − 可用搭載欄數
    fn cruiser_empty_quota_constraints(&self) -> Vec<Constraint> {
        if !self.has_cruiser() {
            return Vec::new();
        }

        let empty_index = self.space.catalogue().empty_index();
        let min_empty = Decimal::from(self.params.cruiser_min_empty_slots());

        self.space
            .roster()
            .iter()
            .enumerate()
            .filter(|(_, vessel)| vessel.is_cruiser())
            .map(|(vessel, _)| {
                let terms = (0..SLOTS_PER_VESSEL)
                    .map(|slot| Term::unit(VarId::new(vessel, slot, empty_index)))
                    .collect();

                Constraint::new(
                    ConstraintKind::CruiserEmptyQuota { vessel },
                    terms,
                    Sense::Ge,
                    min_empty,
                )
            })
            .collect()
    }

    fn forbidden_terms(
        &self,
        vessel_filter: impl Fn(&DecisionVariable) -> bool,
        item_filter: impl Fn(&DecisionVariable) -> bool,
    ) -> Vec<Term> {
        self.space
            .variables()
            .iter()
            .filter(|&v| vessel_filter(v) && item_filter(v))
            .map(|v| Term::unit(v.id))
            .collect()
    }

    /// 禁止組合的總和 = 0；目錄中沒有相關裝備時不輸出空約束
    fn exclusion(kind: ConstraintKind, terms: Vec<Term>) -> Option<Constraint> {
        if terms.is_empty() {
            tracing::debug!("{:?} 沒有相關變數，略過", kind);
            return None;
        }
        Some(Constraint::new(kind, terms, Sense::Eq, Decimal::ZERO))
    }

    fn has_cruiser(&self) -> bool {
        self.space.roster().iter().any(|vessel| vessel.is_cruiser())
    }

    fn vessel_matches(
        &self,
        id: VarId,
        predicate: impl Fn(&airslot_core::VesselConfig) -> bool,
    ) -> bool {
        self.space.vessel_of(id).map_or(false, predicate)
    }

    fn item_matches(&self, id: VarId, predicate: impl Fn(&airslot_core::ItemType) -> bool) -> bool {
        self.space.item_of(id).map_or(false, predicate)
    }

    fn labels(&self) -> std::collections::HashMap<VarId, String> {
        self.space
            .variables()
            .iter()
            .filter_map(|v| {
                let vessel = self.space.vessel_of(v.id)?;
                let item = self.space.item_of(v.id)?;
                let capacity = vessel.capacity(v.id.slot)?;
                Some((v.id, format!("{} {} {}", vessel.name, capacity, item.name)))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{Contribution, StandardScorer};
    use airslot_core::{Catalogue, ItemCategory, ItemType, VesselCategory, VesselConfig};
    use std::collections::HashSet;

    fn fixed_scorer(_: &ItemType, capacity: u32) -> Contribution {
        Contribution::new(Decimal::from(capacity), Decimal::from(capacity * 2))
    }

    fn kinds<'m>(
        model: &'m Model,
        predicate: impl Fn(&ConstraintKind) -> bool + 'm,
    ) -> Vec<&'m Constraint> {
        model.constraints_where(predicate).collect()
    }

    #[test]
    fn test_slot_uniqueness_for_single_carrier() {
        let roster = vec![VesselConfig::new("Houshou", VesselCategory::Carrier, [4, 2, 2, 0])];
        let catalogue = Catalogue::new(vec![
            ItemType::new("Tenzan", ItemCategory::CarrierAttacker).with_torpedo(9),
        ])
        .unwrap();
        let space = VariableSpace::new(&roster, &catalogue, &StandardScorer);
        let params = ModelParams::new(Decimal::ZERO);

        let model = ModelBuilder::new(&space, &params).build().unwrap();

        let uniqueness = kinds(&model, |k| matches!(k, ConstraintKind::SlotUniqueness { .. }));
        assert_eq!(uniqueness.len(), 4);
        for (slot, constraint) in uniqueness.iter().enumerate() {
            assert_eq!(constraint.kind, ConstraintKind::SlotUniqueness { vessel: 0, slot });
            assert_eq!(constraint.terms.len(), 2);
            assert_eq!(constraint.sense, Sense::Eq);
            assert_eq!(constraint.rhs, Decimal::ONE);
            assert!(constraint.terms.iter().all(|t| t.coefficient == Decimal::ONE));
        }

        // 只有水上機會觸發空母限制
        assert!(kinds(&model, |k| *k == ConstraintKind::CarrierExclusion).is_empty());
        assert!(kinds(&model, |k| *k == ConstraintKind::CruiserExclusion).is_empty());
    }

    #[test]
    fn test_objective_only_strike_categories() {
        let roster = vec![VesselConfig::new("Akagi", VesselCategory::Carrier, [18, 18, 27, 10])];
        let catalogue = Catalogue::new(vec![
            ItemType::new("Reppuu", ItemCategory::CarrierFighter),
            ItemType::new("Suisei", ItemCategory::CarrierBomber),
            ItemType::new("Ryuusei", ItemCategory::CarrierAttacker),
        ])
        .unwrap();
        let space = VariableSpace::new(&roster, &catalogue, &fixed_scorer);
        let params = ModelParams::new(Decimal::ZERO);

        let model = ModelBuilder::new(&space, &params).build().unwrap();

        assert_eq!(model.objective.len(), 8);
        assert!(model.objective.iter().all(|t| t.variable.item == 1 || t.variable.item == 2));
        assert_eq!(model.objective[0], Term::new(Decimal::from(36), VarId::new(0, 0, 1)));
    }

    #[test]
    fn test_single_air_superiority_constraint_over_all_variables() {
        let roster = vec![
            VesselConfig::new("Akagi", VesselCategory::Carrier, [18, 18, 27, 10]),
            VesselConfig::new("Tone", VesselCategory::Cruiser, [2, 2, 9, 5]),
        ];
        let catalogue =
            Catalogue::new(vec![ItemType::new("Reppuu", ItemCategory::CarrierFighter)]).unwrap();
        let space = VariableSpace::new(&roster, &catalogue, &fixed_scorer);
        let params = ModelParams::new(Decimal::from(300));

        let model = ModelBuilder::new(&space, &params).build().unwrap();

        let air = kinds(&model, |k| *k == ConstraintKind::AirSuperiority);
        assert_eq!(air.len(), 1);
        assert_eq!(air[0].terms.len(), space.len());
        assert_eq!(air[0].sense, Sense::Ge);
        assert_eq!(air[0].rhs, Decimal::from(300));
        assert_eq!(model.constraints[0].kind, ConstraintKind::AirSuperiority);
    }

    #[test]
    fn test_cruiser_exclusion_terms() {
        let roster = vec![VesselConfig::new("Mogami", VesselCategory::Cruiser, [5, 6, 5, 11])];
        let catalogue =
            Catalogue::new(vec![ItemType::new("Reppuu", ItemCategory::CarrierFighter)]).unwrap();
        let space = VariableSpace::new(&roster, &catalogue, &StandardScorer);
        let params = ModelParams::new(Decimal::ZERO);

        let model = ModelBuilder::new(&space, &params).build().unwrap();

        let exclusion = kinds(&model, |k| *k == ConstraintKind::CruiserExclusion);
        assert_eq!(exclusion.len(), 1);
        assert_eq!(exclusion[0].sense, Sense::Eq);
        assert_eq!(exclusion[0].rhs, Decimal::ZERO);

        let vars: Vec<VarId> = exclusion[0].variables().collect();
        assert_eq!(
            vars,
            vec![
                VarId::new(0, 0, 0),
                VarId::new(0, 1, 0),
                VarId::new(0, 2, 0),
                VarId::new(0, 3, 0),
            ]
        );
    }

    #[test]
    fn test_carrier_exclusion_terms() {
        let roster = vec![
            VesselConfig::new("Akagi", VesselCategory::Carrier, [18, 18, 27, 10]),
            VesselConfig::new("Tone", VesselCategory::Cruiser, [2, 2, 9, 5]),
        ];
        let catalogue = Catalogue::new(vec![
            ItemType::new("Zuiun", ItemCategory::SeaplaneBomber),
            ItemType::new("Reppuu", ItemCategory::CarrierFighter),
            ItemType::new("Rufe", ItemCategory::SeaplaneFighter),
        ])
        .unwrap();
        let space = VariableSpace::new(&roster, &catalogue, &StandardScorer);
        let params = ModelParams::new(Decimal::ZERO);

        let model = ModelBuilder::new(&space, &params).build().unwrap();

        let exclusion = kinds(&model, |k| *k == ConstraintKind::CarrierExclusion);
        assert_eq!(exclusion.len(), 1);

        let vars: HashSet<VarId> = exclusion[0].variables().collect();
        assert_eq!(vars.len(), 8);
        assert!(vars.iter().all(|id| id.vessel == 0 && (id.item == 0 || id.item == 2)));
    }

    #[test]
    fn test_category_rules_absent_without_category() {
        let roster = vec![VesselConfig::new("Yamato", VesselCategory::Other, [7, 7, 7, 6])];
        let catalogue = Catalogue::new(vec![
            ItemType::new("Zuiun", ItemCategory::SeaplaneBomber),
            ItemType::new("Reppuu", ItemCategory::CarrierFighter),
        ])
        .unwrap();
        let space = VariableSpace::new(&roster, &catalogue, &StandardScorer);
        let params = ModelParams::new(Decimal::ZERO);

        let model = ModelBuilder::new(&space, &params).build().unwrap();

        assert!(kinds(&model, |k| matches!(
            k,
            ConstraintKind::CarrierExclusion
                | ConstraintKind::CruiserExclusion
                | ConstraintKind::CruiserEmptyQuota { .. }
        ))
        .is_empty());
        // 制空 + 4 個搭載欄
        assert_eq!(model.num_constraints(), 5);
    }

    #[test]
    fn test_cruiser_empty_quota_per_vessel() {
        let roster = vec![
            VesselConfig::new("Tone", VesselCategory::Cruiser, [2, 2, 9, 5]),
            VesselConfig::new("Akagi", VesselCategory::Carrier, [18, 18, 27, 10]),
            VesselConfig::new("Chikuma", VesselCategory::Cruiser, [2, 2, 9, 5]),
        ];
        let catalogue =
            Catalogue::new(vec![ItemType::new("Zuiun", ItemCategory::SeaplaneBomber)]).unwrap();
        let space = VariableSpace::new(&roster, &catalogue, &StandardScorer);
        let params = ModelParams::new(Decimal::ZERO).with_cruiser_slot_quota(1);

        let model = ModelBuilder::new(&space, &params).build().unwrap();

        let quota = kinds(&model, |k| matches!(k, ConstraintKind::CruiserEmptyQuota { .. }));
        assert_eq!(quota.len(), 2);
        assert_eq!(quota[0].kind, ConstraintKind::CruiserEmptyQuota { vessel: 0 });
        assert_eq!(quota[1].kind, ConstraintKind::CruiserEmptyQuota { vessel: 2 });

        for constraint in quota {
            assert_eq!(constraint.sense, Sense::Ge);
            assert_eq!(constraint.rhs, Decimal::from(3));
            assert_eq!(constraint.terms.len(), 4);
            assert!(constraint.variables().all(|id| id.item == 1));
        }
    }

    #[test]
    fn test_inventory_constraint_over_all_candidates() {
        let roster = vec![
            VesselConfig::new("Akagi", VesselCategory::Carrier, [18, 18, 27, 10]),
            VesselConfig::new("Kaga", VesselCategory::Carrier, [18, 18, 45, 12]),
        ];
        let catalogue = Catalogue::new(vec![
            ItemType::new("Reppuu", ItemCategory::CarrierFighter),
            ItemType::new("Ryuusei", ItemCategory::CarrierAttacker),
        ])
        .unwrap();
        let space = VariableSpace::new(&roster, &catalogue, &StandardScorer);
        let params = ModelParams::new(Decimal::ZERO).with_inventory_cap("Ryuusei", 3);

        let model = ModelBuilder::new(&space, &params).build().unwrap();

        let inventory = kinds(&model, |k| matches!(k, ConstraintKind::Inventory { .. }));
        assert_eq!(inventory.len(), 1);
        assert_eq!(inventory[0].kind, ConstraintKind::Inventory { item: 1 });
        assert_eq!(inventory[0].sense, Sense::Le);
        assert_eq!(inventory[0].rhs, Decimal::from(3));
        assert_eq!(inventory[0].terms.len(), 8);
        assert!(inventory[0].variables().all(|id| id.item == 1));
    }

    #[test]
    fn test_catalogue_cap_and_unknown_names() {
        let roster = vec![VesselConfig::new("Akagi", VesselCategory::Carrier, [18, 18, 27, 10])];
        let catalogue = Catalogue::new(vec![
            ItemType::new("Reppuu", ItemCategory::CarrierFighter).with_inventory_cap(2),
            ItemType::new("Ryuusei", ItemCategory::CarrierAttacker),
        ])
        .unwrap();
        let space = VariableSpace::new(&roster, &catalogue, &StandardScorer);
        let params = ModelParams::new(Decimal::ZERO).with_inventory_cap("Unknown", 1);

        let model = ModelBuilder::new(&space, &params).build().unwrap();

        let inventory = kinds(&model, |k| matches!(k, ConstraintKind::Inventory { .. }));
        assert_eq!(inventory.len(), 1);
        assert_eq!(inventory[0].kind, ConstraintKind::Inventory { item: 0 });
        assert_eq!(inventory[0].rhs, Decimal::from(2));
    }

    #[test]
    fn test_invalid_params_rejected() {
        let roster = vec![VesselConfig::new("Tone", VesselCategory::Cruiser, [2, 2, 9, 5])];
        let catalogue = Catalogue::new(Vec::new()).unwrap();
        let space = VariableSpace::new(&roster, &catalogue, &StandardScorer);
        let params = ModelParams::new(Decimal::ZERO).with_cruiser_slot_quota(5);

        assert!(ModelBuilder::new(&space, &params).build().is_err());
    }

    #[test]
    fn test_empty_roster_rejected() {
        let roster: Vec<VesselConfig> = Vec::new();
        let catalogue =
            Catalogue::new(vec![ItemType::new("Reppuu", ItemCategory::CarrierFighter)]).unwrap();
        let space = VariableSpace::new(&roster, &catalogue, &StandardScorer);
        let params = ModelParams::new(Decimal::from(5));

        assert!(matches!(
            ModelBuilder::new(&space, &params).build(),
            Err(airslot_core::AirslotError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_build_is_deterministic() {
        let roster = vec![
            VesselConfig::new("Akagi", VesselCategory::Carrier, [18, 18, 27, 10]),
            VesselConfig::new("Tone", VesselCategory::Cruiser, [2, 2, 9, 5]),
        ];
        let catalogue = Catalogue::new(vec![
            ItemType::new("Zuiun", ItemCategory::SeaplaneBomber).with_inventory_cap(2),
            ItemType::new("Ryuusei", ItemCategory::CarrierAttacker).with_inventory_cap(1),
        ])
        .unwrap();
        let space = VariableSpace::new(&roster, &catalogue, &StandardScorer);
        let params = ModelParams::new(Decimal::from(10));

        let first = ModelBuilder::new(&space, &params).build().unwrap();
        let second = ModelBuilder::new(&space, &params).build().unwrap();

        assert_eq!(first.objective, second.objective);
        assert_eq!(first.constraints, second.constraints);
        assert_eq!(first.variables, second.variables);
    }
}
