//! # Airslot Model
//!
//! 決策變數展開、目標函數與約束建立、LP 格式輸出

pub mod builder;
pub mod emit;
pub mod model;
pub mod scoring;
pub mod variable;

// Re-export 主要類型
pub use builder::ModelBuilder;
pub use emit::{EmitOptions, LpWriter};
pub use model::{Constraint, ConstraintKind, Model, Sense, Term};
pub use scoring::{Contribution, SlotScorer, StandardScorer};
pub use variable::{enumerate, DecisionVariable, VarId, VariableSpace, VAR_PREFIX};
