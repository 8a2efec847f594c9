//! # Airslot Solver
//!
//! 外部求解器驅動與求解結果解析

pub mod driver;
pub mod mapper;
pub mod solve;

// Re-export 主要類型
pub use driver::{batch_script, SolverArtifacts, SolverDriver};
pub use mapper::{Selection, SolutionMapper, SLOT_PATTERN};
pub use solve::{SlotSolver, SolveOutcome, SolveRequest};
