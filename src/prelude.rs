//! Convenience re-exports of the most commonly used types and functions.

pub use crate::batch::{
    BatchConfig, BatchSummary, simulate_all, simulate_all_parallel, solve_all,
    solve_all_parallel,
};
pub use crate::implied_volatility::{
    BlackScholes, IVError, OptionSpec, OptionType, VolatilityObjective, VolatilityResult,
    solve_iv, try_solve_iv,
};
pub use crate::records::{
    CircuitInputRecord, CircuitOutputRecord, RecordError, VolatilityInputRecord,
    VolatilityOutputRecord,
};
pub use crate::root_finding::{BrentConfig, RootEstimate, RootFindingError, find_root};
pub use crate::transient::{
    CircuitError, CircuitKind, CircuitSpec, DiodeParams, SimulationConfig, Trajectory,
    TrajectoryPackage, TrajectorySample, simulate,
};
