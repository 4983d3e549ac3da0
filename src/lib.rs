pub mod aggregates;
pub mod allocation;
pub mod config;
pub mod decomposition;
pub mod drag;
pub mod history;
pub mod metadata;
pub mod planner;
pub mod report;
pub mod role;
pub mod shortcuts;
pub mod timeline;
pub mod view;

pub use aggregates::{
    CostSummary, GroupRollup, OverAllocationWarning, RoleCost, cost_summary, format_cost,
    format_currency, group_rollups, over_allocation_warnings,
};
pub use allocation::{Allocation, AllocationId, GroupId};
pub use config::{ConfigError, PlannerConfig, load_config_from_json};
pub use decomposition::decompose;
pub use drag::DragSession;
pub use history::History;
pub use metadata::PlanMetadata;
pub use planner::{Change, ChangeKind, Planner, SubscriptionId};
pub use role::{Role, RoleParseError};
pub use shortcuts::{HistoryShortcut, KeyChord};
pub use timeline::{BarGeometry, Timeline};
pub use view::BoardView;
