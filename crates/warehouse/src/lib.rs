//! Read-only ClickHouse access for the axelarscope API: filter state,
//! granularity mapping, and the analytical queries behind every metric page.

mod filters;
mod models;
mod reader;

pub use filters::{DateRange, Granularity};
pub use models::{
    ActiveDaysRow, BlockStatsRow, BlocksOverTimeRow, BlockTxCountRow, FeeStatsRow,
    FeesOverTimeRow, GasStatsRow, TopBlockRow, TxCountRow, UserGrowthCounts, UsersOverTimeRow,
};
pub use reader::WarehouseReader;
