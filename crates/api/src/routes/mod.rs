//! Route handlers grouped by metric page.

pub(crate) mod blocks;
pub(crate) mod fees;
pub(crate) mod overview;
pub(crate) mod tvl;
pub(crate) mod users;
