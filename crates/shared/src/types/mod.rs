//! Common types used across the workspace.

pub mod id;
pub mod money;
pub mod month;

pub use id::*;
pub use money::{
    MONEY_ROUNDING, MONEY_SCALE, MONEY_UNIT, non_negative, percent_of, round_money, safe_div,
};
pub use month::CalendarMonth;
