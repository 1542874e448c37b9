//! # Hourbank - employee time-bank ledger
//!
//! Classifies daily attendance punches against a work schedule, accumulates
//! the differences month over month into a compensatory-hours balance, keeps
//! an append-only ledger of manual adjustments and closure postings, and gates
//! edits behind a per-month open/closed state.
//!
//! ```rust,no_run
//! use hourbank::db::db::Db;
//! use hourbank::libs::aggregator::CompensationPolicy;
//! use hourbank::libs::timebank::TimeBank;
//!
//! # fn main() -> anyhow::Result<()> {
//! let timebank = TimeBank::new(Db::open("hourbank.db")?, "hr");
//! let summary = timebank.monthly_summary(1, 2025, 3, CompensationPolicy::OffsetAgainstOvertime, false)?;
//! println!("balance: {} min", summary.final_balance_min);
//! # Ok(())
//! # }
//! ```

pub mod commands;
pub mod db;
pub mod libs;
