//! Engine, configuration and presentation modules.
//!
//! Engine core, leaf first: [`time_units`], [`classifier`], [`aggregator`],
//! [`ledger`], [`period`]; [`timebank`] is the boundary used by commands.

pub mod aggregator;
pub mod classifier;
pub mod config;
pub mod data_storage;
pub mod error;
pub mod export;
pub mod formatter;
pub mod import;
pub mod ledger;
pub mod messages;
pub mod period;
pub mod report;
pub mod time_units;
pub mod timebank;
pub mod view;
