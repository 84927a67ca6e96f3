//! Payroll estimation engine for hourly shift work.
//!
//! This crate estimates gross and net pay for a period of shifts: it resolves
//! the hourly rate, applies the break policy, splits worked time into regular
//! and allowance hours, sums them across weeks and runs the deduction chain.
//! It also derives the 13-period payroll calendar (current period and pending
//! payout) and serves both through a small HTTP API.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
