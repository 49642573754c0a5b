//! Account services backed by Postgres.
//!
//! ARCHITECTURE
//! ============
//! Service modules own persistence concerns (accounts, sessions, point
//! balances) so route handlers stay focused on protocol translation and
//! auth plumbing. Campus-wide records live in memory under `crate::campus`.

pub mod account;
pub mod profile;
pub mod session;
