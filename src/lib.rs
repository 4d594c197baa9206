//! momentum - Productivity Tracker State Store
//!
//! This library is the local application state store for a single-user
//! productivity tracker: task lists, pomodoro focus sessions, weekly and
//! yearly goals, weekly reflections, and settings. It owns the in-memory
//! state, applies pure reducer transitions, persists every committed change
//! to on-device JSON storage, and exposes read-only derived views for a UI
//! layer to render.
//!
//! # Core Concepts
//!
//! - **Records**: Six collections (tasks, sessions, weekly goals, weekly
//!   reflections, year goals, settings), each keyed by an opaque id
//! - **Date buckets**: Canonical `YYYY-MM-DD` keys partition day-scoped
//!   records; Monday keys partition week-scoped ones
//! - **Reducer**: All mutation flows through `(state, action) -> state`
//! - **Best-effort persistence**: Every commit schedules a full-snapshot
//!   save; failures are logged, never surfaced, and the next save reconciles
//!
//! # Module Organization
//!
//! - `dates`: Day-bucket keys, `today`, and Monday-of-week resolution
//! - `error`: Error types and result aliases
//! - `id`: Opaque record id generation
//! - `model`: Record schema and input/patch types
//! - `query`: Read-only derived views over a state snapshot
//! - `state`: The state snapshot, actions, and the reducer
//! - `storage`: JSON persistence gateway and key layout
//! - `store`: The state container driving reducer + persistence

pub mod dates;
pub mod error;
pub mod id;
pub mod model;
pub mod query;
pub mod state;
pub mod storage;
pub mod store;

pub use error::{Error, Result};
