//! Application state for the electricity map UI.
//!
//! This crate provides:
//! - `application`: the UI-navigation and display-mode reducer
//! - `action`: the action types consumed from the dispatch channel
//! - `data`: the sibling grid-data reducer
//! - `root`: the combined root state and a serializing `Store`
//! - `environment`: the probe the initial state is built from
//! - `analytics`: tracking dimensions read by analytics sinks
//!
//! Nothing in here performs I/O. Every transition takes the previous state
//! by reference and returns a new `Rc`; an unchanged state is returned as
//! the very same `Rc` so consumers can skip work with `Rc::ptr_eq`.

pub mod action;
pub mod analytics;
pub mod application;
pub mod data;
pub mod environment;
pub mod error;
pub mod root;

pub use action::{Action, RawAction};
pub use application::{ApplicationState, ElectricityMixMode, FieldUpdate, Page};
pub use data::{DataState, GridSnapshot, ZoneData};
pub use environment::{EnvironmentProbe, InjectedGlobals, StaticProbe};
pub use error::{Result, StateError};
pub use root::{RootState, Store};

/// Identifier of a grid zone, e.g. `"FR"` or `"US-CA"`.
pub type ZoneId = String;

/// Position along the time slider of the selected zone.
pub type TimeIndex = usize;
