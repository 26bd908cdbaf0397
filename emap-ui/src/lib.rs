//! Shared Dioxus components and browser bindings for the electricity map UI.
//!
//! This crate provides:
//! - `browser`: `EnvironmentProbe` backed by `window`, `navigator` and cookies
//! - `state`: `AppStore`, the root state store provided via Dioxus context
//! - `components`: RSX components that read the store and dispatch actions

pub mod browser;
pub mod components;
pub mod state;
