//! `tc-route`: checkpoint translation and layout loading.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                      |
//! |------------|---------------------------------------------------------------|
//! | [`route`]  | `RouteModel`, `Boundaries`, `SwitchSetting`                   |
//! | [`loader`] | `load_layout_csv`, `load_layout_reader`                       |
//! | [`error`]  | `RouteError`, `RouteResult<T>`                                |
//!
//! # Roles (summary)
//!
//! For a loop `[c0..c9]` with shared run `[c4, c5, c6]`:
//!
//! ```text
//! forward : announce c1 → entry c3 → [c4 c5 c6] → exit c7 → lap end c9
//! reverse : announce c9 → entry c7 → [c6 c5 c4] → exit c3 → lap end c9
//! ```

pub mod error;
pub mod loader;
pub mod route;

#[cfg(test)]
mod tests;

pub use error::{RouteError, RouteResult};
pub use loader::{load_layout_csv, load_layout_reader};
pub use route::{Boundaries, RouteModel, SwitchSetting};
