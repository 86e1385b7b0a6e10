//! Create Collection Point UI Module
//!
//! MVVM split:
//! - state.rs: page state record with pure transitions
//! - model.rs: API functions (fetch catalog, create point)
//! - view_model.rs: signals, request dispatch
//! - view.rs, map.rs, items_grid.rs: Leptos components

mod items_grid;
mod map;
mod model;
pub mod state;
mod view;
mod view_model;

pub use view::CreatePointPage;
pub use view_model::CreatePointVm;
