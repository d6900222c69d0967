pub mod action;
pub mod api;
pub mod catalog;
pub mod config;
pub mod dex;
pub mod effect;
pub mod error;
pub mod logging;
pub mod model;
pub mod normalize;
pub mod quiz;
pub mod reducer;
pub mod state;
pub mod suggest;
#[cfg(any(test, feature = "test-utils"))]
pub mod testing;
pub mod transport;
