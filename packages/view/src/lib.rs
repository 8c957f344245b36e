#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! View resolution and reactive filter-group control.
//!
//! [`resolver`] turns a filter state into the titled series each chart
//! needs, as a pure function of the immutable data store. [`controller`]
//! is the thin adapter that maps selector events onto resolver calls for
//! the group that watches them.

pub mod controller;
pub mod resolver;
pub mod titles;

pub use controller::DashboardController;
