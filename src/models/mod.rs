//! Data models for the dashboard
//!
//! Controls, banners and per-cycle frames. Wire models for the backend live in
//! `api::backend::models`.

pub mod banner;
pub mod chart;
pub mod controls;
pub mod frame;

pub use banner::{Banner, BannerLevel};
pub use chart::PricePoint;
pub use controls::{Controls, SharedControls};
pub use frame::DashboardFrame;
