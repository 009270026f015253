pub mod chart_service;
pub mod history_service;
pub mod latest_service;
pub mod poll_service;
pub mod render_service;
pub mod symbol_service;
