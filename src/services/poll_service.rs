use chrono::{DateTime, Utc};
use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::api::backend::Backend;
use crate::models::{Banner, Controls, DashboardFrame, SharedControls};
use crate::services::{chart_service, history_service, latest_service, render_service};

/// Time source for the poll loop
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;

    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send;
}

/// Wall clock backed by tokio's timer
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Chart output settings
#[derive(Debug, Clone)]
pub struct ChartSettings {
    pub dir: PathBuf,
    pub width: u32,
    pub height: u32,
}

/// The dashboard loop: fetch, render, sleep, repeat.
///
/// Controls are read once at the start of each cycle, so edits made while a
/// cycle is running show up on the next redraw.
pub struct Poller<B, C> {
    backend: B,
    clock: C,
    controls: SharedControls,
    chart: ChartSettings,
    /// Shown on every frame, e.g. when the reference list failed to load
    sticky_banner: Option<Banner>,
}

impl<B: Backend, C: Clock> Poller<B, C> {
    pub fn new(backend: B, clock: C, controls: SharedControls, chart: ChartSettings) -> Self {
        Self {
            backend,
            clock,
            controls,
            chart,
            sticky_banner: None,
        }
    }

    pub fn with_sticky_banner(mut self, banner: Option<Banner>) -> Self {
        self.sticky_banner = banner;
        self
    }

    /// Run forever. Only process shutdown stops it.
    pub async fn run(&self) {
        info!("Poll loop started");
        loop {
            let frame = self.tick().await;
            debug!("Cycle for {:?} finished", frame.symbol);
        }
    }

    /// One full iteration: build a frame, draw it, then sleep for the interval
    /// that was in effect when the cycle started.
    pub async fn tick(&self) -> DashboardFrame {
        let frame = self.cycle().await;
        print!("{}{}", render_service::CLEAR_SCREEN, render_service::render_frame(&frame));
        self.clock
            .sleep(Duration::from_secs(frame.refresh_interval))
            .await;
        frame
    }

    /// Fetch and assemble one frame without drawing or sleeping
    pub async fn cycle(&self) -> DashboardFrame {
        let controls: Controls = self.controls.read().await.clone();
        let mut frame = DashboardFrame::new(
            self.clock.now(),
            controls.symbol.clone(),
            controls.limit,
            controls.refresh_interval,
        );
        frame.banners.extend(self.sticky_banner.clone());

        let Some(symbol) = controls.symbol else {
            frame.banners.push(Banner::warning("No symbol selected."));
            return frame;
        };

        match latest_service::fetch_latest(&self.backend, &symbol).await {
            Ok(reading) => {
                frame.last_update = Some(reading.fetched_at);
                frame.payload = Some(reading.display_payload().clone());
            }
            Err(banner) => frame.banners.push(banner),
        }

        let (history, banner) =
            history_service::fetch_history(&self.backend, &symbol, controls.limit).await;
        frame.banners.extend(banner);
        frame.history = history;

        let points = history_service::price_points(&frame.history);
        if !points.is_empty() {
            let path = chart_service::chart_path(&self.chart.dir, &symbol);
            match chart_service::render_price_chart(
                &symbol,
                &points,
                &path,
                self.chart.width,
                self.chart.height,
            ) {
                Ok(()) => frame.chart_path = Some(path),
                Err(e) => {
                    warn!("Chart for {} failed: {}", symbol, e);
                    frame.banners.push(Banner::error(format!("Failed to draw chart: {}", e)));
                }
            }
        }

        frame
    }
}
