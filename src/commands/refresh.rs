use tracing::info;

use super::{parse_adjustment, Adjustment, ControlContext};

pub async fn execute(ctx: &ControlContext, args: &[&str]) -> Result<String, String> {
    let adjustment = parse_adjustment(args)
        .ok_or("❌ Usage: `$refresh <30-300>`, `$refresh +` or `$refresh -`")?;

    let interval = {
        let mut controls = ctx.controls.write().await;
        match adjustment {
            Adjustment::Set(value) => controls.set_refresh_interval(value)?,
            Adjustment::Step(up) => controls.step_refresh_interval(up),
        }
        controls.refresh_interval
    };

    info!("Refresh interval set to {}s", interval);
    Ok(format!("✅ Auto-refresh every {} seconds (applies after the current wait)", interval))
}
