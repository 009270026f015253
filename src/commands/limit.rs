use tracing::info;

use super::{parse_adjustment, Adjustment, ControlContext};

pub async fn execute(ctx: &ControlContext, args: &[&str]) -> Result<String, String> {
    let adjustment = parse_adjustment(args)
        .ok_or("❌ Usage: `$limit <50-1000>`, `$limit +` or `$limit -`")?;

    let limit = {
        let mut controls = ctx.controls.write().await;
        match adjustment {
            Adjustment::Set(value) => {
                let value = u32::try_from(value)
                    .map_err(|_| "❌ History limit must be between 50 and 1000".to_string())?;
                controls.set_limit(value)?;
            }
            Adjustment::Step(up) => controls.step_limit(up),
        }
        controls.limit
    };

    info!("History limit set to {}", limit);
    Ok(format!("✅ History limit is now {} (applies on next refresh)", limit))
}
