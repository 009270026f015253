use super::ControlContext;

pub async fn execute(ctx: &ControlContext) -> Result<String, String> {
    let controls = ctx.controls.read().await.clone();
    Ok(format!(
        "📌 Symbol: {} | History limit: {} | Auto-refresh: {}s | {} symbols available",
        controls.symbol.as_deref().unwrap_or("(none)"),
        controls.limit,
        controls.refresh_interval,
        ctx.symbols.len()
    ))
}
