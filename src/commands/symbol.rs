use tracing::info;

use super::ControlContext;

pub async fn execute(ctx: &ControlContext, args: &[&str]) -> Result<String, String> {
    if args.is_empty() {
        return Err("❌ Usage: `$symbol <SYMBOL>`. Use `$symbols` to browse the list".to_string());
    }

    let input = args.join(" ");
    let symbol = ctx
        .symbols
        .resolve(&input)
        .ok_or_else(|| format!("❌ '{}' is not in the reference list", input))?
        .to_string();

    ctx.controls.write().await.symbol = Some(symbol.clone());
    info!("Selected symbol {}", symbol);

    Ok(format!("✅ Switched to {} (applies on next refresh)", symbol))
}
