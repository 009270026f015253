use super::ControlContext;
use crate::utils::Page;

const SYMBOLS_PER_PAGE: usize = 20;

/// `$symbols [page] [filter]`, arguments in any order
pub fn execute(ctx: &ControlContext, args: &[&str]) -> Result<String, String> {
    let mut page_num = 1;
    let mut filter: Option<&str> = None;
    for arg in args {
        match arg.parse::<usize>() {
            Ok(num) => page_num = num,
            Err(_) => filter = Some(*arg),
        }
    }

    let entries = match filter {
        Some(f) => ctx.symbols.filtered(f),
        None => ctx.symbols.as_slice().to_vec(),
    };
    if entries.is_empty() {
        return Err(match filter {
            Some(f) => format!("❌ No symbols match '{}'", f),
            None => "❌ The reference list is empty".to_string(),
        });
    }

    let pages = Page::new(&entries, SYMBOLS_PER_PAGE);
    let page = pages.page(page_num)?;

    Ok(format!(
        "📜 Symbols (page {}/{}, {} total)\n{}",
        page_num,
        pages.total_pages(),
        entries.len(),
        page.join("  ")
    ))
}
