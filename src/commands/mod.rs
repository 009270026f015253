pub mod help;
pub mod limit;
pub mod refresh;
pub mod status;
pub mod symbol;
pub mod symbols;

use colored::Colorize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{debug, warn};

use crate::models::SharedControls;
use crate::services::symbol_service::SymbolList;

/// What a control command can see and change
pub struct ControlContext {
    pub controls: SharedControls,
    pub symbols: SymbolList,
}

/// Argument of `$limit` / `$refresh`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjustment {
    Set(u64),
    /// One step up (`true`) or down
    Step(bool),
}

pub fn parse_adjustment(args: &[&str]) -> Option<Adjustment> {
    match args {
        ["+"] => Some(Adjustment::Step(true)),
        ["-"] => Some(Adjustment::Step(false)),
        [value] => value.parse().ok().map(Adjustment::Set),
        _ => None,
    }
}

/// Run one control line. Returns `None` for blank lines and unknown input.
pub async fn handle_line(ctx: &ControlContext, line: &str) -> Option<Result<String, String>> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let (&command, args) = parts.split_first()?;

    let result = match command.to_lowercase().as_str() {
        "$symbol" | "$s" => symbol::execute(ctx, args).await,
        "$symbols" | "$list" => symbols::execute(ctx, args),
        "$limit" | "$l" => limit::execute(ctx, args).await,
        "$refresh" | "$r" => refresh::execute(ctx, args).await,
        "$status" => status::execute(ctx).await,
        "$help" | "$h" => help::execute(),
        _ => {
            debug!("Ignoring unknown control input: {}", line);
            return Some(Err(format!("❌ Unknown command '{}'. Type $help for controls", command)));
        }
    };

    Some(result)
}

/// Read control lines until the input closes
pub async fn read_controls<R>(ctx: ControlContext, input: R)
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => match handle_line(&ctx, &line).await {
                Some(Ok(reply)) => println!("{}", reply.green()),
                Some(Err(e)) => println!("{}", e.red()),
                None => {}
            },
            Ok(None) => {
                debug!("Control input closed");
                break;
            }
            Err(e) => {
                warn!("Failed to read control input: {}", e);
                break;
            }
        }
    }
}

/// Spawn the stdin control reader
pub fn spawn_control_reader(ctx: ControlContext) -> tokio::task::JoinHandle<()> {
    tokio::spawn(read_controls(ctx, BufReader::new(tokio::io::stdin())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Controls;

    fn context() -> ControlContext {
        ControlContext {
            controls: Controls::new(Some("NIFTY".to_string()), 200, 60).shared(),
            symbols: SymbolList::new(["NIFTY", "BANKNIFTY", "RELIANCE", "TCS"]),
        }
    }

    #[test]
    fn test_parse_adjustment() {
        assert_eq!(parse_adjustment(&["+"]), Some(Adjustment::Step(true)));
        assert_eq!(parse_adjustment(&["-"]), Some(Adjustment::Step(false)));
        assert_eq!(parse_adjustment(&["250"]), Some(Adjustment::Set(250)));
        assert_eq!(parse_adjustment(&["-5"]), None);
        assert_eq!(parse_adjustment(&[]), None);
        assert_eq!(parse_adjustment(&["1", "2"]), None);
    }

    #[tokio::test]
    async fn test_symbol_outside_list_is_never_selected() {
        let ctx = context();
        let result = handle_line(&ctx, "$symbol FINNIFTY").await.unwrap();
        assert!(result.is_err());
        assert_eq!(ctx.controls.read().await.symbol.as_deref(), Some("NIFTY"));

        let result = handle_line(&ctx, "$s banknifty").await.unwrap();
        assert!(result.is_ok());
        assert_eq!(ctx.controls.read().await.symbol.as_deref(), Some("BANKNIFTY"));
    }

    #[tokio::test]
    async fn test_limit_bounds_and_steps() {
        let ctx = context();
        assert!(handle_line(&ctx, "$limit 20").await.unwrap().is_err());
        assert!(handle_line(&ctx, "$limit 5000").await.unwrap().is_err());
        assert!(handle_line(&ctx, "$limit 99999999999").await.unwrap().is_err());
        assert_eq!(ctx.controls.read().await.limit, 200);

        handle_line(&ctx, "$limit 400").await.unwrap().unwrap();
        handle_line(&ctx, "$l +").await.unwrap().unwrap();
        assert_eq!(ctx.controls.read().await.limit, 450);
    }

    #[tokio::test]
    async fn test_refresh_bounds_and_steps() {
        let ctx = context();
        assert!(handle_line(&ctx, "$refresh 10").await.unwrap().is_err());
        assert_eq!(ctx.controls.read().await.refresh_interval, 60);

        handle_line(&ctx, "$refresh 300").await.unwrap().unwrap();
        handle_line(&ctx, "$r +").await.unwrap().unwrap();
        assert_eq!(ctx.controls.read().await.refresh_interval, 300);
        handle_line(&ctx, "$r -").await.unwrap().unwrap();
        assert_eq!(ctx.controls.read().await.refresh_interval, 290);
    }

    #[tokio::test]
    async fn test_symbols_listing_and_filter() {
        let ctx = context();
        let reply = handle_line(&ctx, "$symbols").await.unwrap().unwrap();
        assert!(reply.contains("page 1/1, 4 total"));
        assert!(reply.contains("RELIANCE"));

        let reply = handle_line(&ctx, "$list nifty").await.unwrap().unwrap();
        assert!(reply.contains("2 total"));
        assert!(!reply.contains("TCS"));

        assert!(handle_line(&ctx, "$symbols 2").await.unwrap().is_err());
        assert!(handle_line(&ctx, "$symbols XYZ").await.unwrap().is_err());
    }

    #[tokio::test]
    async fn test_blank_and_unknown_lines() {
        let ctx = context();
        assert!(handle_line(&ctx, "   ").await.is_none());
        assert!(handle_line(&ctx, "$launch").await.unwrap().is_err());
        let status = handle_line(&ctx, "$status").await.unwrap().unwrap();
        assert!(status.contains("Symbol: NIFTY"));
    }

    #[tokio::test]
    async fn test_reader_applies_each_line() {
        let ctx = context();
        let controls = ctx.controls.clone();
        let input: &[u8] = b"$symbol TCS\n$limit 1000\nnonsense\n$refresh 45\n";

        read_controls(ctx, BufReader::new(input)).await;

        let controls = controls.read().await;
        assert_eq!(controls.symbol.as_deref(), Some("TCS"));
        assert_eq!(controls.limit, 1000);
        assert_eq!(controls.refresh_interval, 45);
    }
}
