pub fn execute() -> Result<String, String> {
    Ok([
        "📖 Dashboard Controls",
        "  $symbol <SYMBOL>     ($s)     Select a symbol from the reference list",
        "  $symbols [page] [filter] ($list) Browse the reference list",
        "  $limit <50-1000|+|->  ($l)     History points to fetch (step 50)",
        "  $refresh <30-300|+|-> ($r)     Seconds between refreshes (step 10)",
        "  $status                        Show the current selection",
        "  $help                ($h)     Show this help message",
        "Changes take effect on the next refresh. Ctrl-C quits.",
    ]
    .join("\n"))
}
