//! Report printing shared by the subcommands.

use serde::Serialize;

/// Pretty JSON on stdout.
pub fn json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// A heading followed by one `a - b` (or `a -> b`) line per pair.
pub fn pairs(title: &str, pairs: &[(String, String)], arrow: &str) {
    println!("{title} ({}):", pairs.len());
    for (a, b) in pairs {
        println!("  {a} {arrow} {b}");
    }
}
