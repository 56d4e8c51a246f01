//! Value parsers for pair and edge arguments.

/// `A,B` into `(A, B)`.
pub fn parse_pair(s: &str) -> Result<(String, String), String> {
    split_two(s, ",").ok_or_else(|| format!("expected A,B but got '{s}'"))
}

/// `A->B` into `(A, B)`.
pub fn parse_edge(s: &str) -> Result<(String, String), String> {
    split_two(s, "->").ok_or_else(|| format!("expected A->B but got '{s}'"))
}

fn split_two(s: &str, sep: &str) -> Option<(String, String)> {
    let (a, b) = s.split_once(sep)?;
    let (a, b) = (a.trim(), b.trim());
    if a.is_empty() || b.is_empty() || b.contains(sep) {
        return None;
    }
    Some((a.to_string(), b.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairs_and_edges() {
        assert_eq!(parse_pair("x, y").unwrap(), ("x".to_string(), "y".to_string()));
        assert_eq!(parse_edge("a->b").unwrap(), ("a".to_string(), "b".to_string()));
        assert_eq!(parse_edge(" a -> b ").unwrap(), ("a".to_string(), "b".to_string()));
    }

    #[test]
    fn malformed() {
        assert!(parse_pair("x").is_err());
        assert!(parse_pair("x,").is_err());
        assert!(parse_pair("x,y,z").is_err());
        assert!(parse_edge("a-b").is_err());
        assert!(parse_edge("a->b->c").is_err());
    }
}
