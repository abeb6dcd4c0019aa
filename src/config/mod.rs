//! Command-line value parsers.

mod duration;

pub use duration::parse_duration;

/// Parse a worker count; zero is rejected.
pub fn parse_concurrency(s: &str) -> anyhow::Result<usize> {
    let n: usize = s
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid concurrency: {s}"))?;
    if n == 0 {
        anyhow::bail!("Concurrency must be at least 1");
    }
    Ok(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_concurrency() {
        assert_eq!(parse_concurrency("50").unwrap(), 50);
        assert!(parse_concurrency("0").is_err());
        assert!(parse_concurrency("ten").is_err());
        assert!(parse_concurrency("-3").is_err());
    }
}
