/// Returns true if `candidate` is newer than `current`.
///
/// This is a plain string comparison, not semver ordering: "1.10.0" sorts before
/// "1.9.0", so that pair reports no update.
pub fn is_newer(candidate: &str, current: &str) -> bool {
    candidate > current
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_newer_true() {
        assert!(is_newer("1.0.1", "1.0.0"));
        assert!(is_newer("1.1.0", "1.0.0"));
        assert!(is_newer("2.0.0", "1.9.9"));
    }

    #[test]
    fn test_is_newer_false() {
        assert!(!is_newer("1.0.0", "1.0.0"));
        assert!(!is_newer("0.9.0", "1.0.0"));
        assert!(!is_newer("", "1.0.0"));
    }

    #[test]
    fn test_is_newer_compares_lexically() {
        // "1.10.0" < "1.9.0" as strings
        assert!(!is_newer("1.10.0", "1.9.0"));
        assert!(is_newer("1.9.0", "1.10.0"));
        assert!(is_newer("1.0.0-beta", "1.0.0"));
    }
}
