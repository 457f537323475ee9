//! Package identity shown by `epr version`.

/// Short program title.
pub const TITLE: &str = "epr";

/// Package version, taken from the crate manifest.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Title and version on two lines.
pub fn info() -> String {
    format!("{TITLE}\n{VERSION}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_is_epr() {
        assert_eq!(TITLE, "epr");
    }

    #[test]
    fn version_is_dotted_triple() {
        let parts: Vec<&str> = VERSION.split('.').collect();
        assert!(parts.len() >= 3, "got: {VERSION}");
    }

    #[test]
    fn info_is_title_then_version() {
        let info = info();
        let mut lines = info.lines();
        assert_eq!(lines.next(), Some("epr"));
        assert_eq!(lines.next(), Some(VERSION));
        assert_eq!(lines.next(), None);
    }
}
