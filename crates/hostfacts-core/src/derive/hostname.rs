/// Suffix appended to host names that carry no domain part.
pub const LOCAL_SUFFIX: &str = ".local";

/// Append `.local` to a bare host name; leave anything containing a `.`
/// untouched.
pub fn normalize_hostname(raw: &str) -> String {
    if raw.contains('.') {
        raw.to_string()
    } else {
        format!("{raw}{LOCAL_SUFFIX}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_name_gets_local_suffix() {
        assert_eq!(normalize_hostname("mymac"), "mymac.local");
    }

    #[test]
    fn dotted_name_is_unchanged() {
        assert_eq!(normalize_hostname("mymac.example.com"), "mymac.example.com");
        assert_eq!(normalize_hostname("mymac.local"), "mymac.local");
        assert_eq!(normalize_hostname("trailing."), "trailing.");
    }

    #[test]
    fn empty_name_is_still_suffixed() {
        assert_eq!(normalize_hostname(""), ".local");
    }
}
