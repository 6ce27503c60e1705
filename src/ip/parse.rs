use std::sync::LazyLock;

use regex::Regex;

static IPV4_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(?:25[0-5]|2[0-4][0-9]|1[0-9][0-9]|[1-9]?[0-9])\.){3}(?:25[0-5]|2[0-4][0-9]|1[0-9][0-9]|[1-9]?[0-9])$")
        .expect("IPv4 pattern is valid")
});

/// Returns true for a dotted quad whose four octets are each in 0-255.
pub fn is_valid_ipv4(candidate: &str) -> bool {
    IPV4_RE.is_match(candidate)
}

/// Finds the first line of the form `label=value` and returns `value`.
///
/// The label is matched case-sensitively against the start of the line.
pub fn extract_labeled_value<'a>(text: &'a str, label: &str) -> Option<&'a str> {
    text.lines().find_map(|line| {
        line.trim_end_matches('\r')
            .strip_prefix(label)
            .and_then(|rest| rest.strip_prefix('='))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_valid_dotted_quads() {
        let cases = [
            "0.0.0.0",
            "255.255.255.255",
            "203.0.113.7",
            "198.51.100.1",
            "10.0.0.1",
            "249.199.99.9",
        ];

        for case in cases {
            assert!(is_valid_ipv4(case), "Rejected valid address: {}", case);
        }
    }

    #[test]
    fn test_rejects_out_of_range_and_non_numeric() {
        let cases = [
            "256.1.1.1",
            "1.1.1.300",
            "999.0.0.1",
            "1.1.1",
            "1.1.1.1.1",
            "a.b.c.d",
            "1.1.1.x",
            "01.1.1.1",
            "",
            "1..1.1",
            " 1.1.1.1",
            "2001:db8::1",
        ];

        for case in cases {
            assert!(!is_valid_ipv4(case), "Accepted invalid address: {:?}", case);
        }
    }

    #[test]
    fn test_extracts_value_from_trace_body() {
        let body = "fl=123f\nh=cloudflare.com\nip=203.0.113.7\nts=1700000000.1\nother=text";
        assert_eq!(extract_labeled_value(body, "ip"), Some("203.0.113.7"));
    }

    #[test]
    fn test_extract_handles_crlf_line_endings() {
        let body = "h=cloudflare.com\r\nip=203.0.113.7\r\nloc=NL\r\n";
        assert_eq!(extract_labeled_value(body, "ip"), Some("203.0.113.7"));
    }

    #[test]
    fn test_extract_is_case_sensitive_and_anchored() {
        assert_eq!(extract_labeled_value("IP=203.0.113.7", "ip"), None);
        assert_eq!(extract_labeled_value("sip=203.0.113.7", "ip"), None);
        assert_eq!(extract_labeled_value("ipv=203.0.113.7", "ip"), None);
        assert_eq!(extract_labeled_value("", "ip"), None);
    }
}
