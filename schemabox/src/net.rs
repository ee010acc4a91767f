//! Network name helpers.
//!
//! Pure predicates over host strings. These are not wired to any validator;
//! the `Ipv4` and `Hostname` formats are pattern based.

/// Whether `s` is a dotted-quad IPv4 address: exactly four decimal groups,
/// each 0-255, with nothing left over.
pub fn is_ipv4(s: &str) -> bool {
    let mut groups = 0;
    for part in s.split('.') {
        if groups == 4 {
            return false;
        }
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return false;
        }
        match part.parse::<u32>() {
            Ok(n) if n <= 255 => groups += 1,
            _ => return false,
        }
    }
    groups == 4
}

/// Whether `s` is a domain name per RFC 1035 labels.
///
/// Labels are 1-63 bytes of letters, digits, `_` and `-`; a hyphen may not
/// touch a dot or end the name; the whole name is 1-255 bytes and must
/// contain at least one letter. A single trailing dot is allowed.
pub fn is_domain_name(s: &str) -> bool {
    if s.is_empty() || s.len() > 255 {
        return false;
    }

    let mut last = b'.';
    let mut has_letter = false;
    let mut part_len = 0;
    for c in s.bytes() {
        match c {
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => {
                has_letter = true;
                part_len += 1;
            }
            b'0'..=b'9' => part_len += 1,
            b'-' => {
                if last == b'.' {
                    return false;
                }
                part_len += 1;
            }
            b'.' => {
                if last == b'.' || last == b'-' || part_len == 0 || part_len > 63 {
                    return false;
                }
                part_len = 0;
            }
            _ => return false,
        }
        last = c;
    }
    if last == b'-' || part_len > 63 {
        return false;
    }

    has_letter
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_ipv4() {
        assert!(is_ipv4("192.168.0.1"));
        assert!(is_ipv4("0.0.0.0"));
        assert!(is_ipv4("255.255.255.255"));
        assert!(!is_ipv4("256.1.1.1"));
        assert!(!is_ipv4("1.2.3"));
        assert!(!is_ipv4("1.2.3.4.5"));
        assert!(!is_ipv4("1.2.3.4."));
        assert!(!is_ipv4("1..2.3"));
        assert!(!is_ipv4("+1.2.3.4"));
        assert!(!is_ipv4(""));
    }

    #[test]
    fn test_domain_name() {
        assert!(is_domain_name("a-b.example"));
        assert!(is_domain_name("example.com."));
        assert!(is_domain_name("_srv.example"));
        assert!(!is_domain_name("-a.example"));
        assert!(!is_domain_name("a-.example"));
        assert!(!is_domain_name("example-"));
        assert!(!is_domain_name("."));
        assert!(!is_domain_name("a..b"));
        assert!(!is_domain_name("123.456"));
        assert!(!is_domain_name(""));
        assert!(!is_domain_name("ex ample.com"));
    }

    #[test]
    fn test_domain_label_length() {
        let ok = format!("{}.com", "a".repeat(63));
        let too_long = format!("{}.com", "a".repeat(64));
        assert!(is_domain_name(&ok));
        assert!(!is_domain_name(&too_long));
        assert!(!is_domain_name(&"a".repeat(64)));
    }

    proptest! {
        #[test]
        fn prop_formatted_quads_are_ipv4(a: u8, b: u8, c: u8, d: u8) {
            let quad = format!("{}.{}.{}.{}", a, b, c, d);
            prop_assert!(is_ipv4(&quad));
        }

        #[test]
        fn prop_domain_rejects_long_names(s in "[a-z]{256,300}") {
            prop_assert!(!is_domain_name(&s));
        }
    }
}
