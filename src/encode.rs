//! OAuth percent-encoding.

/// Percent-encodes a string per OAuth 1.0's rules (RFC 3986 variant).
///
/// Unreserved characters (A-Z, a-z, 0-9, '-', '.', '_', '~') are NOT encoded.
/// All other bytes are encoded as `%XX` (uppercase hex). Spaces become `%20`
/// (NOT `+`), and `!`, `*`, `'`, `(`, `)` are escaped even though default
/// URL encoders leave them alone. Non-ASCII input is encoded byte-wise as
/// UTF-8.
pub fn percent_encode(s: &str) -> String {
    let mut encoded = String::with_capacity(s.len() * 2);
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                encoded.push(byte as char);
            }
            _ => {
                encoded.push_str(&format!("%{:02X}", byte));
            }
        }
    }
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreserved_chars_pass_through() {
        assert_eq!(percent_encode("abcXYZ019"), "abcXYZ019");
        assert_eq!(percent_encode("-._~"), "-._~");
    }

    #[test]
    fn spaces() {
        assert_eq!(percent_encode("hello world"), "hello%20world");
    }

    #[test]
    fn reserved_chars() {
        assert_eq!(percent_encode("/"), "%2F");
        assert_eq!(percent_encode("="), "%3D");
        assert_eq!(percent_encode("&"), "%26");
        assert_eq!(percent_encode("+"), "%2B");
    }

    #[test]
    fn oauth_extra_escapes() {
        // These five are the ones default URL encoders tend to skip.
        assert_eq!(percent_encode("!"), "%21");
        assert_eq!(percent_encode("*"), "%2A");
        assert_eq!(percent_encode("'"), "%27");
        assert_eq!(percent_encode("("), "%28");
        assert_eq!(percent_encode(")"), "%29");
    }

    #[test]
    fn multibyte_utf8() {
        assert_eq!(percent_encode("中文"), "%E4%B8%AD%E6%96%87");
    }

    #[test]
    fn empty_input() {
        assert_eq!(percent_encode(""), "");
    }

    #[test]
    fn round_trip() {
        // Standard percent-decoding must recover the original exactly.
        fn decode(s: &str) -> String {
            let bytes = s.as_bytes();
            let mut out = Vec::new();
            let mut i = 0;
            while i < bytes.len() {
                if bytes[i] == b'%' {
                    let hi = (bytes[i + 1] as char).to_digit(16).unwrap();
                    let lo = (bytes[i + 2] as char).to_digit(16).unwrap();
                    out.push((hi * 16 + lo) as u8);
                    i += 3;
                } else {
                    out.push(bytes[i]);
                    i += 1;
                }
            }
            String::from_utf8(out).unwrap()
        }

        for input in [
            "plain",
            "a b+c!d*\\e(f)g+h",
            "bananas are <Awe+some!>",
            "中文 mixed ascii ~tilde~",
            "'quotes' & (parens)",
        ] {
            assert_eq!(decode(&percent_encode(input)), input);
        }
    }
}
