//! WinAnsi encoding
//!
//! The standard fonts are written with `/WinAnsiEncoding`, a single-byte code
//! page. Text is encoded here once so that measuring and drawing see the same
//! bytes. Characters the code page cannot represent become `?`; whitespace
//! becomes a plain space.

/// Byte drawn for characters WinAnsi cannot represent
pub const REPLACEMENT_BYTE: u8 = b'?';

/// Encode a single character as a WinAnsi byte, if representable
pub fn win_ansi_byte(ch: char) -> Option<u8> {
    let code = ch as u32;
    match code {
        0x20..=0x7E | 0xA0..=0xFF => Some(code as u8),
        _ => match ch {
            '\u{20AC}' => Some(0x80), // Euro
            '\u{201A}' => Some(0x82), // quotesinglbase
            '\u{0192}' => Some(0x83), // florin
            '\u{201E}' => Some(0x84), // quotedblbase
            '\u{2026}' => Some(0x85), // ellipsis
            '\u{2020}' => Some(0x86), // dagger
            '\u{2021}' => Some(0x87), // daggerdbl
            '\u{02C6}' => Some(0x88), // circumflex
            '\u{2030}' => Some(0x89), // perthousand
            '\u{0160}' => Some(0x8A), // Scaron
            '\u{2039}' => Some(0x8B), // guilsinglleft
            '\u{0152}' => Some(0x8C), // OE
            '\u{017D}' => Some(0x8E), // Zcaron
            '\u{2018}' => Some(0x91), // quoteleft
            '\u{2019}' => Some(0x92), // quoteright
            '\u{201C}' => Some(0x93), // quotedblleft
            '\u{201D}' => Some(0x94), // quotedblright
            '\u{2022}' => Some(0x95), // bullet
            '\u{2013}' => Some(0x96), // endash
            '\u{2014}' => Some(0x97), // emdash
            '\u{02DC}' => Some(0x98), // tilde
            '\u{2122}' => Some(0x99), // trademark
            '\u{0161}' => Some(0x9A), // scaron
            '\u{203A}' => Some(0x9B), // guilsinglright
            '\u{0153}' => Some(0x9C), // oe
            '\u{017E}' => Some(0x9E), // zcaron
            '\u{0178}' => Some(0x9F), // Ydieresis
            _ => None,
        },
    }
}

/// Encode one character, substituting unrepresentable characters
pub fn encode_char(ch: char) -> u8 {
    match win_ansi_byte(ch) {
        Some(byte) => byte,
        None if ch.is_whitespace() => b' ',
        None => REPLACEMENT_BYTE,
    }
}

/// Encode text as WinAnsi bytes (one byte per `char`)
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars().map(encode_char).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_passthrough() {
        assert_eq!(encode_win_ansi("Hello, PDF!"), b"Hello, PDF!".to_vec());
    }

    #[test]
    fn test_bullet_and_quotes() {
        assert_eq!(encode_win_ansi("\u{2022} "), vec![0x95, b' ']);
        assert_eq!(encode_win_ansi("\u{201C}x\u{201D}"), vec![0x93, b'x', 0x94]);
    }

    #[test]
    fn test_latin1() {
        assert_eq!(encode_win_ansi("caf\u{e9}"), vec![b'c', b'a', b'f', 0xE9]);
    }

    #[test]
    fn test_unrepresentable() {
        assert_eq!(encode_win_ansi("\u{4E2D}"), vec![REPLACEMENT_BYTE]);
        assert_eq!(encode_win_ansi("\u{1F600}"), vec![REPLACEMENT_BYTE]);
        assert_eq!(encode_win_ansi("a\tb"), b"a b".to_vec());
    }
}
