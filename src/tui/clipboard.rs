//! Copy text to the system clipboard through the terminal (OSC 52).

use std::io::{self, Write};

use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Escape sequence asking the terminal to put `text` on the clipboard.
pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text))
}

pub fn copy_to_clipboard(text: &str) -> io::Result<()> {
    let mut out = io::stdout();
    out.write_all(osc52_sequence(text).as_bytes())?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_wraps_base64_payload() {
        assert_eq!(osc52_sequence("cat"), "\x1b]52;c;Y2F0\x07");
    }

    #[test]
    fn handles_multibyte_text() {
        let seq = osc52_sequence("猫, masterpiece");
        let payload = seq
            .strip_prefix("\x1b]52;c;")
            .and_then(|s| s.strip_suffix('\x07'))
            .unwrap();
        let decoded = STANDARD.decode(payload).unwrap();
        assert_eq!(String::from_utf8(decoded).unwrap(), "猫, masterpiece");
    }
}
