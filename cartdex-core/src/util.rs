/// Return `buf[start..end]`, clamped to the bytes actually present.
///
/// Header fields of a truncated file come back short (or empty) instead
/// of panicking, so callers can substitute per-field defaults.
pub fn field(buf: &[u8], start: usize, end: usize) -> &[u8] {
    let end = end.min(buf.len());
    if start >= end { &[] } else { &buf[start..end] }
}

/// Read printable ASCII from a byte slice, dropping everything else.
///
/// Used for game codes and maker codes, which are plain ASCII.
pub fn read_ascii(buf: &[u8]) -> String {
    buf.iter()
        .filter(|&&b| (0x20..0x7F).contains(&b))
        .map(|&b| b as char)
        .collect()
}

/// Decode a NUL-terminated Latin-1 string (every byte maps to U+00XX).
pub fn read_latin1(buf: &[u8]) -> String {
    buf.iter()
        .take_while(|&&b| b != 0)
        .map(|&b| b as char)
        .collect()
}

/// Decode a NUL-terminated UTF-16LE string. Unpaired surrogates become
/// U+FFFD; a trailing odd byte is ignored.
pub fn read_utf16le(buf: &[u8]) -> String {
    let units: Vec<u16> = buf
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .take_while(|&u| u != 0)
        .collect();
    String::from_utf16_lossy(&units)
}

/// Make a decoded string safe for a line-oriented format.
///
/// Each run of CR/LF characters becomes a single space, every other control
/// character is dropped, and the result is trimmed.
pub fn sanitize_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_break = false;
    for c in s.chars() {
        if c == '\r' || c == '\n' {
            if !in_break {
                out.push(' ');
                in_break = true;
            }
            continue;
        }
        in_break = false;
        if !c.is_control() {
            out.push(c);
        }
    }
    out.trim().to_string()
}

/// Canonical form of a serial for lookup and storage: hyphens removed,
/// surrounding whitespace trimmed, uppercased.
pub fn normalize_serial(serial: &str) -> String {
    serial.replace('-', "").trim().to_uppercase()
}
