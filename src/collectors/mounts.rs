use crate::models::mount::Mount;
use std::io;

const PROC_MOUNTS: &str = "/proc/mounts";

/// Read the current mount table from /proc/mounts.
pub fn read_mounts() -> io::Result<Vec<Mount>> {
    let content = std::fs::read_to_string(PROC_MOUNTS)?;
    Ok(parse_mounts(&content))
}

/// Parse /proc/mounts-formatted text, keeping table order.
pub fn parse_mounts(content: &str) -> Vec<Mount> {
    let mut v = Vec::new();
    for line in content.lines() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 3 { continue; }
        v.push(Mount::new(unescape(fields[0]), unescape(fields[1]), fields[2]));
    }
    v
}

/// Decode the kernel's three-digit octal escapes ("\040" for a space).
fn unescape(field: &str) -> String {
    if !field.contains('\\') {
        return field.to_string();
    }
    let bytes = field.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'\\' && i + 4 <= bytes.len() {
            if let Some(b) = octal(&bytes[i + 1..i + 4]) {
                out.push(b);
                i += 4;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn octal(digits: &[u8]) -> Option<u8> {
    let mut n: u16 = 0;
    for &d in digits {
        if !(b'0'..=b'7').contains(&d) { return None; }
        n = n * 8 + (d - b'0') as u16;
    }
    u8::try_from(n).ok()
}
