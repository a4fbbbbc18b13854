use std::fmt::Write as _;

/// 64-bit FNV-1a.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Fnv1a64(u64);

impl Fnv1a64 {
    const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01B3;

    pub(crate) fn new() -> Self {
        Self(Self::OFFSET_BASIS)
    }

    pub(crate) fn write_bytes(&mut self, bytes: &[u8]) {
        let mut h = self.0;
        for &b in bytes {
            h ^= u64::from(b);
            h = h.wrapping_mul(Self::PRIME);
        }
        self.0 = h;
    }

    pub(crate) fn finish(self) -> u64 {
        self.0
    }
}

/// Hash of a markup string, used as the preview cache key.
pub(crate) fn hash_str(s: &str) -> u64 {
    let mut h = Fnv1a64::new();
    h.write_bytes(s.as_bytes());
    h.finish()
}

/// Append `v` with at most three decimals and no trailing zeros.
///
/// Markup must be byte-identical for identical input, so all numbers go through here.
pub(crate) fn write_num(out: &mut String, v: f64) {
    if !v.is_finite() {
        out.push('0');
        return;
    }
    let rounded = (v * 1000.0).round() / 1000.0;
    // Avoid "-0".
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    let _ = write!(out, "{rounded:.3}");
    while out.ends_with('0') {
        out.pop();
    }
    if out.ends_with('.') {
        out.pop();
    }
}

pub(crate) fn fmt_num(v: f64) -> String {
    let mut s = String::new();
    write_num(&mut s, v);
    s
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
