//! Display normalization for the editor
//!
//! Box breaks are easier to edit when they sit on a line of their own, so
//! [`to_display`] surrounds every `[break]` and `[breakdelay:..]` tag with
//! line breaks and [`from_display`] takes exactly those line breaks away again.

/// Surround every box-break tag with line breaks
#[must_use]
pub fn to_display(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 8);
    let mut rest = raw;

    while let Some((start, end)) = find_break_tag(rest) {
        out.push_str(&rest[..start]);
        out.push('\n');
        out.push_str(&rest[start..end]);
        out.push('\n');
        rest = &rest[end..];
    }
    out.push_str(rest);

    out
}

/// Remove one line break on each side of every box-break tag
///
/// Inverse of [`to_display`]: `from_display(&to_display(x)) == x`.
#[must_use]
pub fn from_display(display: &str) -> String {
    let mut out = String::with_capacity(display.len());
    let mut rest = display;

    while let Some((start, end)) = find_break_tag(rest) {
        let before = &rest[..start];
        out.push_str(before.strip_suffix('\n').unwrap_or(before));
        out.push_str(&rest[start..end]);
        let after = &rest[end..];
        rest = after.strip_prefix('\n').unwrap_or(after);
    }
    out.push_str(rest);

    out
}

/// Byte range of the first `[break]` or `[breakdelay:..]` tag in `text`
fn find_break_tag(text: &str) -> Option<(usize, usize)> {
    let mut from = 0;
    while let Some(pos) = text[from..].find("[break") {
        let start = from + pos;
        let tail = &text[start + "[break".len()..];
        if tail.starts_with(']') {
            return Some((start, start + "[break]".len()));
        }
        if tail.starts_with("delay:") {
            if let Some(close) = tail.find(']') {
                return Some((start, start + "[break".len() + close + 1));
            }
        }
        from = start + 1;
    }
    None
}
