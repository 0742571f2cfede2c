// arg_utils.rs - Small parsing helpers shared by alias detection and
// environment handling.

/// Returns the last path component of `path`, handling both `/` and `\` separators.
pub fn last_name_from_path(path: &str) -> &str {
    let after_slash = match path.rfind('/') {
        Some(pos) => &path[pos + 1..],
        None => path,
    };
    match after_slash.rfind('\\') {
        Some(pos) => &after_slash[pos + 1..],
        None => after_slash,
    }
}

/// Returns `true` if `exe_path` matches `name`, ignoring a trailing extension
/// such as `.exe`.
pub fn exe_name_match(exe_path: &str, name: &str) -> bool {
    if let Some(rest) = exe_path.strip_prefix(name) {
        rest.is_empty() || rest.starts_with('.')
    } else {
        false
    }
}

/// Parses an unsigned integer from the leading digits of `s`.
///
/// Returns `None` if `s` does not start with a digit or the value overflows
/// `u32`, otherwise `Some((value, remainder))`.
pub fn read_u32_from_str(s: &str) -> Option<(u32, &str)> {
    let digits = s.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let value = s[..digits].parse::<u32>().ok()?;
    Some((value, &s[digits..]))
}
