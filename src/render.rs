//! C-style format-string rendering for decoded entries.
//!
//! Two steps. First, specifier normalization: the writer's source language
//! uses pointer and unsigned specifiers that the renderer does not support
//! directly, so up to the first two occurrences of each pattern are
//! rewritten (`0x%p` and `%p` to `0x%x`, `%llu`/`%lu`/`%u` to `%d`). The
//! bound of two reflects the fixed two-argument record layout; a third
//! occurrence of the same pattern is deliberately left as-is, so such a
//! format string renders malformed rather than erroring. Second, argument
//! substitution against exactly the two stored arguments; any failure there
//! degrades to printing the raw string and arguments instead of aborting
//! the decode.

/// Rewrite unsupported specifiers into supported equivalents.
///
/// Replacement order matters: `0x%p` must go before `%p` (or the prefix
/// would double), and `%llu` before `%lu` before `%u` (substring overlap).
/// Each pattern gets its own budget of two replacements.
#[must_use]
pub fn normalize_specifiers(fmt: &str) -> String {
    fmt.replacen("0x%p", "0x%x", 2)
        .replacen("%p", "0x%x", 2)
        .replacen("%llu", "%d", 2)
        .replacen("%lu", "%d", 2)
        .replacen("%u", "%d", 2)
}

/// Render a raw format string against the two stored arguments.
///
/// Falls back to `"<raw> arg1=<a1> arg2=<a2>"` when substitution fails
/// (unsupported conversion, or more specifiers than stored arguments).
#[must_use]
pub fn render_message(fmt: &str, arg1: u64, arg2: u64) -> String {
    match substitute(&normalize_specifiers(fmt), [arg1, arg2]) {
        Ok(rendered) => rendered,
        Err(_) => format!("{fmt} arg1={arg1} arg2={arg2}"),
    }
}

#[derive(Debug, PartialEq, Eq)]
enum SubstError {
    /// A conversion this renderer does not implement (`%s`, `%f`, ...).
    Unsupported(char),
    /// More conversions than the two stored arguments.
    TooManySpecifiers,
    /// '%' at end of string, or an argument not representable (`%c` on a
    /// value outside char range).
    Malformed,
}

/// printf-subset substitution: `%%`, `%d`/`%i`, `%x`/`%X`, `%c`, with
/// optional `-`/`0` flags and a decimal width.
///
/// Arguments are the raw unsigned 64-bit slots from the record; `%d`
/// prints the stored unsigned value, matching how the writer casts every
/// argument to `u64` at log time.
fn substitute(fmt: &str, args: [u64; 2]) -> Result<String, SubstError> {
    let mut out = String::with_capacity(fmt.len() + 16);
    let mut chars = fmt.chars().peekable();
    let mut next_arg = 0usize;

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }

        let mut left_align = false;
        let mut zero_pad = false;
        while let Some(&flag) = chars.peek() {
            match flag {
                '-' => left_align = true,
                '0' => zero_pad = true,
                _ => break,
            }
            chars.next();
        }

        let mut width = 0usize;
        while let Some(d) = chars.peek().and_then(|c| c.to_digit(10)) {
            width = width * 10 + d as usize;
            chars.next();
        }

        let conv = chars.next().ok_or(SubstError::Malformed)?;
        if conv == '%' {
            out.push('%');
            continue;
        }

        if next_arg >= args.len() {
            return Err(SubstError::TooManySpecifiers);
        }
        let arg = args[next_arg];
        next_arg += 1;

        let text = match conv {
            'd' | 'i' => arg.to_string(),
            'x' => format!("{arg:x}"),
            'X' => format!("{arg:X}"),
            'c' => {
                let c = u32::try_from(arg)
                    .ok()
                    .and_then(char::from_u32)
                    .ok_or(SubstError::Malformed)?;
                c.to_string()
            }
            other => return Err(SubstError::Unsupported(other)),
        };
        out.push_str(&pad(&text, width, left_align, zero_pad));
    }

    Ok(out)
}

fn pad(text: &str, width: usize, left_align: bool, zero_pad: bool) -> String {
    if text.len() >= width {
        return text.to_string();
    }
    let fill_len = width - text.len();
    if left_align {
        format!("{text}{}", " ".repeat(fill_len))
    } else if zero_pad {
        format!("{}{text}", "0".repeat(fill_len))
    } else {
        format!("{}{text}", " ".repeat(fill_len))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pct_p_becomes_hex() {
        assert_eq!(
            normalize_specifiers("This has an embedded pct-p like this %p"),
            "This has an embedded pct-p like this 0x%x"
        );
    }

    #[test]
    fn test_prefixed_pct_p_keeps_single_prefix() {
        assert_eq!(
            normalize_specifiers("This has an embedded pct-p like this 0x%p"),
            "This has an embedded pct-p like this 0x%x"
        );
    }

    #[test]
    fn test_two_pointer_patterns_both_replaced() {
        assert_eq!(
            normalize_specifiers("Up to 2 instances of pct-p %p and 0x-pct-p 0x%p are replaced"),
            "Up to 2 instances of pct-p 0x%x and 0x-pct-p 0x%x are replaced"
        );
    }

    #[test]
    fn test_separate_budgets_cover_three_pointers() {
        // One 0x%p plus two bare %p: each pattern has its own budget of
        // two, so all three convert.
        assert_eq!(
            normalize_specifiers("pct-p %p and 0x-pct-p 0x%p %p all convert"),
            "pct-p 0x%x and 0x-pct-p 0x%x 0x%x all convert"
        );
    }

    #[test]
    fn test_third_occurrence_of_same_pattern_unchanged() {
        assert_eq!(
            normalize_specifiers("three bare: %p and %p and %p"),
            "three bare: 0x%x and 0x%x and %p"
        );
    }

    #[test]
    fn test_pct_x_untouched() {
        assert_eq!(normalize_specifiers("unchanged %x"), "unchanged %x");
        assert_eq!(normalize_specifiers("unchanged 0x%x"), "unchanged 0x%x");
    }

    #[test]
    fn test_unsigned_variants() {
        assert_eq!(normalize_specifiers("unsigned int=%u"), "unsigned int=%d");
        assert_eq!(normalize_specifiers("unsigned long=%lu"), "unsigned long=%d");
        assert_eq!(normalize_specifiers("unsigned long long=%llu"), "unsigned long long=%d");
    }

    #[test]
    fn test_idempotent_without_specifiers() {
        let plain = "no specifiers at all, just text (with %x and %d allowed)";
        assert_eq!(normalize_specifiers(plain), plain);
        assert_eq!(normalize_specifiers(&normalize_specifiers(plain)), plain);
    }

    #[test]
    fn test_render_simple_count() {
        assert_eq!(render_message("count=%d", 7, 0), "count=7");
    }

    #[test]
    fn test_render_two_args() {
        assert_eq!(render_message("a=%d b=%d", 1, 2), "a=1 b=2");
    }

    #[test]
    fn test_render_pointer_as_hex() {
        assert_eq!(render_message("buf at %p", 0xdead, 0), "buf at 0xdead");
    }

    #[test]
    fn test_render_large_unsigned_via_pct_llu() {
        // %lu on a value above i64::MAX still prints the stored unsigned value.
        assert_eq!(
            render_message("big=%llu", 0x8000_0000_0000_0000, 0),
            format!("big={}", 0x8000_0000_0000_0000_u64)
        );
    }

    #[test]
    fn test_render_fewer_specifiers_than_args() {
        assert_eq!(render_message("just text", 1, 2), "just text");
    }

    #[test]
    fn test_render_width_and_flags() {
        assert_eq!(render_message("[%5d]", 42, 0), "[   42]");
        assert_eq!(render_message("[%-5d]", 42, 0), "[42   ]");
        assert_eq!(render_message("[%04x]", 0xab, 0), "[00ab]");
    }

    #[test]
    fn test_render_percent_literal() {
        assert_eq!(render_message("100%% done", 0, 0), "100% done");
    }

    #[test]
    fn test_unsupported_conversion_falls_back() {
        assert_eq!(render_message("name=%s", 5, 6), "name=%s arg1=5 arg2=6");
    }

    #[test]
    fn test_too_many_specifiers_falls_back() {
        assert_eq!(render_message("%d %d %d", 1, 2), "%d %d %d arg1=1 arg2=2");
    }

    #[test]
    fn test_trailing_percent_falls_back() {
        assert_eq!(render_message("oops %", 1, 2), "oops % arg1=1 arg2=2");
    }
}
