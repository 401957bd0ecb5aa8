//! Price input handling.
//!
//! Price is typed as free text, so each keystroke goes through [`guard_keystroke`]
//! before it reaches the buffer:
//!
//! 1. More than [`MAX_PRICE_DIGITS`] digits anywhere in the text → the keystroke is rejected.
//! 2. Empty text is kept, so the field can be cleared.
//! 3. Text with no numeric prefix, or a negative number → stored as `"0"`.
//! 4. Any zero value (`"0.0"`, `"-0"`, `"00"`) → stored as `"0"`.
//! 5. Anything else is kept verbatim, so half-typed decimals like `"12."` survive.
//!
//! Numbers are read with [`parse_leading_number`]: leading whitespace is skipped and the
//! longest numeric prefix wins, so `"12abc"` reads as 12. Non-finite values never parse.

pub const MAX_PRICE_DIGITS: usize = 7;

/// What to do with a price keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceKeystroke {
    /// Leave the buffer unchanged.
    Reject,
    /// Store the candidate text as typed.
    Keep,
    /// Store the canonical zero `"0"`.
    Zero,
}

pub const ZERO: &str = "0";

pub fn guard_keystroke(candidate: &str) -> PriceKeystroke {
    let digits = candidate.chars().filter(char::is_ascii_digit).count();
    if digits > MAX_PRICE_DIGITS && !candidate.is_empty() {
        return PriceKeystroke::Reject;
    }

    if candidate.is_empty() {
        return PriceKeystroke::Keep;
    }

    match parse_leading_number(candidate) {
        None => PriceKeystroke::Zero,
        Some(n) if n < 0.0 => PriceKeystroke::Zero,
        Some(n) if n == 0.0 && !candidate.trim().is_empty() => PriceKeystroke::Zero,
        Some(_) => PriceKeystroke::Keep,
    }
}

/// Parse the longest `[+-]digits[.digits][e[+-]digits]` prefix of `text`.
///
/// Returns `None` when there is no mantissa digit or the result is not finite.
pub fn parse_leading_number(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        end += 1 + frac_digits;
    }

    if int_digits + frac_digits == 0 {
        return None;
    }

    // An exponent only counts when digits follow it
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end].parse::<f64>().ok().filter(|n| n.is_finite())
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}
