//! Price text codec.
//!
//! Prices are stored as plain `f64` and shown with grouped thousands and
//! two fractional digits. The separators come from a [`PriceLocale`]; the
//! workshop default is the Turkish convention `16.000,00`.

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PriceLocale {
    pub thousands: char,
    pub decimal: char,
}

impl PriceLocale {
    pub const TURKISH: PriceLocale = PriceLocale { thousands: '.', decimal: ',' };

    /// Renders `value` with exactly two fractional digits. Non-finite input
    /// renders as zero.
    pub fn format(&self, value: f64) -> String {
        if !value.is_finite() {
            return format!("0{}00", self.decimal);
        }
        let fixed = format!("{:.2}", value.abs());
        let (integer, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
        let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
        format!("{}{}{}{}", sign, self.group(integer), self.decimal, fraction)
    }

    /// Reads a displayed price back into a number. Only the leading numeric
    /// part counts, so `16.000,00 ₺` reads as 16000. No leading number is 0.
    pub fn parse(&self, text: &str) -> f64 {
        let cleaned: String = text.trim().chars().filter(|c| *c != self.thousands).collect();
        let normalized = cleaned.replacen(self.decimal, ".", 1);
        match numeric_prefix(&normalized).parse::<f64>() {
            Ok(value) if value.is_finite() => value,
            _ => 0.0,
        }
    }

    /// Input mask applied on every keystroke. Regroups the integer part,
    /// keeps at most two fractional digits and preserves a trailing decimal
    /// separator so typing can continue. Applying it twice changes nothing.
    pub fn format_while_typing(&self, raw: &str) -> String {
        let cleaned: String = raw
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == self.thousands || *c == self.decimal)
            .collect();
        if cleaned.is_empty() {
            return String::new();
        }

        match cleaned.split_once(self.decimal) {
            Some((integer, rest)) => {
                let integer = self.strip_grouping(integer);
                let fraction: String = rest
                    .chars()
                    .take_while(|c| *c != self.decimal)
                    .filter(char::is_ascii_digit)
                    .take(2)
                    .collect();
                format!("{}{}{}", self.group(&integer), self.decimal, fraction)
            }
            None => {
                let integer = self.strip_grouping(&cleaned);
                if integer.is_empty() {
                    return String::new();
                }
                self.group(&integer)
            }
        }
    }

    fn strip_grouping(&self, digits: &str) -> String {
        digits.chars().filter(|c| *c != self.thousands).collect()
    }

    fn group(&self, digits: &str) -> String {
        let len = digits.chars().count();
        let mut out = String::with_capacity(len + len / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (len - i) % 3 == 0 {
                out.push(self.thousands);
            }
            out.push(c);
        }
        out
    }
}

/// Longest prefix of `text` shaped like a decimal number: sign, digits,
/// fraction and an exponent that has digits.
fn numeric_prefix(text: &str) -> &str {
    let bytes = text.as_bytes();
    let digits = |from: usize| bytes[from..].iter().take_while(|b| b.is_ascii_digit()).count();

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    end += digits(end);
    if bytes.get(end) == Some(&b'.') {
        end += 1 + digits(end + 1);
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exponent = end + 1;
        if matches!(bytes.get(exponent), Some(b'+' | b'-')) {
            exponent += 1;
        }
        let exponent_digits = digits(exponent);
        if exponent_digits > 0 {
            end = exponent + exponent_digits;
        }
    }
    &text[..end]
}

impl Default for PriceLocale {
    fn default() -> Self {
        Self::TURKISH
    }
}

pub fn format_price(value: f64) -> String {
    PriceLocale::TURKISH.format(value)
}

pub fn parse_price(text: &str) -> f64 {
    PriceLocale::TURKISH.parse(text)
}

pub fn format_price_input(raw: &str) -> String {
    PriceLocale::TURKISH.format_while_typing(raw)
}
