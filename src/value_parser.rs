// Conversion between human-readable inventory strings and canonical amounts.
// Prices become rupees, mileages become kilometres.

const LAKH: f64 = 100_000.0;
const CRORE: f64 = 10_000_000.0;

/// Parses a display string such as `"₹12.5 Lakh"`, `"₹1.2 Cr"` or
/// `"45,000 km"` into its canonical numeric value.
///
/// Every character other than ASCII digits and `.` is stripped, then a
/// "lakh" suffix multiplies by 1e5 and "crore"/"cr" by 1e7. Text with no
/// usable digits yields `0.0`, so a single malformed record never breaks
/// filtering, sorting or comparison for the rest of the catalog.
pub fn parse_amount(s: &str) -> f64 {
    let cleaned: String = s.chars().filter(|c| c.is_ascii_digit() || *c == '.').collect();
    let value = leading_number(&cleaned);

    let lower = s.to_lowercase();
    if lower.contains("lakh") {
        value * LAKH
    } else if lower.contains("crore") || lower.contains("cr") {
        value * CRORE
    } else {
        value
    }
}

// Longest prefix that reads as a decimal number ("1.2.3" reads as 1.2)
fn leading_number(cleaned: &str) -> f64 {
    let mut end = 0;
    let mut seen_dot = false;
    for (i, c) in cleaned.char_indices() {
        if c == '.' {
            if seen_dot {
                break;
            }
            seen_dot = true;
        }
        end = i + c.len_utf8();
    }
    cleaned[..end].parse::<f64>().unwrap_or(0.0)
}

/// Renders a rupee amount the way the inventory writes it:
/// `₹1.2 Cr`, `₹12.5 Lakh`, or Indian digit grouping below one lakh.
pub fn format_price(amount: f64) -> String {
    if !amount.is_finite() || amount <= 0.0 {
        return "₹0".to_string();
    }
    if amount >= CRORE {
        format!("₹{} Cr", trim_decimals(amount / CRORE))
    } else if amount >= LAKH {
        format!("₹{} Lakh", trim_decimals(amount / LAKH))
    } else {
        format!("₹{}", group_indian(amount.round() as u64))
    }
}

fn trim_decimals(value: f64) -> String {
    let text = format!("{:.2}", value);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

// 1234567 -> "12,34,567"
fn group_indian(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut rest = head;
    while rest.len() > 2 {
        let (left, right) = rest.split_at(rest.len() - 2);
        groups.push(right);
        rest = left;
    }
    groups.push(rest);
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_lakh_and_crore_prices() {
        assert_eq!(parse_amount("₹12.5 Lakh"), 1_250_000.0);
        assert_eq!(parse_amount("₹1.2 Cr"), 12_000_000.0);
        assert_eq!(parse_amount("₹2 Crore"), 20_000_000.0);
        assert_eq!(parse_amount("₹9.5 LAKH"), 950_000.0);
    }

    #[test]
    fn parses_plain_numbers_and_mileage() {
        assert_eq!(parse_amount("45,000 km"), 45_000.0);
        assert_eq!(parse_amount("₹8,50,000"), 850_000.0);
        assert_eq!(parse_amount("1200"), 1200.0);
    }

    #[test]
    fn malformed_input_is_zero() {
        assert_eq!(parse_amount("garbage"), 0.0);
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("Price on request"), 0.0);
        assert_eq!(parse_amount("."), 0.0);
    }

    #[test]
    fn extra_dots_stop_the_number() {
        assert_eq!(parse_amount("1.2.3"), 1.2);
    }

    #[test]
    fn formats_back_to_display_strings() {
        assert_eq!(format_price(12_000_000.0), "₹1.2 Cr");
        assert_eq!(format_price(10_000_000.0), "₹1 Cr");
        assert_eq!(format_price(1_250_000.0), "₹12.5 Lakh");
        assert_eq!(format_price(45_000.0), "₹45,000");
        assert_eq!(format_price(999.0), "₹999");
        assert_eq!(format_price(0.0), "₹0");
    }

    #[test]
    fn groups_digits_the_indian_way() {
        assert_eq!(group_indian(1_234_567), "12,34,567");
        assert_eq!(group_indian(99_999), "99,999");
        assert_eq!(group_indian(100), "100");
    }
}
