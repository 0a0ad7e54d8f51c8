/// Format `value` as dollars with comma-grouped thousands and two decimals, e.g. `$1,234.56`.
///
/// Negative amounts keep the sign after the dollar symbol (`$-12.50`). Non-finite values are
/// passed through unformatted (`$inf`, `$NaN`).
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return format!("${value}");
    }

    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut out = String::with_capacity(fixed.len() + fixed.len() / 3 + 2);
    out.push('$');
    if value < 0.0 {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    out.push('.');
    out.push_str(frac_part);
    out
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i).is_multiple_of(3) {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/accrual/currency.rs"]
mod tests;
