/// Currency symbol shown for estimates and the chart axis.
pub const CURRENCY_SYMBOL: &str = "₹";

/// Formats an amount as `₹1,234,567.89`. Negative amounts get a leading `-`.
pub fn format_currency(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u128;
    let whole = cents / 100;
    let frac = cents % 100;
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}{CURRENCY_SYMBOL}{}.{frac:02}", group_thousands(whole))
}

/// Inserts `,` every three digits from the right.
pub fn group_thousands(value: u128) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
