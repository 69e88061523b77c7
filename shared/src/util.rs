/// Generate an opaque unique identifier for a new resource.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Format an amount in rupees with Indian digit grouping.
///
/// The last three digits form one group, everything above groups in
/// twos: `1234567.5` -> `₹12,34,567.50`. Whole amounts drop the paise.
pub fn format_inr(amount: f64) -> String {
    let negative = amount < 0.0;
    // Round to paise first so 9.999 becomes ₹10, not ₹9.100
    let cents = (amount.abs() * 100.0).round() as u64;
    let rupees = cents / 100;
    let paise = cents % 100;

    let digits = rupees.to_string();
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 2);
    for (i, ch) in digits.chars().enumerate() {
        let remaining = len - i;
        if i > 0 && (remaining == 3 || (remaining > 3 && (remaining - 3) % 2 == 0)) {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    if paise == 0 {
        format!("{}₹{}", sign, grouped)
    } else {
        format!("{}₹{}.{:02}", sign, grouped, paise)
    }
}
