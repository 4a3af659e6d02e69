use rust_decimal::Decimal;

/// Format an amount in Indian currency notation: the last three integer
/// digits group together, every pair before them gets its own separator, and
/// two decimal places are always shown. 11500000 renders as ₹1,15,00,000.00.
pub fn format_inr(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let abs = rounded.abs();

    let text = abs.to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i.to_string(), format!("{:0<2}", f)),
        None => (text, "00".to_string()),
    };

    let sign = if negative { "-" } else { "" };
    format!("{}₹{}.{}", sign, group_indian(&int_part), &frac_part[..2])
}

fn group_indian(digits: &str) -> String {
    let n = digits.len();
    if n <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(n - 3);
    let mut pairs: Vec<&str> = Vec::new();
    let mut rest = head;
    while rest.len() > 2 {
        let (left, right) = rest.split_at(rest.len() - 2);
        pairs.push(right);
        rest = left;
    }
    pairs.push(rest);
    pairs.reverse();

    format!("{},{}", pairs.join(","), tail)
}
