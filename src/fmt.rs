pub fn format_dkk(value: f64) -> String {
    let rounded = value.round();
    let negative = rounded < 0.0;
    let digits = (rounded.abs() as u64).to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i != 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-{grouped} kr.")
    } else {
        format!("{grouped} kr.")
    }
}

pub fn format_pct(fraction: f64) -> String {
    let pct = (fraction * 10_000.0).round() / 100.0;
    let mut text = format!("{pct:.2}");
    while text.ends_with('0') {
        text.pop();
    }
    if text.ends_with('.') {
        text.pop();
    }
    format!("{}%", text.replace('.', ","))
}
