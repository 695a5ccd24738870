//! Display masks for identity and contact fields.
//!
//! All formatters strip non-digits first and accept partial input, so they
//! can be applied on every keystroke.

pub const CPF_DIGITS: usize = 11;

pub fn digits_only(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// `000.000.000-00`, progressively.
pub fn format_cpf(value: &str) -> String {
    let digits = digits_only(value);
    let d: Vec<char> = digits.chars().take(CPF_DIGITS).collect();

    let mut out = String::with_capacity(14);
    for (i, c) in d.iter().enumerate() {
        match i {
            3 | 6 => out.push('.'),
            9 => out.push('-'),
            _ => {}
        }
        out.push(*c);
    }
    out
}

/// Length check only. No verification digits are computed.
pub fn is_valid_cpf(value: &str) -> bool {
    digits_only(value).len() == CPF_DIGITS
}

/// `(AA) NNNN-NNNN` for landlines (up to 10 digits), `(AA) NNNNN-NNNN` for
/// 11-digit mobile numbers.
pub fn format_phone(value: &str) -> String {
    let digits: String = digits_only(value).chars().take(11).collect();
    let len = digits.len();

    if len == 0 {
        return String::new();
    }
    if len <= 2 {
        return format!("({digits}");
    }

    let (area, body) = digits.split_at(2);
    let split = if len == 11 { 5 } else { 4 };
    if body.len() <= split {
        format!("({area}) {body}")
    } else {
        let (first, last) = body.split_at(split);
        format!("({area}) {first}-{last}")
    }
}

/// `NNNNN-NNN`.
pub fn format_cep(value: &str) -> String {
    let digits: String = digits_only(value).chars().take(8).collect();
    if digits.len() <= 5 {
        return digits;
    }
    let (head, tail) = digits.split_at(5);
    format!("{head}-{tail}")
}
