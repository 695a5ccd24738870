//! Small text helpers shared by the narrative and the dossier.

use jiff::civil::{Date, DateTime, Time};

/// Placeholder for unset topics and approach in narratives.
pub const NOT_SPECIFIED: &str = "not specified";

/// Placeholder for unset mood, sleep, and eating in narratives.
pub const NOT_INFORMED: &str = "not informed";

/// `A`, `A and B`, `A, B and C`. `None` for an empty list.
pub fn join_natural<S: AsRef<str>>(items: &[S]) -> Option<String> {
    match items {
        [] => None,
        [only] => Some(only.as_ref().to_string()),
        [init @ .., last] => {
            let head: Vec<&str> = init.iter().map(AsRef::as_ref).collect();
            Some(format!("{} and {}", head.join(", "), last.as_ref()))
        }
    }
}

/// Natural join of lower-cased labels, for mid-sentence use.
pub fn join_lower<S: AsRef<str>>(items: &[S]) -> Option<String> {
    let lowered: Vec<String> = items.iter().map(|i| i.as_ref().to_lowercase()).collect();
    join_natural(&lowered)
}

/// Trimmed text, or `None` when absent or blank.
pub fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// `October 01, 2026`
pub fn long_date(date: Date) -> String {
    date.strftime("%B %d, %Y").to_string()
}

/// `01/10/2026`
pub fn short_date(date: Date) -> String {
    date.strftime("%d/%m/%Y").to_string()
}

/// `2026-10-01`, used in file names.
pub fn iso_date(date: Date) -> String {
    date.strftime("%Y-%m-%d").to_string()
}

/// `14:30`
pub fn clock(time: Time) -> String {
    time.strftime("%H:%M").to_string()
}

/// `Document generated on 01/10/2026 at 14:30:05`
pub fn generated_on(at: DateTime) -> String {
    format!(
        "Document generated on {} at {}",
        short_date(at.date()),
        at.time().strftime("%H:%M:%S")
    )
}

pub fn minutes(duration: u16) -> String {
    format!("{duration} minutes")
}

/// Whitespace runs become `_`, so `Ana  Maria Souza` becomes `Ana_Maria_Souza`.
pub fn file_name_part(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join("_")
}
