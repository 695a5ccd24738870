use jiff::civil::{date, time};
use prontuario_export::text::{
    clock, file_name_part, generated_on, iso_date, join_lower, join_natural, long_date,
    short_date,
};

#[test]
fn natural_join() {
    let none: [&str; 0] = [];
    assert_eq!(join_natural(&none), None);
    assert_eq!(join_natural(&["Anxiety"]).as_deref(), Some("Anxiety"));
    assert_eq!(
        join_natural(&["Anxiety", "Work"]).as_deref(),
        Some("Anxiety and Work")
    );
    assert_eq!(
        join_natural(&["Anxiety", "Work", "Grief"]).as_deref(),
        Some("Anxiety, Work and Grief")
    );
    assert_eq!(
        join_lower(&["Anxiety", "Work"]).as_deref(),
        Some("anxiety and work")
    );
}

#[test]
fn date_formats() {
    let d = date(2026, 10, 1);
    assert_eq!(long_date(d), "October 01, 2026");
    assert_eq!(short_date(d), "01/10/2026");
    assert_eq!(iso_date(d), "2026-10-01");
    assert_eq!(clock(time(9, 5, 0, 0)), "09:05");
    assert_eq!(
        generated_on(d.at(14, 30, 5, 0)),
        "Document generated on 01/10/2026 at 14:30:05"
    );
}

#[test]
fn file_name_part_collapses_whitespace() {
    assert_eq!(file_name_part("Ana  Maria Souza "), "Ana_Maria_Souza");
}
