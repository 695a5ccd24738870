//! Day-precision age. Every place that displays an age goes through here.

use jiff::civil::Date;

pub const AGE_OF_MAJORITY: i16 = 18;

/// Full years elapsed between `birth` and `today`.
pub fn age_on(birth: Date, today: Date) -> i16 {
    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age
}

pub fn is_minor_on(birth: Date, today: Date) -> bool {
    age_on(birth, today) < AGE_OF_MAJORITY
}
