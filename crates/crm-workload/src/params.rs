//! Random and fixed query arguments.

use rand::Rng;
use std::ops::RangeInclusive;

/// `to_date` of rows that have not been superseded yet.
pub const ACTIVE_DATE: &str = "9999-01-01";

/// Employee ids the CRM workload draws from.
pub const CRM_EMPLOYEE_IDS: RangeInclusive<i64> = 10001..=40000;

/// Departments the CRM workload draws from.
pub const CRM_DEPARTMENTS: [&str; 6] = ["d001", "d002", "d003", "d004", "d005", "d009"];

/// Employee ids the HRIS workload draws from (the dense part of the dataset).
pub const HRIS_EMPLOYEE_IDS: RangeInclusive<i64> = 10001..=200000;

pub const HRIS_DEPARTMENTS: [&str; 9] = [
    "d001", "d002", "d003", "d004", "d005", "d006", "d007", "d008", "d009",
];

pub const LAST_NAMES: [&str; 10] = [
    "Smith",
    "Johnson",
    "Williams",
    "Brown",
    "Jones",
    "Garcia",
    "Miller",
    "Davis",
    "Rodriguez",
    "Martinez",
];

pub const TITLES: [&str; 7] = [
    "Senior Engineer",
    "Staff",
    "Engineer",
    "Senior Staff",
    "Assistant Engineer",
    "Technique Leader",
    "Manager",
];

/// Random employee id in `range` (inclusive).
pub fn employee_id<R: Rng + ?Sized>(rng: &mut R, range: &RangeInclusive<i64>) -> i64 {
    rng.gen_range(range.clone())
}

/// Pick one value from a fixed, non-empty set.
pub fn pick<R: Rng + ?Sized>(rng: &mut R, choices: &[&'static str]) -> &'static str {
    choices[rng.gen_range(0..choices.len())]
}

/// First and last day of a random year in the 1990s, as `YYYY-MM-DD`.
pub fn year_range<R: Rng + ?Sized>(rng: &mut R) -> (String, String) {
    let year = rng.gen_range(1990..=1998);
    (format!("{year}-01-01"), format!("{year}-12-31"))
}

/// Three-letter `LIKE` prefix of a random last name, e.g. `"Smi%"`.
pub fn last_name_prefix<R: Rng + ?Sized>(rng: &mut R) -> String {
    let name = pick(rng, &LAST_NAMES);
    format!("{}%", &name[..3])
}
