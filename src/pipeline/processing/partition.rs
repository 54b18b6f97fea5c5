use crate::constants::POSTCODE_FIELD;
use crate::types::Record;
use serde_json::Value;
use std::cmp::Ordering;

/// Deduplicated records split by whether they carry an email address
#[derive(Debug, Clone, Default)]
pub struct Partitioned {
    pub with_email: Vec<Record>,
    pub without_email: Vec<Record>,
    /// Every deduplicated record, in dedup order
    pub all_unique: Vec<Record>,
}

impl Partitioned {
    /// Stable-sorts all three collections by postcode.
    pub fn sort_by_postcode(&mut self) {
        for records in [&mut self.with_email, &mut self.without_email, &mut self.all_unique] {
            records.sort_by(|a, b| natural_cmp(&postcode(a), &postcode(b)));
        }
    }
}

/// Splits `records` on [`Record::has_email`], keeping relative order in each half.
pub fn partition(records: Vec<Record>) -> Partitioned {
    let (with_email, without_email): (Vec<Record>, Vec<Record>) = records.iter().cloned().partition(Record::has_email);
    Partitioned {
        with_email,
        without_email,
        all_unique: records,
    }
}

fn postcode(record: &Record) -> String {
    match record.get(POSTCODE_FIELD) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Compares strings so that runs of ASCII digits order by numeric value,
/// e.g. `"V6B 2"` < `"V6B 10"`. Everything else compares case-insensitively,
/// with a plain comparison as the final tie-break.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();

    loop {
        match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) if l.is_ascii_digit() && r.is_ascii_digit() => {
                let ln = take_digits(&mut left);
                let rn = take_digits(&mut right);
                let ord = cmp_digit_runs(&ln, &rn);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            (Some(l), Some(r)) => {
                let ord = l.to_lowercase().cmp(r.to_lowercase());
                if ord != Ordering::Equal {
                    return ord;
                }
                left.next();
                right.next();
            }
        }
    }
}

fn take_digits(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(c) = chars.next_if(char::is_ascii_digit) {
        run.push(c);
    }
    run
}

// Numeric comparison on arbitrarily long digit runs
fn cmp_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}
