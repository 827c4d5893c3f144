//! Counts spending alerts for input read from stdin
//!
//! The input is `n d` followed by `n` daily spending values.
//! A day raises an alert when it spends at least twice the median of the `d` days before it.

use std::io::{self, Read};

use slidemedian::{activity_notifications, parse_activity_input};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut input = String::new();
    io::stdin().read_to_string(&mut input)?;

    let input = parse_activity_input(&input)?;
    let notices = activity_notifications(&input.expenditure, input.trailing_days)?;
    println!("{notices}");

    Ok(())
}
