//! Spending alerts based on the trailing median
//!
//! A day raises a notification when its spending is at least twice the median spending of the
//! `trailing_days` days before it. No notification can be raised until that many days of history exist.

use crate::error::{MedianError, Result};
use crate::window::{MedianSum, SlidingWindowMedian};

/// Counts the days whose spending is at least twice the median of the preceding `trailing_days` days
///
/// Fails with [`MedianError::InvalidArgument`] if `trailing_days` is zero,
/// and with [`MedianError::Overflow`] if twice the trailing median does not fit in `T`.
pub fn activity_notifications<T>(expenditure: &[T], trailing_days: usize) -> Result<usize>
where
    T: PartialOrd + Copy + MedianSum,
{
    let mut window = SlidingWindowMedian::new(trailing_days)?;
    let mut notices = 0;

    for &spent in expenditure {
        if window.is_full() && spent >= window.doubled_median()? {
            notices += 1;
        }

        window.add_sample_point(spent)?;
    }

    #[cfg(feature = "log")]
    log::debug!(
        "{} notifications over {} days with {} trailing days",
        notices,
        expenditure.len(),
        trailing_days
    );

    Ok(notices)
}

/// Parsed activity input: the daily spending and the number of trailing days
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityInput {
    /// Spending for each day, in order
    pub expenditure: Vec<i64>,
    /// Length of the trailing window
    pub trailing_days: usize,
}

/// Parses activity input of the form `n d` followed by `n` daily spending values
///
/// Values may be split across lines in any way. Trailing content after the `n` values is rejected.
pub fn parse_activity_input(input: &str) -> Result<ActivityInput> {
    let mut tokens = input.split_whitespace();

    let mut header = |name: &str| -> Result<usize> {
        let token = tokens
            .next()
            .ok_or_else(|| MedianError::Parse(format!("missing {name}")))?;
        token
            .parse()
            .map_err(|e| MedianError::Parse(format!("bad {name} {token:?}: {e}")))
    };
    let days = header("day count")?;
    let trailing_days = header("trailing day count")?;

    let expenditure = tokens
        .by_ref()
        .take(days)
        .map(|token| {
            token
                .parse::<i64>()
                .map_err(|e| MedianError::Parse(format!("bad spending {token:?}: {e}")))
        })
        .collect::<Result<Vec<_>>>()?;

    if expenditure.len() != days {
        return Err(MedianError::Parse(format!(
            "expected {} spending values, found {}",
            days,
            expenditure.len()
        )));
    }

    if let Some(extra) = tokens.next() {
        return Err(MedianError::Parse(format!("unexpected trailing {extra:?}")));
    }

    Ok(ActivityInput {
        expenditure,
        trailing_days,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn load_test_data(name: &str) -> ActivityInput {
        let text = fs::read_to_string(format!("./test_data/{name}")).unwrap();
        parse_activity_input(&text).unwrap()
    }

    fn notifications_for(name: &str) -> usize {
        let input = load_test_data(name);
        activity_notifications(&input.expenditure, input.trailing_days).unwrap()
    }

    #[test]
    fn sample_spending() {
        assert_eq!(notifications_for("sample_spending.txt"), 2);
    }

    #[test]
    fn quiet_spending() {
        assert_eq!(notifications_for("quiet_spending.txt"), 0);
    }

    #[test]
    fn split_lines() {
        let input = load_test_data("split_lines.txt");
        assert_eq!(input.expenditure, vec![10, 20, 30, 40, 50]);
        assert_eq!(input.trailing_days, 3);

        // Day 4 spends exactly twice the median of [10, 20, 30]
        assert_eq!(notifications_for("split_lines.txt"), 1);
    }

    #[test]
    fn short_history_never_notifies() {
        assert_eq!(activity_notifications(&[1, 100, 1000], 5), Ok(0));
        assert_eq!(activity_notifications::<i64>(&[], 2), Ok(0));
    }

    #[test]
    fn zero_trailing_days() {
        assert_eq!(
            activity_notifications(&[1, 2, 3], 0),
            Err(MedianError::InvalidArgument {
                what: "window size",
                value: 0
            })
        );
    }

    #[test]
    fn even_trailing_window() {
        // Median of [1, 2] is 1.5, so 3 is enough and 2 is not
        assert_eq!(activity_notifications(&[1, 2, 3], 2), Ok(1));
        assert_eq!(activity_notifications(&[1, 2, 2], 2), Ok(0));
    }

    #[test]
    fn huge_spending_overflows() {
        assert_eq!(
            activity_notifications(&[i64::MAX, 1], 1),
            Err(MedianError::Overflow)
        );
        assert_eq!(activity_notifications(&[i64::MAX / 2, i64::MAX], 1), Ok(1));
    }

    #[test]
    fn malformed_input() {
        assert!(matches!(parse_activity_input(""), Err(MedianError::Parse(_))));
        assert!(matches!(
            parse_activity_input("3 2\n1 x 3"),
            Err(MedianError::Parse(_))
        ));
        assert!(matches!(
            parse_activity_input("3 2\n1 2"),
            Err(MedianError::Parse(_))
        ));
        assert!(matches!(
            parse_activity_input("2 1\n1 2 3"),
            Err(MedianError::Parse(_))
        ));
    }
}
