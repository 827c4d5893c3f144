//! A basic example showing minimal usage
//!
//! We construct a [`SlidingWindowMedian`], stream data through it, and read out the median of the last few points

use slidemedian::SlidingWindowMedian;

/// Some sample data to stream through the window
///
/// In practice, this will probably be a much longer stream
const DATA: [i64; 15] = [18, 83, 21, 21, 63, 64, 4, 92, 31, 94, 2, 44, 70, 17, 61];

fn main() -> slidemedian::Result<()> {
    // Only the last 5 points count towards the median
    let mut window = SlidingWindowMedian::new(5)?;

    for data_point in DATA {
        window.add_sample_point(data_point)?;
    }

    // The window now holds [2, 44, 70, 17, 61], whose median is 44
    // The median is reported doubled, so that even-sized windows stay exact
    let median = window.doubled_median()? as f64 / 2.;
    println!("Median of the last 5 points: {median}");

    Ok(())
}
