//! A more fully-fledged example, showcasing the other methods on [`SlidingWindowMedian`]

use slidemedian::SlidingWindowMedian;

/// Some sample data to stream through the window
const DATA: [i64; 12] = [186, 831, 215, 214, 634, 641, 46, 927, 311, 948, 24, 445];

fn main() -> slidemedian::Result<()> {
    // An even window: the median is the average of the two middle points
    let mut window = SlidingWindowMedian::new(4)?;

    for data_point in DATA {
        window.add_sample_point(data_point)?;

        // Until the window fills up, the median covers every point seen so far
        if window.is_full() {
            println!("Window is full: the oldest point will be evicted next");
        } else {
            println!(
                "Window holds {} of {} points",
                window.sample_count(),
                window.window_size()
            );
        }

        // The two middle points can be read separately
        println!(
            "Middle points: {} and {}, doubled median: {}",
            window.lower_median()?,
            window.upper_median()?,
            window.doubled_median()?
        );
    }

    Ok(())
}
