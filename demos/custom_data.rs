//! An example showcasing a median over floating point readings
//!
//! Any [`Copy`] + [`PartialOrd`] type can be tracked, and types implementing [`std::ops::Add`] also get a doubled median

use slidemedian::SlidingWindowMedian;

/// Noisy sensor readings, with a couple of spikes a median filter should reject
const READINGS: [f32; 12] = [
    20.1, 20.3, 95.0, 20.2, 20.4, 20.0, 19.9, -40.0, 20.1, 20.3, 20.2, 20.0,
];

fn main() -> slidemedian::Result<()> {
    let mut window = SlidingWindowMedian::new(3)?;

    for reading in READINGS {
        window.add_sample_point(reading)?;

        // Spikes never reach the middle of a 3-wide window
        let filtered = window.doubled_median()? / 2.;
        println!("raw {reading:>6.1} -> filtered {filtered:>6.2}");
    }

    Ok(())
}
