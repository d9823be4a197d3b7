
use itertools::Itertools;

use crate::detector::ConcentrationReading;

const TIMESTAMP_FORMAT: &str = "%d %b %H:%M:%S";

/// Console block for one reading: a line per gas, then a blank line.
pub fn render(reading: &ConcentrationReading, timestamps: bool) -> String {
    let lines = reading
        .iter()
        .map(|(gas, ppm)| format!("{gas}: {ppm} ppm"))
        .join("\n");

    if timestamps {
        format!("[{}]\n{lines}\n\n", reading.taken_at().format(TIMESTAMP_FORMAT))
    } else {
        format!("{lines}\n\n")
    }
}
