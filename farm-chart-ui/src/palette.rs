//! Fill and border colors used by the dashboard charts.

pub const RED: &str = "rgba(255, 99, 132, 0.7)";
pub const BLUE: &str = "rgba(54, 162, 235, 0.7)";
pub const YELLOW: &str = "rgba(255, 206, 86, 0.7)";
pub const TEAL: &str = "rgba(75, 192, 192, 0.7)";
pub const PURPLE: &str = "rgba(153, 102, 255, 0.7)";
pub const ORANGE: &str = "rgba(255, 159, 64, 0.7)";
pub const GREY: &str = "rgba(201, 203, 207, 0.7)";

pub const RED_BORDER: &str = "rgba(255, 99, 132, 1)";
pub const BLUE_BORDER: &str = "rgba(54, 162, 235, 1)";
pub const YELLOW_BORDER: &str = "rgba(255, 206, 86, 1)";
pub const TEAL_BORDER: &str = "rgba(75, 192, 192, 1)";
pub const PURPLE_BORDER: &str = "rgba(153, 102, 255, 1)";

/// Stage and cost slices.
pub const SLICES: &[&str] = &[RED, BLUE, YELLOW, TEAL, PURPLE, ORANGE, GREY, RED];

/// Crop slices start on teal so adjacent overview charts differ.
pub const CROP_SLICES: &[&str] = &[TEAL, BLUE, YELLOW, RED, PURPLE, ORANGE, GREY, RED];

pub const CATEGORY_SLICES: &[&str] = &[TEAL, ORANGE, RED, BLUE, YELLOW, PURPLE, GREY];

/// One color per data point, wrapping around the palette.
pub fn cycle(palette: &[&str], n: usize) -> Vec<String> {
    if palette.is_empty() {
        return Vec::new();
    }
    palette.iter().cycle().take(n).map(|c| c.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_wraps() {
        let colors = cycle(CATEGORY_SLICES, 9);
        assert_eq!(colors.len(), 9);
        assert_eq!(colors[7], TEAL);
        assert!(cycle(&[], 3).is_empty());
    }
}
