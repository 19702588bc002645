//! Drag-to-recolor input handling.
//!
//! While the button is held, every pointer move maps the pointer position to a
//! color: red follows the horizontal position, green the vertical one and blue
//! stays fixed.

/// Maps a pointer position in pixels to 8-bit channel values.
///
/// The result is not clamped: positions outside the viewport give red or green
/// values outside `0..=255`.
pub fn pointer_channels(x: f64, y: f64, width: u32, height: u32, blue: i32) -> [i32; 3] {
    let red = (255.0 * x / f64::from(width.max(1))).round() as i32;
    let green = (255.0 * y / f64::from(height.max(1))).round() as i32;
    [red, green, blue]
}

#[derive(Debug, Clone)]
pub struct DragRecolor {
    held: bool,
    blue_channel: i32,
}

impl DragRecolor {
    pub fn new(blue_channel: i32) -> Self {
        Self {
            held: false,
            blue_channel,
        }
    }

    pub fn is_held(&self) -> bool {
        self.held
    }

    pub fn press(&mut self) {
        self.held = true;
    }

    pub fn release(&mut self) {
        self.held = false;
    }

    /// Channels for the pointer at `(x, y)`, or `None` when the button is not held.
    pub fn pointer_moved(&self, x: f64, y: f64, width: u32, height: u32) -> Option<[i32; 3]> {
        self.held
            .then(|| pointer_channels(x, y, width, height, self.blue_channel))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channels_follow_pointer() {
        assert_eq!(pointer_channels(0.0, 0.0, 800, 600, 150), [0, 0, 150]);
        assert_eq!(pointer_channels(800.0, 600.0, 800, 600, 150), [255, 255, 150]);
        assert_eq!(pointer_channels(400.0, 150.0, 800, 600, 150), [128, 64, 150]);
    }

    #[test]
    fn channels_round_to_nearest() {
        // 255 * 1 / 3 = 85.0, 255 * 2 / 3 = 170.0, 255 * 10 / 800 = 3.1875
        assert_eq!(pointer_channels(1.0, 2.0, 3, 3, 150), [85, 170, 150]);
        assert_eq!(pointer_channels(10.0, 0.0, 800, 600, 150)[0], 3);
    }

    #[test]
    fn channels_outside_viewport_are_not_clamped() {
        let [red, green, _] = pointer_channels(-80.0, 1200.0, 800, 600, 150);
        assert_eq!(red, -26);
        assert_eq!(green, 510);
    }

    #[test]
    fn moves_only_recolor_while_held() {
        let mut recolor = DragRecolor::new(150);
        assert_eq!(recolor.pointer_moved(10.0, 10.0, 100, 100), None);

        recolor.press();
        assert!(recolor.is_held());
        assert_eq!(recolor.pointer_moved(50.0, 20.0, 100, 100), Some([128, 51, 150]));

        recolor.release();
        assert_eq!(recolor.pointer_moved(60.0, 30.0, 100, 100), None);
    }
}
