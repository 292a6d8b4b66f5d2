use crate::status::Status;
use image::Rgba;

pub(crate) struct Colours {
    pub header: Rgba<u8>,
    pub text: Rgba<u8>,
    pub label: Rgba<u8>,
    pub normal: Rgba<u8>,
    pub alert: Rgba<u8>,
    pub grid: Rgba<u8>,
}

impl Default for Colours {
    fn default() -> Self {
        Self {
            header: Rgba([114, 159, 207, 255]), // Steel blue - for headers
            text: Rgba([238, 238, 236, 255]),   // Off-white - for metric values
            label: Rgba([186, 189, 182, 255]),  // Silver gray - for metric labels
            normal: Rgba([87, 174, 36, 255]),   // Vibrant green - reading in range
            alert: Rgba([204, 0, 0, 255]),      // Crimson - reading over threshold
            grid: Rgba([60, 60, 60, 255]),      // Dark gray - separators and borders
        }
    }
}

impl Colours {
    pub fn status_colour(&self, status: Status) -> Rgba<u8> {
        match status {
            Status::Normal => self.normal,
            Status::Alert => self.alert,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_colour_mapping() {
        let colours = Colours::default();
        assert_eq!(colours.status_colour(Status::Normal), colours.normal);
        assert_eq!(colours.status_colour(Status::Alert), colours.alert);
    }
}
