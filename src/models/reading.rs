use crate::status::{classify, MetricKind, Status};

/// Latest known sensor values for one machine.
///
/// Replaced wholesale on every update, never merged field by field.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorReading {
    pub temperature: f32,
    pub vibration: f32,
    pub pressure: f32,
    pub humidity: Option<f32>,
}

impl Default for SensorReading {
    fn default() -> Self {
        Self {
            temperature: 0.0,
            vibration: 0.0,
            pressure: 0.0,
            humidity: None,
        }
    }
}

impl SensorReading {
    pub fn new(temperature: f32, vibration: f32, pressure: f32, humidity: Option<f32>) -> Self {
        Self {
            temperature,
            vibration,
            pressure,
            humidity,
        }
    }

    pub fn temperature_display(&self) -> String {
        format!("{:.1} °C", self.temperature)
    }

    pub fn vibration_display(&self) -> String {
        format!("{:.2} m/s²", self.vibration)
    }

    pub fn pressure_display(&self) -> String {
        format!("{:.2} bar", self.pressure)
    }

    pub fn humidity_display(&self) -> String {
        match self.humidity {
            Some(humidity) => format!("{:.1} %", humidity),
            None => "--".to_string(),
        }
    }

    /// Alert if any thresholded metric of this reading alerts.
    pub fn worst_status(&self) -> Status {
        let statuses = [
            classify(self.temperature, MetricKind::Temperature),
            classify(self.vibration, MetricKind::Vibration),
            classify(self.pressure, MetricKind::Pressure),
        ];
        if statuses.contains(&Status::Alert) {
            Status::Alert
        } else {
            Status::Normal
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_formats() {
        let reading = SensorReading::new(70.0, 0.1, 1.2, Some(35.0));
        assert_eq!(reading.temperature_display(), "70.0 °C");
        assert_eq!(reading.vibration_display(), "0.10 m/s²");
        assert_eq!(reading.pressure_display(), "1.20 bar");
        assert_eq!(reading.humidity_display(), "35.0 %");
    }

    #[test]
    fn test_missing_humidity_display() {
        let reading = SensorReading::new(24.0, 0.2, 1.3, None);
        assert_eq!(reading.humidity_display(), "--");
    }

    #[test]
    fn test_worst_status() {
        // Machine1 from the default table runs hot
        let hot = SensorReading::new(70.0, 0.1, 1.2, Some(35.0));
        assert_eq!(hot.worst_status(), Status::Alert);

        let ok = SensorReading::new(24.0, 0.2, 1.3, Some(40.0));
        assert_eq!(ok.worst_status(), Status::Normal);

        // Humidity alone never alerts
        let humid = SensorReading::new(21.0, 0.1, 1.1, Some(99.0));
        assert_eq!(humid.worst_status(), Status::Normal);
    }
}
