/// Metric kinds that carry an alert threshold.
///
/// Humidity is displayed but has no threshold, so it has no kind here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Temperature,
    Vibration,
    Pressure,
}

impl MetricKind {
    /// Fixed alert cutoff for this metric.
    pub fn threshold(self) -> f32 {
        match self {
            MetricKind::Temperature => 60.0,
            MetricKind::Vibration => 5.0,
            MetricKind::Pressure => 2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Normal,
    Alert,
}

/// Classify a reading value against the fixed threshold for its kind.
///
/// Alert only when the value strictly exceeds the cutoff; the threshold
/// value itself is still normal. Callers are expected to pass finite
/// floats, no validation happens here.
pub fn classify(value: f32, kind: MetricKind) -> Status {
    if value > kind.threshold() {
        Status::Alert
    } else {
        Status::Normal
    }
}
