pub(crate) mod reading;
pub(crate) mod registry;

pub use reading::SensorReading;
pub use registry::MachineRegistry;
