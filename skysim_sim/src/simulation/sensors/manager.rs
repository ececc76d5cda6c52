// skysim_sim/src/simulation/sensors/manager.rs

use tracing::debug;

use skysim_core::types::VehicleState;

use crate::simulation::sensors::{Sensor, SensorError, SensorReading};

// =========================================================================
// == Sensor Packet ==
// =========================================================================

/// One tick's fully assembled readings, keyed by sensor name.
/// Entry order follows sensor registration order; the list is small
/// enough that name lookup is a linear scan.
#[derive(Debug, Clone, Default)]
pub struct SensorPacket {
    entries: Vec<(String, SensorReading)>,
}

impl SensorPacket {
    pub fn get(&self, name: &str) -> Option<&SensorReading> {
        self.entries
            .iter()
            .find(|(entry_name, _)| entry_name == name)
            .map(|(_, reading)| reading)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SensorReading)> {
        self.entries
            .iter()
            .map(|(name, reading)| (name.as_str(), reading))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// =========================================================================
// == Sensor Manager ==
// =========================================================================

/// Owns the registered sensor set and assembles one `SensorPacket` per
/// simulation tick. Registration is append-only; the set is fixed for
/// the duration of a run.
#[derive(Debug, Default)]
pub struct SensorManager {
    sensors: Vec<Box<dyn Sensor>>,
}

impl SensorManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a sensor to the ordered collection. Duplicate names are a
    /// configuration error: the name is the packet key.
    pub fn register(&mut self, sensor: Box<dyn Sensor>) -> Result<(), SensorError> {
        if self.sensors.iter().any(|s| s.name() == sensor.name()) {
            return Err(SensorError::DuplicateName(sensor.name().to_string()));
        }
        debug!(sensor = sensor.name(), "Registered sensor");
        self.sensors.push(sensor);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.sensors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sensors.is_empty()
    }

    /// Reads every registered sensor, in registration order, and returns
    /// the tick's packet. Sensors are read strictly sequentially: later
    /// sensors and external code may assume earlier sensors' state is
    /// final for this tick. A sensor reading `Empty` still occupies its
    /// packet slot.
    pub fn get_data_packet(
        &mut self,
        vehicle: &VehicleState,
        step_index: u64,
        step_duration: f64,
    ) -> Result<SensorPacket, SensorError> {
        let mut packet = SensorPacket::default();
        for sensor in &mut self.sensors {
            let reading = sensor.read(vehicle, step_index, step_duration)?;
            packet
                .entries
                .push((sensor.name().to_string(), reading));
        }
        Ok(packet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::sensors::NullSensor;

    #[test]
    fn packet_has_one_entry_per_sensor_in_registration_order() {
        let mut manager = SensorManager::new();
        manager.register(Box::new(NullSensor::new("imu_stub"))).unwrap();
        manager.register(Box::new(NullSensor::new("gps_stub"))).unwrap();
        manager.register(Box::new(NullSensor::new("gyro_stub"))).unwrap();

        let packet = manager
            .get_data_packet(&VehicleState::at_rest(), 0, 0.01)
            .unwrap();

        assert_eq!(packet.len(), 3);
        let names: Vec<&str> = packet.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["imu_stub", "gps_stub", "gyro_stub"]);
        // Empty readings still occupy their slots.
        assert!(packet.iter().all(|(_, reading)| reading.is_empty()));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut manager = SensorManager::new();
        manager.register(Box::new(NullSensor::new("imu"))).unwrap();
        let err = manager
            .register(Box::new(NullSensor::new("imu")))
            .unwrap_err();
        assert!(matches!(err, SensorError::DuplicateName(name) if name == "imu"));
        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn lookup_is_by_name() {
        let mut manager = SensorManager::new();
        manager.register(Box::new(NullSensor::new("imu"))).unwrap();

        let packet = manager
            .get_data_packet(&VehicleState::at_rest(), 0, 0.01)
            .unwrap();
        assert_eq!(packet.get("imu"), Some(&SensorReading::Empty));
        assert_eq!(packet.get("missing"), None);
    }
}
