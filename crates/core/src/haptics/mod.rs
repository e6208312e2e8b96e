use crate::HapticsConfig;

/// A single short haptic actuation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pulse {
    pub duration_millis: u64,
    /// `None` selects the device's default intensity.
    pub intensity: Option<u8>,
}

impl Pulse {
    pub fn with_default_intensity(duration_millis: u64) -> Self {
        Self {
            duration_millis,
            intensity: None,
        }
    }
}

/// Optional capability interface over a platform vibration device.
pub trait HapticDevice: Send {
    fn pulse(&mut self, pulse: Pulse);
}

/// Emits one short pulse per polling tick while playback sits inside the
/// configured activity window. Stateless beyond the window check; with no
/// device attached every tick is a no-op.
pub struct PulseDriver {
    device: Option<Box<dyn HapticDevice>>,
    config: HapticsConfig,
}

impl PulseDriver {
    pub fn new(device: Option<Box<dyn HapticDevice>>, config: HapticsConfig) -> Self {
        Self { device, config }
    }

    pub fn pulse_period_ms(&self) -> u64 {
        self.config.pulse_period_ms
    }

    /// One polling tick; returns whether a pulse was emitted.
    pub fn tick(&mut self, elapsed_millis: u64, timeline_active: bool) -> bool {
        let Some(device) = self.device.as_mut() else {
            return false;
        };

        if !timeline_active {
            return false;
        }

        let window = self.config.window_start_ms..=self.config.window_end_ms;
        if !window.contains(&elapsed_millis) {
            return false;
        }

        device.pulse(Pulse::with_default_intensity(self.config.pulse_millis));
        true
    }
}

impl std::fmt::Debug for PulseDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PulseDriver")
            .field("has_device", &self.device.is_some())
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct CountingDevice {
        pulses: Arc<Mutex<Vec<Pulse>>>,
    }

    impl HapticDevice for CountingDevice {
        fn pulse(&mut self, pulse: Pulse) {
            self.pulses.lock().unwrap().push(pulse);
        }
    }

    fn driver_with_counter() -> (PulseDriver, Arc<Mutex<Vec<Pulse>>>) {
        let device = CountingDevice::default();
        let pulses = device.pulses.clone();
        let driver = PulseDriver::new(Some(Box::new(device)), HapticsConfig::default());
        (driver, pulses)
    }

    #[test]
    fn pulses_only_inside_the_activity_window() {
        let (mut driver, pulses) = driver_with_counter();

        assert!(!driver.tick(0, true));
        assert!(driver.tick(17_000, true));
        assert!(driver.tick(120_000, true));
        assert!(driver.tick(250_000, true));
        assert!(!driver.tick(260_000, true));

        assert_eq!(pulses.lock().unwrap().len(), 3);
    }

    #[test]
    fn pulse_uses_configured_duration_and_default_intensity() {
        let (mut driver, pulses) = driver_with_counter();

        driver.tick(20_000, true);

        let recorded = pulses.lock().unwrap();
        assert_eq!(recorded[0].duration_millis, 40);
        assert_eq!(recorded[0].intensity, None);
    }

    #[test]
    fn inactive_timeline_suppresses_pulses() {
        let (mut driver, pulses) = driver_with_counter();

        assert!(!driver.tick(20_000, false));
        assert!(pulses.lock().unwrap().is_empty());
    }

    #[test]
    fn missing_device_is_silently_ignored() {
        let mut driver = PulseDriver::new(None, HapticsConfig::default());
        assert!(!driver.tick(20_000, true));
    }
}
