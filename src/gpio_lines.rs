// Button and LED line handles from the GPIO character device
use label_printer_lib::button_loop::InputPin;
use label_printer_lib::config::GpioConfig;
use label_printer_lib::LabelError;
use linux_embedded_hal::gpio_cdev::{Chip, LineHandle, LineRequestFlags};

pub struct ButtonLine {
    line: LineHandle,
}

/// Requested as an output and held low; nothing drives it yet
pub struct LedLine {
    _line: LineHandle,
}

/// Both lines, released together when dropped
pub struct GpioLines {
    pub button: ButtonLine,
    pub led: LedLine,
}

impl GpioLines {
    pub fn open(gpio: &GpioConfig) -> Result<Self, LabelError> {
        let mut chip = Chip::new(&gpio.chip_path).map_err(|e| {
            LabelError::DeviceUnavailable(format!("{}: {}", gpio.chip_path.display(), e))
        })?;
        let button = ButtonLine::new(&mut chip, gpio.button_offset, &gpio.consumer)?;
        let led = LedLine::new(&mut chip, gpio.led_offset, &gpio.consumer)?;
        Ok(Self { button, led })
    }
}

fn request(
    chip: &mut Chip,
    offset: u32,
    flags: LineRequestFlags,
    consumer: &str,
) -> Result<LineHandle, LabelError> {
    chip.get_line(offset)
        .map_err(|e| LabelError::LineRequestFailed(format!("line {}: {}", offset, e)))?
        .request(flags, 0, consumer)
        .map_err(|e| LabelError::LineRequestFailed(format!("line {}: {}", offset, e)))
}

impl ButtonLine {
    pub fn new(chip: &mut Chip, offset: u32, consumer: &str) -> Result<Self, LabelError> {
        let line = request(chip, offset, LineRequestFlags::INPUT, consumer)?;
        Ok(Self { line })
    }
}

impl LedLine {
    pub fn new(chip: &mut Chip, offset: u32, consumer: &str) -> Result<Self, LabelError> {
        let line = request(chip, offset, LineRequestFlags::OUTPUT, consumer)?;
        Ok(Self { _line: line })
    }
}

impl InputPin for ButtonLine {
    fn is_high(&self) -> Result<bool, LabelError> {
        let value = self
            .line
            .get_value()
            .map_err(|e| LabelError::LineReadFailed(e.to_string()))?;
        Ok(value == 1)
    }
}
