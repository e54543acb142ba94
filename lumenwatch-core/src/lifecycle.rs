//! Boot and shutdown screens

use lumenwatch_hal::I2cBus;

use crate::ssd1306::{DisplayError, Ssd1306};

/// Bring the panel up and show the boot message
pub fn welcome<B: I2cBus>(display: &mut Ssd1306<B>, message: &str) -> Result<(), DisplayError<B::Error>> {
    display.initialize()?;
    display.set_cursor(0, 0)?;
    display.print_str(message)
}

/// Show the goodbye message, then blank the panel and switch it off
///
/// Must run before the bus is released. The panel is cleared and switched
/// off even if the message could not be printed; that error is returned
/// afterwards.
pub fn farewell<B: I2cBus>(display: &mut Ssd1306<B>, message: &str) -> Result<(), DisplayError<B::Error>> {
    let printed = display.print_str(message);
    display.set_cursor(0, 0)?;
    display.fill(0x00)?;
    display.set_display_on(false)?;
    printed
}
