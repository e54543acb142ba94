//! SSD1306 OLED Display Driver
//!
//! Text-mode driver for 128x64 SSD1306 panels over I2C. There is no frame
//! buffer: characters are streamed straight into display RAM in horizontal
//! addressing mode while the driver tracks the cursor it left behind.
//!
//! Every bus transaction is two bytes, a control byte ([`cmd::CONTROL_COMMAND`]
//! or [`cmd::CONTROL_DATA`]) followed by a single payload byte.

pub mod cmd;
pub mod font;

use lumenwatch_hal::I2cBus;

use self::font::FONT_WIDTH;

/// Default 7-bit I2C address (0x3D with SA0 pulled high)
pub const DEFAULT_ADDRESS: u8 = 0x3C;

/// Highest page index
pub const MAX_LINE: u8 = 7;

/// Number of segment columns
pub const MAX_SEGMENT: u8 = 128;

/// Number of 8-pixel pages
pub const PAGES: usize = MAX_LINE as usize + 1;

/// Bytes of display RAM (one per page/segment cell)
pub const RAM_SIZE: usize = MAX_SEGMENT as usize * PAGES;

/// Columns consumed by one printed character, spacer included
pub const CELL_WIDTH: u8 = FONT_WIDTH as u8 + 1;

/// Display driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError<E> {
    /// Bus write failed, remaining writes of the operation were skipped
    Transport(E),
    /// Character outside the font table; nothing was written
    UnsupportedGlyph(char),
}

impl<E> From<E> for DisplayError<E> {
    fn from(e: E) -> Self {
        DisplayError::Transport(e)
    }
}

/// Cursor and contrast as last programmed into the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayState {
    /// Current page (0..=MAX_LINE)
    pub line: u8,
    /// Next column to be written (0..=MAX_SEGMENT)
    pub column: u8,
    /// Contrast register value
    pub brightness: u8,
}

impl DisplayState {
    pub const fn new() -> Self {
        Self {
            line: 0,
            column: 0,
            brightness: cmd::DEFAULT_CONTRAST,
        }
    }
}

impl Default for DisplayState {
    fn default() -> Self {
        Self::new()
    }
}

/// SSD1306 OLED driver
pub struct Ssd1306<B> {
    bus: B,
    address: u8,
    state: DisplayState,
}

impl<B> Ssd1306<B>
where
    B: I2cBus,
{
    /// Create a new SSD1306 driver
    ///
    /// No bus traffic happens until [`Ssd1306::initialize`].
    pub fn new(bus: B, address: u8) -> Self {
        Self {
            bus,
            address,
            state: DisplayState::new(),
        }
    }

    /// Tracked cursor and contrast
    pub fn state(&self) -> DisplayState {
        self.state
    }

    /// Give the bus back, e.g. before the transport is torn down
    pub fn release(self) -> B {
        self.bus
    }

    /// Run the bring-up sequence and clear display RAM
    ///
    /// Safe to call again at any time; a failed bring-up can simply be retried.
    pub fn initialize(&mut self) -> Result<(), DisplayError<B::Error>> {
        for &c in cmd::INIT_SEQUENCE.iter() {
            self.command(c)?;
        }
        self.state.brightness = cmd::DEFAULT_CONTRAST;

        // Full-panel window so the clear below covers every cell
        self.set_cursor(0, 0)?;
        self.fill(0x00)
    }

    /// Move the cursor to `line` / `column`
    ///
    /// Out-of-range positions are ignored: no writes, state untouched.
    pub fn set_cursor(&mut self, line: u8, column: u8) -> Result<(), DisplayError<B::Error>> {
        if line > MAX_LINE || column >= MAX_SEGMENT {
            return Ok(());
        }

        self.state.line = line;
        self.state.column = column;

        self.command(cmd::COLUMN_ADDR)?;
        self.command(column)?;
        self.command(MAX_SEGMENT - 1)?;

        self.command(cmd::PAGE_ADDR)?;
        self.command(line)?;
        self.command(MAX_LINE)?;

        Ok(())
    }

    /// Advance to column 0 of the next page, wrapping after the last one
    pub fn goto_next_line(&mut self) -> Result<(), DisplayError<B::Error>> {
        let next = (self.state.line + 1) % (MAX_LINE + 1);
        self.set_cursor(next, 0)
    }

    /// Print one character at the cursor
    ///
    /// `'\n'` moves to the next line. A character that would not fit on the
    /// current line wraps first.
    pub fn print_char(&mut self, c: char) -> Result<(), DisplayError<B::Error>> {
        let glyph = match (c, font::glyph(c)) {
            ('\n', _) => None,
            (_, Some(glyph)) => Some(glyph),
            (_, None) => return Err(DisplayError::UnsupportedGlyph(c)),
        };

        let overflows = self.state.column as usize + CELL_WIDTH as usize > MAX_SEGMENT as usize;
        if overflows || glyph.is_none() {
            self.goto_next_line()?;
        }

        let Some(glyph) = glyph else {
            return Ok(());
        };

        for &column in glyph.iter() {
            self.data(column)?;
            self.state.column += 1;
        }

        // Inter-character spacing
        self.data(0x00)?;
        self.state.column += 1;

        Ok(())
    }

    /// Print a string, newlines included
    pub fn print_str(&mut self, text: &str) -> Result<(), DisplayError<B::Error>> {
        for c in text.chars() {
            self.print_char(c)?;
        }
        Ok(())
    }

    /// Write `byte` into every RAM cell
    ///
    /// Streams through the current addressing window; with the full-panel
    /// window the RAM pointer ends where it started.
    pub fn fill(&mut self, byte: u8) -> Result<(), DisplayError<B::Error>> {
        for _ in 0..RAM_SIZE {
            self.data(byte)?;
        }
        Ok(())
    }

    /// Set display contrast (0-255)
    pub fn set_brightness(&mut self, value: u8) -> Result<(), DisplayError<B::Error>> {
        self.command(cmd::SET_CONTRAST)?;
        self.command(value)?;
        self.state.brightness = value;
        Ok(())
    }

    /// Turn display on/off
    pub fn set_display_on(&mut self, on: bool) -> Result<(), DisplayError<B::Error>> {
        if on {
            self.command(cmd::DISPLAY_ON)
        } else {
            self.command(cmd::DISPLAY_OFF)
        }
    }

    /// Send a command to the display
    fn command(&mut self, c: u8) -> Result<(), DisplayError<B::Error>> {
        self.bus.write(self.address, &[cmd::CONTROL_COMMAND, c])?;
        Ok(())
    }

    /// Send one byte of display RAM data
    fn data(&mut self, d: u8) -> Result<(), DisplayError<B::Error>> {
        self.bus.write(self.address, &[cmd::CONTROL_DATA, d])?;
        Ok(())
    }
}
