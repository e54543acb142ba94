//! SSD1306 control bytes and command opcodes

/// Control byte: the payload is command bytes
pub const CONTROL_COMMAND: u8 = 0x00;
/// Control byte: the payload is display RAM data
pub const CONTROL_DATA: u8 = 0x40;

pub const DISPLAY_OFF: u8 = 0xAE;
pub const DISPLAY_ON: u8 = 0xAF;
pub const SET_CLOCK_DIV: u8 = 0xD5;
pub const SET_MUX_RATIO: u8 = 0xA8;
pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
pub const SET_START_LINE: u8 = 0x40;
pub const SET_CHARGE_PUMP: u8 = 0x8D;
pub const SET_MEMORY_MODE: u8 = 0x20;
pub const SET_SEG_REMAP: u8 = 0xA1;
pub const SET_COM_SCAN_DEC: u8 = 0xC8;
pub const SET_COM_PINS: u8 = 0xDA;
pub const SET_CONTRAST: u8 = 0x81;
pub const SET_PRECHARGE: u8 = 0xD9;
pub const SET_VCOM_DETECT: u8 = 0xDB;
pub const RESUME_RAM: u8 = 0xA4;
pub const SET_NORMAL: u8 = 0xA6;
pub const DEACTIVATE_SCROLL: u8 = 0x2E;
pub const COLUMN_ADDR: u8 = 0x21;
pub const PAGE_ADDR: u8 = 0x22;

/// Contrast programmed by the bring-up sequence
pub const DEFAULT_CONTRAST: u8 = 0x80;

/// Power-on sequence, sent one command byte per transaction
pub const INIT_SEQUENCE: [u8; 26] = [
    DISPLAY_OFF,
    SET_CLOCK_DIV,
    0x80, // Recommended divide ratio / oscillator frequency
    SET_MUX_RATIO,
    0x3F, // 64 COM lines
    SET_DISPLAY_OFFSET,
    0x00,
    SET_START_LINE,
    SET_CHARGE_PUMP,
    0x14, // Enable charge pump while on
    SET_MEMORY_MODE,
    0x00, // Horizontal addressing
    SET_SEG_REMAP,    // Column 127 mapped to SEG0
    SET_COM_SCAN_DEC, // Scan COM63 -> COM0
    SET_COM_PINS,
    0x12, // Alternative COM config, no left/right remap
    SET_CONTRAST,
    DEFAULT_CONTRAST,
    SET_PRECHARGE,
    0xF1, // Phase 1 = 15 DCLK, phase 2 = 1 DCLK
    SET_VCOM_DETECT,
    0x20, // ~0.77 Vcc
    RESUME_RAM,
    SET_NORMAL,
    DEACTIVATE_SCROLL,
    DISPLAY_ON,
];
