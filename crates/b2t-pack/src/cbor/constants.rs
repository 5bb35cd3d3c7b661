// Major types, already shifted into the high three bits.
pub const MAJOR_UIN: u8 = 0b000_00000;
pub const MAJOR_NIN: u8 = 0b001_00000;
pub const MAJOR_STR: u8 = 0b011_00000;
pub const MAJOR_ARR: u8 = 0b100_00000;
pub const MAJOR_MAP: u8 = 0b101_00000;

pub const FALSE: u8 = 0xf4;
pub const TRUE: u8 = 0xf5;
pub const NULL: u8 = 0xf6;
pub const FLOAT32: u8 = 0xfa;
pub const FLOAT64: u8 = 0xfb;

/// Whether `value` survives a trip through `f32` unchanged.
pub fn is_f32_roundtrip(value: f64) -> bool {
    (value as f32) as f64 == value
}
