/// Record delimiters
pub const NEW_LINE: u8 = b'\n';
pub const SEMI_COLON: u8 = b';';
pub const MINUS: u8 = b'-';
pub const DECIMAL_POINT: u8 = b'.';

/// Processing defaults
pub const DEFAULT_CHUNK_SIZE: u64 = 100 * 1024 * 1024; // 100MB
pub const DEFAULT_MAX_LINE_SIZE: usize = 300;
pub const DEFAULT_BUFFER_SIZE: usize = 8192 * 16; // 128KB

/// Expected distinct stations per chunk, used to presize chunk maps
pub const EXPECTED_STATIONS: usize = 1024;

/// Temperatures are stored in tenths of a degree
pub const TENTHS_PER_DEGREE: i64 = 10;

/// Report format names
pub const FORMAT_BRACED: &str = "braced";
pub const FORMAT_LINES: &str = "lines";
pub const FORMAT_JSON: &str = "json";
