/// Key of the first line of every versioned deck file
pub const VERSION_KEY: &str = "Pcp_File_Version";

/// Floats below this magnitude are written in exponent notation
pub const EXPONENT_BELOW: f64 = 1.0e-4;
/// Floats at or above this magnitude are written in exponent notation
pub const EXPONENT_FROM: f64 = 1.0e9;

/// Boolean tokens
pub const TRUE: &str = "t";
pub const FALSE: &str = "f";
