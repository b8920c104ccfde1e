// Naming and layout constants for the quadruple generator

/// Prefix of generator-allocated temporaries (`t0`, `t1`, ...)
pub const TEMP_PREFIX: &str = "t";

/// Prefix of generator-allocated labels (`L0`, `L1`, ...)
pub const LABEL_PREFIX: &str = "L";

/// Literal added or subtracted by a step statement (`i++`, `i--`)
pub const STEP_AMOUNT: &str = "1";

/// Column widths of the diagnostic listing
pub const OPERATOR_WIDTH: usize = 8;
pub const OPERAND_WIDTH: usize = 9;
