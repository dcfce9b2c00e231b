pub const TOKEN_SEPARATOR: char = ',';
pub const NAME_SEPARATOR: char = ':';
pub const RANGE_SEPARATOR: char = '-';

/// Characters trimmed around tokens, names and range components.
pub const WHITESPACE: [char; 2] = [' ', '\t'];
