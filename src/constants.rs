// Board defaults
pub const DEFAULT_ROWS: usize = 6;
pub const DEFAULT_COLS: usize = 9;
pub const MIN_BOARD_DIMENSION: usize = 2;

// Win rule: a side can only win once more than this many orbs are on the board
pub const WIN_ORB_THRESHOLD: u32 = 3;

// Search defaults
pub const DEFAULT_SEARCH_DEPTH: u32 = 3;
pub const DEFAULT_HEURISTIC_WEIGHT: f64 = 1.0;

// Match simulator defaults
pub const DEFAULT_MAX_TURNS: u32 = 500;
pub const BLUE_SEED_OFFSET: u64 = 0x9E37_79B9_7F4A_7C15;
