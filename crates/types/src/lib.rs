//! Core types module - shared data structures and constants
//!
//! Everything here is plain data with no behaviour beyond lookups, so it can be used by the
//! engine, the input mapping and the terminal view alike.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//! - **Spawn position**: (3, 0), the top-left corner of the piece's bounding box
//!
//! # Timing and Progression
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Driver frame interval (~60 FPS) |
//! | `BASE_DROP_MS` | 900 | Gravity interval at level 1 |
//! | `DROP_INTERVAL_STEP_MS` | 70 | Interval reduction per level |
//! | `DROP_INTERVAL_FLOOR_MS` | 200 | Fastest gravity interval |
//! | `LINES_PER_LEVEL` | 10 | Cleared lines per level |
//!
//! # Examples
//!
//! ```
//! use blocktris_types::{GameAction, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let piece = PieceKind::from_str("t").unwrap();
//! assert_eq!(piece, PieceKind::T);
//! assert_eq!(piece.code(), 6);
//!
//! let action = GameAction::from_str("hardDrop").unwrap();
//! assert_eq!(action, GameAction::HardDrop);
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Spawn column of a piece's bounding box (horizontally centered on a 10-wide board)
pub const SPAWN_X: i8 = 3;

/// Spawn row of a piece's bounding box
pub const SPAWN_Y: i8 = 0;

/// Largest shape matrix (the I piece is 4x4)
pub const MAX_SHAPE_SIZE: usize = 4;

/// Driver frame interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Gravity interval at level 1
pub const BASE_DROP_MS: u32 = 900;

/// Gravity interval reduction per level above 1
pub const DROP_INTERVAL_STEP_MS: u32 = 70;

/// Gravity never gets faster than this
pub const DROP_INTERVAL_FLOOR_MS: u32 = 200;

/// Cleared lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Points for clearing N rows with a single lock (index = N)
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Horizontal nudges tried, in order, after a rotation
pub const KICK_OFFSETS: [i8; 5] = [0, -1, 1, -2, 2];

/// Background colour of an empty board cell (#111827)
pub const EMPTY_COLOR: (u8, u8, u8) = (0x11, 0x18, 0x27);

/// The seven tetromino piece kinds
///
/// The declaration order fixes the numeric cell code used by snapshots:
/// I=1, J=2, L=3, O=4, S=5, T=6, Z=7 (0 is an empty cell).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All kinds in catalog order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blocktris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("x"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Uppercase display letter
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::J => "J",
            PieceKind::L => "L",
            PieceKind::O => "O",
            PieceKind::S => "S",
            PieceKind::T => "T",
            PieceKind::Z => "Z",
        }
    }

    /// Non-zero cell code (1..=7)
    pub fn code(&self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::J => 2,
            PieceKind::L => 3,
            PieceKind::O => 4,
            PieceKind::S => 5,
            PieceKind::T => 6,
            PieceKind::Z => 7,
        }
    }

    /// Inverse of [`PieceKind::code`]; 0 and unknown codes map to `None`
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(PieceKind::I),
            2 => Some(PieceKind::J),
            3 => Some(PieceKind::L),
            4 => Some(PieceKind::O),
            5 => Some(PieceKind::S),
            6 => Some(PieceKind::T),
            7 => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Display colour as RGB
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            PieceKind::I => (0x67, 0xe8, 0xf9),
            PieceKind::J => (0x93, 0xc5, 0xfd),
            PieceKind::L => (0xfc, 0xd3, 0x4d),
            PieceKind::O => (0xfb, 0xbf, 0x24),
            PieceKind::S => (0x86, 0xef, 0xac),
            PieceKind::T => (0xc0, 0x84, 0xfc),
            PieceKind::Z => (0xfc, 0xa5, 0xa5),
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell locked with the specified piece kind
pub type Cell = Option<PieceKind>;

/// Game actions a driver can apply to one game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Drop piece one row (locks if it cannot descend)
    SoftDrop,
    /// Drop piece to the lowest valid row and lock it
    HardDrop,
    /// Rotate piece 90° clockwise with horizontal kicks
    Rotate,
    /// Toggle pause state
    Pause,
    /// Start a new game
    Restart,
}

impl GameAction {
    /// Parse action from its camelCase name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blocktris_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("ROTATE"), Some(GameAction::Rotate));
    /// assert_eq!(GameAction::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotate" => Some(GameAction::Rotate),
            "pause" => Some(GameAction::Pause),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    /// camelCase name
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::Rotate => "rotate",
            GameAction::Pause => "pause",
            GameAction::Restart => "restart",
        }
    }
}

/// Identifies one game inside a multi-player session (0-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerId(pub u8);

impl PlayerId {
    pub const ONE: PlayerId = PlayerId(0);
    pub const TWO: PlayerId = PlayerId(1);

    pub fn index(&self) -> usize {
        self.0 as usize
    }
}
