use core::time::Duration;

/// Number of words dealt for one puzzle.
pub const BOARD_SIZE: usize = 16;

/// Words per category, and therefore words per guess.
pub const GROUP_SIZE: usize = 4;

/// Cards per visual row of the grid.
pub const ROW_WIDTH: usize = 4;

/// Categories needed to win.
pub const CATEGORY_COUNT: usize = BOARD_SIZE / GROUP_SIZE;

/// Wrong guesses allowed before the session is lost.
pub const MISTAKE_BUDGET: u8 = 4;

/// Age after which a stored snapshot is no longer restored.
pub const SNAPSHOT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// How long a transient message stays visible.
pub const MESSAGE_TTL: Duration = Duration::from_millis(3000);

/// Delay between a guess result and the end-of-game message that follows it.
pub const FOLLOW_UP_DELAY: Duration = Duration::from_millis(1000);
