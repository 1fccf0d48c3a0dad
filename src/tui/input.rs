//! Cursor movement over the four-column board.

use crossterm::event::KeyCode;

/// Items per board row.
pub const COLUMNS: usize = 4;

/// Moves the cursor over `len` unsolved items laid out in rows of four.
///
/// Moves that would leave the board keep the cursor where it is.
pub fn move_cursor(cursor: usize, key: KeyCode, len: usize) -> usize {
    match key {
        KeyCode::Right if cursor % COLUMNS + 1 < COLUMNS && cursor + 1 < len => cursor + 1,
        KeyCode::Left if cursor % COLUMNS > 0 => cursor - 1,
        KeyCode::Down if cursor + COLUMNS < len => cursor + COLUMNS,
        KeyCode::Up if cursor >= COLUMNS => cursor - COLUMNS,
        _ => cursor,
    }
}
