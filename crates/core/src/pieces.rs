//! Pieces module - fixed tetromino shapes
//!
//! Each shape is four offsets from the piece origin, listed in clockwise
//! order around the origin cell. The origin is always one of the four cells,
//! so rotating about it keeps the piece anchored. There are no wall kicks: a
//! rotation that collides is reverted by the caller.

use getris_types::PieceKind;

/// Offset of a single cell relative to the piece origin
pub type CellOffset = (i32, i32);

/// Shape of a piece - 4 cell offsets from the piece origin
pub type PieceShape = [CellOffset; 4];

/// Spawn-orientation offsets of a shape.
pub fn get_shape(kind: PieceKind) -> PieceShape {
    match kind {
        PieceKind::O => [(0, 0), (0, 1), (1, 1), (1, 0)],
        // The origin is the center-left cell, not the center of the bar.
        PieceKind::I => [(0, 0), (-1, 0), (1, 0), (2, 0)],
        PieceKind::T => [(0, 0), (-1, 0), (0, 1), (1, 0)],
        PieceKind::L => [(0, 0), (-1, 0), (1, 1), (1, 0)],
        PieceKind::J => [(0, 0), (-1, 0), (-1, -1), (1, 0)],
        PieceKind::S => [(0, 0), (-1, 0), (0, 1), (1, 1)],
        PieceKind::Z => [(0, 0), (-1, 1), (0, 1), (1, 0)],
    }
}
