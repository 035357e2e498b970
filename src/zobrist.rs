//! Zobrist keys for position fingerprinting.

use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Fixed seed so fingerprints are stable across runs.
const ZOBRIST_SEED: u64 = 0x9E3779B97F4A7C15;

pub struct ZobristKeys {
    pub piece_keys: [[[u64; 64]; 6]; 2],
    pub castling_keys: [u64; 16],
    pub en_passant_keys: [u64; 8],
    pub black_to_move_key: u64,
}

pub static ZOBRIST: Lazy<ZobristKeys> = Lazy::new(|| {
    let mut rng = StdRng::seed_from_u64(ZOBRIST_SEED);
    let mut piece_keys = [[[0u64; 64]; 6]; 2];
    for color in &mut piece_keys {
        for piece in color.iter_mut() {
            for key in piece.iter_mut() {
                *key = rng.gen();
            }
        }
    }
    let mut castling_keys = [0u64; 16];
    for key in &mut castling_keys {
        *key = rng.gen();
    }
    let mut en_passant_keys = [0u64; 8];
    for key in &mut en_passant_keys {
        *key = rng.gen();
    }
    ZobristKeys {
        piece_keys,
        castling_keys,
        en_passant_keys,
        black_to_move_key: rng.gen(),
    }
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_distinct() {
        assert_ne!(ZOBRIST.piece_keys[0][0][0], ZOBRIST.piece_keys[0][0][1]);
        assert_ne!(ZOBRIST.piece_keys[0][0][0], ZOBRIST.piece_keys[1][0][0]);
        assert_ne!(ZOBRIST.black_to_move_key, 0);
    }
}
