use rand::Rng;

use super::Board;

/// Play up to `plies` uniformly random legal moves on `board`, stopping early
/// if the game ends or a move would finish it. Returns the moves played.
pub fn random_opening<R: Rng + ?Sized>(board: &mut Board, plies: usize, rng: &mut R) -> Vec<usize> {
    let mut played = Vec::with_capacity(plies);
    for _ in 0..plies {
        let legal: Vec<usize> = (0..board.cols())
            .filter(|&col| !board.is_column_full(col))
            .collect();
        if legal.is_empty() {
            break;
        }
        let col = legal[rng.random_range(0..legal.len())];
        if board.play(col).is_err() {
            break;
        }
        if board.winner().is_some() {
            board.undo();
            break;
        }
        played.push(col);
    }
    played
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_opening_is_reproducible() {
        let mut a = Board::new();
        let mut b = Board::new();
        let moves_a = random_opening(&mut a, 10, &mut StdRng::seed_from_u64(7));
        let moves_b = random_opening(&mut b, 10, &mut StdRng::seed_from_u64(7));
        assert_eq!(moves_a, moves_b);
        assert_eq!(a, b);
    }

    #[test]
    fn test_opening_never_ends_the_game() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..50 {
            let mut board = Board::new();
            let moves = random_opening(&mut board, 20, &mut rng);
            assert_eq!(board.move_count(), moves.len());
            assert!(board.winner().is_none());
        }
    }
}
