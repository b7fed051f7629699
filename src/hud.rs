//! HUD text shown by the front ends

pub fn score_label(score: u64) -> String {
    format!("Score: {}", score)
}

pub fn next_label(size: u32) -> String {
    format!("Next: {}", size)
}

/// Message for the game-over notification
pub fn game_over_message(score: u64) -> String {
    format!("Game Over! Your score: {}", score)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(score_label(0), "Score: 0");
        assert_eq!(next_label(40), "Next: 40");
        assert_eq!(game_over_message(130), "Game Over! Your score: 130");
    }
}
