use game_types::{GameError, GameId, SessionStatus};

pub const STARTING_LIVES: u8 = 6;
pub const PLACEHOLDER: char = '_';

/// Word length grows with level: level 1 = 3 letters, level 2 = 4, etc.
pub fn word_length_for_level(level: u32) -> usize {
    2 + level.max(1) as usize
}

/// Display form of the secret word: guessed letters shown, the rest masked,
/// joined with single spaces.
pub fn mask(word: &str, guessed: &[char]) -> String {
    word.chars()
        .map(|c| {
            if guessed.contains(&c) {
                c.to_string()
            } else {
                PLACEHOLDER.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Validate a raw guess payload as a single alphabetic letter,
/// normalized to uppercase.
pub fn normalize_letter(input: &str) -> Result<char, GameError> {
    let mut chars = input.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => Ok(c.to_ascii_uppercase()),
        _ => Err(GameError::InvalidLetter),
    }
}

/// A letter revealed by a hint, with its zero-based position in the word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealedLetter {
    pub letter: char,
    pub position: usize,
}

/// One player's in-progress puzzle. Pure state-transition logic: fetching
/// words and persisting scores happen elsewhere.
#[derive(Debug, Clone)]
pub struct GameSession {
    pub id: GameId,
    word: String,
    pub guessed: Vec<char>,
    pub lives: u8,
    pub status: SessionStatus,
    pub level: u32,
    pub topic: String,
}

impl GameSession {
    pub fn new(id: GameId, word: String, level: u32, topic: String) -> Self {
        Self {
            id,
            word: word.to_uppercase(),
            guessed: Vec::new(),
            lives: STARTING_LIVES,
            status: SessionStatus::Playing,
            level: level.max(1),
            topic,
        }
    }

    pub fn masked(&self) -> String {
        mask(&self.word, &self.guessed)
    }

    pub fn word_length(&self) -> usize {
        self.word.chars().count()
    }

    /// The secret word, disclosed only once the session is terminal.
    pub fn answer(&self) -> Option<&str> {
        self.status.is_terminal().then_some(self.word.as_str())
    }

    /// Process a guessed letter. Repeat guesses are no-ops and never cost a
    /// life; a new letter absent from the word costs one. Returns the status
    /// after the transition.
    pub fn guess(&mut self, input: &str) -> Result<SessionStatus, GameError> {
        if self.status != SessionStatus::Playing {
            return Err(GameError::GameOver);
        }
        let letter = normalize_letter(input)?;

        if !self.guessed.contains(&letter) {
            self.guessed.push(letter);
            if !self.word.contains(letter) {
                self.lives = self.lives.saturating_sub(1);
            }
        }

        if !self.masked().contains(PLACEHOLDER) {
            self.status = SessionStatus::Won;
        } else if self.lives == 0 {
            self.status = SessionStatus::Lost;
        }

        Ok(self.status)
    }

    /// Reveal one not-yet-guessed letter at random, free of charge.
    ///
    /// A hint never flips the session to Won even when it completes the
    /// word; the next guess settles it. Hints also stay available after the
    /// game is over, failing only once every letter is revealed.
    pub fn hint(&mut self) -> Result<RevealedLetter, GameError> {
        let hidden: Vec<usize> = self
            .word
            .chars()
            .enumerate()
            .filter(|(_, c)| !self.guessed.contains(c))
            .map(|(i, _)| i)
            .collect();

        let position = *hidden
            .get(fastrand::usize(..hidden.len().max(1)))
            .ok_or(GameError::AllLettersRevealed)?;
        let letter = self
            .word
            .chars()
            .nth(position)
            .ok_or(GameError::AllLettersRevealed)?;

        if !self.guessed.contains(&letter) {
            self.guessed.push(letter);
        }

        Ok(RevealedLetter { letter, position })
    }

    /// Replace the puzzle with a fresh one a level up. Works regardless of
    /// current status so a player can skip ahead mid-game or after a loss.
    /// The session id and topic are preserved.
    pub fn advance_level(&mut self, new_word: String) {
        self.level += 1;
        self.word = new_word.to_uppercase();
        self.guessed.clear();
        self.lives = STARTING_LIVES;
        self.status = SessionStatus::Playing;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn session(word: &str) -> GameSession {
        GameSession::new(Uuid::new_v4(), word.to_string(), 1, "animals".to_string())
    }

    #[test]
    fn test_mask_hides_unguessed_letters() {
        assert_eq!(mask("CAT", &[]), "_ _ _");
        assert_eq!(mask("CAT", &['A']), "_ A _");
        assert_eq!(mask("CAT", &['C', 'A', 'T']), "C A T");
    }

    #[test]
    fn test_mask_output_length() {
        for word in ["CAT", "BEAR", "TIGER", "PYTHON"] {
            let masked = mask(word, &['A', 'E']);
            assert_eq!(masked.chars().count(), 2 * word.len() - 1);
        }
    }

    #[test]
    fn test_mask_repeated_letters() {
        assert_eq!(mask("SHEEP", &['E']), "_ _ E E _");
    }

    #[test]
    fn test_normalize_letter() {
        assert_eq!(normalize_letter("a"), Ok('A'));
        assert_eq!(normalize_letter(" z "), Ok('Z'));
        assert_eq!(normalize_letter(""), Err(GameError::InvalidLetter));
        assert_eq!(normalize_letter("ab"), Err(GameError::InvalidLetter));
        assert_eq!(normalize_letter("1"), Err(GameError::InvalidLetter));
        assert_eq!(normalize_letter("!"), Err(GameError::InvalidLetter));
    }

    #[test]
    fn test_correct_guesses_win_without_losing_lives() {
        let mut s = session("CAT");
        assert_eq!(s.guess("c").unwrap(), SessionStatus::Playing);
        assert_eq!(s.guess("a").unwrap(), SessionStatus::Playing);
        assert_eq!(s.guess("t").unwrap(), SessionStatus::Won);
        assert_eq!(s.lives, STARTING_LIVES);
        assert_eq!(s.answer(), Some("CAT"));
    }

    #[test]
    fn test_wrong_guesses_lose() {
        let mut s = session("CAT");
        for (i, letter) in ["Z", "Q", "X", "J", "V"].iter().enumerate() {
            assert_eq!(s.guess(letter).unwrap(), SessionStatus::Playing);
            assert_eq!(s.lives as usize, STARTING_LIVES as usize - i - 1);
        }
        assert_eq!(s.guess("K").unwrap(), SessionStatus::Lost);
        assert_eq!(s.lives, 0);
        assert_eq!(s.answer(), Some("CAT"));
    }

    #[test]
    fn test_repeat_guess_is_free() {
        let mut s = session("CAT");
        s.guess("z").unwrap();
        assert_eq!(s.lives, 5);
        s.guess("z").unwrap();
        assert_eq!(s.lives, 5);
        assert_eq!(s.guessed, vec!['Z']);
    }

    #[test]
    fn test_no_guesses_after_game_over() {
        let mut s = session("CAT");
        for letter in ["Z", "Q", "X", "J", "V", "K"] {
            s.guess(letter).unwrap();
        }
        assert_eq!(s.status, SessionStatus::Lost);
        assert_eq!(s.guess("c"), Err(GameError::GameOver));
    }

    #[test]
    fn test_answer_hidden_while_playing() {
        let mut s = session("CAT");
        s.guess("c").unwrap();
        assert_eq!(s.answer(), None);
    }

    #[test]
    fn test_hint_reveals_hidden_letter_without_cost() {
        let mut s = session("CAT");
        s.guess("c").unwrap();
        let revealed = s.hint().unwrap();
        assert_ne!(revealed.letter, 'C');
        assert!("AT".contains(revealed.letter));
        assert!(s.guessed.contains(&revealed.letter));
        assert_eq!(s.lives, STARTING_LIVES);
    }

    #[test]
    fn test_hint_exhaustion() {
        let mut s = session("CAT");
        for _ in 0..3 {
            s.hint().unwrap();
        }
        assert_eq!(s.hint().unwrap_err(), GameError::AllLettersRevealed);
    }

    #[test]
    fn test_hint_completing_word_does_not_win() {
        let mut s = session("CAT");
        s.guess("c").unwrap();
        s.guess("a").unwrap();
        let revealed = s.hint().unwrap();
        assert_eq!(revealed.letter, 'T');
        assert_eq!(revealed.position, 2);
        // Status only settles on the next guess.
        assert_eq!(s.status, SessionStatus::Playing);
        assert_eq!(s.guess("t").unwrap(), SessionStatus::Won);
    }

    #[test]
    fn test_advance_level_resets_state() {
        let mut s = session("CAT");
        for letter in ["Z", "Q", "X", "J", "V", "K"] {
            s.guess(letter).unwrap();
        }
        let id = s.id;

        s.advance_level("BEAR".to_string());
        assert_eq!(s.id, id);
        assert_eq!(s.level, 2);
        assert_eq!(s.lives, STARTING_LIVES);
        assert_eq!(s.status, SessionStatus::Playing);
        assert!(s.guessed.is_empty());
        assert_eq!(s.masked(), "_ _ _ _");
        assert_eq!(s.word_length(), 4);
    }

    #[test]
    fn test_word_length_for_level() {
        assert_eq!(word_length_for_level(1), 3);
        assert_eq!(word_length_for_level(2), 4);
        assert_eq!(word_length_for_level(3), 5);
        assert_eq!(word_length_for_level(0), 3); // clamped to level 1
    }
}
