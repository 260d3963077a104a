//! One round of Bulls and Cows.
//!
//! ```text
//! AwaitingGuess --"*"--------------> Aborted
//!       |  ^
//!  valid|  |invalid / < 4 bulls
//!       v  |
//!    Scoring ------4 bulls---------> Won
//! ```

use std::{
    fmt,
    time::{Duration, Instant},
};

use rand::Rng;

use crate::core::{
    constants::{ABORT_TOKEN, DECIMAL_PRECISION, MIN_TIME_TO_WIN, SECRET_LEN},
    data::{GameResult, round_to},
    error::{GameError, GuessError},
    rng::SecretNumber,
};

/// Bulls and cows of a single guess.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScoreTally {
    pub bulls: u8,
    pub cows: u8,
}

impl ScoreTally {
    /// Each guessed digit found in the secret is a bull when the positions
    /// match and a cow otherwise.
    #[must_use]
    pub fn score(secret: &SecretNumber, guess: &[u8; SECRET_LEN]) -> Self {
        let mut tally = Self::default();
        for (i, &digit) in guess.iter().enumerate() {
            if secret.contains(digit) {
                if secret.digits()[i] == digit {
                    tally.bulls += 1;
                } else {
                    tally.cows += 1;
                }
            }
        }
        tally
    }

    #[inline]
    #[must_use]
    pub fn is_win(&self) -> bool {
        usize::from(self.bulls) == SECRET_LEN
    }
}

/// `| 1 bull | 2 cows`
impl fmt::Display for ScoreTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (n, unit) in [(self.bulls, "bull"), (self.cows, "cow")] {
            let plural = if n == 1 { "" } else { "s" };
            write!(f, "| {n} {unit}{plural} ")?;
        }
        Ok(())
    }
}

/// Check every rule and report all that fail, in a fixed order.
///
/// # Errors
/// Each broken [`GuessError`] rule.
pub fn validate_guess(input: &str) -> Result<[u8; SECRET_LEN], Vec<GuessError>> {
    let chars: Vec<char> = input.chars().collect();
    let mut errors = Vec::new();

    if chars.is_empty() || !chars.iter().all(char::is_ascii_digit) {
        errors.push(GuessError::NotNumeric);
    }
    if chars.len() != SECRET_LEN {
        errors.push(GuessError::WrongLength);
    }
    if chars.first() == Some(&'0') {
        errors.push(GuessError::LeadingZero);
    }
    let distinct = chars
        .iter()
        .enumerate()
        .all(|(i, c)| !chars[..i].contains(c));
    if !distinct {
        errors.push(GuessError::RepeatedDigit);
    }

    if !errors.is_empty() {
        return Err(errors);
    }
    let mut digits = [0u8; SECRET_LEN];
    for (slot, c) in digits.iter_mut().zip(&chars) {
        *slot = c.to_digit(10).map_or(0, |d| d as u8);
    }
    Ok(digits)
}

/// Where a round stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameState {
    AwaitingGuess,
    Won,
    Aborted,
}

/// What one submitted line did to the round.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    /// Broken rules; the round goes on and the guess is not counted.
    Invalid(Vec<GuessError>),
    Scored(ScoreTally),
    Won {
        tally: ScoreTally,
        result: GameResult,
    },
    Aborted {
        secret: SecretNumber,
    },
}

/// Elapsed-time clock that only runs once started.
#[derive(Clone, Copy, Debug, Default)]
struct Stopwatch {
    started: Option<Instant>,
}

impl Stopwatch {
    fn start(&mut self) {
        if self.started.is_none() {
            self.started = Some(Instant::now());
        }
    }

    fn elapsed(&self) -> Duration {
        self.started.map(|t| t.elapsed()).unwrap_or_default()
    }
}

/// A single round: the secret, the counters and the state machine.
#[derive(Clone, Debug)]
pub struct Game {
    secret: SecretNumber,
    result: GameResult,
    state: GameState,
    clock: Stopwatch,
}

impl Game {
    /// Fresh round with a random secret. The clock is not running yet.
    pub fn new<R: Rng + ?Sized>(game_id: u64, rng: &mut R) -> Self {
        Self::with_secret(game_id, SecretNumber::generate(rng))
    }

    #[must_use]
    pub fn with_secret(game_id: u64, secret: SecretNumber) -> Self {
        Self {
            secret,
            result: GameResult::provisional(game_id),
            state: GameState::AwaitingGuess,
            clock: Stopwatch::default(),
        }
    }

    /// Start timing. Called when the player is first prompted; later calls
    /// are no-ops.
    pub fn start_clock(&mut self) {
        self.clock.start();
    }

    #[must_use]
    pub fn state(&self) -> GameState {
        self.state
    }
    #[must_use]
    pub fn guesses(&self) -> u32 {
        self.result.n_guesses
    }
    #[must_use]
    pub fn game_id(&self) -> u64 {
        self.result.game_id
    }

    /// Handle one line of player input.
    ///
    /// # Errors
    /// [`GameError::Finished`] once the round was won or aborted.
    pub fn submit(&mut self, input: &str) -> Result<Outcome, GameError> {
        if self.state != GameState::AwaitingGuess {
            return Err(GameError::Finished);
        }
        if input == ABORT_TOKEN {
            self.state = GameState::Aborted;
            return Ok(Outcome::Aborted {
                secret: self.secret,
            });
        }

        let guess = match validate_guess(input) {
            Ok(g) => g,
            Err(errors) => return Ok(Outcome::Invalid(errors)),
        };
        self.result.n_guesses += 1;

        let tally = ScoreTally::score(&self.secret, &guess);
        if !tally.is_win() {
            return Ok(Outcome::Scored(tally));
        }

        // the clock may never have been started when driven programmatically
        self.clock.start();
        let secs = round_to(self.clock.elapsed().as_secs_f64(), DECIMAL_PRECISION);
        self.result.time_to_win = secs.max(MIN_TIME_TO_WIN);
        self.state = GameState::Won;
        Ok(Outcome::Won {
            tally,
            result: self.result,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::game_rng;

    fn secret(d: [u8; 4]) -> SecretNumber {
        SecretNumber::from_digits(d).unwrap()
    }

    #[test]
    fn each_rule_reports_on_its_own() {
        assert_eq!(validate_guess("12a3"), Err(vec![GuessError::NotNumeric]));
        assert_eq!(validate_guess("123"), Err(vec![GuessError::WrongLength]));
        assert_eq!(validate_guess("0123"), Err(vec![GuessError::LeadingZero]));
        assert_eq!(validate_guess("1123"), Err(vec![GuessError::RepeatedDigit]));
        assert_eq!(validate_guess("1234"), Ok([1, 2, 3, 4]));
    }

    #[test]
    fn all_rules_report_together() {
        // four characters long, so only the length rule holds
        assert_eq!(
            validate_guess("01a1"),
            Err(vec![
                GuessError::NotNumeric,
                GuessError::LeadingZero,
                GuessError::RepeatedDigit,
            ])
        );
        assert_eq!(
            validate_guess("01a11"),
            Err(vec![
                GuessError::NotNumeric,
                GuessError::WrongLength,
                GuessError::LeadingZero,
                GuessError::RepeatedDigit,
            ])
        );
        assert_eq!(
            validate_guess("00"),
            Err(vec![
                GuessError::WrongLength,
                GuessError::LeadingZero,
                GuessError::RepeatedDigit,
            ])
        );
        assert_eq!(
            validate_guess(""),
            Err(vec![GuessError::NotNumeric, GuessError::WrongLength])
        );
    }

    #[test]
    fn unicode_digits_are_not_numbers() {
        assert_eq!(validate_guess("１２３４"), Err(vec![GuessError::NotNumeric]));
    }

    #[test]
    fn scoring_counts_bulls_and_cows() {
        let s = secret([1, 2, 3, 4]);
        assert_eq!(
            ScoreTally::score(&s, &[1, 2, 3, 4]),
            ScoreTally { bulls: 4, cows: 0 }
        );
        assert_eq!(
            ScoreTally::score(&s, &[4, 3, 2, 1]),
            ScoreTally { bulls: 0, cows: 4 }
        );
        assert_eq!(
            ScoreTally::score(&s, &[1, 3, 5, 6]),
            ScoreTally { bulls: 1, cows: 1 }
        );
        assert_eq!(
            ScoreTally::score(&s, &[5, 6, 7, 8]),
            ScoreTally { bulls: 0, cows: 0 }
        );
    }

    #[test]
    fn tally_never_exceeds_four() {
        let mut rng = game_rng(Some(3));
        for _ in 0..500 {
            let s = SecretNumber::generate(&mut rng);
            let g = SecretNumber::generate(&mut rng);
            let t = ScoreTally::score(&s, g.digits());
            assert!(usize::from(t.bulls + t.cows) <= SECRET_LEN);
        }
    }

    #[test]
    fn verdict_pluralizes() {
        assert_eq!(
            ScoreTally { bulls: 1, cows: 2 }.to_string(),
            "| 1 bull | 2 cows "
        );
        assert_eq!(
            ScoreTally { bulls: 0, cows: 1 }.to_string(),
            "| 0 bulls | 1 cow "
        );
    }

    #[test]
    fn invalid_guesses_do_not_count() {
        let mut game = Game::with_secret(1, secret([1, 2, 3, 4]));
        let out = game.submit("0123").unwrap();
        assert_eq!(out, Outcome::Invalid(vec![GuessError::LeadingZero]));
        assert_eq!(game.guesses(), 0);
        assert_eq!(game.state(), GameState::AwaitingGuess);
    }

    #[test]
    fn winning_finalizes_result() {
        let mut game = Game::with_secret(9, secret([5, 6, 7, 8]));
        game.start_clock();
        assert_eq!(
            game.submit("5687").unwrap(),
            Outcome::Scored(ScoreTally { bulls: 2, cows: 2 })
        );
        let Outcome::Won { tally, result } = game.submit("5678").unwrap() else {
            panic!("expected a win");
        };
        assert!(tally.is_win());
        assert_eq!(result.game_id, 9);
        assert_eq!(result.n_guesses, 2);
        assert!(result.time_to_win >= MIN_TIME_TO_WIN);
        assert!(result.check_finalized().is_ok());
        assert_eq!(game.state(), GameState::Won);
        assert_eq!(game.submit("1234"), Err(GameError::Finished));
    }

    #[test]
    fn guessing_a_generated_secret_wins() {
        let mut rng = game_rng(Some(11));
        for id in 1..50 {
            let mut game = Game::new(id, &mut rng);
            let answer = game.secret.to_string();
            assert!(matches!(game.submit(&answer), Ok(Outcome::Won { .. })));
        }
    }

    #[test]
    fn abort_reveals_secret_and_ends_round() {
        let mut game = Game::with_secret(1, secret([9, 8, 7, 6]));
        game.submit("1234").unwrap();
        let out = game.submit("*").unwrap();
        assert_eq!(
            out,
            Outcome::Aborted {
                secret: secret([9, 8, 7, 6])
            }
        );
        assert_eq!(game.state(), GameState::Aborted);
        assert_eq!(game.guesses(), 1);
        assert_eq!(game.submit("9876"), Err(GameError::Finished));
    }
}
