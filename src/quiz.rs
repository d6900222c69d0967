//! "Who's that Pokémon?" rounds and the session state machine around them.

use std::collections::HashSet;
use std::ops::RangeInclusive;
use std::sync::Arc;
use std::time::Duration;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::api::Gateway;
use crate::error::{ApiError, DrawStage, QuizError};
use crate::model::Creature;
use crate::normalize::normalize;

pub const OPTION_COUNT: usize = 4;
pub const DEFAULT_DRAW_ATTEMPTS: u32 = 10;
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(1000);

/// Highest id any quiz draws from when no generation is chosen.
pub const MAX_QUIZ_ID: u32 = 1010;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Generation {
    Kanto,
    Johto,
    Hoenn,
    Sinnoh,
    Unova,
    Kalos,
    Alola,
    Galar,
    Paldea,
}

impl Generation {
    pub const ALL: [Generation; 9] = [
        Generation::Kanto,
        Generation::Johto,
        Generation::Hoenn,
        Generation::Sinnoh,
        Generation::Unova,
        Generation::Kalos,
        Generation::Alola,
        Generation::Galar,
        Generation::Paldea,
    ];

    pub fn range(self) -> RangeInclusive<u32> {
        match self {
            Generation::Kanto => 1..=151,
            Generation::Johto => 152..=251,
            Generation::Hoenn => 252..=386,
            Generation::Sinnoh => 387..=493,
            Generation::Unova => 494..=649,
            Generation::Kalos => 650..=721,
            Generation::Alola => 722..=809,
            Generation::Galar => 810..=905,
            Generation::Paldea => 906..=MAX_QUIZ_ID,
        }
    }

    /// 1-based generation number, as shown in the menu.
    pub fn number(self) -> u8 {
        match self {
            Generation::Kanto => 1,
            Generation::Johto => 2,
            Generation::Hoenn => 3,
            Generation::Sinnoh => 4,
            Generation::Unova => 5,
            Generation::Kalos => 6,
            Generation::Alola => 7,
            Generation::Galar => 8,
            Generation::Paldea => 9,
        }
    }

    pub fn from_number(number: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|gen| gen.number() == number)
    }

    pub fn label(self) -> &'static str {
        match self {
            Generation::Kanto => "Kanto",
            Generation::Johto => "Johto",
            Generation::Hoenn => "Hoenn",
            Generation::Sinnoh => "Sinnoh",
            Generation::Unova => "Unova",
            Generation::Kalos => "Kalos",
            Generation::Alola => "Alola",
            Generation::Galar => "Galar",
            Generation::Paldea => "Paldea",
        }
    }
}

pub fn draw_range(generation: Option<Generation>) -> RangeInclusive<u32> {
    generation.map_or(1..=MAX_QUIZ_ID, Generation::range)
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizOption {
    pub id: u32,
    pub name: String,
    pub is_correct: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizRound {
    pub target: Creature,
    pub options: Vec<QuizOption>,
}

impl QuizRound {
    pub fn correct_option(&self) -> Option<&QuizOption> {
        self.options.iter().find(|option| option.is_correct)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DrawPolicy {
    /// Target draws before giving up; distractors get three times as many.
    pub max_attempts: u32,
    /// Pause between failed target draws.
    pub retry_delay: Duration,
}

impl Default for DrawPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_DRAW_ATTEMPTS,
            retry_delay: DEFAULT_RETRY_DELAY,
        }
    }
}

pub struct QuizEngine {
    gateway: Arc<Gateway>,
    policy: DrawPolicy,
}

impl QuizEngine {
    pub fn new(gateway: Arc<Gateway>, policy: DrawPolicy) -> Self {
        Self { gateway, policy }
    }

    pub fn policy(&self) -> DrawPolicy {
        self.policy
    }

    pub async fn draw_round<R: Rng + Send>(
        &self,
        generation: Option<Generation>,
        rng: &mut R,
    ) -> Result<QuizRound, QuizError> {
        self.draw_in_range(draw_range(generation), rng).await
    }

    pub(crate) async fn draw_in_range<R: Rng + Send>(
        &self,
        range: RangeInclusive<u32>,
        rng: &mut R,
    ) -> Result<QuizRound, QuizError> {
        let target = self.draw_target(&range, rng).await?;
        let distractors = self.draw_distractors(&range, target.id, rng).await?;

        let mut options = Vec::with_capacity(OPTION_COUNT);
        options.push(QuizOption {
            id: target.id,
            name: target.name.clone(),
            is_correct: true,
        });
        options.extend(distractors.into_iter().map(|creature| QuizOption {
            id: creature.id,
            name: creature.name,
            is_correct: false,
        }));
        options.shuffle(rng);

        tracing::debug!(target = target.id, "quiz round drawn");
        Ok(QuizRound { target, options })
    }

    async fn draw_target<R: Rng + Send>(
        &self,
        range: &RangeInclusive<u32>,
        rng: &mut R,
    ) -> Result<Creature, QuizError> {
        let max_attempts = self.policy.max_attempts.max(1);
        let mut last_error = None;
        for attempt in 1..=max_attempts {
            let id = rng.random_range(range.clone());
            match self.fetch_candidate(id).await {
                Ok(creature) => return Ok(creature),
                Err(err) => {
                    tracing::warn!(id, attempt, error = %err, "quiz target draw failed");
                    last_error = Some(err);
                }
            }
            if attempt < max_attempts && !self.policy.retry_delay.is_zero() {
                tokio::time::sleep(self.policy.retry_delay).await;
            }
        }
        Err(QuizError::DrawExhausted {
            stage: DrawStage::Target,
            attempts: max_attempts,
            last_error,
        })
    }

    async fn draw_distractors<R: Rng + Send>(
        &self,
        range: &RangeInclusive<u32>,
        target_id: u32,
        rng: &mut R,
    ) -> Result<Vec<Creature>, QuizError> {
        let wanted = OPTION_COUNT - 1;
        let max_attempts = self.policy.max_attempts.max(1).saturating_mul(3);
        let range_len = (range.end().saturating_sub(*range.start()) + 1) as usize;

        let mut visited = HashSet::from([target_id]);
        let mut distractors = Vec::with_capacity(wanted);
        let mut attempts = 0;
        let mut last_error = None;
        while distractors.len() < wanted && attempts < max_attempts && visited.len() < range_len {
            let id = rng.random_range(range.clone());
            if !visited.insert(id) {
                continue;
            }
            attempts += 1;
            match self.fetch_candidate(id).await {
                Ok(creature) => distractors.push(creature),
                Err(err) => {
                    tracing::warn!(id, error = %err, "skipping distractor");
                    last_error = Some(err);
                }
            }
        }

        if distractors.len() < wanted {
            return Err(QuizError::DrawExhausted {
                stage: DrawStage::Distractor,
                attempts,
                last_error,
            });
        }
        Ok(distractors)
    }

    async fn fetch_candidate(&self, id: u32) -> Result<Creature, ApiError> {
        let raw = self.gateway.get_creature(&id.to_string()).await?;
        if raw.sprites.is_none() {
            return Err(ApiError::malformed(format!("pokemon/{id}"), "record has no sprites"));
        }
        Ok(normalize(&raw))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuizPhase {
    #[default]
    NotStarted,
    Drawing,
    InRound,
    RoundResolved,
}

/// Score keeping and phase transitions for one quiz run.
///
/// Each draw is tagged with `round_seq`; only the round for the current
/// sequence is accepted, so a restart or newer draw invalidates older ones.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSession {
    pub phase: QuizPhase,
    pub generation: Option<Generation>,
    pub score: u32,
    pub answered: u32,
    pub round_seq: u64,
    pub round: Option<QuizRound>,
    pub selected: Option<u32>,
}

impl QuizSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begins drawing the first round. Returns the sequence the draw must carry.
    pub fn start(&mut self, generation: Option<Generation>) -> Option<u64> {
        if self.phase != QuizPhase::NotStarted {
            return None;
        }
        self.generation = generation;
        Some(self.begin_draw())
    }

    pub fn round_ready(&mut self, seq: u64, round: QuizRound) -> bool {
        if seq != self.round_seq || self.phase != QuizPhase::Drawing {
            return false;
        }
        self.round = Some(round);
        self.phase = QuizPhase::InRound;
        true
    }

    /// Whether a failed draw for `seq` still concerns this session.
    pub fn is_current_draw(&self, seq: u64) -> bool {
        seq == self.round_seq && self.phase == QuizPhase::Drawing
    }

    /// Records an answer. Returns whether it was correct, or `None` when
    /// no round is awaiting an answer.
    pub fn answer(&mut self, option_id: u32) -> Option<bool> {
        if self.phase != QuizPhase::InRound {
            return None;
        }
        let correct = self
            .round
            .as_ref()?
            .options
            .iter()
            .find(|option| option.id == option_id)?
            .is_correct;
        self.selected = Some(option_id);
        self.answered += 1;
        if correct {
            self.score += 1;
        }
        self.phase = QuizPhase::RoundResolved;
        Some(correct)
    }

    pub fn next(&mut self) -> Option<u64> {
        if self.phase != QuizPhase::RoundResolved {
            return None;
        }
        Some(self.begin_draw())
    }

    /// Starts a fresh draw after a failed one.
    pub fn redraw(&mut self) -> Option<u64> {
        if self.phase != QuizPhase::Drawing {
            return None;
        }
        Some(self.begin_draw())
    }

    pub fn restart(&mut self) {
        let round_seq = self.round_seq + 1;
        *self = Self {
            round_seq,
            ..Self::default()
        };
    }

    /// Percentage of correct answers, rounded; `0` before any answer.
    pub fn accuracy(&self) -> u32 {
        if self.answered == 0 {
            return 0;
        }
        ((self.score as f64 / self.answered as f64) * 100.0).round() as u32
    }

    fn begin_draw(&mut self) -> u64 {
        self.round_seq += 1;
        self.round = None;
        self.selected = None;
        self.phase = QuizPhase::Drawing;
        self.round_seq
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{creature_json, mon_name, StubTransport, TEST_API_BASE};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn engine_with(stub: StubTransport) -> (Arc<StubTransport>, QuizEngine) {
        let stub = Arc::new(stub);
        let gateway = Arc::new(Gateway::new(stub.clone(), TEST_API_BASE));
        let policy = DrawPolicy {
            max_attempts: 5,
            retry_delay: Duration::ZERO,
        };
        (stub, QuizEngine::new(gateway, policy))
    }

    fn stub_with_ids(ids: RangeInclusive<u32>) -> StubTransport {
        let stub = StubTransport::new();
        for id in ids {
            stub.insert_creature(creature_json(id, &mon_name(id), &["normal"]));
        }
        stub
    }

    fn round(ids: [u32; 4], correct: u32) -> QuizRound {
        QuizRound {
            target: Creature {
                id: correct,
                name: mon_name(correct),
                types: vec!["normal".into()],
                image: String::new(),
            },
            options: ids
                .iter()
                .map(|id| QuizOption {
                    id: *id,
                    name: mon_name(*id),
                    is_correct: *id == correct,
                })
                .collect(),
        }
    }

    #[test]
    fn generation_ranges_cover_known_ids() {
        assert_eq!(Generation::Kanto.range(), 1..=151);
        assert_eq!(Generation::Paldea.range(), 906..=1010);
        assert_eq!(draw_range(None), 1..=1010);
        assert_eq!(Generation::from_number(4), Some(Generation::Sinnoh));
        assert_eq!(Generation::from_number(0), None);
        for pair in Generation::ALL.windows(2) {
            assert_eq!(*pair[0].range().end() + 1, *pair[1].range().start());
        }
    }

    #[tokio::test]
    async fn round_has_four_distinct_options_with_one_correct() {
        let (_, engine) = engine_with(stub_with_ids(1..=151));
        let mut rng = StdRng::seed_from_u64(7);

        let round = engine
            .draw_round(Some(Generation::Kanto), &mut rng)
            .await
            .unwrap();

        assert_eq!(round.options.len(), OPTION_COUNT);
        let ids: HashSet<_> = round.options.iter().map(|option| option.id).collect();
        assert_eq!(ids.len(), OPTION_COUNT);
        assert!(ids.iter().all(|id| (1..=151).contains(id)));
        let correct: Vec<_> = round.options.iter().filter(|o| o.is_correct).collect();
        assert_eq!(correct.len(), 1);
        assert_eq!(correct[0].id, round.target.id);
    }

    #[tokio::test]
    async fn tiny_range_uses_every_id() {
        let (_, engine) = engine_with(stub_with_ids(1..=4));
        let mut rng = StdRng::seed_from_u64(11);

        let round = engine.draw_in_range(1..=4, &mut rng).await.unwrap();

        let mut ids: Vec<_> = round.options.iter().map(|option| option.id).collect();
        ids.sort();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn target_gives_up_after_max_attempts() {
        let (stub, engine) = engine_with(StubTransport::new());
        let mut rng = StdRng::seed_from_u64(3);

        let error = engine
            .draw_round(Some(Generation::Johto), &mut rng)
            .await
            .unwrap_err();

        let QuizError::DrawExhausted {
            stage,
            attempts,
            last_error,
        } = error;
        assert_eq!(stage, DrawStage::Target);
        assert_eq!(attempts, 5);
        assert!(last_error.is_some_and(|err| err.is_not_found()));
        assert_eq!(stub.requests().len(), 5);
    }

    #[tokio::test]
    async fn record_without_sprites_is_rejected() {
        let mut record = creature_json(1, "bulbasaur", &["grass"]);
        record.as_object_mut().unwrap().remove("sprites");
        let stub = StubTransport::new();
        stub.insert_creature(record);
        let (_, engine) = engine_with(stub);
        let mut rng = StdRng::seed_from_u64(1);

        let QuizError::DrawExhausted { last_error, .. } =
            engine.draw_in_range(1..=1, &mut rng).await.unwrap_err();
        assert!(matches!(last_error, Some(ApiError::MalformedPayload { .. })));
    }

    #[tokio::test]
    async fn too_few_candidates_exhausts_distractors() {
        let (_, engine) = engine_with(stub_with_ids(1..=3));
        let mut rng = StdRng::seed_from_u64(5);

        let QuizError::DrawExhausted { stage, .. } =
            engine.draw_in_range(1..=3, &mut rng).await.unwrap_err();
        assert_eq!(stage, DrawStage::Distractor);
    }

    #[tokio::test]
    async fn failed_distractors_are_skipped() {
        let stub = stub_with_ids(1..=6);
        stub.fail(
            format!("{TEST_API_BASE}/pokemon/2"),
            ApiError::fetch("pokemon/2", "HTTP 500"),
        );
        let (_, engine) = engine_with(stub);
        let mut rng = StdRng::seed_from_u64(9);

        // The target may be the failing id too; retries are allowed for it.
        let round = engine.draw_in_range(1..=6, &mut rng).await.unwrap();
        assert!(round.options.iter().all(|option| option.id != 2));
        assert_eq!(round.options.len(), OPTION_COUNT);
    }

    #[test]
    fn session_walks_through_a_round() {
        let mut session = QuizSession::new();
        let seq = session.start(Some(Generation::Kanto)).unwrap();
        assert_eq!(session.phase, QuizPhase::Drawing);

        assert!(session.round_ready(seq, round([1, 2, 3, 4], 3)));
        assert_eq!(session.phase, QuizPhase::InRound);

        assert_eq!(session.answer(3), Some(true));
        assert_eq!(session.phase, QuizPhase::RoundResolved);
        assert_eq!((session.score, session.answered), (1, 1));

        // Second answer is ignored.
        assert_eq!(session.answer(1), None);
        assert_eq!((session.score, session.answered), (1, 1));

        let next = session.next().unwrap();
        assert!(next > seq);
        assert!(session.round_ready(next, round([5, 6, 7, 8], 5)));
        assert_eq!(session.answer(6), Some(false));
        assert_eq!((session.score, session.answered), (1, 2));
        assert_eq!(session.accuracy(), 50);
        assert_eq!(session.generation, Some(Generation::Kanto));
    }

    #[test]
    fn outdated_rounds_are_discarded() {
        let mut session = QuizSession::new();
        let first = session.start(None).unwrap();
        let second = session.redraw().unwrap();

        assert!(!session.round_ready(first, round([1, 2, 3, 4], 1)));
        assert!(session.round_ready(second, round([1, 2, 3, 4], 2)));

        session.restart();
        assert!(!session.round_ready(second, round([1, 2, 3, 4], 2)));
        assert!(!session.is_current_draw(second));
    }

    #[test]
    fn restart_clears_score_and_generation() {
        let mut session = QuizSession::new();
        let seq = session.start(Some(Generation::Galar)).unwrap();
        session.round_ready(seq, round([1, 2, 3, 4], 1));
        session.answer(1);

        session.restart();

        assert_eq!(session.phase, QuizPhase::NotStarted);
        assert_eq!((session.score, session.answered), (0, 0));
        assert_eq!(session.generation, None);
        assert_eq!(session.round, None);
        assert_eq!(session.accuracy(), 0);
    }

    #[test]
    fn transitions_outside_their_phase_do_nothing() {
        let mut session = QuizSession::new();
        assert_eq!(session.answer(1), None);
        assert_eq!(session.next(), None);
        assert_eq!(session.redraw(), None);

        session.start(None);
        assert_eq!(session.start(Some(Generation::Kanto)), None);
        assert_eq!(session.next(), None);
    }
}
