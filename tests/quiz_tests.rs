//! Quiz rounds drawn through the public engine and session API.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use dexquiz::api::Gateway;
use dexquiz::quiz::{DrawPolicy, Generation, QuizEngine, QuizPhase, QuizSession, OPTION_COUNT};
use dexquiz::testing::{creature_json, mon_name, StubTransport, TEST_API_BASE};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn kanto_engine() -> QuizEngine {
    let stub = StubTransport::new();
    for id in Generation::Kanto.range() {
        stub.insert_creature(creature_json(id, &mon_name(id), &["normal"]));
    }
    let gateway = Arc::new(Gateway::new(Arc::new(stub), TEST_API_BASE));
    QuizEngine::new(
        gateway,
        DrawPolicy {
            max_attempts: 10,
            retry_delay: Duration::ZERO,
        },
    )
}

#[tokio::test]
async fn every_round_is_well_formed() {
    let engine = kanto_engine();
    let mut rng = StdRng::seed_from_u64(2024);

    for _ in 0..25 {
        let round = engine
            .draw_round(Some(Generation::Kanto), &mut rng)
            .await
            .unwrap();

        assert_eq!(round.options.len(), OPTION_COUNT);
        let ids: HashSet<_> = round.options.iter().map(|option| option.id).collect();
        assert_eq!(ids.len(), OPTION_COUNT);
        let correct = round.correct_option().unwrap();
        assert_eq!(correct.id, round.target.id);
        assert_eq!(round.options.iter().filter(|o| o.is_correct).count(), 1);
    }
}

#[tokio::test]
async fn session_plays_through_drawn_rounds() {
    let engine = kanto_engine();
    let mut rng = StdRng::seed_from_u64(42);
    let mut session = QuizSession::new();

    let mut seq = session.start(Some(Generation::Kanto)).unwrap();
    for round_number in 0..3 {
        let round = engine
            .draw_round(session.generation, &mut rng)
            .await
            .unwrap();
        let wrong = round.options.iter().find(|o| !o.is_correct).unwrap().id;
        let right = round.correct_option().unwrap().id;
        assert!(session.round_ready(seq, round));

        let pick = if round_number == 1 { wrong } else { right };
        session.answer(pick).unwrap();
        let before = session.clone();
        assert_eq!(session.answer(right), None);
        assert_eq!(session, before);

        seq = session.next().unwrap();
    }

    assert_eq!((session.score, session.answered), (2, 3));
    assert_eq!(session.accuracy(), 67);

    session.restart();
    assert_eq!((session.score, session.answered), (0, 0));
    assert_eq!(session.phase, QuizPhase::NotStarted);
}

#[tokio::test]
async fn correct_option_position_is_shuffled() {
    let engine = kanto_engine();
    let mut rng = StdRng::seed_from_u64(7);
    let rounds = 200;
    let mut positions = [0usize; OPTION_COUNT];

    for _ in 0..rounds {
        let round = engine
            .draw_round(Some(Generation::Kanto), &mut rng)
            .await
            .unwrap();
        let index = round.options.iter().position(|o| o.is_correct).unwrap();
        positions[index] += 1;
    }

    for (index, hits) in positions.iter().enumerate() {
        assert!(
            *hits > rounds * 15 / 100,
            "correct option landed at {index} only {hits} times: {positions:?}"
        );
    }
}
