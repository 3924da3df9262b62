use soup_core::model::card::{Card, parse_cards};
use soup_core::model::deck::Deck;
use soup_core::model::trick::{Trick, TrickBuilder, TrickError, TrickState};
use soup_core::play::Play;

fn card(text: &str) -> Card {
    text.parse().expect("valid card")
}

fn play(text: &str) -> Play {
    Play::from_cards(&parse_cards(text).expect("valid cards")).expect("cards form a play")
}

fn close(builder: &mut TrickBuilder) {
    builder
        .pass()
        .and_then(|b| b.pass())
        .and_then(|b| b.pass())
        .expect("three passes close the trick");
}

#[test]
fn single_lead_walks_with_three_passes() {
    let mut builder = TrickBuilder::lead_card(card("3H"));
    close(&mut builder);
    let trick = builder.finalize().expect("trick ends");
    assert_eq!(trick.len(), 4);
    assert_eq!(trick.points(), 0);
}

#[test]
fn ordinary_climb_up_to_big_joker() {
    let mut builder = TrickBuilder::begin(play("3H")).expect("lead");
    for next in ["4H", "7H", "KH", "2H", "LJ", "BJ"] {
        assert!(builder.is_legal_next(&play(next)), "{next} should climb");
        builder.play_card(card(next)).expect("legal climb");
    }
    close(&mut builder);
    let trick = builder.finalize().expect("trick ends");
    assert_eq!(trick.points(), 10);
    assert_eq!(trick.winning_play(), &Play::single(Card::BIG_JOKER));
}

#[test]
fn every_point_card_in_a_long_climb_is_counted() {
    let mut builder = TrickBuilder::lead_card(card("3H"));
    for next in [
        "4H", "5H", "6H", "7H", "8H", "9H", "10H", "JH", "QH", "KH", "AH", "2H", "LJ", "BJ",
    ] {
        builder.play_card(card(next)).expect("legal climb");
    }
    assert_eq!(builder.points_so_far(), 25);
    close(&mut builder);
    assert_eq!(builder.finalize().expect("trick ends").points(), 25);
}

#[test]
fn duplicate_point_cards_count_twice() {
    let lead = play("KH KC KS 10H 10C");
    let mut builder = TrickBuilder::begin(lead).expect("lead");
    close(&mut builder);
    assert_eq!(builder.finalize().expect("trick ends").points(), 50);
}

#[test]
fn lower_single_is_illegal() {
    let mut builder = TrickBuilder::lead_card(card("5H"));
    let err = builder.play_card(card("3H")).expect_err("3H is lower");
    assert!(matches!(err, TrickError::IllegalPlay { .. }));
    assert_eq!(builder.state(), TrickState::InProgress);
}

#[test]
fn play_after_termination_is_rejected() {
    let mut builder = TrickBuilder::lead_card(card("3H"));
    close(&mut builder);
    assert_eq!(
        builder.pass().expect_err("fourth pass"),
        TrickError::TrickAlreadyTerminated
    );
}

#[test]
fn pass_lead_is_rejected() {
    assert_eq!(
        TrickBuilder::begin(Play::pass()).expect_err("pass cannot lead"),
        TrickError::InvalidLead
    );
}

#[test]
fn finalize_requires_exactly_three_trailing_passes() {
    let builder = TrickBuilder::lead_card(card("3H"));
    let err = builder.finalize().expect_err("no passes yet");
    assert_eq!(
        TrickError::from(err.clone()),
        TrickError::PrematureTermination {
            consecutive_passes: 0
        }
    );

    let mut builder = err.into_builder();
    builder.pass().expect("pass");
    builder.pass().expect("pass");
    builder.play_card(card("4H")).expect("climb resets passes");
    builder.pass().expect("pass");
    builder.pass().expect("pass");
    let builder = builder
        .finalize()
        .expect_err("only two passes since the last play")
        .into_builder();
    assert_eq!(builder.consecutive_passes(), 2);
}

#[test]
fn pairs_trick_across_seats() {
    let mut builder = TrickBuilder::begin(play("5H 5C 6D 6S")).expect("lead");
    builder.pass().expect("pass");
    builder.add_play(play("9H 9C 10D 10S")).expect("higher pairs");
    assert!(!builder.is_legal_next(&play("JH JC")));
    assert!(!builder.is_legal_next(&play("JH JC JD QH QC QD")));
    builder.add_play(play("QH QC KD KS")).expect("higher pairs");
    close(&mut builder);
    let trick = builder.finalize().expect("trick ends");
    assert_eq!(trick.points(), 5 + 5 + 10 + 10 + 10 + 10);
    assert_eq!(trick.winning_play(), &play("QH QC KD KS"));
}

#[test]
fn dealt_hands_feed_a_trick() {
    let deal = Deck::shuffled_with_seed(2024).deal();
    let mut hand = deal.hands[0].clone();
    let lead_card = hand.cards()[0];
    hand.play(&[lead_card]).expect("card comes from the hand");

    let mut builder = TrickBuilder::lead_card(lead_card);
    close(&mut builder);
    let trick: Trick = builder.finalize().expect("trick ends");
    assert_eq!(trick.lead(), &Play::single(lead_card));
    assert_eq!(hand.len(), 25);
}
