//! Game session and combat resolution tests.

use std::sync::{Arc, Mutex};

use yeayeayea_engine::alterations::{Alteration, AlterationEffect, AlterationId, AlterationKind};
use yeayeayea_engine::cards::stats::HEALTH;
use yeayeayea_engine::cards::{CardDefinition, CardId, CardKind, CardRegistry, SlotId};
use yeayeayea_engine::combat::{CombatAction, CombatError, Effect, GameSession};
use yeayeayea_engine::core::{EngineConfig, Phase, Player, PlayerId};
use yeayeayea_engine::events::CombatEvent;
use yeayeayea_engine::persistence::{GameSaveStore, InMemorySaveStore};

const POISON: AlterationId = AlterationId(1);

fn content() -> CardRegistry {
    let mut registry = CardRegistry::new();
    registry.register_alteration(
        Alteration::new(POISON, "Poison", AlterationKind::Debuff)
            .stackable()
            .with_duration(2)
            .with_effect(AlterationEffect::DamageOverTime { value: 10.0 }),
    );
    registry.register(
        CardDefinition::new(CardId::new(1), "Chevalier", CardKind::Personnage)
            .with_stat(HEALTH, 12.0),
    );
    registry.register(CardDefinition::new(CardId::new(2), "Epee", CardKind::Objet));
    registry
}

fn session() -> GameSession {
    GameSession::new(
        vec![Player::new("alice", "Alice"), Player::new("bob", "Bob")],
        EngineConfig::default(),
        Arc::new(content()),
    )
}

fn alice() -> PlayerId {
    PlayerId::new("alice")
}

fn bob() -> PlayerId {
    PlayerId::new("bob")
}

#[test]
fn test_session_starts_with_budget_and_full_bases() {
    let session = session();
    let state = session.state();

    assert_eq!(state.active().id, alice());
    assert_eq!(state.player(&alice()).unwrap().motivation, 10);
    assert_eq!(state.player(&bob()).unwrap().base_motivation, Some(10));
    assert_eq!(session.base(&bob()).unwrap().current_health(), 100.0);
    assert!(session.history().is_empty());
    assert!(!session.is_over());
}

#[test]
fn test_configured_budget_and_health() {
    let config = EngineConfig::default()
        .with_motivation_budget(6)
        .with_base_health(40.0);
    let session = GameSession::new(
        vec![Player::new("alice", "Alice"), Player::new("bob", "Bob")],
        config,
        Arc::new(content()),
    );

    assert_eq!(session.state().player(&alice()).unwrap().motivation, 6);
    assert_eq!(session.base(&alice()).unwrap().max_health(), 40.0);
}

#[test]
fn test_attack_pays_and_damages() {
    let mut session = session();
    let action = CombatAction::new("alice", "bob")
        .with_cost(3)
        .with_label("Fireball")
        .damage(100.0);

    let events = session.perform(&action).unwrap();

    assert_eq!(
        events,
        vec![
            CombatEvent::MotivationSpent {
                player: alice(),
                amount: 3,
                remaining: 7
            },
            CombatEvent::BaseDamaged {
                player: bob(),
                amount: 50.0,
                source: Some("Fireball".into())
            },
        ]
    );
    assert_eq!(session.state().player(&alice()).unwrap().motivation, 7);
    assert_eq!(session.base(&bob()).unwrap().current_health(), 50.0);
    assert_eq!(session.history().len(), 1);
}

#[test]
fn test_insufficient_motivation_changes_nothing() {
    let mut session = session();
    let action = CombatAction::new("alice", "bob").with_cost(11).damage(40.0);

    let err = session.perform(&action).unwrap_err();

    assert_eq!(
        err,
        CombatError::InsufficientMotivation {
            player: alice(),
            cost: 11,
            available: 10
        }
    );
    assert_eq!(session.state().player(&alice()).unwrap().motivation, 10);
    assert_eq!(session.base(&bob()).unwrap().current_health(), 100.0);
    assert!(session.history().is_empty());
}

#[test]
fn test_unknown_alteration_is_rejected_before_payment() {
    let mut session = session();
    let action = CombatAction::new("alice", "bob")
        .with_cost(2)
        .damage(10.0)
        .apply_alteration(AlterationId::new(99));

    assert_eq!(
        session.perform(&action),
        Err(CombatError::UnknownAlteration(AlterationId::new(99)))
    );
    assert_eq!(session.state().player(&alice()).unwrap().motivation, 10);
    assert_eq!(session.base(&bob()).unwrap().current_health(), 100.0);
}

#[test]
fn test_unknown_players_are_rejected() {
    let mut session = session();

    assert_eq!(
        session.perform(&CombatAction::new("carol", "bob")),
        Err(CombatError::UnknownPlayer(PlayerId::new("carol")))
    );
    assert_eq!(
        session.perform(&CombatAction::new("alice", "carol")),
        Err(CombatError::UnknownPlayer(PlayerId::new("carol")))
    );
}

#[test]
fn test_next_turn_rotates_and_renews() {
    let mut session = session();
    session
        .perform(&CombatAction::new("alice", "bob").with_cost(10))
        .unwrap();

    let events = session.next_turn();
    assert_eq!(
        events,
        vec![CombatEvent::TurnStarted {
            player: bob(),
            turn: 1
        }]
    );

    session.next_turn();
    assert_eq!(session.state().active().id, alice());
    assert_eq!(session.state().player(&alice()).unwrap().motivation, 10);
    assert_eq!(session.state().turn_count, 2);
}

#[test]
fn test_poison_ticks_on_owner_turn_end_then_expires() {
    let mut session = session();
    let events = session
        .perform(&CombatAction::new("alice", "bob").apply_alteration(POISON))
        .unwrap();
    assert_eq!(
        events,
        vec![CombatEvent::AlterationApplied {
            player: bob(),
            alteration: POISON,
            stack_count: 1
        }]
    );

    // Alice ends her turn: bob's base is untouched
    session.next_turn();
    assert_eq!(session.base(&bob()).unwrap().current_health(), 100.0);

    // Bob ends his turn: poison ticks
    let events = session.next_turn();
    assert_eq!(
        events[0],
        CombatEvent::BaseDamaged {
            player: bob(),
            amount: 5.0,
            source: Some("Poison".into())
        }
    );
    assert!(session.base(&bob()).unwrap().has_alteration(POISON));

    session.next_turn();
    let events = session.next_turn();
    assert!(events.contains(&CombatEvent::AlterationExpired {
        player: bob(),
        alteration: POISON
    }));
    assert_eq!(session.base(&bob()).unwrap().current_health(), 90.0);
    assert!(!session.base(&bob()).unwrap().has_alteration(POISON));
}

#[test]
fn test_stacking_poison() {
    let mut session = session();
    let poison = CombatAction::new("alice", "bob").apply_alteration(POISON);
    session.perform(&poison).unwrap();
    let events = session.perform(&poison).unwrap();

    assert_eq!(
        events,
        vec![CombatEvent::AlterationApplied {
            player: bob(),
            alteration: POISON,
            stack_count: 2
        }]
    );
}

#[test]
fn test_remove_alteration_effect() {
    let mut session = session();
    session
        .perform(&CombatAction::new("alice", "bob").apply_alteration(POISON))
        .unwrap();

    let cleanse = CombatAction::new("bob", "bob").with_effect(Effect::RemoveAlteration {
        alteration: POISON,
    });
    let events = session.perform(&cleanse).unwrap();
    assert_eq!(
        events,
        vec![CombatEvent::AlterationRemoved {
            player: bob(),
            alteration: POISON
        }]
    );

    // Removing again is silent
    assert!(session.perform(&cleanse).unwrap().is_empty());
}

#[test]
fn test_motivation_modifier_applies_on_next_renewal() {
    let mut session = session();
    let banner = CombatAction::new("alice", "alice")
        .with_label("Banner")
        .with_effect(Effect::MotivationModifier {
            value: 50.0,
            is_percentage: true,
            duration: Some(1),
        });
    let events = session.perform(&banner).unwrap();
    assert!(matches!(
        events[0],
        CombatEvent::ModifierAdded { is_percentage: true, .. }
    ));

    session.next_turn();
    session.next_turn();
    assert_eq!(session.state().player(&alice()).unwrap().motivation, 15);

    session.next_turn();
    session.next_turn();
    assert_eq!(session.state().player(&alice()).unwrap().motivation, 10);
}

#[test]
fn test_destroying_a_base_decides_the_game() {
    let mut session = session();
    assert_eq!(session.winner(), None);

    let events = session
        .perform(&CombatAction::new("alice", "bob").damage(500.0))
        .unwrap();
    assert_eq!(events.last(), Some(&CombatEvent::BaseDestroyed { player: bob() }));

    // No second destruction event
    let events = session
        .perform(&CombatAction::new("alice", "bob").damage(10.0))
        .unwrap();
    assert!(!events.contains(&CombatEvent::BaseDestroyed { player: bob() }));

    assert!(session.is_over());
    assert_eq!(session.winner(), Some(&alice()));
}

#[test]
fn test_three_player_winner_needs_two_destroyed() {
    let mut session = GameSession::new(
        vec![
            Player::new("alice", "Alice"),
            Player::new("bob", "Bob"),
            Player::new("carol", "Carol"),
        ],
        EngineConfig::default(),
        Arc::new(content()),
    );

    session
        .perform(&CombatAction::new("alice", "bob").damage(500.0))
        .unwrap();
    assert_eq!(session.winner(), None);
    assert!(!session.is_over());

    session
        .perform(&CombatAction::new("alice", "carol").damage(500.0))
        .unwrap();
    assert_eq!(session.winner(), Some(&alice()));
}

#[test]
fn test_combat_log_receives_events_in_order() {
    let mut session = session();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let id = session
        .log_mut()
        .subscribe(move |event| sink.lock().unwrap().push(event.clone()));

    let events = session
        .perform(&CombatAction::new("alice", "bob").with_cost(1).damage(20.0))
        .unwrap();
    let turn = session.next_turn();

    let expected: Vec<_> = events.into_iter().chain(turn).collect();
    assert_eq!(*seen.lock().unwrap(), expected);

    assert!(session.log_mut().unsubscribe(id));
    session.next_turn();
    assert_eq!(seen.lock().unwrap().len(), expected.len());
}

#[test]
fn test_undo_restores_previous_state() {
    let mut session = session();
    session.change_phase(Phase::Combat);
    session
        .perform(&CombatAction::new("alice", "bob").with_cost(4))
        .unwrap();

    assert!(session.undo());
    assert_eq!(session.state().player(&alice()).unwrap().motivation, 10);
    assert_eq!(session.state().phase, Phase::Combat);

    assert!(session.undo());
    assert_eq!(session.state().phase, Phase::Main);
    assert!(!session.undo());
}

#[test]
fn test_spawn_card_gives_personnage_slots() {
    let mut session = session();

    let knight = session.spawn_card(CardId::new(1)).unwrap();
    assert_eq!(knight.object_slots.as_ref().map(|s| s.len()), Some(3));
    assert_eq!(knight.current_health, 12.0);

    let sword = session.spawn_card(CardId::new(2)).unwrap();
    assert!(sword.object_slots.is_none());
    assert_ne!(sword.instance_id, knight.instance_id);

    assert!(session.spawn_card(CardId::new(42)).is_none());
}

#[test]
fn test_session_snapshot_round_trips_through_save_store() {
    let mut session = session();
    session
        .perform(&CombatAction::new("alice", "bob").with_cost(2).damage(10.0))
        .unwrap();
    session.next_turn();

    let mut store = InMemorySaveStore::new();
    let id = store
        .save("user-1", session.state(), session.history())
        .unwrap();
    let saved = store.load(id).unwrap();

    assert_eq!(&saved.state, session.state());
    assert_eq!(&saved.history, session.history());
    assert_eq!(saved.history.len(), 2);
}

#[test]
fn test_object_is_carried_by_one_card_at_a_time() {
    let mut session = session();
    let mut first = session.spawn_card(CardId::new(1)).unwrap();
    let mut second = session.spawn_card(CardId::new(1)).unwrap();
    let sword = Arc::new(session.spawn_card(CardId::new(2)).unwrap());

    assert!(session.equip(&mut first, sword.clone(), None));
    assert_eq!(session.holder_of(sword.instance_id), Some(first.instance_id));

    assert!(!session.equip(&mut second, sword.clone(), None));
    assert_eq!(second.equipped_objects().count(), 0);

    let released = session.unequip(&mut first, SlotId::new(1)).unwrap();
    assert_eq!(released.instance_id, sword.instance_id);
    assert_eq!(session.holder_of(sword.instance_id), None);

    assert!(session.equip(&mut second, sword.clone(), Some(SlotId::new(2))));
    assert_eq!(session.holder_of(sword.instance_id), Some(second.instance_id));
}

#[test]
fn test_rejected_equip_is_not_tracked() {
    let mut session = session();
    let mut sword_holder = session.spawn_card(CardId::new(2)).unwrap();
    let sword = Arc::new(session.spawn_card(CardId::new(2)).unwrap());

    assert!(!session.equip(&mut sword_holder, sword.clone(), None));
    assert_eq!(session.holder_of(sword.instance_id), None);
}
