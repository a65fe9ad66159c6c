use std::sync::Arc;

use game_core::{
    AgentRecord, AgentState, Condition, DecisionContext, EngineConfig, EntityRef, Personality,
    Timestamp, Transition, TransitionTable, Vec2,
};
use runtime::{
    AgentDriver, FileSnapshotRepository, InMemorySnapshotRepository, SnapshotRepository, presets,
};

fn at(ms: f64) -> Timestamp {
    Timestamp::from_millis(ms).unwrap()
}

fn wounded_fleer() -> AgentRecord {
    let driver = AgentDriver::default();
    let mut agent = AgentRecord::builder(EntityRef(11), Personality::Defensive)
        .home(Vec2::new(-5.0, 0.0))
        .patrol_path(vec![Vec2::ZERO, Vec2::new(0.0, 50.0)])
        .behavior(Arc::new(presets::coward()))
        .build(Timestamp::ZERO);
    agent.set_target(EntityRef(2), Some(Vec2::new(40.0, 0.0)));
    agent.record_damage(EntityRef(2), 45.0);
    agent.record_damage(EntityRef(3), 10.0);
    agent.add_transition(Transition::new(
        AgentState::Fleeing,
        AgentState::Dead,
        Condition::custom(|_, ctx| ctx.health_ratio <= 0.0),
    ));

    let mut ctx = DecisionContext::new().with_enemies(1).with_distance(40.0);
    driver
        .tick(&mut agent, &mut ctx, at(100.0), Vec2::ZERO, Vec2::new(40.0, 0.0))
        .unwrap();
    let mut ctx = DecisionContext::new()
        .with_enemies(1)
        .with_distance(40.0)
        .with_health(0.1);
    driver
        .tick(&mut agent, &mut ctx, at(200.0), Vec2::ZERO, Vec2::new(40.0, 0.0))
        .unwrap();
    agent
}

#[test]
fn file_repository_resumes_a_fleeing_agent() {
    let dir = tempfile::tempdir().unwrap();
    let repo = FileSnapshotRepository::new(dir.path().join("agents")).unwrap();

    let agent = wounded_fleer();
    assert_eq!(agent.current_state(), AgentState::Fleeing);
    repo.save_agent(&agent).unwrap();
    assert_eq!(repo.list_ids().unwrap(), vec![EntityRef(11)]);

    let mut restored = repo
        .load_agent(EntityRef(11), &EngineConfig::default())
        .unwrap()
        .unwrap();
    assert_eq!(restored.snapshot(), agent.snapshot());
    assert_eq!(restored.highest_threat(), Some(EntityRef(2)));
    assert_eq!(restored.cooldown_until(AgentState::Fleeing), Some(at(5200.0)));

    // Trees and custom rules are not persisted.
    assert!(restored.behavior_tree().is_none());
    assert_eq!(
        restored.transitions().len(),
        TransitionTable::default_table().len()
    );
    restored.attach_behavior(Arc::new(presets::coward()));

    let driver = AgentDriver::default();
    let mut ctx = DecisionContext::new().with_health(0.0);
    let decision = driver
        .tick(&mut restored, &mut ctx, at(300.0), Vec2::ZERO, Vec2::new(40.0, 0.0))
        .unwrap();
    assert_eq!(decision.state, AgentState::Idle);
}

#[test]
fn repositories_agree() {
    let dir = tempfile::tempdir().unwrap();
    let file = FileSnapshotRepository::new(dir.path()).unwrap();
    let memory = InMemorySnapshotRepository::new();
    let repos: [&dyn SnapshotRepository; 2] = [&file, &memory];

    let agent = wounded_fleer();
    for repo in repos {
        repo.save_agent(&agent).unwrap();
        assert!(repo.exists(EntityRef(11)));
        assert_eq!(repo.load(EntityRef(11)).unwrap(), Some(agent.snapshot()));
        assert_eq!(repo.load(EntityRef(12)).unwrap(), None);

        repo.delete(EntityRef(11)).unwrap();
        assert!(!repo.exists(EntityRef(11)));
        assert!(repo.list_ids().unwrap().is_empty());
    }
}

#[test]
fn json_export_matches_binary() {
    let dir = tempfile::tempdir().unwrap();
    let repo = FileSnapshotRepository::new(dir.path()).unwrap();
    let agent = wounded_fleer();
    repo.save_agent(&agent).unwrap();

    let loaded = repo.load(EntityRef(11)).unwrap().unwrap();
    let json = loaded.to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["current_state"], "Fleeing");
    assert_eq!(value["memory"].as_array().map(Vec::len), Some(2));
}
