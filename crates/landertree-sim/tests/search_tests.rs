use landertree_core::{SearchAgent, SearchConfig, SearchTree, ShapedReward, rollout};
use landertree_sim::{LanderState, LunarWorld};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn above_target() -> LanderState {
    LanderState::at(400.0, 0.0)
}

#[test]
fn hovering_above_the_pad_commits_to_a_valid_action() {
    let mut agent = SearchAgent::new(
        LunarWorld::default(),
        above_target(),
        SearchConfig::default(),
        42,
    );
    let action = agent.select_action().expect("an action is selected");

    assert!(action.index() < 4);
    let root = agent.tree().root().expect("root");
    assert_eq!(root.children().len(), 4);
    assert_eq!(root.visits(), 1000);
}

#[test]
fn identical_seeds_reproduce_the_decision() {
    let decide = || {
        let mut agent = SearchAgent::new(
            LunarWorld::default(),
            above_target(),
            SearchConfig::default(),
            2024,
        );
        let action = agent.select_action().expect("action");
        let visits = agent
            .tree()
            .root_visit_distribution()
            .expect("distribution");
        (action, visits)
    };

    assert_eq!(decide(), decide());
}

#[test]
fn rollout_from_a_safe_touchdown_scores_the_landing_bonus() {
    let world = LunarWorld::default();
    let mut landed = LanderState::at(400.0, 485.0).with_velocity(0.0, 1.0);
    landed.done = true;

    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let value = rollout(&world, &ShapedReward::default(), &landed, 100, &mut rng);

    assert_eq!(value, 100.0);
}

#[test]
fn rollout_leaves_the_start_state_untouched() {
    let world = LunarWorld::default();
    let start = above_target().with_velocity(0.2, 0.4);
    let copy = start;

    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let _ = rollout(&world, &ShapedReward::default(), &start, 100, &mut rng);

    assert_eq!(start, copy);
}

#[test]
fn lander_tree_survives_persistence() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = SearchConfig {
        iterations: 150,
        ..SearchConfig::default()
    };
    let mut agent = SearchAgent::new(LunarWorld::default(), above_target(), config, 5);
    agent.select_action().expect("action");

    let path = agent.save_tree(dir.path(), Some("lander")).expect("save");
    let restored: SearchTree<LanderState> = landertree_core::load_tree(&path).expect("load");

    let original = agent.tree();
    assert_eq!(restored.node_count(), original.node_count());
    for ((_, a), (_, b)) in original.nodes().zip(restored.nodes()) {
        assert_eq!(a.state(), b.state());
        assert_eq!(a.incoming_action(), b.incoming_action());
        assert_eq!(a.visits(), b.visits());
        assert_eq!(a.total_reward(), b.total_reward());
        assert_eq!(a.children(), b.children());
        assert_eq!(a.parent(), b.parent());
    }
}
