use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::fixtures::{FallingPoint, Point};
use crate::{ActionId, NodeStats, SearchTree, StateModel, TreeError, TreePolicyMode};

fn expanded_root(seed: u64) -> (SearchTree<Point>, FallingPoint) {
    let model = FallingPoint::default();
    let mut tree = SearchTree::new(Point::at(0.0, 0.0));
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    tree.expand(tree.root_id(), &model, &mut rng)
        .expect("root expands");
    (tree, model)
}

fn set_stats(tree: &mut SearchTree<Point>, child: usize, visits: u64, total_reward: f64) {
    let node_id = if child == usize::MAX {
        tree.root_id()
    } else {
        tree.root().expect("root").children()[child]
    };
    *tree.node_mut(node_id).expect("node").stats_mut() = NodeStats::from_parts(visits, total_reward);
}

#[test]
fn expansion_creates_one_child_per_action_in_order() {
    for seed in 0..16 {
        let (tree, model) = expanded_root(seed);
        let root = tree.root().expect("root");
        assert_eq!(root.children().len(), 4);

        for (idx, &child_id) in root.children().iter().enumerate() {
            let child = tree.node(child_id).expect("child");
            assert_eq!(child.incoming_action(), Some(ActionId::from(idx)));
            assert_eq!(child.parent(), Some(tree.root_id()));
            assert_eq!(child.depth(), 1);
            assert_eq!(child.visits(), 0);
            assert_eq!(child.total_reward(), 0.0);
            assert_eq!(
                child.state(),
                &model.transition(root.state(), ActionId::from(idx))
            );
        }
    }
}

#[test]
fn expansion_returns_a_fresh_child_and_is_not_repeated() {
    let model = FallingPoint::default();
    let mut tree = SearchTree::new(Point::at(0.0, 0.0));
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    let picked = tree
        .expand(tree.root_id(), &model, &mut rng)
        .expect("root expands");
    assert!(tree.root().expect("root").children().contains(&picked));

    let again = tree
        .expand(tree.root_id(), &model, &mut rng)
        .expect("second expand is a no-op");
    assert!(tree.root().expect("root").children().contains(&again));
    assert_eq!(tree.node_count(), 5);
}

#[test]
fn expansion_picks_children_uniformly_not_always_the_first() {
    let model = FallingPoint::default();
    let mut seen = [false; 4];
    for seed in 0..64 {
        let mut tree = SearchTree::new(Point::at(0.0, 0.0));
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let picked = tree.expand(tree.root_id(), &model, &mut rng).expect("expand");
        let action = tree
            .node(picked)
            .expect("child")
            .incoming_action()
            .expect("child has action");
        seen[action.index()] = true;
    }
    assert_eq!(seen, [true; 4]);
}

#[test]
fn zero_visit_child_gets_a_finite_bonus_that_can_win() {
    let (mut tree, _) = expanded_root(0);
    set_stats(&mut tree, usize::MAX, 100, 50.0);
    set_stats(&mut tree, 0, 100, 50.0);
    set_stats(&mut tree, 1, 0, 0.0);
    set_stats(&mut tree, 2, 100, -500.0);
    set_stats(&mut tree, 3, 100, -500.0);

    let children = tree.root().expect("root").children().to_vec();
    let visited = tree.node(children[0]).expect("child").stats().ucb_score(100, true);
    let fresh = tree.node(children[1]).expect("child").stats().ucb_score(100, true);

    // 50/101 + sqrt(2 ln 101 / 101) vs 0 + sqrt(2 ln 101 / 1)
    assert!((visited - (50.0 / 101.0 + (2.0 * 101f64.ln() / 101.0).sqrt())).abs() < 1e-12);
    assert!((fresh - (2.0 * 101f64.ln()).sqrt()).abs() < 1e-12);
    assert!(fresh.is_finite());
    assert!(fresh > visited);

    let explore = tree.best_child(tree.root_id(), true).expect("best child");
    assert_eq!(explore, children[1]);

    let exploit = tree.best_child(tree.root_id(), false).expect("best child");
    assert_eq!(exploit, children[0]);
}

#[test]
fn heavily_exploited_sibling_can_outscore_an_unvisited_child() {
    let (mut tree, _) = expanded_root(0);
    set_stats(&mut tree, usize::MAX, 10, 1000.0);
    set_stats(&mut tree, 0, 10, 1000.0);

    let children = tree.root().expect("root").children().to_vec();
    let best = tree.best_child(tree.root_id(), true).expect("best child");
    assert_eq!(best, children[0]);
}

#[test]
fn equal_scores_go_to_the_lowest_action() {
    let (tree, _) = expanded_root(7);
    let children = tree.root().expect("root").children().to_vec();

    assert_eq!(tree.best_child(tree.root_id(), true), Ok(children[0]));
    assert_eq!(tree.best_child(tree.root_id(), false), Ok(children[0]));
}

#[test]
fn best_child_of_unexpanded_node_is_an_error() {
    let tree = SearchTree::new(Point::at(0.0, 0.0));
    assert_eq!(
        tree.best_child(tree.root_id(), true),
        Err(TreeError::NotExpanded {
            node_id: tree.root_id()
        })
    );
}

#[test]
fn backpropagation_updates_the_whole_path_only() {
    let model = FallingPoint::default();
    let mut tree = SearchTree::new(Point::at(0.0, 0.0));
    let mut rng = ChaCha8Rng::seed_from_u64(0);

    let child = tree.expand(tree.root_id(), &model, &mut rng).expect("expand");
    let grandchild = tree.expand(child, &model, &mut rng).expect("expand");

    let updated = tree.backpropagate(grandchild, -2.5).expect("backprop");
    assert_eq!(updated, 3);

    for node_id in [grandchild, child, tree.root_id()] {
        let node = tree.node(node_id).expect("node");
        assert_eq!(node.visits(), 1);
        assert_eq!(node.total_reward(), -2.5);
    }

    let untouched: u64 = tree
        .root()
        .expect("root")
        .children()
        .iter()
        .filter(|&&id| id != child)
        .map(|&id| tree.node(id).expect("node").visits())
        .sum();
    assert_eq!(untouched, 0);
}

#[test]
fn best_root_action_requires_children() {
    let tree = SearchTree::new(Point::at(0.0, 0.0));
    assert_eq!(tree.best_root_action_by_visits(), Err(TreeError::EmptyRoot));
}

#[test]
fn best_root_action_prefers_visits_and_breaks_ties_by_order() {
    let (mut tree, _) = expanded_root(3);
    set_stats(&mut tree, 1, 5, 0.0);
    set_stats(&mut tree, 2, 5, 100.0);
    assert_eq!(tree.best_root_action_by_visits(), Ok(ActionId::from(1)));

    set_stats(&mut tree, 3, 6, -100.0);
    assert_eq!(tree.best_root_action_by_visits(), Ok(ActionId::from(3)));
    assert_eq!(tree.root_visit_distribution(), Ok(vec![0, 5, 5, 6]));
}

#[test]
fn single_step_policy_never_grows_past_depth_one() {
    let model = FallingPoint::default();
    let mut tree = SearchTree::new(Point::at(0.0, 0.0));
    let mut rng = ChaCha8Rng::seed_from_u64(0);

    for _ in 0..50 {
        let leaf = tree
            .tree_policy(&model, TreePolicyMode::SingleStep, &mut rng)
            .expect("policy");
        tree.backpropagate(leaf, 1.0).expect("backprop");
    }

    assert_eq!(tree.node_count(), 5);
    assert_eq!(tree.max_depth(), 1);
}

#[test]
fn descend_policy_expands_below_the_root() {
    let model = FallingPoint::default();
    let mut tree = SearchTree::new(Point::at(0.0, 0.0));
    let mut rng = ChaCha8Rng::seed_from_u64(0);

    for _ in 0..50 {
        let leaf = tree
            .tree_policy(&model, TreePolicyMode::Descend, &mut rng)
            .expect("policy");
        tree.backpropagate(leaf, 1.0).expect("backprop");
    }

    assert!(tree.node_count() > 5);
    assert!(tree.max_depth() >= 2);
}

#[test]
fn terminal_root_is_returned_without_expansion() {
    let model = FallingPoint::default();
    let mut landed = Point::at(0.0, 10.0);
    landed.done = true;
    let mut tree = SearchTree::new(landed);
    let mut rng = ChaCha8Rng::seed_from_u64(0);

    let leaf = tree
        .tree_policy(&model, TreePolicyMode::Descend, &mut rng)
        .expect("policy");
    assert_eq!(leaf, tree.root_id());
    assert_eq!(tree.node_count(), 1);
}
