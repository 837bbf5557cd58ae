mod fixtures;
mod search_tree_tests;
