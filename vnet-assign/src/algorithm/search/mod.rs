mod astar;
mod dijkstra;
mod search_tree;

pub use astar::{heuristic_factor, shortest_path};
pub use dijkstra::one_to_all;
pub use search_tree::SearchTree;
