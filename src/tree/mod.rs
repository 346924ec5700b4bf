mod builder;
mod node;
mod prepare;

pub use builder::{TreeBuild, TreeBuilder};
pub use node::{RouteNode, find_route_by_name, walk_forest};
pub use prepare::finalize_route_name;
