mod error_coverage;
mod routing_edges;
