//! Checked-in protobuf/tonic bindings for the `vector.v1.VectorService`
//! wire contract.
//!
//! The files under `src/gen/` are generated from the service's proto
//! definitions and committed as-is; regenerate them when the contract
//! changes instead of editing by hand.

mod gen;

pub use gen::vector;
