// @generated
// This file wires up the generated protobuf code
// Note: The prost files already include!() the tonic files automatically

pub mod vector {
    pub mod v1 {
        include!("vector.v1.rs");
        // vector.v1.tonic.rs is auto-included by vector.v1.rs
    }
}
