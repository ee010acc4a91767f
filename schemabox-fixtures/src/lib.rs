//! Models generated by `schemabox-codegen` from the social network test
//! schema, built against the `schemabox` runtime.
//!
//! The build script regenerates them whenever the schema changes, so the
//! tests in this crate run the emitter's real output.

pub mod social {
    include!(concat!(env!("OUT_DIR"), "/social.rs"));
}
