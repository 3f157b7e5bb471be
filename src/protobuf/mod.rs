//! protocol buffer (protobuf) support for the richer error model
//!
//! ## Types
//!
//! The [`types`] submodule contains the `google.rpc` error model messages,
//! the generic `Any` pack/unpack helpers and the [`types::StatusExt`] and
//! [`types::RpcStatusExt`] traits.
//!
//! ## Prost
//!
//! Messages are encoded and decoded with the [`prost`] library, which is
//! re-exported here together with `prost-types`.

pub mod types;

pub mod prost {
    //! Re-export of [prost](https://docs.rs/prost) and
    //! [prost-types](https://docs.rs/prost-types) crates.

    pub use ::prost::*;
    pub use ::prost_types as types;
}
