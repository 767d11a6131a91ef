#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Core numeric types for the scrip community currency network.
//!
//! scrip bridges human input, JSON transport, and on-chain integer
//! representations. The application around this crate is UI composition
//! and routing glue; the conversions here sit on the path of every
//! transaction-signing and pool-accounting operation, where an off-by-one
//! in base detection or truncation silently corrupts money-adjacent
//! values.
//!
//! # Overview
//!
//! Two independent, stateless components form the core. Chain identifier
//! normalization ([`chain::normalize`]) reduces the four shapes a network
//! identifier arrives in (decimal string, hex string, native integer,
//! arbitrary-precision integer) to one canonical integer. The price index
//! codec ([`price::to_display`] / [`price::to_scaled`]) moves a pool
//! price index between its human-facing decimal and the fixed-point
//! integer stored by the pool contract.
//!
//! # Modules
//!
//! - [`chain`] - Chain identifier normalization and CAIP-2 helpers
//! - [`networks`] - Registry of well-known network deployments
//! - [`price`] - Price index scaling between display and on-chain forms
//!
//! # Feature Flags
//!
//! - `telemetry` - Enables tracing instrumentation for debugging and monitoring

pub mod chain;
pub mod networks;
pub mod price;
