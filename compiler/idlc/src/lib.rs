//! IDL generation for classified Java types.
//!
//! Takes the types [`idl_types::Classifier`] produced and turns each
//! generation root into a set of `.idl` files:
//! - [`IdlContext::collect_references`] finds every type the root needs a
//!   file for
//! - [`IdlContext::idl_module_names`] places each file, remapping the
//!   modules of `IDLEntity` types
//! - [`IdlContext::output_types_for`] names the files and rejects two types
//!   sharing one
//! - [`IdlEmitter`] renders the text of each file
//!
//! [`Generator`] runs all of this over a batch of root classes and reports
//! failures as diagnostics.
//!
//! # Tracing
//!
//! Every stage logs through `tracing`. [`init_tracing`] installs a
//! subscriber for binaries and tests; enable output with
//! `RUST_LOG=idlc=debug` or `RUST_LOG=idl_types=trace`.

mod config;
mod context;
mod emit;
mod generator;
pub mod modules;
mod output;
mod references;

use std::sync::Once;

pub use config::{ConfigError, GeneratorConfig};
pub use context::IdlContext;
pub use emit::{IdlEmitter, IdlWriter};
pub use generator::{Generator, OutputFile};
pub use output::{OutputCollision, OutputKind, OutputType};
pub use references::ReferenceSet;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing output.
///
/// Does nothing unless `RUST_LOG` is set. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
