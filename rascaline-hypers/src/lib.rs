#![warn(clippy::all, clippy::pedantic)]

// disable some style lints
#![allow(clippy::needless_return, clippy::must_use_candidate, clippy::comparison_chain)]
#![allow(clippy::redundant_field_names, clippy::redundant_closure_for_method_calls)]
#![allow(clippy::unreadable_literal, clippy::option_if_let_else)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc, clippy::module_name_repetitions)]
#![allow(clippy::needless_pass_by_value)]

// Tests lints
#![cfg_attr(test, allow(clippy::float_cmp))]

mod errors;
pub use self::errors::Error;
pub use self::errors::{CapabilityFamily, UnsupportedVariant, DeprecatedHyperParameters};

pub mod native;
pub mod capabilities;
pub use self::capabilities::CapabilityObject;

mod config;
pub use self::config::{CalculatorConfig, Hypers};

mod validator;
pub use self::validator::validate;

mod serializer;
pub use self::serializer::serialize;

pub mod legacy;

mod calculator;
pub use self::calculator::{Calculator, CalculatorKind, NativeEngine};
