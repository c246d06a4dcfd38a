pub use crate::diagnostics::{ErrorKind, ResolutionFailure, TheoriaError};

pub mod case;
pub mod collection;
pub mod convert;
pub mod diagnostics;
pub mod prelude;
pub mod resolve;
pub mod source;
