//! The model bound: what the engine requires of application state.

use serde::Serialize;
use std::fmt::Debug;

/// Marker trait for types usable as the engine's canonical model.
///
/// The engine owns the sole mutable instance of the model. `Clone` is the
/// defensive-copy mechanism: every value handed to a proposal factory,
/// presenter, or auto-next-action function is an independent clone (or an
/// immutable borrow), never an alias of the canonical instance. Models must
/// therefore not share mutable backing (no `Rc<RefCell<_>>` style interior
/// handles) for the copy discipline to hold.
///
/// `Serialize` powers the structural diff recorded in debug mode.
///
/// Blanket-implemented; deriving `Clone`, `Debug`, and `Serialize` on a
/// plain data struct is all that is needed.
pub trait Model: Clone + Debug + Serialize + Send + Sync + 'static {}

impl<T> Model for T where T: Clone + Debug + Serialize + Send + Sync + 'static {}
