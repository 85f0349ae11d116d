//! Frame-driven tweening core for Tweenline.
//!
//! Operations are small state machines advanced by an [`Executor`] once per
//! host frame. The host supplies the frame delta; everything else is
//! synchronous and single-threaded.
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! use tweenline_core::{Executor, PropertyOperation, TweenSpec};
//!
//! let opacity = Rc::new(Cell::new(0.0f32));
//! let executor = Executor::new();
//! let (read, write) = (opacity.clone(), opacity.clone());
//! executor.add(tweenline_core::OperationRef::new(PropertyOperation::lerp(
//!     move || read.get(),
//!     move |value| write.set(value),
//!     1.0,
//!     TweenSpec::linear(0.5),
//! )));
//!
//! executor.tick(0.25);
//! executor.tick(0.25);
//! assert_eq!(opacity.get(), 1.0);
//! assert!(executor.is_empty());
//! ```

mod collections;
pub mod conditional;
pub mod executor;
pub mod filter;
pub mod handle;
pub mod lambda;
pub mod operation;
pub mod property;
pub mod sequence;
mod target;

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;

pub use conditional::{Aggregation, Check, Conditional};
pub use executor::Executor;
pub use filter::Filter;
pub use handle::{Handle, OperationRef};
pub use lambda::LambdaOperation;
pub use operation::{Operation, OperationCore, OperationExt, OperationKind, Phase};
pub use property::PropertyOperation;
pub use sequence::Sequence;
pub use target::TargetId;

pub use tweenline_animation::{Easing, Lerp, TweenSpec};
