//! Trampolines for tail-recursive functions and tail-recursive generators.
//!
//! A tail-recursive function returns a [`Bounce`]: either its final value or a
//! [`Call`] standing for the recursive step it would have made. [`recur`] forces
//! calls in a loop until a value comes out, so the call stack never grows.
//!
//! Generators work the same way through [`recur_gen`]: a segment yields
//! [`Step::Item`]s, and ends by yielding a [`Step::Tail`] holding a [`Yielder`]
//! for the rest of the sequence.
//!
//! Neither loop detects non-termination. A chain that never reaches a final
//! value, or a generator that never stops emitting tails, runs forever.

mod call;
mod gen;
mod trace;

pub use call::{recur, Bounce, Call, Done};
pub use gen::{recur_gen, Gen, RecurGen, Step, Yielder};
pub use trace::trace_id;
