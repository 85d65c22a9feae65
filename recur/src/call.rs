use std::fmt;

use tracing::trace;

/// A reified call: a function together with the arguments it captured,
/// not yet invoked.
pub struct Call<'a, T>(Box<dyn FnOnce() -> Bounce<'a, T> + 'a>);

impl<'a, T> Call<'a, T> {
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce() -> Bounce<'a, T> + 'a,
    {
        Self(Box::new(f))
    }

    /// Runs the wrapped function. Whatever it panics with or returns is
    /// passed straight through.
    pub fn force(self) -> Bounce<'a, T> {
        (self.0)()
    }
}

impl<T> fmt::Debug for Call<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Call").finish_non_exhaustive()
    }
}

pub struct Done<T>(pub T);

/// The result of one step of a tail-recursive function.
pub enum Bounce<'a, T> {
    Done(T),
    Call(Call<'a, T>),
}

impl<'a, T> Bounce<'a, T> {
    pub fn done(value: T) -> Self {
        Bounce::Done(value)
    }

    pub fn call<F>(f: F) -> Self
    where
        F: FnOnce() -> Bounce<'a, T> + 'a,
    {
        Bounce::Call(Call::new(f))
    }

    pub fn is_done(&self) -> bool {
        matches!(self, Bounce::Done(_))
    }
}

impl<'a, T, E> Bounce<'a, Result<T, E>> {
    /// Turns a fallible step into a bounce. An `Err` ends the chain with that
    /// error as its final value.
    pub fn from_result(step: Result<Self, E>) -> Self {
        step.unwrap_or_else(|err| Bounce::Done(Err(err)))
    }
}

impl<'a, T> From<Done<T>> for Bounce<'a, T> {
    fn from(done: Done<T>) -> Self {
        Bounce::Done(done.0)
    }
}

impl<'a, T> From<Call<'a, T>> for Bounce<'a, T> {
    fn from(call: Call<'a, T>) -> Self {
        Bounce::Call(call)
    }
}

impl<T: fmt::Debug> fmt::Debug for Bounce<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bounce::Done(value) => f.debug_tuple("Done").field(value).finish(),
            Bounce::Call(call) => fmt::Debug::fmt(call, f),
        }
    }
}

/// Forces calls until a final value comes out. Stack depth stays constant no
/// matter how long the chain is.
///
/// A call that keeps producing calls forever makes this loop forever.
pub fn recur<T>(mut bounce: Bounce<'_, T>) -> T {
    let mut bounces: u64 = 0;
    loop {
        match bounce {
            Bounce::Done(value) => {
                trace!(target: "recur::call", bounces, "trampoline settled");
                return value;
            }
            Bounce::Call(call) => {
                bounces += 1;
                bounce = call.force();
            }
        }
    }
}
