use std::fmt;
use std::iter::FusedIterator;

use tracing::trace;

/// A type-erased segment of a trampolined generator.
pub type Gen<'a, T> = Box<dyn Iterator<Item = Step<'a, T>> + 'a>;

/// A reified call that produces a sequence instead of a value.
///
/// Iterating a `Yielder` directly forces it and iterates what it produced, so
/// it can be handed to anything that takes an `IntoIterator`. Tails nested in
/// that sequence are left as they are; only [`recur_gen`] follows them.
pub struct Yielder<'a, T>(Box<dyn FnOnce() -> Gen<'a, T> + 'a>);

impl<'a, T> Yielder<'a, T> {
    pub fn new<F, I>(f: F) -> Self
    where
        F: FnOnce() -> I + 'a,
        I: IntoIterator<Item = Step<'a, T>>,
        I::IntoIter: 'a,
    {
        Self(Box::new(move || -> Gen<'a, T> { Box::new(f().into_iter()) }))
    }

    pub fn force(self) -> Gen<'a, T> {
        (self.0)()
    }
}

impl<'a, T> IntoIterator for Yielder<'a, T> {
    type Item = Step<'a, T>;
    type IntoIter = Gen<'a, T>;

    fn into_iter(self) -> Gen<'a, T> {
        self.force()
    }
}

impl<T> fmt::Debug for Yielder<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Yielder").finish_non_exhaustive()
    }
}

/// One element of a trampolined generator.
pub enum Step<'a, T> {
    Item(T),
    /// Continue with another sequence. Whatever the current segment would
    /// have produced after this point is discarded.
    Tail(Yielder<'a, T>),
}

impl<'a, T> Step<'a, T> {
    pub fn item(item: T) -> Self {
        Step::Item(item)
    }

    pub fn tail<F, I>(f: F) -> Self
    where
        F: FnOnce() -> I + 'a,
        I: IntoIterator<Item = Step<'a, T>>,
        I::IntoIter: 'a,
    {
        Step::Tail(Yielder::new(f))
    }
}

impl<'a, T> From<Yielder<'a, T>> for Step<'a, T> {
    fn from(yielder: Yielder<'a, T>) -> Self {
        Step::Tail(yielder)
    }
}

impl<T: fmt::Debug> fmt::Debug for Step<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Item(item) => f.debug_tuple("Item").field(item).finish(),
            Step::Tail(yielder) => f.debug_tuple("Tail").field(yielder).finish(),
        }
    }
}

/// Iterator returned by [`recur_gen`].
pub struct RecurGen<'a, T> {
    current: Option<Gen<'a, T>>,
}

/// Flattens a trampolined generator into the plain items it produces.
///
/// Items are passed through as they are pulled. On a [`Step::Tail`] the rest
/// of the current segment is dropped without being drained and iteration
/// continues with the tail's sequence, so a tail in the middle of a segment
/// truncates it rather than being spliced in. Following a tail never adds a
/// stack frame.
///
/// Dropping the iterator drops the current segment along with any tails it
/// still holds.
pub fn recur_gen<'a, T, I>(seq: I) -> RecurGen<'a, T>
where
    I: IntoIterator<Item = Step<'a, T>>,
    I::IntoIter: 'a,
{
    RecurGen {
        current: Some(Box::new(seq.into_iter())),
    }
}

impl<'a, T> Iterator for RecurGen<'a, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        loop {
            match self.current.as_mut()?.next() {
                Some(Step::Item(item)) => return Some(item),
                Some(Step::Tail(yielder)) => {
                    trace!(target: "recur::gen", "following tail");
                    // The abandoned segment goes before the next one starts.
                    self.current = None;
                    self.current = Some(yielder.force());
                }
                None => {
                    self.current = None;
                    return None;
                }
            }
        }
    }
}

impl<T> FusedIterator for RecurGen<'_, T> {}

impl<T> fmt::Debug for RecurGen<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecurGen")
            .field("exhausted", &self.current.is_none())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::iter;

    use super::*;

    fn count_up(from: u32, to: u32) -> impl Iterator<Item = Step<'static, u32>> {
        iter::once(Step::item(from))
            .chain((from < to).then(|| Step::tail(move || count_up(from + 1, to))))
    }

    #[test]
    fn items_pass_through() {
        let out: Vec<_> = recur_gen(vec![Step::item(1), Step::item(2), Step::item(3)]).collect();
        assert_eq!(out, [1, 2, 3]);
    }

    #[test]
    fn empty_input() {
        assert_eq!(recur_gen(Vec::<Step<'_, u8>>::new()).next(), None);
    }

    #[test]
    fn tail_truncates_segment() {
        let seq = vec![
            Step::item('a'),
            Step::item('b'),
            Step::tail(|| vec![Step::item('x'), Step::item('y')]),
            Step::item('c'),
            Step::item('d'),
        ];
        let out: String = recur_gen(seq).collect();
        assert_eq!(out, "abxy");
    }

    #[test]
    fn long_tail_chain() {
        assert_eq!(recur_gen(count_up(0, 200_000)).last(), Some(200_000));
    }

    #[test]
    fn yielder_is_lazy_and_iterable() {
        let forced = Cell::new(false);
        let yielder = Yielder::new(|| {
            forced.set(true);
            vec![Step::item(1), Step::tail(|| vec![Step::item(2)])]
        });
        assert!(!forced.get());

        let steps: Vec<_> = yielder.into_iter().collect();
        assert!(forced.get());
        assert!(matches!(steps.as_slice(), [Step::Item(1), Step::Tail(_)]));
    }

    #[test]
    fn yielder_can_start_a_trampoline() {
        let out: Vec<_> = recur_gen(Yielder::new(|| count_up(5, 7))).collect();
        assert_eq!(out, [5, 6, 7]);
    }

    #[test]
    fn yielder_converts_into_tail() {
        let seq = vec![Step::item(1), Yielder::new(|| vec![Step::item(2)]).into()];
        let out: Vec<_> = recur_gen(seq).collect();
        assert_eq!(out, [1, 2]);
    }

    #[test]
    fn fused_after_exhaustion() {
        let mut it = recur_gen(vec![Step::item(1)]);
        assert_eq!(it.next(), Some(1));
        assert_eq!(it.next(), None);
        assert_eq!(it.next(), None);
        assert_eq!(format!("{:?}", it), "RecurGen { exhausted: true, .. }");
    }
}
