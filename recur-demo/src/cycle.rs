use anyhow::{bail, Context, Result};
use recur::Bounce;

/// Follows `successors` from the last node of `cycle` until it comes back to
/// the first one.
pub fn build_cycle(successors: &[usize], mut cycle: Vec<usize>) -> Bounce<'_, Vec<usize>> {
    let next = successors[cycle[cycle.len() - 1]];
    if next == cycle[0] {
        Bounce::done(cycle)
    } else {
        cycle.push(next);
        Bounce::call(move || build_cycle(successors, cycle))
    }
}

pub fn regular_build_cycle(successors: &[usize], mut cycle: Vec<usize>) -> Vec<usize> {
    let next = successors[cycle[cycle.len() - 1]];
    if next == cycle[0] {
        cycle
    } else {
        cycle.push(next);
        regular_build_cycle(successors, cycle)
    }
}

/// Like [`build_cycle`], but rejects out-of-range successors and chains that
/// never return to the start instead of panicking or looping.
pub fn checked_build_cycle(
    successors: &[usize],
    cycle: Vec<usize>,
) -> Bounce<'_, Result<Vec<usize>>> {
    Bounce::from_result(checked_step(successors, cycle))
}

fn checked_step(
    successors: &[usize],
    mut cycle: Vec<usize>,
) -> Result<Bounce<'_, Result<Vec<usize>>>> {
    let (Some(&first), Some(&last)) = (cycle.first(), cycle.last()) else {
        bail!("a cycle needs a starting node");
    };
    let next = *successors.get(last).with_context(|| {
        format!("node {} has no successor ({} nodes)", last, successors.len())
    })?;
    if next == first {
        return Ok(Bounce::done(Ok(cycle)));
    }
    if cycle.contains(&next) {
        bail!("successors of {0} loop back to {1} without returning to {0}", first, next);
    }
    cycle.push(next);
    Ok(Bounce::call(move || checked_build_cycle(successors, cycle)))
}
