//! Best-family selection for one pair of endpoint circles.

use log::trace;

use crate::geometry::circle::Circle;

use super::family::{Decomposition, FamilyCatalog, Path};
use super::SpaceParams;

/// Evaluate every feasible family for the circle pair and return the
/// shortest decomposition, or `None` when no family applies.
///
/// Families are offered in their fixed tag order and only a strictly
/// shorter candidate replaces the incumbent, so equal lengths resolve to
/// the earlier tag.
pub(crate) fn best_circle_pair_path(p: &SpaceParams, c1: &Circle, c2: &Circle) -> Option<Path> {
    // degenerate cases short-circuit the catalog
    if c1.start.approx_eq(&c2.start) {
        return Some(Path {
            start: c1.start,
            end: c2.start,
            length: 0.0,
            parts: Decomposition::Empty,
        });
    }
    if c1.contains(&c2.start) {
        let cstart = Circle::new(c1.start, c1.left, c1.forward, false, p.rs);
        let length = cstart.rs_turn_length(&c2.start);
        return Some(Path {
            start: c1.start,
            end: c2.start,
            length,
            parts: Decomposition::T { cstart },
        });
    }

    let catalog = FamilyCatalog::new(p, c1, c2);
    let mut best: Option<(f64, Decomposition)> = None;
    let mut offer = |candidate: (f64, Decomposition)| {
        let (length, parts) = candidate;
        if length.is_finite() && best.as_ref().map_or(true, |(l, _)| length < *l) {
            best = Some((length, parts));
        }
    };

    if catalog.tt_exists(c1, c2) {
        offer(catalog.tt(c1, c2));
    }
    if catalog.tct_exists(c1, c2) {
        offer(catalog.tct(c1, c2));
    }
    if catalog.tctct_exists(c1, c2) {
        offer(catalog.tctct(c1, c2));
    }
    if catalog.tctt_exists(c1, c2) {
        offer(catalog.tctt(c1, c2));
    }
    if catalog.ttct_exists(c1, c2) {
        offer(catalog.ttct(c1, c2));
    }
    if catalog.tst_exists(c1, c2) {
        offer(catalog.tst(c1, c2));
    }
    if catalog.tstct_exists(c1, c2) {
        offer(catalog.tstct(c1, c2));
    }
    if catalog.tctst_exists(c1, c2) {
        offer(catalog.tctst(c1, c2));
    }
    if catalog.tctstct_exists(c1, c2) {
        offer(catalog.tctstct(c1, c2));
    }
    if catalog.ttctt_exists(c1, c2) {
        offer(catalog.ttctt(c1, c2));
    }
    if catalog.tcttct_exists(c1, c2) {
        offer(catalog.tcttct(c1, c2));
    }
    if catalog.ttt_exists(c1, c2) {
        offer(catalog.ttt(c1, c2));
    }
    if catalog.tcst_exists(c1, c2) {
        offer(catalog.tcst(c1, c2));
    }
    if catalog.tsct_exists(c1, c2) {
        offer(catalog.tsct(c1, c2));
    }
    if catalog.tcsct_exists(c1, c2) {
        offer(catalog.tcsct(c1, c2));
    }

    let (length, parts) = best?;
    trace!(
        "pair ({}{}/{}{}): {} length {:.6}",
        if c1.left { "L" } else { "R" },
        if c1.forward { "+" } else { "-" },
        if c2.left { "L" } else { "R" },
        if c2.forward { "+" } else { "-" },
        parts.family(),
        length
    );
    Some(Path {
        start: c1.start,
        end: c2.start,
        length,
        parts,
    })
}
