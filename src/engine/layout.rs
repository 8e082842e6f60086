use tracing::debug;
use ulid::Ulid;

use crate::model::DiaryEvent;

// ── Overlap Layout Algorithm ─────────────────────────────────────

/// Column placements for one day's diary, sized for a uniform grid of
/// `max_concurrent` side-by-side cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// Peak number of simultaneously running events over any slot.
    pub max_concurrent: usize,
    /// One entry per laid-out event, in processing order.
    pub placements: Vec<Placement>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub event_id: Ulid,
    pub column: usize,
}

impl Layout {
    pub fn column_of(&self, event_id: Ulid) -> Option<usize> {
        self.placements
            .iter()
            .find(|p| p.event_id == event_id)
            .map(|p| p.column)
    }
}

/// Assign a side-by-side column to every event so that temporally
/// overlapping events never share one, using the fewest columns possible.
///
/// Events are processed sorted by start time (stable, so simultaneous
/// starts keep their input order) and take the first column free across
/// every slot they span. Events with a malformed span, or a span off the
/// grid, are skipped rather than rejected; the diary quietly omits them.
pub fn compute_layout(events: &[DiaryEvent], total_slots: usize) -> Layout {
    let mut valid: Vec<&DiaryEvent> = events
        .iter()
        .filter(|e| {
            let ok = e.span.start <= e.span.end && e.span.end < total_slots;
            if !ok {
                debug!(event = %e.id, start = e.span.start, end = e.span.end, "skipping malformed diary event");
            }
            ok
        })
        .collect();
    valid.sort_by_key(|e| e.starts_at);

    let mut coverage = vec![0usize; total_slots];
    for e in &valid {
        for slot in e.span.slots() {
            coverage[slot] += 1;
        }
    }
    let max_concurrent = coverage.iter().copied().max().unwrap_or(0);

    // free[slot][column], scanned first-fit over columns.
    let mut free = vec![vec![true; max_concurrent]; total_slots];
    let mut placements = Vec::with_capacity(valid.len());
    for e in &valid {
        let column = (0..max_concurrent)
            .find(|&c| e.span.slots().all(|slot| free[slot][c]))
            .expect("coverage count admits a free column for every event");
        for slot in e.span.slots() {
            free[slot][column] = false;
        }
        placements.push(Placement { event_id: e.id, column });
    }

    Layout { max_concurrent, placements }
}
