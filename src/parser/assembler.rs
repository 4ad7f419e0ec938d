//! Fix assembly: concatenation of per-source fixes and timestamp resolution

use crate::types::{GpsFix, TimedFix};
use chrono::NaiveDateTime;

/// Combine a fix's `DDMMYY` date and `HHMMSS.sss` time into one instant
///
/// Returns `None` when either token is not a valid calendar date or time;
/// no timezone is attached.
pub fn resolve_timestamp(fix: &GpsFix) -> Option<NaiveDateTime> {
    Some(fix.calendar_date()?.and_time(fix.clock_time()?))
}

/// Build the ordered fix sequence from per-source fix lists
///
/// Sources are concatenated in the order given and each keeps its parse order.
/// With `sort_by_timestamp` a stable sort by timestamp follows, fixes without a
/// timestamp going last in their original relative order.
pub fn assemble_fixes<I>(sources: I, sort_by_timestamp: bool) -> Vec<TimedFix>
where
    I: IntoIterator<Item = Vec<GpsFix>>,
{
    let mut sequence: Vec<TimedFix> = sources
        .into_iter()
        .flatten()
        .map(|fix| TimedFix {
            timestamp: resolve_timestamp(&fix),
            fix,
        })
        .collect();

    if sort_by_timestamp {
        sequence.sort_by_key(|timed| (timed.timestamp.is_none(), timed.timestamp));
    }

    let unresolved = sequence.iter().filter(|t| t.timestamp.is_none()).count();
    if unresolved > 0 {
        log::debug!(
            "{} of {} fixes have no valid timestamp",
            unresolved,
            sequence.len()
        );
    }

    sequence
}
