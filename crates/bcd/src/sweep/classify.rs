use super::types::{Segment, Transition};

/// Classify a previous-column run against a current-column run (`y` grows downwards).
///
/// The four events are exclusive by their free flags and containment tests;
/// pairs that match nothing return `None`.
pub fn classify(prev: Segment, cur: Segment) -> Option<Transition> {
    match (prev.free, cur.free) {
        (false, true) if prev.top <= cur.top && prev.bottom >= cur.bottom => {
            Some(Transition::Birth)
        }
        (false, true) if prev.top > cur.top && prev.bottom < cur.bottom => {
            Some(Transition::Merge)
        }
        (true, false) if prev.top >= cur.top && prev.bottom <= cur.bottom => {
            Some(Transition::Death)
        }
        (true, false) if prev.top < cur.top && prev.bottom > cur.bottom => {
            Some(Transition::Split)
        }
        (true, true) if prev.overlap(&cur) > 0.0 => Some(Transition::Continuation),
        _ => None,
    }
}
