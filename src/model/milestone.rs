//! Weekly hunt milestones and the hunt point bonus tiers.

/// A weekly hunt score that grants a Discord role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Milestone {
    pub threshold: i64,
    pub role_id: u64,
}

/// Picks the role to grant for a weekly score.
///
/// Milestones must be sorted ascending. They are walked in order and the walk stops at
/// the first threshold not yet met; the last milestone reached wins.
pub fn qualifying_role(milestones: &[Milestone], weekly_score: i64) -> Option<u64> {
    let mut role = None;
    for milestone in milestones {
        if weekly_score < milestone.threshold {
            break;
        }
        role = Some(milestone.role_id);
    }
    role
}

/// Bonus points for crossing a multiple of 100 weekly hunts.
///
/// Returns `None` unless `previous..new` crosses a hundred boundary. Totals up to 500
/// earn 1 point, below 1000 earn 2, 1000 and above earn 3.
pub fn hunt_bonus(previous: i64, new: i64) -> Option<i64> {
    if new <= 0 || new.div_euclid(100) <= previous.div_euclid(100) {
        return None;
    }

    Some(match new {
        ..=500 => 1,
        ..=999 => 2,
        _ => 3,
    })
}
