//! Progressive (block) tariff: the marginal rate rises as cumulative
//! monthly consumption crosses the bracket thresholds, so the bill for
//! a month is a walk over the brackets, not a single multiplication.

use crate::schedule::RateSchedule;
use crate::tou::Season;

/// Cost of one calendar month's consumption under the progressive
/// scheme. Negative input is clamped to zero.
pub fn progressive_cost(total_kwh_month: f64, season: Season, schedule: &RateSchedule) -> f64 {
    let mut remaining = total_kwh_month.max(0.0);
    let mut cost = 0.0;

    for bracket in schedule.progressive_brackets {
        if remaining <= 0.0 {
            break;
        }
        let in_bracket = remaining.min(bracket.capacity_kwh);
        cost += in_bracket * bracket.rate(season);
        remaining -= in_bracket;
    }

    cost
}
