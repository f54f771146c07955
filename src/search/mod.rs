//! Pairwise combination search over a resistor catalog.

pub mod divider;
pub mod pairs;
pub mod quotient;
pub mod resistance;
pub mod series;

use std::collections::HashSet;

/// How two resistors are connected to realize a value.
///
/// The declaration order fixes the report tie-break: exact before parallel
/// before series at equal achieved values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Connection {
    Exact,
    Parallel,
    Series,
}

impl Connection {
    pub fn label(self) -> &'static str {
        match self {
            Connection::Exact => "exact",
            Connection::Parallel => "parallel",
            Connection::Series => "series",
        }
    }
}

/// One candidate combination.
#[derive(Debug, Clone, Copy)]
pub struct Combination {
    pub value: f64,
    pub conn: Connection,
    pub r1: f64,
    pub r2: f64,
}

impl Combination {
    /// Dedup key: the exact bit patterns of the full tuple, so near but
    /// distinct float results never merge.
    fn key(&self) -> (u64, Connection, u64, u64) {
        (
            self.value.to_bits(),
            self.conn,
            self.r1.to_bits(),
            self.r2.to_bits(),
        )
    }

    /// Signed percent deviation from `target`.
    pub fn pct_dev(&self, target: f64) -> f64 {
        100.0 * (self.value - target) / target
    }
}

/// Insert-once accumulator for combinations. Symmetric pair enumeration
/// may produce the same tuple twice; only the first insert sticks.
#[derive(Debug, Default)]
pub struct CombinationSet {
    seen: HashSet<(u64, Connection, u64, u64)>,
    items: Vec<Combination>,
}

impl CombinationSet {
    pub fn insert(&mut self, c: Combination) {
        if self.seen.insert(c.key()) {
            self.items.push(c);
        }
    }

    pub fn into_sorted(mut self) -> Vec<Combination> {
        sort_combinations(&mut self.items);
        self.items
    }
}

/// Report order: achieved value, then connection kind, then operands.
pub fn sort_combinations(items: &mut [Combination]) {
    items.sort_by(|a, b| {
        a.value
            .total_cmp(&b.value)
            .then(a.conn.cmp(&b.conn))
            .then(a.r1.total_cmp(&b.r1))
            .then(a.r2.total_cmp(&b.r2))
    });
}

/// Tolerance band test: `value` within `[(1-tol)*target, (1+tol)*target]`.
pub fn within(value: f64, target: f64, tol: f64) -> bool {
    (1.0 - tol) * target <= value && value <= (1.0 + tol) * target
}

/// Which connection kinds a report shows. Exact rows always survive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionFilter {
    #[default]
    All,
    SeriesOnly,
    ParallelOnly,
}

impl ConnectionFilter {
    pub fn keeps(self, conn: Connection) -> bool {
        match self {
            ConnectionFilter::All => true,
            ConnectionFilter::SeriesOnly => conn != Connection::Parallel,
            ConnectionFilter::ParallelOnly => conn != Connection::Series,
        }
    }
}

/// Total-resistance constraint for divider searches (-r TOTAL:PCT).
#[derive(Debug, Clone, Copy)]
pub struct TotalConstraint {
    pub resistance: f64,
    pub tolerance: f64,
}

/// Options shared by the pair searches.
#[derive(Debug, Clone, Copy)]
pub struct SearchOpts {
    /// Fractional acceptance band around the target.
    pub tolerance: f64,
    /// Display limit before rank-truncation kicks in.
    pub limit: usize,
    pub filter: ConnectionFilter,
    pub total: Option<TotalConstraint>,
}

/// Keep the `limit` entries closest to `target` by relative absolute
/// deviation |v - t| / v. This is a separate pass from the tolerance-band
/// filter already applied during search. Returns true when entries were
/// dropped.
pub fn rank_truncate(items: &mut Vec<Combination>, target: f64, limit: usize) -> bool {
    if items.len() <= limit {
        return false;
    }
    items.sort_by(|a, b| {
        let da = (a.value - target).abs() / a.value;
        let db = (b.value - target).abs() / b.value;
        da.total_cmp(&db).then(a.value.total_cmp(&b.value))
    });
    items.truncate(limit);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comb(value: f64, conn: Connection, r1: f64, r2: f64) -> Combination {
        Combination { value, conn, r1, r2 }
    }

    #[test]
    fn test_dedup_by_full_tuple() {
        let mut set = CombinationSet::default();
        set.insert(comb(30.0, Connection::Series, 10.0, 20.0));
        set.insert(comb(30.0, Connection::Series, 10.0, 20.0));
        set.insert(comb(30.0, Connection::Parallel, 10.0, 20.0));
        assert_eq!(set.into_sorted().len(), 2);
    }

    #[test]
    fn test_sort_order() {
        let mut set = CombinationSet::default();
        set.insert(comb(30.0, Connection::Series, 10.0, 20.0));
        set.insert(comb(15.0, Connection::Parallel, 20.0, 30.0));
        let sorted = set.into_sorted();
        assert_eq!(sorted[0].value, 15.0);
        assert_eq!(sorted[1].value, 30.0);
    }

    #[test]
    fn test_within_band() {
        assert!(within(12.0, 15.0, 0.34));
        assert!(!within(7.5, 15.0, 0.34));
        assert!(within(15.0, 15.0, 0.0));
    }

    #[test]
    fn test_filter_keeps_exact() {
        assert!(ConnectionFilter::SeriesOnly.keeps(Connection::Exact));
        assert!(ConnectionFilter::ParallelOnly.keeps(Connection::Exact));
        assert!(!ConnectionFilter::SeriesOnly.keeps(Connection::Parallel));
        assert!(!ConnectionFilter::ParallelOnly.keeps(Connection::Series));
    }

    #[test]
    fn test_rank_truncate_keeps_closest() {
        let mut items = vec![
            comb(20.0, Connection::Series, 10.0, 10.0),
            comb(15.0, Connection::Series, 5.0, 10.0),
            comb(16.0, Connection::Parallel, 20.0, 80.0),
        ];
        let clipped = rank_truncate(&mut items, 15.0, 2);
        assert!(clipped);
        assert_eq!(items.len(), 2);
        assert!(items.iter().any(|c| c.value == 15.0));
        assert!(items.iter().any(|c| c.value == 16.0));
    }

    #[test]
    fn test_rank_truncate_noop_under_limit() {
        let mut items = vec![comb(15.0, Connection::Series, 5.0, 10.0)];
        assert!(!rank_truncate(&mut items, 15.0, 30));
        assert_eq!(items.len(), 1);
    }
}
