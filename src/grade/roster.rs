#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::cmp::Ordering;

use itertools::Itertools;

use super::results::{MarkSheet, StudentRecord};

/// Anything that can appear on a ranked roster.
pub trait Rankable {
    /// The percentage to rank by; `None` when the record never got one.
    fn percentage(&self) -> Option<f64>;
    /// Student name, the first tie-breaker.
    fn name(&self) -> &str;
    /// Roll number, the second tie-breaker.
    fn roll(&self) -> &str;
}

impl Rankable for StudentRecord {
    fn percentage(&self) -> Option<f64> {
        Some(StudentRecord::percentage(self))
    }

    fn name(&self) -> &str {
        StudentRecord::name(self)
    }

    fn roll(&self) -> &str {
        StudentRecord::roll(self)
    }
}

impl Rankable for MarkSheet {
    fn percentage(&self) -> Option<f64> {
        Some(self.record().percentage())
    }

    fn name(&self) -> &str {
        self.record().name()
    }

    fn roll(&self) -> &str {
        self.record().roll()
    }
}

impl<T: Rankable + ?Sized> Rankable for &T {
    fn percentage(&self) -> Option<f64> {
        (**self).percentage()
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn roll(&self) -> &str {
        (**self).roll()
    }
}

/// Roster order: percentage descending, then name, then roll ascending.
fn roster_order<T: Rankable>(a: &T, b: &T, pa: f64, pb: f64) -> Ordering {
    pb.total_cmp(&pa)
        .then_with(|| a.name().cmp(b.name()))
        .then_with(|| a.roll().cmp(b.roll()))
}

/// Orders `records` by percentage, highest first.
///
/// Records without a usable percentage (missing or not finite) are dropped
/// instead of failing the whole listing. Ties are broken by name and then
/// roll number so the output never depends on input order.
pub fn rank_roster<T, I>(records: I) -> Vec<T>
where
    T: Rankable,
    I: IntoIterator<Item = T>,
{
    let mut skipped = 0usize;
    let ranked = records
        .into_iter()
        .filter_map(|r| match r.percentage() {
            Some(p) if p.is_finite() => Some((p, r)),
            _ => {
                skipped += 1;
                None
            }
        })
        .sorted_by(|(pa, a), (pb, b)| roster_order(a, b, *pa, *pb))
        .map(|(_, r)| r)
        .collect::<Vec<T>>();

    if skipped > 0 {
        tracing::debug!("Left {skipped} record(s) without a percentage off the roster");
    }
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        name:       &'static str,
        roll:       &'static str,
        percentage: Option<f64>,
    }

    impl Rankable for Row {
        fn percentage(&self) -> Option<f64> {
            self.percentage
        }

        fn name(&self) -> &str {
            self.name
        }

        fn roll(&self) -> &str {
            self.roll
        }
    }

    fn row(name: &'static str, roll: &'static str, percentage: Option<f64>) -> Row {
        Row {
            name,
            roll,
            percentage,
        }
    }

    fn names(rows: &[Row]) -> Vec<&'static str> {
        rows.iter().map(|r| r.name).collect()
    }

    #[test]
    fn sorts_descending() {
        let ranked = rank_roster(vec![
            row("Cara", "3", Some(61.5)),
            row("Ada", "1", Some(92.0)),
            row("Ben", "2", Some(75.0)),
        ]);
        assert_eq!(names(&ranked), ["Ada", "Ben", "Cara"]);
    }

    #[test]
    fn skips_missing_and_non_finite_percentages() {
        let ranked = rank_roster(vec![
            row("Ada", "1", Some(50.0)),
            row("Ghost", "2", None),
            row("Nan", "3", Some(f64::NAN)),
            row("Inf", "4", Some(f64::INFINITY)),
        ]);
        assert_eq!(names(&ranked), ["Ada"]);
    }

    #[test]
    fn ties_break_by_name_then_roll() {
        let ranked = rank_roster(vec![
            row("Zed", "1", Some(80.0)),
            row("Amy", "9", Some(80.0)),
            row("Amy", "2", Some(80.0)),
        ]);
        assert_eq!(
            ranked.iter().map(|r| (r.name, r.roll)).collect::<Vec<_>>(),
            [("Amy", "2"), ("Amy", "9"), ("Zed", "1")]
        );
    }

    #[test]
    fn every_permutation_ranks_the_same() {
        let base = vec![
            row("Ada", "1", Some(92.0)),
            row("Ben", "2", Some(75.0)),
            row("Cy", "3", Some(75.0)),
            row("Di", "4", None),
        ];
        let expected = rank_roster(base.clone());

        for perm in base.iter().cloned().permutations(base.len()) {
            let ranked = rank_roster(perm);
            assert_eq!(ranked, expected);
            assert!(
                ranked
                    .windows(2)
                    .all(|w| w[0].percentage >= w[1].percentage)
            );
        }
    }

    #[test]
    fn ranking_is_idempotent() {
        let once = rank_roster(vec![
            row("Ben", "2", Some(75.0)),
            row("Ada", "1", Some(92.0)),
            row("Cy", "3", Some(40.0)),
        ]);
        let twice = rank_roster(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn ranks_borrowed_records() {
        let rows = [row("Ben", "2", Some(10.0)), row("Ada", "1", Some(20.0))];
        let ranked = rank_roster(rows.iter());
        assert_eq!(ranked[0].name, "Ada");
    }
}
