//! Aggregate attendance counts, derived from the collection on demand.

use serde::Serialize;

use crate::submission::{Attendance, Submission};

/// Summary counts shown above the card grid.
///
/// `attending + not_attending <= total`; the difference is the number of
/// submissions whose attendance was not recognized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
  pub attending:     usize,
  pub not_attending: usize,
  pub total:         usize,
}

impl Tally {
  pub fn of(submissions: &[Submission]) -> Self {
    submissions.iter().fold(
      Self {
        total: submissions.len(),
        ..Self::default()
      },
      |mut tally, s| {
        match s.attendance {
          Some(Attendance::Attending) => tally.attending += 1,
          Some(Attendance::NotAttending) => tally.not_attending += 1,
          None => {}
        }
        tally
      },
    )
  }

  pub fn unrecognized(&self) -> usize {
    self
      .total
      .saturating_sub(self.attending)
      .saturating_sub(self.not_attending)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn submission(id: &str, attendance: Option<Attendance>) -> Submission {
    Submission {
      id: id.into(),
      name: id.to_uppercase(),
      attendance,
      drinks: Vec::new(),
      submitted_at: None,
    }
  }

  #[test]
  fn empty_collection_is_all_zero() {
    assert_eq!(Tally::of(&[]), Tally::default());
  }

  #[test]
  fn recognized_answers_sum_to_total() {
    let answers = [
      Attendance::Attending,
      Attendance::NotAttending,
      Attendance::Attending,
      Attendance::Attending,
      Attendance::NotAttending,
    ];
    for n in 0..=answers.len() {
      let subs: Vec<_> = answers[..n]
        .iter()
        .enumerate()
        .map(|(i, a)| submission(&i.to_string(), Some(*a)))
        .collect();
      let tally = Tally::of(&subs);
      assert_eq!(tally.attending + tally.not_attending, tally.total);
      assert_eq!(tally.total, n);
      assert_eq!(tally.unrecognized(), 0);
    }
  }

  #[test]
  fn unrecognized_answers_only_count_in_total() {
    let subs = vec![
      submission("a", Some(Attendance::Attending)),
      submission("b", None),
      submission("c", Some(Attendance::NotAttending)),
    ];
    let tally = Tally::of(&subs);
    assert_eq!(tally.attending, 1);
    assert_eq!(tally.not_attending, 1);
    assert_eq!(tally.total, 3);
    assert_eq!(tally.unrecognized(), 1);
  }

  #[test]
  fn unrecognized_never_underflows() {
    let inconsistent = Tally {
      attending:     3,
      not_attending: 2,
      total:         4,
    };
    assert_eq!(inconsistent.unrecognized(), 0);
  }
}
