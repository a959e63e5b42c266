//! HTML rendering of the admin page.

use rsvp_core::{
  admin::{AdminView, View},
  tally::Tally,
};
use serde::Serialize;
use tera::{Context, Tera};

use crate::error::Error;

const TEMPLATE: &str = "admin.html";

/// The compiled page template.
pub struct Pages {
  tera: Tera,
}

#[derive(Serialize)]
struct PageContext<'a> {
  /// `loading`, `failed`, `empty` or `populated`.
  state:   &'static str,
  message: Option<&'a str>,
  tally:   Tally,
  cards:   Vec<Card<'a>>,
  alert:   Option<&'a str>,
}

#[derive(Serialize)]
struct Card<'a> {
  id:        &'a str,
  name:      &'a str,
  status:    &'static str,
  attending: bool,
  drinks:    &'a [String],
  deleting:  bool,
}

impl Pages {
  pub fn new() -> Result<Self, Error> {
    let mut tera = Tera::default();
    tera.add_raw_template(TEMPLATE, include_str!("../templates/admin.html"))?;
    Ok(Self { tera })
  }

  /// Render `view`, optionally with a blocking alert on top.
  pub fn render(&self, view: &AdminView, alert: Option<&str>) -> Result<String, Error> {
    let (state, message, cards) = match view.view() {
      View::Loading => ("loading", None, Vec::new()),
      View::Failed { message } => ("failed", Some(message), Vec::new()),
      View::Empty => ("empty", None, Vec::new()),
      View::Populated(submissions) => (
        "populated",
        None,
        submissions
          .iter()
          .map(|s| Card {
            id:        &s.id,
            name:      &s.name,
            status:    s.status_label(),
            attending: s.is_attending(),
            drinks:    &s.drinks,
            deleting:  view.is_deleting(&s.id),
          })
          .collect(),
      ),
    };

    let ctx = PageContext {
      state,
      message,
      tally: view.tally(),
      cards,
      alert,
    };
    Ok(self.tera.render(TEMPLATE, &Context::from_serialize(&ctx)?)?)
  }
}
