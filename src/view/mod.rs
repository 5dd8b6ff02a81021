//! Client-side page state: what the list and add-flight screens hold between
//! events, with every derived value recomputed explicitly.

mod autocomplete;
mod flight_form;
mod flight_list;

pub use autocomplete::{Autocomplete, SearchTicket};
pub use flight_form::{FlightForm, FormError};
pub use flight_list::{FlightListView, Notice, Severity};
