pub use self::{amount::*, country::*, history::*, rates::*, transaction::*};

mod amount;
pub mod constants;
pub mod country;
pub mod history;
mod rates;
mod transaction;
