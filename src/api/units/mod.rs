mod data_rate;
mod data_size;
mod relative_unit;
mod time_delta;
mod timestamp;
mod unit_base;

pub use data_rate::*;
pub use data_size::*;
pub use time_delta::*;
pub use timestamp::*;

use relative_unit::*;
use unit_base::*;
