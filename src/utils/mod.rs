mod io_utils;
mod util;

pub use io_utils::{create_file, open_append};
pub use util::{handle_error_and_exit, Result};
