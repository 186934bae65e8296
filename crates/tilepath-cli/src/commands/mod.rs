// One module per subcommand; main.rs parses arguments and dispatches here.

pub mod inspect;
pub mod route;
