pub mod generate;
pub mod init;
pub mod inspect;
pub mod schema;

pub use generate::{GenerateArgs, cmd_generate};
pub use init::cmd_init;
pub use inspect::{InspectArgs, cmd_inspect};
pub use schema::cmd_schema;
