mod error;
pub use error::AppError;

mod env;
pub use env::AppEnv;

mod json_file;
pub use json_file::{load_json, save_json};

mod message;
pub use message::{ConversationTurn, Reply};
