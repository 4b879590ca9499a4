pub mod gate;
pub mod manager;
pub mod store;
pub mod token;

pub use gate::{authorize, enter, Gate, Screen, ScreenSet};
pub use manager::{Session, SessionManager, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY};
pub use store::{config_dir, FileStore, KeyValueStore, MemoryStore};
pub use token::token_expiry;
