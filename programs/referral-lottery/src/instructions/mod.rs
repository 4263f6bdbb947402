pub mod add_referral;
pub mod admin;
pub mod commit_draw;
pub mod find_win;
pub mod moderate;
pub mod preview_pool;
pub mod register_participant;
pub mod run_draw;

pub use add_referral::*;
pub use admin::*;
pub use commit_draw::*;
pub use find_win::*;
pub use moderate::*;
pub use preview_pool::*;
pub use register_participant::*;
pub use run_draw::*;
