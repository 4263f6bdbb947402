/// Seed prefixes for the program's PDAs.
pub const CONFIG_SEED: &[u8] = b"config";
pub const PARTICIPANT_SEED: &[u8] = b"participant";
pub const REFERRAL_SEED: &[u8] = b"referral";
pub const DRAW_SEED: &[u8] = b"draw";

/// The reference campaign draws 16 winners from a pool of at least 16
/// valid referrals.
pub const DEFAULT_WINNER_COUNT: u16 = 16;
pub const DEFAULT_MINIMUM_POOL_SIZE: u32 = 16;

/// Upper bound on winners per draw. A fully populated `DrawRecord` for 24
/// winners stays under the 10 KiB limit for accounts created inside an
/// instruction.
pub const MAX_WINNERS: u16 = 24;

/// Length caps for the profile strings snapshotted into draw records.
pub const MAX_NAME_LEN: usize = 48;
pub const MAX_CONTACT_LEN: usize = 24;
pub const MAX_AFFILIATION_LEN: usize = 32;
