use anchor_lang::prelude::*;

use crate::constants::{MAX_AFFILIATION_LEN, MAX_CONTACT_LEN, MAX_NAME_LEN};

#[account]
#[derive(InitSpace)]
pub struct LotteryConfig {
    /// The bump seed used for deriving the PDA address of this account.
    pub bump: u8,

    /// The only identity allowed to moderate entries and trigger draws.
    pub authority: Pubkey,

    /// Number of winners selected per draw.
    pub winner_count: u16,

    /// Smallest ticket pool a draw may run against. Never below
    /// `winner_count`.
    pub minimum_pool_size: u32,

    /// When set, participants recorded as winners of earlier draws are
    /// left out of later pools.
    pub exclude_past_winners: bool,

    /// Number of completed draws; also the index of the next draw record.
    pub draw_count: u64,

    /// A draw has been committed and awaits finalization.
    pub draw_pending: bool,

    /// The randomness account pinned by the pending commit, or the
    /// default pubkey when no draw is pending.
    pub randomness_account: Pubkey,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub enum ParticipantRole {
    Standard,
    Administrator,
}

#[account]
#[derive(InitSpace)]
pub struct Participant {
    pub bump: u8,

    /// Wallet that owns this profile; the participant's identifier.
    pub wallet: Pubkey,

    #[max_len(MAX_NAME_LEN)]
    pub name: String,
    #[max_len(MAX_NAME_LEN)]
    pub email: String,
    #[max_len(MAX_CONTACT_LEN)]
    pub phone: String,

    /// Affiliation fields from the enrollment profile.
    #[max_len(MAX_AFFILIATION_LEN)]
    pub advisor: String,
    #[max_len(MAX_CONTACT_LEN)]
    pub schedule: String,
    #[max_len(MAX_AFFILIATION_LEN)]
    pub program: String,

    /// Administrators never enter the pool, whatever `valid` says.
    pub role: ParticipantRole,

    /// Soft exclusion flag. Accounts are never closed; a disqualified
    /// participant is flipped to `false` by the authority.
    pub valid: bool,

    /// Referrals ever registered by this participant; the next referral
    /// takes sequence `referral_count + 1`.
    pub referral_count: u32,

    pub created_at: i64,
}

#[account]
#[derive(InitSpace)]
pub struct Referral {
    pub bump: u8,

    /// Wallet of the participant who made the referral.
    pub owner: Pubkey,

    /// 1-based creation ordinal within the owner; part of the PDA seeds.
    pub sequence: u32,

    #[max_len(MAX_NAME_LEN)]
    pub friend_name: String,
    #[max_len(MAX_CONTACT_LEN)]
    pub friend_phone: String,

    /// Counted as a ticket only while `true`.
    pub valid: bool,

    pub created_at: i64,
}

/// Snapshot of one winning ticket, captured at draw time. Later profile
/// edits or validity flips never touch a recorded winner.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct Winner {
    pub participant: Pubkey,
    pub participant_name: String,
    pub participant_email: String,
    pub participant_phone: String,
    pub advisor: String,
    pub schedule: String,
    pub program: String,
    pub referral: Pubkey,
    pub referral_name: String,
    pub referral_phone: String,
    /// 1-based position of the winning ticket among the participant's
    /// valid referrals at draw time.
    pub ticket_sequence: u32,
    /// 1-based selection order within the draw.
    pub position: u16,
}

impl Winner {
    /// Borsh upper bound for a fully populated entry.
    pub const MAX_SIZE: usize = 32
        + (4 + MAX_NAME_LEN)
        + (4 + MAX_NAME_LEN)
        + (4 + MAX_CONTACT_LEN)
        + (4 + MAX_AFFILIATION_LEN)
        + (4 + MAX_CONTACT_LEN)
        + (4 + MAX_AFFILIATION_LEN)
        + 32
        + (4 + MAX_NAME_LEN)
        + (4 + MAX_CONTACT_LEN)
        + 4
        + 2;
}

/// Outcome of one completed draw. Created exactly once; the program
/// exposes no instruction that mutates or closes a record.
#[account]
pub struct DrawRecord {
    pub bump: u8,

    /// Position in the history; part of the PDA seeds. Descending index
    /// is most-recent-first.
    pub index: u64,

    /// Exactly `winner_count` entries in selection order.
    pub winners: Vec<Winner>,

    /// Ticket pool size at draw time.
    pub total_tickets: u32,

    /// Distinct participants holding at least one ticket at draw time.
    pub total_participants: u32,

    pub created_at: i64,

    /// Authority that triggered the draw.
    pub created_by: Pubkey,
}

impl DrawRecord {
    /// Discriminator, bump, index, vec length, both totals, timestamp,
    /// creator.
    pub const BASE_SIZE: usize = 8 + 1 + 8 + 4 + 4 + 4 + 8 + 32;

    pub fn space(winner_count: u16) -> usize {
        Self::BASE_SIZE + winner_count as usize * Winner::MAX_SIZE
    }
}

/// Return data of `find_win`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct WinSummary {
    pub draw: Pubkey,
    pub index: u64,
    pub position: u16,
    pub created_at: i64,
}

/// Return data of `preview_pool`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PoolStats {
    pub total_tickets: u32,
    pub distinct_participants: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn max_string(len: usize) -> String {
        "x".repeat(len)
    }

    fn max_winner() -> Winner {
        Winner {
            participant: Pubkey::new_unique(),
            participant_name: max_string(MAX_NAME_LEN),
            participant_email: max_string(MAX_NAME_LEN),
            participant_phone: max_string(MAX_CONTACT_LEN),
            advisor: max_string(MAX_AFFILIATION_LEN),
            schedule: max_string(MAX_CONTACT_LEN),
            program: max_string(MAX_AFFILIATION_LEN),
            referral: Pubkey::new_unique(),
            referral_name: max_string(MAX_NAME_LEN),
            referral_phone: max_string(MAX_CONTACT_LEN),
            ticket_sequence: u32::MAX,
            position: u16::MAX,
        }
    }

    #[test]
    fn winner_max_size_bounds_serialized_entry() {
        let bytes = max_winner().try_to_vec().expect("serialize");
        assert_eq!(bytes.len(), Winner::MAX_SIZE);
    }

    #[test]
    fn draw_record_space_covers_full_record() {
        let winners: Vec<Winner> = (0..16).map(|_| max_winner()).collect();
        let record = DrawRecord {
            bump: 255,
            index: u64::MAX,
            winners,
            total_tickets: u32::MAX,
            total_participants: u32::MAX,
            created_at: i64::MAX,
            created_by: Pubkey::new_unique(),
        };
        let bytes = record.try_to_vec().expect("serialize");
        // +8 for the account discriminator prepended on-chain.
        assert!(bytes.len() + 8 <= DrawRecord::space(16));
    }
}
