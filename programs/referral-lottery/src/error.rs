use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCode {
    #[msg("Signer is not the lottery authority")]
    NotAuthorized,
    #[msg("Winner count must be between 1 and the supported maximum")]
    InvalidWinnerCount,
    #[msg("Minimum pool size must be at least the winner count")]
    InvalidMinimumPoolSize,
    #[msg("A text field exceeds its maximum length")]
    StringTooLong,
    #[msg("A committed draw is already awaiting finalization")]
    DrawInProgress,
    #[msg("No committed draw is pending")]
    NoDrawPending,
    #[msg("Randomness has already been revealed")]
    RandomnessAlreadyRevealed,
    #[msg("Randomness has not been resolved yet")]
    RandomnessNotResolved,
    #[msg("Randomness account does not match the committed draw")]
    IncorrectRandomnessAccount,
    #[msg("Not enough valid referral tickets to run the draw")]
    InsufficientPool,
    #[msg("Not enough distinct participants hold tickets")]
    InsufficientDistinctParticipants,
    #[msg("Snapshot account is neither a participant, a referral, nor a draw record")]
    UnrecognizedPoolAccount,
    #[msg("Snapshot account was supplied more than once")]
    DuplicatePoolAccount,
    #[msg("Referral owner has no participant account in the snapshot")]
    OrphanedReferral,
    #[msg("Draw history is incomplete for past-winner exclusion")]
    IncompleteDrawHistory,
}
