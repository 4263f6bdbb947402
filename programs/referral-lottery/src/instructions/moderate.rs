use anchor_lang::prelude::*;

use crate::constants::CONFIG_SEED;
use crate::error::ErrorCode;
use crate::state::{LotteryConfig, Participant, ParticipantRole, Referral};

/// Authority-gated access to a participant account. Used for both the
/// `Active <-> Excluded` validity transition and role assignment.
#[derive(Accounts)]
pub struct ModerateParticipant<'info> {
    pub authority: Signer<'info>,

    #[account(
        seeds = [CONFIG_SEED],
        bump = config.bump,
        has_one = authority @ ErrorCode::NotAuthorized,
    )]
    pub config: Account<'info, LotteryConfig>,

    #[account(mut)]
    pub participant: Account<'info, Participant>,
}

#[derive(Accounts)]
pub struct ModerateReferral<'info> {
    pub authority: Signer<'info>,

    #[account(
        seeds = [CONFIG_SEED],
        bump = config.bump,
        has_one = authority @ ErrorCode::NotAuthorized,
    )]
    pub config: Account<'info, LotteryConfig>,

    #[account(mut)]
    pub referral: Account<'info, Referral>,
}

/// Soft exclusion; the account itself is never closed, so every draw sees
/// the flag as it stands at that moment.
pub fn process_set_participant_status(
    ctx: Context<ModerateParticipant>,
    valid: bool,
) -> Result<()> {
    let participant = &mut ctx.accounts.participant;
    participant.valid = valid;
    msg!(
        "Participant {} marked {}",
        participant.wallet,
        if valid { "active" } else { "excluded" }
    );
    Ok(())
}

pub fn process_set_participant_role(
    ctx: Context<ModerateParticipant>,
    role: ParticipantRole,
) -> Result<()> {
    let participant = &mut ctx.accounts.participant;
    participant.role = role;
    msg!("Participant {} role updated", participant.wallet);
    Ok(())
}

pub fn process_set_referral_status(ctx: Context<ModerateReferral>, valid: bool) -> Result<()> {
    let referral = &mut ctx.accounts.referral;
    referral.valid = valid;
    msg!(
        "Referral {} of {} marked {}",
        referral.sequence,
        referral.owner,
        if valid { "valid" } else { "invalid" }
    );
    Ok(())
}
