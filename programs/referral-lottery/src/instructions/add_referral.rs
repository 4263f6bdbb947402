use anchor_lang::prelude::*;

use crate::constants::{MAX_CONTACT_LEN, MAX_NAME_LEN, PARTICIPANT_SEED, REFERRAL_SEED};
use crate::error::ErrorCode;
use crate::state::{Participant, Referral};

/// Accounts required to register a referral. Each referral gets its own
/// account at the owner's next sequence number, so entries are never
/// overwritten and moderation can target them individually.
#[derive(Accounts)]
pub struct AddReferral<'info> {
    #[account(mut)]
    pub wallet: Signer<'info>,

    #[account(
        mut,
        seeds = [PARTICIPANT_SEED, wallet.key().as_ref()],
        bump = participant.bump,
    )]
    pub participant: Account<'info, Participant>,

    #[account(
        init,
        payer = wallet,
        space = 8 + Referral::INIT_SPACE,
        seeds = [
            REFERRAL_SEED,
            wallet.key().as_ref(),
            (participant.referral_count + 1).to_le_bytes().as_ref(),
        ],
        bump
    )]
    pub referral: Account<'info, Referral>,

    pub system_program: Program<'info, System>,
}

pub fn process_add_referral(
    ctx: Context<AddReferral>,
    friend_name: String,
    friend_phone: String,
) -> Result<()> {
    require!(friend_name.len() <= MAX_NAME_LEN, ErrorCode::StringTooLong);
    require!(friend_phone.len() <= MAX_CONTACT_LEN, ErrorCode::StringTooLong);

    let participant = &mut ctx.accounts.participant;
    participant.referral_count += 1;

    let referral = &mut ctx.accounts.referral;
    referral.bump = ctx.bumps.referral;
    referral.owner = participant.wallet;
    referral.sequence = participant.referral_count;
    referral.friend_name = friend_name;
    referral.friend_phone = friend_phone;
    referral.valid = true;
    referral.created_at = Clock::get()?.unix_timestamp;

    msg!(
        "Referral {} registered for {}",
        referral.sequence,
        referral.owner
    );
    Ok(())
}
