use anchor_lang::prelude::*;

use crate::constants::{MAX_AFFILIATION_LEN, MAX_CONTACT_LEN, MAX_NAME_LEN, PARTICIPANT_SEED};
use crate::error::ErrorCode;
use crate::state::{Participant, ParticipantRole};

/// Accounts for the participant profile upsert. The account is created on
/// first sign-in; later calls only refresh the profile fields.
#[derive(Accounts)]
pub struct RegisterParticipant<'info> {
    #[account(mut)]
    pub wallet: Signer<'info>,

    #[account(
        init_if_needed,
        payer = wallet,
        space = 8 + Participant::INIT_SPACE,
        seeds = [PARTICIPANT_SEED, wallet.key().as_ref()],
        bump
    )]
    pub participant: Account<'info, Participant>,

    pub system_program: Program<'info, System>,
}

pub fn process_register_participant(
    ctx: Context<RegisterParticipant>,
    name: String,
    email: String,
    phone: String,
    advisor: String,
    schedule: String,
    program: String,
) -> Result<()> {
    require!(
        name.len() <= MAX_NAME_LEN && email.len() <= MAX_NAME_LEN,
        ErrorCode::StringTooLong
    );
    require!(
        phone.len() <= MAX_CONTACT_LEN && schedule.len() <= MAX_CONTACT_LEN,
        ErrorCode::StringTooLong
    );
    require!(
        advisor.len() <= MAX_AFFILIATION_LEN && program.len() <= MAX_AFFILIATION_LEN,
        ErrorCode::StringTooLong
    );

    let participant = &mut ctx.accounts.participant;
    if participant.wallet == Pubkey::default() {
        // First sign-in: start eligible, with no moderation history.
        participant.bump = ctx.bumps.participant;
        participant.wallet = ctx.accounts.wallet.key();
        participant.role = ParticipantRole::Standard;
        participant.valid = true;
        participant.referral_count = 0;
        participant.created_at = Clock::get()?.unix_timestamp;
        msg!("Participant registered: {}", participant.wallet);
    }

    // Profile refresh never touches `valid`, `role`, or the referral
    // counter, so moderation decisions and issued sequences survive edits.
    participant.name = name;
    participant.email = email;
    participant.phone = phone;
    participant.advisor = advisor;
    participant.schedule = schedule;
    participant.program = program;

    Ok(())
}
