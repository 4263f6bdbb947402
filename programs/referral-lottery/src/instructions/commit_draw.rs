use anchor_lang::prelude::*;
use switchboard_on_demand::accounts::RandomnessAccountData;

use crate::constants::CONFIG_SEED;
use crate::error::ErrorCode;
use crate::state::LotteryConfig;

/// Accounts required to commit a randomness account for the next draw.
///
/// Ensures:
/// 1. Only the lottery authority can commit a draw.
/// 2. No other draw is pending (fail-fast mutual exclusion).
/// 3. The randomness account is fresh and has not been revealed yet.
#[derive(Accounts)]
pub struct CommitDraw<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, LotteryConfig>,

    /// Randomness account from Switchboard.
    /// CHECK: The account's data is validated manually within the handler.
    pub randomness_account_data: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct AbortDraw<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, LotteryConfig>,
}

pub fn process_commit_draw(ctx: Context<CommitDraw>) -> Result<()> {
    let clock = Clock::get()?;
    let config = &mut ctx.accounts.config;
    if ctx.accounts.authority.key() != config.authority {
        return Err(ErrorCode::NotAuthorized.into());
    }

    // At most one draw in flight: a second commit fails instead of
    // blocking, and the caller retries after finalization or abort.
    require!(!config.draw_pending, ErrorCode::DrawInProgress);

    let randomness_data =
        RandomnessAccountData::parse(ctx.accounts.randomness_account_data.data.borrow())
            .map_err(|_| ErrorCode::IncorrectRandomnessAccount)?;

    if randomness_data.seed_slot != clock.slot - 1 {
        return Err(ErrorCode::RandomnessAlreadyRevealed.into());
    }

    config.randomness_account = ctx.accounts.randomness_account_data.key();
    config.draw_pending = true;

    msg!("Draw committed at slot {}", clock.slot);
    Ok(())
}

/// Clears a pending commit whose randomness expired unrevealed. No record
/// is produced; the authority commits again with a fresh account.
pub fn process_abort_draw(ctx: Context<AbortDraw>) -> Result<()> {
    let config = &mut ctx.accounts.config;
    if ctx.accounts.authority.key() != config.authority {
        return Err(ErrorCode::NotAuthorized.into());
    }
    require!(config.draw_pending, ErrorCode::NoDrawPending);

    config.draw_pending = false;
    config.randomness_account = Pubkey::default();

    msg!("Pending draw aborted");
    Ok(())
}
