use anchor_lang::prelude::*;

use crate::constants::{CONFIG_SEED, MAX_WINNERS};
use crate::error::ErrorCode;
use crate::state::LotteryConfig;

/// Accounts required to initialize the lottery configuration.
/// The signer becomes the authority: the only identity able to moderate
/// entries and trigger draws.
#[derive(Accounts)]
pub struct InitializeConfig<'info> {
    /// The account paying for account creation and fees.
    #[account(mut)]
    pub authority: Signer<'info>,

    /// The configuration account for this lottery deployment.
    #[account(
        init,
        payer = authority,
        space = 8 + LotteryConfig::INIT_SPACE,
        seeds = [CONFIG_SEED],
        bump
    )]
    pub config: Account<'info, LotteryConfig>,

    /// System program to create accounts.
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct UpdateConfig<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [CONFIG_SEED],
        bump = config.bump,
        has_one = authority @ ErrorCode::NotAuthorized,
    )]
    pub config: Account<'info, LotteryConfig>,
}

pub fn process_initialize_config(
    ctx: Context<InitializeConfig>,
    winner_count: u16,
    minimum_pool_size: u32,
    exclude_past_winners: bool,
) -> Result<()> {
    validate_draw_params(winner_count, minimum_pool_size)?;

    let config = &mut ctx.accounts.config;
    config.bump = ctx.bumps.config;
    config.authority = ctx.accounts.authority.key();
    config.winner_count = winner_count;
    config.minimum_pool_size = minimum_pool_size;
    config.exclude_past_winners = exclude_past_winners;
    config.draw_count = 0;
    config.draw_pending = false;
    config.randomness_account = Pubkey::default();

    msg!(
        "Lottery configured: {} winners, minimum pool {}",
        winner_count,
        minimum_pool_size
    );
    Ok(())
}

/// Reconfigures the draw parameters. Rejected while a committed draw is
/// pending so a draw never finalizes against parameters it was not
/// committed under.
pub fn process_update_config(
    ctx: Context<UpdateConfig>,
    winner_count: u16,
    minimum_pool_size: u32,
    exclude_past_winners: bool,
) -> Result<()> {
    validate_draw_params(winner_count, minimum_pool_size)?;

    let config = &mut ctx.accounts.config;
    require!(!config.draw_pending, ErrorCode::DrawInProgress);

    config.winner_count = winner_count;
    config.minimum_pool_size = minimum_pool_size;
    config.exclude_past_winners = exclude_past_winners;

    msg!(
        "Lottery reconfigured: {} winners, minimum pool {}",
        winner_count,
        minimum_pool_size
    );
    Ok(())
}

fn validate_draw_params(winner_count: u16, minimum_pool_size: u32) -> Result<()> {
    require!(
        winner_count >= 1 && winner_count <= MAX_WINNERS,
        ErrorCode::InvalidWinnerCount
    );
    require!(
        minimum_pool_size >= winner_count as u32,
        ErrorCode::InvalidMinimumPoolSize
    );
    Ok(())
}
