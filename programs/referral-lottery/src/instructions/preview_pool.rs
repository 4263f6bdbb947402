use anchor_lang::prelude::*;

use crate::constants::CONFIG_SEED;
use crate::draw;
use crate::instructions::run_draw::PoolSnapshot;
use crate::state::{LotteryConfig, PoolStats};

/// Read-only preview of the current eligibility pool, validated under the
/// same rules as `run_draw`, so the caller can tell whether a draw would
/// go through before committing randomness.
#[derive(Accounts)]
pub struct PreviewPool<'info> {
    pub requester: Signer<'info>,

    #[account(
        seeds = [CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, LotteryConfig>,
}

pub fn process_preview_pool<'info>(
    ctx: Context<'_, '_, 'info, 'info, PreviewPool<'info>>,
) -> Result<PoolStats> {
    let config = &ctx.accounts.config;
    let snapshot = PoolSnapshot::collect(ctx.remaining_accounts)?;
    let past_winners = snapshot.past_winners(config)?;

    let pool = draw::build_pool(&snapshot.participants, &snapshot.referrals, &past_winners);
    let stats = PoolStats {
        total_tickets: pool.len() as u32,
        distinct_participants: draw::distinct_participants(&pool) as u32,
    };

    msg!(
        "Pool preview: {} tickets, {} participants ({} required)",
        stats.total_tickets,
        stats.distinct_participants,
        config.minimum_pool_size
    );
    if stats.total_tickets < config.minimum_pool_size {
        msg!("A draw would fail: pool below the configured minimum");
    }
    Ok(stats)
}
