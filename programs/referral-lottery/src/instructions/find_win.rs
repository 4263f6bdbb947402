use anchor_lang::prelude::*;

use crate::state::{DrawRecord, WinSummary};

/// Read-only winner lookup over the draw records passed as remaining
/// accounts. Anyone may query.
#[derive(Accounts)]
pub struct FindWin<'info> {
    pub requester: Signer<'info>,
}

/// Scans the supplied draw history for the participant. When the same
/// participant won several draws, the most recent win (highest record
/// index) is reported, whatever order the accounts arrive in.
pub fn process_find_win<'info>(
    ctx: Context<'_, '_, 'info, 'info, FindWin<'info>>,
    participant: Pubkey,
) -> Result<Option<WinSummary>> {
    let mut best: Option<WinSummary> = None;

    for account in ctx.remaining_accounts {
        let record: Account<DrawRecord> = Account::try_from(account)?;
        let record = record.into_inner();
        let Some(winner) = record
            .winners
            .iter()
            .find(|winner| winner.participant == participant)
        else {
            continue;
        };
        if best.as_ref().map_or(true, |b| record.index > b.index) {
            best = Some(WinSummary {
                draw: account.key(),
                index: record.index,
                position: winner.position,
                created_at: record.created_at,
            });
        }
    }

    match &best {
        Some(win) => msg!(
            "Participant {} won draw {} at position {}",
            participant,
            win.index,
            win.position
        ),
        None => msg!("Participant {} has no recorded win", participant),
    }
    Ok(best)
}
