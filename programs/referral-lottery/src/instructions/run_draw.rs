use anchor_lang::prelude::*;
use anchor_lang::Discriminator;
use switchboard_on_demand::accounts::RandomnessAccountData;

use crate::constants::{CONFIG_SEED, DRAW_SEED};
use crate::draw::{self, DrawRng, Ticket};
use crate::error::ErrorCode;
use crate::state::{DrawRecord, LotteryConfig, Participant, Referral, Winner};

/// Accounts required to finalize a committed draw.
///
/// The remaining accounts carry the live eligibility snapshot: every
/// participant account, every referral account, and (when past winners
/// are excluded) every prior draw record. The pool is rebuilt from them
/// on each invocation; nothing is cached between draws.
#[derive(Accounts)]
pub struct RunDraw<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, LotteryConfig>,

    /// The randomness oracle account pinned by the commit.
    /// CHECK: The account's data is validated manually within the handler.
    pub randomness_account_data: UncheckedAccount<'info>,

    /// The record of this draw. Created here, in the same transaction
    /// that selects the winners, and never touched again: a failure
    /// anywhere aborts the whole transaction and leaves no record.
    #[account(
        init,
        payer = authority,
        space = DrawRecord::space(config.winner_count),
        seeds = [DRAW_SEED, config.draw_count.to_le_bytes().as_ref()],
        bump
    )]
    pub draw_record: Account<'info, DrawRecord>,

    pub system_program: Program<'info, System>,
}

pub fn process_run_draw<'info>(ctx: Context<'_, '_, 'info, 'info, RunDraw<'info>>) -> Result<u64> {
    let clock = Clock::get()?;
    let config = &mut ctx.accounts.config;
    if ctx.accounts.authority.key() != config.authority {
        return Err(ErrorCode::NotAuthorized.into());
    }
    require!(config.draw_pending, ErrorCode::NoDrawPending);
    if ctx.accounts.randomness_account_data.key() != config.randomness_account {
        return Err(ErrorCode::IncorrectRandomnessAccount.into());
    }

    let randomness_data =
        RandomnessAccountData::parse(ctx.accounts.randomness_account_data.data.borrow())
            .map_err(|_| ErrorCode::IncorrectRandomnessAccount)?;
    let revealed = randomness_data
        .get_value(&clock)
        .map_err(|_| ErrorCode::RandomnessNotResolved)?;

    let snapshot = PoolSnapshot::collect(ctx.remaining_accounts)?;
    let past_winners = snapshot.past_winners(config)?;

    let mut pool = draw::build_pool(&snapshot.participants, &snapshot.referrals, &past_winners);
    let total_tickets = pool.len();
    let total_participants = draw::distinct_participants(&pool);

    msg!(
        "Pool: {} tickets from {} participants (required: {} tickets, {} winners)",
        total_tickets,
        total_participants,
        config.minimum_pool_size,
        config.winner_count
    );

    let mut rng = DrawRng::from_seed(&revealed);
    let winning_tickets = draw::select_winners(
        &mut pool,
        config.winner_count as usize,
        config.minimum_pool_size as usize,
        &mut rng,
    )?;

    let record = &mut ctx.accounts.draw_record;
    record.bump = ctx.bumps.draw_record;
    record.index = config.draw_count;
    record.winners = winning_tickets
        .iter()
        .enumerate()
        .map(|(i, ticket)| snapshot.winner_snapshot(ticket, (i + 1) as u16))
        .collect();
    record.total_tickets = total_tickets as u32;
    record.total_participants = total_participants as u32;
    record.created_at = clock.unix_timestamp;
    record.created_by = ctx.accounts.authority.key();

    config.draw_count += 1;
    config.draw_pending = false;
    config.randomness_account = Pubkey::default();

    msg!(
        "Draw {} complete: {} winners recorded",
        record.index,
        record.winners.len()
    );
    Ok(record.index)
}

/// Deserialized copy of the eligibility snapshot passed through the
/// remaining accounts, partitioned by account type.
pub struct PoolSnapshot {
    pub participants: Vec<Participant>,
    pub referrals: Vec<Referral>,
    pub referral_keys: Vec<Pubkey>,
    pub draw_records: Vec<DrawRecord>,
}

impl PoolSnapshot {
    pub fn collect<'info>(accounts: &'info [AccountInfo<'info>]) -> Result<Self> {
        let mut snapshot = Self {
            participants: Vec::new(),
            referrals: Vec::new(),
            referral_keys: Vec::new(),
            draw_records: Vec::new(),
        };
        let mut seen: Vec<Pubkey> = Vec::with_capacity(accounts.len());

        for account in accounts {
            let key = account.key();
            if seen.contains(&key) {
                msg!("Snapshot account supplied twice: {}", key);
                return err!(ErrorCode::DuplicatePoolAccount);
            }
            seen.push(key);

            let discriminator = {
                let data = account.try_borrow_data()?;
                if data.len() < 8 {
                    return err!(ErrorCode::UnrecognizedPoolAccount);
                }
                let mut bytes = [0u8; 8];
                bytes.copy_from_slice(&data[..8]);
                bytes
            };

            // `Account::try_from` re-checks the program owner and the
            // discriminator on top of deserializing.
            if discriminator == Participant::DISCRIMINATOR {
                let participant: Account<Participant> = Account::try_from(account)?;
                snapshot.participants.push(participant.into_inner());
            } else if discriminator == Referral::DISCRIMINATOR {
                let referral: Account<Referral> = Account::try_from(account)?;
                snapshot.referrals.push(referral.into_inner());
                snapshot.referral_keys.push(key);
            } else if discriminator == DrawRecord::DISCRIMINATOR {
                let record: Account<DrawRecord> = Account::try_from(account)?;
                snapshot.draw_records.push(record.into_inner());
            } else {
                msg!("Unrecognized snapshot account: {}", key);
                return err!(ErrorCode::UnrecognizedPoolAccount);
            }
        }

        snapshot.check_referral_owners()?;
        Ok(snapshot)
    }

    /// Every referral must be accompanied by its owner's participant
    /// account, valid or not; a silently missing owner would undercount
    /// the pool.
    fn check_referral_owners(&self) -> Result<()> {
        for referral in &self.referrals {
            if !self
                .participants
                .iter()
                .any(|participant| participant.wallet == referral.owner)
            {
                msg!("Referral owner missing from snapshot: {}", referral.owner);
                return err!(ErrorCode::OrphanedReferral);
            }
        }
        Ok(())
    }

    /// Wallets recorded as winners in prior draws. With the exclusion
    /// policy enabled the supplied history must cover every index in
    /// `0..draw_count`, so no past winner can be smuggled back in by
    /// withholding a record.
    pub fn past_winners(&self, config: &LotteryConfig) -> Result<Vec<Pubkey>> {
        if !config.exclude_past_winners {
            return Ok(Vec::new());
        }

        let mut covered = vec![false; config.draw_count as usize];
        let mut winners = Vec::new();
        for record in &self.draw_records {
            let index = record.index as usize;
            if index >= covered.len() || covered[index] {
                return err!(ErrorCode::IncompleteDrawHistory);
            }
            covered[index] = true;
            winners.extend(record.winners.iter().map(|winner| winner.participant));
        }
        if covered.contains(&false) {
            msg!(
                "Draw history incomplete: {} of {} records supplied",
                self.draw_records.len(),
                config.draw_count
            );
            return err!(ErrorCode::IncompleteDrawHistory);
        }
        Ok(winners)
    }

    /// Freezes one winning ticket into its persisted snapshot.
    pub fn winner_snapshot(&self, ticket: &Ticket, position: u16) -> Winner {
        let participant = &self.participants[ticket.participant];
        let referral = &self.referrals[ticket.referral];
        Winner {
            participant: participant.wallet,
            participant_name: participant.name.clone(),
            participant_email: participant.email.clone(),
            participant_phone: participant.phone.clone(),
            advisor: participant.advisor.clone(),
            schedule: participant.schedule.clone(),
            program: participant.program.clone(),
            referral: self.referral_keys[ticket.referral],
            referral_name: referral.friend_name.clone(),
            referral_phone: referral.friend_phone.clone(),
            ticket_sequence: ticket.sequence,
            position,
        }
    }
}
