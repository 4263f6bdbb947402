#![allow(unexpected_cfgs)]

use anchor_lang::prelude::*;
use instructions::*;

mod constants;
mod draw;
mod error;
mod instructions;
mod state;

use state::{ParticipantRole, PoolStats, WinSummary};

declare_id!("2kWh7Y4e2N4g1EbSnUYTKdRqDHJH7etxZb3VrWDQpNXY");

#[program]
pub mod referral_lottery {
    use super::*;

    pub fn initialize_config(
        ctx: Context<InitializeConfig>,
        winner_count: u16,
        minimum_pool_size: u32,
        exclude_past_winners: bool,
    ) -> Result<()> {
        process_initialize_config(ctx, winner_count, minimum_pool_size, exclude_past_winners)
    }

    pub fn update_config(
        ctx: Context<UpdateConfig>,
        winner_count: u16,
        minimum_pool_size: u32,
        exclude_past_winners: bool,
    ) -> Result<()> {
        process_update_config(ctx, winner_count, minimum_pool_size, exclude_past_winners)
    }

    pub fn register_participant(
        ctx: Context<RegisterParticipant>,
        name: String,
        email: String,
        phone: String,
        advisor: String,
        schedule: String,
        program: String,
    ) -> Result<()> {
        process_register_participant(ctx, name, email, phone, advisor, schedule, program)
    }

    pub fn set_participant_status(ctx: Context<ModerateParticipant>, valid: bool) -> Result<()> {
        process_set_participant_status(ctx, valid)
    }

    pub fn set_participant_role(
        ctx: Context<ModerateParticipant>,
        role: ParticipantRole,
    ) -> Result<()> {
        process_set_participant_role(ctx, role)
    }

    pub fn add_referral(
        ctx: Context<AddReferral>,
        friend_name: String,
        friend_phone: String,
    ) -> Result<()> {
        process_add_referral(ctx, friend_name, friend_phone)
    }

    pub fn set_referral_status(ctx: Context<ModerateReferral>, valid: bool) -> Result<()> {
        process_set_referral_status(ctx, valid)
    }

    pub fn commit_draw(ctx: Context<CommitDraw>) -> Result<()> {
        process_commit_draw(ctx)
    }

    pub fn run_draw<'info>(ctx: Context<'_, '_, 'info, 'info, RunDraw<'info>>) -> Result<u64> {
        process_run_draw(ctx)
    }

    pub fn abort_draw(ctx: Context<AbortDraw>) -> Result<()> {
        process_abort_draw(ctx)
    }

    pub fn find_win<'info>(
        ctx: Context<'_, '_, 'info, 'info, FindWin<'info>>,
        participant: Pubkey,
    ) -> Result<Option<WinSummary>> {
        process_find_win(ctx, participant)
    }

    pub fn preview_pool<'info>(
        ctx: Context<'_, '_, 'info, 'info, PreviewPool<'info>>,
    ) -> Result<PoolStats> {
        process_preview_pool(ctx)
    }
}
