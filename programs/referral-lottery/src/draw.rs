use anchor_lang::prelude::*;

use crate::error::ErrorCode;
use crate::state::{Participant, ParticipantRole, Referral};

/// One weighted unit of draw eligibility: a valid referral belonging to a
/// valid, non-administrator participant. Tickets index into the snapshot
/// slices they were built from and live only for one draw computation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket {
    /// Index into the participant snapshot.
    pub participant: usize,
    /// Index into the referral snapshot.
    pub referral: usize,
    /// 1-based ordinal among the owner's valid referrals at build time.
    pub sequence: u32,
}

/// Builds the ticket pool from the supplied snapshots. Emission order is
/// participants then referrals in input order; it carries no weight since
/// the pool is fully shuffled before selection. Empty inputs yield an
/// empty pool.
pub fn build_pool(
    participants: &[Participant],
    referrals: &[Referral],
    past_winners: &[Pubkey],
) -> Vec<Ticket> {
    let mut pool = Vec::new();
    for (participant_index, participant) in participants.iter().enumerate() {
        if participant.role == ParticipantRole::Administrator || !participant.valid {
            continue;
        }
        if past_winners.contains(&participant.wallet) {
            continue;
        }
        let mut sequence = 0u32;
        for (referral_index, referral) in referrals.iter().enumerate() {
            if referral.owner != participant.wallet || !referral.valid {
                continue;
            }
            sequence += 1;
            pool.push(Ticket {
                participant: participant_index,
                referral: referral_index,
                sequence,
            });
        }
    }
    pool
}

/// Number of distinct participants holding at least one ticket.
pub fn distinct_participants(pool: &[Ticket]) -> usize {
    let mut seen: Vec<usize> = Vec::with_capacity(pool.len());
    for ticket in pool {
        if !seen.contains(&ticket.participant) {
            seen.push(ticket.participant);
        }
    }
    seen.len()
}

/// Uniform generator over a splitmix64 stream, seeded from the 32 bytes
/// revealed by the randomness oracle. Nothing about the pool, the slot, or
/// the caller feeds the seed, so separate draws are independently random.
pub struct DrawRng {
    state: u64,
}

impl DrawRng {
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        let mut state = 0u64;
        for lane in seed.chunks_exact(8) {
            state = mix(state ^ u64::from_le_bytes(lane.try_into().unwrap()));
        }
        Self { state }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        mix(self.state)
    }

    /// Uniform value in `[0, bound)`. Values falling in the truncated top
    /// copy of the range are rejected so every residue is equally likely.
    pub fn next_below(&mut self, bound: u64) -> u64 {
        debug_assert!(bound > 0);
        let rejected = (u64::MAX % bound + 1) % bound;
        loop {
            let value = self.next_u64();
            if rejected == 0 || value <= u64::MAX - rejected {
                return value % bound;
            }
        }
    }
}

fn mix(value: u64) -> u64 {
    let mut z = value;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Full Fisher-Yates shuffle; every permutation equally likely given a
/// uniform generator.
pub fn shuffle(tickets: &mut [Ticket], rng: &mut DrawRng) {
    for i in (1..tickets.len()).rev() {
        let j = rng.next_below(i as u64 + 1) as usize;
        tickets.swap(i, j);
    }
}

/// Shuffles the pool and walks it in order, accepting the first ticket of
/// each participant until `winner_count` tickets are accepted. The
/// returned order is the winners' 1-based position.
pub fn select_winners(
    pool: &mut [Ticket],
    winner_count: usize,
    minimum_pool_size: usize,
    rng: &mut DrawRng,
) -> Result<Vec<Ticket>> {
    if pool.len() < minimum_pool_size.max(winner_count) {
        return err!(ErrorCode::InsufficientPool);
    }

    shuffle(pool, rng);

    let mut winners: Vec<Ticket> = Vec::with_capacity(winner_count);
    let mut selected: Vec<usize> = Vec::with_capacity(winner_count);
    for ticket in pool.iter() {
        if winners.len() == winner_count {
            break;
        }
        if selected.contains(&ticket.participant) {
            continue;
        }
        selected.push(ticket.participant);
        winners.push(*ticket);
    }

    if winners.len() < winner_count {
        return err!(ErrorCode::InsufficientDistinctParticipants);
    }
    Ok(winners)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::constants::{DEFAULT_MINIMUM_POOL_SIZE, DEFAULT_WINNER_COUNT};

    const WINNERS: usize = DEFAULT_WINNER_COUNT as usize;
    const MINIMUM: usize = DEFAULT_MINIMUM_POOL_SIZE as usize;

    fn participant(role: ParticipantRole, valid: bool) -> Participant {
        Participant {
            bump: 255,
            wallet: Pubkey::new_unique(),
            name: "Ana Souza".to_string(),
            email: "ana@example.com".to_string(),
            phone: "(11) 98765-4321".to_string(),
            advisor: "Prof. Lima".to_string(),
            schedule: "evening".to_string(),
            program: "intensive".to_string(),
            role,
            valid,
            referral_count: 0,
            created_at: 0,
        }
    }

    fn referral(owner: Pubkey, sequence: u32, valid: bool) -> Referral {
        Referral {
            bump: 255,
            owner,
            sequence,
            friend_name: "Bruno Costa".to_string(),
            friend_phone: "(11) 91234-5678".to_string(),
            valid,
            created_at: 0,
        }
    }

    fn seed(counter: u64) -> [u8; 32] {
        let mut bytes = [0u8; 32];
        bytes[..8].copy_from_slice(&counter.to_le_bytes());
        bytes
    }

    fn assert_error(err: Error, expected: ErrorCode) {
        match err {
            Error::AnchorError(anchor_err) => {
                assert_eq!(anchor_err.error_code_number, 6000 + expected as u32);
            }
            _ => panic!("unexpected error variant"),
        }
    }

    /// One participant with `counts[i]` valid referrals each.
    fn fixture(counts: &[usize]) -> (Vec<Participant>, Vec<Referral>) {
        let participants: Vec<Participant> = counts
            .iter()
            .map(|_| participant(ParticipantRole::Standard, true))
            .collect();
        let mut referrals = Vec::new();
        for (participant, count) in participants.iter().zip(counts) {
            for sequence in 1..=*count {
                referrals.push(referral(participant.wallet, sequence as u32, true));
            }
        }
        (participants, referrals)
    }

    #[test]
    fn build_pool_emits_one_ticket_per_valid_referral() {
        let (participants, referrals) = fixture(&[3, 1, 2]);
        let pool = build_pool(&participants, &referrals, &[]);
        assert_eq!(pool.len(), 6);
        assert_eq!(distinct_participants(&pool), 3);
    }

    #[test]
    fn build_pool_empty_inputs_yield_empty_pool() {
        assert!(build_pool(&[], &[], &[]).is_empty());
        let (participants, _) = fixture(&[1]);
        assert!(build_pool(&participants, &[], &[]).is_empty());
    }

    #[test]
    fn build_pool_excludes_administrators_and_invalid_entries() {
        let admin = participant(ParticipantRole::Administrator, true);
        let excluded = participant(ParticipantRole::Standard, false);
        let eligible = participant(ParticipantRole::Standard, true);
        let referrals = vec![
            referral(admin.wallet, 1, true),
            referral(excluded.wallet, 1, true),
            referral(eligible.wallet, 1, true),
            referral(eligible.wallet, 2, false),
        ];

        // Same result wherever the eligible participant sits in the input.
        for participants in [
            vec![admin.clone(), excluded.clone(), eligible.clone()],
            vec![eligible.clone(), admin.clone(), excluded.clone()],
        ] {
            let pool = build_pool(&participants, &referrals, &[]);
            assert_eq!(pool.len(), 1);
            let winner_wallet = participants[pool[0].participant].wallet;
            assert_eq!(winner_wallet, eligible.wallet);
        }
    }

    #[test]
    fn build_pool_sequences_count_only_valid_referrals() {
        let owner = participant(ParticipantRole::Standard, true);
        let referrals = vec![
            referral(owner.wallet, 1, true),
            referral(owner.wallet, 2, false),
            referral(owner.wallet, 3, true),
        ];
        let pool = build_pool(&[owner], &referrals, &[]);
        let sequences: Vec<u32> = pool.iter().map(|t| t.sequence).collect();
        assert_eq!(sequences, vec![1, 2]);
        assert_eq!(pool[1].referral, 2);
    }

    #[test]
    fn build_pool_excludes_past_winners() {
        let (participants, referrals) = fixture(&[2, 2]);
        let past = vec![participants[0].wallet];
        let pool = build_pool(&participants, &referrals, &past);
        assert_eq!(pool.len(), 2);
        assert!(pool
            .iter()
            .all(|t| participants[t.participant].wallet == participants[1].wallet));
    }

    #[test]
    fn select_rejects_pool_below_minimum() {
        let (participants, referrals) = fixture(&[1; 15]);
        let mut pool = build_pool(&participants, &referrals, &[]);
        assert_eq!(pool.len(), 15);
        let mut rng = DrawRng::from_seed(&seed(7));
        let err = select_winners(&mut pool, WINNERS, MINIMUM, &mut rng).unwrap_err();
        assert_error(err, ErrorCode::InsufficientPool);
    }

    #[test]
    fn select_rejects_too_few_distinct_participants() {
        // 20 tickets but only 10 distinct participants.
        let (participants, referrals) = fixture(&[2; 10]);
        let mut pool = build_pool(&participants, &referrals, &[]);
        assert_eq!(pool.len(), 20);
        let mut rng = DrawRng::from_seed(&seed(11));
        let err = select_winners(&mut pool, WINNERS, MINIMUM, &mut rng).unwrap_err();
        assert_error(err, ErrorCode::InsufficientDistinctParticipants);
    }

    #[test]
    fn select_returns_exactly_n_distinct_winners() {
        let (participants, referrals) = fixture(&[1; 16]);
        let mut pool = build_pool(&participants, &referrals, &[]);
        let mut rng = DrawRng::from_seed(&seed(13));
        let winners = select_winners(&mut pool, WINNERS, MINIMUM, &mut rng).unwrap();
        assert_eq!(winners.len(), WINNERS);
        let mut wallets: Vec<Pubkey> = winners
            .iter()
            .map(|t| participants[t.participant].wallet)
            .collect();
        wallets.sort();
        wallets.dedup();
        assert_eq!(wallets.len(), WINNERS);
    }

    #[test]
    fn heavy_participant_appears_at_most_once() {
        // First participant holds three tickets; selection must still
        // list them a single time.
        let mut counts = vec![1usize; 16];
        counts[0] = 3;
        let (participants, referrals) = fixture(&counts);
        for round in 0..64 {
            let mut pool = build_pool(&participants, &referrals, &[]);
            let mut rng = DrawRng::from_seed(&seed(round));
            let winners = select_winners(&mut pool, WINNERS, MINIMUM, &mut rng).unwrap();
            let heavy = winners
                .iter()
                .filter(|t| participants[t.participant].wallet == participants[0].wallet)
                .count();
            assert_eq!(heavy, 1);
        }
    }

    #[test]
    fn next_below_stays_in_bounds() {
        let mut rng = DrawRng::from_seed(&seed(17));
        for bound in 1..=32u64 {
            for _ in 0..1_000 {
                assert!(rng.next_below(bound) < bound);
            }
        }
    }

    #[test]
    fn next_below_is_uniform() {
        let mut rng = DrawRng::from_seed(&seed(19));
        let mut counts = [0u32; 7];
        let trials = 70_000;
        for _ in 0..trials {
            counts[rng.next_below(7) as usize] += 1;
        }
        for count in counts {
            // Expected 10_000 per residue; ~8 standard deviations of slack.
            assert!((9_200..=10_800).contains(&count), "count {count}");
        }
    }

    #[test]
    fn shuffle_positions_are_uniform() {
        // Track where the first ticket of a 4-ticket pool lands across
        // many independent seeds.
        let (participants, referrals) = fixture(&[1, 1, 1, 1]);
        let mut landed = [0u32; 4];
        let trials = 20_000;
        for counter in 0..trials {
            let mut pool = build_pool(&participants, &referrals, &[]);
            let mut rng = DrawRng::from_seed(&seed(counter));
            shuffle(&mut pool, &mut rng);
            let position = pool.iter().position(|t| t.participant == 0).unwrap();
            landed[position] += 1;
        }
        for count in landed {
            // Expected 5_000 per slot; ~5 standard deviations of slack.
            assert!((4_700..=5_300).contains(&count), "count {count}");
        }
    }

    #[test]
    fn win_frequency_tracks_ticket_share() {
        // One winner per draw over a 3+1+1+1 pool: the heavy participant
        // should win about half the time, the others a sixth each.
        let (participants, referrals) = fixture(&[3, 1, 1, 1]);
        let mut wins = [0u32; 4];
        let trials = 12_000;
        for counter in 0..trials {
            let mut pool = build_pool(&participants, &referrals, &[]);
            let mut rng = DrawRng::from_seed(&seed(counter + 100_000));
            let winners = select_winners(&mut pool, 1, 1, &mut rng).unwrap();
            wins[winners[0].participant] += 1;
        }
        assert!((5_500..=6_500).contains(&wins[0]), "heavy wins {}", wins[0]);
        for &count in &wins[1..] {
            assert!((1_700..=2_300).contains(&count), "light wins {count}");
        }
    }
}
