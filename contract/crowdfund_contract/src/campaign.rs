use soroban_sdk::{token, Address, Env, String, Vec};

use crate::storage_types::*;

/// Phase of a campaign as a pure function of its counters and the ledger time.
///
/// Nothing schedules the end of collection; every entry point recomputes the
/// phase from these inputs when it runs.
pub fn derive_phase(
    now: u64,
    deadline: u64,
    goal: i128,
    total_raised: i128,
    total_refunded: i128,
    withdrawn: bool,
) -> Phase {
    if now < deadline {
        Phase::Collecting
    } else if total_raised >= goal {
        if withdrawn {
            Phase::Settled
        } else {
            Phase::Succeeded
        }
    } else if total_refunded >= total_raised {
        Phase::Settled
    } else {
        Phase::Failed
    }
}

pub fn current_phase(env: &Env, config: &CampaignConfig) -> Phase {
    derive_phase(
        env.ledger().timestamp(),
        config.deadline,
        config.goal,
        total_raised(env),
        total_refunded(env),
        is_withdrawn(env),
    )
}

/// Progress toward the goal in basis points, capped at 100%.
pub fn progress_bps(total_raised: i128, goal: i128) -> u32 {
    if goal <= 0 {
        return 0;
    }
    match total_raised.checked_mul(BASIS_POINTS as i128) {
        Some(scaled) => {
            let raw = scaled / goal;
            if raw >= BASIS_POINTS as i128 {
                BASIS_POINTS
            } else {
                raw as u32
            }
        }
        None => BASIS_POINTS,
    }
}

/// Mean contribution per distinct contributor, 0 when nobody has contributed.
pub fn average_contribution(total_raised: i128, contributor_count: u32) -> i128 {
    if contributor_count == 0 {
        0
    } else {
        total_raised / contributor_count as i128
    }
}

// Instance storage

pub fn extend_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_INSTANCE_THRESHOLD, TTL_INSTANCE);
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn load_config(env: &Env) -> Result<CampaignConfig, CrowdfundError> {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(CrowdfundError::NotInitialized)
}

pub fn store_config(env: &Env, config: &CampaignConfig) {
    env.storage().instance().set(&DataKey::Config, config);
}

pub fn total_raised(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::TotalRaised)
        .unwrap_or(0)
}

pub fn set_total_raised(env: &Env, amount: i128) {
    env.storage().instance().set(&DataKey::TotalRaised, &amount);
}

pub fn total_refunded(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::TotalRefunded)
        .unwrap_or(0)
}

pub fn set_total_refunded(env: &Env, amount: i128) {
    env.storage().instance().set(&DataKey::TotalRefunded, &amount);
}

pub fn is_withdrawn(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::Withdrawn)
        .unwrap_or(false)
}

pub fn set_withdrawn(env: &Env) {
    env.storage().instance().set(&DataKey::Withdrawn, &true);
}

pub fn load_metadata(env: &Env) -> Metadata {
    env.storage()
        .instance()
        .get(&DataKey::Metadata)
        .unwrap_or_else(|| Metadata {
            title: String::from_str(env, ""),
            description: String::from_str(env, ""),
            socials: String::from_str(env, ""),
        })
}

pub fn store_metadata(env: &Env, metadata: &Metadata) {
    env.storage().instance().set(&DataKey::Metadata, metadata);
}

// Persistent storage, one entry per contributor

fn extend_persistent(env: &Env, key: &PersistentKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_PERSISTENT_THRESHOLD, TTL_PERSISTENT);
}

pub fn contribution(env: &Env, contributor: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&PersistentKey::Contribution(contributor.clone()))
        .unwrap_or(0)
}

pub fn set_contribution(env: &Env, contributor: &Address, amount: i128) {
    let key = PersistentKey::Contribution(contributor.clone());
    env.storage().persistent().set(&key, &amount);
    extend_persistent(env, &key);
}

pub fn is_refunded(env: &Env, contributor: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&PersistentKey::Refunded(contributor.clone()))
        .unwrap_or(false)
}

pub fn mark_refunded(env: &Env, contributor: &Address) {
    let key = PersistentKey::Refunded(contributor.clone());
    env.storage().persistent().set(&key, &true);
    extend_persistent(env, &key);
}

pub fn contributor_count(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&DataKey::ContributorCount)
        .unwrap_or(0)
}

pub fn largest_contribution(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::LargestContribution)
        .unwrap_or(0)
}

pub fn set_largest_contribution(env: &Env, amount: i128) {
    env.storage()
        .instance()
        .set(&DataKey::LargestContribution, &amount);
}

/// Append a first-time contributor under the next insertion index.
pub fn push_contributor(env: &Env, contributor: &Address) -> Result<(), CrowdfundError> {
    let count = contributor_count(env);
    let next = count.checked_add(1).ok_or(CrowdfundError::Overflow)?;

    let key = PersistentKey::Contributor(count);
    env.storage().persistent().set(&key, contributor);
    extend_persistent(env, &key);
    env.storage().instance().set(&DataKey::ContributorCount, &next);
    Ok(())
}

/// Contributors in insertion order, starting at `start`, at most
/// `MAX_PAGE_SIZE` per call.
pub fn contributors_page(env: &Env, start: u32, limit: u32) -> Vec<Address> {
    let count = contributor_count(env);
    let end = start
        .saturating_add(limit.min(MAX_PAGE_SIZE))
        .min(count);

    let mut page = Vec::new(env);
    for index in start..end {
        if let Some(contributor) = env
            .storage()
            .persistent()
            .get::<_, Address>(&PersistentKey::Contributor(index))
        {
            page.push_back(contributor);
        }
    }
    page
}

pub fn roadmap(env: &Env) -> Vec<RoadmapItem> {
    env.storage()
        .persistent()
        .get(&PersistentKey::Roadmap)
        .unwrap_or_else(|| Vec::new(env))
}

pub fn store_roadmap(env: &Env, roadmap: &Vec<RoadmapItem>) {
    env.storage().persistent().set(&PersistentKey::Roadmap, roadmap);
    extend_persistent(env, &PersistentKey::Roadmap);
}

// Token custody

/// Move `amount` of the campaign token, surfacing a rejected transfer as an error
/// instead of trapping the whole invocation.
pub fn transfer(
    env: &Env,
    token_address: &Address,
    from: &Address,
    to: &Address,
    amount: i128,
) -> Result<(), CrowdfundError> {
    let token_client = token::Client::new(env, token_address);
    match token_client.try_transfer(from, to, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(CrowdfundError::TransferFailed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEADLINE: u64 = 1_000;
    const GOAL: i128 = 1_000;

    #[test]
    fn test_collecting_before_deadline() {
        assert_eq!(derive_phase(0, DEADLINE, GOAL, 0, 0, false), Phase::Collecting);
        assert_eq!(derive_phase(999, DEADLINE, GOAL, 5_000, 0, false), Phase::Collecting);
    }

    #[test]
    fn test_deadline_boundary_closes_collection() {
        assert_eq!(derive_phase(DEADLINE, DEADLINE, GOAL, 1_000, 0, false), Phase::Succeeded);
        assert_eq!(derive_phase(DEADLINE, DEADLINE, GOAL, 999, 0, false), Phase::Failed);
    }

    #[test]
    fn test_success_path_settles_on_withdrawal() {
        assert_eq!(derive_phase(2_000, DEADLINE, GOAL, 1_100, 0, true), Phase::Settled);
    }

    #[test]
    fn test_failure_path_settles_when_all_refunded() {
        assert_eq!(derive_phase(2_000, DEADLINE, GOAL, 900, 600, false), Phase::Failed);
        assert_eq!(derive_phase(2_000, DEADLINE, GOAL, 900, 900, false), Phase::Settled);
    }

    #[test]
    fn test_failed_campaign_without_contributions_is_settled() {
        assert_eq!(derive_phase(2_000, DEADLINE, GOAL, 0, 0, false), Phase::Settled);
    }

    #[test]
    fn test_average_contribution() {
        assert_eq!(average_contribution(0, 0), 0);
        assert_eq!(average_contribution(600, 2), 300);
        assert_eq!(average_contribution(1_000, 3), 333);
    }

    #[test]
    fn test_progress_bps() {
        assert_eq!(progress_bps(0, GOAL), 0);
        assert_eq!(progress_bps(250, GOAL), 2_500);
        assert_eq!(progress_bps(1_000, GOAL), BASIS_POINTS);
        assert_eq!(progress_bps(5_000, GOAL), BASIS_POINTS);
        assert_eq!(progress_bps(i128::MAX, GOAL), BASIS_POINTS);
        assert_eq!(progress_bps(10, 0), 0);
    }
}
