#![no_std]


mod campaign;
mod events;
mod storage_types;

pub use storage_types::{
    CampaignConfig, CampaignInfo, CampaignStats, CrowdfundError, Metadata, Phase, RoadmapItem,
    BASIS_POINTS, CONTRACT_VERSION, DEFAULT_MIN_CONTRIBUTION, MAX_PAGE_SIZE, MAX_ROADMAP_ITEMS,
};

use soroban_sdk::{contract, contractimpl, log, Address, Env, String, Vec};

#[contract]
pub struct CrowdfundContract;

#[contractimpl]
impl CrowdfundContract {
    /// Set up the campaign. Can only succeed once per deployed instance.
    ///
    /// `min_contribution` defaults to [`DEFAULT_MIN_CONTRIBUTION`] when `None`.
    pub fn initialize(
        env: Env,
        creator: Address,
        token: Address,
        goal: i128,
        deadline: u64,
        min_contribution: Option<i128>,
    ) -> Result<(), CrowdfundError> {
        if campaign::is_initialized(&env) {
            return Err(CrowdfundError::AlreadyInitialized);
        }

        creator.require_auth();

        let min_contribution = min_contribution.unwrap_or(DEFAULT_MIN_CONTRIBUTION);
        let now = env.ledger().timestamp();
        if goal <= 0 || deadline <= now || min_contribution < 1 {
            return Err(CrowdfundError::InvalidParameters);
        }

        let config = CampaignConfig {
            creator: creator.clone(),
            token: token.clone(),
            goal,
            deadline,
            min_contribution,
            created_at: now,
        };

        campaign::store_config(&env, &config);
        campaign::set_total_raised(&env, 0);
        campaign::set_total_refunded(&env, 0);
        campaign::extend_instance(&env);

        events::emit_initialized(
            &env,
            events::CampaignInitializedEvent {
                creator,
                token,
                goal,
                deadline,
                min_contribution,
            },
        );

        Ok(())
    }

    /// Pledge `amount` of the campaign token. Tokens move into contract custody
    /// before anything is credited to the contributor.
    pub fn contribute(env: Env, contributor: Address, amount: i128) -> Result<(), CrowdfundError> {
        contributor.require_auth();

        let config = campaign::load_config(&env)?;
        if campaign::current_phase(&env, &config) != Phase::Collecting {
            return Err(CrowdfundError::CampaignClosed);
        }
        if amount < config.min_contribution {
            return Err(CrowdfundError::BelowMinimum);
        }

        let previous = campaign::contribution(&env, &contributor);
        let contributor_total = previous
            .checked_add(amount)
            .ok_or(CrowdfundError::Overflow)?;
        let total_raised = campaign::total_raised(&env)
            .checked_add(amount)
            .ok_or(CrowdfundError::Overflow)?;

        campaign::transfer(
            &env,
            &config.token,
            &contributor,
            &env.current_contract_address(),
            amount,
        )?;

        campaign::set_contribution(&env, &contributor, contributor_total);
        campaign::set_total_raised(&env, total_raised);

        if previous == 0 {
            campaign::push_contributor(&env, &contributor)?;
        }
        if contributor_total > campaign::largest_contribution(&env) {
            campaign::set_largest_contribution(&env, contributor_total);
        }
        campaign::extend_instance(&env);

        log!(&env, "contribution accepted", contributor, amount, total_raised);

        events::emit_contributed(
            &env,
            events::ContributedEvent {
                contributor,
                amount,
                contributor_total,
                total_raised,
            },
        );

        Ok(())
    }

    /// Pay the whole pool out to the creator once the deadline has passed with
    /// the goal met. Returns the amount transferred.
    pub fn withdraw(env: Env, caller: Address) -> Result<i128, CrowdfundError> {
        caller.require_auth();

        let config = campaign::load_config(&env)?;
        if caller != config.creator {
            return Err(CrowdfundError::Unauthorized);
        }

        if env.ledger().timestamp() < config.deadline {
            return Err(CrowdfundError::TooEarly);
        }
        let amount = campaign::total_raised(&env);
        if amount < config.goal {
            return Err(CrowdfundError::GoalNotMet);
        }
        if campaign::is_withdrawn(&env) {
            return Err(CrowdfundError::AlreadyWithdrawn);
        }

        campaign::transfer(
            &env,
            &config.token,
            &env.current_contract_address(),
            &config.creator,
            amount,
        )?;

        campaign::set_withdrawn(&env);
        campaign::extend_instance(&env);

        log!(&env, "campaign funds withdrawn", amount);

        events::emit_withdrawn(
            &env,
            events::WithdrawnEvent {
                creator: config.creator,
                amount,
            },
        );

        Ok(amount)
    }

    /// Return the caller's cumulative contribution after a missed goal.
    /// Each contributor can be refunded once. Returns the amount transferred.
    pub fn refund(env: Env, caller: Address) -> Result<i128, CrowdfundError> {
        caller.require_auth();

        let config = campaign::load_config(&env)?;
        if env.ledger().timestamp() < config.deadline {
            return Err(CrowdfundError::TooEarly);
        }
        if campaign::total_raised(&env) >= config.goal {
            return Err(CrowdfundError::GoalMet);
        }

        let amount = campaign::contribution(&env, &caller);
        if amount <= 0 || campaign::is_refunded(&env, &caller) {
            return Err(CrowdfundError::NothingToRefund);
        }

        let total_refunded = campaign::total_refunded(&env)
            .checked_add(amount)
            .ok_or(CrowdfundError::Overflow)?;

        campaign::transfer(
            &env,
            &config.token,
            &env.current_contract_address(),
            &caller,
            amount,
        )?;

        campaign::mark_refunded(&env, &caller);
        campaign::set_total_refunded(&env, total_refunded);
        campaign::extend_instance(&env);

        log!(&env, "contribution refunded", caller, amount);

        events::emit_refunded(
            &env,
            events::RefundedEvent {
                contributor: caller,
                amount,
                total_refunded,
            },
        );

        Ok(amount)
    }

    /// Replace the descriptive metadata. Creator only; never touches funds.
    pub fn update_metadata(
        env: Env,
        caller: Address,
        title: String,
        description: String,
        socials: String,
    ) -> Result<(), CrowdfundError> {
        caller.require_auth();

        let config = campaign::load_config(&env)?;
        if caller != config.creator {
            return Err(CrowdfundError::Unauthorized);
        }

        campaign::store_metadata(
            &env,
            &Metadata {
                title,
                description,
                socials,
            },
        );
        campaign::extend_instance(&env);

        events::emit_metadata_updated(
            &env,
            events::MetadataUpdatedEvent {
                creator: config.creator,
            },
        );

        Ok(())
    }

    /// Append a dated milestone to the campaign roadmap. Creator only.
    pub fn add_roadmap_item(
        env: Env,
        caller: Address,
        date: u64,
        description: String,
    ) -> Result<(), CrowdfundError> {
        caller.require_auth();

        let config = campaign::load_config(&env)?;
        if caller != config.creator {
            return Err(CrowdfundError::Unauthorized);
        }
        if date <= env.ledger().timestamp() || description.is_empty() {
            return Err(CrowdfundError::InvalidRoadmapItem);
        }

        let mut roadmap = campaign::roadmap(&env);
        if roadmap.len() >= MAX_ROADMAP_ITEMS {
            return Err(CrowdfundError::RoadmapFull);
        }
        roadmap.push_back(RoadmapItem {
            date,
            description: description.clone(),
        });
        campaign::store_roadmap(&env, &roadmap);
        campaign::extend_instance(&env);

        events::emit_roadmap_item_added(
            &env,
            events::RoadmapItemAddedEvent { date, description },
        );

        Ok(())
    }

    /// View functions
    pub fn creator(env: Env) -> Result<Address, CrowdfundError> {
        Ok(campaign::load_config(&env)?.creator)
    }

    pub fn token(env: Env) -> Result<Address, CrowdfundError> {
        Ok(campaign::load_config(&env)?.token)
    }

    pub fn goal(env: Env) -> Result<i128, CrowdfundError> {
        Ok(campaign::load_config(&env)?.goal)
    }

    pub fn deadline(env: Env) -> Result<u64, CrowdfundError> {
        Ok(campaign::load_config(&env)?.deadline)
    }

    pub fn min_contribution(env: Env) -> Result<i128, CrowdfundError> {
        Ok(campaign::load_config(&env)?.min_contribution)
    }

    pub fn total_raised(env: Env) -> i128 {
        campaign::total_raised(&env)
    }

    pub fn total_refunded(env: Env) -> i128 {
        campaign::total_refunded(&env)
    }

    pub fn is_withdrawn(env: Env) -> bool {
        campaign::is_withdrawn(&env)
    }

    pub fn contribution(env: Env, contributor: Address) -> i128 {
        campaign::contribution(&env, &contributor)
    }

    pub fn is_refunded(env: Env, contributor: Address) -> bool {
        campaign::is_refunded(&env, &contributor)
    }

    /// Contributors in first-contribution order. `limit` is capped at
    /// [`MAX_PAGE_SIZE`]; page through with `start`.
    pub fn contributors(env: Env, start: u32, limit: u32) -> Vec<Address> {
        campaign::contributors_page(&env, start, limit)
    }

    pub fn contributor_count(env: Env) -> u32 {
        campaign::contributor_count(&env)
    }

    pub fn roadmap(env: Env) -> Vec<RoadmapItem> {
        campaign::roadmap(&env)
    }

    pub fn phase(env: Env) -> Result<Phase, CrowdfundError> {
        let config = campaign::load_config(&env)?;
        Ok(campaign::current_phase(&env, &config))
    }

    pub fn get_campaign_info(env: Env) -> Result<CampaignInfo, CrowdfundError> {
        let config = campaign::load_config(&env)?;
        let phase = campaign::current_phase(&env, &config);

        Ok(CampaignInfo {
            creator: config.creator,
            token: config.token,
            goal: config.goal,
            deadline: config.deadline,
            min_contribution: config.min_contribution,
            total_raised: campaign::total_raised(&env),
            phase,
        })
    }

    pub fn get_stats(env: Env) -> Result<CampaignStats, CrowdfundError> {
        let config = campaign::load_config(&env)?;
        let total_raised = campaign::total_raised(&env);
        let contributor_count = campaign::contributor_count(&env);

        Ok(CampaignStats {
            total_raised,
            goal: config.goal,
            progress_bps: campaign::progress_bps(total_raised, config.goal),
            contributor_count,
            average_contribution: campaign::average_contribution(total_raised, contributor_count),
            largest_contribution: campaign::largest_contribution(&env),
        })
    }

    pub fn title(env: Env) -> String {
        campaign::load_metadata(&env).title
    }

    pub fn description(env: Env) -> String {
        campaign::load_metadata(&env).description
    }

    pub fn socials(env: Env) -> String {
        campaign::load_metadata(&env).socials
    }

    pub fn version(_env: Env) -> u32 {
        CONTRACT_VERSION
    }
}
