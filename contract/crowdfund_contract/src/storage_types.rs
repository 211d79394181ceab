use soroban_sdk::{contracterror, contracttype, Address, String};

// Storage keys for instance data
#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    Config,
    TotalRaised,
    TotalRefunded,
    Withdrawn,
    Metadata,
    ContributorCount,
    LargestContribution,
}

// Storage keys for persistent data
#[derive(Clone)]
#[contracttype]
pub enum PersistentKey {
    Contribution(Address),
    Refunded(Address),
    Contributor(u32), // Insertion index -> contributor
    Roadmap,
}

// Immutable campaign parameters, written once by `initialize`
#[derive(Clone, Debug, PartialEq)]
#[contracttype]
pub struct CampaignConfig {
    pub creator: Address,
    pub token: Address,
    pub goal: i128,
    pub deadline: u64,
    pub min_contribution: i128,
    pub created_at: u64,
}

// Derived lifecycle phase, never stored
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[contracttype]
pub enum Phase {
    Collecting,
    Succeeded,
    Failed,
    Settled,
}

#[derive(Clone, Debug, PartialEq)]
#[contracttype]
pub struct Metadata {
    pub title: String,
    pub description: String,
    pub socials: String,
}

#[derive(Clone, Debug, PartialEq)]
#[contracttype]
pub struct RoadmapItem {
    pub date: u64,
    pub description: String,
}

#[derive(Clone, Debug, PartialEq)]
#[contracttype]
pub struct CampaignInfo {
    pub creator: Address,
    pub token: Address,
    pub goal: i128,
    pub deadline: u64,
    pub min_contribution: i128,
    pub total_raised: i128,
    pub phase: Phase,
}

#[derive(Clone, Debug, PartialEq)]
#[contracttype]
pub struct CampaignStats {
    pub total_raised: i128,
    pub goal: i128,
    pub progress_bps: u32,             // Capped at BASIS_POINTS
    pub contributor_count: u32,
    pub average_contribution: i128,
    pub largest_contribution: i128,
}

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum CrowdfundError {
    AlreadyInitialized = 1,
    InvalidParameters = 2,
    CampaignClosed = 3,
    BelowMinimum = 4,
    TransferFailed = 5,
    Unauthorized = 6,
    TooEarly = 7,
    GoalNotMet = 8,
    GoalMet = 9,
    AlreadyWithdrawn = 10,
    NothingToRefund = 11,
    NotInitialized = 12,
    Overflow = 13,
    InvalidRoadmapItem = 14,
    RoadmapFull = 15,
}

// Constants
pub const CONTRACT_VERSION: u32 = 1;
pub const BASIS_POINTS: u32 = 10000; // 100% in basis points
pub const DEFAULT_MIN_CONTRIBUTION: i128 = 1;
pub const MAX_PAGE_SIZE: u32 = 50; // Upper bound for `contributors` pages
pub const MAX_ROADMAP_ITEMS: u32 = 20;
pub const DAY_IN_LEDGERS: u32 = 17280;
pub const TTL_INSTANCE: u32 = DAY_IN_LEDGERS * 30; // 30 days
pub const TTL_INSTANCE_THRESHOLD: u32 = TTL_INSTANCE - DAY_IN_LEDGERS;
pub const TTL_PERSISTENT: u32 = DAY_IN_LEDGERS * 90; // 90 days
pub const TTL_PERSISTENT_THRESHOLD: u32 = TTL_PERSISTENT - DAY_IN_LEDGERS;
