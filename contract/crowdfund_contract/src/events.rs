use soroban_sdk::{contracttype, Address, Env, String, Symbol};

#[contracttype]
#[derive(Clone)]
pub struct CampaignInitializedEvent {
    pub creator: Address,
    pub token: Address,
    pub goal: i128,
    pub deadline: u64,
    pub min_contribution: i128,
}

#[contracttype]
#[derive(Clone)]
pub struct ContributedEvent {
    pub contributor: Address,
    pub amount: i128,
    pub contributor_total: i128,
    pub total_raised: i128,
}

#[contracttype]
#[derive(Clone)]
pub struct WithdrawnEvent {
    pub creator: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone)]
pub struct RefundedEvent {
    pub contributor: Address,
    pub amount: i128,
    pub total_refunded: i128,
}

#[contracttype]
#[derive(Clone)]
pub struct MetadataUpdatedEvent {
    pub creator: Address,
}

#[contracttype]
#[derive(Clone)]
pub struct RoadmapItemAddedEvent {
    pub date: u64,
    pub description: String,
}

pub fn emit_initialized(env: &Env, event: CampaignInitializedEvent) {
    env.events().publish(
        (Symbol::new(env, "campaign"), Symbol::new(env, "initialized")),
        event,
    );
}

pub fn emit_contributed(env: &Env, event: ContributedEvent) {
    env.events().publish(
        (Symbol::new(env, "campaign"), Symbol::new(env, "contributed")),
        event,
    );
}

pub fn emit_withdrawn(env: &Env, event: WithdrawnEvent) {
    env.events().publish(
        (Symbol::new(env, "campaign"), Symbol::new(env, "withdrawn")),
        event,
    );
}

pub fn emit_refunded(env: &Env, event: RefundedEvent) {
    env.events().publish(
        (Symbol::new(env, "campaign"), Symbol::new(env, "refunded")),
        event,
    );
}

pub fn emit_metadata_updated(env: &Env, event: MetadataUpdatedEvent) {
    env.events().publish(
        (Symbol::new(env, "campaign"), Symbol::new(env, "metadata_updated")),
        event,
    );
}

pub fn emit_roadmap_item_added(env: &Env, event: RoadmapItemAddedEvent) {
    env.events().publish(
        (Symbol::new(env, "campaign"), Symbol::new(env, "roadmap_item_added")),
        event,
    );
}
