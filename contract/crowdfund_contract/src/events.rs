use soroban_sdk::{contracttype, Address, Env, Symbol};

#[contracttype]
#[derive(Clone)]
pub struct CampaignCreatedEvent {
    pub creator: Address,
    pub admin: Address,
    pub goal: i128,
    pub rate: i128,
    pub deadline: u64,
}

#[contracttype]
#[derive(Clone)]
pub struct CampaignSetUpEvent {
    pub asset: Address,
    pub deposit: i128,
    pub seeded: i128,
}

#[contracttype]
#[derive(Clone)]
pub struct ContributedEvent {
    pub investor: Address,
    pub amount: i128,
    pub raised: i128,
}

#[contracttype]
#[derive(Clone)]
pub struct FundedEvent {
    pub raised: i128,
    pub funded_at: u64,
}

#[contracttype]
#[derive(Clone)]
pub struct ClaimedEvent {
    pub investor: Address,
    pub contributed: i128,
    pub tokens: i128,
}

#[contracttype]
#[derive(Clone)]
pub struct WithdrawnEvent {
    pub admin_fee: i128,
    pub to_creator: i128,
}

#[contracttype]
#[derive(Clone)]
pub struct RefundedEvent {
    pub investor: Address,
    pub amount: i128,
    pub raised: i128,
}

#[contracttype]
#[derive(Clone)]
pub struct ReclaimedEvent {
    pub deposit: i128,
    pub to_admin: i128,
    pub to_creator: i128,
}

#[contracttype]
#[derive(Clone)]
pub struct SweptEvent {
    pub asset: Address,
    pub amount: i128,
    pub funded: bool,
}

#[contracttype]
#[derive(Clone)]
pub struct VaultClosedEvent {
    pub creator: Address,
    pub amount: i128,
}

pub fn emit_campaign_created(env: &Env, event: CampaignCreatedEvent) {
    env.events().publish((Symbol::new(env, "campaign_created"),), event);
}

pub fn emit_campaign_set_up(env: &Env, event: CampaignSetUpEvent) {
    env.events().publish((Symbol::new(env, "campaign_set_up"),), event);
}

pub fn emit_contributed(env: &Env, event: ContributedEvent) {
    env.events().publish((Symbol::new(env, "contributed"),), event);
}

pub fn emit_funded(env: &Env, event: FundedEvent) {
    env.events().publish((Symbol::new(env, "funded"),), event);
}

pub fn emit_claimed(env: &Env, event: ClaimedEvent) {
    env.events().publish((Symbol::new(env, "claimed"),), event);
}

pub fn emit_withdrawn(env: &Env, event: WithdrawnEvent) {
    env.events().publish((Symbol::new(env, "withdrawn"),), event);
}

pub fn emit_refunded(env: &Env, event: RefundedEvent) {
    env.events().publish((Symbol::new(env, "refunded"),), event);
}

pub fn emit_reclaimed(env: &Env, event: ReclaimedEvent) {
    env.events().publish((Symbol::new(env, "reclaimed"),), event);
}

pub fn emit_swept(env: &Env, event: SweptEvent) {
    env.events().publish((Symbol::new(env, "swept"),), event);
}

pub fn emit_vault_closed(env: &Env, event: VaultClosedEvent) {
    env.events().publish((Symbol::new(env, "vault_closed"),), event);
}

pub fn emit_opted_in(env: &Env, participant: Address) {
    env.events().publish((Symbol::new(env, "opted_in"),), participant);
}

pub fn emit_closed_out(env: &Env, participant: Address) {
    env.events().publish((Symbol::new(env, "closed_out"),), participant);
}
