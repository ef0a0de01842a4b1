use soroban_sdk::{contracterror, contracttype, Address};

// Storage keys for instance data
#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    Campaign,
    Config,
}

// Storage keys for persistent data
#[derive(Clone)]
#[contracttype]
pub enum PersistentKey {
    Contributor(Address),
}

// Reward token pool, recorded once by setup
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub enum RewardPool {
    Unset,
    Set(Address),
}

// Creator collateral (2% of goal)
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub enum Collateral {
    Unposted,
    Held(i128),
    Reclaimed,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub enum Funding {
    Open,
    Funded,
}

// Creator payout on the success path
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub enum CreatorPayout {
    Pending,
    Withdrawn,
}

// Escrow's holding of the reward token
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub enum Holding {
    Absent,
    OptedIn,
    Closed,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub enum Vault {
    Active,
    Closed,
}

// Derived view of where the campaign is in its lifecycle
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub enum Phase {
    AwaitingSetup,
    Open,
    Funded,
    Failed,
    Closed,
}

// Campaign record, one per contract instance
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct Campaign {
    pub creator: Address,
    pub admin: Address,
    pub goal: i128,
    pub rate: i128,                    // Reward tokens per RATE_DENOMINATOR units contributed
    pub deadline: u64,
    pub pool: RewardPool,
    pub raised: i128,                  // Value held for contributors, never above goal
    pub claimed: i128,                 // Contributions already settled by claim
    pub collateral: Collateral,
    pub funding: Funding,
    pub payout: CreatorPayout,
    pub holding: Holding,
    pub vault: Vault,
}

// Per-participant record, created on opt-in
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct ContributorRecord {
    pub contributed: i128,
}

// Ledger collaborators and reserve policy, fixed at creation
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct LedgerConfig {
    pub native: Address,               // Native currency token contract
    pub registry: Address,             // Asset registry answering control policy queries
    pub base_reserve: i128,            // Minimum balance while the escrow exists
    pub holding_reserve: i128,         // Added while the reward holding is open
}

// Control authorities an issuer may retain over an asset
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct AssetControls {
    pub freeze: Option<Address>,
    pub clawback: Option<Address>,
    pub default_frozen: bool,
}

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    InvalidGoal = 3,
    InvalidRate = 4,
    InvalidDeadline = 5,
    InvalidConfig = 6,
    NotCreator = 7,
    AlreadySetUp = 8,
    NotSetUp = 9,
    BundleShape = 10,
    BundleMismatch = 11,
    SeedTooSmall = 12,
    AssetControlled = 13,
    InvalidAsset = 14,
    FeeBudgetTooLow = 15,
    FeeBudgetExhausted = 16,
    ReserveUnderfunded = 17,
    InsufficientUnlocked = 18,
    NotOptedIn = 19,
    AlreadyOptedIn = 20,
    AmountTooSmall = 21,
    Oversubscribed = 22,
    DeadlinePassed = 23,
    DeadlineNotPassed = 24,
    AlreadyFunded = 25,
    NotFunded = 26,
    NothingContributed = 27,
    AlreadyWithdrawn = 28,
    NotWithdrawn = 29,
    RefundsOutstanding = 30,
    ClaimsOutstanding = 31,
    CollateralNotHeld = 32,
    CollateralHeld = 33,
    HoldingNotOpen = 34,
    HoldingOpen = 35,
    ContributionOutstanding = 36,
    VaultClosed = 37,
    Overflow = 38,
}

// Constants
pub const RATE_DENOMINATOR: i128 = 1_000_000; // Rate is tokens per 1_000_000 units
pub const COLLATERAL_PERCENT: i128 = 2;        // Creator deposit, percent of goal
pub const PLATFORM_FEE_PERCENT: i128 = 2;      // Admin fee on success, percent of raised
pub const PERCENT: i128 = 100;
pub const TTL_INSTANCE: u32 = 17280 * 30; // 30 days
pub const TTL_PERSISTENT: u32 = 17280 * 90; // 90 days
