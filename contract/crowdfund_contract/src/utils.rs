use crate::storage_types::{
    Error, Holding, LedgerConfig, COLLATERAL_PERCENT, PERCENT, PLATFORM_FEE_PERCENT,
    RATE_DENOMINATOR,
};

/// Percentage of a value, truncated toward zero
pub fn percent_of(value: i128, percent: i128) -> Result<i128, Error> {
    value
        .checked_mul(percent)
        .map(|v| v / PERCENT)
        .ok_or(Error::Overflow)
}

/// Creator collateral required at setup
pub fn collateral_for(goal: i128) -> Result<i128, Error> {
    percent_of(goal, COLLATERAL_PERCENT)
}

/// Platform fee owed to the admin on success
pub fn platform_fee(raised: i128) -> Result<i128, Error> {
    percent_of(raised, PLATFORM_FEE_PERCENT)
}

/// Reward tokens owed for a contribution; any remainder is dust
pub fn tokens_owed(contributed: i128, rate: i128) -> Result<i128, Error> {
    contributed
        .checked_mul(rate)
        .map(|v| v / RATE_DENOMINATOR)
        .ok_or(Error::Overflow)
}

/// Minimum balance the escrow must keep for its current holdings
pub fn min_balance(config: &LedgerConfig, holding: &Holding) -> i128 {
    match holding {
        Holding::OptedIn => config.base_reserve + config.holding_reserve,
        Holding::Absent | Holding::Closed => config.base_reserve,
    }
}

/// Balance above the minimum, never negative
pub fn unlocked(balance: i128, min_balance: i128) -> i128 {
    if balance > min_balance {
        balance - min_balance
    } else {
        0
    }
}

/// Success-path split of the unlocked balance into (admin fee, creator share)
pub fn success_split(raised: i128, unlocked: i128) -> Result<(i128, i128), Error> {
    let admin_fee = platform_fee(raised)?.min(unlocked);
    Ok((admin_fee, unlocked - admin_fee))
}

/// Failure-path split of the deposit into (admin share, creator share), each
/// capped by what is actually unlocked
pub fn collateral_split(deposit: i128, unlocked: i128) -> (i128, i128) {
    let half = deposit / 2;
    let pay_admin = unlocked.min(half);
    let pay_creator = (unlocked - pay_admin).min(half);
    (pay_admin, pay_creator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use soroban_sdk::{testutils::Address as _, Address, Env};

    #[test]
    fn collateral_is_two_percent_of_goal() {
        assert_eq!(collateral_for(10_000_000), Ok(200_000));
        assert_eq!(collateral_for(49), Ok(0));
        assert_eq!(collateral_for(i128::MAX), Err(Error::Overflow));
    }

    #[test]
    fn tokens_owed_truncates() {
        assert_eq!(tokens_owed(6_000_000, 100), Ok(600));
        assert_eq!(tokens_owed(9_999, 100), Ok(0));
        assert_eq!(tokens_owed(3_333_333, 333_333), Ok(1_111_109));
        assert_eq!(tokens_owed(i128::MAX, 2), Err(Error::Overflow));
    }

    #[test]
    fn unlocked_never_negative() {
        assert_eq!(unlocked(500, 200), 300);
        assert_eq!(unlocked(200, 200), 0);
        assert_eq!(unlocked(100, 200), 0);
    }

    #[test]
    fn success_split_caps_fee_by_unlocked() {
        assert_eq!(success_split(10_000_000, 10_200_000), Ok((200_000, 10_000_000)));
        assert_eq!(success_split(10_000_000, 150_000), Ok((150_000, 0)));
        assert_eq!(success_split(10_000_000, 0), Ok((0, 0)));
    }

    #[test]
    fn collateral_split_halves_and_caps() {
        assert_eq!(collateral_split(200_000, 200_000), (100_000, 100_000));
        assert_eq!(collateral_split(200_000, 1_000_000), (100_000, 100_000));
        assert_eq!(collateral_split(200_000, 150_000), (100_000, 50_000));
        assert_eq!(collateral_split(200_000, 60_000), (60_000, 0));
        // odd unit stays behind
        assert_eq!(collateral_split(200_001, 200_001), (100_000, 100_000));
    }

    #[test]
    fn min_balance_tracks_holding() {
        let env = Env::default();
        let config = LedgerConfig {
            native: Address::generate(&env),
            registry: Address::generate(&env),
            base_reserve: 100_000,
            holding_reserve: 100_000,
        };
        assert_eq!(min_balance(&config, &Holding::Absent), 100_000);
        assert_eq!(min_balance(&config, &Holding::OptedIn), 200_000);
        assert_eq!(min_balance(&config, &Holding::Closed), 100_000);
    }
}
