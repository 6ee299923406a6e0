use cosmwasm_std::{Addr, Timestamp, Uint128};
use cw_storage_plus::{Item, Map};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const CONFIG: Item<Config> = Item::new("config");
/// Account receiving redemption payments. Missing entry means the store is closed.
pub const STORE_ADDRESS: Item<Addr> = Item::new("store_address");
pub const REDEMPTION_CODES: Map<&str, RedemptionCode> = Map::new("redemption_codes");
/// Issuance order of redemption codes, every code appears exactly once
pub const CODE_SEQUENCE: Map<u64, String> = Map::new("code_sequence");
pub const CODE_COUNT: Item<u64> = Item::new("code_count");

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct Config {
    /// The only account allowed to mint, issue redemption codes and run the store
    pub owner: Addr,
    pub policy: RedemptionPolicy,
}

/// How redeeming a code settles on the token ledger
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct RedemptionPolicy {
    pub consumption: Consumption,
    pub payment: Payment,
    /// If set, codes can be redeemed only while the store is open
    pub require_open_store: bool,
}

impl Default for RedemptionPolicy {
    fn default() -> Self {
        Self {
            consumption: Consumption::SingleUse,
            payment: Payment::Price,
            require_open_store: true,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Consumption {
    /// Code is marked as consumed after the first redeem
    SingleUse,
    /// Code stays active and may be redeemed any number of times
    Reusable,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Payment {
    /// Redeemer pays the code `price` and receives freshly minted `amount`
    Price,
    /// Redeemer pays the code `amount` and receives nothing on chain, the code is settled
    /// off-chain by the store
    FaceValue,
}

impl Payment {
    /// Tokens moved from the redeemer to the store
    pub fn cost(self, code: &RedemptionCode) -> Uint128 {
        match self {
            Payment::Price => code.price,
            Payment::FaceValue => code.amount,
        }
    }

    /// Tokens minted to the redeemer
    pub fn grant(self, code: &RedemptionCode) -> Uint128 {
        match self {
            Payment::Price => code.amount,
            Payment::FaceValue => Uint128::zero(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CodeStatus {
    Active,
    Consumed {
        /// Account which redeemed the code
        by: Addr,
        /// Block time of the redeem
        at: Timestamp,
    },
}

/// Redemption code entry
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct RedemptionCode {
    /// Tokens granted by the code
    pub amount: Uint128,
    /// Tokens to be paid for the code
    pub price: Uint128,
    pub status: CodeStatus,
    /// Number of redeems since the code was issued
    pub redemptions: u64,
    /// Position of the code in `CODE_SEQUENCE`
    pub index: u64,
}

impl RedemptionCode {
    pub fn is_active(&self) -> bool {
        matches!(self.status, CodeStatus::Active)
    }
}
