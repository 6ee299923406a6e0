use cosmwasm_std::{Addr, Uint128};
use cw20::Cw20Coin;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::{CodeStatus, RedemptionPolicy};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct InstantiateMsg {
    pub name: String,
    pub symbol: String,
    pub initial_balances: Vec<Cw20Coin>,
    /// Optional cap on total supply, enforced on mint and on redemption grants
    pub cap: Option<Uint128>,
    /// Settlement rules for redemption codes, defaults to single-use priced codes sold only
    /// while the store is open
    pub policy: Option<RedemptionPolicy>,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, JsonSchema, Debug)]
#[serde(rename_all = "snake_case")]
pub enum ExecuteMsg {
    /// Transfer is a base message to move tokens to another account without triggering actions
    Transfer { recipient: String, amount: Uint128 },
    /// Burn is a base message to destroy own tokens forever
    Burn { amount: Uint128 },
    /// Creates amount new tokens and adds to the recipient balance. Owner only.
    Mint { recipient: String, amount: Uint128 },
    /// Opens the store with given address as receiver of redemption payments, or closes it
    /// if address is not set. Owner only.
    SetStoreAddress { address: Option<String> },
    /// Issues redemption code granting `amount` tokens for `price` tokens. Issuing an already
    /// existing code overwrites it and makes it active again. Owner only.
    GenerateRedemptionCode {
        /// Case-sensitive, non-empty code
        code: String,
        /// Tokens granted to redeemer, has to be non-zero
        amount: Uint128,
        /// Tokens paid by redeemer, zero if not set
        price: Option<Uint128>,
    },
    /// Redeems the code on behalf of the message sender.
    ///
    /// This causes `redeemed` event with the payer, payment receiver, amount and code.
    Redeem {
        /// Has to match the amount the code was issued with
        amount: Uint128,
        code: String,
    },
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum QueryMsg {
    /// Returns the current balance of the given address, 0 if unset.
    /// Return type: BalanceResponse.
    Balance { address: String },
    /// Returns metadata on the contract - name, decimals, supply, etc.
    /// Return type: TokenInfoResponse.
    TokenInfo {},
    /// Returns who can mint and how much.
    /// Return type: Option<MinterResponse>.
    Minter {},
    /// Returns all accounts that have balances. Supports pagination.
    /// Return type: AllAccountsResponse.
    AllAccounts {
        start_after: Option<String>,
        limit: Option<u32>,
    },
    /// Return type: OwnerResponse
    Owner {},
    /// Returns the store address, if the store is open.
    /// Return type: StoreAddressResponse
    StoreAddress {},
    /// Return type: RedemptionPolicy
    Policy {},
    /// Get details of particular code
    ///
    /// Return type: RedemptionCodeResponse
    RedemptionCode { code: String },
    /// Returns all codes ever issued, in issuance order, consumed ones included.
    /// Return type: AllRedemptionCodesResponse
    AllRedemptionCodes {
        /// Code after which to start reading for pagination
        start_after: Option<String>,
        /// Maximum number of entries to return
        limit: Option<u32>,
    },
    /// Returns codes which may still be redeemed, in issuance order.
    /// Return type: ListRedemptionCodesResponse
    ListRedemptionCodes {
        /// Code after which to start reading for pagination
        start_after: Option<String>,
        /// Maximum number of entries to return
        limit: Option<u32>,
    },
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct MigrateMsg {}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct OwnerResponse {
    pub owner: Addr,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct StoreAddressResponse {
    pub address: Option<Addr>,
    pub open: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct RedemptionCodeInfo {
    pub code: String,
    /// Tokens granted by the code
    pub amount: Uint128,
    /// Tokens to be paid for the code
    pub price: Uint128,
    pub status: CodeStatus,
    /// Number of redeems since the code was issued
    pub redemptions: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct RedemptionCodeResponse {
    pub code: Option<RedemptionCodeInfo>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct AllRedemptionCodesResponse {
    pub codes: Vec<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct ListRedemptionCodesResponse {
    pub codes: Vec<RedemptionCodeInfo>,
}
