use cosmwasm_std::{StdError, Uint128};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Cw20(#[from] cw20_base::ContractError),

    #[error("Unauthorized")]
    Unauthorized {},

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Unknown redemption code: {0}")]
    UnknownCode(String),

    #[error("Redemption code already used: {0}")]
    CodeConsumed(String),

    #[error("Redemption code grants {expected} tokens, {got} requested")]
    AmountMismatch { expected: Uint128, got: Uint128 },

    #[error("Store is closed")]
    StoreClosed {},

    #[error("Insufficient balance, {available} tokens available, {required} required")]
    InsufficientBalance {
        available: Uint128,
        required: Uint128,
    },

    #[error("Minting cannot exceed the cap")]
    CannotExceedCap {},
}
