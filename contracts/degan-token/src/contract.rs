#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_binary, Addr, Binary, Deps, DepsMut, Env, Event, MessageInfo, Order, Response, StdError,
    StdResult, Uint128,
};
use cw2::set_contract_version;
use cw20::MinterResponse;
use cw20_base::contract::{query_balance, query_minter, query_token_info};
use cw20_base::enumerable::query_all_accounts;
use cw20_base::state::{BALANCES, TOKEN_INFO};
use cw_storage_plus::Bound;
use degan::DECIMALS;

use crate::error::ContractError;
use crate::msg::{
    AllRedemptionCodesResponse, ExecuteMsg, InstantiateMsg, ListRedemptionCodesResponse,
    MigrateMsg, OwnerResponse, QueryMsg, RedemptionCodeInfo, RedemptionCodeResponse,
    StoreAddressResponse,
};
use crate::state::{
    CodeStatus, Config, Consumption, RedemptionCode, RedemptionPolicy, CODE_COUNT, CODE_SEQUENCE,
    CONFIG, REDEMPTION_CODES, STORE_ADDRESS,
};

// version info for migration info
const CONTRACT_NAME: &str = "crates.io:degan-token";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");
// settings for pagination
const MAX_LIMIT: u32 = 30;
const DEFAULT_LIMIT: u32 = 10;

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    mut deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    // owner is the only minter of the underlying cw20 ledger
    let cw20_msg = cw20_base::msg::InstantiateMsg {
        name: msg.name.clone(),
        symbol: msg.symbol.clone(),
        decimals: DECIMALS,
        initial_balances: msg.initial_balances,
        mint: Some(MinterResponse {
            minter: info.sender.to_string(),
            cap: msg.cap,
        }),
        marketing: None,
    };
    cw20_base::contract::instantiate(deps.branch(), env, info.clone(), cw20_msg)?;
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    CONFIG.save(
        deps.storage,
        &Config {
            owner: info.sender.clone(),
            policy: msg.policy.unwrap_or_default(),
        },
    )?;

    let event = Event::new("create_token")
        .add_attribute("name", msg.name)
        .add_attribute("symbol", msg.symbol)
        .add_attribute("decimals", DECIMALS.to_string())
        .add_attribute("owner", info.sender);
    Ok(Response::new().add_event(event))
}

/// Fails with `Unauthorized` unless `sender` is the contract owner.
pub(crate) fn verify_owner(deps: Deps, sender: &Addr) -> Result<(), ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if config.owner != *sender {
        return Err(ContractError::Unauthorized {});
    }
    Ok(())
}

fn verify_non_zero(amount: Uint128) -> Result<(), ContractError> {
    if amount.is_zero() {
        return Err(ContractError::InvalidArgument(
            "amount has to be greater than zero".to_owned(),
        ));
    }
    Ok(())
}

/// Returns `account` balance if it covers `required` tokens.
fn verify_balance(
    deps: Deps,
    account: &Addr,
    required: Uint128,
) -> Result<Uint128, ContractError> {
    let available = BALANCES.may_load(deps.storage, account)?.unwrap_or_default();
    if available < required {
        return Err(ContractError::InsufficientBalance {
            available,
            required,
        });
    }
    Ok(available)
}

fn execute_transfer(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    recipient: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    verify_non_zero(amount)?;
    verify_balance(deps.as_ref(), &info.sender, amount)?;
    Ok(cw20_base::contract::execute_transfer(
        deps, env, info, recipient, amount,
    )?)
}

fn execute_burn(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    amount: Uint128,
) -> Result<Response, ContractError> {
    verify_non_zero(amount)?;
    verify_balance(deps.as_ref(), &info.sender, amount)?;

    let from = info.sender.clone();
    let res = cw20_base::contract::execute_burn(deps, env, info, amount)?;

    let event = Event::new("burned")
        .add_attribute("from", from)
        .add_attribute("amount", amount);
    Ok(res.add_event(event))
}

fn execute_mint(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    recipient: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    verify_owner(deps.as_ref(), &info.sender)?;
    verify_non_zero(amount)?;

    let res = cw20_base::contract::execute_mint(deps, env, info, recipient.clone(), amount)?;

    let event = Event::new("minted")
        .add_attribute("to", recipient)
        .add_attribute("amount", amount);
    Ok(res.add_event(event))
}

/// Opens the store with `address` receiving redemption payments, or closes it.
fn execute_set_store_address(
    deps: DepsMut,
    info: MessageInfo,
    address: Option<String>,
) -> Result<Response, ContractError> {
    verify_owner(deps.as_ref(), &info.sender)?;

    let address = address
        .map(|address| deps.api.addr_validate(&address))
        .transpose()?;

    match &address {
        Some(address) => STORE_ADDRESS.save(deps.storage, address)?,
        None => STORE_ADDRESS.remove(deps.storage),
    }

    // empty attribute values are rejected by the chain, so closing only reports `open`
    let mut event =
        Event::new("store_address_set").add_attribute("open", address.is_some().to_string());
    if let Some(address) = address {
        event = event.add_attribute("address", address);
    }

    Ok(Response::new()
        .add_event(event)
        .add_attribute("action", "set_store_address"))
}

/// Issues or re-issues redemption code. Re-issued code keeps its position in the issuance order,
/// but its terms are replaced and it becomes active again.
fn execute_generate_redemption_code(
    deps: DepsMut,
    info: MessageInfo,
    code: String,
    amount: Uint128,
    price: Option<Uint128>,
) -> Result<Response, ContractError> {
    verify_owner(deps.as_ref(), &info.sender)?;

    if code.is_empty() {
        return Err(ContractError::InvalidArgument(
            "redemption code cannot be empty".to_owned(),
        ));
    }
    verify_non_zero(amount)?;
    let price = price.unwrap_or_default();

    let index = match REDEMPTION_CODES.may_load(deps.storage, &code)? {
        Some(existing) => existing.index,
        None => {
            let index = CODE_COUNT.may_load(deps.storage)?.unwrap_or_default();
            CODE_SEQUENCE.save(deps.storage, index, &code)?;
            CODE_COUNT.save(deps.storage, &(index + 1))?;
            index
        }
    };

    REDEMPTION_CODES.save(
        deps.storage,
        &code,
        &RedemptionCode {
            amount,
            price,
            status: CodeStatus::Active,
            redemptions: 0,
            index,
        },
    )?;

    let event = Event::new("redemption_code_generated")
        .add_attribute("code", code)
        .add_attribute("amount", amount)
        .add_attribute("price", price);

    Ok(Response::new()
        .add_event(event)
        .add_attribute("action", "generate_redemption_code"))
}

/// Redeems the code on behalf of the sender. Payment goes to the store address, or to the
/// contract itself if the store is closed and the policy doesn't require it to be open. Granted
/// tokens are minted to the sender.
///
/// All checks are done before the first write, so a failing redeem never touches balances.
fn execute_redeem(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    amount: Uint128,
    code: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let policy = config.policy;

    let mut entry = REDEMPTION_CODES
        .may_load(deps.storage, &code)?
        .ok_or_else(|| ContractError::UnknownCode(code.clone()))?;

    if !entry.is_active() {
        return Err(ContractError::CodeConsumed(code));
    }

    if amount != entry.amount {
        return Err(ContractError::AmountMismatch {
            expected: entry.amount,
            got: amount,
        });
    }

    let store = STORE_ADDRESS.may_load(deps.storage)?;
    if policy.require_open_store && store.is_none() {
        return Err(ContractError::StoreClosed {});
    }

    let cost = policy.payment.cost(&entry);
    let grant = policy.payment.grant(&entry);
    let balance = verify_balance(deps.as_ref(), &info.sender, cost)?;

    let mut token_info = TOKEN_INFO.load(deps.storage)?;
    if !grant.is_zero() {
        token_info.total_supply = token_info
            .total_supply
            .checked_add(grant)
            .map_err(StdError::from)?;
        if let Some(cap) = token_info.mint.as_ref().and_then(|minter| minter.cap) {
            if token_info.total_supply > cap {
                return Err(ContractError::CannotExceedCap {});
            }
        }
    }

    let destination = store.unwrap_or_else(|| env.contract.address.clone());

    // payment
    if !cost.is_zero() && destination != info.sender {
        let remaining = balance.checked_sub(cost).map_err(StdError::from)?;
        BALANCES.save(deps.storage, &info.sender, &remaining)?;
        BALANCES.update(
            deps.storage,
            &destination,
            |balance: Option<Uint128>| -> StdResult<_> {
                Ok(balance.unwrap_or_default().checked_add(cost)?)
            },
        )?;
    }

    // grant
    if !grant.is_zero() {
        BALANCES.update(
            deps.storage,
            &info.sender,
            |balance: Option<Uint128>| -> StdResult<_> {
                Ok(balance.unwrap_or_default().checked_add(grant)?)
            },
        )?;
        TOKEN_INFO.save(deps.storage, &token_info)?;
    }

    entry.redemptions += 1;
    if policy.consumption == Consumption::SingleUse {
        entry.status = CodeStatus::Consumed {
            by: info.sender.clone(),
            at: env.block.time,
        };
    }
    REDEMPTION_CODES.save(deps.storage, &code, &entry)?;

    let event = Event::new("redeemed")
        .add_attribute("from", info.sender.clone())
        .add_attribute("to", destination)
        .add_attribute("amount", amount)
        .add_attribute("code", code);

    Ok(Response::new()
        .add_event(event)
        .add_attribute("action", "redeem")
        .add_attribute("paid", cost)
        .add_attribute("granted", grant))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Transfer { recipient, amount } => {
            execute_transfer(deps, env, info, recipient, amount)
        }
        ExecuteMsg::Burn { amount } => execute_burn(deps, env, info, amount),
        ExecuteMsg::Mint { recipient, amount } => execute_mint(deps, env, info, recipient, amount),
        ExecuteMsg::SetStoreAddress { address } => execute_set_store_address(deps, info, address),
        ExecuteMsg::GenerateRedemptionCode {
            code,
            amount,
            price,
        } => execute_generate_redemption_code(deps, info, code, amount, price),
        ExecuteMsg::Redeem { amount, code } => execute_redeem(deps, env, info, amount, code),
    }
}

fn query_owner(deps: Deps) -> StdResult<OwnerResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(OwnerResponse {
        owner: config.owner,
    })
}

fn query_store_address(deps: Deps) -> StdResult<StoreAddressResponse> {
    let address = STORE_ADDRESS.may_load(deps.storage)?;
    Ok(StoreAddressResponse {
        open: address.is_some(),
        address,
    })
}

fn query_policy(deps: Deps) -> StdResult<RedemptionPolicy> {
    CONFIG.load(deps.storage).map(|config| config.policy)
}

fn code_info(code: String, entry: RedemptionCode) -> RedemptionCodeInfo {
    RedemptionCodeInfo {
        code,
        amount: entry.amount,
        price: entry.price,
        status: entry.status,
        redemptions: entry.redemptions,
    }
}

fn query_redemption_code(deps: Deps, code: String) -> StdResult<RedemptionCodeResponse> {
    let entry = REDEMPTION_CODES.may_load(deps.storage, &code)?;
    Ok(RedemptionCodeResponse {
        code: entry.map(|entry| code_info(code, entry)),
    })
}

/// Pagination is done over issuance order, so `start_after` code is translated to its position.
/// Code which was never issued has no position, and the page after it is empty.
fn start_bound(deps: Deps, start_after: Option<String>) -> StdResult<Option<Bound<'static, u64>>> {
    start_after
        .map(|code| {
            REDEMPTION_CODES.may_load(deps.storage, &code).map(|entry| {
                Bound::exclusive(entry.map(|entry| entry.index).unwrap_or(u64::MAX))
            })
        })
        .transpose()
}

fn query_all_redemption_codes(
    deps: Deps,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<AllRedemptionCodesResponse> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = start_bound(deps, start_after)?;

    let codes = CODE_SEQUENCE
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| item.map(|(_, code)| code))
        .collect::<StdResult<_>>()?;

    Ok(AllRedemptionCodesResponse { codes })
}

fn query_list_redemption_codes(
    deps: Deps,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<ListRedemptionCodesResponse> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = start_bound(deps, start_after)?;

    let codes = CODE_SEQUENCE
        .range(deps.storage, start, None, Order::Ascending)
        .map(|item| -> StdResult<_> {
            let (_, code) = item?;
            let entry = REDEMPTION_CODES.load(deps.storage, &code)?;
            Ok((code, entry))
        })
        .filter_map(|item| match item {
            Ok((code, entry)) if entry.is_active() => Some(Ok(code_info(code, entry))),
            Ok(_) => None,
            Err(err) => Some(Err(err)),
        })
        .take(limit)
        .collect::<StdResult<_>>()?;

    Ok(ListRedemptionCodesResponse { codes })
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Balance { address } => to_binary(&query_balance(deps, address)?),
        QueryMsg::TokenInfo {} => to_binary(&query_token_info(deps)?),
        QueryMsg::Minter {} => to_binary(&query_minter(deps)?),
        QueryMsg::AllAccounts { start_after, limit } => {
            to_binary(&query_all_accounts(deps, start_after, limit)?)
        }
        QueryMsg::Owner {} => to_binary(&query_owner(deps)?),
        QueryMsg::StoreAddress {} => to_binary(&query_store_address(deps)?),
        QueryMsg::Policy {} => to_binary(&query_policy(deps)?),
        QueryMsg::RedemptionCode { code } => to_binary(&query_redemption_code(deps, code)?),
        QueryMsg::AllRedemptionCodes { start_after, limit } => {
            to_binary(&query_all_redemption_codes(deps, start_after, limit)?)
        }
        QueryMsg::ListRedemptionCodes { start_after, limit } => {
            to_binary(&query_list_redemption_codes(deps, start_after, limit)?)
        }
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    Ok(Response::new())
}
