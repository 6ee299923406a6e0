use std::env::current_dir;
use std::fs::create_dir_all;

use cosmwasm_schema::{export_schema, remove_schemas, schema_for};

use degan_token::msg::{
    AllRedemptionCodesResponse, ExecuteMsg, InstantiateMsg, ListRedemptionCodesResponse,
    MigrateMsg, OwnerResponse, QueryMsg, RedemptionCodeResponse, StoreAddressResponse,
};
use degan_token::state::RedemptionPolicy;

fn main() {
    let mut out_dir = current_dir().unwrap();
    out_dir.push("schema");
    create_dir_all(&out_dir).unwrap();
    remove_schemas(&out_dir).unwrap();

    export_schema(&schema_for!(InstantiateMsg), &out_dir);
    export_schema(&schema_for!(ExecuteMsg), &out_dir);
    export_schema(&schema_for!(QueryMsg), &out_dir);
    export_schema(&schema_for!(MigrateMsg), &out_dir);
    export_schema(&schema_for!(OwnerResponse), &out_dir);
    export_schema(&schema_for!(StoreAddressResponse), &out_dir);
    export_schema(&schema_for!(RedemptionPolicy), &out_dir);
    export_schema(&schema_for!(RedemptionCodeResponse), &out_dir);
    export_schema(&schema_for!(AllRedemptionCodesResponse), &out_dir);
    export_schema(&schema_for!(ListRedemptionCodesResponse), &out_dir);
}
