//! Fee and transaction-priority classification, grounded on the
//! global-fee checker's `getTxPriority`/`CombinedFeeRequirement` and its
//! free-oracle-report detection.

use crate::Address;
use std::collections::BTreeMap;

/// A single denom/amount pair. Amounts are `u128` since on-chain coin
/// amounts can exceed `u64` but never need to be negative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coin {
    pub denom: String,
    pub amount: u128,
}

/// `floor(fee[denom] * 10000 / gas)`, clamped to `i64::MAX` on
/// overflow; `0` if `denom` is absent from `fee` or `gas` is zero.
pub fn get_tx_priority(fee: &[Coin], gas: u64, denom: &str) -> i64 {
    let Some(coin) = fee.iter().find(|c| c.denom == denom) else {
        return 0;
    };
    if gas == 0 {
        return 0;
    }
    match coin.amount.checked_mul(10_000) {
        Some(scaled) => {
            let price = scaled / gas as u128;
            price.min(i64::MAX as u128) as i64
        }
        None => i64::MAX,
    }
}

/// Combines a chain-wide minimum fee schedule with a validator's local
/// minimum gas price: for every denom in `global`, take the higher of
/// the two amounts; denoms that only appear in `min_gas_price` are
/// ignored. Falls back to whichever side is non-empty when the other
/// is empty. Result is sorted by denom.
pub fn combined_fee_requirement(global: &[Coin], min_gas_price: &[Coin]) -> Vec<Coin> {
    if min_gas_price.is_empty() {
        return sorted(global.to_vec());
    }
    if global.is_empty() {
        return sorted(min_gas_price.to_vec());
    }

    let local: BTreeMap<&str, u128> = min_gas_price
        .iter()
        .map(|c| (c.denom.as_str(), c.amount))
        .collect();

    let combined = global
        .iter()
        .map(|g| match local.get(g.denom.as_str()) {
            Some(&local_amount) if local_amount > g.amount => Coin {
                denom: g.denom.clone(),
                amount: local_amount,
            },
            _ => g.clone(),
        })
        .collect();

    sorted(combined)
}

fn sorted(mut coins: Vec<Coin>) -> Vec<Coin> {
    coins.sort_by(|a, b| a.denom.cmp(&b.denom));
    coins
}

/// One oracle data report carried inside an authz `MsgExec`.
pub struct OracleReport {
    pub validator: Address,
    pub grantee: Address,
}

/// The host capability this module needs to classify an exec message
/// as a free oracle report: validator/reporter registry lookups and
/// per-report structural validity, both out of scope for this crate.
pub trait ReportAuthority {
    fn is_reporter(&self, validator: &Address, grantee: &Address) -> bool;
    fn check_valid_report(&self, report: &OracleReport) -> bool;
}

/// True iff every message in `reports` is a report from a grantee
/// registered against the stated validator, and every report passes
/// structural validation. Vacuously true for an empty `reports` list,
/// matching `checkExecMsgReportFromReporter`'s loop-then-fall-through.
pub fn is_free_report(reports: &[OracleReport], authority: &dyn ReportAuthority) -> bool {
    reports.iter().all(|r| {
        authority.is_reporter(&r.validator, &r.grantee) && authority.check_valid_report(r)
    })
}
