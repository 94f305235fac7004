use std::collections::BTreeMap;
use std::str::FromStr as _;

use serde::{Deserialize, Serialize};

use crate::clob::types::BalanceAllowance;
use crate::types::{Address, Decimal, U256};

/// USDC collateral precision on Polygon.
pub const USDC_DECIMALS: u32 = 6;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedBalance {
    pub balance: String,
    /// Largest allowance granted to any exchange spender.
    pub allowance: String,
    pub allowances: BTreeMap<String, String>,
    pub address: String,
}

#[must_use]
pub fn format_balance(raw: &BalanceAllowance, address: Address) -> FormattedBalance {
    let mut largest = U256::ZERO;
    let allowances = raw
        .allowances
        .iter()
        .map(|(spender, amount)| {
            let scaled = match U256::from_str(amount.trim()) {
                Ok(value) => {
                    largest = largest.max(value);
                    usdc_from_base_units(value)
                }
                Err(_) => amount.clone(),
            };
            (spender.clone(), scaled)
        })
        .collect();

    FormattedBalance {
        balance: (raw.balance / Decimal::from(10_u64.pow(USDC_DECIMALS)))
            .normalize()
            .to_string(),
        allowance: usdc_from_base_units(largest),
        allowances,
        address: address.to_string(),
    }
}

/// Scales raw 6-decimal base units into a plain decimal string.
///
/// Allowances are routinely `2^256 - 1`, far outside [`Decimal`]'s range, so
/// this works on [`U256`].
#[must_use]
pub fn usdc_from_base_units(raw: U256) -> String {
    let unit = U256::from(10_u64.pow(USDC_DECIMALS));
    let whole = raw / unit;
    let fraction = raw % unit;

    if fraction.is_zero() {
        whole.to_string()
    } else {
        let digits = format!("{:0>width$}", fraction.to_string(), width = USDC_DECIMALS as usize);
        format!("{whole}.{}", digits.trim_end_matches('0'))
    }
}
