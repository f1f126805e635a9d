// Route compiler
// Turns a chosen quote into batch-executor commands: hops are grouped by pool
// family and each group becomes one swap command, with funds handed from group
// to group through the router or straight into the next pool
//
// Numan Thabit 2025 Nov

use alloy::primitives::{Address, U256};
use rust_decimal::Decimal;
use tracing::debug;

use crate::abi::{UnwrapNativeParams, V2SwapExactInParams, V3SwapExactInParams, WrapNativeParams};
use crate::config::ChainConfig;
use crate::errors::AggrError;
use crate::math;
use crate::metrics::ROUTES_COMPILED;
use crate::router::planner::{CommandParams, RoutePlanner, CONTRACT_BALANCE};
use crate::router::routes::{Group, Quote};
use crate::router::validation::validate_slippage;
use crate::venues::pool::Family;
use crate::venues::{amm, concentrated};

/// Commands plus the native value the execute() call must carry.
#[derive(Debug, Clone)]
pub struct CompiledRoute {
    pub planner: RoutePlanner,
    pub value: U256,
    /// Output floor enforced by the last swap
    pub min_amount_out: U256,
    pub groups: usize,
}

pub struct RouteCompiler<'a> {
    chain: &'a ChainConfig,
}

/// Where the input funds sit before the first swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Custody {
    Caller,
    Router,
}

impl<'a> RouteCompiler<'a> {
    pub fn new(chain: &'a ChainConfig) -> Self {
        Self { chain }
    }

    /// Compile `quote` for `account` with `slippage` as a fraction in [0, 1].
    pub fn compile(
        &self,
        quote: &Quote,
        account: Address,
        slippage: Decimal,
    ) -> Result<CompiledRoute, AggrError> {
        validate_slippage(slippage)?;
        let groups = quote.path.groups();
        if groups.is_empty() {
            return Err(AggrError::EmptyRoute);
        }

        let router = self.chain.router;
        let min_amount_out = math::apply_slippage(
            quote.amount_out,
            quote.to_token.decimals,
            slippage * Decimal::ONE_HUNDRED,
        );
        let unwrap = quote.to_token.is_native();
        let final_recipient = if unwrap { router } else { account };

        let mut planner = RoutePlanner::new();
        let mut value = U256::ZERO;
        let custody = if quote.from_token.is_native() {
            planner.add_command(CommandParams::WrapNative(WrapNativeParams {
                recipient: router,
                amountMin: quote.amount_in,
            }));
            value = quote.amount_in;
            Custody::Router
        } else {
            Custody::Caller
        };

        let last = groups.len() - 1;
        for (i, group) in groups.iter().enumerate() {
            let recipient = if i == last {
                final_recipient
            } else {
                match group.family {
                    // V2 hop lists can only land funds in the router
                    Family::ConstantProduct => router,
                    Family::Concentrated => groups[i + 1].entry_point(),
                }
            };
            let amount_in = if i == 0 {
                quote.amount_in
            } else {
                match group.family {
                    // already transferred into the group's first pool
                    Family::ConstantProduct => U256::ZERO,
                    Family::Concentrated => CONTRACT_BALANCE,
                }
            };
            let amount_out_min = if i == last { min_amount_out } else { U256::ZERO };
            let payer_is_user = i == 0 && custody == Custody::Caller;

            planner.add_command(self.swap(group, recipient, amount_in, amount_out_min, payer_is_user));
        }

        if unwrap {
            planner.add_command(CommandParams::UnwrapNative(UnwrapNativeParams {
                recipient: account,
                amountMin: min_amount_out,
            }));
        }

        ROUTES_COMPILED
            .with_label_values(&[&groups.len().to_string()])
            .inc();
        debug!(
            groups = groups.len(),
            commands = planner.len(),
            %value,
            %min_amount_out,
            "compiled route"
        );

        Ok(CompiledRoute {
            planner,
            value,
            min_amount_out,
            groups: groups.len(),
        })
    }

    fn swap(
        &self,
        group: &Group,
        recipient: Address,
        amount_in: U256,
        amount_out_min: U256,
        payer_is_user: bool,
    ) -> CommandParams {
        match group.family {
            Family::ConstantProduct => CommandParams::V2SwapExactIn(V2SwapExactInParams {
                recipient,
                amountIn: amount_in,
                amountOutMin: amount_out_min,
                routes: amm::routes(&group.edges),
                payerIsUser: payer_is_user,
            }),
            Family::Concentrated => CommandParams::V3SwapExactIn(V3SwapExactInParams {
                recipient,
                amountIn: amount_in,
                amountOutMin: amount_out_min,
                path: concentrated::encode_tick_path(
                    &group.edges,
                    self.chain.tick_spacing_override.as_ref(),
                ),
                payerIsUser: payer_is_user,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::planner::CommandType;
    use crate::router::routes::{RoutePath, Token};
    use crate::venues::pool::{PoolEdge, PoolKind};
    use alloy::primitives::I256;
    use alloy::sol_types::SolValue;

    const ROUTER: Address = Address::new([0xee; 20]);
    const ACCOUNT: Address = Address::new([0xac; 20]);

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn chain() -> ChainConfig {
        ChainConfig {
            chain_id: 10,
            router: ROUTER,
            quoter: Address::repeat_byte(0x99),
            connectors: Vec::new(),
            tick_spacing_override: None,
        }
    }

    fn token(b: u8, native: bool) -> Token {
        Token {
            chain_id: 10,
            address: Address::repeat_byte(b),
            symbol: String::new(),
            decimals: 18,
            wrapped_address: native.then(|| Address::repeat_byte(0x42)),
            listed: false,
            price: Decimal::ZERO,
        }
    }

    /// Path over tokens 1..=n+1 with the given raw pool types.
    fn quote(raws: &[i32], from_native: bool, to_native: bool) -> Quote {
        let edges = raws
            .iter()
            .enumerate()
            .map(|(i, raw)| PoolEdge {
                from: Address::repeat_byte(i as u8 + 1),
                to: Address::repeat_byte(i as u8 + 2),
                pool_id: Address::repeat_byte(0xa0 + i as u8),
                factory: Address::repeat_byte(0xfa),
                kind: PoolKind::from_raw(*raw),
                fee: 0,
                chain_id: 10,
            })
            .collect();
        Quote {
            path: RoutePath::new(edges),
            amount_in: U256::from(500u64),
            amount_out: U256::from(1000u64),
            from_token: token(1, from_native),
            to_token: token(raws.len() as u8 + 1, to_native),
            price_impact: I256::ZERO,
            spender: ROUTER,
        }
    }

    fn v2(input: &[u8]) -> V2SwapExactInParams {
        V2SwapExactInParams::abi_decode_params(input).unwrap()
    }

    fn v3(input: &[u8]) -> V3SwapExactInParams {
        V3SwapExactInParams::abi_decode_params(input).unwrap()
    }

    #[test]
    fn single_family_path_is_one_command() {
        let chain = chain();
        let compiled = RouteCompiler::new(&chain)
            .compile(&quote(&[-1, -1], false, false), ACCOUNT, dec("0.01"))
            .unwrap();
        assert_eq!(compiled.planner.command_types(), vec![CommandType::V2SwapExactIn]);
        assert_eq!(compiled.value, U256::ZERO);

        let params = v2(&compiled.planner.inputs()[0]);
        assert_eq!(params.recipient, ACCOUNT);
        assert_eq!(params.amountIn, U256::from(500u64));
        assert_eq!(params.amountOutMin, U256::from(990u64));
        assert!(params.payerIsUser);
        assert_eq!(params.routes.len(), 2);
        assert!(params.routes.iter().all(|r| !r.stable));
    }

    #[test]
    fn family_switch_hands_funds_through_router() {
        let chain = chain();
        let compiled = RouteCompiler::new(&chain)
            .compile(&quote(&[-1, -1, 100], false, false), ACCOUNT, dec("0.01"))
            .unwrap();
        assert_eq!(
            compiled.planner.command_types(),
            vec![CommandType::V2SwapExactIn, CommandType::V3SwapExactIn]
        );
        let inputs = compiled.planner.inputs();

        let first = v2(&inputs[0]);
        assert_eq!(first.recipient, ROUTER);
        assert_eq!(first.amountIn, U256::from(500u64));
        assert_eq!(first.amountOutMin, U256::ZERO);
        assert!(first.payerIsUser);

        let second = v3(&inputs[1]);
        assert_eq!(second.recipient, ACCOUNT);
        assert_eq!(second.amountIn, CONTRACT_BALANCE);
        assert_eq!(second.amountOutMin, U256::from(990u64));
        assert!(!second.payerIsUser);
        assert_eq!(second.path.len(), 20 + 23);
    }

    #[test]
    fn alternating_families_emit_one_command_per_hop() {
        let chain = chain();
        let q = quote(&[100, -1, 1, 0], false, false);
        let compiled = RouteCompiler::new(&chain).compile(&q, ACCOUNT, dec("0")).unwrap();
        assert_eq!(compiled.planner.len(), 4);
        assert_eq!(compiled.groups, 4);
        let inputs = compiled.planner.inputs();

        // concentrated group pays straight into the next pool
        let first = v3(&inputs[0]);
        assert_eq!(first.recipient, q.path.edges()[1].pool_id);
        assert_eq!(first.amountIn, U256::from(500u64));

        let second = v2(&inputs[1]);
        assert_eq!(second.recipient, ROUTER);
        assert_eq!(second.amountIn, U256::ZERO);
        assert!(!second.payerIsUser);

        let third = v3(&inputs[2]);
        assert_eq!(third.recipient, q.path.edges()[3].pool_id);
        assert_eq!(third.amountIn, CONTRACT_BALANCE);

        let last = v2(&inputs[3]);
        assert_eq!(last.recipient, ACCOUNT);
        assert_eq!(last.amountIn, U256::ZERO);
        assert_eq!(last.amountOutMin, U256::from(1000u64));
        assert!(last.routes[0].stable);
    }

    #[test]
    fn native_source_is_wrapped_first() {
        let chain = chain();
        let compiled = RouteCompiler::new(&chain)
            .compile(&quote(&[-1, 200], true, false), ACCOUNT, dec("0.01"))
            .unwrap();
        assert_eq!(
            compiled.planner.command_types(),
            vec![
                CommandType::WrapNative,
                CommandType::V2SwapExactIn,
                CommandType::V3SwapExactIn
            ]
        );
        assert_eq!(compiled.value, U256::from(500u64));

        let inputs = compiled.planner.inputs();
        let wrap = WrapNativeParams::abi_decode_params(&inputs[0]).unwrap();
        assert_eq!(wrap.recipient, ROUTER);
        assert_eq!(wrap.amountMin, U256::from(500u64));
        assert!(!v2(&inputs[1]).payerIsUser);
    }

    #[test]
    fn native_destination_is_unwrapped_last() {
        let chain = chain();
        let compiled = RouteCompiler::new(&chain)
            .compile(&quote(&[50], false, true), ACCOUNT, dec("0.01"))
            .unwrap();
        assert_eq!(
            compiled.planner.command_types(),
            vec![CommandType::V3SwapExactIn, CommandType::UnwrapNative]
        );
        let inputs = compiled.planner.inputs();
        let swap = v3(&inputs[0]);
        assert_eq!(swap.recipient, ROUTER);
        assert!(swap.payerIsUser);

        let unwrap = UnwrapNativeParams::abi_decode_params(&inputs[1]).unwrap();
        assert_eq!(unwrap.recipient, ACCOUNT);
        assert_eq!(unwrap.amountMin, compiled.min_amount_out);
        assert_eq!(unwrap.amountMin, U256::from(990u64));
    }

    #[test]
    fn tick_spacing_override_reaches_swap_path() {
        let mut chain = chain();
        chain.tick_spacing_override = Some(crate::config::TickSpacingOverride {
            factory: Address::repeat_byte(0xfa),
            flag: 0x10_0000,
        });
        let compiled = RouteCompiler::new(&chain)
            .compile(&quote(&[100], false, false), ACCOUNT, dec("0"))
            .unwrap();
        let path = v3(&compiled.planner.inputs()[0]).path;
        // int24 slot right after the first address: 100 | 0x100000
        assert_eq!(&path[20..23], &[0x10, 0x00, 0x64]);
    }

    #[test]
    fn rejects_bad_slippage_and_empty_routes() {
        let chain = chain();
        let compiler = RouteCompiler::new(&chain);
        let q = quote(&[-1], false, false);
        assert!(matches!(
            compiler.compile(&q, ACCOUNT, dec("1.5")),
            Err(AggrError::InvalidSlippage(_))
        ));
        assert!(matches!(
            compiler.compile(&q, ACCOUNT, dec("-0.1")),
            Err(AggrError::InvalidSlippage(_))
        ));
        assert!(matches!(
            compiler.compile(&quote(&[], false, false), ACCOUNT, dec("0.01")),
            Err(AggrError::EmptyRoute)
        ));
    }
}
